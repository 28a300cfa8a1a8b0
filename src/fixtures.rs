//! Fixtures
//!
//! Promotion presets loaded from YAML, e.g.
//!
//! ```yaml
//! base_amount: 100000
//! promotions:
//!   - name: AVA
//!     discount_percentage: 40
//!     max_discount_amount: 10000
//! ```

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::promotions::Promotion;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Promotion preset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromotionsFixture {
    /// Base amount to set alongside the promotions, if any
    #[serde(default)]
    pub base_amount: Option<i64>,

    /// Promotions, in display order
    #[serde(default)]
    pub promotions: Vec<PromotionFixture>,
}

/// Single promotion in a preset
#[derive(Debug, Clone, Deserialize)]
pub struct PromotionFixture {
    /// Provider name
    pub name: String,

    /// Percentage in whole points
    pub discount_percentage: i64,

    /// Cashback cap
    pub max_discount_amount: i64,
}

impl PromotionsFixture {
    /// Load a preset from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a preset from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid preset.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Convert the preset's entries into promotions, clamping each into range.
    pub fn promotions(&self) -> Vec<Promotion> {
        self.promotions.iter().map(Promotion::from).collect()
    }
}

impl From<&PromotionFixture> for Promotion {
    fn from(fixture: &PromotionFixture) -> Self {
        Promotion::new(
            fixture.name.clone(),
            fixture.discount_percentage,
            fixture.max_discount_amount,
        )
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;
    use testresult::TestResult;

    use super::*;

    const PRESET: &str = "
base_amount: 100000
promotions:
  - name: A
    discount_percentage: 40
    max_discount_amount: 10000
  - name: B
    discount_percentage: 250
    max_discount_amount: -1
";

    #[test]
    fn parses_preset() -> TestResult {
        let fixture = PromotionsFixture::from_yaml(PRESET)?;

        assert_eq!(fixture.base_amount, Some(100_000));
        assert_eq!(fixture.promotions.len(), 2);

        Ok(())
    }

    #[test]
    fn promotions_are_clamped() -> TestResult {
        let promotions = PromotionsFixture::from_yaml(PRESET)?.promotions();

        assert_eq!(promotions.get(1), Some(&Promotion::new("B", 100, 0)));

        Ok(())
    }

    #[test]
    fn fields_default_when_absent() -> TestResult {
        let fixture = PromotionsFixture::from_yaml("{}")?;

        assert_eq!(fixture.base_amount, None);
        assert!(fixture.promotions.is_empty());

        Ok(())
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let result = PromotionsFixture::from_yaml("promotions: [name: 1");

        assert!(matches!(result, Err(FixtureError::Yaml(_))));
    }

    #[test]
    fn loads_from_path() -> TestResult {
        let file = NamedTempFile::new()?;

        fs::write(file.path(), PRESET)?;

        let fixture = PromotionsFixture::from_path(file.path())?;

        assert_eq!(fixture.promotions().len(), 2);

        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = PromotionsFixture::from_path("/nonexistent/cashbacc/preset.yaml");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }
}
