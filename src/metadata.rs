//! Site metadata

use std::fmt;

/// Static descriptive fields for link previews and search engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteMetadata {
    /// Page title.
    pub title: &'static str,
    /// Short description.
    pub description: &'static str,
    /// Canonical URL.
    pub canonical_url: &'static str,
    /// Preview image URL.
    pub image_url: &'static str,
    /// Site name.
    pub site_name: &'static str,
    /// Author's social handle.
    pub handle: &'static str,
    /// Where donations go.
    pub donation_url: &'static str,
}

/// Metadata for the calculator.
pub const SITE: SiteMetadata = SiteMetadata {
    title: "Cashbacc",
    description: "He attacc, he protecc, but most importantly, he calculate cashbacc",
    canonical_url: "https://cashba.cc/",
    image_url: "https://cashba.cc/image/og.png",
    site_name: "CashBacc",
    handle: "@mathdroid",
    donation_url: "https://karyakarsa.com/mathdroid",
};

impl SiteMetadata {
    /// Tweet-intent link sharing the calculator.
    pub fn share_url(&self) -> String {
        let text = self.description.replace(' ', "%20").replace(',', "%2C");
        let url = self.canonical_url.trim_end_matches('/');
        let via = self.handle.trim_start_matches('@');

        format!("https://twitter.com/intent/tweet?text={text}&url={url}&via={via}")
    }
}

impl fmt::Display for SiteMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        writeln!(f, "{}", self.canonical_url)?;
        write!(f, "{}", self.handle)
    }
}
