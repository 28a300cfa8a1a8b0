//! Promotions

use serde::{Deserialize, Serialize};

use crate::coerce;

pub mod generator;
pub mod names;

/// A single cashback provider's promotion.
///
/// Fields are signed so that lists written by earlier versions load as-is,
/// even when they hold values outside the ranges enforced by
/// [`Promotion::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    /// Display label.
    pub name: String,

    /// Cashback rate in whole percent points.
    pub discount_percentage: i64,

    /// Cap on the absolute cashback amount.
    pub max_discount_amount: i64,
}

impl Promotion {
    /// Create a promotion, clamping the percentage into `0..=100` and
    /// coercing a negative cap to `0`.
    pub fn new(name: impl Into<String>, discount_percentage: i64, max_discount_amount: i64) -> Self {
        Self {
            name: name.into(),
            discount_percentage: coerce::percentage(discount_percentage),
            max_discount_amount: coerce::non_negative(max_discount_amount),
        }
    }

    /// Return a copy of this promotion with `update` merged in.
    ///
    /// Only the fields present in `update` change; those are coerced into
    /// range.
    #[must_use]
    pub fn apply(&self, update: &PromotionUpdate) -> Self {
        Self {
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            discount_percentage: update
                .discount_percentage
                .map_or(self.discount_percentage, coerce::percentage),
            max_discount_amount: update
                .max_discount_amount
                .map_or(self.max_discount_amount, coerce::non_negative),
        }
    }
}

/// Partial set of promotion fields to merge into an existing promotion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionUpdate {
    /// New display label.
    pub name: Option<String>,

    /// New percentage; clamped into `0..=100` when applied.
    pub discount_percentage: Option<i64>,

    /// New cap; negative values become `0` when applied.
    pub max_discount_amount: Option<i64>,
}

impl PromotionUpdate {
    /// Set the new name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the new percentage.
    #[must_use]
    pub fn discount_percentage(mut self, value: i64) -> Self {
        self.discount_percentage = Some(value);
        self
    }

    /// Set the new percentage from raw text; unparseable text becomes `0`.
    #[must_use]
    pub fn raw_discount_percentage(self, raw: &str) -> Self {
        self.discount_percentage(coerce::integer_or_zero(raw))
    }

    /// Set the new cap.
    #[must_use]
    pub fn max_discount_amount(mut self, value: i64) -> Self {
        self.max_discount_amount = Some(value);
        self
    }

    /// Set the new cap from raw text; unparseable text becomes `0`.
    #[must_use]
    pub fn raw_max_discount_amount(self, raw: &str) -> Self {
        self.max_discount_amount(coerce::integer_or_zero(raw))
    }

    /// Whether the update carries no fields.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.discount_percentage.is_none() && self.max_discount_amount.is_none()
    }
}
