//! Best-discount evaluation

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::promotions::Promotion;

/// Largest cashback across a promotion list and the position that earns it.
///
/// Serialised as `{"amount": …, "index": …}` with `-1` standing in for "no
/// winner".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EvaluationRecord", into = "EvaluationRecord")]
pub struct Evaluation {
    amount: i64,
    index: Option<usize>,
}

impl Evaluation {
    /// The best cashback amount, `0` when nothing qualifies.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Position of the winning promotion, if any earns a positive cashback.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Position of the winner using `-1` for "no winner".
    pub fn sentinel_index(&self) -> i64 {
        self.index
            .and_then(|index| i64::try_from(index).ok())
            .unwrap_or(-1)
    }

    /// The winning promotion within the list this evaluation was computed
    /// from.
    pub fn winner<'a>(&self, promotions: &'a [Promotion]) -> Option<&'a Promotion> {
        promotions.get(self.index?)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct EvaluationRecord {
    amount: i64,
    index: i64,
}

impl From<EvaluationRecord> for Evaluation {
    fn from(record: EvaluationRecord) -> Self {
        Self {
            amount: record.amount,
            index: usize::try_from(record.index).ok(),
        }
    }
}

impl From<Evaluation> for EvaluationRecord {
    fn from(evaluation: Evaluation) -> Self {
        Self {
            amount: evaluation.amount,
            index: evaluation.sentinel_index(),
        }
    }
}

/// Find the promotion giving the largest cashback on `base_amount`.
///
/// Promotions are scanned in order and a later promotion only wins with a
/// strictly larger amount, so ties go to the earliest one. A list where no
/// promotion earns more than `0` evaluates to `(0, None)`.
pub fn evaluate(promotions: &[Promotion], base_amount: i64) -> Evaluation {
    promotions
        .iter()
        .enumerate()
        .fold(Evaluation::default(), |best, (index, promotion)| {
            let amount = cashback(promotion, base_amount);

            if amount > best.amount {
                Evaluation {
                    amount,
                    index: Some(index),
                }
            } else {
                best
            }
        })
}

/// Cashback a single promotion earns on `base_amount`: the rounded
/// percentage of the base, limited by the promotion's cap.
pub fn cashback(promotion: &Promotion, base_amount: i64) -> i64 {
    promotion
        .max_discount_amount
        .min(percent_of(promotion.discount_percentage, base_amount))
}

/// `percentage`% of `amount`, rounded to the nearest integer with halves
/// rounded away from zero. Saturates at the `i64` bounds.
fn percent_of(percentage: i64, amount: i64) -> i64 {
    let product = i128::from(percentage) * i128::from(amount);

    let saturated = if product.is_negative() {
        i64::MIN
    } else {
        i64::MAX
    };

    // A scale of 2 divides the product by 100 exactly.
    let Ok(applied) = Decimal::try_from_i128_with_scale(product, 2) else {
        return saturated;
    };

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(saturated)
}
