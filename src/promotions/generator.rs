//! Randomised promotions for newly added providers.

use crate::{
    promotions::{Promotion, names::generate_name},
    random::RandomSource,
};

/// Number of steps each generated parameter is drawn from.
pub const STEPS: usize = 20;

/// Percentage granted per step, giving multiples of 5 in `5..=100`.
pub const PERCENTAGE_STEP: i64 = 5;

/// Cap granted per step, giving multiples of 2500 in `2500..=50000`.
pub const MAX_DISCOUNT_STEP: i64 = 2_500;

/// Build a promotion with a free name and randomised parameters.
pub fn random_promotion(existing: &[Promotion], random: &mut impl RandomSource) -> Promotion {
    let name = generate_name(existing, random);
    let discount_percentage = draw_step(random) * PERCENTAGE_STEP;
    let max_discount_amount = draw_step(random) * MAX_DISCOUNT_STEP;

    Promotion::new(name, discount_percentage, max_discount_amount)
}

/// Draw a step in `1..=STEPS`.
fn draw_step(random: &mut impl RandomSource) -> i64 {
    let step = random.next_index(STEPS).min(STEPS - 1) + 1;

    i64::try_from(step).unwrap_or(1)
}
