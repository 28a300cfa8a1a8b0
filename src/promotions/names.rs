//! Provider names for generated promotions.

use crate::{promotions::Promotion, random::RandomSource};

/// Candidate names handed out to newly added promotions.
pub const NAME_POOL: [&str; 17] = [
    "AVA",
    "IVI",
    "UVU",
    "EVE",
    "ONO",
    "Ga-Pay",
    "No-Pay",
    "Lo-Pay",
    "Go-vo",
    "Nana",
    "PayAja",
    "NeverPay",
    "Baby-Pay",
    "Shark-Pay",
    "SKYNET-Pay",
    "TemanBayar",
    "UangAjaib",
];

/// Pick a name from [`NAME_POOL`] that no promotion in `existing` holds.
///
/// A drawn name that is already taken is retried with a counter suffix
/// (`"AVA0"`, then on the next round a fresh draw with `"…1"`, and so on), so
/// the result is always free even once the pool is exhausted.
pub fn generate_name(existing: &[Promotion], random: &mut impl RandomSource) -> String {
    let is_taken = |candidate: &str| existing.iter().any(|p| p.name == candidate);

    let mut run: usize = 0;

    loop {
        let candidate = draw(random);

        if !is_taken(candidate) {
            return candidate.to_string();
        }

        let suffixed = format!("{candidate}{run}");

        if !is_taken(suffixed.as_str()) {
            return suffixed;
        }

        run += 1;
    }
}

fn draw(random: &mut impl RandomSource) -> &'static str {
    let index = random.next_index(NAME_POOL.len()) % NAME_POOL.len();

    NAME_POOL.get(index).copied().unwrap_or("AVA")
}
