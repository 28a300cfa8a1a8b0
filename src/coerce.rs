//! Numeric input coercion.
//!
//! Text typed into a numeric field never produces an error. Anything that
//! does not start with a decimal integer degrades to `0`.

/// Parse the leading decimal integer of `raw`.
///
/// Leading whitespace and a single `+`/`-` sign are accepted, and parsing
/// stops at the first non-digit character, so `"12abc"` yields `12`.
/// Returns `None` when no digits are found. Values outside the `i64` range
/// saturate.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;

    for digit in digits.chars().map_while(|ch| ch.to_digit(10)) {
        seen_digit = true;

        let digit = i64::from(digit);

        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }

    seen_digit.then_some(value)
}

/// Coerce raw text into an integer, falling back to `0` on parse failure.
pub fn integer_or_zero(raw: &str) -> i64 {
    parse_integer(raw).unwrap_or(0)
}

/// Coerce raw text into a base amount: unparseable or negative input is `0`.
pub fn base_amount(raw: &str) -> i64 {
    non_negative(integer_or_zero(raw))
}

/// Clamp a discount percentage into `0..=100`.
pub fn percentage(value: i64) -> i64 {
    value.clamp(0, 100)
}

/// Coerce a negative amount to `0`.
pub fn non_negative(value: i64) -> i64 {
    value.max(0)
}
