//! Money display

use rusty_money::{
    FormattableCurrency, Formatter, LocalFormat, Money, Params, Position,
    iso::{self, Currency},
};
use thiserror::Error;

/// Currency errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Resolve a supported ISO 4217 code.
///
/// # Errors
///
/// Returns [`CurrencyError::UnknownCurrency`] for codes outside the
/// supported set.
pub fn parse_currency(code: &str) -> Result<&'static Currency, CurrencyError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "IDR" => Ok(iso::IDR),
        "MYR" => Ok(iso::MYR),
        "SGD" => Ok(iso::SGD),
        "USD" => Ok(iso::USD),
        "EUR" => Ok(iso::EUR),
        "GBP" => Ok(iso::GBP),
        other => Err(CurrencyError::UnknownCurrency(other.to_string())),
    }
}

/// Express a whole-unit amount as money in `currency`.
pub fn money(amount: i64, currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_major(amount, currency)
}

const SYMBOL_FIRST: &[Position] = &[Position::Sign, Position::Symbol, Position::Amount];
const SYMBOL_LAST: &[Position] = &[Position::Sign, Position::Amount, Position::Symbol];

/// Format a whole-unit amount in `currency`, without minor units.
///
/// Rupiah amounts group thousands with `.` (`Rp12.500`); other currencies
/// follow their locale.
pub fn format_amount(amount: i64, currency: &'static Currency) -> String {
    let format = LocalFormat::from_locale(currency.locale());

    let digit_separator = if currency == iso::IDR {
        '.'
    } else {
        format.digit_separator
    };

    let params = Params {
        digit_separator,
        exponent_separator: format.exponent_separator,
        separator_pattern: format.digit_separator_pattern,
        positions: if currency.symbol_first() {
            SYMBOL_FIRST
        } else {
            SYMBOL_LAST
        },
        rounding: Some(0),
        symbol: Some(currency.symbol()),
        code: Some(currency.code()),
    };

    Formatter::money(&money(amount, currency), params)
}
