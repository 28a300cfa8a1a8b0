//! Cashbacc
//!
//! Cashbacc compares cashback promotions against a pre-discount price and
//! finds the one paying out the most, given each promotion's percentage rate
//! and maximum cashback cap.

pub mod analytics;
pub mod coerce;
pub mod evaluation;
pub mod fixtures;
pub mod identity;
pub mod metadata;
pub mod money;
pub mod observer;
pub mod persistence;
pub mod prelude;
pub mod promotions;
pub mod random;
pub mod report;
pub mod store;
