//! Persistence
//!
//! The store keeps its state behind a small key-value port holding raw
//! strings. Encoding values as JSON is the store's job, so implementations
//! only move text around.

use std::io;

use mockall::automock;
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Keys the promotion store persists its state under.
pub mod keys {
    /// Base (pre-discount) amount.
    pub const BASE_AMOUNT: &str = "prediscount";

    /// Ordered promotion list.
    pub const PROMOTIONS: &str = "providers";

    /// Cached evaluation result. Written, never trusted on load.
    pub const EVALUATION: &str = "discount";
}

/// Errors raised by persistence backends.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing document could not be encoded or decoded.
    #[error("storage encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend refused the operation.
    #[error("storage unavailable")]
    Unavailable,
}

/// Key-value storage port.
#[automock]
pub trait KeyValueStore {
    /// Read the raw value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}
