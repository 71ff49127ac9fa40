//! Error types for the appraiser
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

use crate::remote::MAX_BATCH_SIZE;

// == Appraise Error Enum ==
/// Unified error type for the appraiser.
#[derive(Error, Debug)]
pub enum AppraiseError {
    /// Persisted price cache exists but could not be read or parsed
    #[error("Price cache is corrupt: {0}")]
    CacheLoadCorruption(String),

    /// Price cache could not be written back to storage
    #[error("Failed to write price cache: {0}")]
    CacheWrite(String),

    /// A remote call was asked for zero or too many ids
    #[error("Invalid batch size: {0} (expected 1..={})", MAX_BATCH_SIZE)]
    InvalidBatchSize(usize),

    /// Network, HTTP or protocol failure talking to the pricing service
    #[error("Remote price source unavailable: {0}")]
    RemoteUnavailable(String),

    /// Line item name has no catalog entry
    #[error("Unknown item name: {0}")]
    UnknownItemName(String),

    /// Item catalog missing or malformed
    #[error("Failed to load item catalog: {0}")]
    CatalogLoad(String),

    /// Requested housing list does not exist
    #[error("Housing list not found: {0}")]
    ListNotFound(String),

    /// Configured homes directory does not exist
    #[error("Save directory not found: {0}")]
    SaveDirMissing(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppraiseError {
    /// Returns true for errors that must stop the run regardless of policy.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            AppraiseError::RemoteUnavailable(_) | AppraiseError::UnknownItemName(_)
        )
    }
}

// == Result Type Alias ==
/// Convenience Result type for the appraiser.
pub type Result<T> = std::result::Result<T, AppraiseError>;
