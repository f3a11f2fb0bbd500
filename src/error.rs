//! Error types for receipt storage, scoring and the service boundary.

use crate::models::ReceiptId;

/// All errors that can occur when storing, looking up or scoring receipts.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    /// No receipt is stored under the given identifier.
    #[error("receipt not found: {0}")]
    NotFound(ReceiptId),

    /// A decimal amount field could not be parsed.
    #[error("invalid amount in {field}: {value:?}")]
    InvalidAmount {
        /// Name of the offending field (`total` or `price`).
        field: &'static str,
        /// The raw text that failed to parse.
        value: String,
        /// Underlying decimal parse failure.
        #[source]
        source: rust_decimal::Error,
    },

    /// The purchase date has no usable day-of-month component.
    #[error("invalid purchase date {value:?}: {reason}")]
    InvalidDate {
        /// The raw date text.
        value: String,
        /// Why the day could not be extracted.
        reason: String,
    },

    /// The purchase time is not in 24-hour `HH:MM` form.
    #[error("invalid purchase time {value:?}: {reason}")]
    InvalidTime {
        /// The raw time text.
        value: String,
        /// Why the time could not be parsed.
        reason: String,
    },

    /// Receipt storage backend failed.
    #[error("storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O failure while reading receipts or serving requests.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, ReceiptError>;
