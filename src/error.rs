//! Error types for the fxvol library.
//!
//! All fallible operations return `Result<T, FxVolError>` rather than panicking.
//! Missing market data and missing strike references are reported as values
//! the caller can inspect, never replaced by placeholder numbers.

use thiserror::Error;

use crate::quote::DeltaBucket;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, FxVolError>;

/// Errors that can occur during smile construction and option pricing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FxVolError {
    /// Input data is invalid (e.g., non-positive spot, zero tenor, negative vol).
    #[error("invalid input `{field}`: {message}")]
    InvalidInput {
        /// Name of the field that failed validation.
        field: &'static str,
        message: String,
    },

    /// Risk-reversal or butterfly quotes are absent for one or more delta buckets.
    #[error("incomplete quote for {tenor_days}d tenor: missing buckets {missing:?}")]
    IncompleteQuote {
        tenor_days: u32,
        /// Buckets with an absent RR or BF quote, ascending.
        missing: Vec<DeltaBucket>,
    },

    /// A strike was requested for a smile built without a spot/forward reference.
    #[error("no spot/forward reference available for strike at delta {delta}")]
    MissingReference { delta: i32 },

    /// Numerical computation failed (e.g., NaN or infinite intermediate result).
    #[error("numerical error: {message}")]
    NumericalError { message: String },
}
