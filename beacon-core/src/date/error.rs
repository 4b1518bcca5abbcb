//! Date errors.

use thiserror::Error;

/// Errors produced when constructing or shifting a [`Date`](super::Date).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// The components do not name a real calendar day.
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    Invalid { year: i32, month: u32, day: u32 },

    /// Arithmetic left the representable range.
    #[error("date arithmetic out of range")]
    OutOfRange,

    /// Text was not a `YYYY-MM-DD` date.
    #[error("cannot parse {input:?} as YYYY-MM-DD")]
    Parse { input: String },
}

/// Result alias for date operations.
pub type Result<T> = std::result::Result<T, DateError>;
