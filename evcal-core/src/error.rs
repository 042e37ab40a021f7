//! Error types for the calendar engine.
//!
//! Data-shape problems inside individual events (bad dates, unknown
//! categories, missing optional fields) are never errors; they are routed
//! around and reported as diagnostics. Only a wrong top-level input or an
//! environment failure ends up here.

use thiserror::Error;

/// Errors that can occur in calendar engine operations.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid event feed: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calendar engine operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
