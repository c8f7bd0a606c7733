//! Error types for Google calendar access.

use thiserror::Error;

/// Errors that can occur while authorizing or reading the calendar.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Not authenticated. Please login first.")]
    NotAuthenticated,

    #[error("{0:#}")]
    Upstream(anyhow::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credential store error: {0}")]
    Store(String),
}

/// Result type alias for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
