//! Error types for recurdate.
//!
//! The expander itself never fails; these errors come from caller-level
//! validation, rule files and configuration.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur outside the expansion engine.
#[derive(Error, Debug)]
pub enum RecurError {
    #[error("Start date cannot be after end date ({start} > {end})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Rule parse error: {0}")]
    RuleParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for recurdate operations.
pub type RecurResult<T> = Result<T, RecurError>;
