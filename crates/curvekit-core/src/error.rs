//! Error types for the core primitives.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by dates, tenors, day counts, calendars and compounding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Date does not exist or cannot be parsed.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Tenor string cannot be parsed.
    #[error("Invalid term: {term}")]
    InvalidTerm {
        /// The offending tenor text.
        term: String,
    },

    /// Unknown day count or calendar name.
    #[error("Unknown convention: {name}")]
    UnknownConvention {
        /// The convention name that was not recognised.
        name: String,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid term error.
    #[must_use]
    pub fn invalid_term(term: impl Into<String>) -> Self {
        Self::InvalidTerm { term: term.into() }
    }

    /// Creates an unknown convention error.
    #[must_use]
    pub fn unknown_convention(name: impl Into<String>) -> Self {
        Self::UnknownConvention { name: name.into() }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
