//! Error types for finance data operations.
//!
//! This module defines [`FinanceError`], which covers every failure that can
//! occur while querying the API, validating search results, reshaping
//! statements, rendering charts or writing exports.

use std::fmt;

use thiserror::Error;

/// Errors that can occur during finance data operations.
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status code.
    #[error("HTTP {status} {reason}")]
    Http {
        /// Response status code.
        status: u16,
        /// Canonical reason phrase for the status.
        reason: &'static str,
    },

    /// The API answered with a success status but an error payload.
    #[error("API error: {0}")]
    Api(String),

    /// The response body could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Search results did not match the company record schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A statement record lacks a required field.
    #[error("Record {index} is missing required field `{field}`")]
    MissingField {
        /// Position of the record in the response.
        index: usize,
        /// Wire name of the missing field.
        field: &'static str,
    },

    /// A statement record holds a field of the wrong type.
    #[error("Record {index} field `{field}` is not {expected}")]
    InvalidField {
        /// Position of the record in the response.
        index: usize,
        /// Wire name of the offending field.
        field: &'static str,
        /// Description of the accepted type.
        expected: &'static str,
    },

    /// A statement source needed by a merge was unavailable.
    #[error("{0} is unavailable")]
    SourceUnavailable(&'static str),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Credentials or other configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The chart renderer failed.
    #[error("Chart error: {0}")]
    Chart(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FinanceError {
    /// Returns true for failures of the HTTP exchange itself.
    ///
    /// Operations recover from these by logging them and returning `None`.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Http { .. } | Self::Api(_) | Self::Parse(_)
        )
    }

    /// Returns true if a statement record was missing or mistyped a field.
    #[must_use]
    pub const fn is_extraction(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::InvalidField { .. })
    }
}

/// A single schema violation found while validating a batch of records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Position of the record in the batch, `None` for batch-level problems.
    pub index: Option<usize>,
    /// Wire name of the field, `None` for record-level problems.
    pub field: Option<&'static str>,
    /// Human readable description.
    pub problem: String,
}

impl FieldError {
    pub(crate) fn batch(problem: impl Into<String>) -> Self {
        Self {
            index: None,
            field: None,
            problem: problem.into(),
        }
    }

    pub(crate) fn record(index: usize, problem: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            field: None,
            problem: problem.into(),
        }
    }

    pub(crate) fn field(index: usize, field: &'static str, problem: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            field: Some(field),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.index, self.field) {
            (Some(i), Some(field)) => write!(f, "[{i}].{field}: {}", self.problem),
            (Some(i), None) => write!(f, "[{i}]: {}", self.problem),
            _ => f.write_str(&self.problem),
        }
    }
}

/// Schema mismatch over a batch of search records.
///
/// Holds every field error found, not just the first one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub(crate) const fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        "schema mismatch"
    }

    /// Per-field error detail.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.kind())?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Result type alias using [`FinanceError`].
pub type Result<T> = std::result::Result<T, FinanceError>;
