//! Error types for rollcall.
//!
//! This module defines all error types used throughout the rollcall crate.
//! Every failure is meant to surface as a readable message at the front desk;
//! none should take the process down.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rollcall operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Roster Errors ===
    /// The roster file does not exist.
    #[error("roster file not found: {path}")]
    SourceNotFound {
        /// Path that was expected to hold the roster.
        path: PathBuf,
    },

    /// The roster or log header is missing a required column.
    #[error("{path} is missing required column '{column}'")]
    SchemaMismatch {
        /// File whose header was checked.
        path: PathBuf,
        /// The column that was absent.
        column: &'static str,
    },

    /// A data row could not be parsed.
    #[error("{path}:{line}: malformed row (expected {expected} fields, found {found})")]
    MalformedRow {
        /// File containing the bad row.
        path: PathBuf,
        /// 1-based line number of the bad row.
        line: usize,
        /// Fields required by the header.
        expected: usize,
        /// Fields actually present.
        found: usize,
    },

    /// A log row's timestamp field could not be parsed.
    #[error("{path}:{line}: invalid timestamp '{value}'")]
    InvalidTimestamp {
        /// File containing the bad row.
        path: PathBuf,
        /// 1-based line number of the bad row.
        line: usize,
        /// The rejected timestamp field.
        value: String,
    },

    // === Validation Errors ===
    /// A required registration field was empty after trimming.
    #[error("required field '{field}' is empty")]
    MissingField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// A registration field contains a character the ledger format reserves.
    #[error("field '{field}' must not contain commas or line breaks")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The id being registered already exists in the roster.
    #[error("member id '{id}' is already registered")]
    DuplicateId {
        /// The duplicate id.
        id: String,
    },

    /// A day argument could not be parsed as a calendar date.
    #[error("invalid day '{day}': expected YYYY-MM-DD")]
    InvalidDay {
        /// The rejected input.
        day: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An append to a ledger file could not complete.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        /// File being written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for rollcall operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a missing-field validation error.
    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create an invalid-field validation error.
    #[must_use]
    pub fn invalid_field(field: &'static str) -> Self {
        Self::InvalidField { field }
    }

    /// Create a duplicate-id validation error.
    #[must_use]
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Create an invalid-day error.
    #[must_use]
    pub fn invalid_day(day: impl Into<String>) -> Self {
        Self::InvalidDay { day: day.into() }
    }

    /// Check if this error is a registration validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::InvalidField { .. } | Self::DuplicateId { .. }
        )
    }
}
