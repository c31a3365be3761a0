//! Core error types for the Prunus dashboard.
//!
//! Only conditions that abort a whole computation live here. Problems with a
//! single record (a non-numeric cell, an event with a missing field, an
//! unmatched client name) are logged and skipped by the loader and the engine
//! and never surface as an `Error`.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load source data: {0}")]
    Load(#[from] LoadError),

    /// The source store is unavailable or holds no client records.
    #[error("No data available")]
    NoData,

    /// Client records exist but none of them carries a date key.
    #[error("No dates found")]
    NoDates,

    #[error("Invalid configuration value: {0}")]
    Validation(String),
}

/// Errors raised while reading one of the source files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Source file {path} could not be read: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Source file {path} is not valid JSON: {reason}")]
    MalformedJson { path: String, reason: String },

    #[error("Source file {path} must hold a JSON array of records")]
    NotAnArray { path: String },

    #[error("Client profile table {path} could not be parsed: {reason}")]
    MalformedTable { path: String, reason: String },
}

impl Error {
    /// True for the two "nothing to show" conditions the dashboard renders as
    /// an empty state rather than a failure.
    pub fn is_empty_state(&self) -> bool {
        matches!(self, Error::NoData | Error::NoDates)
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
