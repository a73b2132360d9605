//! Error types for the Vacation Entitlement Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while maintaining the roster
//! and exchanging it with spreadsheets and reports.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::RecordId;
use crate::store::StoreError;

/// The main error type for the Vacation Entitlement Engine.
///
/// The variants separate failures where nothing happened (`Validation`,
/// `FileFormat`) from failures that left work partially done
/// (`PartialImport`).
///
/// # Example
///
/// ```
/// use vacation_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/vacation.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/vacation.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A field on a create or update attempt was missing or invalid.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An uploaded workbook could not be read.
    #[error("Unreadable workbook '{path}': {message}")]
    FileFormat {
        /// The path of the workbook.
        path: String,
        /// A description of the format problem.
        message: String,
    },

    /// No record exists with the given identifier.
    #[error("Record not found: {id}")]
    RecordNotFound {
        /// The identifier that was looked up.
        id: RecordId,
    },

    /// The record store rejected an operation or was unavailable.
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    /// A bulk import stopped part way; rows created before the failure remain.
    #[error("Import partially completed: {created} record(s) created before failure: {message}")]
    PartialImport {
        /// Records created before the store failed.
        created: usize,
        /// Worksheet rows rejected by validation.
        rejected: usize,
        /// The store failure that stopped the import.
        message: String,
    },

    /// An uploaded body could not be staged for import.
    #[error("Upload failed: {message}")]
    Upload {
        /// A description of the staging failure.
        message: String,
    },

    /// The entitlement value of a stored salary does not fit a decimal.
    #[error("Entitlement value overflowed for salary {salary} and {entitled_days} day(s)")]
    Valuation {
        /// The salary being valued.
        salary: Decimal,
        /// The entitled days being valued.
        entitled_days: u32,
    },

    /// A workbook or document could not be rendered.
    #[error("Render error: {message}")]
    Render {
        /// A description of the rendering failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
