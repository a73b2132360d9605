//! Response types for the Vacation Entitlement Engine API.
//!
//! This module defines the response bodies and the mapping from engine
//! errors to HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::RecordId;
use crate::spreadsheet::{ImportSummary, RejectedRow};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                )
            }
            EngineError::Validation { .. } => {
                ApiErrorResponse::new(StatusCode::BAD_REQUEST, ApiError::validation_error(message))
            }
            EngineError::FileFormat { .. } => ApiErrorResponse::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "FILE_FORMAT_ERROR",
                    message,
                    "Nothing was imported",
                ),
            ),
            EngineError::RecordNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("RECORD_NOT_FOUND", message),
            ),
            EngineError::Store(_) => ApiErrorResponse::new(
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::new("STORE_ERROR", message),
            ),
            EngineError::PartialImport {
                created, rejected, ..
            } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "PARTIAL_IMPORT",
                    message,
                    format!(
                        "{} record(s) were created and remain stored; {} row(s) were rejected",
                        created, rejected
                    ),
                ),
            ),
            EngineError::Upload { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("UPLOAD_ERROR", message),
            ),
            EngineError::Valuation { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("VALUATION_ERROR", message),
            ),
            EngineError::Render { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("RENDER_ERROR", message),
            ),
        }
    }
}

/// Body returned by a completed import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    /// Rows that passed validation.
    pub accepted: usize,
    /// Ids of the records created, in worksheet order.
    pub created: Vec<RecordId>,
    /// Number of rows skipped by validation.
    pub rejected_row_count: usize,
    /// The skipped rows with their reasons.
    pub rejected_rows: Vec<RejectedRow>,
}

impl From<ImportSummary> for ImportResponse {
    fn from(summary: ImportSummary) -> Self {
        Self {
            accepted: summary.accepted.len(),
            rejected_row_count: summary.rejected_row_count(),
            created: summary.created,
            rejected_rows: summary.rejected,
        }
    }
}

/// Body returned by the delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Records actually removed.
    pub removed: usize,
}
