//! HTTP request handlers for the Vacation Entitlement Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{RecordId, RosterRow};
use crate::report::PDF_MIME_TYPE;
use crate::roster::RecordInput;
use crate::spreadsheet::XLSX_MIME_TYPE;

use super::request::{DeleteManyRequest, PageQuery};
use super::response::{ApiError, ApiErrorResponse, DeleteResponse, ImportResponse};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let max_upload_bytes = state.config().server.max_upload_bytes;
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/records",
            get(list_records_handler).post(create_record_handler),
        )
        .route("/records/delete", post(delete_records_handler))
        .route(
            "/records/:id",
            get(get_record_handler)
                .put(update_record_handler)
                .delete(delete_record_handler),
        )
        .route("/import", post(import_handler))
        .route("/export/xlsx", get(export_xlsx_handler))
        .route("/export/pdf", get(export_pdf_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Logs a failed request and converts the error into a response.
fn failure(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request failed"
    );
    error.into()
}

/// Runs workbook or PDF work on the blocking pool with its own handle on the state.
async fn run_blocking<T, F>(state: &AppState, task: F, stage: &'static str) -> EngineResult<T>
where
    T: Send + 'static,
    F: FnOnce(&AppState) -> EngineResult<T> + Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || task(&state))
        .await
        .map_err(|err| EngineError::Render {
            message: format!("{} task failed: {}", stage, err),
        })?
}

/// Maps a JSON body rejection to an API error.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error)
}

/// Builds a file download response.
fn attachment(bytes: Vec<u8>, mime_type: &str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, mime_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Handler for GET /records.
///
/// Returns one page of the roster, newest first, with entitlements recomputed.
async fn list_records_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let page = state
        .roster()
        .list_page(query.page_number())
        .map_err(|e| failure(correlation_id, e))?;
    Ok(Json(page).into_response())
}

/// Handler for POST /records.
async fn create_record_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecordInput>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Json(input) = payload.map_err(|r| json_rejection(correlation_id, r))?;

    let record = state
        .roster()
        .register(input)
        .map_err(|e| failure(correlation_id, e))?;
    info!(
        correlation_id = %correlation_id,
        record_id = %record.id,
        "Record created"
    );
    let row = RosterRow::try_from(&record).map_err(|e| failure(correlation_id, e))?;
    Ok((StatusCode::CREATED, Json(row)).into_response())
}

/// Handler for GET /records/:id.
async fn get_record_handler(State(state): State<AppState>, Path(id): Path<u64>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let record = state
        .roster()
        .find(RecordId(id))
        .map_err(|e| failure(correlation_id, e))?;
    let row = RosterRow::try_from(&record).map_err(|e| failure(correlation_id, e))?;
    Ok(Json(row).into_response())
}

/// Handler for PUT /records/:id.
async fn update_record_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<RecordInput>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Json(input) = payload.map_err(|r| json_rejection(correlation_id, r))?;

    let record = state
        .roster()
        .update(RecordId(id), input)
        .map_err(|e| failure(correlation_id, e))?;
    let row = RosterRow::try_from(&record).map_err(|e| failure(correlation_id, e))?;
    Ok(Json(row).into_response())
}

/// Handler for DELETE /records/:id.
async fn delete_record_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let removed = state
        .roster()
        .delete(RecordId(id))
        .map_err(|e| failure(correlation_id, e))?;
    Ok(Json(DeleteResponse { removed }).into_response())
}

/// Handler for POST /records/delete.
async fn delete_records_handler(
    State(state): State<AppState>,
    payload: Result<Json<DeleteManyRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;

    let removed = state
        .roster()
        .delete_many(&request.ids)
        .map_err(|e| failure(correlation_id, e))?;
    Ok(Json(DeleteResponse { removed }).into_response())
}

/// Handler for POST /import.
///
/// The request body is the workbook itself. It is staged under the upload
/// directory and removed by the importer once the import finishes.
async fn import_handler(State(state): State<AppState>, body: Bytes) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        bytes = body.len(),
        "Processing import request"
    );

    if body.is_empty() {
        return Err(failure(
            correlation_id,
            EngineError::validation("file", "no workbook was uploaded"),
        ));
    }

    let upload_dir = &state.config().upload_dir;
    let path = upload_dir.join(format!("{}.xlsx", correlation_id));
    let staged = async {
        tokio::fs::create_dir_all(upload_dir).await?;
        tokio::fs::write(&path, &body).await
    }
    .await;
    if let Err(err) = staged {
        if let Err(cleanup) = tokio::fs::remove_file(&path).await {
            warn!(
                correlation_id = %correlation_id,
                error = %cleanup,
                "Failed to remove partially staged upload"
            );
        }
        return Err(failure(
            correlation_id,
            EngineError::Upload {
                message: format!("failed to stage upload: {}", err),
            },
        ));
    }

    let start_time = Instant::now();
    let summary = run_blocking(&state, move |state| state.importer().import_file(&path), "import")
        .await
        .map_err(|e| failure(correlation_id, e))?;
    info!(
        correlation_id = %correlation_id,
        created = summary.created.len(),
        rejected = summary.rejected_row_count(),
        duration_us = start_time.elapsed().as_micros(),
        "Import completed"
    );
    Ok(Json(ImportResponse::from(summary)).into_response())
}

/// Handler for GET /export/xlsx.
async fn export_xlsx_handler(State(state): State<AppState>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let bytes = run_blocking(&state, |state| state.exporter().export_roster(), "export")
        .await
        .map_err(|e| failure(correlation_id, e))?;
    Ok(attachment(
        bytes,
        XLSX_MIME_TYPE,
        &state.config().report.xlsx_filename,
    ))
}

/// Handler for GET /export/pdf.
async fn export_pdf_handler(State(state): State<AppState>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let bytes = run_blocking(&state, |state| state.reports().generate_report(), "report")
        .await
        .map_err(|e| failure(correlation_id, e))?;
    Ok(attachment(
        bytes,
        PDF_MIME_TYPE,
        &state.config().report.pdf_filename,
    ))
}
