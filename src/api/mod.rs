//! HTTP API module for the Vacation Entitlement Engine.
//!
//! This module provides the REST endpoints for registering vacation records,
//! paging through the roster, and moving it in and out of workbooks and PDF
//! reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DeleteManyRequest, PageQuery};
pub use response::{ApiError, ApiErrorResponse, DeleteResponse, ImportResponse};
pub use state::AppState;
