//! HTTP API for the attendance calculation engine.
//!
//! This module exposes the calculation as a single `POST /calculate`
//! endpoint over axum.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, DataSetRequest, DateRangeRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
