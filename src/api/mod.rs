//! HTTP API module for the payslip engine.
//!
//! This module provides the REST API endpoints for managing employees,
//! recording monthly adjustments and downloading payslips.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AdjustmentRequest, CalculationRequest, PeriodQuery};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
