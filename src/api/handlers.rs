//! HTTP request handlers for the payslip API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_adjustment, derive_rates, summarize_period};
use crate::error::EngineError;
use crate::models::{Employee, EmployeeUpdate, NewEmployee, PeriodSummary};
use crate::render::PayslipValues;

use super::request::{AdjustmentRequest, CalculationRequest, PeriodQuery};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route(
            "/employees/:id/adjustment",
            get(get_adjustment).post(record_adjustment),
        )
        .route("/employees/:id/payslip", get(download_payslip))
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
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
    Err(ApiErrorResponse::bad_request(error))
}

/// Logs an engine error and converts it into a response.
fn failure(correlation_id: Uuid, context: &'static str, err: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "{}", context
    );
    err.into()
}

/// Handler for GET /employees.
async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    let correlation_id = Uuid::new_v4();
    let employees = state
        .store()
        .list()
        .map_err(|e| failure(correlation_id, "Listing employees failed", e))?;
    Ok(Json(employees))
}

/// Handler for POST /employees.
async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee creation");

    let new_employee = parse_body(correlation_id, payload)?;
    let employee = state
        .store()
        .insert(new_employee)
        .map_err(|e| failure(correlation_id, "Employee creation failed", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = employee.id,
        "Employee created"
    );
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for GET /employees/{id}.
async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Employee>> {
    let correlation_id = Uuid::new_v4();
    let employee = state
        .store()
        .get(id)
        .map_err(|e| failure(correlation_id, "Employee lookup failed", e))?;
    Ok(Json(employee))
}

/// Handler for PUT /employees/{id}.
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> ApiResult<Json<Employee>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = id, "Processing employee update");

    let update = parse_body(correlation_id, payload)?;
    let employee = state
        .store()
        .update(id, &update)
        .map_err(|e| failure(correlation_id, "Employee update failed", e))?;
    Ok(Json(employee))
}

/// Handler for DELETE /employees/{id}.
async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Employee>> {
    let correlation_id = Uuid::new_v4();
    let employee = state
        .store()
        .delete(id)
        .map_err(|e| failure(correlation_id, "Employee deletion failed", e))?;

    info!(correlation_id = %correlation_id, employee_id = id, "Employee deleted");
    Ok(Json(employee))
}

/// Handler for POST /employees/{id}/adjustment.
///
/// Validates and calculates the period before recording anything, so a
/// rejected request leaves the employee untouched.
async fn record_adjustment(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<AdjustmentRequest>, JsonRejection>,
) -> ApiResult<Json<PeriodSummary>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = id, "Processing adjustment request");

    let request = parse_body(correlation_id, payload)?;
    let (year, month) = request.period(today());
    let start_time = Instant::now();

    let employee = state
        .store()
        .get(id)
        .map_err(|e| failure(correlation_id, "Employee lookup failed", e))?;
    let summary = summarize_period(&employee, &request.inputs, year, month)
        .map_err(|e| failure(correlation_id, "Adjustment calculation failed", e))?;
    state
        .store()
        .record_period(id, year, month, &request.inputs)
        .map_err(|e| failure(correlation_id, "Recording adjustment failed", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = id,
        year,
        month,
        final_salary = %summary.adjustment.final_salary,
        duration_us = start_time.elapsed().as_micros() as u64,
        "Adjustment recorded"
    );
    Ok(Json(summary))
}

/// Handler for GET /employees/{id}/adjustment.
///
/// Uses the inputs recorded for the period, or zero inputs if none were.
async fn get_adjustment(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<PeriodSummary>> {
    let correlation_id = Uuid::new_v4();
    let (year, month) = query.resolve(today());

    let employee = state
        .store()
        .get(id)
        .map_err(|e| failure(correlation_id, "Employee lookup failed", e))?;
    let inputs = state
        .store()
        .period_inputs(id, year, month)
        .map_err(|e| failure(correlation_id, "Loading adjustment failed", e))?
        .unwrap_or_default();
    let summary = summarize_period(&employee, &inputs, year, month)
        .map_err(|e| failure(correlation_id, "Adjustment calculation failed", e))?;

    Ok(Json(summary))
}

/// Handler for GET /employees/{id}/payslip.
///
/// Renders the payslip for the requested period and returns it inline as
/// `<name>_details.pdf`.
async fn download_payslip(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = id, "Processing payslip request");

    let issue_date = today();
    let (year, month) = query.resolve(issue_date);
    let start_time = Instant::now();

    let employee = state
        .store()
        .get(id)
        .map_err(|e| failure(correlation_id, "Employee lookup failed", e))?;
    let inputs = state
        .store()
        .period_inputs(id, year, month)
        .map_err(|e| failure(correlation_id, "Loading adjustment failed", e))?
        .unwrap_or_default();

    let summary = summarize_period(&employee, &inputs, year, month)
        .map_err(|e| failure(correlation_id, "Adjustment calculation failed", e))?;
    let values = PayslipValues::new(
        &employee,
        &inputs,
        &summary.adjustment,
        issue_date,
        state.date_format(),
    )
    .map_err(|e| failure(correlation_id, "Payslip formatting failed", e))?;

    let renderer = state.renderer();
    let pdf = tokio::task::spawn_blocking(move || renderer.render(&values))
        .await
        .map_err(EngineError::render)
        .and_then(|result| result)
        .map_err(|e| failure(correlation_id, "Payslip rendering failed", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = id,
        final_salary = %summary.adjustment.final_salary,
        bytes = pdf.len(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Payslip generated"
    );

    let disposition = format!(
        "inline; filename=\"{}_details.pdf\"",
        sanitize_file_name(&employee.name)
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

/// Handler for POST /calculate endpoint.
///
/// Derives rates for the month and applies the inputs without touching the
/// employee store.
async fn calculate_handler(
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = parse_body(correlation_id, payload)?;
    let start_time = Instant::now();

    let adjustment = derive_rates(request.base_monthly_salary, request.year, request.month)
        .and_then(|rates| {
            calculate_adjustment(request.base_monthly_salary, &rates, &request.inputs)
        })
        .map_err(|e| failure(correlation_id, "Calculation failed", e))?;

    info!(
        correlation_id = %correlation_id,
        final_salary = %adjustment.final_salary,
        duration_us = start_time.elapsed().as_micros() as u64,
        "Calculation completed successfully"
    );
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(adjustment),
    ))
}

/// Makes a name safe to embed in a quoted header parameter.
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' | '/' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
