//! HTTP request handlers for the Payroll Engine API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Payroll, PayrollResult};

use super::request::PayrollQuery;
use super::response::ApiErrorResponse;
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", get(payroll_handler))
        .with_state(state)
}

/// Handler for `GET /payroll`.
///
/// Validates the query, runs both statutory engines followed by the fixed
/// and percentage discounts, and returns a [`PayrollResult`].
async fn payroll_handler(
    State(state): State<AppState>,
    query: Result<Query<PayrollQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "Malformed query string"
            );
            return ApiErrorResponse::invalid_query(body_text).into_response();
        }
    };

    let rules = state.config().rules();
    let request = match query.validate(rules.minimum_gross_pay(), rules.maximum_amount()) {
        Ok(request) => request,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll request rejected"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let start_time = Instant::now();
    let payroll = Payroll::new(
        request.gross_pay,
        request.dependents,
        rules,
        request.optional_discounts(),
    );
    let result = PayrollResult::from_payroll(&payroll, rules.metadata().version.clone());

    info!(
        correlation_id = %correlation_id,
        calculation_id = %result.calculation_id,
        gross_pay = %result.gross_pay,
        net_pay = %result.net_pay,
        dependents = request.dependents,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll calculated"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(result),
    )
        .into_response()
}
