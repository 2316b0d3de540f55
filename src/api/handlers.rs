//! HTTP request handlers for the Home Plan Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{build_proposal, compute_deduction, compute_plan};
use crate::error::EngineResult;
use crate::models::{DeductionInput, PlanInput, ProposalSummary, SimulationParameters};

use super::request::{DeductionRequest, PlanRequest, ProposalRequest};
use super::response::{ApiError, ApiErrorResponse, ProposalResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/proposal", post(proposal_handler))
        .route("/plan", post(plan_handler))
        .route("/deduction", post(deduction_handler))
        .route("/defaults", get(defaults_handler))
        .with_state(state)
}

/// Handler for POST /proposal endpoint.
///
/// Overlays the request on the configured defaults and returns the full
/// proposal together with its rounded summary.
async fn proposal_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProposalRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing proposal request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match perform_proposal(request, state.config().defaults()) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                tiers = response.proposal.plans.len(),
                total_return = %response.summary.deduction.total_yen,
                duration_us = response.proposal.audit_trace.duration_us,
                "Proposal composed successfully"
            );
            json_response(StatusCode::OK, &response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Proposal failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn perform_proposal(
    request: ProposalRequest,
    defaults: SimulationParameters,
) -> EngineResult<ProposalResponse> {
    let params = request.apply_to(defaults)?;
    let proposal = build_proposal(&params)?;
    let summary = ProposalSummary::from_proposal(&proposal)?;
    Ok(ProposalResponse { proposal, summary })
}

/// Handler for POST /plan endpoint.
///
/// Runs one budget/payment calculation.
async fn plan_handler(payload: Result<Json<PlanRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing plan request");

    let input: PlanInput = match payload {
        Ok(Json(req)) => req.into(),
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match compute_plan(&input) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                total_budget = result.total_budget,
                monthly_payment = result.monthly_payment,
                "Plan calculated"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Plan calculation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /deduction endpoint.
///
/// Runs one tax deduction projection.
async fn deduction_handler(payload: Result<Json<DeductionRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing deduction request");

    let input: DeductionInput = match payload {
        Ok(Json(req)) => req.into(),
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match compute_deduction(&input) {
        Ok(schedule) => {
            info!(
                correlation_id = %correlation_id,
                years = schedule.years(),
                total_return = schedule.total_return,
                "Deduction projected"
            );
            json_response(StatusCode::OK, &schedule)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Deduction projection failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /defaults endpoint.
///
/// Returns the configured default parameters for a fresh form.
async fn defaults_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, &state.config().defaults())
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
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
    json_response(StatusCode::BAD_REQUEST, &error)
}
