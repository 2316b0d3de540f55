//! HTTP API module for the Home Plan Engine.
//!
//! This module provides the REST API endpoints for composing financing
//! proposals and running the individual calculators.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DeductionRequest, PlanRequest, ProposalRequest};
pub use response::{ApiError, ProposalResponse};
pub use state::AppState;
