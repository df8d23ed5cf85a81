//! Claims handlers

use axum::{extract::State, Json};

use domain_billing::{status_distribution, BillingStats};

use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

/// Lists the loaded claims
pub async fn list_claims(State(state): State<AppState>) -> Json<Vec<ClaimResponse>> {
    Json(state.claims.iter().map(ClaimResponse::from).collect())
}

/// Totals and per-status amounts
pub async fn claim_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = BillingStats::from_records(&state.claims)?;
    Ok(Json(StatsResponse::from(&stats)))
}

/// Claim counts per status
pub async fn claim_distribution(State(state): State<AppState>) -> Json<DistributionResponse> {
    Json(DistributionResponse {
        counts: status_distribution(&state.claims),
    })
}
