//! Forecast handlers

use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, warn};
use validator::Validate;

use domain_forecast::{BlockingExecutor, SimulationExecutor, SimulationJob, SimulationResult};

use crate::dto::forecast::*;
use crate::{error::ApiError, AppState};

/// Current forecast state and the last published result
pub async fn get_forecast(State(state): State<AppState>) -> Json<ForecastResponse> {
    Json(state.forecast.snapshot().into())
}

/// Changes one status's probability
///
/// The coordinator debounces the change; the response only confirms it was
/// accepted.
pub async fn set_probability(
    State(state): State<AppState>,
    Json(request): Json<SetProbabilityRequest>,
) -> Result<(StatusCode, Json<AcceptedResponse>), ApiError> {
    request.validate()?;
    state.forecast.set_probability(request.status, request.percentage)?;
    debug!(status = %request.status, percentage = request.percentage, "Probability change accepted");

    Ok((
        StatusCode::ACCEPTED,
        Json(AcceptedResponse {
            status: request.status,
            percentage: request.percentage,
        }),
    ))
}

/// Runs one simulation outside the coordinator and returns its result
pub async fn run_simulation(
    State(state): State<AppState>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<SimulationResult>, ApiError> {
    request.validate()?;

    let job = SimulationJob {
        generation: 0,
        claims: state.claims.clone(),
        probabilities: request.probability_config()?,
        options: request.options(state.config.simulation_options()),
        seed: request.seed,
    };

    let result = BlockingExecutor.execute(job).await.map_err(|err| {
        warn!(error = %err, "On-demand simulation failed");
        ApiError::from(err)
    })?;

    Ok(Json(result))
}
