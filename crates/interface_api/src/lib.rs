//! HTTP API Layer
//!
//! This crate provides the REST API for the billing dashboard's revenue
//! forecast using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: claim summaries and forecast control
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::initialize(config, &source).await?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod dto;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use domain_billing::{ClaimSet, ClaimSource};
use domain_forecast::{BlockingExecutor, ForecastCoordinator, ForecastHandle, ProbabilityConfig};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::handlers::{claims, forecast, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub claims: ClaimSet,
    pub forecast: ForecastHandle,
    pub config: ApiConfig,
}

impl AppState {
    /// Loads claims from `source`, starts the forecast coordinator and hands
    /// it the claim set
    ///
    /// Must be called inside a tokio runtime.
    pub async fn initialize(config: ApiConfig, source: &dyn ClaimSource) -> Result<Self, ApiError> {
        let claims = source.fetch_claims().await?;
        info!(claims = claims.len(), "Claims loaded");

        let forecast = ForecastCoordinator::spawn(
            config.coordinator_config(),
            ProbabilityConfig::default(),
            BlockingExecutor,
        );
        forecast.load_claims(claims.clone())?;

        Ok(Self {
            claims,
            forecast,
            config,
        })
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Loaded claims, forecast handle and configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/", get(claims::list_claims))
        .route("/stats", get(claims::claim_stats))
        .route("/distribution", get(claims::claim_distribution));

    let forecast_routes = Router::new()
        .route("/", get(forecast::get_forecast))
        .route("/probabilities", put(forecast::set_probability))
        .route("/simulate", post(forecast::run_simulation));

    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/forecast", forecast_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
