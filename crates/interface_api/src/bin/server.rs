//! Revenue Forecast - API Server Binary
//!
//! This binary loads the dashboard's claim data, starts the forecast
//! coordinator and serves the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin forecast-api
//!
//! # Run with environment variables
//! API_PORT=9000 API_SIMULATION_SEED=42 cargo run --bin forecast-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_LOG_JSON` - Emit JSON log lines (default: false)
//! * `API_SIMULATION_ITERATIONS` - Trials per forecast (default: 2000)
//! * `API_SIMULATION_BUCKETS` - Histogram buckets (default: 20)
//! * `API_DEBOUNCE_MS` - Quiet period before a forecast runs (default: 100)
//! * `API_SIMULATION_SEED` - Fixed simulation seed (default: unset)
//! * `API_SAMPLE_CLAIMS` - Generated sample claims (default: 50)
//! * `API_SAMPLE_SEED` - Fixed sample data seed (default: unset)
//! * `API_LOAD_LATENCY_MS` - Emulated claim source delay (default: 500)

use std::net::SocketAddr;

use anyhow::Context;
use domain_billing::InMemoryClaimSource;
use interface_api::{config::ApiConfig, create_router, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API_* configuration")?;

    init_tracing(&config.log_level, config.log_json);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        iterations = config.simulation_iterations,
        debounce_ms = config.debounce_ms,
        "Starting revenue forecast API server"
    );

    let mut source = InMemoryClaimSource::sample(config.sample_claims, config.sample_seed)
        .context("failed to generate sample claims")?;
    if let Some(latency) = config.load_latency() {
        source = source.with_latency(latency);
    }

    let state = AppState::initialize(config.clone(), &source)
        .await
        .context("failed to initialise forecast state")?;

    let app = create_router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
