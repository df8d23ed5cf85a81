//! API configuration

use std::time::Duration;

use serde::Deserialize;

use domain_forecast::{CoordinatorConfig, SimulationOptions, DEFAULT_ITERATIONS, DISTRIBUTION_POINTS};

/// API configuration
///
/// Every field has a default, so any subset may be set through `API_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level or `EnvFilter` directive
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Trials per forecast run
    pub simulation_iterations: u32,
    /// Histogram buckets per forecast run
    pub simulation_buckets: u32,
    /// Quiet period before a probability change triggers a run
    pub debounce_ms: u64,
    /// Fixed simulation seed; entropy when unset
    pub simulation_seed: Option<u64>,
    /// Number of generated sample claims
    pub sample_claims: usize,
    /// Fixed seed for the sample claims
    pub sample_seed: Option<u64>,
    /// Emulated delay of the claim source
    pub load_latency_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_json: false,
            simulation_iterations: DEFAULT_ITERATIONS,
            simulation_buckets: DISTRIBUTION_POINTS,
            debounce_ms: 100,
            simulation_seed: None,
            sample_claims: 50,
            sample_seed: None,
            load_latency_ms: 500,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Run size for forecasts
    pub fn simulation_options(&self) -> SimulationOptions {
        SimulationOptions::new(self.simulation_iterations, self.simulation_buckets)
    }

    /// Coordinator settings derived from this configuration
    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            options: self.simulation_options(),
            seed: self.simulation_seed,
            ..CoordinatorConfig::default()
        }
    }

    pub fn load_latency(&self) -> Option<Duration> {
        (self.load_latency_ms > 0).then(|| Duration::from_millis(self.load_latency_ms))
    }
}
