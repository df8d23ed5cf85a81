//! Forecast DTOs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_billing::PaymentStatus;
use domain_forecast::{
    CoordinatorState, ForecastError, ForecastSnapshot, ProbabilityConfig, SimulationOptions,
    SimulationResult,
};

#[derive(Debug, Deserialize, Validate)]
pub struct SetProbabilityRequest {
    pub status: PaymentStatus,
    #[validate(range(min = 0, max = 100, message = "percentage must be between 0 and 100"))]
    pub percentage: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SimulateRequest {
    /// Percentage per status
    pub probabilities: BTreeMap<PaymentStatus, i64>,
    /// Trials, at most 100,000
    #[validate(range(min = 1, max = 100_000))]
    pub iterations: Option<u32>,
    #[validate(range(min = 1, max = 1_000))]
    pub bucket_count: Option<u32>,
    pub seed: Option<u64>,
}

impl SimulateRequest {
    /// Validated probability configuration
    pub fn probability_config(&self) -> Result<ProbabilityConfig, ForecastError> {
        ProbabilityConfig::from_percentages(self.probabilities.iter().map(|(s, p)| (*s, *p)))
    }

    /// Run size, falling back to `defaults` for omitted fields
    pub fn options(&self, defaults: SimulationOptions) -> SimulationOptions {
        SimulationOptions::new(
            self.iterations.unwrap_or(defaults.iterations),
            self.bucket_count.unwrap_or(defaults.bucket_count),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    pub status: PaymentStatus,
    pub percentage: i64,
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub state: CoordinatorState,
    pub busy: bool,
    pub claims_loaded: bool,
    /// Generation of `result`; zero before the first forecast
    pub generation: u64,
    pub probabilities: ProbabilityConfig,
    pub result: Option<SimulationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl From<ForecastSnapshot> for ForecastResponse {
    fn from(snapshot: ForecastSnapshot) -> Self {
        Self {
            state: snapshot.state,
            busy: snapshot.busy,
            claims_loaded: snapshot.claims_loaded,
            generation: snapshot.generation,
            probabilities: snapshot.probabilities,
            result: snapshot.result,
            last_error: snapshot.last_error.map(|e| e.to_string()),
        }
    }
}
