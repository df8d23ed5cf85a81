//! Simulation workers
//!
//! A [`SimulationJob`] is the whole message a worker needs: the claim
//! snapshot, a copy of the probabilities and the run size. Workers keep no
//! state between jobs, so the same job always describes the same run.

use async_trait::async_trait;
use tracing::{debug, warn};

use domain_billing::ClaimSet;

use crate::engine::{simulate, SimulationOptions};
use crate::error::ForecastError;
use crate::probability::ProbabilityConfig;
use crate::random::RngSource;
use crate::result::SimulationResult;

/// Input message for one simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationJob {
    /// Generation assigned by the coordinator at dispatch
    pub generation: u64,
    pub claims: ClaimSet,
    pub probabilities: ProbabilityConfig,
    pub options: SimulationOptions,
    /// Fixed seed for reproducible runs; entropy when `None`
    pub seed: Option<u64>,
}

impl SimulationJob {
    /// Runs the engine for this job on the current thread
    pub fn run(&self) -> Result<SimulationResult, ForecastError> {
        let mut source = RngSource::from_seed_option(self.seed);
        simulate(&self.claims, &self.probabilities, self.options, &mut source)
    }
}

/// Execution substrate for simulation jobs
///
/// Implementations must not share mutable state with the caller; the job is
/// moved in and a result or typed failure comes back.
#[async_trait]
pub trait SimulationExecutor: Send + Sync + 'static {
    async fn execute(&self, job: SimulationJob) -> Result<SimulationResult, ForecastError>;
}

/// Runs jobs on tokio's blocking thread pool
///
/// Keeps the CPU-bound trial loop off the async worker threads. A panic in
/// the engine surfaces as `ForecastError::ExecutionFailure`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingExecutor;

#[async_trait]
impl SimulationExecutor for BlockingExecutor {
    async fn execute(&self, job: SimulationJob) -> Result<SimulationResult, ForecastError> {
        let generation = job.generation;
        debug!(generation, claims = job.claims.len(), "Dispatching simulation to blocking pool");

        tokio::task::spawn_blocking(move || job.run())
            .await
            .map_err(|err| {
                warn!(generation, error = %err, "Simulation worker terminated abnormally");
                ForecastError::execution_failure(format!("simulation worker failed: {err}"))
            })?
    }
}

/// Runs jobs directly on the calling task
///
/// Suitable for small claim sets and synchronous callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExecutor;

#[async_trait]
impl SimulationExecutor for InlineExecutor {
    async fn execute(&self, job: SimulationJob) -> Result<SimulationResult, ForecastError> {
        job.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probability::Percentage;

    fn job(seed: Option<u64>) -> SimulationJob {
        SimulationJob {
            generation: 1,
            claims: ClaimSet::empty(),
            probabilities: ProbabilityConfig::uniform(Percentage::FULL),
            options: SimulationOptions::new(100, 5),
            seed,
        }
    }

    #[tokio::test]
    async fn test_blocking_executor_matches_inline() {
        let blocking = BlockingExecutor.execute(job(Some(4))).await.unwrap();
        let inline = InlineExecutor.execute(job(Some(4))).await.unwrap();
        assert_eq!(blocking, inline);
    }

    #[tokio::test]
    async fn test_invalid_options_propagate() {
        let mut bad = job(None);
        bad.options = SimulationOptions::new(0, 5);

        let err = BlockingExecutor.execute(bad).await.unwrap_err();
        assert!(matches!(err, ForecastError::InvalidArgument(_)));
    }
}
