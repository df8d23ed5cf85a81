//! Test Doubles
//!
//! Deterministic random sources and executors whose completion order the
//! test controls.

use async_trait::async_trait;
use domain_forecast::{
    ForecastError, SimulationExecutor, SimulationJob, SimulationResult, UniformSource,
};
use tokio::sync::{mpsc, oneshot};

/// Uniform source replaying a fixed script of samples, cycling at the end
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    samples: Vec<f64>,
    position: usize,
}

impl ScriptedSource {
    pub fn new(samples: Vec<f64>) -> Self {
        assert!(!samples.is_empty(), "script needs at least one sample");
        Self {
            samples,
            position: 0,
        }
    }

    /// Source that always returns `value`
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of samples drawn so far
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl UniformSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        let value = self.samples[self.position % self.samples.len()];
        self.position += 1;
        value
    }
}

/// A job held by [`GatedExecutor`] until the test completes it
#[derive(Debug)]
pub struct PendingJob {
    pub job: SimulationJob,
    reply: oneshot::Sender<Result<SimulationResult, ForecastError>>,
}

impl PendingJob {
    pub fn generation(&self) -> u64 {
        self.job.generation
    }

    /// Runs the engine for the held job and reports the outcome
    pub fn complete(self) {
        let outcome = self.job.run();
        let _ = self.reply.send(outcome);
    }

    /// Reports an arbitrary outcome
    pub fn respond(self, outcome: Result<SimulationResult, ForecastError>) {
        let _ = self.reply.send(outcome);
    }
}

/// Executor that hands every job to the test and waits for its reply
pub struct GatedExecutor {
    jobs_tx: mpsc::UnboundedSender<PendingJob>,
}

impl GatedExecutor {
    /// Returns the executor and the receiver on which dispatched jobs arrive
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingJob>) {
        let (jobs_tx, jobs_rx) = mpsc::unbounded_channel();
        (Self { jobs_tx }, jobs_rx)
    }
}

#[async_trait]
impl SimulationExecutor for GatedExecutor {
    async fn execute(&self, job: SimulationJob) -> Result<SimulationResult, ForecastError> {
        let (reply, outcome) = oneshot::channel();
        self.jobs_tx
            .send(PendingJob { job, reply })
            .map_err(|_| ForecastError::execution_failure("test gate closed"))?;
        outcome
            .await
            .map_err(|_| ForecastError::execution_failure("job dropped without reply"))?
    }
}

/// Executor that always panics
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingExecutor;

#[async_trait]
impl SimulationExecutor for PanickingExecutor {
    async fn execute(&self, job: SimulationJob) -> Result<SimulationResult, ForecastError> {
        panic!("simulation worker crashed on generation {}", job.generation)
    }
}
