//! Forecast execution coordinator
//!
//! Decides *when* the engine runs. Probability changes are debounced so a
//! burst of updates costs one run, each dispatched run carries a generation
//! number, and a result is published only if no newer run has been scheduled
//! or dispatched since. Runs are never cancelled; a superseded run finishes
//! and its result is dropped.
//!
//! The coordinator is an actor: [`ForecastCoordinator`] owns all scheduling
//! state and is driven from a single task, while callers talk to it through
//! a cloneable [`ForecastHandle`].
//!
//! # Usage
//!
//! ```rust,ignore
//! let handle = ForecastCoordinator::spawn(
//!     CoordinatorConfig::default(),
//!     ProbabilityConfig::default(),
//!     BlockingExecutor,
//! );
//! let mut events = handle.subscribe();
//!
//! handle.load_claims(claims)?;
//! handle.set_probability(PaymentStatus::Pending, 55)?;
//!
//! while let Ok(event) = events.recv().await {
//!     if let ForecastEvent::Published { result, .. } = event {
//!         render(&result);
//!     }
//! }
//! ```

use std::collections::BTreeSet;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use domain_billing::{ClaimSet, PaymentStatus};

use crate::engine::SimulationOptions;
use crate::error::ForecastError;
use crate::probability::{Percentage, ProbabilityConfig};
use crate::result::SimulationResult;
use crate::worker::{SimulationExecutor, SimulationJob};

/// Quiet period before a probability change triggers a run
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Coordinator settings
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Debounce interval
    pub debounce: Duration,
    /// Size of every dispatched run
    pub options: SimulationOptions,
    /// Fixed seed passed to every job; entropy when `None`
    pub seed: Option<u64>,
    /// Buffered events per subscriber before the slowest one lags
    pub event_capacity: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            options: SimulationOptions::default(),
            seed: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// Scheduling state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatorState {
    /// Nothing pending and no authoritative run in flight
    Idle,
    /// A change is waiting for the debounce timer
    Scheduled,
    /// The latest dispatched run has not reported back
    Running,
}

/// Notifications delivered to subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastEvent {
    /// The busy signal flipped
    BusyChanged(bool),
    /// A current result was accepted
    Published {
        generation: u64,
        result: SimulationResult,
    },
    /// A superseded run reported back and was dropped
    Discarded { generation: u64 },
    /// The current run failed; the last published result is kept
    Failed {
        generation: u64,
        error: ForecastError,
    },
}

/// Point-in-time view of the coordinator for renderers
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSnapshot {
    pub state: CoordinatorState,
    pub busy: bool,
    /// Generation of `result`, zero before the first publication
    pub generation: u64,
    pub result: Option<SimulationResult>,
    pub last_error: Option<ForecastError>,
    pub probabilities: ProbabilityConfig,
    pub claims_loaded: bool,
}

#[derive(Debug)]
enum Command {
    LoadClaims(ClaimSet),
    Request(ProbabilityConfig),
    SetProbability {
        status: PaymentStatus,
        percentage: Percentage,
    },
}

#[derive(Debug)]
struct Completion {
    generation: u64,
    outcome: Result<SimulationResult, ForecastError>,
}

/// Handle for driving a running coordinator
#[derive(Debug, Clone)]
pub struct ForecastHandle {
    commands_tx: mpsc::UnboundedSender<Command>,
    events_tx: broadcast::Sender<ForecastEvent>,
    snapshot_rx: watch::Receiver<ForecastSnapshot>,
}

impl ForecastHandle {
    /// Replaces the claim snapshot ("data loaded") and schedules a run
    pub fn load_claims(&self, claims: ClaimSet) -> Result<(), ForecastError> {
        self.send(Command::LoadClaims(claims))
    }

    /// Replaces the whole probability configuration
    ///
    /// A configuration equal to the current one is ignored.
    pub fn request_simulation(&self, probabilities: ProbabilityConfig) -> Result<(), ForecastError> {
        self.send(Command::Request(probabilities))
    }

    /// Replaces one status's percentage
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidArgument` for values outside `0..=100`;
    /// nothing is scheduled and the published result is untouched.
    pub fn set_probability(&self, status: PaymentStatus, percentage: i64) -> Result<(), ForecastError> {
        let percentage = Percentage::new(percentage)?;
        self.send(Command::SetProbability { status, percentage })
    }

    /// Subscribes to coordinator events from this point on
    pub fn subscribe(&self) -> broadcast::Receiver<ForecastEvent> {
        self.events_tx.subscribe()
    }

    /// Returns the latest snapshot
    pub fn snapshot(&self) -> ForecastSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Returns a receiver that observes every snapshot change
    pub fn watch(&self) -> watch::Receiver<ForecastSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.snapshot_rx.borrow().busy
    }

    fn send(&self, command: Command) -> Result<(), ForecastError> {
        self.commands_tx
            .send(command)
            .map_err(|_| ForecastError::execution_failure("forecast coordinator has stopped"))
    }
}

/// Debouncing, generation-filtering scheduler for simulation runs
pub struct ForecastCoordinator<E> {
    config: CoordinatorConfig,
    executor: Arc<E>,
    claims: Option<ClaimSet>,
    probabilities: ProbabilityConfig,
    /// Debounce deadline; `Some` while a change is pending
    deadline: Option<Instant>,
    latest_dispatched: u64,
    in_flight: BTreeSet<u64>,
    busy: bool,
    published_generation: u64,
    last_result: Option<SimulationResult>,
    last_error: Option<ForecastError>,
    commands_rx: mpsc::UnboundedReceiver<Command>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    events_tx: broadcast::Sender<ForecastEvent>,
    snapshot_tx: watch::Sender<ForecastSnapshot>,
}

impl<E: SimulationExecutor> ForecastCoordinator<E> {
    /// Creates a coordinator and its handle without starting it
    ///
    /// Await the coordinator (or spawn it) to start processing; it stops
    /// once every handle has been dropped.
    pub fn new(
        config: CoordinatorConfig,
        probabilities: ProbabilityConfig,
        executor: E,
    ) -> (Self, ForecastHandle) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (events_tx, _) = broadcast::channel(config.event_capacity.max(1));

        let initial = ForecastSnapshot {
            state: CoordinatorState::Idle,
            busy: false,
            generation: 0,
            result: None,
            last_error: None,
            probabilities: probabilities.clone(),
            claims_loaded: false,
        };
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);

        let handle = ForecastHandle {
            commands_tx,
            events_tx: events_tx.clone(),
            snapshot_rx,
        };

        let coordinator = Self {
            config,
            executor: Arc::new(executor),
            claims: None,
            probabilities,
            deadline: None,
            latest_dispatched: 0,
            in_flight: BTreeSet::new(),
            busy: false,
            published_generation: 0,
            last_result: None,
            last_error: None,
            commands_rx,
            completions_tx,
            completions_rx,
            events_tx,
            snapshot_tx,
        };

        (coordinator, handle)
    }

    /// Creates a coordinator and runs it on the current tokio runtime
    pub fn spawn(
        config: CoordinatorConfig,
        probabilities: ProbabilityConfig,
        executor: E,
    ) -> ForecastHandle {
        let (coordinator, handle) = Self::new(config, probabilities, executor);
        tokio::spawn(coordinator.into_future());
        handle
    }

    fn state(&self) -> CoordinatorState {
        if self.deadline.is_some() {
            CoordinatorState::Scheduled
        } else if self.in_flight.contains(&self.latest_dispatched) {
            CoordinatorState::Running
        } else {
            CoordinatorState::Idle
        }
    }

    fn on_command(&mut self, command: Command) {
        match command {
            Command::LoadClaims(claims) => {
                info!(claims = claims.len(), "Claim set loaded");
                self.claims = Some(claims);
                self.schedule();
            }
            Command::Request(probabilities) => {
                if probabilities == self.probabilities {
                    debug!("Probability configuration unchanged, not rescheduling");
                    return;
                }
                self.probabilities = probabilities;
                self.schedule();
            }
            Command::SetProbability { status, percentage } => {
                if !self.probabilities.insert(status, percentage) {
                    debug!(%status, %percentage, "Probability unchanged, not rescheduling");
                    return;
                }
                self.schedule();
            }
        }
    }

    /// Arms (or restarts) the debounce timer
    fn schedule(&mut self) {
        if self.claims.is_none() {
            debug!("No claims loaded yet, change recorded without scheduling");
            self.publish_snapshot();
            return;
        }

        self.deadline = Some(Instant::now() + self.config.debounce);
        self.publish_snapshot();
    }

    fn dispatch(&mut self) {
        self.deadline = None;
        let Some(claims) = self.claims.clone() else {
            return;
        };

        self.latest_dispatched += 1;
        let generation = self.latest_dispatched;
        self.in_flight.insert(generation);

        let job = SimulationJob {
            generation,
            claims,
            probabilities: self.probabilities.clone(),
            options: self.config.options,
            seed: self.config.seed,
        };

        debug!(generation, in_flight = self.in_flight.len(), "Dispatching simulation run");

        let executor = Arc::clone(&self.executor);
        let completions_tx = self.completions_tx.clone();
        tokio::spawn(async move {
            // A panicking executor must still report back, or the run would
            // stay in flight forever
            let outcome = tokio::spawn(async move { executor.execute(job).await })
                .await
                .unwrap_or_else(|err| {
                    Err(ForecastError::execution_failure(format!(
                        "simulation task failed: {err}"
                    )))
                });
            let _ = completions_tx.send(Completion { generation, outcome });
        });

        self.set_busy(true);
        self.publish_snapshot();
    }

    fn on_completion(&mut self, completion: Completion) {
        let Completion { generation, outcome } = completion;
        self.in_flight.remove(&generation);

        let is_current = generation == self.latest_dispatched && self.deadline.is_none();
        if !is_current {
            debug!(
                generation,
                latest = self.latest_dispatched,
                pending = self.deadline.is_some(),
                "Discarding superseded simulation result"
            );
            self.emit(ForecastEvent::Discarded { generation });
            if self.state() == CoordinatorState::Idle {
                self.set_busy(false);
            }
            self.publish_snapshot();
            return;
        }

        match outcome {
            Ok(result) => {
                debug_assert!(generation > self.published_generation);
                info!(
                    generation,
                    expected = result.expected_revenue,
                    lower = result.confidence_interval.lower,
                    upper = result.confidence_interval.upper,
                    "Publishing revenue forecast"
                );
                self.published_generation = generation;
                self.last_result = Some(result.clone());
                self.last_error = None;
                self.emit(ForecastEvent::Published { generation, result });
            }
            Err(error) => {
                warn!(generation, error = %error, "Simulation run failed, keeping last published result");
                self.last_error = Some(error.clone());
                self.emit(ForecastEvent::Failed { generation, error });
            }
        }

        self.set_busy(false);
        self.publish_snapshot();
    }

    fn set_busy(&mut self, busy: bool) {
        if self.busy != busy {
            self.busy = busy;
            self.emit(ForecastEvent::BusyChanged(busy));
        }
    }

    fn emit(&self, event: ForecastEvent) {
        // No subscribers is fine; the snapshot still carries the state
        let _ = self.events_tx.send(event);
    }

    fn publish_snapshot(&self) {
        self.snapshot_tx.send_replace(ForecastSnapshot {
            state: self.state(),
            busy: self.busy,
            generation: self.published_generation,
            result: self.last_result.clone(),
            last_error: self.last_error.clone(),
            probabilities: self.probabilities.clone(),
            claims_loaded: self.claims.is_some(),
        });
    }
}

impl<E: SimulationExecutor> IntoFuture for ForecastCoordinator<E> {
    type Output = ();
    type IntoFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

    fn into_future(mut self) -> Self::IntoFuture {
        Box::pin(async move {
            info!(debounce_ms = self.config.debounce.as_millis() as u64, "Forecast coordinator started");

            loop {
                let deadline = self.deadline;
                tokio::select! {
                    maybe_command = self.commands_rx.recv() => {
                        let Some(command) = maybe_command else {
                            break // all handles dropped
                        };
                        self.on_command(command);
                    }
                    Some(completion) = self.completions_rx.recv() => {
                        self.on_completion(completion);
                    }
                    _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                        self.dispatch();
                    }
                }
            }

            info!("Forecast coordinator stopped");
        })
    }
}
