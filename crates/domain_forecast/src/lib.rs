//! Revenue Forecasting Domain
//!
//! Estimates the distribution of collectible revenue for a claim set by
//! Monte Carlo simulation, and keeps that estimate current while the caller
//! adjusts per-status payment probabilities.
//!
//! # Components
//!
//! - **Probability configuration**: validated percentage per [`PaymentStatus`]
//! - **Engine**: [`simulate`], a pure function from claims and probabilities
//!   to a [`SimulationResult`] with summary statistics and a histogram
//! - **Worker**: [`SimulationJob`] messages executed off the control task by a
//!   [`SimulationExecutor`]
//! - **Coordinator**: debounces probability changes, tags each run with a
//!   generation number and publishes only the freshest result
//!
//! # Coordinator states
//!
//! ```text
//! Idle --change--> Scheduled --debounce elapsed--> Running --current result--> Idle
//!                     ^  |                            |
//!                     +--+ change restarts timer      +--change--> Scheduled
//! ```
//!
//! [`PaymentStatus`]: domain_billing::PaymentStatus

pub mod probability;
pub mod random;
pub mod result;
pub mod statistics;
pub mod engine;
pub mod worker;
pub mod coordinator;
pub mod error;

pub use probability::{Percentage, ProbabilityConfig};
pub use random::{RngSource, UniformSource};
pub use result::{ConfidenceInterval, DistributionHistogram, HistogramBucket, SimulationResult};
pub use engine::{simulate, SimulationOptions, DEFAULT_ITERATIONS, DISTRIBUTION_POINTS};
pub use worker::{BlockingExecutor, InlineExecutor, SimulationExecutor, SimulationJob};
pub use coordinator::{
    CoordinatorConfig, CoordinatorState, ForecastCoordinator, ForecastEvent, ForecastHandle,
    ForecastSnapshot, DEFAULT_DEBOUNCE,
};
pub use error::ForecastError;
