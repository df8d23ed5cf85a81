//! Monte Carlo revenue simulation
//!
//! Each trial walks every claim once and counts it as collected when a
//! uniform draw falls below its status probability. The sorted trial totals
//! give the mean, extremes, 95% interval and histogram of the result.
//!
//! [`simulate`] holds no state between calls; the only side effect is
//! consuming samples from the supplied [`UniformSource`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use domain_billing::BillingRecord;

use crate::error::ForecastError;
use crate::probability::ProbabilityConfig;
use crate::random::UniformSource;
use crate::result::SimulationResult;
use crate::statistics;

/// Default number of trials per run
pub const DEFAULT_ITERATIONS: u32 = 2000;
/// Default number of histogram buckets
pub const DISTRIBUTION_POINTS: u32 = 20;

/// Size parameters for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOptions {
    pub iterations: u32,
    pub bucket_count: u32,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            bucket_count: DISTRIBUTION_POINTS,
        }
    }
}

impl SimulationOptions {
    pub fn new(iterations: u32, bucket_count: u32) -> Self {
        Self {
            iterations,
            bucket_count,
        }
    }

    /// Returns a copy with a different trial count
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Rejects zero trials or zero buckets
    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.iterations < 1 {
            return Err(ForecastError::invalid_argument(
                "iterations must be at least 1",
            ));
        }
        if self.bucket_count < 1 {
            return Err(ForecastError::invalid_argument(
                "bucket count must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Runs the revenue simulation
///
/// # Arguments
///
/// * `claims` - Claim snapshot; only amount and status are read
/// * `probabilities` - Percentage per status, divided by 100 per trial
/// * `options` - Trial and bucket counts
/// * `source` - Uniform samples, one per claim per trial
///
/// # Errors
///
/// * `ForecastError::InvalidArgument` if `options` has a zero count
/// * `ForecastError::Configuration` if a claim's status has no entry
pub fn simulate<U>(
    claims: &[BillingRecord],
    probabilities: &ProbabilityConfig,
    options: SimulationOptions,
    source: &mut U,
) -> Result<SimulationResult, ForecastError>
where
    U: UniformSource + ?Sized,
{
    options.validate()?;

    let weighted = claims
        .iter()
        .map(|claim| {
            let amount = claim.amount().to_f64().map_err(|e| {
                ForecastError::invalid_argument(format!("claim {}: {e}", claim.billing_code()))
            })?;
            let probability = probabilities.probability(claim.payment_status())?;
            Ok((amount, probability))
        })
        .collect::<Result<Vec<(f64, f64)>, ForecastError>>()?;

    let iterations = options.iterations as usize;
    let mut totals = Vec::with_capacity(iterations);

    for _ in 0..iterations {
        let mut total = 0.0;
        for (amount, probability) in &weighted {
            if source.next_uniform() < *probability {
                total += amount;
            }
        }
        totals.push(total);
    }

    totals.sort_by(f64::total_cmp);

    let result = summarize(&totals, options);
    debug!(
        claims = claims.len(),
        iterations = options.iterations,
        expected = result.expected_revenue,
        "Revenue simulation complete"
    );

    Ok(result)
}

fn summarize(sorted: &[f64], options: SimulationOptions) -> SimulationResult {
    let min_revenue = sorted.first().copied().unwrap_or(0.0);
    let max_revenue = sorted.last().copied().unwrap_or(0.0);

    SimulationResult {
        expected_revenue: statistics::mean(sorted),
        min_revenue,
        max_revenue,
        confidence_interval: statistics::confidence_interval(sorted),
        distribution: statistics::histogram(sorted, options.bucket_count as usize),
        iterations: options.iterations,
    }
}
