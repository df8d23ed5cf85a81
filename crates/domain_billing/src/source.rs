//! Claim Source Port
//!
//! The forecast never fetches claims itself; a [`ClaimSource`] delivers an
//! immutable [`ClaimSet`] once per "data loaded" event. Adapters decide where
//! the records come from.

use async_trait::async_trait;
use std::time::Duration;

use crate::claim_set::ClaimSet;
use crate::error::BillingError;
use crate::sample::SampleDataGenerator;

/// Port for loading the current claim set
#[async_trait]
pub trait ClaimSource: Send + Sync {
    /// Fetches a snapshot of all claims
    async fn fetch_claims(&self) -> Result<ClaimSet, BillingError>;
}

/// In-memory adapter serving a fixed snapshot
///
/// An optional latency emulates a remote data layer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClaimSource {
    claims: ClaimSet,
    latency: Option<Duration>,
}

impl InMemoryClaimSource {
    /// Creates a source serving `claims`
    pub fn new(claims: ClaimSet) -> Self {
        Self {
            claims,
            latency: None,
        }
    }

    /// Creates a source serving generated sample data
    pub fn sample(count: usize, seed: Option<u64>) -> Result<Self, BillingError> {
        let generator = SampleDataGenerator::new(count);
        let generator = match seed {
            Some(seed) => generator.with_seed(seed),
            None => generator,
        };
        Ok(Self::new(generator.generate()?))
    }

    /// Delays every fetch by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

#[async_trait]
impl ClaimSource for InMemoryClaimSource {
    async fn fetch_claims(&self) -> Result<ClaimSet, BillingError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        tracing::debug!(count = self.claims.len(), "Serving in-memory claim set");
        Ok(self.claims.clone())
    }
}
