//! Simulation result types
//!
//! A result is built once at the end of a run and never mutated; a newer run
//! produces a new value rather than updating an old one.

use serde::{Deserialize, Serialize};

/// Central 95% range of trial totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// One histogram bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    /// Revenue at the bucket's lower edge
    pub bucket_start: f64,
    /// Number of trials whose total fell in the bucket
    pub count: u32,
}

/// Distribution of trial totals over equal-width buckets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionHistogram {
    bucket_size: f64,
    buckets: Vec<HistogramBucket>,
}

impl DistributionHistogram {
    pub(crate) fn new(bucket_size: f64, buckets: Vec<HistogramBucket>) -> Self {
        Self {
            bucket_size,
            buckets,
        }
    }

    /// Width of every bucket; zero when all trials produced the same total
    pub fn bucket_size(&self) -> f64 {
        self.bucket_size
    }

    pub fn buckets(&self) -> &[HistogramBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sum of all bucket counts, equal to the number of trials
    pub fn total_count(&self) -> u64 {
        self.buckets.iter().map(|b| u64::from(b.count)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistogramBucket> {
        self.buckets.iter()
    }
}

/// Outcome of one forecast run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Mean of all trial totals
    pub expected_revenue: f64,
    pub min_revenue: f64,
    pub max_revenue: f64,
    pub confidence_interval: ConfidenceInterval,
    pub distribution: DistributionHistogram,
    /// Number of trials the statistics were computed from
    pub iterations: u32,
}
