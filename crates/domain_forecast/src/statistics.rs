//! Summary statistics over sorted trial totals
//!
//! All helpers expect their input sorted ascending.

use crate::result::{ConfidenceInterval, DistributionHistogram, HistogramBucket};

/// Lower quantile of the 95% confidence interval
pub const LOWER_QUANTILE: f64 = 0.025;
/// Upper quantile of the 95% confidence interval
pub const UPPER_QUANTILE: f64 = 0.975;

/// Index of `quantile` in a sorted sample of `len` values
///
/// `floor(len * quantile)`, clamped to `[0, len - 1]`.
pub fn percentile_index(len: usize, quantile: f64) -> usize {
    let raw = (len as f64 * quantile).floor();
    let last = len.saturating_sub(1);
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(last)
    }
}

/// Arithmetic mean; zero for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 2.5th to 97.5th percentile of `sorted`
pub fn confidence_interval(sorted: &[f64]) -> ConfidenceInterval {
    let at = |quantile| {
        sorted
            .get(percentile_index(sorted.len(), quantile))
            .copied()
            .unwrap_or(0.0)
    };

    ConfidenceInterval {
        lower: at(LOWER_QUANTILE),
        upper: at(UPPER_QUANTILE),
    }
}

/// Buckets `sorted` into `bucket_count` equal-width bins between its extremes
///
/// When every value is identical the range is zero, the bucket size is zero
/// and all values land in the first bucket. Values at the maximum are clamped
/// into the last bucket.
pub fn histogram(sorted: &[f64], bucket_count: usize) -> DistributionHistogram {
    let (min, max) = match (sorted.first(), sorted.last()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => (0.0, 0.0),
    };

    let range = max - min;
    let bucket_size = if range > 0.0 {
        range / bucket_count as f64
    } else {
        0.0
    };

    let mut counts = vec![0u32; bucket_count];
    let last = bucket_count.saturating_sub(1);

    for value in sorted {
        let index = if bucket_size > 0.0 {
            let raw = ((value - min) / bucket_size).floor();
            if raw.is_finite() && raw > 0.0 {
                (raw as usize).min(last)
            } else {
                0
            }
        } else {
            0
        };

        if let Some(count) = counts.get_mut(index) {
            *count += 1;
        }
    }

    let buckets = counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| HistogramBucket {
            bucket_start: min + index as f64 * bucket_size,
            count,
        })
        .collect();

    DistributionHistogram::new(bucket_size, buckets)
}
