//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for simulation results that give
//! more meaningful error messages than standard assertions.

use domain_forecast::SimulationResult;

/// Asserts that two floats are within `tolerance` of each other
pub fn assert_approx_eq(actual: f64, expected: f64, tolerance: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Values differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts the orderings every result satisfies
///
/// `min <= lower <= upper <= max` and `min <= expected <= max`.
pub fn assert_result_bounds(result: &SimulationResult) {
    let ci = result.confidence_interval;
    assert!(
        result.min_revenue <= ci.lower && ci.lower <= ci.upper && ci.upper <= result.max_revenue,
        "Interval out of order: min={}, lower={}, upper={}, max={}",
        result.min_revenue,
        ci.lower,
        ci.upper,
        result.max_revenue
    );
    assert!(
        result.min_revenue <= result.expected_revenue && result.expected_revenue <= result.max_revenue,
        "Expected revenue outside extremes: min={}, expected={}, max={}",
        result.min_revenue,
        result.expected_revenue,
        result.max_revenue
    );
}

/// Asserts `min <= lower <= expected <= upper <= max`
pub fn assert_result_ordering(result: &SimulationResult) {
    assert_result_bounds(result);
    let ci = result.confidence_interval;
    assert!(
        ci.lower <= result.expected_revenue && result.expected_revenue <= ci.upper,
        "Expected revenue outside interval: lower={}, expected={}, upper={}",
        ci.lower,
        result.expected_revenue,
        ci.upper
    );
}

/// Asserts the histogram accounts for every trial
pub fn assert_histogram_complete(result: &SimulationResult) {
    assert_eq!(
        result.distribution.total_count(),
        u64::from(result.iterations),
        "Histogram counts {} trials, run had {}",
        result.distribution.total_count(),
        result.iterations
    );
}

/// Asserts every statistic equals `value` and all trials share one bucket
pub fn assert_degenerate(result: &SimulationResult, value: f64) {
    assert_approx_eq(result.expected_revenue, value, 1e-6);
    assert_approx_eq(result.min_revenue, value, 1e-6);
    assert_approx_eq(result.max_revenue, value, 1e-6);
    assert_approx_eq(result.confidence_interval.lower, value, 1e-6);
    assert_approx_eq(result.confidence_interval.upper, value, 1e-6);
    assert_eq!(result.distribution.bucket_size(), 0.0, "Degenerate run has non-zero bucket size");

    let first = result.distribution.buckets().first().map(|b| b.count);
    assert_eq!(
        first,
        Some(result.iterations),
        "Degenerate run should put every trial in the first bucket"
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq(100.001, 100.002, 0.01);
    }

    #[test]
    #[should_panic(expected = "differ by more than tolerance")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(100.0, 101.0, 0.01);
    }
}
