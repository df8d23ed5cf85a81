//! Forecasting domain errors

use domain_billing::PaymentStatus;
use thiserror::Error;

/// Errors that can occur while configuring or running a forecast
///
/// `Clone` so failures can be broadcast to every subscriber.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForecastError {
    /// Out-of-range percentage, zero iterations or zero buckets
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A claim's status has no configured probability
    #[error("Configuration error: no payment probability configured for {status} claims")]
    Configuration { status: PaymentStatus },

    /// The worker crashed or its channel closed before replying
    #[error("Execution failure: {0}")]
    ExecutionFailure(String),
}

impl ForecastError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ForecastError::InvalidArgument(message.into())
    }

    pub fn execution_failure(message: impl Into<String>) -> Self {
        ForecastError::ExecutionFailure(message.into())
    }

    /// Returns true for configuration errors
    pub fn is_configuration(&self) -> bool {
        matches!(self, ForecastError::Configuration { .. })
    }
}
