//! Payment probability configuration
//!
//! The caller owns one [`ProbabilityConfig`] and replaces individual status
//! values as the user moves a control. Values are whole percentages; anything
//! outside `0..=100` is rejected rather than clamped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use domain_billing::PaymentStatus;

use crate::error::ForecastError;

/// A whole percentage in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0);
    pub const FULL: Percentage = Percentage(100);

    /// Validates a percentage
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidArgument` for values outside `0..=100`
    pub fn new(value: i64) -> Result<Self, ForecastError> {
        match u8::try_from(value) {
            Ok(v) if v <= 100 => Ok(Self(v)),
            _ => Err(ForecastError::invalid_argument(format!(
                "percentage must be an integer between 0 and 100, got {value}"
            ))),
        }
    }

    /// Returns the percentage value
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns the trial-acceptance probability in `[0, 1]`
    pub fn as_probability(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl TryFrom<i64> for Percentage {
    type Error = ForecastError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Percentage::new(value)
    }
}

impl From<Percentage> for u8 {
    fn from(p: Percentage) -> u8 {
        p.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Payment probability per claim status
///
/// Compared by value, so an update that leaves every entry unchanged can be
/// detected by the coordinator and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityConfig {
    entries: BTreeMap<PaymentStatus, Percentage>,
}

impl Default for ProbabilityConfig {
    /// Pending 70%, Approved 100%, Denied 0%
    fn default() -> Self {
        Self::empty()
            .with(PaymentStatus::Pending, Percentage(70))
            .with(PaymentStatus::Approved, Percentage::FULL)
            .with(PaymentStatus::Denied, Percentage::ZERO)
    }
}

impl ProbabilityConfig {
    /// Creates a configuration with no entries
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Creates a configuration assigning `percentage` to every status
    pub fn uniform(percentage: Percentage) -> Self {
        PaymentStatus::ALL
            .into_iter()
            .fold(Self::empty(), |config, status| config.with(status, percentage))
    }

    /// Builds a configuration from raw `(status, percentage)` pairs
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidArgument` on the first out-of-range value
    pub fn from_percentages<I>(pairs: I) -> Result<Self, ForecastError>
    where
        I: IntoIterator<Item = (PaymentStatus, i64)>,
    {
        let mut config = Self::empty();
        for (status, value) in pairs {
            config.set(status, value)?;
        }
        Ok(config)
    }

    /// Returns a copy with `status` set to `percentage`
    pub fn with(mut self, status: PaymentStatus, percentage: Percentage) -> Self {
        self.entries.insert(status, percentage);
        self
    }

    /// Replaces one status's value, leaving the others untouched
    ///
    /// On error the configuration is unchanged.
    pub fn set(&mut self, status: PaymentStatus, value: i64) -> Result<(), ForecastError> {
        let percentage = Percentage::new(value)?;
        self.insert(status, percentage);
        Ok(())
    }

    /// Replaces one status's value with an already validated percentage
    ///
    /// Returns true if the stored value changed.
    pub fn insert(&mut self, status: PaymentStatus, percentage: Percentage) -> bool {
        self.entries.insert(status, percentage) != Some(percentage)
    }

    /// Returns the configured percentage for `status`
    pub fn get(&self, status: PaymentStatus) -> Option<Percentage> {
        self.entries.get(&status).copied()
    }

    /// Returns the trial-acceptance probability for `status`
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::Configuration` if `status` has no entry
    pub fn probability(&self, status: PaymentStatus) -> Result<f64, ForecastError> {
        self.get(status)
            .map(Percentage::as_probability)
            .ok_or(ForecastError::Configuration { status })
    }

    /// Iterates entries in status order
    pub fn iter(&self) -> impl Iterator<Item = (PaymentStatus, Percentage)> + '_ {
        self.entries.iter().map(|(s, p)| (*s, *p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_bounds() {
        assert!(Percentage::new(0).is_ok());
        assert!(Percentage::new(100).is_ok());
        assert!(Percentage::new(101).is_err());
        assert!(Percentage::new(-1).is_err());
    }

    #[test]
    fn test_set_replaces_single_status() {
        let mut config = ProbabilityConfig::default();
        config.set(PaymentStatus::Pending, 35).unwrap();

        assert_eq!(config.get(PaymentStatus::Pending), Some(Percentage(35)));
        assert_eq!(config.get(PaymentStatus::Approved), Some(Percentage::FULL));
        assert_eq!(config.get(PaymentStatus::Denied), Some(Percentage::ZERO));
    }

    #[test]
    fn test_rejected_update_leaves_config_untouched() {
        let mut config = ProbabilityConfig::default();
        let before = config.clone();

        let err = config.set(PaymentStatus::Denied, 150).unwrap_err();

        assert!(matches!(err, ForecastError::InvalidArgument(_)));
        assert_eq!(config, before);
    }

    #[test]
    fn test_missing_status_is_configuration_error() {
        let config = ProbabilityConfig::empty().with(PaymentStatus::Approved, Percentage::FULL);
        let err = config.probability(PaymentStatus::Denied).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_insert_reports_change() {
        let mut config = ProbabilityConfig::default();
        assert!(!config.insert(PaymentStatus::Approved, Percentage::FULL));
        assert!(config.insert(PaymentStatus::Approved, Percentage(90)));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(ProbabilityConfig::default()).unwrap();
        assert_eq!(json["Pending"], 70);

        let bad = serde_json::from_str::<ProbabilityConfig>(r#"{"Pending": 120}"#);
        assert!(bad.is_err());
    }
}
