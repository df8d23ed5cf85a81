//! Billing summaries for the dashboard overview

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::{Currency, Money};

use crate::error::BillingError;
use crate::record::{BillingRecord, PaymentStatus};

/// Claim count and billed amount for one slice of the claim set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTotals {
    pub claims: usize,
    pub amount: Money,
}

impl StatusTotals {
    fn zero(currency: Currency) -> Self {
        Self {
            claims: 0,
            amount: Money::zero(currency),
        }
    }

    fn record(&mut self, amount: &Money) -> Result<(), BillingError> {
        self.claims += 1;
        self.amount = self.amount.checked_add(amount)?;
        Ok(())
    }
}

/// Aggregate billing statistics
///
/// Per-status totals always sum to the overall totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingStats {
    pub total: StatusTotals,
    pub pending: StatusTotals,
    pub approved: StatusTotals,
    pub denied: StatusTotals,
}

impl BillingStats {
    /// Summarises a set of records in USD
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Calculation` if a record is billed in another currency
    pub fn from_records(records: &[BillingRecord]) -> Result<Self, BillingError> {
        Self::from_records_in(records, Currency::USD)
    }

    /// Summarises a set of records billed in `currency`
    pub fn from_records_in(records: &[BillingRecord], currency: Currency) -> Result<Self, BillingError> {
        let mut stats = Self {
            total: StatusTotals::zero(currency),
            pending: StatusTotals::zero(currency),
            approved: StatusTotals::zero(currency),
            denied: StatusTotals::zero(currency),
        };

        for record in records {
            let amount = record.amount();
            stats.total.record(&amount)?;
            stats.for_status_mut(record.payment_status()).record(&amount)?;
        }

        Ok(stats)
    }

    /// Returns the totals for one status
    pub fn for_status(&self, status: PaymentStatus) -> &StatusTotals {
        match status {
            PaymentStatus::Pending => &self.pending,
            PaymentStatus::Approved => &self.approved,
            PaymentStatus::Denied => &self.denied,
        }
    }

    fn for_status_mut(&mut self, status: PaymentStatus) -> &mut StatusTotals {
        match status {
            PaymentStatus::Pending => &mut self.pending,
            PaymentStatus::Approved => &mut self.approved,
            PaymentStatus::Denied => &mut self.denied,
        }
    }
}

/// Number of claims per payment status
///
/// Statuses with no claims are omitted, matching what the distribution
/// chart plots.
pub fn status_distribution(records: &[BillingRecord]) -> BTreeMap<PaymentStatus, usize> {
    records.iter().fold(BTreeMap::new(), |mut acc, record| {
        *acc.entry(record.payment_status()).or_insert(0) += 1;
        acc
    })
}
