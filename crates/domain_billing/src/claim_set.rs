//! Immutable claim snapshots

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Deref;
use std::sync::Arc;

use crate::record::{BillingRecord, PaymentStatus};

/// An immutable snapshot of the claims supplied by one data load
///
/// Clones share the same allocation, so a snapshot can be handed to a
/// simulation worker without copying and without any shared mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<BillingRecord>", into = "Vec<BillingRecord>")]
pub struct ClaimSet {
    records: Arc<[BillingRecord]>,
}

impl ClaimSet {
    /// Creates a snapshot from owned records
    pub fn new(records: Vec<BillingRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Returns an empty snapshot
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the records as a slice
    pub fn records(&self) -> &[BillingRecord] {
        &self.records
    }

    /// Distinct payment statuses present in the snapshot
    pub fn statuses(&self) -> BTreeSet<PaymentStatus> {
        self.records.iter().map(|r| r.payment_status()).collect()
    }

    /// Returns true if both handles point at the same snapshot
    pub fn ptr_eq(&self, other: &ClaimSet) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

impl Default for ClaimSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for ClaimSet {
    type Target = [BillingRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<BillingRecord>> for ClaimSet {
    fn from(records: Vec<BillingRecord>) -> Self {
        Self::new(records)
    }
}

impl From<ClaimSet> for Vec<BillingRecord> {
    fn from(set: ClaimSet) -> Self {
        set.records.to_vec()
    }
}

impl FromIterator<BillingRecord> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = BillingRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
