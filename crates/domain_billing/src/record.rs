//! Billing records
//!
//! A record is one submitted claim as the dashboard sees it. Only `amount`
//! and `payment_status` matter to the revenue forecast; the remaining fields
//! are descriptive and pass through untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{BillingCode, Money, PatientId};

use crate::error::BillingError;

/// Payment status of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Submitted, awaiting a decision from the payer
    Pending,
    /// Accepted by the payer
    Approved,
    /// Rejected by the payer
    Denied,
}

impl PaymentStatus {
    /// Every status, in display order
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Pending,
        PaymentStatus::Approved,
        PaymentStatus::Denied,
    ];

    /// Returns the status label
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Approved => "Approved",
            PaymentStatus::Denied => "Denied",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| BillingError::UnknownStatus(s.to_string()))
    }
}

/// A billing record for one claim
///
/// Fields are read-only once built; construct through [`BillingRecord::new`]
/// so the non-negative amount invariant holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BillingRecordRepr")]
pub struct BillingRecord {
    patient_id: PatientId,
    patient_name: String,
    billing_code: BillingCode,
    amount: Money,
    insurance_provider: String,
    payment_status: PaymentStatus,
    claim_date: NaiveDate,
}

impl BillingRecord {
    /// Creates a new billing record
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidAmount` if `amount` is negative
    pub fn new(
        patient_id: PatientId,
        patient_name: impl Into<String>,
        billing_code: BillingCode,
        amount: Money,
        insurance_provider: impl Into<String>,
        payment_status: PaymentStatus,
        claim_date: NaiveDate,
    ) -> Result<Self, BillingError> {
        if amount.is_negative() {
            return Err(BillingError::InvalidAmount {
                billing_code: billing_code.to_string(),
                amount: amount.amount(),
            });
        }

        Ok(Self {
            patient_id,
            patient_name: patient_name.into(),
            billing_code,
            amount,
            insurance_provider: insurance_provider.into(),
            payment_status,
            claim_date,
        })
    }

    pub fn patient_id(&self) -> &PatientId {
        &self.patient_id
    }

    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    pub fn billing_code(&self) -> &BillingCode {
        &self.billing_code
    }

    /// Billed amount
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn insurance_provider(&self) -> &str {
        &self.insurance_provider
    }

    /// Current payment status
    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn claim_date(&self) -> NaiveDate {
        self.claim_date
    }
}

#[derive(Deserialize)]
struct BillingRecordRepr {
    patient_id: PatientId,
    patient_name: String,
    billing_code: BillingCode,
    amount: Money,
    insurance_provider: String,
    payment_status: PaymentStatus,
    claim_date: NaiveDate,
}

impl TryFrom<BillingRecordRepr> for BillingRecord {
    type Error = BillingError;

    fn try_from(repr: BillingRecordRepr) -> Result<Self, Self::Error> {
        BillingRecord::new(
            repr.patient_id,
            repr.patient_name,
            repr.billing_code,
            repr.amount,
            repr.insurance_provider,
            repr.payment_status,
            repr.claim_date,
        )
    }
}
