//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{BillingCode, Money, PatientId};
use domain_billing::{BillingRecord, ClaimSet, PaymentStatus};
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::ClaimFixtures;

/// Builder for constructing billing records
///
/// Patient and provider names are random; everything the simulation reads
/// (amount and status) has a fixed default.
pub struct BillingRecordBuilder {
    patient_id: PatientId,
    patient_name: String,
    billing_code: BillingCode,
    amount: Money,
    insurance_provider: String,
    payment_status: PaymentStatus,
    claim_date: NaiveDate,
}

impl Default for BillingRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BillingRecordBuilder {
    /// Creates a new builder with a pending $1,000 claim
    pub fn new() -> Self {
        Self {
            patient_id: PatientId::from_number(1),
            patient_name: Name().fake(),
            billing_code: BillingCode::from_number(1000),
            amount: Money::usd(dec!(1000.00)),
            insurance_provider: CompanyName().fake(),
            payment_status: PaymentStatus::Pending,
            claim_date: ClaimFixtures::claim_date(),
        }
    }

    /// Sets the patient number
    pub fn patient(mut self, number: u64) -> Self {
        self.patient_id = PatientId::from_number(number);
        self
    }

    /// Sets the billing code number
    pub fn code(mut self, number: u64) -> Self {
        self.billing_code = BillingCode::from_number(number);
        self
    }

    /// Sets a USD amount
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Money::usd(amount);
        self
    }

    /// Sets an amount in any currency
    pub fn money(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn status(mut self, status: PaymentStatus) -> Self {
        self.payment_status = status;
        self
    }

    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.insurance_provider = provider.into();
        self
    }

    pub fn claim_date(mut self, date: NaiveDate) -> Self {
        self.claim_date = date;
        self
    }

    /// Builds the record, panicking on invalid input
    pub fn build(self) -> BillingRecord {
        self.try_build().unwrap()
    }

    /// Builds the record, returning validation errors
    pub fn try_build(self) -> Result<BillingRecord, domain_billing::BillingError> {
        BillingRecord::new(
            self.patient_id,
            self.patient_name,
            self.billing_code,
            self.amount,
            self.insurance_provider,
            self.payment_status,
            self.claim_date,
        )
    }
}

/// Builder for claim sets from `(amount, status)` pairs
#[derive(Default)]
pub struct ClaimSetBuilder {
    records: Vec<BillingRecord>,
}

impl ClaimSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `count` identical claims
    pub fn claims(mut self, count: usize, amount: Decimal, status: PaymentStatus) -> Self {
        for _ in 0..count {
            let n = self.records.len() as u64;
            let record = BillingRecordBuilder::new()
                .patient(n + 1)
                .code(1000 + n)
                .amount(amount)
                .status(status)
                .build();
            self.records.push(record);
        }
        self
    }

    pub fn build(self) -> ClaimSet {
        ClaimSet::new(self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let record = BillingRecordBuilder::new().build();
        assert_eq!(record.payment_status(), PaymentStatus::Pending);
        assert_eq!(record.amount().amount(), dec!(1000.00));
        assert!(!record.patient_name().is_empty());
    }

    #[test]
    fn test_negative_amount_fails() {
        let result = BillingRecordBuilder::new().amount(dec!(-1)).try_build();
        assert!(result.is_err());
    }

    #[test]
    fn test_claim_set_builder_numbers_records() {
        let claims = ClaimSetBuilder::new()
            .claims(2, dec!(10), PaymentStatus::Approved)
            .claims(1, dec!(20), PaymentStatus::Denied)
            .build();

        assert_eq!(claims.len(), 3);
        assert_eq!(claims[2].billing_code().as_str(), "B1002");
    }
}
