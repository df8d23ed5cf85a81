//! Pre-built Test Fixtures
//!
//! Provides ready-to-use claim sets and probability configurations. These
//! fixtures are deterministic so expected revenues can be worked out by hand.

use chrono::NaiveDate;
use core_kernel::{BillingCode, Money, PatientId};
use domain_billing::{BillingRecord, ClaimSet, PaymentStatus, SampleDataGenerator};
use domain_forecast::{Percentage, ProbabilityConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for claim data
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Reference date used by every fixture record
    pub fn claim_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    /// Creates one USD claim with the given amount and status
    pub fn record(amount: Decimal, status: PaymentStatus) -> BillingRecord {
        BillingRecord::new(
            PatientId::from_number(1),
            "Jane Doe",
            BillingCode::from_number(1000),
            Money::usd(amount),
            "Aetna",
            status,
            Self::claim_date(),
        )
        .unwrap()
    }

    /// Three pending claims of $1,000, two approved of $2,500 and one denied
    /// of $4,000; $12,000 in total
    pub fn mixed_set() -> ClaimSet {
        let mut records = Vec::with_capacity(6);
        for n in 0..3 {
            records.push(Self::numbered(n, dec!(1000.00), PaymentStatus::Pending));
        }
        for n in 3..5 {
            records.push(Self::numbered(n, dec!(2500.00), PaymentStatus::Approved));
        }
        records.push(Self::numbered(5, dec!(4000.00), PaymentStatus::Denied));
        ClaimSet::new(records)
    }

    /// A single approved claim of $100
    pub fn approved_100() -> ClaimSet {
        ClaimSet::new(vec![Self::record(dec!(100.00), PaymentStatus::Approved)])
    }

    /// Seeded sample data with a fixed reference date
    pub fn sample_set(count: usize, seed: u64) -> ClaimSet {
        SampleDataGenerator::new(count)
            .with_seed(seed)
            .with_reference_date(Self::claim_date())
            .generate()
            .unwrap()
    }

    fn numbered(n: u64, amount: Decimal, status: PaymentStatus) -> BillingRecord {
        BillingRecord::new(
            PatientId::from_number(n + 1),
            format!("Patient {}", n + 1),
            BillingCode::from_number(1000 + n),
            Money::usd(amount),
            "Blue Cross",
            status,
            Self::claim_date(),
        )
        .unwrap()
    }
}

/// Fixture for probability configurations
pub struct ProbabilityFixtures;

impl ProbabilityFixtures {
    /// Pending 70%, Approved 100%, Denied 0%
    pub fn dashboard_default() -> ProbabilityConfig {
        ProbabilityConfig::default()
    }

    /// Every status certain to pay
    pub fn all_certain() -> ProbabilityConfig {
        ProbabilityConfig::uniform(Percentage::FULL)
    }

    /// No status ever pays
    pub fn all_impossible() -> ProbabilityConfig {
        ProbabilityConfig::uniform(Percentage::ZERO)
    }

    /// Coin flip for every status
    pub fn even() -> ProbabilityConfig {
        ProbabilityConfig::uniform(Percentage::new(50).unwrap())
    }
}
