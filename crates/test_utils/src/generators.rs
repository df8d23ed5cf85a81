//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating claim sets and probability
//! configurations that satisfy domain invariants.

use chrono::{Days, NaiveDate};
use core_kernel::{BillingCode, Money, PatientId};
use domain_billing::{BillingRecord, ClaimSet, PaymentStatus};
use domain_forecast::{Percentage, ProbabilityConfig};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating payment statuses
pub fn status_strategy() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![
        Just(PaymentStatus::Pending),
        Just(PaymentStatus::Approved),
        Just(PaymentStatus::Denied),
    ]
}

/// Strategy for generating claim amounts in cents, $0.00 to $50,000.00
pub fn amount_cents_strategy() -> impl Strategy<Value = i64> {
    0i64..5_000_000i64
}

/// Strategy for amounts in the sample data range, $1,000.00 to $11,000.00
pub fn sample_amount_cents_strategy() -> impl Strategy<Value = i64> {
    100_000i64..1_100_000i64
}

fn record_from(index: usize, cents: i64, status: PaymentStatus, days: u64) -> BillingRecord {
    let n = index as u64;
    let claim_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(days);
    BillingRecord::new(
        PatientId::from_number(n + 1),
        format!("Patient {}", n + 1),
        BillingCode::from_number(1000 + n),
        Money::usd(Decimal::new(cents, 2)),
        "Cigna",
        status,
        claim_date,
    )
    .expect("Generated invalid record")
}

/// Strategy for generating one billing record
pub fn billing_record_strategy() -> impl Strategy<Value = BillingRecord> {
    (amount_cents_strategy(), status_strategy(), 0u64..90u64)
        .prop_map(|(cents, status, days)| record_from(0, cents, status, days))
}

/// Strategy for claim sets of up to `max_len` records with arbitrary amounts
pub fn claim_set_strategy(max_len: usize) -> impl Strategy<Value = ClaimSet> {
    proptest::collection::vec(
        (amount_cents_strategy(), status_strategy(), 0u64..90u64),
        0..=max_len,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (cents, status, days))| record_from(i, cents, status, days))
            .collect::<ClaimSet>()
    })
}

/// Strategy for claim sets shaped like the sample data
///
/// Sizes fall in `min_len..=max_len` and amounts in the sample range.
pub fn sample_like_claim_set_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = ClaimSet> {
    proptest::collection::vec(
        (sample_amount_cents_strategy(), status_strategy(), 0u64..90u64),
        min_len..=max_len,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (cents, status, days))| record_from(i, cents, status, days))
            .collect::<ClaimSet>()
    })
}

/// Strategy for valid percentages, 0 to 100
pub fn percentage_strategy() -> impl Strategy<Value = Percentage> {
    (0i64..=100i64).prop_map(|n| Percentage::new(n).expect("Generated invalid percentage"))
}

/// Strategy for percentages outside the valid range
pub fn invalid_percentage_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![i64::MIN..0i64, 101i64..i64::MAX]
}

/// Strategy for configurations covering every status
pub fn probability_config_strategy() -> impl Strategy<Value = ProbabilityConfig> {
    (percentage_strategy(), percentage_strategy(), percentage_strategy()).prop_map(
        |(pending, approved, denied)| {
            ProbabilityConfig::empty()
                .with(PaymentStatus::Pending, pending)
                .with(PaymentStatus::Approved, approved)
                .with(PaymentStatus::Denied, denied)
        },
    )
}

/// Strategy for configurations with every percentage in `low..=high`
pub fn bounded_probability_config_strategy(low: i64, high: i64) -> impl Strategy<Value = ProbabilityConfig> {
    proptest::collection::vec(low..=high, 3).prop_map(|values| {
        ProbabilityConfig::from_percentages(PaymentStatus::ALL.iter().copied().zip(values))
            .expect("Generated invalid configuration")
    })
}
