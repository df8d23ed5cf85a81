//! Tests for domain_billing

use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};
use domain_billing::{
    status_distribution, BillingError, BillingStats, ClaimSet, ClaimSource,
    InMemoryClaimSource, PaymentStatus,
};
use test_utils::{BillingRecordBuilder, ClaimFixtures};

// ============================================================================
// Billing Stats Tests
// ============================================================================

mod stats_tests {
    use super::*;

    #[test]
    fn test_stats_for_mixed_set() {
        let stats = BillingStats::from_records(&ClaimFixtures::mixed_set()).unwrap();

        assert_eq!(stats.total.claims, 6);
        assert_eq!(stats.total.amount.amount(), dec!(12000.00));
        assert_eq!(stats.pending.claims, 3);
        assert_eq!(stats.pending.amount.amount(), dec!(3000.00));
        assert_eq!(stats.approved.claims, 2);
        assert_eq!(stats.approved.amount.amount(), dec!(5000.00));
        assert_eq!(stats.denied.claims, 1);
        assert_eq!(stats.denied.amount.amount(), dec!(4000.00));
    }

    #[test]
    fn test_status_totals_sum_to_overall() {
        let claims = ClaimFixtures::sample_set(50, 11);
        let stats = BillingStats::from_records(&claims).unwrap();

        let claim_sum: usize = PaymentStatus::ALL
            .iter()
            .map(|s| stats.for_status(*s).claims)
            .sum();
        let amounts: Vec<Money> = PaymentStatus::ALL
            .iter()
            .map(|s| stats.for_status(*s).amount)
            .collect();
        let amount_sum = Money::try_sum(&amounts, Currency::USD).unwrap();

        assert_eq!(claim_sum, stats.total.claims);
        assert_eq!(amount_sum, stats.total.amount);
    }

    #[test]
    fn test_stats_for_empty_set() {
        let stats = BillingStats::from_records(&ClaimSet::empty()).unwrap();
        assert_eq!(stats.total.claims, 0);
        assert!(stats.total.amount.is_zero());
    }

    #[test]
    fn test_stats_reject_foreign_currency() {
        let claims: ClaimSet = vec![
            BillingRecordBuilder::new().amount(dec!(100)).build(),
            BillingRecordBuilder::new()
                .money(Money::new(dec!(100), Currency::EUR))
                .build(),
        ]
        .into();

        let result = BillingStats::from_records(&claims);
        assert!(matches!(result, Err(BillingError::Calculation(_))));
    }
}

// ============================================================================
// Distribution Tests
// ============================================================================

mod distribution_tests {
    use super::*;

    #[test]
    fn test_distribution_counts() {
        let distribution = status_distribution(&ClaimFixtures::mixed_set());

        assert_eq!(distribution.get(&PaymentStatus::Pending), Some(&3));
        assert_eq!(distribution.get(&PaymentStatus::Approved), Some(&2));
        assert_eq!(distribution.get(&PaymentStatus::Denied), Some(&1));
    }

    #[test]
    fn test_distribution_omits_absent_statuses() {
        let claims: ClaimSet = vec![BillingRecordBuilder::new()
            .status(PaymentStatus::Approved)
            .build()]
        .into();

        let distribution = status_distribution(&claims);
        assert_eq!(distribution.len(), 1);
        assert!(!distribution.contains_key(&PaymentStatus::Denied));
    }

    #[test]
    fn test_distribution_serializes_with_status_keys() {
        let json = serde_json::to_value(status_distribution(&ClaimFixtures::mixed_set())).unwrap();
        assert_eq!(json["Pending"], 3);
    }
}

// ============================================================================
// Claim Set Tests
// ============================================================================

mod claim_set_tests {
    use super::*;

    #[test]
    fn test_statuses_lists_distinct_values() {
        let statuses = ClaimFixtures::mixed_set().statuses();
        assert_eq!(statuses.len(), 3);
    }

    #[test]
    fn test_clone_shares_records() {
        let claims = ClaimFixtures::mixed_set();
        let copy = claims.clone();
        assert!(claims.ptr_eq(&copy));
    }

    #[test]
    fn test_serializes_as_array() {
        let json = serde_json::to_value(ClaimFixtures::mixed_set()).unwrap();
        assert_eq!(json.as_array().map(|a| a.len()), Some(6));

        let back: ClaimSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, ClaimFixtures::mixed_set());
    }

    #[test]
    fn test_deserializing_negative_amount_is_rejected() {
        let mut json = serde_json::to_value(ClaimFixtures::approved_100()).unwrap();
        json[0]["amount"]["amount"] = serde_json::json!("-500.00");

        let err = serde_json::from_value::<ClaimSet>(json).unwrap_err();
        assert!(err.to_string().contains("must be non-negative"));
    }

    #[test]
    fn test_deserializing_rounds_amounts() {
        let mut json = serde_json::to_value(ClaimFixtures::approved_100()).unwrap();
        json[0]["amount"]["amount"] = serde_json::json!("100.004");

        let claims: ClaimSet = serde_json::from_value(json).unwrap();
        assert_eq!(claims[0].amount(), Money::usd(dec!(100.00)));
    }
}

// ============================================================================
// Claim Source Tests
// ============================================================================

mod source_tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_source_serves_given_claims() {
        let source = InMemoryClaimSource::new(ClaimFixtures::mixed_set());
        let claims = source.fetch_claims().await.unwrap();
        assert_eq!(claims, ClaimFixtures::mixed_set());
    }

    #[tokio::test]
    async fn test_sample_source_is_reproducible() {
        let a = InMemoryClaimSource::sample(25, Some(42)).unwrap();
        let b = InMemoryClaimSource::sample(25, Some(42)).unwrap();

        let claims_a = a.fetch_claims().await.unwrap();
        let claims_b = b.fetch_claims().await.unwrap();
        // Dates are relative to today, so compare the seeded fields
        let amounts_a: Vec<_> = claims_a.iter().map(|c| (c.amount(), c.payment_status())).collect();
        let amounts_b: Vec<_> = claims_b.iter().map(|c| (c.amount(), c.payment_status())).collect();
        assert_eq!(amounts_a, amounts_b);
    }
}
