//! Sample claim data
//!
//! Generates the demonstration data set the dashboard ships with: a fixed
//! number of claims with amounts between $1,000 and $11,000, random payers
//! and statuses, dated within the last 90 days.

use chrono::{Days, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

use core_kernel::{BillingCode, Money, PatientId};

use crate::claim_set::ClaimSet;
use crate::error::BillingError;
use crate::record::{BillingRecord, PaymentStatus};

const INSURANCE_PROVIDERS: &[&str] = &[
    "Blue Shield",
    "Medicare",
    "Aetna",
    "UnitedHealth",
    "Cigna",
    "Humana",
    "Blue Cross",
    "Kaiser Permanente",
    "Anthem",
    "Molina Healthcare",
];

const PATIENT_NAMES: &[&str] = &[
    "John Smith", "Sarah Johnson", "Robert Chen", "Lisa Williams", "Michael Garcia",
    "Emily Rodriguez", "David Kim", "Jennifer Taylor", "Thomas Anderson", "Maria Martinez",
    "James Wilson", "Patricia Brown", "Joseph Lee", "Margaret White", "Charles Davis",
    "Linda Miller", "Daniel Martin", "Elizabeth Clark", "Paul Wright", "Barbara Jones",
    "Mark Thompson", "Susan Anderson", "Kevin Lewis", "Dorothy Young", "George Hall",
];

/// Default number of generated claims
pub const DEFAULT_SAMPLE_SIZE: usize = 50;

const FIRST_BILLING_CODE: u64 = 1000;
const MIN_AMOUNT_CENTS: i64 = 100_000;
const AMOUNT_SPAN_CENTS: i64 = 1_000_000;
const CLAIM_WINDOW_DAYS: u64 = 90;

/// Generator for the sample claim set
#[derive(Debug, Clone)]
pub struct SampleDataGenerator {
    count: usize,
    seed: Option<u64>,
    today: NaiveDate,
}

impl Default for SampleDataGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_SIZE)
    }
}

impl SampleDataGenerator {
    /// Creates a generator for `count` claims dated relative to today
    pub fn new(count: usize) -> Self {
        Self {
            count,
            seed: None,
            today: Utc::now().date_naive(),
        }
    }

    /// Makes the output reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fixes the reference date claim dates count back from
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Generates the claim set
    pub fn generate(&self) -> Result<ClaimSet, BillingError> {
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let records = (0..self.count)
            .map(|index| self.generate_record(index as u64, &mut rng))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = records.len(), seeded = self.seed.is_some(), "Generated sample claims");
        Ok(ClaimSet::new(records))
    }

    fn generate_record(&self, index: u64, rng: &mut ChaCha8Rng) -> Result<BillingRecord, BillingError> {
        let days_ago = rng.gen_range(0..CLAIM_WINDOW_DAYS);
        let claim_date = self
            .today
            .checked_sub_days(Days::new(days_ago))
            .unwrap_or(self.today);

        let cents = MIN_AMOUNT_CENTS + rng.gen_range(0..AMOUNT_SPAN_CENTS);
        let amount = Money::usd(Decimal::new(cents, 2));

        // Slices are non-empty constants
        let patient_name = PATIENT_NAMES.choose(rng).copied().unwrap_or_default();
        let provider = INSURANCE_PROVIDERS.choose(rng).copied().unwrap_or_default();
        let status = PaymentStatus::ALL
            .choose(rng)
            .copied()
            .unwrap_or(PaymentStatus::Pending);

        BillingRecord::new(
            PatientId::from_number(index + 1),
            patient_name,
            BillingCode::from_number(FIRST_BILLING_CODE + index),
            amount,
            provider,
            status,
            claim_date,
        )
    }
}
