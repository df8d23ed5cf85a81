//! Billing Domain - Claim Records and Summaries
//!
//! This crate owns the claim data consumed by the revenue forecast:
//!
//! - **Records**: one [`BillingRecord`] per submitted claim, carrying its
//!   amount and [`PaymentStatus`] plus descriptive fields the forecast passes
//!   through untouched
//! - **Claim sets**: an immutable [`ClaimSet`] snapshot, cheap to clone and
//!   safe to hand to a worker thread
//! - **Sources**: the [`ClaimSource`] port through which the dashboard loads
//!   its data, with an in-memory adapter
//! - **Summaries**: totals and per-status counts for the dashboard overview
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{InMemoryClaimSource, ClaimSource, BillingStats};
//!
//! let source = InMemoryClaimSource::sample(50, Some(7));
//! let claims = source.fetch_claims().await?;
//! let stats = BillingStats::from_records(&claims)?;
//! ```

pub mod record;
pub mod claim_set;
pub mod stats;
pub mod source;
pub mod sample;
pub mod error;

pub use record::{BillingRecord, PaymentStatus};
pub use claim_set::ClaimSet;
pub use stats::{BillingStats, StatusTotals, status_distribution};
pub use source::{ClaimSource, InMemoryClaimSource};
pub use sample::SampleDataGenerator;
pub use error::BillingError;
