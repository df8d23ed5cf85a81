//! Billing domain errors

use core_kernel::{IdentifierError, MoneyError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// Claim amount below zero
    #[error("Invalid claim amount {amount} for {billing_code}: amounts must be non-negative")]
    InvalidAmount {
        billing_code: String,
        amount: Decimal,
    },

    /// Money arithmetic failed while summarising
    #[error("Calculation error: {0}")]
    Calculation(#[from] MoneyError),

    /// Malformed identifier in an incoming record
    #[error("Invalid identifier: {0}")]
    Identifier(#[from] IdentifierError),

    /// Unknown payment status label
    #[error("Unknown payment status: {0}")]
    UnknownStatus(String),

    /// The data source could not supply claims
    #[error("Claim source unavailable: {0}")]
    SourceUnavailable(String),
}
