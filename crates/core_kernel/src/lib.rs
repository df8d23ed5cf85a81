//! Core Kernel - Foundational types for the billing forecast system
//!
//! This crate provides the value types shared by the billing and forecasting domains:
//! - Money with precise decimal arithmetic
//! - String-coded record identifiers (patients, billing codes)

pub mod money;
pub mod identifiers;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{PatientId, BillingCode, IdentifierError};
