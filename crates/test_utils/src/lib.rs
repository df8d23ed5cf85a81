//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! revenue forecasting test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built claim sets and probability configurations
//! - `builders`: Builder patterns for test data construction
//! - `doubles`: Scripted random sources and controllable executors
//! - `assertions`: Custom assertion helpers for simulation results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod doubles;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use doubles::*;
pub use assertions::*;
pub use generators::*;
