//! Request handlers

pub mod claims;
pub mod forecast;
pub mod health;
