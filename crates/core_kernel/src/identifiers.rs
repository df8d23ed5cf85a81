//! Strongly-typed identifiers for billing records
//!
//! Billing records arrive from the data layer with short string codes
//! (`P12`, `B1011`). Newtype wrappers keep a patient id from being passed
//! where a billing code is expected, and validate the code's prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error raised when a code does not match its identifier's format
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid {kind} '{value}': expected '{prefix}' followed by digits")]
pub struct IdentifierError {
    pub kind: &'static str,
    pub prefix: &'static str,
    pub value: String,
}

macro_rules! define_code {
    ($name:ident, $prefix:literal, $kind:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Builds the code for a sequence number
            pub fn from_number(number: u64) -> Self {
                Self(format!(concat!($prefix, "{}"), number))
            }

            /// Returns the numeric part of the code
            pub fn number(&self) -> u64 {
                // Validated on construction, so the suffix is always digits
                self.0[$prefix.len()..].parse().unwrap_or_default()
            }

            /// Returns the code as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the identifier prefix
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let valid = s
                    .strip_prefix($prefix)
                    .map(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
                    .unwrap_or(false);

                if valid {
                    Ok(Self(s.to_string()))
                } else {
                    Err(IdentifierError {
                        kind: $kind,
                        prefix: $prefix,
                        value: s.to_string(),
                    })
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }
    };
}

define_code!(PatientId, "P", "patient id");
define_code!(BillingCode, "B", "billing code");
