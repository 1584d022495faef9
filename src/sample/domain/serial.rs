//! Natural key for sample records.

use super::SampleDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed serial number identifying one sample.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerialNumber(String);

impl SerialNumber {
    /// Creates a validated serial number.
    ///
    /// # Errors
    ///
    /// Returns [`SampleDomainError::EmptySerialNumber`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, SampleDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SampleDomainError::EmptySerialNumber);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the serial number as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when `key` names this serial number exactly.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.0 == key
    }
}

impl AsRef<str> for SerialNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
