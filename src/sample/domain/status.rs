//! Sample lifecycle status.

use super::ParseSampleStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a registered sample currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleStatus {
    /// The sample is on the shelf and may be sent out.
    InStock,
    /// The sample is with a client and may be returned.
    SentOut,
}

impl SampleStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "InStock",
            Self::SentOut => "SentOut",
        }
    }

    /// Returns the label written by older sheets of the tracker.
    #[must_use]
    pub const fn legacy_label(self) -> &'static str {
        match self {
            Self::InStock => "在库",
            Self::SentOut => "送出",
        }
    }
}

impl fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SampleStatus {
    type Error = ParseSampleStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed == Self::InStock.legacy_label() {
            return Ok(Self::InStock);
        }
        if trimmed == Self::SentOut.legacy_label() {
            return Ok(Self::SentOut);
        }
        let normalized = trimmed.to_ascii_lowercase().replace('_', "");
        match normalized.as_str() {
            "instock" => Ok(Self::InStock),
            "sentout" => Ok(Self::SentOut),
            _ => Err(ParseSampleStatusError(value.to_owned())),
        }
    }
}
