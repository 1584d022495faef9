//! Persisted column schema of the sample table.

use super::ParseSampleColumnError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One column of the persisted sample table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SampleColumn {
    /// Descriptive model name.
    Model,
    /// Primary key.
    SerialNumber,
    /// Part number.
    PartNumber,
    /// Courier tracking number the sample arrived with.
    OutboundCourierId,
    /// Lifecycle status.
    Status,
    /// When the sample was last sent out.
    SentAt,
    /// Client the sample was last sent to.
    SentToClient,
    /// Attachment noted on the last send.
    SentAttachment,
    /// When the sample last came back.
    ReceivedAt,
    /// Courier tracking number of the last return.
    ReturnCourierId,
    /// Attachment noted on the last return.
    ReturnAttachment,
}

impl SampleColumn {
    /// Every column, in persisted header order.
    pub const ALL: [Self; 11] = [
        Self::Model,
        Self::SerialNumber,
        Self::PartNumber,
        Self::OutboundCourierId,
        Self::Status,
        Self::SentAt,
        Self::SentToClient,
        Self::SentAttachment,
        Self::ReceivedAt,
        Self::ReturnCourierId,
        Self::ReturnAttachment,
    ];

    /// Returns the canonical header written on save.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::SerialNumber => "SerialNumber",
            Self::PartNumber => "PartNumber",
            Self::OutboundCourierId => "OutboundCourierID",
            Self::Status => "Status",
            Self::SentAt => "SentAt",
            Self::SentToClient => "SentToClient",
            Self::SentAttachment => "SentAttachment",
            Self::ReceivedAt => "ReceivedAt",
            Self::ReturnCourierId => "ReturnCourierID",
            Self::ReturnAttachment => "ReturnAttachment",
        }
    }

    /// Returns the header used by older sheets, still accepted on load.
    #[must_use]
    pub const fn legacy_header(self) -> &'static str {
        match self {
            Self::Model => "型号",
            Self::SerialNumber => "序列号",
            Self::PartNumber => "料号",
            Self::OutboundCourierId => "样品快递号",
            Self::Status => "状态",
            Self::SentAt => "送出时间",
            Self::SentToClient => "送出客户",
            Self::SentAttachment => "送出附件",
            Self::ReceivedAt => "收货时间",
            Self::ReturnCourierId => "收货快递号",
            Self::ReturnAttachment => "归还附件",
        }
    }

    /// Resolves a header cell to a column.
    ///
    /// Canonical headers match case-insensitively; legacy headers match
    /// exactly. Returns `None` for unrecognised headers.
    #[must_use]
    pub fn from_header(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL.into_iter().find(|column| {
            column.header().eq_ignore_ascii_case(trimmed) || column.legacy_header() == trimmed
        })
    }
}

impl fmt::Display for SampleColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl TryFrom<&str> for SampleColumn {
    type Error = ParseSampleColumnError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_header(value).ok_or_else(|| ParseSampleColumnError(value.to_owned()))
    }
}

impl TryFrom<String> for SampleColumn {
    type Error = ParseSampleColumnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<SampleColumn> for String {
    fn from(value: SampleColumn) -> Self {
        value.header().to_owned()
    }
}
