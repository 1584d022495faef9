//! Error types for sample lifecycle rules and stored-value parsing.

use super::{SampleStatus, SerialNumber};
use thiserror::Error;

/// Broad category of a rejected lifecycle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    /// The requested serial number is not in the table.
    NotFound,
    /// The request collides with the record's key or current status.
    Conflict,
    /// A destructive request was made without explicit confirmation.
    ConfirmationRequired,
}

/// Errors returned when a lifecycle transition is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SampleDomainError {
    /// The serial number is empty after trimming.
    #[error("serial number must not be empty")]
    EmptySerialNumber,

    /// A record with the serial number is already registered.
    #[error("sample {0} is already registered")]
    DuplicateSerialNumber(SerialNumber),

    /// No record carries the requested serial number.
    #[error("sample {0} does not exist")]
    NotFound(String),

    /// The sample cannot be sent because it is not in stock.
    #[error("sample {serial_number} is not in stock (status: {status})")]
    NotInStock {
        /// Serial number of the record.
        serial_number: SerialNumber,
        /// Status found on the record.
        status: SampleStatus,
    },

    /// The sample cannot be returned because it was never sent out.
    #[error("sample {serial_number} is not sent out (status: {status})")]
    NotSentOut {
        /// Serial number of the record.
        serial_number: SerialNumber,
        /// Status found on the record.
        status: SampleStatus,
    },

    /// Deletion was requested without the confirmation flag.
    #[error("deleting sample {0} requires confirmation")]
    ConfirmationRequired(SerialNumber),
}

impl SampleDomainError {
    /// Classifies the rejection.
    #[must_use]
    pub const fn kind(&self) -> RejectionKind {
        match self {
            Self::NotFound(_) => RejectionKind::NotFound,
            Self::ConfirmationRequired(_) => RejectionKind::ConfirmationRequired,
            Self::EmptySerialNumber
            | Self::DuplicateSerialNumber(_)
            | Self::NotInStock { .. }
            | Self::NotSentOut { .. } => RejectionKind::Conflict,
        }
    }
}

/// Error returned while parsing a sample status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sample status: {0}")]
pub struct ParseSampleStatusError(pub String);

/// Error returned while parsing a column header name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sample column: {0}")]
pub struct ParseSampleColumnError(pub String);

/// Error returned while parsing a stored transition timestamp.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid timestamp '{0}', expected YYYY-MM-DD HH:MM:SS")]
pub struct ParseRecordedAtError(pub String);
