//! Sample record and the free-text details stamped by each transition.

use super::{RecordedAt, SampleColumn, SampleDomainError, SampleStatus, SerialNumber};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Descriptive fields captured at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleDetails {
    model: String,
    part_number: String,
    outbound_courier_id: String,
}

impl SampleDetails {
    /// Creates empty registration details.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = normalize(model);
        self
    }

    /// Sets the part number.
    #[must_use]
    pub fn with_part_number(mut self, part_number: impl Into<String>) -> Self {
        self.part_number = normalize(part_number);
        self
    }

    /// Sets the courier tracking number the sample arrived with.
    #[must_use]
    pub fn with_outbound_courier_id(mut self, courier_id: impl Into<String>) -> Self {
        self.outbound_courier_id = normalize(courier_id);
        self
    }
}

/// Fields recorded when a sample is sent to a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchDetails {
    client: String,
    attachment: String,
}

impl DispatchDetails {
    /// Creates dispatch details for `client`.
    #[must_use]
    pub fn new(client: impl Into<String>, attachment: impl Into<String>) -> Self {
        Self {
            client: normalize(client),
            attachment: normalize(attachment),
        }
    }
}

/// Fields recorded when a sample comes back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnDetails {
    courier_id: String,
    attachment: String,
}

impl ReturnDetails {
    /// Creates return details.
    #[must_use]
    pub fn new(courier_id: impl Into<String>, attachment: impl Into<String>) -> Self {
        Self {
            courier_id: normalize(courier_id),
            attachment: normalize(attachment),
        }
    }
}

/// What a new send does with the previous return's courier and attachment.
///
/// `ReceivedAt` is blanked on every send regardless of policy, since a
/// sent-out record never carries a receipt time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResendPolicy {
    /// Blank `ReturnCourierID` and `ReturnAttachment` on send.
    #[default]
    ClearReturnHistory,
    /// Keep the previous return's fields until the next return overwrites
    /// them.
    PreserveReturnHistory,
}

/// One tracked sample item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord {
    serial_number: SerialNumber,
    model: String,
    part_number: String,
    outbound_courier_id: String,
    status: SampleStatus,
    sent_at: Option<RecordedAt>,
    sent_to_client: String,
    sent_attachment: String,
    received_at: Option<RecordedAt>,
    return_courier_id: String,
    return_attachment: String,
}

/// Parameter object for reconstructing a persisted sample record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSampleData {
    /// Persisted primary key.
    pub serial_number: SerialNumber,
    /// Persisted model name.
    pub model: String,
    /// Persisted part number.
    pub part_number: String,
    /// Persisted inbound courier tracking number.
    pub outbound_courier_id: String,
    /// Persisted lifecycle status.
    pub status: SampleStatus,
    /// Persisted send timestamp, if any.
    pub sent_at: Option<RecordedAt>,
    /// Persisted client of the last send.
    pub sent_to_client: String,
    /// Persisted attachment of the last send.
    pub sent_attachment: String,
    /// Persisted return timestamp, if any.
    pub received_at: Option<RecordedAt>,
    /// Persisted courier tracking number of the last return.
    pub return_courier_id: String,
    /// Persisted attachment of the last return.
    pub return_attachment: String,
}

impl SampleRecord {
    /// Creates a freshly registered, in-stock record with blank history.
    #[must_use]
    pub fn register(serial_number: SerialNumber, details: SampleDetails) -> Self {
        Self {
            serial_number,
            model: details.model,
            part_number: details.part_number,
            outbound_courier_id: details.outbound_courier_id,
            status: SampleStatus::InStock,
            sent_at: None,
            sent_to_client: String::new(),
            sent_attachment: String::new(),
            received_at: None,
            return_courier_id: String::new(),
            return_attachment: String::new(),
        }
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSampleData) -> Self {
        Self {
            serial_number: data.serial_number,
            model: data.model,
            part_number: data.part_number,
            outbound_courier_id: data.outbound_courier_id,
            status: data.status,
            sent_at: data.sent_at,
            sent_to_client: data.sent_to_client,
            sent_attachment: data.sent_attachment,
            received_at: data.received_at,
            return_courier_id: data.return_courier_id,
            return_attachment: data.return_attachment,
        }
    }

    /// Returns the serial number.
    #[must_use]
    pub const fn serial_number(&self) -> &SerialNumber {
        &self.serial_number
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the part number.
    #[must_use]
    pub fn part_number(&self) -> &str {
        &self.part_number
    }

    /// Returns the courier tracking number the sample arrived with.
    #[must_use]
    pub fn outbound_courier_id(&self) -> &str {
        &self.outbound_courier_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> SampleStatus {
        self.status
    }

    /// Returns when the sample was last sent out.
    #[must_use]
    pub const fn sent_at(&self) -> Option<RecordedAt> {
        self.sent_at
    }

    /// Returns the client of the last send.
    #[must_use]
    pub fn sent_to_client(&self) -> &str {
        &self.sent_to_client
    }

    /// Returns the attachment of the last send.
    #[must_use]
    pub fn sent_attachment(&self) -> &str {
        &self.sent_attachment
    }

    /// Returns when the sample last came back.
    #[must_use]
    pub const fn received_at(&self) -> Option<RecordedAt> {
        self.received_at
    }

    /// Returns the courier tracking number of the last return.
    #[must_use]
    pub fn return_courier_id(&self) -> &str {
        &self.return_courier_id
    }

    /// Returns the attachment of the last return.
    #[must_use]
    pub fn return_attachment(&self) -> &str {
        &self.return_attachment
    }

    /// Renders one cell as persisted text.
    #[must_use]
    pub fn cell(&self, column: SampleColumn) -> String {
        match column {
            SampleColumn::Model => self.model.clone(),
            SampleColumn::SerialNumber => self.serial_number.to_string(),
            SampleColumn::PartNumber => self.part_number.clone(),
            SampleColumn::OutboundCourierId => self.outbound_courier_id.clone(),
            SampleColumn::Status => self.status.as_str().to_owned(),
            SampleColumn::SentAt => render_timestamp(self.sent_at),
            SampleColumn::SentToClient => self.sent_to_client.clone(),
            SampleColumn::SentAttachment => self.sent_attachment.clone(),
            SampleColumn::ReceivedAt => render_timestamp(self.received_at),
            SampleColumn::ReturnCourierId => self.return_courier_id.clone(),
            SampleColumn::ReturnAttachment => self.return_attachment.clone(),
        }
    }

    /// Renders the record as a row in persisted header order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        SampleColumn::ALL
            .into_iter()
            .map(|column| self.cell(column))
            .collect()
    }

    /// Marks the sample as sent to a client.
    ///
    /// # Errors
    ///
    /// Returns [`SampleDomainError::NotInStock`] when the sample is already
    /// out. The record is left unchanged.
    pub fn send(
        &mut self,
        dispatch: DispatchDetails,
        policy: ResendPolicy,
        clock: &impl Clock,
    ) -> Result<(), SampleDomainError> {
        if self.status != SampleStatus::InStock {
            return Err(SampleDomainError::NotInStock {
                serial_number: self.serial_number.clone(),
                status: self.status,
            });
        }
        self.status = SampleStatus::SentOut;
        self.sent_at = Some(RecordedAt::now(clock));
        self.sent_to_client = dispatch.client;
        self.sent_attachment = dispatch.attachment;
        match policy {
            ResendPolicy::ClearReturnHistory => {
                self.return_courier_id.clear();
                self.return_attachment.clear();
            }
            ResendPolicy::PreserveReturnHistory => {}
        }
        self.received_at = None;
        Ok(())
    }

    /// Marks the sample as back in stock.
    ///
    /// # Errors
    ///
    /// Returns [`SampleDomainError::NotSentOut`] when the sample is not out.
    /// The record is left unchanged.
    pub fn receive_return(
        &mut self,
        details: ReturnDetails,
        clock: &impl Clock,
    ) -> Result<(), SampleDomainError> {
        if self.status != SampleStatus::SentOut {
            return Err(SampleDomainError::NotSentOut {
                serial_number: self.serial_number.clone(),
                status: self.status,
            });
        }
        self.status = SampleStatus::InStock;
        self.received_at = Some(RecordedAt::now(clock));
        self.return_courier_id = details.courier_id;
        self.return_attachment = details.attachment;
        Ok(())
    }
}

fn normalize(value: impl Into<String>) -> String {
    let raw = value.into();
    let trimmed = raw.trim();
    if trimmed.len() == raw.len() {
        raw
    } else {
        trimmed.to_owned()
    }
}

fn render_timestamp(value: Option<RecordedAt>) -> String {
    value.map(|stamp| stamp.to_string()).unwrap_or_default()
}
