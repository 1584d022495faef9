//! In-memory sample table and its lifecycle transitions.
//!
//! A [`SampleTable`] is the whole persisted data set. Transitions mutate one
//! row in place and leave the table untouched when they are rejected, so the
//! caller can persist the table after any successful transition.

use super::{
    DispatchDetails, ResendPolicy, ReturnDetails, SampleDetails, SampleDomainError, SampleRecord,
    SerialNumber,
};
use mockable::Clock;

/// Ordered set of sample records, keyed by serial number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleTable {
    records: Vec<SampleRecord>,
}

impl SampleTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Creates a table holding `records` in the given order.
    #[must_use]
    pub const fn from_records(records: Vec<SampleRecord>) -> Self {
        Self { records }
    }

    /// Returns the records in table order.
    #[must_use]
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// Consumes the table, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<SampleRecord> {
        self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds the first record whose serial number equals the trimmed
    /// `serial_number`.
    #[must_use]
    pub fn find(&self, serial_number: &str) -> Option<&SampleRecord> {
        let key = serial_number.trim();
        self.records
            .iter()
            .find(|record| record.serial_number().matches(key))
    }

    /// Returns `true` when a record carries `serial_number`.
    #[must_use]
    pub fn contains(&self, serial_number: &str) -> bool {
        self.find(serial_number).is_some()
    }

    /// Registers a new in-stock sample at the end of the table and returns a
    /// copy of the new record.
    ///
    /// # Errors
    ///
    /// Returns [`SampleDomainError::EmptySerialNumber`] for a blank key or
    /// [`SampleDomainError::DuplicateSerialNumber`] when the key is taken.
    pub fn register(
        &mut self,
        serial_number: &str,
        details: SampleDetails,
    ) -> Result<SampleRecord, SampleDomainError> {
        let key = SerialNumber::new(serial_number)?;
        if self.contains(key.as_str()) {
            return Err(SampleDomainError::DuplicateSerialNumber(key));
        }
        let record = SampleRecord::register(key, details);
        self.records.push(record.clone());
        Ok(record)
    }

    /// Sends an in-stock sample to a client.
    ///
    /// # Errors
    ///
    /// Returns [`SampleDomainError::NotFound`] for an unknown key or
    /// [`SampleDomainError::NotInStock`] when the sample is already out.
    pub fn send(
        &mut self,
        serial_number: &str,
        dispatch: DispatchDetails,
        policy: ResendPolicy,
        clock: &impl Clock,
    ) -> Result<&SampleRecord, SampleDomainError> {
        let record = self.find_mut(serial_number)?;
        record.send(dispatch, policy, clock)?;
        Ok(record)
    }

    /// Takes a sent-out sample back into stock.
    ///
    /// # Errors
    ///
    /// Returns [`SampleDomainError::NotFound`] for an unknown key or
    /// [`SampleDomainError::NotSentOut`] when the sample is not out.
    pub fn receive_return(
        &mut self,
        serial_number: &str,
        details: ReturnDetails,
        clock: &impl Clock,
    ) -> Result<&SampleRecord, SampleDomainError> {
        let record = self.find_mut(serial_number)?;
        record.receive_return(details, clock)?;
        Ok(record)
    }

    /// Removes the sample from the table for good.
    ///
    /// Only the first row carrying the key is dropped, matching the
    /// first-match rule of every other lookup.
    ///
    /// # Errors
    ///
    /// Returns [`SampleDomainError::NotFound`] for an unknown key or
    /// [`SampleDomainError::ConfirmationRequired`] when `confirmed` is
    /// `false`.
    pub fn delete(
        &mut self,
        serial_number: &str,
        confirmed: bool,
    ) -> Result<SampleRecord, SampleDomainError> {
        let key = serial_number.trim();
        let position = self
            .records
            .iter()
            .position(|record| record.serial_number().matches(key))
            .ok_or_else(|| SampleDomainError::NotFound(key.to_owned()))?;
        if !confirmed {
            let serial = SerialNumber::new(key)?;
            return Err(SampleDomainError::ConfirmationRequired(serial));
        }
        Ok(self.records.remove(position))
    }

    fn find_mut(&mut self, serial_number: &str) -> Result<&mut SampleRecord, SampleDomainError> {
        let key = serial_number.trim();
        self.records
            .iter_mut()
            .find(|record| record.serial_number().matches(key))
            .ok_or_else(|| SampleDomainError::NotFound(key.to_owned()))
    }
}

impl FromIterator<SampleRecord> for SampleTable {
    fn from_iter<I: IntoIterator<Item = SampleRecord>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}
