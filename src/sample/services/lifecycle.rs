//! Service layer running each sample action as one load-mutate-save cycle.

use crate::sample::{
    domain::{
        DispatchDetails, RejectionKind, ResendPolicy, ReturnDetails, SampleDetails,
        SampleDomainError, SampleRecord, SampleTable,
    },
    ports::{SampleStore, SampleStoreError},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for registering a new sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterSampleRequest {
    serial_number: String,
    details: SampleDetails,
}

impl RegisterSampleRequest {
    /// Creates a request for `serial_number` with blank descriptive fields.
    #[must_use]
    pub fn new(serial_number: impl Into<String>) -> Self {
        Self {
            serial_number: serial_number.into(),
            details: SampleDetails::new(),
        }
    }

    /// Sets the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.details = self.details.with_model(model);
        self
    }

    /// Sets the part number.
    #[must_use]
    pub fn with_part_number(mut self, part_number: impl Into<String>) -> Self {
        self.details = self.details.with_part_number(part_number);
        self
    }

    /// Sets the courier tracking number the sample arrived with.
    #[must_use]
    pub fn with_outbound_courier_id(mut self, courier_id: impl Into<String>) -> Self {
        self.details = self.details.with_outbound_courier_id(courier_id);
        self
    }
}

/// Request payload for sending a sample to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSampleRequest {
    serial_number: String,
    client: String,
    attachment: String,
}

impl SendSampleRequest {
    /// Creates a request sending `serial_number` to `client`.
    #[must_use]
    pub fn new(serial_number: impl Into<String>, client: impl Into<String>) -> Self {
        Self {
            serial_number: serial_number.into(),
            client: client.into(),
            attachment: String::new(),
        }
    }

    /// Notes what was shipped along with the sample.
    #[must_use]
    pub fn with_attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachment = attachment.into();
        self
    }
}

/// Request payload for taking a sample back into stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnSampleRequest {
    serial_number: String,
    courier_id: String,
    attachment: String,
}

impl ReturnSampleRequest {
    /// Creates a request returning `serial_number`.
    #[must_use]
    pub fn new(serial_number: impl Into<String>) -> Self {
        Self {
            serial_number: serial_number.into(),
            courier_id: String::new(),
            attachment: String::new(),
        }
    }

    /// Sets the courier tracking number of the return shipment.
    #[must_use]
    pub fn with_courier_id(mut self, courier_id: impl Into<String>) -> Self {
        self.courier_id = courier_id.into();
        self
    }

    /// Notes what came back with the sample.
    #[must_use]
    pub fn with_attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachment = attachment.into();
        self
    }
}

/// Request payload for deleting a sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSampleRequest {
    serial_number: String,
    confirmed: bool,
}

impl DeleteSampleRequest {
    /// Creates an unconfirmed deletion request.
    #[must_use]
    pub fn new(serial_number: impl Into<String>) -> Self {
        Self {
            serial_number: serial_number.into(),
            confirmed: false,
        }
    }

    /// Sets the explicit confirmation flag.
    #[must_use]
    pub const fn confirmed(mut self, confirmed: bool) -> Self {
        self.confirmed = confirmed;
        self
    }
}

/// How a failing load is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// When the store is unavailable, log it and carry on with an empty
    /// table.
    ///
    /// A transition that then succeeds saves the near-empty table over the
    /// primary medium but leaves the backup alone. Malformed stored content
    /// always surfaces.
    #[default]
    FailOpen,
    /// Surface the failure to the caller.
    Strict,
}

/// Tunable behaviour of [`SampleLifecycleService`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleSettings {
    /// Treatment of return history on a new send.
    pub resend_policy: ResendPolicy,
    /// Treatment of load failures.
    pub load_policy: LoadPolicy,
}

/// Service-level errors for sample lifecycle operations.
#[derive(Debug, Error)]
pub enum SampleLifecycleError {
    /// The transition was rejected by the domain rules.
    #[error(transparent)]
    Domain(#[from] SampleDomainError),
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] SampleStoreError),
}

impl SampleLifecycleError {
    /// Returns the rejection category, or `None` for store failures.
    #[must_use]
    pub const fn rejection_kind(&self) -> Option<RejectionKind> {
        match self {
            Self::Domain(err) => Some(err.kind()),
            Self::Store(_) => None,
        }
    }

    /// Returns `true` when the backing store could not be used.
    #[must_use]
    pub const fn is_backend_unavailable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// Result type for sample lifecycle service operations.
pub type SampleLifecycleResult<T> = Result<T, SampleLifecycleError>;

/// Sample lifecycle orchestration service.
///
/// The service keeps no table between calls: each operation loads the whole
/// table, applies one transition, and saves the whole table back. Rejected
/// transitions do not save.
#[derive(Clone)]
pub struct SampleLifecycleService<S, C>
where
    S: SampleStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    settings: LifecycleSettings,
}

impl<S, C> SampleLifecycleService<S, C>
where
    S: SampleStore,
    C: Clock + Send + Sync,
{
    /// Creates a service with default settings.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            settings: LifecycleSettings::default(),
        }
    }

    /// Replaces the service settings.
    #[must_use]
    pub const fn with_settings(mut self, settings: LifecycleSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the active settings.
    #[must_use]
    pub const fn settings(&self) -> LifecycleSettings {
        self.settings
    }

    /// Registers a new in-stock sample.
    ///
    /// # Errors
    ///
    /// Returns [`SampleLifecycleError::Domain`] when the serial number is
    /// blank or taken, or [`SampleLifecycleError::Store`] when persistence
    /// fails.
    pub async fn register(
        &self,
        request: RegisterSampleRequest,
    ) -> SampleLifecycleResult<SampleRecord> {
        let (mut table, origin) = self.load_table().await?;
        let record = table.register(&request.serial_number, request.details)?;
        self.persist(&table, origin).await?;
        info!(serial = %record.serial_number(), "sample registered");
        Ok(record)
    }

    /// Sends an in-stock sample to a client.
    ///
    /// # Errors
    ///
    /// Returns [`SampleLifecycleError::Domain`] when the sample is unknown or
    /// not in stock, or [`SampleLifecycleError::Store`] when persistence
    /// fails.
    pub async fn send(&self, request: SendSampleRequest) -> SampleLifecycleResult<SampleRecord> {
        let (mut table, origin) = self.load_table().await?;
        let dispatch = DispatchDetails::new(request.client, request.attachment);
        let record = table
            .send(
                &request.serial_number,
                dispatch,
                self.settings.resend_policy,
                &*self.clock,
            )?
            .clone();
        self.persist(&table, origin).await?;
        info!(
            serial = %record.serial_number(),
            client = record.sent_to_client(),
            "sample sent out"
        );
        Ok(record)
    }

    /// Takes a sent-out sample back into stock.
    ///
    /// # Errors
    ///
    /// Returns [`SampleLifecycleError::Domain`] when the sample is unknown or
    /// not sent out, or [`SampleLifecycleError::Store`] when persistence
    /// fails.
    pub async fn return_sample(
        &self,
        request: ReturnSampleRequest,
    ) -> SampleLifecycleResult<SampleRecord> {
        let (mut table, origin) = self.load_table().await?;
        let details = ReturnDetails::new(request.courier_id, request.attachment);
        let record = table
            .receive_return(&request.serial_number, details, &*self.clock)?
            .clone();
        self.persist(&table, origin).await?;
        info!(serial = %record.serial_number(), "sample returned");
        Ok(record)
    }

    /// Deletes a sample for good, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`SampleLifecycleError::Domain`] when the sample is unknown or
    /// the request is unconfirmed, or [`SampleLifecycleError::Store`] when
    /// persistence fails.
    pub async fn delete(
        &self,
        request: DeleteSampleRequest,
    ) -> SampleLifecycleResult<SampleRecord> {
        let (mut table, origin) = self.load_table().await?;
        let removed = table.delete(&request.serial_number, request.confirmed)?;
        self.persist(&table, origin).await?;
        info!(serial = %removed.serial_number(), "sample deleted");
        Ok(removed)
    }

    /// Returns the whole current table.
    ///
    /// # Errors
    ///
    /// Returns [`SampleLifecycleError::Store`] when the stored table is
    /// malformed, or when the store is unavailable under
    /// [`LoadPolicy::Strict`].
    pub async fn list(&self) -> SampleLifecycleResult<SampleTable> {
        let (table, _) = self.load_table().await?;
        Ok(table)
    }

    /// Looks up one sample by serial number.
    ///
    /// Returns `Ok(None)` when no sample carries the serial number.
    ///
    /// # Errors
    ///
    /// Returns [`SampleLifecycleError::Store`] when the stored table is
    /// malformed, or when the store is unavailable under
    /// [`LoadPolicy::Strict`].
    pub async fn find(&self, serial_number: &str) -> SampleLifecycleResult<Option<SampleRecord>> {
        let (table, _) = self.load_table().await?;
        Ok(table.find(serial_number).cloned())
    }

    async fn load_table(&self) -> SampleLifecycleResult<(SampleTable, TableOrigin)> {
        match self.store.load().await {
            Ok(table) => Ok((table, TableOrigin::Stored)),
            Err(err) if err.is_unavailable() && self.fails_open() => {
                warn!(
                    error = %err,
                    "sample table unavailable; continuing with an empty table"
                );
                Ok((SampleTable::new(), TableOrigin::Recovered))
            }
            Err(err) => Err(err.into()),
        }
    }

    const fn fails_open(&self) -> bool {
        matches!(self.settings.load_policy, LoadPolicy::FailOpen)
    }

    async fn persist(
        &self,
        table: &SampleTable,
        origin: TableOrigin,
    ) -> SampleLifecycleResult<()> {
        match origin {
            TableOrigin::Stored => self.store.save(table).await?,
            TableOrigin::Recovered => self.store.save_recovered(table).await?,
        }
        Ok(())
    }
}

/// Where the table an action works on came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableOrigin {
    /// Read from the store.
    Stored,
    /// Substituted for an unavailable store under [`LoadPolicy::FailOpen`].
    Recovered,
}
