//! Store port for whole-table sample persistence.

use crate::sample::domain::SampleTable;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for sample store operations.
pub type SampleStoreResult<T> = Result<T, SampleStoreError>;

/// Whole-table persistence contract.
///
/// The table is the only unit of persistence: there are no row-level reads
/// or writes, and no conflict detection between writers.
#[async_trait]
pub trait SampleStore: Send + Sync {
    /// Reads every record from the backing medium.
    ///
    /// A medium that has never been written reads as an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`SampleStoreError::Unavailable`] when the medium cannot be
    /// read or [`SampleStoreError::Decode`] when its content is malformed.
    async fn load(&self) -> SampleStoreResult<SampleTable>;

    /// Replaces the backing medium's content with `table`.
    ///
    /// # Errors
    ///
    /// Returns [`SampleStoreError::Unavailable`] when the medium cannot be
    /// written.
    async fn save(&self, table: &SampleTable) -> SampleStoreResult<()>;

    /// Replaces the primary content with a table rebuilt after a failed load.
    ///
    /// Stores that keep a redundant copy must leave it untouched, so it still
    /// holds the last table that was read successfully. The default simply
    /// saves.
    ///
    /// # Errors
    ///
    /// Returns [`SampleStoreError::Unavailable`] when the medium cannot be
    /// written.
    async fn save_recovered(&self, table: &SampleTable) -> SampleStoreResult<()> {
        self.save(table).await
    }
}

/// Errors returned by sample store implementations.
#[derive(Debug, Clone, Error)]
pub enum SampleStoreError {
    /// The backing medium could not be reached, read, or written.
    #[error("backend unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// The stored table could not be decoded.
    #[error("malformed sample table at row {row}: {message}")]
    Decode {
        /// One-based row number in the stored table, counting the header;
        /// `0` when the text could not be split into rows at all.
        row: usize,
        /// Description of the problem.
        message: String,
    },
}

impl SampleStoreError {
    /// Wraps a backend failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Returns `true` when the medium itself could not be reached.
    ///
    /// A decode failure means stored data exists, so only these failures may
    /// be replaced by an empty table on load.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// Creates a decode error for the given one-based row.
    pub fn decode(row: usize, message: impl Into<String>) -> Self {
        Self::Decode {
            row,
            message: message.into(),
        }
    }
}
