//! Port contracts for sample lifecycle tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by sample services.

pub mod store;

pub use store::{SampleStore, SampleStoreError, SampleStoreResult};
