//! Sample tracker: lifecycle tracking for physical sample items.
//!
//! This crate records sample items as they are registered, sent out to
//! clients, returned, and deleted, keeping the whole record set in a single
//! table that is rewritten on every change.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure lifecycle rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for table persistence
//! - **Adapters**: Concrete stores (in-memory, CSV file)
//!
//! # Modules
//!
//! - [`sample`]: Sample records, transitions, persistence, and export
//! - [`config`]: Tracker configuration loading

pub mod config;
pub mod sample;
