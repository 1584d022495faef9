//! Sample lifecycle tracking.
//!
//! Samples are registered, sent out to clients, returned, and deleted. The
//! whole record set lives in one table that is read in full before each
//! action and written back in full after it. The module follows hexagonal
//! architecture:
//!
//! - Domain types and transitions in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Spreadsheet export in [`export`]

pub mod adapters;
pub mod domain;
pub mod export;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
