//! Adapter implementations for sample lifecycle ports.

pub mod csv;
pub mod memory;
