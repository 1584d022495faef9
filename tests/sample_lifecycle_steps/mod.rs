//! Step definitions for sample lifecycle BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;
