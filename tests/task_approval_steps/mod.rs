//! Step definitions for task approval scenarios.

mod given;
mod then;
mod when;
pub mod world;
