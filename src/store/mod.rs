//! Entity store for the portal.
//!
//! All collections live in one snapshot that is persisted as a whole after
//! every successful mutation:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The [`services::EntityStore`] service object

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
