//! Domain model of the entity store.
//!
//! The store keeps every collection in one [`PortalSnapshot`]; each
//! collection is an insertion-ordered [`Collection`] keyed by entity id.

mod collection;
mod missing;
mod seed;
mod snapshot;

pub use collection::{Collection, DuplicateEntityId, Entity};
pub use missing::MissingEntity;
pub use seed::SeedError;
pub use snapshot::PortalSnapshot;
