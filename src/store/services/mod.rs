//! Application services for the entity store.

mod entity_store;

pub use entity_store::EntityStore;
