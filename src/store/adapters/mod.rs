//! Snapshot repository adapters.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileSnapshotRepository;
pub use memory::InMemorySnapshotRepository;
