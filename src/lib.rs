//! Taskdesk: task lifecycle and approval engine for a professional-services
//! back office.
//!
//! Administrators create client tasks and assign them to employees or
//! teams; employees start the work and submit it; administrators approve it
//! or send it back with remarks. Every status change lands in an
//! append-only history.
//!
//! # Architecture
//!
//! Taskdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (in-memory, JSON file)
//! - **Services**: Orchestration over one shared [`store::services::EntityStore`]
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, approvals, history and insights
//! - [`directory`]: Users, roles and teams
//! - [`announcement`]: Firm-wide announcements
//! - [`timesheet`]: Time logged against tasks
//! - [`store`]: The persisted snapshot and its repositories
//! - [`portal`]: Wiring of every service over one store
//! - [`cli`], [`settings`], [`telemetry`]: The `taskdesk` binary's surface

pub mod announcement;
pub mod cli;
pub mod directory;
mod identifier;
pub mod portal;
pub mod settings;
pub mod store;
pub mod task;
pub mod telemetry;
#[cfg(test)]
mod test_support;
pub mod timesheet;
