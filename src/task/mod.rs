//! Client tasks and their approval workflow.
//!
//! Employees start tasks and hand in work; administrators approve it or
//! send it back with remarks. Every status change is recorded in the task
//! history:
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;
