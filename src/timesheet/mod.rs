//! Time logged against tasks and the weekly timesheet view.

pub mod domain;
pub mod services;
