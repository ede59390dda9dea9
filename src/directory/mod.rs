//! Users and teams.
//!
//! Users carry the role that gates administrator actions; teams are a
//! shortcut for assigning a task to several employees at once.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
