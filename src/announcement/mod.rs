//! Firm-wide announcements shown on every dashboard.

pub mod domain;
pub mod services;
