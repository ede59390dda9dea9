//! Domain model for users and teams.

mod error;
mod ids;
mod team;
mod user;

pub use error::{DirectoryDomainError, ParseRoleError};
pub use ids::{EmailAddress, TeamId, UserId};
pub use team::Team;
pub use user::{Role, User};
