//! Application services for the directory.

mod directory;

pub use directory::{
    DirectoryError, DirectoryResult, DirectoryService, RegisterUserRequest,
};
