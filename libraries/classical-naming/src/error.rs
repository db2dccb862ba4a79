//! Naming error types

use thiserror::Error;

/// Result type for naming operations
pub type Result<T> = std::result::Result<T, NamingError>;

/// Naming errors
#[derive(Error, Debug)]
pub enum NamingError {
    /// Two files would end up at the same path
    #[error("Two files would be renamed to {0}")]
    Collision(String),

    /// A file the plan refers to does not exist
    #[error("File not found: {0}")]
    MissingFile(String),

    /// The target directory name is already taken
    #[error("Directory already exists: {0}")]
    DirectoryExists(String),

    /// I/O error while renaming
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
