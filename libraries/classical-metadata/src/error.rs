/// Metadata-specific errors
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Tag parsing error
    #[error("Tag parsing error: {0}")]
    ParseError(String),

    /// Tag writing error
    #[error("Tag writing error: {0}")]
    WriteError(String),

    /// Writing would drop information held by the existing tags
    #[error("Refusing to write {path}: would lose data in {}", .keys.join(", "))]
    WouldLoseData {
        /// File the plan targets
        path: String,
        /// Keys whose new value drops old information
        keys: Vec<String>,
    },

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),

    /// Directory walk error
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// Domain model error
    #[error(transparent)]
    Core(#[from] classical_core::CoreError),
}
