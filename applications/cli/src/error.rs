/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing configuration keys: {}", .0.join(", "))]
    MissingConfig(Vec<String>),

    #[error("Release directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
