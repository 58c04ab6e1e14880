//! Error types for the polyroute CLI.

use polyroute_core::MissingParameter;
use std::fmt;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug)]
pub enum CliError {
    /// IO error (writing output, etc.)
    Io(std::io::Error),

    /// Manifest loading or validation error
    Config(polyroute_config::ConfigError),

    /// Router configuration error raised while resolving
    Router(polyroute_core::Error),

    /// Invalid argument
    InvalidArgument(String),

    /// No route has the requested name
    UnknownRoute(String),

    /// Reverse generation left required groups unfilled
    MissingParameters {
        route: String,
        missing: Vec<MissingParameter>,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Router(e) => write!(f, "Router error: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::UnknownRoute(name) => write!(f, "No route named '{}'", name),
            CliError::MissingParameters { route, missing } => {
                write!(f, "Missing parameters for route '{}':", route)?;
                for param in missing {
                    write!(f, " {}", param)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<polyroute_config::ConfigError> for CliError {
    fn from(e: polyroute_config::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<polyroute_core::Error> for CliError {
    fn from(e: polyroute_core::Error) -> Self {
        CliError::Router(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(e.into())
    }
}
