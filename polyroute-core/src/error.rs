// Error types for route registration and resolution

use thiserror::Error;

/// Configuration errors raised while building a router or resolving a request.
///
/// Routing misses (404/405), trailing-slash redirects and unfilled reverse
/// parameters are not errors; they are reported through
/// [`MatchStatus`](crate::MatchStatus), [`Resolution`](crate::Resolution) and
/// [`Generated`](crate::Generated).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid route pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Route '{0}' must accept at least one HTTP method")]
    NoMethods(String),

    #[error("Invalid base path: '{0}'")]
    InvalidBasePath(String),

    #[error("Invalid language tag: '{0}'")]
    InvalidLanguage(String),

    #[error("Request path '{path}' is outside the base path '{base_path}'")]
    BasePathMismatch { path: String, base_path: String },
}

pub type Result<T> = std::result::Result<T, Error>;
