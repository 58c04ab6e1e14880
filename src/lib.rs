// polyroute - language-aware regex routing for Rust
//
// Routes are declared per language as slash-delimited regular expressions.
// Requests resolve to a 200/404/405 result or a canonical-slash redirect, and
// named routes generate their paths back in every declared language.

// Re-export core functionality
pub use polyroute_core::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use polyroute_config;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Generated,
        MatchResult,
        MatchStatus,
        Origin,
        Parameters,
        Redirect,
        RequestContext,
        Resolution,
        RouteBuilder,
        Router,
        RouterConfig,
    };

    #[cfg(feature = "config")]
    pub use polyroute_config::{ManifestLoader, RouteManifest};
}
