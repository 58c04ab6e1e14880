// Route manifests and router settings for polyroute

pub mod env;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use manifest::{ManifestLoader, RouteEntry, RouteManifest};
pub use validation::{ConfigValidator, Validate};

use polyroute_core::Router;
use std::path::Path;

/// Load a manifest with `POLYROUTE_*` overrides and build its router
pub fn load_router(path: impl AsRef<Path>) -> Result<Router> {
    ManifestLoader::new().load_router(path)
}
