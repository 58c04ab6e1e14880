//! Manifest validation command

use crate::error::CliResult;
use colored::Colorize;
use polyroute_config::RouteManifest;
use polyroute_core::Router;
use std::path::Path;

/// Report on a manifest that loaded and compiled
pub fn execute(path: &Path, manifest: &RouteManifest, router: &Router) -> CliResult<()> {
    let languages: Vec<&str> = router.table().languages().collect();

    println!(
        "  {} {}",
        "✓".green().bold(),
        format!("{} is valid", path.display()).green()
    );
    println!("  {} {} route(s)", "→".cyan(), manifest.routes.len());
    println!("  {} languages: {}", "→".cyan(), languages.join(", "));

    let base_path = router.config().base_path.as_str();
    println!(
        "  {} base path: {}",
        "→".cyan(),
        if base_path.is_empty() { "/" } else { base_path }
    );
    println!(
        "  {} default language: {}{}",
        "→".cyan(),
        router.config().default_language,
        if router.config().language_in_path {
            " (in path)"
        } else {
            ""
        }
    );

    Ok(())
}
