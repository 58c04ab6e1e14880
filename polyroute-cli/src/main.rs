//! polyroute CLI - inspect route manifests, resolve requests and generate URLs.
//!
//! # Commands
//!
//! - `polyroute routes` - List routes in matching order
//! - `polyroute match <METHOD> <PATH>` - Resolve a request (200/404/405 or redirect)
//! - `polyroute url <NAME> -p key=value` - Generate the path or URL of a named route
//! - `polyroute check` - Validate the manifest
//!
//! The manifest defaults to `routes.toml` and can be set with `--manifest` or
//! `POLYROUTE_MANIFEST`.

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use polyroute_config::ManifestLoader;
use polyroute_core::{Origin, RequestContext};
use std::path::PathBuf;

mod commands;
mod error;
mod logging;

use commands::{check, resolve, routes, url};
use error::CliResult;
use logging::{LogConfig, LogFormat, LogLevel};

/// polyroute - language-aware route matching from the command line
#[derive(Parser)]
#[command(name = "polyroute")]
#[command(version)]
#[command(about = "Inspect route manifests, resolve requests and generate URLs")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} polyroute routes\n  {} polyroute match GET /meow/dolly/hi/\n  {} polyroute url meow -p name=dolly -p 1=hi",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Route manifest (TOML or JSON)
    #[arg(short, long, global = true, env = "POLYROUTE_MANIFEST", default_value = "routes.toml")]
    manifest: PathBuf,

    /// Load environment variables from this file before reading the manifest
    #[arg(long, global = true)]
    dotenv: Option<PathBuf>,

    /// Ignore POLYROUTE_* environment overrides
    #[arg(long, global = true)]
    no_env: bool,

    /// Log level for diagnostics on STDERR
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Log format for diagnostics on STDERR
    #[arg(long, global = true, value_enum, default_value = "compact")]
    log_format: LogFormat,

    /// Log filter directive, e.g. "polyroute_core=trace" (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_filter: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List routes in matching order
    #[command(alias = "r")]
    Routes(RoutesArgs),

    /// Resolve a request against the manifest
    #[command(name = "match", visible_alias = "resolve")]
    Match(MatchArgs),

    /// Generate the path or absolute URL of a named route
    #[command(alias = "u")]
    Url(UrlArgs),

    /// Validate the manifest and compile every route
    #[command(alias = "c")]
    Check,
}

#[derive(Args)]
struct RoutesArgs {
    /// Only list routes of this language
    #[arg(short, long)]
    lang: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct MatchArgs {
    /// HTTP method
    method: String,

    /// Request path, query string allowed
    path: String,

    /// Request scheme
    #[arg(long, default_value = "http")]
    scheme: String,

    /// Request host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Print JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct UrlArgs {
    /// Route name
    name: String,

    /// Target language (default language when omitted)
    #[arg(short, long)]
    lang: Option<String>,

    /// Parameter as key=value; numeric keys are positions
    #[arg(short, long = "param")]
    params: Vec<String>,

    /// Print an absolute URL
    #[arg(short, long)]
    absolute: bool,

    /// Scheme for absolute URLs
    #[arg(long, default_value = "http")]
    scheme: String,

    /// Host for absolute URLs
    #[arg(long, default_value = "localhost")]
    host: String,
}

fn run(cli: Cli) -> CliResult<()> {
    let loader = if cli.no_env {
        ManifestLoader::without_env()
    } else {
        ManifestLoader::new()
    };
    if !cli.no_env || cli.dotenv.is_some() {
        loader.load_dotenv(cli.dotenv.as_deref())?;
    }

    let manifest = loader.load(&cli.manifest)?;
    let router = manifest.build_router()?;
    tracing::debug!(
        manifest = %cli.manifest.display(),
        routes = router.table().len(),
        "Manifest loaded"
    );

    match cli.command {
        Commands::Routes(args) => routes::execute(&router, args.lang.as_deref(), args.json),

        Commands::Match(args) => {
            let request =
                RequestContext::new(args.method, args.path).with_origin(args.scheme, args.host);
            resolve::execute(&router, &request, args.json)
        }

        Commands::Url(args) => {
            let origin = args
                .absolute
                .then(|| Origin::new(args.scheme, args.host));
            url::execute(
                &router,
                &args.name,
                args.lang.as_deref(),
                &args.params,
                origin.as_ref(),
            )
        }

        Commands::Check => check::execute(&cli.manifest, &manifest, &router),
    }
}

fn main() {
    let cli = Cli::parse();

    // Handle color preferences
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut log_config = LogConfig::new()
        .level(cli.log_level.with_flags(cli.verbose, cli.quiet))
        .format(cli.log_format)
        .with_colors(!cli.no_color)
        .with_targets(cli.verbose);
    if let Some(filter) = &cli.log_filter {
        log_config = log_config.with_env_filter(filter);
    }
    let guard = log_config.init();

    if let Err(e) = run(cli) {
        // Flush diagnostics before exiting
        drop(guard);
        eprintln!("\n  {} {}\n", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
