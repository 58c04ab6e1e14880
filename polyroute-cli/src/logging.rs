//! Diagnostic logging for the CLI.
//!
//! The router crates only emit `tracing` events; this module installs the
//! subscriber that prints them. Logs go to STDERR through a non-blocking
//! writer so that command output on STDOUT stays machine-readable.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from the configured
//! level. `--verbose` selects debug, `--quiet` selects error.

use clap::ValueEnum;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log level for filtering messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert to string for EnvFilter
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Apply the global `--verbose` / `--quiet` flags to `self`
    pub fn with_flags(self, verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (true, _) => LogLevel::Debug,
            (false, true) => LogLevel::Error,
            (false, false) => self,
        }
    }
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Structured, machine-readable
    Json,
    /// Simple, human-readable
    Plain,
    /// Multi-line, for development
    Pretty,
    /// Minimal
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Include target (module path)
    pub targets: bool,
    /// Enable ANSI colors
    pub colors: bool,
    /// Custom filter directive, overrides `RUST_LOG` and `level`
    pub env_filter: Option<String>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_targets(mut self, enable: bool) -> Self {
        self.targets = enable;
        self
    }

    pub fn with_colors(mut self, enable: bool) -> Self {
        self.colors = enable;
        self
    }

    /// Set custom filter, e.g. `"polyroute_core=trace"`
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Build the filter this configuration would install
    pub fn filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(directive) => EnvFilter::try_new(directive)
                .unwrap_or_else(|_| EnvFilter::new(self.level.as_str())),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.level.as_str())),
        }
    }

    /// Install the global subscriber.
    ///
    /// The returned guard flushes buffered logs when dropped; keep it alive
    /// until the command finishes.
    pub fn init(self) -> WorkerGuard {
        let (writer, guard) = tracing_appender::non_blocking(io::stderr());
        let filter = self.filter();

        match self.format {
            LogFormat::Json => {
                let layer = fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_target(self.targets);
                tracing_subscriber::registry().with(filter).with(layer).init();
            }
            LogFormat::Plain => {
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_target(self.targets)
                    .with_ansi(self.colors);
                tracing_subscriber::registry().with(filter).with(layer).init();
            }
            LogFormat::Pretty => {
                let layer = fmt::layer()
                    .pretty()
                    .with_writer(writer)
                    .with_target(self.targets)
                    .with_ansi(self.colors);
                tracing_subscriber::registry().with(filter).with(layer).init();
            }
            LogFormat::Compact => {
                let layer = fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_target(self.targets)
                    .with_ansi(self.colors);
                tracing_subscriber::registry().with(filter).with(layer).init();
            }
        }

        guard
    }
}

impl Default for LogConfig {
    /// Compact output at WARN level, no colors
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            targets: true,
            colors: false,
            env_filter: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_string() {
        assert_eq!(LogLevel::Trace.as_str(), "trace");
        assert_eq!(LogLevel::Debug.as_str(), "debug");
        assert_eq!(LogLevel::Warn.as_str(), "warn");
        assert_eq!(LogLevel::Error.as_str(), "error");
    }

    #[test]
    fn test_level_with_flags() {
        assert_eq!(LogLevel::Warn.with_flags(true, false), LogLevel::Debug);
        assert_eq!(LogLevel::Warn.with_flags(false, true), LogLevel::Error);
        assert_eq!(LogLevel::Info.with_flags(false, false), LogLevel::Info);
        // --verbose wins
        assert_eq!(LogLevel::Trace.with_flags(true, true), LogLevel::Debug);
    }

    #[test]
    fn test_config_builder() {
        let config = LogConfig::new()
            .level(LogLevel::Debug)
            .format(LogFormat::Pretty)
            .with_colors(true)
            .with_targets(false)
            .with_env_filter("polyroute_core=trace");

        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.colors);
        assert!(!config.targets);
        assert_eq!(config.env_filter.as_deref(), Some("polyroute_core=trace"));
    }

    #[test]
    fn test_custom_filter_is_used() {
        let config = LogConfig::new().with_env_filter("polyroute_core=trace");
        assert!(config.filter().to_string().contains("polyroute_core=trace"));
    }
}
