//! Structured logging setup for hosts, demos and benchmarks.
//!
//! The router only emits `tracing` events; installing a subscriber is the
//! host's call. This module offers the subscriber stack the router is
//! usually run with: an `EnvFilter` plus a JSON or pretty fmt layer,
//! optionally behind a non-blocking writer.
//!
//! | variable | default |
//! |---|---|
//! | `BRRTD_LOG_LEVEL` | `info` |
//! | `BRRTD_LOG_FORMAT` | `json` (`pretty` for human-readable output) |
//! | `BRRTD_LOG_TARGET_FILTER` | none, e.g. `brrtdispatch::router=debug,hyper=warn` |
//! | `BRRTD_LOG_INCLUDE_LOCATION` | `false` |
//! | `BRRTD_LOG_ASYNC` | `false` |
//!
//! `RUST_LOG`, when set, replaces the base level.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event
    Json,
    /// Multi-line human-readable output
    Pretty,
}

impl LogFormat {
    /// Anything other than `pretty` (case-insensitive) selects JSON.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("pretty") {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base level name, used when `RUST_LOG` is unset
    pub log_level: String,
    pub format: LogFormat,
    /// Comma-separated `target=level` directives layered over the base level
    pub target_filter: Option<String>,
    /// Emit source file and line with every event
    pub include_location: bool,
    /// Hand events to a background writer thread
    pub async_logging: bool,
}

impl LogConfig {
    /// Read the `BRRTD_LOG_*` variables; unset or unparseable values take
    /// their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_level: env_or("BRRTD_LOG_LEVEL", "info"),
            format: LogFormat::parse(&env_or("BRRTD_LOG_FORMAT", "json")),
            target_filter: env::var("BRRTD_LOG_TARGET_FILTER").ok(),
            include_location: env_flag("BRRTD_LOG_INCLUDE_LOCATION"),
            async_logging: env_flag("BRRTD_LOG_ASYNC"),
        }
    }

    #[must_use]
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_owned(),
            format: LogFormat::Pretty,
            target_filter: None,
            include_location: true,
            async_logging: false,
        }
    }

    #[must_use]
    pub fn default_prod() -> Self {
        Self {
            log_level: "info".to_owned(),
            format: LogFormat::Json,
            target_filter: None,
            include_location: false,
            async_logging: true,
        }
    }

    fn level(&self) -> Level {
        self.log_level.trim().parse().unwrap_or(Level::INFO)
    }

    /// Base level (or `RUST_LOG`) plus every valid `target_filter` directive.
    /// Invalid directives are reported on stderr and skipped.
    fn env_filter(&self) -> EnvFilter {
        let base = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        self.target_filter
            .iter()
            .flat_map(|filters| filters.split(','))
            .map(str::trim)
            .filter(|directive| !directive.is_empty())
            .fold(base, |filter, directive| match directive.parse() {
                Ok(parsed) => filter.add_directive(parsed),
                Err(err) => {
                    eprintln!("Warning: skipping log filter directive {directive:?}: {err}");
                    filter
                }
            })
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|val| val.trim().parse().ok())
        .unwrap_or(false)
}

/// Keeps the background writer alive; dropping it flushes pending events.
#[must_use = "dropping the guard stops the non-blocking log writer"]
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
}

/// Install the global subscriber at `log_level`, everything else from the
/// environment.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(log_level: &str) -> Result<LoggingGuard> {
    let config = LogConfig {
        log_level: log_level.to_owned(),
        ..LogConfig::from_env()
    };
    init_logging_with_config(&config)
}

/// Install a global `tracing` subscriber built from `config`.
///
/// ```no_run
/// use brrtdispatch::logging::{init_logging_with_config, LogConfig};
///
/// let _guard = init_logging_with_config(&LogConfig::from_env())
///     .expect("Failed to initialize logging");
/// ```
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<LoggingGuard> {
    let (layer, worker) = if config.async_logging {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        (fmt_layer(config, writer), Some(guard))
    } else {
        (fmt_layer(config, std::io::stdout), None)
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(LoggingGuard { _worker: worker })
}

type Filtered = Layered<EnvFilter, Registry>;

fn fmt_layer<W>(config: &LogConfig, writer: W) -> Box<dyn Layer<Filtered> + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let location = config.include_location;
    match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(location)
            .with_line_number(location)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_ansi(false)
            .with_target(true)
            .with_file(location)
            .with_line_number(location)
            .with_writer(writer)
            .boxed(),
    }
}
