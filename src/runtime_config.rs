//! # Runtime Configuration Module
//!
//! Diagnostics knobs for the dispatch table. None of these settings change
//! which handler a request resolves to; they only control what the router
//! reports while registering and resolving.
//!
//! ## Environment Variables
//!
//! ### `BRRTD_SLOW_MATCH_US`
//!
//! Resolution time, in microseconds, above which a match is logged at
//! `WARN` as a slow match. Accepts decimal (`1000`) or hexadecimal
//! (`0x3e8`). Default: `1000` (1 ms).
//!
//! ### `BRRTD_WARN_SHADOWED`
//!
//! `true`/`false`. When enabled, registering a pattern that can never be
//! selected because an equivalent pattern already sits in its bucket logs a
//! `WARN`. Default: `true`.
//!
//! ## TOML
//!
//! The same settings can be embedded in a host's configuration file:
//!
//! ```rust
//! use brrtdispatch::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_toml_str("slow_match_threshold_us = 250").unwrap();
//! assert_eq!(config.slow_match_threshold_us, 250);
//! assert!(config.warn_on_shadowed);
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::time::Duration;

const DEFAULT_SLOW_MATCH_US: u64 = 1_000;

/// Router diagnostics configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Matches slower than this are logged at `WARN`
    pub slow_match_threshold_us: u64,
    /// Log a `WARN` for registrations that can never be selected
    pub warn_on_shadowed: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            slow_match_threshold_us: DEFAULT_SLOW_MATCH_US,
            warn_on_shadowed: true,
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    ///
    /// Unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let slow_match_threshold_us = env::var("BRRTD_SLOW_MATCH_US")
            .ok()
            .and_then(|val| parse_number(&val))
            .unwrap_or(DEFAULT_SLOW_MATCH_US);
        let warn_on_shadowed = env::var("BRRTD_WARN_SHADOWED")
            .ok()
            .and_then(|val| val.trim().parse().ok())
            .unwrap_or(true);
        RouterConfig {
            slow_match_threshold_us,
            warn_on_shadowed,
        }
    }

    /// Parse a TOML table; missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        toml::from_str(source).context("Failed to parse router configuration")
    }

    #[must_use]
    pub fn slow_match_threshold(&self) -> Duration {
        Duration::from_micros(self.slow_match_threshold_us)
    }
}

fn parse_number(val: &str) -> Option<u64> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}
