//! Configuration types for iostat-relay.
//!
//! [`Config::load`] layers an optional TOML file and `IOSTAT_RELAY_*`
//! environment variables over the embedded defaults. [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in
//! tests). The CLI applies its own overrides afterwards and then calls
//! [`Config::validate`] once, before the pipeline starts.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::{ConfigError, Result};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[collector]
url         = ""
hostname    = ""
measurement = "iostat"
timeout_ms  = 5000

[parser]
channel_capacity = 1
"#;

const ENV_PREFIX: &str = "IOSTAT_RELAY";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, built once at startup and passed by reference
/// into the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub parser: ParserConfig,
}

/// `[collector]` section: where and how samples are written.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    /// Write endpoint, e.g. `http://localhost:8086/write?db=iostat`.
    #[serde(default)]
    pub url: String,
    /// Value of the `host` tag on every point.
    #[serde(default)]
    pub hostname: String,
    #[serde(default = "default_measurement")]
    pub measurement: String,
    /// Upper bound on one POST, including draining the response body.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// `[parser]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Capacity of the parser → emitter handoff channel.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_measurement() -> String { "iostat".to_string() }
fn default_timeout_ms() -> u64 { 5000 }
fn default_channel_capacity() -> usize { 1 }

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            hostname: String::new(),
            measurement: default_measurement(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the embedded defaults, then `path` (if given, it must exist),
    /// then `IOSTAT_RELAY_<SECTION>__<KEY>` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem or the
    /// environment.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Check that everything the pipeline needs is present and in range.
    ///
    /// The URL is only checked for presence here; the HTTP transport parses
    /// it when it is built.
    pub fn validate(&self) -> Result<()> {
        let collector = &self.collector;

        if collector.url.trim().is_empty() {
            return Err(ConfigError::Missing("collector.url"));
        }
        if collector.hostname.trim().is_empty() {
            return Err(ConfigError::Missing("collector.hostname"));
        }
        if collector.measurement.trim().is_empty() {
            return Err(ConfigError::Missing("collector.measurement"));
        }

        if collector.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "collector.timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.parser.channel_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "parser.channel_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.collector.timeout_ms)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
