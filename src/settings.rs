//! Layered configuration.
//!
//! Settings are resolved from, in increasing priority:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file (`--config`)
//! 3. Environment variables prefixed with `STATUSWATCH_` (e.g. `STATUSWATCH_URL`)
//! 4. Command line flags
//!
//! ```toml
//! url = "https://status.example.com/status/main"
//! refresh = "30s"
//! buckets = 32
//! latency_warn = "300ms"
//! ```

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use statuswatch_types::{HistoryBucketizer, DEFAULT_BUCKET_COUNT};

use crate::data::duration::parse_duration;
use crate::data::Thresholds;

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "STATUSWATCH";

/// Values given on the command line; `None` leaves lower layers in charge.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub slug: Option<String>,
    pub file: Option<PathBuf>,
    pub refresh: Option<String>,
    pub timeout: Option<String>,
    pub buckets: Option<u64>,
    pub latency_warn: Option<String>,
    pub latency_crit: Option<String>,
}

/// Fully merged settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Status page URL, full page address or base URL.
    pub url: Option<String>,
    /// Slug, when `url` is a base URL.
    pub slug: Option<String>,
    /// Snapshot file to read instead of polling over HTTP.
    pub file: Option<PathBuf>,
    /// Poll interval.
    pub refresh: String,
    /// HTTP request timeout.
    pub timeout: String,
    /// Number of cells in each history strip.
    pub buckets: u64,
    pub latency_warn: String,
    pub latency_crit: String,
}

impl Settings {
    /// Merge defaults, the optional config file, the environment and the CLI.
    pub fn load(config_path: Option<&Path>, cli: &CliOverrides) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("refresh", "60s")?
            .set_default("timeout", "10s")?
            .set_default("buckets", DEFAULT_BUCKET_COUNT as u64)?
            .set_default("latency_warn", "500ms")?
            .set_default("latency_crit", "2s")?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("url", cli.url.clone())?
            .set_override_option("slug", cli.slug.clone())?
            .set_override_option(
                "file",
                cli.file.as_ref().map(|p| p.to_string_lossy().into_owned()),
            )?
            .set_override_option("refresh", cli.refresh.clone())?
            .set_override_option("timeout", cli.timeout.clone())?
            .set_override_option("buckets", cli.buckets)?
            .set_override_option("latency_warn", cli.latency_warn.clone())?
            .set_override_option("latency_crit", cli.latency_crit.clone())?
            .build()
            .context("Failed to load configuration")?;

        config.try_deserialize().context("Invalid configuration")
    }

    pub fn refresh_interval(&self) -> Result<Duration> {
        parse_duration(&self.refresh).with_context(|| format!("Invalid refresh '{}'", self.refresh))
    }

    pub fn request_timeout(&self) -> Result<Duration> {
        parse_duration(&self.timeout).with_context(|| format!("Invalid timeout '{}'", self.timeout))
    }

    pub fn bucketizer(&self) -> Result<HistoryBucketizer> {
        let count = usize::try_from(self.buckets)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| anyhow!("buckets must be at least 1, got {}", self.buckets))?;
        Ok(HistoryBucketizer::new(count))
    }

    pub fn thresholds(&self) -> Result<Thresholds> {
        let latency_warning = parse_duration(&self.latency_warn)
            .with_context(|| format!("Invalid latency_warn '{}'", self.latency_warn))?;
        let latency_critical = parse_duration(&self.latency_crit)
            .with_context(|| format!("Invalid latency_crit '{}'", self.latency_crit))?;
        Ok(Thresholds {
            latency_warning,
            latency_critical,
        })
    }
}
