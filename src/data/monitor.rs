//! Monitor rows and page-level summaries.
//!
//! This module turns a raw [`StatusSnapshot`] into display-ready rows: the
//! latest status, response code and latency of each monitor, its uptime,
//! and the series the history strip is drawn from.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use statuswatch_types::{Bucket, HistoryBucketizer, Monitor, Series, Status, StatusSnapshot};

use super::duration::elapsed_since;

/// Latency thresholds used to highlight slow monitors.
#[derive(Debug, Clone)]
pub struct Thresholds {
    /// Latency at or above which a monitor is shown as slow.
    pub latency_warning: Duration,
    /// Latency at or above which a monitor is shown as very slow.
    pub latency_critical: Duration,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            latency_warning: Duration::from_millis(500),
            latency_critical: Duration::from_secs(2),
        }
    }
}

/// How a latency compares to the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LatencyLevel {
    Normal,
    Slow,
    VerySlow,
}

impl Thresholds {
    pub fn latency_level(&self, latency_ms: f64) -> LatencyLevel {
        if latency_ms >= self.latency_critical.as_secs_f64() * 1_000.0 {
            LatencyLevel::VerySlow
        } else if latency_ms >= self.latency_warning.as_secs_f64() * 1_000.0 {
            LatencyLevel::Slow
        } else {
            LatencyLevel::Normal
        }
    }
}

/// One monitor, flattened for display.
#[derive(Debug, Clone)]
pub struct MonitorRow {
    pub id: u64,
    pub name: String,
    pub group: Option<String>,
    pub url: Option<String>,
    /// Status of the latest heartbeat; `Unknown` without heartbeats.
    pub status: Status,
    pub response_code: Option<u16>,
    pub latency_ms: Option<f64>,
    pub average_latency_ms: Option<f64>,
    pub uptime: Option<f64>,
    pub last_check_ms: Option<u64>,
    pub message: Option<String>,
    pub series: Series,
}

impl MonitorRow {
    fn from_monitor(monitor: Monitor) -> Self {
        let latest = monitor.latest();
        let status = latest.map(|s| s.status).unwrap_or_default();
        let response_code = latest.and_then(|s| s.response_code());
        let latency_ms = latest.and_then(|s| s.latency_ms);
        let last_check_ms = latest.map(|s| s.timestamp_ms);
        let message = latest.and_then(|s| s.message.clone());
        let uptime = monitor.uptime();
        let average_latency_ms = monitor.series.average_latency();

        Self {
            id: monitor.id,
            name: monitor.name,
            group: monitor.group,
            url: monitor.url,
            status,
            response_code,
            latency_ms,
            average_latency_ms,
            uptime,
            last_check_ms,
            message,
            series: monitor.series,
        }
    }

    /// History strip for this monitor, oldest bucket first.
    pub fn strip(&self, bucketizer: &HistoryBucketizer) -> Vec<Bucket<'_>> {
        bucketizer.bucketize(self.series.samples())
    }

    /// Time since the latest heartbeat, relative to `now_ms`.
    pub fn since_last_check(&self, now_ms: u64) -> Option<Duration> {
        self.last_check_ms.map(|t| elapsed_since(t, now_ms))
    }

    /// Case-insensitive match against name and group.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.group.as_deref().is_some_and(|g| g.to_lowercase().contains(&needle))
    }
}

/// Number of monitors in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    counts: [usize; Status::ALL.len()],
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> usize {
        self.counts[status.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// The worst status present, or `None` with no monitors.
    pub fn worst(&self) -> Option<Status> {
        Status::ALL
            .into_iter()
            .filter(|s| self.get(*s) > 0)
            .max_by_key(|s| s.severity())
    }
}

/// Complete processed status page ready for display.
#[derive(Debug, Clone)]
pub struct MonitorData {
    pub title: String,
    pub monitors: Vec<MonitorRow>,
    /// When the snapshot was collected, in epoch milliseconds.
    pub collected_at_ms: u64,
    pub last_updated: Instant,
}

impl MonitorData {
    /// Load and parse a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a snapshot from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        let snapshot: StatusSnapshot = serde_json::from_str(content)?;
        if !snapshot.version.is_compatible() {
            bail!(
                "Unsupported snapshot version {}.{}",
                snapshot.version.major,
                snapshot.version.minor
            );
        }
        Ok(Self::from_snapshot(snapshot))
    }

    /// Convert a StatusSnapshot into display rows, keeping page order.
    pub fn from_snapshot(snapshot: StatusSnapshot) -> Self {
        let monitors = snapshot.monitors.into_iter().map(MonitorRow::from_monitor).collect();

        Self {
            title: snapshot.title,
            monitors,
            collected_at_ms: snapshot.timestamp_ms,
            last_updated: Instant::now(),
        }
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for m in &self.monitors {
            counts.counts[m.status.index()] += 1;
        }
        counts
    }

    /// Mean of the reported uptimes of monitors that have one.
    pub fn average_uptime(&self) -> Option<f64> {
        let uptimes: Vec<f64> = self.monitors.iter().filter_map(|m| m.uptime).collect();
        if uptimes.is_empty() {
            None
        } else {
            Some(uptimes.iter().sum::<f64>() / uptimes.len() as f64)
        }
    }
}
