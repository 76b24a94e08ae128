//! Snapshot - everything one poll of a status page returned.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{Sample, Series, SCHEMA_VERSION};

/// Format version carried by serialized snapshots.
///
/// Snapshot files written by `--export` or produced by other tools are
/// checked against this before they are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemaVersion {
    /// Breaking changes bump this.
    pub major: u32,
    /// Additive changes bump this.
    pub minor: u32,
}

impl SchemaVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// The version written by this library.
    pub const fn current() -> Self {
        Self::new(SCHEMA_VERSION, 0)
    }

    /// A snapshot is readable if its major version matches ours.
    pub fn is_compatible(&self) -> bool {
        self.major == SCHEMA_VERSION
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::current()
    }
}

/// One monitored entity and its heartbeats for the current cycle.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monitor {
    /// Identifier assigned by the monitoring service.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Status page group the monitor is listed under.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub group: Option<String>,

    /// Target URL, when the status page publishes it.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub url: Option<String>,

    /// Uptime over the last 24 hours as reported by the service (0.0 - 1.0).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub uptime_24h: Option<f64>,

    /// Heartbeats for this cycle.
    #[cfg_attr(feature = "serde", serde(default))]
    pub series: Series,
}

impl Monitor {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Most recent heartbeat.
    pub fn latest(&self) -> Option<&Sample> {
        self.series.latest()
    }

    /// Reported 24h uptime, falling back to the ratio over the series.
    pub fn uptime(&self) -> Option<f64> {
        self.uptime_24h.or_else(|| self.series.uptime_ratio())
    }
}

/// A point-in-time view of a whole status page.
///
/// # Example
///
/// ```rust
/// use statuswatch_types::{Status, StatusSnapshot};
///
/// let snapshot = StatusSnapshot::builder()
///     .title("Acme Status")
///     .monitor(1, "API", |m| {
///         m.group("Backend")
///             .uptime_24h(0.998)
///             .sample(1_700_000_000_000, Status::Up, |s| s.with_latency(42.0))
///     })
///     .build();
///
/// assert_eq!(snapshot.monitors.len(), 1);
/// assert_eq!(snapshot.monitors[0].series.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSnapshot {
    /// Schema version for forward compatibility.
    #[cfg_attr(feature = "serde", serde(default))]
    pub version: SchemaVersion,

    /// Unix timestamp in milliseconds when this snapshot was collected.
    pub timestamp_ms: u64,

    /// Status page title.
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,

    /// Monitors in page order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub monitors: Vec<Monitor>,
}

impl StatusSnapshot {
    /// Create an empty snapshot stamped with the current time.
    #[cfg(feature = "std")]
    pub fn new() -> Self {
        Self::with_timestamp(current_timestamp_ms())
    }

    /// Create an empty snapshot with a specific timestamp.
    pub fn with_timestamp(timestamp_ms: u64) -> Self {
        Self {
            version: SchemaVersion::current(),
            timestamp_ms,
            title: String::new(),
            monitors: Vec::new(),
        }
    }

    pub fn builder() -> StatusSnapshotBuilder {
        StatusSnapshotBuilder::new()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Look up a monitor by id.
    pub fn get(&self, id: u64) -> Option<&Monitor> {
        self.monitors.iter().find(|m| m.id == id)
    }

    /// Total number of heartbeats across all monitors.
    pub fn sample_count(&self) -> usize {
        self.monitors.iter().map(|m| m.series.len()).sum()
    }
}

#[cfg(feature = "std")]
impl Default for StatusSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`StatusSnapshot`].
#[derive(Debug, Default)]
pub struct StatusSnapshotBuilder {
    timestamp_ms: Option<u64>,
    title: String,
    monitors: Vec<Monitor>,
}

impl StatusSnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a specific timestamp (milliseconds since Unix epoch).
    pub fn timestamp_ms(mut self, ts: u64) -> Self {
        self.timestamp_ms = Some(ts);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add a monitor configured through a closure.
    pub fn monitor<F>(mut self, id: u64, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(MonitorBuilder) -> MonitorBuilder,
    {
        let monitor = f(MonitorBuilder::new(id, name)).build();
        self.monitors.push(monitor);
        self
    }

    /// Add a pre-built monitor.
    pub fn push_monitor(mut self, monitor: Monitor) -> Self {
        self.monitors.push(monitor);
        self
    }

    pub fn build(self) -> StatusSnapshot {
        #[cfg(feature = "std")]
        let timestamp_ms = self.timestamp_ms.unwrap_or_else(current_timestamp_ms);
        #[cfg(not(feature = "std"))]
        let timestamp_ms = self.timestamp_ms.unwrap_or(0);

        StatusSnapshot {
            version: SchemaVersion::current(),
            timestamp_ms,
            title: self.title,
            monitors: self.monitors,
        }
    }
}

/// Builder for [`Monitor`], used through [`StatusSnapshotBuilder::monitor`].
#[derive(Debug)]
pub struct MonitorBuilder {
    monitor: Monitor,
    samples: Vec<Sample>,
}

impl MonitorBuilder {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            monitor: Monitor::new(id, name),
            samples: Vec::new(),
        }
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.monitor.group = Some(group.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.monitor.url = Some(url.into());
        self
    }

    pub fn uptime_24h(mut self, ratio: f64) -> Self {
        self.monitor.uptime_24h = Some(ratio);
        self
    }

    /// Append a heartbeat, optionally decorated by `f`.
    pub fn sample<F>(mut self, timestamp_ms: u64, status: crate::Status, f: F) -> Self
    where
        F: FnOnce(Sample) -> Sample,
    {
        self.samples.push(f(Sample::new(timestamp_ms, status)));
        self
    }

    pub fn build(mut self) -> Monitor {
        self.monitor.series = Series::new(self.samples);
        self.monitor
    }
}

/// Get current timestamp in milliseconds since Unix epoch.
#[cfg(feature = "std")]
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;

    fn sample_snapshot() -> StatusSnapshot {
        StatusSnapshot::builder()
            .timestamp_ms(1_703_160_000_000)
            .title("Example")
            .monitor(1, "web", |m| {
                m.group("Public")
                    .sample(1_000, Status::Up, |s| s.with_latency(12.0).with_message("200 - OK"))
                    .sample(2_000, Status::Down, |s| s.with_message("timeout"))
            })
            .monitor(2, "db", |m| m.uptime_24h(0.5))
            .build()
    }

    #[test]
    fn test_snapshot_builder() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.timestamp_ms, 1_703_160_000_000);
        assert_eq!(snapshot.title, "Example");
        assert_eq!(snapshot.sample_count(), 2);

        let web = snapshot.get(1).unwrap();
        assert_eq!(web.group.as_deref(), Some("Public"));
        assert_eq!(web.latest().map(|s| s.status), Some(Status::Down));
        assert!(snapshot.get(3).is_none());
    }

    #[test]
    fn test_uptime_prefers_reported_value() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.get(1).unwrap().uptime(), Some(0.5));
        assert_eq!(snapshot.get(2).unwrap().uptime(), Some(0.5));

        let empty = Monitor::new(9, "idle");
        assert!(empty.uptime().is_none());
    }

    #[test]
    fn test_snapshot_version() {
        let snapshot = StatusSnapshot::builder().build();
        assert!(snapshot.version.is_compatible());
        assert!(!SchemaVersion::new(SCHEMA_VERSION + 1, 0).is_compatible());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_minimal_snapshot() {
        let json = r#"{
            "timestamp_ms": 1700000000000,
            "monitors": [
                {
                    "id": 4,
                    "name": "api",
                    "series": [
                        { "timestamp_ms": 1700000000000, "status": "up", "latency_ms": 31.5 },
                        { "timestamp_ms": 1700000060000, "status": "maintenance" }
                    ]
                }
            ]
        }"#;

        let snapshot: StatusSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.version.is_compatible());
        assert!(snapshot.title.is_empty());

        let api = snapshot.get(4).unwrap();
        assert_eq!(api.series.len(), 2);
        assert_eq!(api.series.samples()[0].latency_ms, Some(31.5));
        assert_eq!(api.latest().map(|s| s.status), Some(Status::Maintenance));
    }
}
