//! Uptime Kuma adapter using the public status page API.
//!
//! A public status page exposes two unauthenticated endpoints:
//!
//! - `/api/status-page/<slug>`: page title and the monitors grouped as they
//!   appear on the page
//! - `/api/status-page/heartbeat/<slug>`: recent heartbeats per monitor and
//!   24h uptime ratios
//!
//! The adapter fetches both and merges them into a [`StatusSnapshot`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use statuswatch_adapters::uptime_kuma::UptimeKumaAdapter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = UptimeKumaAdapter::builder()
//!         .endpoint("https://status.example.com/status/main")
//!         .build()?;
//!
//!     let snapshot = adapter.collect().await?;
//!
//!     for monitor in &snapshot.monitors {
//!         let status = monitor.latest().map(|s| s.status.label()).unwrap_or("-");
//!         println!("{}: {}", monitor.name, status);
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use statuswatch_types::{Monitor, Sample, SchemaVersion, Series, Status, StatusSnapshot};

use crate::{AdapterError, StatusPageUrl};

/// Suffix of the uptime key the status page uses for the 24 hour window.
const UPTIME_24H_SUFFIX: &str = "_24";

/// Uptime Kuma adapter for collecting status page snapshots.
#[derive(Debug, Clone)]
pub struct UptimeKumaAdapter {
    client: Client,
    page: StatusPageUrl,
}

impl UptimeKumaAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> UptimeKumaAdapterBuilder {
        UptimeKumaAdapterBuilder::default()
    }

    /// The status page this adapter polls.
    pub fn page(&self) -> &StatusPageUrl {
        &self.page
    }

    /// Collect a snapshot of every monitor on the page.
    pub async fn collect(&self) -> Result<StatusSnapshot, AdapterError> {
        let page: PageResponse = self.fetch(self.page.page_endpoint()?).await?;
        let heartbeats: HeartbeatResponse = self.fetch(self.page.heartbeat_endpoint()?).await?;

        let snapshot = build_snapshot(page, heartbeats, now_ms())?;
        debug!(
            slug = self.page.slug(),
            monitors = snapshot.len(),
            samples = snapshot.sample_count(),
            "collected status page"
        );
        Ok(snapshot)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, AdapterError> {
        let response = self.client.get(url.clone()).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AdapterError::NotFound(self.page.slug().to_string()));
        }

        if !response.status().is_success() {
            return Err(AdapterError::Http(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        response.json().await.map_err(|e| AdapterError::Parse(e.to_string()))
    }
}

/// Builder for UptimeKumaAdapter.
#[derive(Debug, Default)]
pub struct UptimeKumaAdapterBuilder {
    endpoint: Option<String>,
    slug: Option<String>,
    timeout: Option<Duration>,
}

impl UptimeKumaAdapterBuilder {
    /// Set the status page address, either the full page URL
    /// (`https://status.example.com/status/main`) or the base URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the status page slug, required when the endpoint is a base URL.
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the adapter.
    pub fn build(self) -> Result<UptimeKumaAdapter, AdapterError> {
        let endpoint = self.endpoint.unwrap_or_else(|| "http://localhost:3001".to_string());
        let page = StatusPageUrl::parse(&endpoint, self.slug.as_deref())?;
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("statuswatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AdapterError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(UptimeKumaAdapter { client, page })
    }
}

/// Merge the two API responses into a snapshot.
///
/// Monitors keep page order. Heartbeats for monitors that are not listed on
/// the page are kept too, appended in id order.
fn build_snapshot(
    page: PageResponse,
    heartbeats: HeartbeatResponse,
    timestamp_ms: u64,
) -> Result<StatusSnapshot, AdapterError> {
    let mut beats: BTreeMap<u64, Vec<HeartbeatInfo>> = BTreeMap::new();
    for (key, list) in heartbeats.heartbeat_list {
        let id = parse_monitor_id(&key)?;
        beats.insert(id, list);
    }

    let uptimes: HashMap<u64, f64> = heartbeats
        .uptime_list
        .iter()
        .filter_map(|(key, ratio)| {
            let id = key.strip_suffix(UPTIME_24H_SUFFIX)?.parse().ok()?;
            Some((id, *ratio))
        })
        .collect();

    let mut seen = HashSet::new();
    let mut monitors = Vec::new();

    for group in page.public_group_list {
        for listed in group.monitor_list {
            if !seen.insert(listed.id) {
                continue;
            }
            let samples = beats.remove(&listed.id).unwrap_or_default();
            monitors.push(Monitor {
                id: listed.id,
                name: listed.name,
                group: Some(group.name.clone()).filter(|g| !g.is_empty()),
                url: listed.url.filter(|u| !u.is_empty()),
                uptime_24h: uptimes.get(&listed.id).copied(),
                series: convert_series(listed.id, samples)?,
            });
        }
    }

    for (id, samples) in beats {
        monitors.push(Monitor {
            id,
            name: format!("Monitor {}", id),
            group: None,
            url: None,
            uptime_24h: uptimes.get(&id).copied(),
            series: convert_series(id, samples)?,
        });
    }

    Ok(StatusSnapshot {
        version: SchemaVersion::current(),
        timestamp_ms,
        title: page.config.title.unwrap_or_default(),
        monitors,
    })
}

fn parse_monitor_id(key: &str) -> Result<u64, AdapterError> {
    key.parse()
        .map_err(|_| AdapterError::InvalidInput(format!("monitor id '{}' is not a number", key)))
}

fn convert_series(monitor_id: u64, beats: Vec<HeartbeatInfo>) -> Result<Series, AdapterError> {
    beats
        .into_iter()
        .map(|beat| {
            let timestamp_ms = parse_heartbeat_time(&beat.time).map_err(|e| match e {
                AdapterError::InvalidInput(msg) => {
                    AdapterError::InvalidInput(format!("monitor {}: {}", monitor_id, msg))
                }
                other => other,
            })?;
            let mut sample = Sample::new(timestamp_ms, beat.status.into());
            if let Some(msg) = beat.msg {
                sample = sample.with_message(msg);
            }
            if let Some(ping) = beat.ping {
                sample = sample.with_latency(ping);
            }
            Ok(sample)
        })
        .collect()
}

/// Parse a heartbeat time into milliseconds since the Unix epoch.
///
/// The status page sends UTC times as `2024-05-01 12:00:00.123`; RFC 3339
/// is accepted as well.
pub fn parse_heartbeat_time(time: &str) -> Result<u64, AdapterError> {
    let time = time.trim();
    let millis = match DateTime::parse_from_rfc3339(time) {
        Ok(dt) => dt.timestamp_millis(),
        Err(_) => NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M:%S%.f")
            .map(|dt| dt.and_utc().timestamp_millis())
            .map_err(|e| {
                AdapterError::InvalidInput(format!("unparseable heartbeat time '{}': {}", time, e))
            })?,
    };

    u64::try_from(millis)
        .map_err(|_| AdapterError::InvalidInput(format!("heartbeat time '{}' is before 1970", time)))
}

fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Response of `/api/status-page/<slug>`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse {
    #[serde(default)]
    config: PageConfig,
    #[serde(default)]
    public_group_list: Vec<PublicGroup>,
}

#[derive(Debug, Default, Deserialize)]
struct PageConfig {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublicGroup {
    #[serde(default)]
    name: String,
    #[serde(default)]
    monitor_list: Vec<PublicMonitor>,
}

#[derive(Debug, Deserialize)]
struct PublicMonitor {
    id: u64,
    name: String,
    #[serde(default)]
    url: Option<String>,
}

/// Response of `/api/status-page/heartbeat/<slug>`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeartbeatResponse {
    #[serde(default)]
    heartbeat_list: HashMap<String, Vec<HeartbeatInfo>>,
    #[serde(default)]
    uptime_list: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct HeartbeatInfo {
    status: StatusCodeValue,
    time: String,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    ping: Option<f64>,
}

/// Older servers send the status as a boolean.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatusCodeValue {
    Code(i64),
    Flag(bool),
}

impl From<StatusCodeValue> for Status {
    fn from(value: StatusCodeValue) -> Self {
        match value {
            StatusCodeValue::Code(code) => Status::from_code(code),
            StatusCodeValue::Flag(true) => Status::Up,
            StatusCodeValue::Flag(false) => Status::Down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_json() -> &'static str {
        r#"{
            "config": { "slug": "main", "title": "Acme Status", "autoRefreshInterval": 300 },
            "incident": null,
            "publicGroupList": [
                {
                    "id": 1,
                    "name": "Services",
                    "weight": 1,
                    "monitorList": [
                        { "id": 3, "name": "API", "sendUrl": 0, "type": "http" },
                        { "id": 1, "name": "Website", "url": "https://acme.test" }
                    ]
                },
                {
                    "id": 2,
                    "name": "Infra",
                    "monitorList": [
                        { "id": 3, "name": "API again" },
                        { "id": 7, "name": "Database" }
                    ]
                }
            ],
            "maintenanceList": []
        }"#
    }

    fn heartbeat_json() -> &'static str {
        r#"{
            "heartbeatList": {
                "1": [
                    { "status": 1, "time": "2024-05-01 12:00:00.000", "msg": "200 - OK", "ping": 42 },
                    { "status": 0, "time": "2024-05-01 12:01:00.000", "msg": "503 - Service Unavailable", "ping": null }
                ],
                "3": [
                    { "status": 2, "time": "2024-05-01 12:00:30", "msg": "", "ping": 18.5 }
                ],
                "9": [
                    { "status": true, "time": "2024-05-01T12:00:00Z" }
                ]
            },
            "uptimeList": { "1_24": 0.5, "3_24": 1, "3_720": 0.9 }
        }"#
    }

    fn snapshot() -> StatusSnapshot {
        let page: PageResponse = serde_json::from_str(page_json()).unwrap();
        let beats: HeartbeatResponse = serde_json::from_str(heartbeat_json()).unwrap();
        build_snapshot(page, beats, 1_714_564_900_000).unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let adapter = UptimeKumaAdapter::builder().slug("default").build().unwrap();
        assert_eq!(adapter.page().base().as_str(), "http://localhost:3001/");
        assert_eq!(adapter.page().slug(), "default");
    }

    #[test]
    fn test_builder_custom() {
        let adapter = UptimeKumaAdapter::builder()
            .endpoint("https://status.acme.test/status/main")
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();
        assert_eq!(adapter.page().slug(), "main");
    }

    #[test]
    fn test_builder_without_slug_fails() {
        let err = UptimeKumaAdapter::builder().endpoint("https://status.acme.test").build();
        assert!(matches!(err, Err(AdapterError::InvalidUrl(_))));
    }

    #[test]
    fn test_monitors_keep_page_order() {
        let snapshot = snapshot();
        let names: Vec<&str> = snapshot.monitors.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["API", "Website", "Database", "Monitor 9"]);
        assert_eq!(snapshot.title, "Acme Status");
        assert_eq!(snapshot.timestamp_ms, 1_714_564_900_000);
    }

    #[test]
    fn test_heartbeats_convert_to_samples() {
        let snapshot = snapshot();
        let website = snapshot.get(1).unwrap();
        assert_eq!(website.group.as_deref(), Some("Services"));
        assert_eq!(website.url.as_deref(), Some("https://acme.test"));
        assert_eq!(website.uptime_24h, Some(0.5));
        assert_eq!(website.series.len(), 2);

        let first = &website.series.samples()[0];
        assert_eq!(first.status, Status::Up);
        assert_eq!(first.timestamp_ms, 1_714_564_800_000);
        assert_eq!(first.latency_ms, Some(42.0));
        assert_eq!(first.response_code(), Some(200));

        let latest = website.latest().unwrap();
        assert_eq!(latest.status, Status::Down);
        assert!(latest.latency_ms.is_none());
        assert_eq!(latest.response_code(), Some(503));
    }

    #[test]
    fn test_optional_fields() {
        let snapshot = snapshot();
        let api = snapshot.get(3).unwrap();
        assert_eq!(api.uptime_24h, Some(1.0));
        let beat = api.latest().unwrap();
        assert_eq!(beat.status, Status::Pending);
        assert!(beat.message.is_none());

        let db = snapshot.get(7).unwrap();
        assert!(db.series.is_empty());
        assert!(db.uptime_24h.is_none());
        assert_eq!(db.group.as_deref(), Some("Infra"));

        let unlisted = snapshot.get(9).unwrap();
        assert!(unlisted.group.is_none());
        assert_eq!(unlisted.latest().map(|s| s.status), Some(Status::Up));
    }

    #[test]
    fn test_malformed_time_fails_fast() {
        let page: PageResponse = serde_json::from_str(page_json()).unwrap();
        let beats: HeartbeatResponse = serde_json::from_str(
            r#"{ "heartbeatList": { "1": [ { "status": 1, "time": "yesterday-ish" } ] } }"#,
        )
        .unwrap();

        let err = build_snapshot(page, beats, 0).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidInput(_)));
        assert!(err.to_string().contains("monitor 1"));
    }

    #[test]
    fn test_non_numeric_monitor_id_is_rejected() {
        let page: PageResponse = serde_json::from_str(r#"{}"#).unwrap();
        let beats: HeartbeatResponse =
            serde_json::from_str(r#"{ "heartbeatList": { "abc": [] } }"#).unwrap();
        assert!(matches!(build_snapshot(page, beats, 0), Err(AdapterError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_heartbeat_time_formats() {
        assert_eq!(parse_heartbeat_time("1970-01-01 00:00:01").unwrap(), 1_000);
        assert_eq!(parse_heartbeat_time("1970-01-01 00:00:01.250").unwrap(), 1_250);
        assert_eq!(parse_heartbeat_time("1970-01-01T01:00:00+01:00").unwrap(), 0);
        assert!(parse_heartbeat_time("1969-12-31 23:59:59").is_err());
        assert!(parse_heartbeat_time("").is_err());
    }

    #[test]
    fn test_unknown_status_code() {
        assert_eq!(Status::from(StatusCodeValue::Code(42)), Status::Unknown);
        assert_eq!(Status::from(StatusCodeValue::Flag(false)), Status::Down);
    }
}
