//! JSON export of the dashboard state.

use std::path::Path;

use anyhow::Result;
use serde_json::{json, Value};
use statuswatch_types::{HistoryBucketizer, Status};

use super::MonitorData;

/// Build the export document: a per-status summary plus one entry per
/// monitor, including its history strip as status labels (`null` for
/// empty cells).
pub fn export_value(data: &MonitorData, bucketizer: &HistoryBucketizer) -> Value {
    let counts = data.counts();

    let mut summary = serde_json::Map::new();
    summary.insert("title".to_string(), json!(data.title));
    summary.insert("total_monitors".to_string(), json!(counts.total()));
    for status in Status::ALL {
        summary.insert(status.label().to_lowercase(), json!(counts.get(status)));
    }
    summary.insert("average_uptime".to_string(), json!(data.average_uptime()));
    summary.insert("collected_at_ms".to_string(), json!(data.collected_at_ms));

    let monitors: Vec<Value> = data
        .monitors
        .iter()
        .map(|m| {
            let history: Vec<Value> = m
                .strip(bucketizer)
                .iter()
                .map(|b| match b.sample() {
                    Some(s) => json!(s.status.label()),
                    None => Value::Null,
                })
                .collect();

            json!({
                "id": m.id,
                "name": m.name,
                "group": m.group,
                "url": m.url,
                "status": m.status.label(),
                "response_code": m.response_code,
                "latency_ms": m.latency_ms,
                "average_latency_ms": m.average_latency_ms,
                "uptime": m.uptime,
                "last_check_ms": m.last_check_ms,
                "message": m.message,
                "history": history,
            })
        })
        .collect();

    json!({
        "summary": Value::Object(summary),
        "monitors": monitors,
    })
}

/// Write the export document to `path` as pretty-printed JSON.
pub fn export_to_file(data: &MonitorData, bucketizer: &HistoryBucketizer, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&export_value(data, bucketizer))?;
    std::fs::write(path, json)?;
    Ok(())
}
