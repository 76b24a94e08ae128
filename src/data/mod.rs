//! Data models and processing for status snapshots.
//!
//! This module handles the transformation of raw status snapshots into
//! structured rows suitable for display.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing of duration strings (e.g., "30s", "500ms") and
//!   formatting of latencies and check ages
//! - [`export`]: JSON export of the current dashboard state
//! - [`monitor`]: Display models ([`MonitorData`], [`MonitorRow`], [`StatusCounts`])
//!
//! ## Data Flow
//!
//! ```text
//! StatusSnapshot (one complete poll)
//!        │
//!        ▼
//! MonitorData::from_snapshot()
//!        │
//!        └──▶ MonitorRow (latest status, latency, uptime, series)
//!                  │
//!                  └──▶ MonitorRow::strip() ──▶ HistoryBucketizer (history cells)
//! ```

pub mod duration;
pub mod export;
pub mod monitor;

pub use monitor::{LatencyLevel, MonitorData, MonitorRow, StatusCounts, Thresholds};
