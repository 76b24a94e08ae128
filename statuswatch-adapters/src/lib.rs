//! # statuswatch-adapters
//!
//! Collectors that read public status pages and convert them into
//! statuswatch snapshots.
//!
//! ## Supported Systems
//!
//! - **Uptime Kuma** (`uptime-kuma` feature, on by default) - Reads monitor
//!   groups, heartbeats and 24h uptime from a public status page
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use statuswatch_adapters::uptime_kuma::UptimeKumaAdapter;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = UptimeKumaAdapter::builder()
//!         .endpoint("https://status.example.com")
//!         .slug("main")
//!         .timeout(Duration::from_secs(5))
//!         .build()?;
//!
//!     let snapshot = adapter.collect().await?;
//!
//!     println!("Collected {} monitors", snapshot.monitors.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod page_url;

#[cfg(feature = "uptime-kuma")]
pub mod uptime_kuma;

pub use error::AdapterError;
pub use page_url::StatusPageUrl;

// Re-export types for convenience
pub use statuswatch_types::{Monitor, Sample, Series, Status, StatusSnapshot};
