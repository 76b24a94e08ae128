//! # statuswatch
//!
//! A terminal dashboard and library for public status pages.
//!
//! This crate polls a status page, turns each poll into a
//! [`StatusSnapshot`](statuswatch_types::StatusSnapshot), and renders every
//! monitor with its latest state and a fixed-width history strip in an
//! interactive terminal UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(processing)   │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | FileSource | ChannelSource    │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, selection, sorting and filtering
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with implementations
//!   for HTTP polling, snapshot files, and channel-based input
//! - **[`data`]**: Converts snapshots into display rows ([`MonitorData`]) and exports them
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`settings`]**: Layered configuration (defaults, TOML file, environment, CLI)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a status page
//! statuswatch --url https://status.example.com/status/main
//!
//! # Base URL plus slug, polling every 30 seconds
//! statuswatch --url https://status.example.com --slug main --refresh 30s
//!
//! # Replay a saved snapshot
//! statuswatch --file snapshot.json
//! ```
//!
//! ### As a library with file source
//!
//! ```
//! use statuswatch::{App, FileSource, Thresholds};
//! use statuswatch_types::HistoryBucketizer;
//!
//! let source = Box::new(FileSource::new("snapshot.json"));
//! let app = App::new(source, Thresholds::default(), HistoryBucketizer::default());
//! ```
//!
//! ### As a library with HTTP polling
//!
//! ```no_run
//! use std::time::Duration;
//! use statuswatch::{App, HttpSource, Thresholds};
//! use statuswatch_adapters::uptime_kuma::UptimeKumaAdapter;
//! use statuswatch_types::HistoryBucketizer;
//!
//! # tokio_test::block_on(async {
//! let adapter = UptimeKumaAdapter::builder()
//!     .endpoint("https://status.example.com")
//!     .slug("main")
//!     .build()
//!     .unwrap();
//! let source = HttpSource::spawn(adapter, Duration::from_secs(60));
//! let app = App::new(Box::new(source), Thresholds::default(), HistoryBucketizer::default());
//! # });
//! ```
//!
//! ### As a library with channel source
//!
//! ```
//! use statuswatch::{App, ChannelSource, Thresholds};
//! use statuswatch_types::HistoryBucketizer;
//!
//! let (tx, source) = ChannelSource::create("embedded");
//! let app = App::new(Box::new(source), Thresholds::default(), HistoryBucketizer::default());
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{MonitorData, MonitorRow, StatusCounts, Thresholds};
pub use settings::{CliOverrides, Settings};
pub use source::{ChannelSource, DataSource, FileSource, HttpSource};
