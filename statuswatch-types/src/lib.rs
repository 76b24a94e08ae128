//! # statuswatch-types
//!
//! Core types for status page monitoring. This crate defines the data model
//! shared by the statuswatch collectors and dashboard: heartbeat samples,
//! per-monitor series, whole-page snapshots, and the downsampling used to
//! draw fixed-width history strips.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature for JSON snapshots
//! - **Replace, don't append**: A [`Series`] is rebuilt every polling cycle
//! - **Fixed-width history**: [`HistoryBucketizer`] always yields the same number of cells
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: Serialization of snapshots via serde
//!
//! ## Example
//!
//! ```rust
//! use statuswatch_types::{HistoryBucketizer, Status, StatusSnapshot};
//!
//! let snapshot = StatusSnapshot::builder()
//!     .title("Acme Status")
//!     .monitor(1, "api", |m| {
//!         m.sample(1_000, Status::Up, |s| s.with_latency(40.0))
//!             .sample(2_000, Status::Down, |s| s.with_message("502 - Bad Gateway"))
//!     })
//!     .build();
//!
//! let strip = HistoryBucketizer::default().bucketize(snapshot.monitors[0].series.samples());
//! assert_eq!(strip.len(), 24);
//! assert_eq!(strip[23].sample().and_then(|s| s.response_code()), Some(502));
//! ```
//!
//! ## Schema Version
//!
//! The current schema version is **1**.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod history;
mod sample;
mod snapshot;
mod status;

pub use history::*;
pub use sample::*;
pub use snapshot::*;
pub use status::*;

/// Current schema version.
///
/// Increment this when making breaking changes to the snapshot format.
pub const SCHEMA_VERSION: u32 = 1;
