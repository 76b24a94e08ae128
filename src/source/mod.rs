//! Data source abstraction for receiving status snapshots.
//!
//! This module provides a trait-based abstraction for receiving status page
//! data from various sources (live HTTP polling, snapshot files, or
//! in-memory channels).

mod channel;
mod file;
mod http;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use http::HttpSource;
pub use statuswatch_types::StatusSnapshot;

use std::fmt::Debug;

/// Trait for receiving status snapshots from various sources.
///
/// Every snapshot a source yields is complete: it replaces whatever the
/// previous one said about each monitor rather than adding to it.
///
/// # Example
///
/// ```
/// use statuswatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("status.json");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} monitors", snapshot.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<StatusSnapshot>;

    /// Ask the source to fetch fresh data as soon as possible.
    ///
    /// Sources that always read the latest data ignore this.
    fn refresh(&mut self) {}

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Returns the error message if an error occurred during the last poll.
    fn error(&self) -> Option<&str>;
}
