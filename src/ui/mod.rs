//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`summary`]: Monitor table with status, latency, uptime and history strips
//! - [`detail`]: Modal overlay with one monitor's recent heartbeats
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ Monitor table (summary::render)      │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod common;
pub mod detail;
pub mod summary;
pub mod theme;

pub use summary::SortColumn;
pub use theme::Theme;
