//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;
use statuswatch_types::Status;

use crate::data::LatencyLevel;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    pub up: Color,
    pub down: Color,
    pub pending: Color,
    pub maintenance: Color,
    pub unknown: Color,
    /// Color for history cells with no heartbeat behind them.
    pub empty: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            up: Color::Green,
            down: Color::Red,
            pending: Color::Yellow,
            maintenance: Color::Blue,
            unknown: Color::Gray,
            empty: Color::DarkGray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            up: Color::Green,
            down: Color::Red,
            pending: Color::Yellow,
            maintenance: Color::Blue,
            unknown: Color::DarkGray,
            empty: Color::Gray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Up => self.up,
            Status::Down => self.down,
            Status::Pending => self.pending,
            Status::Maintenance => self.maintenance,
            Status::Unknown => self.unknown,
        }
    }

    /// Get style for a monitor status
    pub fn status_style(&self, status: Status) -> Style {
        let style = Style::default().fg(self.status_color(status));
        if status.is_failure() {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn latency_style(&self, level: LatencyLevel) -> Style {
        match level {
            LatencyLevel::Normal => Style::default(),
            LatencyLevel::Slow => Style::default().fg(self.pending),
            LatencyLevel::VerySlow => Style::default().fg(self.down).add_modifier(Modifier::BOLD),
        }
    }

    /// Style for an uptime ratio in `[0, 1]`.
    pub fn uptime_style(&self, ratio: f64) -> Style {
        if ratio >= 0.99 {
            Style::default().fg(self.up)
        } else if ratio >= 0.95 {
            Style::default().fg(self.pending)
        } else {
            Style::default().fg(self.down)
        }
    }

    pub fn empty_style(&self) -> Style {
        Style::default().fg(self.empty).add_modifier(Modifier::DIM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_has_distinct_color() {
        let theme = Theme::dark();
        let mut colors: Vec<Color> = Status::ALL.iter().map(|s| theme.status_color(*s)).collect();
        colors.sort_by_key(|c| format!("{:?}", c));
        colors.dedup();
        assert_eq!(colors.len(), Status::ALL.len());
    }

    #[test]
    fn test_failures_are_bold() {
        let theme = Theme::light();
        assert!(theme.status_style(Status::Down).add_modifier.contains(Modifier::BOLD));
        assert!(!theme.status_style(Status::Up).add_modifier.contains(Modifier::BOLD));
    }
}
