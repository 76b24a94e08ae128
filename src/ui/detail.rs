//! Detail overlay rendering.
//!
//! Displays a modal overlay with detailed information about the selected
//! monitor and its most recent heartbeats.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_latency;
use crate::ui::summary::{format_uptime, history_line};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 16;

/// Render the monitor detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(monitor) = app.selected_monitor() else {
        return;
    };

    let overlay_width = (area.width * 95 / 100).clamp(MIN_OVERLAY_WIDTH, 110);
    let overlay_height = (area.height * 90 / 100).clamp(MIN_OVERLAY_HEIGHT, 50);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(7), // Monitor info
        Constraint::Min(6),    // Heartbeats
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== HEADER SECTION =====
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let mut title = vec![Span::styled(format!(" {} ", monitor.name), bold)];
    if let Some(ref group) = monitor.group {
        title.push(Span::styled(format!("({})", group), dim));
    }

    let latency = |ms: Option<f64>| ms.map(format_latency).unwrap_or_else(|| "-".into());

    let mut header_lines = vec![
        Line::from(title),
        Line::from(vec![
            Span::raw(" Status: "),
            Span::styled(
                format!("{} {}", monitor.status.symbol(), monitor.status.label()),
                app.theme.status_style(monitor.status).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    Code: "),
            Span::styled(
                monitor.response_code.map(|c| c.to_string()).unwrap_or_else(|| "-".into()),
                bold,
            ),
            Span::raw("    Uptime (24h): "),
            Span::styled(monitor.uptime.map(format_uptime).unwrap_or_else(|| "-".into()), bold),
        ]),
        Line::from(vec![
            Span::raw(" Latency: "),
            Span::styled(latency(monitor.latency_ms), bold),
            Span::raw("    Average: "),
            Span::styled(latency(monitor.average_latency_ms), bold),
            Span::raw("    Heartbeats: "),
            Span::styled(monitor.series.len().to_string(), bold),
        ]),
        Line::from(vec![
            Span::raw(" URL: "),
            Span::styled(monitor.url.clone().unwrap_or_else(|| "-".into()), dim),
        ]),
    ];

    let mut history = vec![Span::raw(" History: ")];
    history.extend(history_line(&monitor.strip(&app.bucketizer), &app.theme).spans);
    header_lines.push(Line::from(history));

    let header_block = Block::default()
        .title(" Monitor Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(header_lines).block(header_block), chunks[0]);

    // ===== HEARTBEATS =====
    let block = Block::default()
        .title(format!(" Recent heartbeats ({}) ", monitor.series.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if monitor.series.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("  No heartbeats reported", dim)),
        ])
        .block(block);
        frame.render_widget(empty, chunks[1]);
    } else {
        // Borders and the header row take three lines
        let visible = usize::from(chunks[1].height.saturating_sub(3));

        let mut samples: Vec<_> = monitor.series.samples().iter().collect();
        samples.sort_by_key(|s| std::cmp::Reverse(s.timestamp_ms));

        let rows: Vec<Row> = samples
            .into_iter()
            .take(visible)
            .map(|s| {
                Row::new(vec![
                    Cell::from(format_timestamp(s.timestamp_ms)),
                    Cell::from(s.status.symbol()).style(app.theme.status_style(s.status)),
                    Cell::from(latency(s.latency_ms)),
                    Cell::from(s.message.clone().unwrap_or_default()),
                ])
            })
            .collect();

        let header = Row::new(vec![
            Cell::from("Time"),
            Cell::from("Status"),
            Cell::from("Latency"),
            Cell::from("Message"),
        ])
        .height(1)
        .style(app.theme.header);

        let widths = [
            Constraint::Length(20), // Time
            Constraint::Length(7),  // Status
            Constraint::Length(9),  // Latency
            Constraint::Fill(1),    // Message
        ];

        let table = Table::new(rows, widths).header(header).block(block);
        frame.render_widget(table, chunks[1]);
    }

    // ===== FOOTER =====
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " ↑↓:previous/next monitor  Esc:close ",
        dim,
    )]));
    frame.render_widget(footer, chunks[2]);
}

/// Render an epoch-millisecond timestamp in local time.
pub fn format_timestamp(timestamp_ms: u64) -> String {
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_shape() {
        let formatted = format_timestamp(1_700_000_000_000);
        assert_eq!(formatted.len(), "2023-11-14 22:13:20".len());
        assert!(formatted.starts_with("2023-11-1"));
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(u64::MAX), "-");
    }
}
