//! Common UI components.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use statuswatch_types::Status;

use crate::app::App;
use crate::data::duration::format_ago;
use crate::ui::summary::format_uptime;

/// Render the header bar with the page overview.
///
/// Displays: overall status dot, page title, monitor counts by status,
/// average uptime.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        let line = Line::from(vec![
            Span::styled(" STATUSWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let counts = data.counts();
    let dot_style = match counts.worst() {
        Some(status) => app.theme.status_style(status),
        None => Style::default().add_modifier(Modifier::DIM),
    };

    let title = if data.title.is_empty() { "STATUSWATCH" } else { data.title.as_str() };

    let mut spans = vec![
        Span::styled(" ● ", dot_style),
        Span::styled(format!("{} ", title), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│"),
    ];

    for status in Status::ALL {
        let n = counts.get(status);
        let style = if n > 0 {
            app.theme.status_style(status)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(n.to_string(), style));
        spans.push(Span::raw(format!(" {}", status.label().to_lowercase())));
    }

    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        counts.total().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw(" monitors"));

    if let Some(uptime) = data.average_uptime() {
        spans.push(Span::raw(" │ avg uptime "));
        spans.push(Span::styled(format_uptime(uptime), app.theme.uptime_style(uptime)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows: data source, time since last update, available controls.
/// Temporary status messages and fetch errors take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = if app.filter_active {
        "Type to search | Enter:apply Esc:cancel"
    } else {
        "/:search s:sort r:refresh Enter:detail ?:help q:quit"
    };

    let (status, style) = match (&app.data, &app.load_error) {
        (Some(data), Some(err)) => (
            format!(
                " {} | Updated {} | Error: {} | {}",
                app.source_description(),
                format_ago(data.last_updated.elapsed()),
                err,
                controls
            ),
            Style::default().fg(app.theme.down),
        ),
        (Some(data), None) => (
            format!(
                " {} | Updated {} | {}",
                app.source_description(),
                format_ago(data.last_updated.elapsed()),
                controls
            ),
            Style::default().add_modifier(Modifier::DIM),
        ),
        (None, Some(err)) => (
            format!(" Error: {} | q:quit r:retry", err),
            Style::default().fg(app.theme.down),
        ),
        (None, None) => (
            format!(" {} | Loading... | q:quit", app.source_description()),
            Style::default().add_modifier(Modifier::DIM),
        ),
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |name: &'static str| {
        Line::from(vec![Span::styled(name, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Monitor detail"),
        Line::from("  Esc         Close overlay"),
        Line::from(""),
        section(" Table"),
        Line::from("  /         Start filter/search"),
        Line::from("  c         Clear filter"),
        Line::from("  s         Cycle sort column"),
        Line::from("  S         Toggle sort direction"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Refresh now"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 23u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
