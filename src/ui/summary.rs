//! Summary view rendering.
//!
//! Displays a table of all monitors with their current status, latency,
//! uptime and a bucketed history strip.

use std::cmp::Ordering;

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use statuswatch_types::Bucket;

use crate::app::App;
use crate::data::duration::{format_ago, format_latency, now_ms};
use crate::data::MonitorRow;
use crate::ui::Theme;

/// Glyph for a history cell backed by a heartbeat.
const FILLED_CELL: &str = "■";
/// Glyph for a history cell with nothing behind it.
const EMPTY_CELL: &str = "·";

/// Column to sort by in the Summary view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Keep the order the status page lists monitors in.
    #[default]
    Page,
    Name,
    /// Sort by status severity.
    Status,
    Latency,
    Uptime,
}

impl SortColumn {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        match self {
            SortColumn::Page => SortColumn::Name,
            SortColumn::Name => SortColumn::Status,
            SortColumn::Status => SortColumn::Latency,
            SortColumn::Latency => SortColumn::Uptime,
            SortColumn::Uptime => SortColumn::Page,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortColumn::Page => "page",
            SortColumn::Name => "name",
            SortColumn::Status => "status",
            SortColumn::Latency => "latency",
            SortColumn::Uptime => "uptime",
        }
    }
}

/// Render the Summary view showing all monitors in a sortable table.
///
/// Stores the scroll offset ratatui settles on back into `app.table_offset`.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    let monitors = app.visible_monitors();
    let now = now_ms();

    let header = Row::new(vec![
        Cell::from(format_header("Monitor", SortColumn::Name, app)),
        Cell::from("Group"),
        Cell::from(format_header("Status", SortColumn::Status, app)),
        Cell::from("Code"),
        Cell::from(format_header("Latency", SortColumn::Latency, app)),
        Cell::from(format_header("Uptime", SortColumn::Uptime, app)),
        Cell::from("Checked"),
        Cell::from("History"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = monitors
        .iter()
        .map(|(_, m)| {
            let latency = match m.latency_ms {
                Some(ms) => Cell::from(format_latency(ms))
                    .style(app.theme.latency_style(app.thresholds.latency_level(ms))),
                None => Cell::from("-"),
            };
            let uptime = match m.uptime {
                Some(ratio) => Cell::from(format_uptime(ratio)).style(app.theme.uptime_style(ratio)),
                None => Cell::from("-"),
            };

            Row::new(vec![
                Cell::from(m.name.clone()),
                Cell::from(m.group.clone().unwrap_or_default()),
                Cell::from(m.status.symbol()).style(app.theme.status_style(m.status)),
                Cell::from(m.response_code.map(|c| c.to_string()).unwrap_or_else(|| "-".into())),
                latency,
                uptime,
                Cell::from(m.since_last_check(now).map(format_ago).unwrap_or_else(|| "never".into())),
                Cell::from(history_line(&m.strip(&app.bucketizer), &app.theme)),
            ])
        })
        .collect();

    let strip_width = u16::try_from(app.bucketizer.bucket_count()).unwrap_or(u16::MAX);
    let widths = [
        Constraint::Fill(3),     // Monitor
        Constraint::Fill(2),     // Group
        Constraint::Length(6),   // Status
        Constraint::Length(5),   // Code
        Constraint::Length(9),   // Latency
        Constraint::Length(8),   // Uptime
        Constraint::Length(10),  // Checked
        Constraint::Length(strip_width.max(7)),
    ];

    let selected = app.selected_index.min(monitors.len().saturating_sub(1));

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let position_info = if !monitors.is_empty() {
        format!(" [{}/{}]", selected + 1, monitors.len())
    } else {
        String::new()
    };

    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };
    let title = format!(
        " Monitors ({}/{}) [s:sort {}{}]{}{} ",
        monitors.len(),
        data.monitors.len(),
        app.sort_column.label(),
        sort_dir,
        filter_info,
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let has_rows = !monitors.is_empty();
    let mut state = TableState::default().with_offset(app.table_offset);
    if has_rows {
        state.select(Some(selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
    app.table_offset = state.offset();
}

fn format_header(name: &str, col: SortColumn, app: &App) -> Span<'static> {
    if app.sort_column == col {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}

/// One colored cell per bucket, oldest on the left.
pub fn history_line(strip: &[Bucket<'_>], theme: &Theme) -> Line<'static> {
    let spans: Vec<Span> = strip
        .iter()
        .map(|bucket| match bucket.sample() {
            Some(sample) => Span::styled(
                FILLED_CELL,
                Style::default().fg(theme.status_color(sample.status)),
            ),
            None => Span::styled(EMPTY_CELL, theme.empty_style()),
        })
        .collect();
    Line::from(spans)
}

pub fn format_uptime(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Sort monitors by the given column and direction.
///
/// Ties fall back to page order so the table doesn't jump between polls.
pub fn sort_monitors_by(monitors: &mut [(usize, &MonitorRow)], column: SortColumn, ascending: bool) {
    let directed = |o: Ordering| if ascending { o } else { o.reverse() };

    monitors.sort_by(|a, b| {
        let primary = match column {
            SortColumn::Page => Ordering::Equal,
            SortColumn::Name => directed(a.1.name.to_lowercase().cmp(&b.1.name.to_lowercase())),
            SortColumn::Status => directed(a.1.status.severity().cmp(&b.1.status.severity())),
            SortColumn::Latency => cmp_missing_last(a.1.latency_ms, b.1.latency_ms, ascending),
            SortColumn::Uptime => cmp_missing_last(a.1.uptime, b.1.uptime, ascending),
        };

        if primary != Ordering::Equal {
            return primary;
        }
        if column == SortColumn::Page {
            directed(a.0.cmp(&b.0))
        } else {
            a.0.cmp(&b.0)
        }
    });
}

/// Monitors without a value stay at the bottom in either direction.
fn cmp_missing_last(a: Option<f64>, b: Option<f64>, ascending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if ascending => a.total_cmp(&b),
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
