//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use statuswatch_types::HistoryBucketizer;
use tracing::debug;

use crate::data::export::export_to_file;
use crate::data::{MonitorData, MonitorRow, Thresholds};
use crate::source::DataSource;
use crate::ui::summary::sort_monitors_by;
use crate::ui::{SortColumn, Theme};

/// How long a status message stays in the status bar.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub data: Option<MonitorData>,
    pub load_error: Option<String>,
    pub thresholds: Thresholds,
    pub bucketizer: HistoryBucketizer,

    /// Position in the filtered and sorted table, not in `data.monitors`.
    pub selected_index: usize,
    /// First table row on screen, kept between frames by the renderer.
    pub table_offset: usize,

    pub sort_column: SortColumn,
    pub sort_ascending: bool,

    pub filter_text: String,
    pub filter_active: bool,

    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App, picking a theme from the terminal background.
    pub fn new(
        source: Box<dyn DataSource>,
        thresholds: Thresholds,
        bucketizer: HistoryBucketizer,
    ) -> Self {
        Self::with_theme(source, thresholds, bucketizer, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(
        source: Box<dyn DataSource>,
        thresholds: Thresholds,
        bucketizer: HistoryBucketizer,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            show_help: false,
            show_detail_overlay: false,
            source,
            data: None,
            load_error: None,
            thresholds,
            bucketizer,
            selected_index: 0,
            table_offset: 0,
            sort_column: SortColumn::default(),
            sort_ascending: true,
            filter_text: String::new(),
            filter_active: false,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Poll the data source for new data.
    ///
    /// A new snapshot replaces the current data entirely. A source error is
    /// recorded but the last good data stays on screen.
    ///
    /// Returns `true` if new data was received.
    pub fn reload_data(&mut self) -> bool {
        let snapshot = self.source.poll();
        self.load_error = self.source.error().map(str::to_string);

        let Some(snapshot) = snapshot else {
            return false;
        };

        let data = MonitorData::from_snapshot(snapshot);
        debug!(monitors = data.monitors.len(), "applied new snapshot");
        self.data = Some(data);
        self.clamp_selection();
        true
    }

    /// Ask the source for fresh data now, then pick up whatever is ready.
    pub fn refresh(&mut self) {
        self.source.refresh();
        self.reload_data();
        self.set_status_message("Refresh requested".to_string());
    }

    /// Monitors after filtering and sorting, paired with their index in
    /// `data.monitors`.
    pub fn visible_monitors(&self) -> Vec<(usize, &MonitorRow)> {
        let Some(ref data) = self.data else {
            return Vec::new();
        };
        let mut monitors: Vec<(usize, &MonitorRow)> = data
            .monitors
            .iter()
            .enumerate()
            .filter(|(_, m)| m.matches(&self.filter_text))
            .collect();
        sort_monitors_by(&mut monitors, self.sort_column, self.sort_ascending);
        monitors
    }

    fn visible_count(&self) -> usize {
        match self.data {
            Some(ref data) => data.monitors.iter().filter(|m| m.matches(&self.filter_text)).count(),
            None => 0,
        }
    }

    /// The monitor under the cursor.
    pub fn selected_monitor(&self) -> Option<&MonitorRow> {
        self.visible_monitors().get(self.selected_index).map(|(_, m)| *m)
    }

    fn clamp_selection(&mut self) {
        let max = self.visible_count().saturating_sub(1);
        self.selected_index = self.selected_index.min(max);
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.visible_count().saturating_sub(1);
        self.selected_index = self.selected_index.saturating_add(n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.selected_index = self.visible_count().saturating_sub(1);
    }

    /// Select a row by its position in the table, ignoring clicks past the end.
    pub fn select_row(&mut self, row: usize) {
        if row < self.visible_count() {
            self.selected_index = row;
        }
    }

    /// Select the row drawn `screen_row` lines below the table header.
    pub fn select_screen_row(&mut self, screen_row: usize) {
        self.select_row(self.table_offset.saturating_add(screen_row));
    }

    /// Open the detail overlay for the currently selected monitor.
    pub fn enter_detail(&mut self) {
        if self.selected_monitor().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Close the topmost overlay.
    pub fn go_back(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else {
            self.show_detail_overlay = false;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Cycle to the next sort column.
    pub fn cycle_sort(&mut self) {
        self.sort_column = self.sort_column.next();
    }

    /// Toggle sort direction between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        self.sort_ascending = !self.sort_ascending;
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.selected_index = 0;
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
        self.clamp_selection();
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref data) = self.data else {
            anyhow::bail!("No data to export");
        };
        export_to_file(data, &self.bucketizer, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statuswatch_types::{Status, StatusSnapshot};
    use tokio::sync::watch;

    use crate::source::ChannelSource;

    fn snapshot(title: &str) -> StatusSnapshot {
        StatusSnapshot::builder()
            .title(title)
            .monitor(1, "Website", |m| {
                m.group("Public").sample(1, Status::Up, |s| s.with_latency(20.0))
            })
            .monitor(2, "API", |m| {
                m.group("Public").sample(1, Status::Down, |s| s.with_latency(900.0))
            })
            .monitor(3, "Database", |m| {
                m.group("Internal").sample(1, Status::Up, |s| s.with_latency(3.0))
            })
            .build()
    }

    fn app() -> (watch::Sender<Option<StatusSnapshot>>, App) {
        let (tx, source) = ChannelSource::create("test");
        let app = App::with_theme(
            Box::new(source),
            Thresholds::default(),
            HistoryBucketizer::default(),
            Theme::dark(),
        );
        (tx, app)
    }

    #[test]
    fn test_reload_replaces_data() {
        let (tx, mut app) = app();
        assert!(!app.reload_data());
        assert!(app.data.is_none());

        tx.send(Some(snapshot("first"))).unwrap();
        assert!(app.reload_data());
        assert_eq!(app.data.as_ref().unwrap().title, "first");

        // Nothing new
        assert!(!app.reload_data());

        tx.send(Some(StatusSnapshot::builder().title("second").build())).unwrap();
        assert!(app.reload_data());
        let data = app.data.as_ref().unwrap();
        assert_eq!(data.title, "second");
        assert!(data.monitors.is_empty());
    }

    #[test]
    fn test_navigation_is_clamped() {
        let (tx, mut app) = app();
        tx.send(Some(snapshot("page"))).unwrap();
        app.reload_data();

        app.select_prev();
        assert_eq!(app.selected_index, 0);

        app.select_next_n(10);
        assert_eq!(app.selected_index, 2);

        app.select_first();
        app.select_last();
        assert_eq!(app.selected_index, 2);

        app.select_row(7);
        assert_eq!(app.selected_index, 2);
        app.select_row(1);
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_selection_follows_sort_and_filter() {
        let (tx, mut app) = app();
        tx.send(Some(snapshot("page"))).unwrap();
        app.reload_data();

        assert_eq!(app.selected_monitor().unwrap().name, "Website");

        app.cycle_sort(); // name
        assert_eq!(app.sort_column, SortColumn::Name);
        assert_eq!(app.selected_monitor().unwrap().name, "API");

        app.cycle_sort(); // status
        app.toggle_sort_direction();
        assert_eq!(app.selected_monitor().unwrap().status, Status::Down);

        app.start_filter();
        for c in "internal".chars() {
            app.filter_push(c);
        }
        let visible: Vec<&str> = app.visible_monitors().iter().map(|(_, m)| m.name.as_str()).collect();
        assert_eq!(visible, vec!["Database"]);

        app.clear_filter();
        assert_eq!(app.visible_monitors().len(), 3);
        assert!(!app.filter_active);
    }

    #[test]
    fn test_shrinking_snapshot_clamps_selection() {
        let (tx, mut app) = app();
        tx.send(Some(snapshot("page"))).unwrap();
        app.reload_data();
        app.select_last();

        tx.send(Some(
            StatusSnapshot::builder().monitor(9, "Only", |m| m).build(),
        ))
        .unwrap();
        app.reload_data();
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_monitor().unwrap().id, 9);
    }

    #[test]
    fn test_overlays() {
        let (tx, mut app) = app();
        app.enter_detail();
        assert!(!app.show_detail_overlay, "no data, no detail");

        tx.send(Some(snapshot("page"))).unwrap();
        app.reload_data();
        app.enter_detail();
        assert!(app.show_detail_overlay);

        app.toggle_help();
        app.go_back();
        assert!(!app.show_help);
        assert!(app.show_detail_overlay);
        app.go_back();
        assert!(!app.show_detail_overlay);
    }

    #[test]
    fn test_export_state() {
        let (tx, mut app) = app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        assert!(app.export_state(&path).is_err());

        tx.send(Some(snapshot("page"))).unwrap();
        app.reload_data();
        app.export_state(&path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["summary"]["total_monitors"], 3);
        assert_eq!(written["summary"]["down"], 1);
    }

    #[test]
    fn test_status_message_expires() {
        let (_tx, mut app) = app();
        app.set_status_message("hello".to_string());
        assert_eq!(app.get_status_message(), Some("hello"));

        app.status_message = Some(("old".to_string(), Instant::now() - Duration::from_secs(10)));
        assert!(app.get_status_message().is_none());
    }
}
