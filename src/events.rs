use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::App;

/// Where `e` writes the dashboard state.
const EXPORT_PATH: &str = "statuswatch_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.go_back();
            }
            // Step through monitors without closing the overlay
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::PageUp => app.select_prev_n(10),
            KeyCode::PageDown => app.select_next_n(10),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            KeyCode::Char('r') => app.refresh(),
            _ => {}
        }
        return;
    }

    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),

        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Enter => app.enter_detail(),
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('S') => app.toggle_sort_direction(),

        KeyCode::Char('/') => app.start_filter(),
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_PATH);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.cancel_filter(),

        // Keep text but exit input mode
        KeyCode::Esc => app.cancel_filter(),

        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.cancel_filter();
            }
        }

        KeyCode::Char(c) => app.filter_push(c),

        _ => {}
    }
}

/// Handle mouse events.
///
/// `content_start_row` is the terminal row of the table's top border.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) => {
            if app.show_help || app.show_detail_overlay {
                return;
            }
            // Skip the border and the header row
            let first_row = content_start_row.saturating_add(2);
            if mouse.row >= first_row {
                app.select_screen_row(usize::from(mouse.row - first_row));
            }
        }

        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use statuswatch_types::{HistoryBucketizer, Status, StatusSnapshot};

    use crate::data::Thresholds;
    use crate::source::ChannelSource;
    use crate::ui::Theme;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn loaded_app() -> App {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::with_theme(
            Box::new(source),
            Thresholds::default(),
            HistoryBucketizer::default(),
            Theme::dark(),
        );
        tx.send(Some(
            StatusSnapshot::builder()
                .monitor(1, "one", |m| m.sample(1, Status::Up, |s| s))
                .monitor(2, "two", |m| m.sample(1, Status::Down, |s| s))
                .monitor(3, "three", |m| m)
                .build(),
        ))
        .unwrap();
        app.reload_data();
        app
    }

    #[test]
    fn test_quit() {
        let mut app = loaded_app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_filter_mode_captures_keys() {
        let mut app = loaded_app();
        handle_key_event(&mut app, key(KeyCode::Char('/')));
        assert!(app.filter_active);

        // 'q' is text while filtering
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.running);
        assert_eq!(app.filter_text, "q");

        handle_key_event(&mut app, key(KeyCode::Backspace));
        assert!(!app.filter_active);
        assert!(app.filter_text.is_empty());

        handle_key_event(&mut app, key(KeyCode::Char('/')));
        handle_key_event(&mut app, key(KeyCode::Char('t')));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(!app.filter_active);
        assert_eq!(app.visible_monitors().len(), 2);

        handle_key_event(&mut app, key(KeyCode::Char('c')));
        assert_eq!(app.visible_monitors().len(), 3);
    }

    #[test]
    fn test_detail_overlay_keys() {
        let mut app = loaded_app();
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(app.show_detail_overlay);

        handle_key_event(&mut app, key(KeyCode::Down));
        assert_eq!(app.selected_index, 1);
        assert!(app.show_detail_overlay);

        handle_key_event(&mut app, key(KeyCode::Esc));
        assert!(!app.show_detail_overlay);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = loaded_app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_sort_keys() {
        let mut app = loaded_app();
        handle_key_event(&mut app, key(KeyCode::Char('s')));
        handle_key_event(&mut app, key(KeyCode::Char('S')));
        assert!(!app.sort_ascending);
        // Name, descending
        assert_eq!(app.selected_monitor().unwrap().name, "two");
    }

    #[test]
    fn test_mouse_click_selects_row() {
        let mut app = loaded_app();
        let click = |row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row,
            modifiers: KeyModifiers::NONE,
        };

        handle_mouse_event(&mut app, click(4), 1);
        assert_eq!(app.selected_index, 1);

        // Header row is ignored
        handle_mouse_event(&mut app, click(2), 1);
        assert_eq!(app.selected_index, 1);

        // Past the last row
        handle_mouse_event(&mut app, click(20), 1);
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_mouse_click_accounts_for_scroll() {
        let mut app = loaded_app();
        let click = |row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row,
            modifiers: KeyModifiers::NONE,
        };

        // Table scrolled so that "two" is the first row on screen
        app.table_offset = 1;
        handle_mouse_event(&mut app, click(3), 1);
        assert_eq!(app.selected_index, 1);

        handle_mouse_event(&mut app, click(4), 1);
        assert_eq!(app.selected_index, 2);

        // Rows below the data are still ignored
        handle_mouse_event(&mut app, click(5), 1);
        assert_eq!(app.selected_index, 2);
    }
}
