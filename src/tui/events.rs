//! Event polling and key handling for the dashboard.

use super::app::DashboardApp;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;

/// Application event
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal tick
    Tick,
    /// Resize event
    Resize(u16, u16),
}

/// Polls crossterm events with a tick fallback.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    #[must_use]
    pub const fn new(tick_rate: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate),
        }
    }

    /// Poll for the next event.
    pub fn next(&self) -> Result<Event, std::io::Error> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}

/// Handle a key event and update app state.
pub fn handle_key_event(app: &mut DashboardApp, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // The detail overlay swallows everything except close keys
    if app.show_detail {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.show_detail = false,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Home | KeyCode::Char('g') => app.go_first(),
        KeyCode::End | KeyCode::Char('G') => app.go_last(),

        KeyCode::Right | KeyCode::Char('l') => app.scroll_cols_right(),
        KeyCode::Left | KeyCode::Char('h') => app.scroll_cols_left(),

        KeyCode::Char('f') => app.toggle_service_filter(),
        KeyCode::Char('c') => app.toggle_hidden_columns(),
        KeyCode::Char('s') => app.cycle_sort_column(),
        KeyCode::Char('S') | KeyCode::Char('d') => app.flip_sort_direction(),
        KeyCode::Esc => app.clear_sort(),

        KeyCode::Enter => app.toggle_detail(),
        _ => {}
    }
}
