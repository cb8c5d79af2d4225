use super::common_key_events;
use crate::app::App;
use crate::event::Key;

pub fn handler(key: Key, app: &mut App) {
  match key {
    k if common_key_events::down_event(k) => {
      app.lyrics_scroll = app.lyrics_scroll.saturating_add(1);
    }
    k if common_key_events::up_event(k) => {
      app.lyrics_scroll = app.lyrics_scroll.saturating_sub(1);
    }
    Key::PageDown | Key::Ctrl('d') => {
      app.lyrics_scroll = app.lyrics_scroll.saturating_add(10);
    }
    Key::PageUp | Key::Ctrl('u') => {
      app.lyrics_scroll = app.lyrics_scroll.saturating_sub(10);
    }
    _ => {}
  }
}
