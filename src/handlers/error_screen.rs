use crate::app::App;
use crate::event::Key;

pub fn handler(key: Key, app: &mut App) {
  if let Key::Esc = key {
    app.pop_navigation_stack();
  }
}
