use crate::app::App;
use crate::event::Key;

pub fn handler(key: Key, app: &mut App) {
  if let Key::Char('V') = key {
    let next = app.user_config.behavior.visualizer_style.next();
    app.user_config.behavior.visualizer_style = next;
    let _ = app.user_config.save_config();
  }
}
