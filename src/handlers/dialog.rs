use super::common_key_events;
use crate::app::App;
use crate::event::Key;

pub fn handler(key: Key, app: &mut App) {
  match key {
    Key::Enter => {
      if app.confirm {
        if let Some(name) = app.dialog.clone() {
          app.delete_saved_playlist(&name);
        }
      }
      close_dialog(app);
    }
    Key::Char('q') => {
      close_dialog(app);
    }
    k if common_key_events::right_event(k) => app.confirm = !app.confirm,
    k if common_key_events::left_event(k) => app.confirm = !app.confirm,
    _ => {}
  }
}

fn close_dialog(app: &mut App) {
  app.pop_navigation_stack();
  app.dialog = None;
  app.confirm = false;
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::app::{ActiveBlock, RouteId};

  #[test]
  fn confirmation_dialog_toggles_with_vim_hl() {
    let mut app = App::default();
    app.push_navigation_stack(RouteId::Dialog, ActiveBlock::Dialog);
    app.confirm = false;

    handler(Key::Char('l'), &mut app);
    assert!(app.confirm);

    handler(Key::Char('h'), &mut app);
    assert!(!app.confirm);
  }

  #[test]
  fn declining_keeps_the_playlist() {
    let mut app = App::default();
    app.dialog = Some("mix".to_string());
    app.push_navigation_stack(RouteId::Dialog, ActiveBlock::Dialog);

    handler(Key::Enter, &mut app);
    assert!(app.dialog.is_none());
    assert_ne!(app.get_current_route().id, RouteId::Dialog);
  }
}
