use super::common_key_events;
use crate::app::{ActiveBlock, App, RouteId};
use crate::event::Key;

pub fn handler(key: Key, app: &mut App) {
  match key {
    k if common_key_events::right_event(k) => common_key_events::handle_right_event(app),
    k if common_key_events::down_event(k) => {
      let next_index = common_key_events::on_down_press_handler(
        &app.saved_playlist_names,
        app.selected_playlist_index,
      );
      if !app.saved_playlist_names.is_empty() {
        app.selected_playlist_index = Some(next_index);
      }
    }
    k if common_key_events::up_event(k) => {
      let next_index = common_key_events::on_up_press_handler(
        &app.saved_playlist_names,
        app.selected_playlist_index,
      );
      if !app.saved_playlist_names.is_empty() {
        app.selected_playlist_index = Some(next_index);
      }
    }
    k if common_key_events::high_event(k) => {
      if !app.saved_playlist_names.is_empty() {
        app.selected_playlist_index = Some(common_key_events::on_high_press_handler());
      }
    }
    k if common_key_events::middle_event(k) => {
      if !app.saved_playlist_names.is_empty() {
        app.selected_playlist_index = Some(common_key_events::on_middle_press_handler(
          &app.saved_playlist_names,
        ));
      }
    }
    k if common_key_events::low_event(k) => {
      if !app.saved_playlist_names.is_empty() {
        app.selected_playlist_index = Some(common_key_events::on_low_press_handler(
          &app.saved_playlist_names,
        ));
      }
    }
    Key::Enter => {
      if let Some(name) = selected_playlist_name(app) {
        app.load_saved_playlist(&name);
      } else {
        app.set_status("Please select a playlist to load.");
      }
    }
    Key::Char('D') => {
      if let Some(name) = selected_playlist_name(app) {
        app.dialog = Some(name);
        app.confirm = false;
        app.push_navigation_stack(RouteId::Dialog, ActiveBlock::Dialog);
      } else {
        app.set_status("Please select a playlist to delete.");
      }
    }
    _ => {}
  }
}

fn selected_playlist_name(app: &App) -> Option<String> {
  let index = app.selected_playlist_index?;
  app.saved_playlist_names.get(index).cloned()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn delete_key_opens_the_confirm_dialog() {
    let mut app = App::default();
    app.session = Some("alice".to_string());
    app.saved_playlist_names = vec!["mix".to_string()];
    app.selected_playlist_index = Some(0);

    handler(Key::Char('D'), &mut app);
    assert_eq!(app.dialog.as_deref(), Some("mix"));
    assert!(!app.confirm);
    assert_eq!(app.get_current_route().id, RouteId::Dialog);
  }

  #[test]
  fn delete_without_selection_is_a_status_message() {
    let mut app = App::default();
    handler(Key::Char('D'), &mut app);
    assert!(app.dialog.is_none());
    assert!(app.status_message.is_some());
  }
}
