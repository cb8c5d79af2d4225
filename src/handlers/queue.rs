use super::common_key_events;
use crate::app::App;
use crate::event::Key;

pub fn handler(key: Key, app: &mut App) {
  match key {
    k if common_key_events::left_event(k) => common_key_events::handle_left_event(app),
    k if common_key_events::down_event(k) => {
      let next_index =
        common_key_events::on_down_press_handler(&app.queue, Some(app.selected_queue_index));
      app.selected_queue_index = next_index;
    }
    k if common_key_events::up_event(k) => {
      let next_index =
        common_key_events::on_up_press_handler(&app.queue, Some(app.selected_queue_index));
      app.selected_queue_index = next_index;
    }
    k if common_key_events::high_event(k) => {
      if !app.queue.is_empty() {
        app.selected_queue_index = common_key_events::on_high_press_handler();
      }
    }
    k if common_key_events::middle_event(k) => {
      if !app.queue.is_empty() {
        app.selected_queue_index = common_key_events::on_middle_press_handler(&app.queue);
      }
    }
    k if common_key_events::low_event(k) => {
      if !app.queue.is_empty() {
        app.selected_queue_index = common_key_events::on_low_press_handler(&app.queue);
      }
    }
    Key::Enter => {
      if !app.queue.is_empty() {
        let index = app.selected_queue_index.min(app.queue.len() - 1);
        app.play_track_at(index);
      }
    }
    k if k == app.user_config.keys.move_track_up => {
      let index = app.selected_queue_index;
      if index > 0 {
        app.move_track(index, index - 1);
      }
    }
    k if k == app.user_config.keys.move_track_down => {
      let index = app.selected_queue_index;
      if index + 1 < app.queue.len() {
        app.move_track(index, index + 1);
      }
    }
    _ => {}
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::{next_track_key, Track};

  fn track(title: &str) -> Track {
    Track {
      key: next_track_key(),
      title: title.to_string(),
      artist: "Artist".to_string(),
      preview_url: String::new(),
      artwork_url: String::new(),
    }
  }

  #[test]
  fn selection_wraps_around() {
    let mut app = App::default();
    app.queue = vec![track("a"), track("b")];
    app.selected_queue_index = 1;

    handler(Key::Char('j'), &mut app);
    assert_eq!(app.selected_queue_index, 0);

    handler(Key::Char('k'), &mut app);
    assert_eq!(app.selected_queue_index, 1);
  }

  #[test]
  fn reorder_keys_move_the_selected_track() {
    let mut app = App::default();
    app.queue = vec![track("a"), track("b"), track("c")];
    app.selected_queue_index = 1;

    handler(Key::Char('J'), &mut app);
    let titles: Vec<&str> = app.queue.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "c", "b"]);
    assert_eq!(app.selected_queue_index, 2);

    handler(Key::Char('K'), &mut app);
    let titles: Vec<&str> = app.queue.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
    assert_eq!(app.selected_queue_index, 1);
  }

  #[test]
  fn enter_plays_the_selected_track() {
    let mut app = App::default();
    app.queue = vec![track("a"), track("b")];
    app.selected_queue_index = 1;

    handler(Key::Enter, &mut app);
    assert_eq!(app.playing_index(), Some(1));
  }
}
