use crate::app::{ActiveBlock, App, InputPurpose};
use crate::event::Key;
use crate::network::IoEvent;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// Handle event when the search input block is active
pub fn handler(key: Key, app: &mut App) {
  match key {
    Key::Ctrl('k') => {
      app.input.drain(app.input_idx..app.input.len());
    }
    Key::Ctrl('u') => {
      app.input.drain(..app.input_idx);
      app.input_idx = 0;
      app.input_cursor_position = 0;
    }
    Key::Ctrl('l') => {
      app.input = vec![];
      app.input_idx = 0;
      app.input_cursor_position = 0;
    }
    Key::Ctrl('w') => {
      if app.input_cursor_position == 0 {
        return;
      }
      let word_end = match app.input[..app.input_idx]
        .iter()
        .rposition(|&x| x != ' ')
      {
        Some(index) => index + 1,
        None => 0,
      };
      let word_start = match app.input[..word_end].iter().rposition(|&x| x == ' ') {
        Some(index) => index + 1,
        None => 0,
      };
      let deleted: String = app.input[word_start..app.input_idx].iter().collect();
      let deleted_len = UnicodeWidthStr::width(deleted.as_str()) as u16;
      app.input.drain(word_start..app.input_idx);
      app.input_idx = word_start;
      app.input_cursor_position -= deleted_len;
    }
    Key::Ctrl('e') => {
      app.input_idx = app.input.len();
      let input_string: String = app.input.iter().collect();
      app.input_cursor_position = UnicodeWidthStr::width(input_string.as_str()) as u16;
    }
    Key::Ctrl('a') => {
      app.input_idx = 0;
      app.input_cursor_position = 0;
    }
    Key::Left | Key::Ctrl('b') => {
      if !app.input.is_empty() && app.input_idx > 0 {
        let last_c = app.input[app.input_idx - 1];
        app.input_idx -= 1;
        app.input_cursor_position -= compute_character_width(last_c);
      }
    }
    Key::Right | Key::Ctrl('f') => {
      if app.input_idx < app.input.len() {
        let next_c = app.input[app.input_idx];
        app.input_idx += 1;
        app.input_cursor_position += compute_character_width(next_c);
      }
    }
    Key::Esc => {
      app.set_current_route_state(Some(ActiveBlock::Queue), Some(ActiveBlock::Queue));
    }
    k if k == app.user_config.keys.submit => {
      process_input(app);
    }
    Key::Char(c) => {
      app.input.insert(app.input_idx, c);
      app.input_idx += 1;
      app.input_cursor_position += compute_character_width(c);
    }
    Key::Backspace | Key::Ctrl('h') => {
      if !app.input.is_empty() && app.input_idx > 0 {
        let last_c = app.input.remove(app.input_idx - 1);
        app.input_idx -= 1;
        app.input_cursor_position -= compute_character_width(last_c);
      }
    }
    Key::Delete | Key::Ctrl('d') => {
      if !app.input.is_empty() && app.input_idx < app.input.len() {
        app.input.remove(app.input_idx);
      }
    }
    _ => {}
  }
}

fn process_input(app: &mut App) {
  let input: String = app.input.iter().collect::<String>().trim().to_string();

  match app.input_purpose {
    InputPurpose::Search => {
      if input.is_empty() {
        return;
      }
      app.search_generation += 1;
      let generation = app.search_generation;
      app.dispatch(IoEvent::SearchTracks(input, generation));
      app.set_current_route_state(Some(ActiveBlock::Queue), Some(ActiveBlock::Queue));
    }
    InputPurpose::CreatePlaylist => {
      if input.is_empty() {
        app.set_status("Please enter a valid playlist name.");
        return;
      }
      app.create_saved_playlist(&input);
      clear_input(app);
      app.set_current_route_state(Some(ActiveBlock::Playlists), Some(ActiveBlock::Playlists));
    }
    InputPurpose::SavePlaylist => {
      if input.is_empty() {
        app.set_status("Please enter a name to save the current playlist.");
        return;
      }
      app.save_queue_as(&input);
      clear_input(app);
      app.set_current_route_state(Some(ActiveBlock::Playlists), Some(ActiveBlock::Playlists));
    }
  }
}

fn clear_input(app: &mut App) {
  app.input = vec![];
  app.input_idx = 0;
  app.input_cursor_position = 0;
}

fn compute_character_width(character: char) -> u16 {
  UnicodeWidthChar::width(character)
    .unwrap()
    .try_into()
    .unwrap()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn str_to_vec_char(s: &str) -> Vec<char> {
    String::from(s).chars().collect()
  }

  #[test]
  fn test_input_handler_clear_input_on_ctrl_l() {
    let mut app = App::default();

    app.input = str_to_vec_char("My text");

    handler(Key::Ctrl('l'), &mut app);

    assert_eq!(app.input, str_to_vec_char(""));
  }

  #[test]
  fn test_input_handler_ctrl_u() {
    let mut app = App::default();

    app.input = str_to_vec_char("My text");
    handler(Key::Ctrl('u'), &mut app);
    assert_eq!(app.input, str_to_vec_char("My text"));

    app.input_idx = 3;
    app.input_cursor_position = 3;
    handler(Key::Ctrl('u'), &mut app);
    assert_eq!(app.input, str_to_vec_char("text"));
  }

  #[test]
  fn test_input_handler_ctrl_w() {
    let mut app = App::default();

    app.input = str_to_vec_char("My text");
    app.input_idx = 3;
    app.input_cursor_position = 3;
    handler(Key::Ctrl('w'), &mut app);
    assert_eq!(app.input, str_to_vec_char("text"));
  }

  #[test]
  fn test_input_handler_esc_back_to_queue() {
    let mut app = App::default();

    app.set_current_route_state(Some(ActiveBlock::Input), None);
    handler(Key::Esc, &mut app);

    let current_route = app.get_current_route();
    assert_eq!(current_route.active_block, ActiveBlock::Queue);
  }

  #[test]
  fn test_input_handler_on_enter_text() {
    let mut app = App::default();

    app.input = str_to_vec_char("My tracks");
    app.input_purpose = InputPurpose::Search;

    handler(Key::Enter, &mut app);
    // Search submission bumps the generation and leaves the input block
    assert_eq!(app.search_generation, 1);
    assert_eq!(app.get_current_route().active_block, ActiveBlock::Queue);
  }

  #[test]
  fn test_input_handler_key_event() {
    let mut app = App::default();

    handler(Key::Char('m'), &mut app);
    handler(Key::Char('y'), &mut app);

    assert_eq!(app.input, str_to_vec_char("my"));
    assert_eq!(app.input_idx, 2);
    assert_eq!(app.input_cursor_position, 2);
  }

  #[test]
  fn test_input_handler_backspace() {
    let mut app = App::default();

    app.input = str_to_vec_char("My text");
    app.input_idx = 4;
    app.input_cursor_position = 4;

    handler(Key::Backspace, &mut app);
    assert_eq!(app.input, str_to_vec_char("My ext"));
    assert_eq!(app.input_idx, 3);
    assert_eq!(app.input_cursor_position, 3);

    // Ctrl-H is the same as Backspace
    handler(Key::Ctrl('h'), &mut app);
    assert_eq!(app.input, str_to_vec_char("Myext"));
    assert_eq!(app.input_idx, 2);
    assert_eq!(app.input_cursor_position, 2);
  }

  #[test]
  fn empty_create_playlist_name_is_rejected() {
    let mut app = App::default();
    app.input_purpose = InputPurpose::CreatePlaylist;
    app.input = str_to_vec_char("   ");

    handler(Key::Enter, &mut app);
    assert!(app.status_message.is_some());
  }
}
