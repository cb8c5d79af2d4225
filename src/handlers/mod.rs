mod analysis;
mod auth;
mod basic_view;
pub mod common_key_events;
mod dialog;
mod error_screen;
mod help_menu;
mod input;
mod playlists;
mod queue;

use super::app::{ActiveBlock, App, InputPurpose, RouteId};
use crate::event::Key;

pub use auth::handler as auth_handler;
pub use input::handler as input_handler;

pub fn handle_app(key: Key, app: &mut App) {
  // First handle any global event and then move to block event
  match key {
    Key::Esc => {
      handle_escape(app);
    }
    _ if key == app.user_config.keys.help => {
      app.push_navigation_stack(RouteId::HelpMenu, ActiveBlock::HelpMenu);
    }
    _ if key == app.user_config.keys.search => {
      open_input(app, InputPurpose::Search);
    }
    _ if key == app.user_config.keys.toggle_playback => {
      app.toggle_playback();
    }
    _ if key == app.user_config.keys.next_track => {
      app.next_track();
    }
    _ if key == app.user_config.keys.previous_track => {
      app.previous_track();
    }
    _ if key == app.user_config.keys.seek_backwards => {
      app.seek_backwards();
    }
    _ if key == app.user_config.keys.seek_forwards => {
      app.seek_forwards();
    }
    _ if key == app.user_config.keys.increase_volume => {
      app.increase_volume();
    }
    _ if key == app.user_config.keys.decrease_volume => {
      app.decrease_volume();
    }
    _ if key == app.user_config.keys.toggle_theme => {
      app.toggle_theme();
    }
    _ if key == app.user_config.keys.audio_analysis => {
      app.push_navigation_stack(RouteId::Analysis, ActiveBlock::Analysis);
    }
    _ if key == app.user_config.keys.basic_view => {
      app.push_navigation_stack(RouteId::BasicView, ActiveBlock::BasicView);
    }
    _ if key == app.user_config.keys.copy_track_url => {
      app.copy_current_track_url();
    }
    _ if key == app.user_config.keys.create_playlist => {
      open_input(app, InputPurpose::CreatePlaylist);
    }
    _ if key == app.user_config.keys.save_playlist => {
      // Re-save under the loaded name when there is one, otherwise ask
      match app.active_playlist.clone() {
        Some(name) => app.save_queue_as(&name),
        None => open_input(app, InputPurpose::SavePlaylist),
      }
    }
    _ if key == app.user_config.keys.logout => {
      app.logout();
    }
    // Jump to 0%..90% of the track, mpv style
    Key::Char(c) if c.is_ascii_digit() => {
      let digit = c.to_digit(10).unwrap_or(0);
      app.seek_to_fraction(digit as f64 / 10.0);
    }
    _ => handle_block_events(key, app),
  }
}

// Handler event for the current active block
fn handle_block_events(key: Key, app: &mut App) {
  let current_route = app.get_current_route();
  match current_route.active_block {
    ActiveBlock::Analysis => {
      analysis::handler(key, app);
    }
    ActiveBlock::Auth => {
      auth::handler(key, app);
    }
    ActiveBlock::BasicView => {
      basic_view::handler(key, app);
    }
    ActiveBlock::Dialog => {
      dialog::handler(key, app);
    }
    ActiveBlock::Error => {
      error_screen::handler(key, app);
    }
    ActiveBlock::HelpMenu => {
      help_menu::handler(key, app);
    }
    ActiveBlock::Input => {
      input::handler(key, app);
    }
    ActiveBlock::Playlists => {
      playlists::handler(key, app);
    }
    ActiveBlock::Queue => {
      queue::handler(key, app);
    }
    ActiveBlock::Empty => {}
  }
}

fn open_input(app: &mut App, purpose: InputPurpose) {
  if app.session.is_none() {
    return;
  }
  app.input_purpose = purpose;
  app.input = vec![];
  app.input_idx = 0;
  app.input_cursor_position = 0;
  app.set_current_route_state(Some(ActiveBlock::Input), Some(ActiveBlock::Input));
}

fn handle_escape(app: &mut App) {
  match app.get_current_route().active_block {
    ActiveBlock::Dialog => {
      app.pop_navigation_stack();
      app.dialog = None;
      app.confirm = false;
    }
    ActiveBlock::Error => {
      app.pop_navigation_stack();
    }
    _ => {
      if app.get_current_route().id != RouteId::Home {
        app.pop_navigation_stack();
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn help_menu_opens_and_closes() {
    let mut app = App::default();
    app.push_navigation_stack(RouteId::Home, ActiveBlock::Queue);

    handle_app(Key::Char('?'), &mut app);
    assert_eq!(app.get_current_route().id, RouteId::HelpMenu);

    handle_app(Key::Esc, &mut app);
    assert_eq!(app.get_current_route().id, RouteId::Home);
  }

  #[test]
  fn search_input_requires_a_session() {
    let mut app = App::default();
    app.push_navigation_stack(RouteId::Home, ActiveBlock::Queue);

    app.session = None;
    handle_app(Key::Char('/'), &mut app);
    assert_ne!(app.get_current_route().active_block, ActiveBlock::Input);

    app.session = Some("alice".to_string());
    handle_app(Key::Char('/'), &mut app);
    assert_eq!(app.get_current_route().active_block, ActiveBlock::Input);
  }
}
