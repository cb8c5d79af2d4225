use crate::app::{App, AuthField, AuthMode};
use crate::event::Key;

// Handle events for the login/register form. This block swallows every key
// (including the global bindings) since the user is typing credentials.
pub fn handler(key: Key, app: &mut App) {
  match key {
    Key::Tab | Key::Up | Key::Down => {
      app.auth.focused = match app.auth.focused {
        AuthField::Username => AuthField::Password,
        AuthField::Password => AuthField::Username,
      };
    }
    Key::Ctrl('r') => {
      app.auth.mode = match app.auth.mode {
        AuthMode::Login => AuthMode::Register,
        AuthMode::Register => AuthMode::Login,
      };
      app.auth.error = None;
    }
    Key::Esc => {
      app.auth.error = None;
    }
    Key::Enter => {
      submit(app);
    }
    Key::Backspace => {
      match app.auth.focused {
        AuthField::Username => app.auth.username.pop(),
        AuthField::Password => app.auth.password.pop(),
      };
    }
    Key::Char(c) => {
      match app.auth.focused {
        AuthField::Username => app.auth.username.push(c),
        AuthField::Password => app.auth.password.push(c),
      };
    }
    _ => {}
  }
}

fn submit(app: &mut App) {
  let username = app.auth.username.trim().to_string();
  let password = app.auth.password.trim().to_string();

  if username.is_empty() || password.is_empty() {
    app.auth.error = Some("Please enter both username and password.".to_string());
    return;
  }

  match app.auth.mode {
    AuthMode::Register => {
      let result = match &mut app.storage {
        Some(storage) => storage.register(&username, &password),
        None => return,
      };
      match result {
        Ok(()) => {
          app.auth = Default::default();
          app.auth.username = username;
          app.set_status("Registration successful! You can now log in.");
        }
        Err(e) => app.auth.error = Some(e.to_string()),
      }
    }
    AuthMode::Login => {
      let verified = app
        .storage
        .as_ref()
        .map(|storage| storage.verify_login(&username, &password))
        .unwrap_or(false);
      if verified {
        app.complete_login(username);
      } else {
        app.auth.password.clear();
        app.auth.error = Some("Invalid username or password.".to_string());
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::app::RouteId;
  use crate::storage::Storage;
  use tempfile::tempdir;

  fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
      handler(Key::Char(c), app);
    }
  }

  #[test]
  fn register_then_login_then_bad_password() {
    let dir = tempdir().unwrap();
    let mut app = App::default();
    app.storage = Some(Storage::from_dir(dir.path()).unwrap());

    // register("alice", "pw1")
    handler(Key::Ctrl('r'), &mut app);
    assert_eq!(app.auth.mode, AuthMode::Register);
    type_str(&mut app, "alice");
    handler(Key::Tab, &mut app);
    type_str(&mut app, "pw1");
    handler(Key::Enter, &mut app);
    assert!(app.session.is_none());
    assert_eq!(app.auth.mode, AuthMode::Login);

    // login("alice", "wrong") fails
    app.auth.username = "alice".to_string();
    app.auth.password = "wrong".to_string();
    handler(Key::Enter, &mut app);
    assert!(app.session.is_none());
    assert!(app.auth.error.is_some());

    // login("alice", "pw1") succeeds
    app.auth.username = "alice".to_string();
    app.auth.password = "pw1".to_string();
    handler(Key::Enter, &mut app);
    assert_eq!(app.session.as_deref(), Some("alice"));
    assert_eq!(app.get_current_route().id, RouteId::Home);

    // logout clears the session again
    app.logout();
    assert!(app.session.is_none());
    assert_eq!(app.get_current_route().id, RouteId::Auth);
  }

  #[test]
  fn blank_credentials_are_rejected_inline() {
    let mut app = App::default();
    handler(Key::Enter, &mut app);
    assert!(app.auth.error.is_some());
    assert!(app.session.is_none());
  }
}
