use crate::model::Track;
use anyhow::{anyhow, Result};
use log::info;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{
  collections::{BTreeMap, HashMap},
  fs,
  path::{Path, PathBuf},
};

const PLAYLISTS_FILE: &str = "playlists.json";
const USERS_FILE: &str = "users.json";
const CONFIG_DIR: &str = ".config";
const APP_CONFIG_DIR: &str = "tunatui";

const SALT_LEN: usize = 16;

/// owner -> playlist name -> tracks. BTreeMap keeps the per-owner listing in
/// a stable order for the UI.
type PlaylistMap = HashMap<String, BTreeMap<String, Vec<Track>>>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRecord {
  salt: String,
  hash: String,
}

/// Durable key-value persistence: per-owner named playlists and the account
/// table, each serialized wholesale as one JSON document on every mutation.
pub struct Storage {
  playlists_path: PathBuf,
  users_path: PathBuf,
  playlists: PlaylistMap,
  users: HashMap<String, UserRecord>,
}

fn hash_password(salt: &str, password: &str) -> String {
  let mut hasher = blake3::Hasher::new();
  hasher.update(salt.as_bytes());
  hasher.update(password.as_bytes());
  hasher.finalize().to_hex().to_string()
}

fn generate_salt() -> String {
  rand::thread_rng()
    .sample_iter(&Alphanumeric)
    .take(SALT_LEN)
    .map(char::from)
    .collect()
}

fn read_json_map<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Result<T> {
  if !path.exists() {
    return Ok(T::default());
  }
  let contents = fs::read_to_string(path)?;
  if contents.trim().is_empty() {
    return Ok(T::default());
  }
  Ok(serde_json::from_str(&contents)?)
}

impl Storage {
  /// Open (or create) the storage files under `~/.config/tunatui/`.
  pub fn new() -> Result<Storage> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("No $HOME directory found for storage"))?;
    let app_dir = home.join(CONFIG_DIR).join(APP_CONFIG_DIR);
    if !app_dir.exists() {
      fs::create_dir_all(&app_dir)?;
    }
    Storage::from_dir(&app_dir)
  }

  /// Open storage rooted at an explicit directory.
  pub fn from_dir(dir: &Path) -> Result<Storage> {
    let playlists_path = dir.join(PLAYLISTS_FILE);
    let users_path = dir.join(USERS_FILE);
    let playlists = read_json_map(&playlists_path)?;
    let users = read_json_map(&users_path)?;
    Ok(Storage {
      playlists_path,
      users_path,
      playlists,
      users,
    })
  }

  fn write_playlists(&self) -> Result<()> {
    let contents = serde_json::to_string_pretty(&self.playlists)?;
    fs::write(&self.playlists_path, contents)?;
    Ok(())
  }

  fn write_users(&self) -> Result<()> {
    let contents = serde_json::to_string_pretty(&self.users)?;
    fs::write(&self.users_path, contents)?;
    Ok(())
  }

  /// Create an empty named playlist. Rejects a name that already exists for
  /// this owner, leaving the stored version untouched.
  pub fn create_playlist(&mut self, owner: &str, name: &str) -> Result<()> {
    let owned = self.playlists.entry(owner.to_string()).or_default();
    if owned.contains_key(name) {
      return Err(anyhow!("Playlist \"{}\" already exists", name));
    }
    owned.insert(name.to_string(), Vec::new());
    self.write_playlists()?;
    info!("created playlist \"{}\" for {}", name, owner);
    Ok(())
  }

  /// Upsert a named playlist with a snapshot of the given tracks.
  pub fn save_playlist(&mut self, owner: &str, name: &str, tracks: &[Track]) -> Result<()> {
    let owned = self.playlists.entry(owner.to_string()).or_default();
    owned.insert(name.to_string(), tracks.to_vec());
    self.write_playlists()?;
    info!(
      "saved playlist \"{}\" for {} ({} tracks)",
      name,
      owner,
      tracks.len()
    );
    Ok(())
  }

  /// Fetch a stored playlist; `None` is the not-found signal.
  pub fn load_playlist(&self, owner: &str, name: &str) -> Option<Vec<Track>> {
    self
      .playlists
      .get(owner)
      .and_then(|owned| owned.get(name))
      .cloned()
  }

  pub fn delete_playlist(&mut self, owner: &str, name: &str) -> Result<()> {
    let owned = self
      .playlists
      .get_mut(owner)
      .ok_or_else(|| anyhow!("No playlists stored for {}", owner))?;
    if owned.remove(name).is_none() {
      return Err(anyhow!("Playlist \"{}\" does not exist", name));
    }
    self.write_playlists()?;
    info!("deleted playlist \"{}\" for {}", name, owner);
    Ok(())
  }

  /// Names of all playlists stored for this owner, in listing order.
  pub fn playlist_names(&self, owner: &str) -> Vec<String> {
    self
      .playlists
      .get(owner)
      .map(|owned| owned.keys().cloned().collect())
      .unwrap_or_default()
  }

  /// Register a new account. The password is stored as a salted blake3
  /// digest, never in cleartext.
  pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
    if self.users.contains_key(username) {
      return Err(anyhow!("Username already exists. Please choose a different one."));
    }
    let salt = generate_salt();
    let hash = hash_password(&salt, password);
    self
      .users
      .insert(username.to_string(), UserRecord { salt, hash });
    self.write_users()?;
    info!("registered account {}", username);
    Ok(())
  }

  /// Check credentials against the stored salted hash.
  pub fn verify_login(&self, username: &str, password: &str) -> bool {
    match self.users.get(username) {
      Some(record) => hash_password(&record.salt, password) == record.hash,
      None => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::{next_track_key, Track};
  use tempfile::tempdir;

  fn track(title: &str, artist: &str) -> Track {
    Track {
      key: next_track_key(),
      title: title.to_string(),
      artist: artist.to_string(),
      preview_url: format!("https://audio.example/{}.m4a", title),
      artwork_url: String::new(),
    }
  }

  #[test]
  fn create_is_idempotent_rejecting() -> Result<()> {
    let dir = tempdir()?;
    let mut storage = Storage::from_dir(dir.path())?;

    storage.create_playlist("alice", "roadtrip")?;
    storage.save_playlist("alice", "roadtrip", &[track("Yellow", "Coldplay")])?;

    // Second create must fail and must not clobber the stored version
    assert!(storage.create_playlist("alice", "roadtrip").is_err());
    let stored = storage.load_playlist("alice", "roadtrip").unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Yellow");
    Ok(())
  }

  #[test]
  fn delete_then_load_is_not_found() -> Result<()> {
    let dir = tempdir()?;
    let mut storage = Storage::from_dir(dir.path())?;

    storage.create_playlist("alice", "gym")?;
    storage.delete_playlist("alice", "gym")?;
    assert!(storage.load_playlist("alice", "gym").is_none());

    // Deleting again reports failure rather than silently succeeding
    assert!(storage.delete_playlist("alice", "gym").is_err());
    Ok(())
  }

  #[test]
  fn playlists_are_owner_scoped() -> Result<()> {
    let dir = tempdir()?;
    let mut storage = Storage::from_dir(dir.path())?;

    storage.save_playlist("alice", "mix", &[track("One", "U2")])?;
    storage.save_playlist("bob", "mix", &[track("Two", "U2"), track("Three", "U2")])?;

    assert_eq!(storage.load_playlist("alice", "mix").unwrap().len(), 1);
    assert_eq!(storage.load_playlist("bob", "mix").unwrap().len(), 2);
    assert!(storage.load_playlist("carol", "mix").is_none());
    Ok(())
  }

  #[test]
  fn mutations_survive_reopen() -> Result<()> {
    let dir = tempdir()?;
    {
      let mut storage = Storage::from_dir(dir.path())?;
      storage.save_playlist("alice", "mix", &[track("One", "U2")])?;
      storage.register("alice", "pw1")?;
    }

    let storage = Storage::from_dir(dir.path())?;
    assert_eq!(storage.playlist_names("alice"), vec!["mix".to_string()]);
    assert_eq!(storage.load_playlist("alice", "mix").unwrap()[0].artist, "U2");
    assert!(storage.verify_login("alice", "pw1"));
    Ok(())
  }

  #[test]
  fn register_login_logout_scenario() -> Result<()> {
    let dir = tempdir()?;
    let mut storage = Storage::from_dir(dir.path())?;

    storage.register("alice", "pw1")?;
    assert!(storage.verify_login("alice", "pw1"));
    assert!(!storage.verify_login("alice", "wrong"));
    assert!(!storage.verify_login("nobody", "pw1"));

    // Duplicate registration is rejected
    assert!(storage.register("alice", "other").is_err());
    Ok(())
  }

  #[test]
  fn passwords_are_not_stored_in_cleartext() -> Result<()> {
    let dir = tempdir()?;
    let mut storage = Storage::from_dir(dir.path())?;
    storage.register("alice", "hunter2")?;

    let raw = std::fs::read_to_string(dir.path().join(USERS_FILE))?;
    assert!(!raw.contains("hunter2"));
    Ok(())
  }

  #[test]
  fn equal_passwords_hash_differently_per_user() -> Result<()> {
    let dir = tempdir()?;
    let mut storage = Storage::from_dir(dir.path())?;
    storage.register("alice", "same")?;
    storage.register("bob", "same")?;

    let alice = storage.users.get("alice").unwrap();
    let bob = storage.users.get("bob").unwrap();
    assert_ne!(alice.hash, bob.hash);
    Ok(())
  }
}
