use super::user_config::UserConfig;
use crate::audio::{SharedAnalyzer, SpectrumData};
use crate::model::Track;
use crate::network::IoEvent;
use crate::player::PlayerCommand;
use crate::storage::Storage;
use anyhow::anyhow;
use log::{info, warn};
use ratatui::layout::Size;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use arboard::Clipboard;

const DEFAULT_ROUTE: Route = Route {
  id: RouteId::Home,
  active_block: ActiveBlock::Queue,
  hovered_block: ActiveBlock::Queue,
};

const AUTH_ROUTE: Route = Route {
  id: RouteId::Auth,
  active_block: ActiveBlock::Auth,
  hovered_block: ActiveBlock::Auth,
};

/// How long an ephemeral status message stays in the playbar
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ActiveBlock {
  Analysis,
  Auth,
  BasicView,
  Dialog,
  Empty,
  Error,
  HelpMenu,
  Input,
  Playlists,
  Queue,
}

#[derive(Clone, PartialEq, Debug)]
pub enum RouteId {
  Analysis,
  Auth,
  BasicView,
  Dialog,
  Error,
  HelpMenu,
  Home,
}

#[derive(Debug)]
pub struct Route {
  pub id: RouteId,
  pub active_block: ActiveBlock,
  pub hovered_block: ActiveBlock,
}

/// What the shared text input is currently collecting
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputPurpose {
  Search,
  CreatePlaylist,
  SavePlaylist,
}

#[derive(Clone, PartialEq, Debug, Default)]
pub enum LyricsStatus {
  #[default]
  NotStarted,
  Loading,
  Found,
  NotFound,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AuthMode {
  Login,
  Register,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AuthField {
  Username,
  Password,
}

/// State of the login/register form shown while no session is active
pub struct AuthForm {
  pub username: String,
  pub password: String,
  pub focused: AuthField,
  pub mode: AuthMode,
  pub error: Option<String>,
}

impl Default for AuthForm {
  fn default() -> Self {
    AuthForm {
      username: String::new(),
      password: String::new(),
      focused: AuthField::Username,
      mode: AuthMode::Login,
      error: None,
    }
  }
}

pub struct App {
  navigation_stack: Vec<Route>,
  pub user_config: UserConfig,
  pub size: Size,
  pub api_error: String,

  // Active track list and the playback pointer. The pointer holds the
  // track's fetch-time key, not its position, so reorders cannot detach it.
  pub queue: Vec<Track>,
  pub now_playing: Option<u64>,
  pub selected_queue_index: usize,

  // Playback state mirrored from the audio engine
  pub song_progress_ms: u128,
  pub duration_ms: u128,
  pub is_playing: bool,

  // Session and persisted playlists
  pub session: Option<String>,
  pub storage: Option<Storage>,
  pub saved_playlist_names: Vec<String>,
  pub selected_playlist_index: Option<usize>,
  /// Name of the saved playlist the queue was loaded from, if any
  pub active_playlist: Option<String>,

  pub auth: AuthForm,

  // Inputs:
  // input is the string for input;
  // input_idx is the index of the cursor in terms of character;
  // input_cursor_position is the sum of the width of characters preceding the cursor.
  // Reason for this complication is due to non-ASCII characters, they may
  // take more than 1 bytes to store and more than 1 character width to display.
  pub input: Vec<char>,
  pub input_idx: usize,
  pub input_cursor_position: u16,
  pub input_purpose: InputPurpose,

  pub lyrics: Option<String>,
  pub lyrics_status: LyricsStatus,
  pub lyrics_scroll: u16,

  /// Bumped on every search dispatch; responses for older generations are
  /// discarded on arrival
  pub search_generation: u64,

  pub spectrum_data: Option<SpectrumData>,
  pub analyzer: Option<SharedAnalyzer>,

  pub dialog: Option<String>,
  pub confirm: bool,

  pub status_message: Option<String>,
  pub status_message_expires_at: Option<Instant>,

  pub help_docs_size: u32,
  pub help_menu_offset: u32,
  pub help_menu_page: u32,
  pub help_menu_max_lines: u32,

  pub is_loading: bool,
  io_tx: Option<Sender<IoEvent>>,
  player_tx: Option<Sender<PlayerCommand>>,
  pub clipboard: Option<Clipboard>,
}

impl Default for App {
  fn default() -> Self {
    App {
      navigation_stack: vec![AUTH_ROUTE],
      user_config: UserConfig::new(),
      size: Size::default(),
      api_error: String::new(),
      queue: vec![],
      now_playing: None,
      selected_queue_index: 0,
      song_progress_ms: 0,
      duration_ms: 0,
      is_playing: false,
      session: None,
      storage: None,
      saved_playlist_names: vec![],
      selected_playlist_index: None,
      active_playlist: None,
      auth: AuthForm::default(),
      input: vec![],
      input_idx: 0,
      input_cursor_position: 0,
      input_purpose: InputPurpose::Search,
      lyrics: None,
      lyrics_status: LyricsStatus::default(),
      lyrics_scroll: 0,
      search_generation: 0,
      spectrum_data: None,
      analyzer: None,
      dialog: None,
      confirm: false,
      status_message: None,
      status_message_expires_at: None,
      help_docs_size: 0,
      help_menu_offset: 0,
      help_menu_page: 0,
      help_menu_max_lines: 0,
      is_loading: false,
      io_tx: None,
      player_tx: None,
      clipboard: Clipboard::new().ok(),
    }
  }
}

impl App {
  pub fn new(
    io_tx: Sender<IoEvent>,
    player_tx: Sender<PlayerCommand>,
    user_config: UserConfig,
    storage: Storage,
  ) -> App {
    App {
      io_tx: Some(io_tx),
      player_tx: Some(player_tx),
      user_config,
      storage: Some(storage),
      ..App::default()
    }
  }

  // Send a network event to the network thread
  pub fn dispatch(&mut self, action: IoEvent) {
    // `is_loading` will be set to false again after the async action has finished in network.rs
    self.is_loading = true;
    if let Some(io_tx) = &self.io_tx {
      if let Err(e) = io_tx.send(action) {
        self.is_loading = false;
        warn!("error from dispatch: {}", e);
      };
    }
  }

  // Close the IO channel to allow the network thread to exit gracefully
  pub fn close_io_channel(&mut self) {
    self.io_tx = None;
  }

  /// Send a command to the audio engine thread
  pub fn player_command(&mut self, command: PlayerCommand) {
    if let Some(player_tx) = &self.player_tx {
      if player_tx.send(command).is_err() {
        warn!("audio engine is gone, dropping player command");
      }
    }
  }

  pub fn get_current_route(&self) -> &Route {
    // if for some reason there is no route return the default
    self.navigation_stack.last().unwrap_or(&DEFAULT_ROUTE)
  }

  fn get_current_route_mut(&mut self) -> &mut Route {
    self.navigation_stack.last_mut().unwrap()
  }

  pub fn set_current_route_state(
    &mut self,
    active_block: Option<ActiveBlock>,
    hovered_block: Option<ActiveBlock>,
  ) {
    let current_route = self.get_current_route_mut();
    if let Some(active_block) = active_block {
      current_route.active_block = active_block;
    }
    if let Some(hovered_block) = hovered_block {
      current_route.hovered_block = hovered_block;
    }
  }

  pub fn push_navigation_stack(&mut self, next_route_id: RouteId, next_active_block: ActiveBlock) {
    if !self
      .navigation_stack
      .last()
      .map(|last_route| last_route.id == next_route_id)
      .unwrap_or(false)
    {
      self.navigation_stack.push(Route {
        id: next_route_id,
        active_block: next_active_block,
        hovered_block: next_active_block,
      });
    }
  }

  pub fn pop_navigation_stack(&mut self) -> Option<Route> {
    if self.navigation_stack.len() == 1 {
      None
    } else {
      self.navigation_stack.pop()
    }
  }

  pub fn handle_error(&mut self, e: anyhow::Error) {
    self.push_navigation_stack(RouteId::Error, ActiveBlock::Error);
    self.api_error = e.to_string();
  }

  pub fn calculate_help_menu_offset(&mut self) {
    let old_offset = self.help_menu_offset;

    if self.help_menu_max_lines < self.help_docs_size {
      self.help_menu_offset = self.help_menu_page * self.help_menu_max_lines;
    }
    if self.help_menu_offset > self.help_docs_size {
      self.help_menu_offset = old_offset;
      self.help_menu_page -= 1;
    }
  }

  pub fn set_status(&mut self, message: impl Into<String>) {
    self.status_message = Some(message.into());
    self.status_message_expires_at = Some(Instant::now() + STATUS_MESSAGE_TTL);
  }

  pub fn update_on_tick(&mut self) {
    if let Some(expires_at) = self.status_message_expires_at {
      if Instant::now() >= expires_at {
        self.status_message = None;
        self.status_message_expires_at = None;
      }
    }

    // The spectrum runs on every tick once the analyzer exists, playing or
    // not; with no fresh samples the noise gate decays the bars to zero.
    if let Some(analyzer) = &self.analyzer {
      if let Ok(mut analyzer) = analyzer.try_lock() {
        self.spectrum_data = Some(analyzer.process());
      }
    }
  }

  /// Index of the playing track in the queue, derived from the pointer key
  pub fn playing_index(&self) -> Option<usize> {
    let key = self.now_playing?;
    self.queue.iter().position(|track| track.key == key)
  }

  pub fn current_track(&self) -> Option<&Track> {
    let key = self.now_playing?;
    self.queue.iter().find(|track| track.key == key)
  }

  /// Point the playback pointer at the given queue position, start fetching
  /// its audio and request lyrics tagged with the track key.
  pub fn play_track_at(&mut self, index: usize) {
    let track = match self.queue.get(index) {
      Some(track) => track.clone(),
      None => {
        warn!("cannot play index {}: out of bounds", index);
        return;
      }
    };

    info!("playing \"{}\" by {}", track.title, track.artist);
    self.now_playing = Some(track.key);
    self.selected_queue_index = index;
    self.song_progress_ms = 0;
    self.duration_ms = 0;
    self.is_playing = true;
    self.lyrics = None;
    self.lyrics_scroll = 0;
    self.lyrics_status = LyricsStatus::Loading;

    self.dispatch(IoEvent::StartPlayback(Box::new(track.clone())));
    self.dispatch(IoEvent::GetLyrics(track.artist, track.title, track.key));
  }

  /// Circular advance; logged no-op when the queue is empty
  pub fn next_track(&mut self) {
    if self.queue.is_empty() {
      info!("queue is empty, cannot play next track");
      return;
    }
    let next = match self.playing_index() {
      Some(index) => (index + 1) % self.queue.len(),
      None => 0,
    };
    self.play_track_at(next);
  }

  /// Circular retreat; logged no-op when the queue is empty
  pub fn previous_track(&mut self) {
    if self.queue.is_empty() {
      info!("queue is empty, cannot play previous track");
      return;
    }
    let previous = match self.playing_index() {
      Some(index) => (index + self.queue.len() - 1) % self.queue.len(),
      None => 0,
    };
    self.play_track_at(previous);
  }

  /// Apply a lyrics lookup result tagged with the track it was requested
  /// for. Returns false (and changes nothing) when the pointer has already
  /// moved on to another track.
  pub fn apply_lyrics(&mut self, track_key: u64, lyrics: Option<String>) -> bool {
    if self.now_playing != Some(track_key) {
      return false;
    }
    match lyrics {
      Some(lyrics) => {
        self.lyrics = Some(lyrics);
        self.lyrics_status = LyricsStatus::Found;
      }
      None => {
        self.lyrics = None;
        self.lyrics_status = LyricsStatus::NotFound;
      }
    }
    true
  }

  pub fn toggle_playback(&mut self) {
    if self.now_playing.is_none() {
      if !self.queue.is_empty() {
        let index = self.selected_queue_index.min(self.queue.len() - 1);
        self.play_track_at(index);
      }
      return;
    }
    if self.is_playing {
      self.player_command(PlayerCommand::Pause);
      self.is_playing = false;
    } else {
      self.player_command(PlayerCommand::Resume);
      self.is_playing = true;
    }
  }

  /// Wholesale queue replacement. Clears the pointer unless playback of the
  /// first track is started right away.
  pub fn replace_queue(&mut self, tracks: Vec<Track>, autoplay: bool) {
    self.queue = tracks;
    self.selected_queue_index = 0;
    if autoplay && !self.queue.is_empty() {
      self.play_track_at(0);
    } else {
      self.now_playing = None;
      self.is_playing = false;
      self.song_progress_ms = 0;
      self.duration_ms = 0;
      self.player_command(PlayerCommand::Stop);
    }
  }

  /// Remove the track at `from` and reinsert it at `to`. The pointer follows
  /// the track it names through the move by key identity.
  pub fn move_track(&mut self, from: usize, to: usize) {
    if from >= self.queue.len() || to >= self.queue.len() || from == to {
      return;
    }
    let track = self.queue.remove(from);
    self.queue.insert(to, track);
    self.selected_queue_index = to;
  }

  /// Jump to an absolute fraction of the current track (0.0 to 1.0)
  pub fn seek_to_fraction(&mut self, fraction: f64) {
    if self.now_playing.is_none() || self.duration_ms == 0 {
      return;
    }
    let fraction = fraction.clamp(0.0, 1.0);
    let target_ms = (self.duration_ms as f64 * fraction) as u128;
    self.song_progress_ms = target_ms;
    self.player_command(PlayerCommand::Seek(Duration::from_millis(target_ms as u64)));
  }

  pub fn seek_forwards(&mut self) {
    if self.now_playing.is_none() {
      return;
    }
    let target_ms = (self.song_progress_ms + self.user_config.behavior.seek_milliseconds as u128)
      .min(self.duration_ms);
    self.song_progress_ms = target_ms;
    self.player_command(PlayerCommand::Seek(Duration::from_millis(target_ms as u64)));
  }

  pub fn seek_backwards(&mut self) {
    if self.now_playing.is_none() {
      return;
    }
    let target_ms = self
      .song_progress_ms
      .saturating_sub(self.user_config.behavior.seek_milliseconds as u128);
    self.song_progress_ms = target_ms;
    self.player_command(PlayerCommand::Seek(Duration::from_millis(target_ms as u64)));
  }

  pub fn increase_volume(&mut self) {
    let next_volume = self
      .user_config
      .behavior
      .volume_percent
      .saturating_add(self.user_config.behavior.volume_increment)
      .min(100);
    self.apply_volume(next_volume);
  }

  pub fn decrease_volume(&mut self) {
    let next_volume = self
      .user_config
      .behavior
      .volume_percent
      .saturating_sub(self.user_config.behavior.volume_increment);
    self.apply_volume(next_volume);
  }

  fn apply_volume(&mut self, volume_percent: u8) {
    if volume_percent != self.user_config.behavior.volume_percent {
      self.user_config.behavior.volume_percent = volume_percent;
      self.player_command(PlayerCommand::SetVolume(volume_percent as f32 / 100.0));
      // Persist the latest volume so it is restored on next launch
      let _ = self.user_config.save_config();
    }
  }

  pub fn toggle_theme(&mut self) {
    if let Err(e) = self.user_config.toggle_theme_mode() {
      warn!("failed to persist theme change: {}", e);
    }
    let mode = self.user_config.theme_mode.name().to_string();
    self.set_status(format!("Theme: {}", mode));
  }

  pub fn copy_current_track_url(&mut self) {
    let url = match self.current_track() {
      Some(track) => track.preview_url.clone(),
      None => return,
    };
    if let Some(clipboard) = &mut self.clipboard {
      if let Err(e) = clipboard.set_text(url) {
        self.handle_error(anyhow!("Failed to set clipboard content: {}", e));
      } else {
        self.set_status("Preview URL copied");
      }
    }
  }

  /// Establish the session after verified credentials and kick off the
  /// initial catalog load.
  pub fn complete_login(&mut self, username: String) {
    info!("session established for {}", username);
    self.saved_playlist_names = self
      .storage
      .as_ref()
      .map(|storage| storage.playlist_names(&username))
      .unwrap_or_default();
    self.selected_playlist_index = None;
    self.session = Some(username.clone());
    self.auth = AuthForm::default();
    self.navigation_stack = vec![DEFAULT_ROUTE];
    self.set_status(format!("Welcome back, {}!", username));
    self.search_generation += 1;
    let generation = self.search_generation;
    self.dispatch(IoEvent::LoadInitialTracks(generation));
  }

  /// Clear the session and reset playback and queue state to empty
  pub fn logout(&mut self) {
    if let Some(username) = self.session.take() {
      info!("session cleared for {}", username);
    }
    self.player_command(PlayerCommand::Stop);
    self.queue.clear();
    self.now_playing = None;
    self.is_playing = false;
    self.song_progress_ms = 0;
    self.duration_ms = 0;
    self.selected_queue_index = 0;
    self.active_playlist = None;
    self.saved_playlist_names.clear();
    self.selected_playlist_index = None;
    self.lyrics = None;
    self.lyrics_status = LyricsStatus::default();
    self.navigation_stack = vec![AUTH_ROUTE];
    self.set_status("Logged out successfully.");
  }

  fn refresh_playlist_names(&mut self) {
    if let (Some(owner), Some(storage)) = (&self.session, &self.storage) {
      self.saved_playlist_names = storage.playlist_names(owner);
      if self.saved_playlist_names.is_empty() {
        self.selected_playlist_index = None;
      } else if let Some(index) = self.selected_playlist_index {
        self.selected_playlist_index = Some(index.min(self.saved_playlist_names.len() - 1));
      }
    }
  }

  /// Create an empty named playlist; rejects duplicates per owner
  pub fn create_saved_playlist(&mut self, name: &str) {
    let owner = match &self.session {
      Some(owner) => owner.clone(),
      None => return,
    };
    let result = match &mut self.storage {
      Some(storage) => storage.create_playlist(&owner, name),
      None => return,
    };
    match result {
      Ok(()) => {
        self.refresh_playlist_names();
        self.set_status(format!("Playlist \"{}\" created!", name));
      }
      Err(e) => self.set_status(e.to_string()),
    }
  }

  /// Snapshot the current queue under the given name (upsert)
  pub fn save_queue_as(&mut self, name: &str) {
    let owner = match &self.session {
      Some(owner) => owner.clone(),
      None => return,
    };
    let tracks = self.queue.clone();
    let result = match &mut self.storage {
      Some(storage) => storage.save_playlist(&owner, name, &tracks),
      None => return,
    };
    match result {
      Ok(()) => {
        self.active_playlist = Some(name.to_string());
        self.refresh_playlist_names();
        self.set_status(format!("Current playlist saved as \"{}\"!", name));
      }
      Err(e) => self.set_status(e.to_string()),
    }
  }

  pub fn load_saved_playlist(&mut self, name: &str) {
    let owner = match &self.session {
      Some(owner) => owner.clone(),
      None => return,
    };
    let tracks = match &self.storage {
      Some(storage) => storage.load_playlist(&owner, name),
      None => return,
    };
    match tracks {
      Some(tracks) => {
        self.active_playlist = Some(name.to_string());
        if tracks.is_empty() {
          self.replace_queue(tracks, false);
          self.set_status("Playlist is empty.");
        } else {
          self.replace_queue(tracks, true);
          self.set_status(format!("Playlist \"{}\" loaded!", name));
        }
      }
      None => self.set_status(format!("Playlist \"{}\" not found", name)),
    }
  }

  /// Delete a named playlist; when it is the one the queue was loaded from,
  /// the queue and pointer reset to empty as well.
  pub fn delete_saved_playlist(&mut self, name: &str) {
    let owner = match &self.session {
      Some(owner) => owner.clone(),
      None => return,
    };
    let was_active = self.active_playlist.as_deref() == Some(name);
    let result = match &mut self.storage {
      Some(storage) => storage.delete_playlist(&owner, name),
      None => return,
    };
    match result {
      Ok(()) => {
        self.refresh_playlist_names();
        if was_active {
          self.active_playlist = None;
          self.replace_queue(vec![], false);
          self.lyrics = None;
          self.lyrics_status = LyricsStatus::default();
        }
        self.set_status(format!("Playlist \"{}\" deleted!", name));
      }
      Err(e) => self.set_status(e.to_string()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::next_track_key;
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

  fn app_with_queue(titles: &[&str]) -> App {
    let mut app = App::default();
    app.queue = titles.iter().map(|t| track(t, "Artist")).collect();
    app
  }

  #[test]
  fn next_composed_len_times_is_identity() {
    let mut app = app_with_queue(&["a", "b", "c"]);
    app.play_track_at(0);
    let start = app.playing_index();
    for _ in 0..app.queue.len() {
      app.next_track();
    }
    assert_eq!(app.playing_index(), start);
  }

  #[test]
  fn search_scenario_three_tracks_wraps_to_first() {
    // search("rock") returning 3 tracks, then play(0) and three skips
    let mut app = App::default();
    let tracks = vec![track("one", "A"), track("two", "B"), track("three", "C")];
    app.replace_queue(tracks, true);
    assert_eq!(app.playing_index(), Some(0));
    app.next_track();
    assert_eq!(app.playing_index(), Some(1));
    app.next_track();
    assert_eq!(app.playing_index(), Some(2));
    app.next_track();
    assert_eq!(app.playing_index(), Some(0));
  }

  #[test]
  fn previous_wraps_backwards() {
    let mut app = app_with_queue(&["a", "b", "c"]);
    app.play_track_at(0);
    app.previous_track();
    assert_eq!(app.playing_index(), Some(2));
  }

  #[test]
  fn next_on_empty_queue_is_a_noop() {
    let mut app = App::default();
    app.next_track();
    assert_eq!(app.now_playing, None);
    app.previous_track();
    assert_eq!(app.now_playing, None);
  }

  #[test]
  fn move_track_preserves_length_and_multiset() {
    let mut app = app_with_queue(&["a", "b", "c", "d"]);
    let mut before: Vec<String> = app.queue.iter().map(|t| t.title.clone()).collect();
    app.move_track(1, 3);
    let mut after: Vec<String> = app.queue.iter().map(|t| t.title.clone()).collect();
    assert_eq!(after.len(), 4);
    before.sort();
    after.sort();
    assert_eq!(before, after);
  }

  #[test]
  fn pointer_follows_track_through_reorder() {
    let mut app = app_with_queue(&["a", "b", "c"]);
    app.play_track_at(1); // playing "b"
    app.move_track(1, 0);
    assert_eq!(app.playing_index(), Some(0));
    assert_eq!(app.current_track().unwrap().title, "b");
  }

  #[test]
  fn pointer_survives_reorder_with_duplicate_titles() {
    // Two tracks sharing (title, artist): key identity keeps the right one
    let mut app = App::default();
    let first = track("same", "same");
    let second = track("same", "same");
    let second_key = second.key;
    app.queue = vec![first, second];
    app.play_track_at(1);
    app.move_track(1, 0);
    assert_eq!(app.now_playing, Some(second_key));
    assert_eq!(app.playing_index(), Some(0));
  }

  #[test]
  fn stale_lyrics_are_discarded() {
    let mut app = app_with_queue(&["a", "b"]);
    app.play_track_at(0);
    let first_key = app.now_playing.unwrap();
    app.next_track();

    // The lookup for the first track resolves late and must not apply
    assert!(!app.apply_lyrics(first_key, Some("la la la".to_string())));
    assert_eq!(app.lyrics_status, LyricsStatus::Loading);

    let current_key = app.now_playing.unwrap();
    assert!(app.apply_lyrics(current_key, Some("real words".to_string())));
    assert_eq!(app.lyrics_status, LyricsStatus::Found);

    assert!(app.apply_lyrics(current_key, None));
    assert_eq!(app.lyrics_status, LyricsStatus::NotFound);
  }

  #[test]
  fn replace_without_autoplay_clears_pointer() {
    let mut app = app_with_queue(&["a"]);
    app.play_track_at(0);
    app.replace_queue(vec![track("x", "y")], false);
    assert_eq!(app.now_playing, None);
    assert!(!app.is_playing);
  }

  #[test]
  fn pointer_resets_when_queue_becomes_empty() {
    let mut app = app_with_queue(&["a"]);
    app.play_track_at(0);
    app.replace_queue(vec![], false);
    assert_eq!(app.now_playing, None);
    assert_eq!(app.playing_index(), None);
  }

  #[test]
  fn logout_resets_playback_and_queue() {
    let dir = tempdir().unwrap();
    let mut storage = Storage::from_dir(dir.path()).unwrap();
    storage.register("alice", "pw1").unwrap();
    assert!(storage.verify_login("alice", "pw1"));
    assert!(!storage.verify_login("alice", "wrong"));

    let mut app = App::default();
    app.storage = Some(storage);
    app.complete_login("alice".to_string());
    assert_eq!(app.session.as_deref(), Some("alice"));
    assert_eq!(app.get_current_route().id, RouteId::Home);

    app.queue = vec![track("a", "b")];
    app.play_track_at(0);
    app.logout();

    assert_eq!(app.session, None);
    assert!(app.queue.is_empty());
    assert_eq!(app.now_playing, None);
    assert_eq!(app.get_current_route().id, RouteId::Auth);
  }

  #[test]
  fn deleting_the_active_playlist_empties_the_queue() {
    let dir = tempdir().unwrap();
    let storage = Storage::from_dir(dir.path()).unwrap();

    let mut app = App::default();
    app.storage = Some(storage);
    app.session = Some("alice".to_string());

    app.queue = vec![track("a", "b")];
    app.save_queue_as("roadtrip");
    app.play_track_at(0);
    assert_eq!(app.active_playlist.as_deref(), Some("roadtrip"));

    app.delete_saved_playlist("roadtrip");
    assert!(app.queue.is_empty());
    assert_eq!(app.now_playing, None);
    assert_eq!(app.active_playlist, None);
    assert!(app.saved_playlist_names.is_empty());
  }

  #[test]
  fn deleting_another_playlist_keeps_the_queue() {
    let dir = tempdir().unwrap();
    let storage = Storage::from_dir(dir.path()).unwrap();

    let mut app = App::default();
    app.storage = Some(storage);
    app.session = Some("alice".to_string());

    app.queue = vec![track("a", "b")];
    app.save_queue_as("keep");
    if let Some(storage) = &mut app.storage {
      storage.create_playlist("alice", "other").unwrap();
    }
    app.refresh_playlist_names();

    app.delete_saved_playlist("other");
    assert_eq!(app.queue.len(), 1);
    assert_eq!(app.active_playlist.as_deref(), Some("keep"));
  }
}
