use crate::app::App;
use crate::model::{CatalogSearchResponse, LyricsResponse, Track};
use crate::player::PlayerCommand;
use anyhow::anyhow;
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tokio::sync::Mutex;

const SEARCH_ENDPOINT: &str = "https://itunes.apple.com/search";
const LYRICS_ENDPOINT: &str = "https://api.lyrics.ovh/v1";
const SEARCH_LIMIT: u32 = 50;

/// Keywords for the post-login catalog load, picked at random
const INITIAL_KEYWORDS: [&str; 9] = [
  "love",
  "party",
  "rock",
  "pop",
  "instrumental",
  "bollywood",
  "ed sheeran",
  "arijit singh",
  "shakira",
];

pub enum IoEvent {
  /// Fetch the catalog for a random keyword (post-login load). Carries the
  /// generation stamped at dispatch time like any other search.
  LoadInitialTracks(u64),
  /// Keyword search; the generation stamps the request so a slow response
  /// cannot overwrite a newer search
  SearchTracks(String, u64),
  /// Fetch the preview audio for a track and hand it to the audio engine
  StartPlayback(Box<Track>),
  /// Fetch lyrics by (artist, title); applied only while the track key still
  /// matches the playback pointer
  GetLyrics(String, String, u64),
}

pub struct Network {
  client: reqwest::Client,
  player_tx: Sender<PlayerCommand>,
  pub app: Arc<Mutex<App>>,
}

impl Network {
  pub fn new(app: &Arc<Mutex<App>>, player_tx: Sender<PlayerCommand>) -> Self {
    Network {
      client: reqwest::Client::new(),
      player_tx,
      app: Arc::clone(app),
    }
  }

  pub async fn handle_network_event(&mut self, io_event: IoEvent) {
    match io_event {
      IoEvent::LoadInitialTracks(generation) => {
        self.load_initial_tracks(generation).await;
      }
      IoEvent::SearchTracks(query, generation) => {
        self.search_tracks(query, generation).await;
      }
      IoEvent::StartPlayback(track) => {
        self.start_playback(*track).await;
      }
      IoEvent::GetLyrics(artist, title, track_key) => {
        self.get_lyrics(artist, title, track_key).await;
      }
    };

    let mut app = self.app.lock().await;
    app.is_loading = false;
  }

  async fn handle_error(&mut self, e: anyhow::Error) {
    let mut app = self.app.lock().await;
    app.handle_error(e);
  }

  async fn load_initial_tracks(&mut self, generation: u64) {
    let keyword = INITIAL_KEYWORDS
      .choose(&mut rand::thread_rng())
      .unwrap_or(&INITIAL_KEYWORDS[0])
      .to_string();
    info!("initial catalog load with keyword \"{}\"", keyword);
    self.search_tracks(keyword, generation).await;
  }

  async fn search_tracks(&mut self, query: String, generation: u64) {
    let limit = SEARCH_LIMIT.to_string();
    let params = [
      ("term", query.as_str()),
      ("media", "music"),
      ("limit", limit.as_str()),
    ];

    let response = match self.client.get(SEARCH_ENDPOINT).query(&params).send().await {
      Ok(response) => response,
      Err(e) => {
        warn!("catalog search failed: {}", e);
        self.handle_error(anyhow!("Catalog search failed: {}", e)).await;
        return;
      }
    };

    let response = match response.error_for_status() {
      Ok(response) => response,
      Err(e) => {
        warn!("catalog search returned an error status: {}", e);
        self.handle_error(anyhow!("Catalog search failed: {}", e)).await;
        return;
      }
    };

    let parsed = match response.json::<CatalogSearchResponse>().await {
      Ok(parsed) => parsed,
      Err(e) => {
        self
          .handle_error(anyhow!("Malformed catalog response: {}", e))
          .await;
        return;
      }
    };

    let tracks: Vec<Track> = parsed
      .results
      .into_iter()
      .filter_map(Track::from_search_result)
      .collect();

    let mut app = self.app.lock().await;
    if app.search_generation != generation {
      debug!(
        "dropping stale search response for \"{}\" (generation {} < {})",
        query, generation, app.search_generation
      );
      return;
    }

    if tracks.is_empty() {
      info!("no playable results for \"{}\"", query);
      app.set_status(format!("No results found for \"{}\"", query));
      let _ = self.player_tx.send(PlayerCommand::Pause);
      app.is_playing = false;
      return;
    }

    info!("search \"{}\" returned {} playable tracks", query, tracks.len());
    app.active_playlist = None;
    app.replace_queue(tracks, true);
  }

  /// Download the preview bytes and hand them to the audio engine. Responses
  /// for a track the user has already skipped away from are dropped.
  async fn start_playback(&mut self, track: Track) {
    let response = match self.client.get(&track.preview_url).send().await {
      Ok(response) => response,
      Err(e) => {
        // Playback failures are log-only; the UI keeps its last state
        warn!("failed to fetch preview for \"{}\": {}", track.title, e);
        return;
      }
    };

    let bytes = match response.error_for_status() {
      Ok(response) => match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
          warn!("failed to read preview body for \"{}\": {}", track.title, e);
          return;
        }
      },
      Err(e) => {
        warn!("preview request for \"{}\" rejected: {}", track.title, e);
        return;
      }
    };

    let app = self.app.lock().await;
    if app.now_playing != Some(track.key) {
      debug!(
        "dropping fetched audio for \"{}\": pointer moved on",
        track.title
      );
      return;
    }
    drop(app);

    if self
      .player_tx
      .send(PlayerCommand::Play(bytes.to_vec()))
      .is_err()
    {
      warn!("audio engine is gone, dropping fetched preview");
    }
  }

  async fn get_lyrics(&mut self, artist: String, title: String, track_key: u64) {
    let url = format!("{}/{}/{}", LYRICS_ENDPOINT, artist, title);

    let lyrics = match self.client.get(&url).send().await {
      Ok(response) if response.status().is_success() => {
        match response.json::<LyricsResponse>().await {
          Ok(body) if !body.lyrics.trim().is_empty() => Some(body.lyrics),
          Ok(_) => None,
          Err(e) => {
            warn!("malformed lyrics response for {} - {}: {}", artist, title, e);
            None
          }
        }
      }
      Ok(_) => None,
      Err(e) => {
        warn!("lyrics lookup failed for {} - {}: {}", artist, title, e);
        None
      }
    };

    // Only applied while this is still the playing track; a slow lookup must
    // not overwrite the display for a newer one
    let mut app = self.app.lock().await;
    if !app.apply_lyrics(track_key, lyrics) {
      debug!("dropping stale lyrics for {} - {}", artist, title);
    }
  }
}
