use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter for track keys. Every descriptor gets a fresh key at
/// fetch (or playlist load) time; the playback pointer tracks keys, never
/// positions, so reordering a queue with duplicate (title, artist) pairs
/// cannot re-target the pointer.
static TRACK_KEY: AtomicU64 = AtomicU64::new(1);

pub fn next_track_key() -> u64 {
  TRACK_KEY.fetch_add(1, Ordering::Relaxed)
}

/// Metadata and locators for one playable preview.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Track {
  #[serde(skip, default = "next_track_key")]
  pub key: u64,
  pub title: String,
  pub artist: String,
  pub preview_url: String,
  pub artwork_url: String,
}

impl Track {
  /// Convert one catalog search record into a track descriptor. Records
  /// without a preview URL are unplayable and dropped.
  pub fn from_search_result(result: CatalogResult) -> Option<Track> {
    let preview_url = result.preview_url?;
    Some(Track {
      key: next_track_key(),
      title: result.track_name?,
      artist: result.artist_name?,
      preview_url,
      artwork_url: result
        .artwork_url100
        .map(|url| url.replace("100x100", "300x300"))
        .unwrap_or_default(),
    })
  }

  pub fn display_label(&self) -> String {
    format!("{} - {}", self.title, self.artist)
  }
}

/// Response shape of the iTunes search endpoint.
#[derive(Deserialize, Debug)]
pub struct CatalogSearchResponse {
  #[serde(default)]
  pub results: Vec<CatalogResult>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResult {
  pub track_name: Option<String>,
  pub artist_name: Option<String>,
  pub preview_url: Option<String>,
  pub artwork_url100: Option<String>,
}

/// Response shape of the lyrics.ovh endpoint. A missing track is a 404, not
/// a field in the body.
#[derive(Deserialize, Debug)]
pub struct LyricsResponse {
  pub lyrics: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn full_result() -> CatalogResult {
    CatalogResult {
      track_name: Some("Yellow".to_string()),
      artist_name: Some("Coldplay".to_string()),
      preview_url: Some("https://audio.example/yellow.m4a".to_string()),
      artwork_url100: Some("https://img.example/abc/100x100bb.jpg".to_string()),
    }
  }

  #[test]
  fn artwork_is_upscaled_by_url_substitution() {
    let track = Track::from_search_result(full_result()).unwrap();
    assert_eq!(track.artwork_url, "https://img.example/abc/300x300bb.jpg");
  }

  #[test]
  fn results_without_preview_are_dropped() {
    let mut result = full_result();
    result.preview_url = None;
    assert!(Track::from_search_result(result).is_none());
  }

  #[test]
  fn missing_artwork_becomes_empty_locator() {
    let mut result = full_result();
    result.artwork_url100 = None;
    let track = Track::from_search_result(result).unwrap();
    assert!(track.artwork_url.is_empty());
  }

  #[test]
  fn keys_are_unique_per_fetch() {
    let a = Track::from_search_result(full_result()).unwrap();
    let b = Track::from_search_result(full_result()).unwrap();
    assert_ne!(a.key, b.key);
  }

  #[test]
  fn deserialized_tracks_get_fresh_keys() {
    let json = r#"{"title":"Yellow","artist":"Coldplay","preview_url":"u","artwork_url":"a"}"#;
    let a: Track = serde_json::from_str(json).unwrap();
    let b: Track = serde_json::from_str(json).unwrap();
    assert_ne!(a.key, b.key);
  }
}
