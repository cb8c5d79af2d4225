use crate::user_config::KeyBindings;

pub fn get_help_docs(key_bindings: &KeyBindings) -> Vec<Vec<String>> {
  vec![
    vec![
      String::from("Scroll down to next result page"),
      String::from("ctrl-d"),
      String::from("Pagination"),
    ],
    vec![
      String::from("Scroll up to previous result page"),
      String::from("ctrl-u"),
      String::from("Pagination"),
    ],
    vec![
      String::from("Jump to start of list"),
      String::from("H"),
      String::from("Pagination"),
    ],
    vec![
      String::from("Jump to middle of list"),
      String::from("M"),
      String::from("Pagination"),
    ],
    vec![
      String::from("Jump to end of list"),
      String::from("L"),
      String::from("Pagination"),
    ],
    vec![
      String::from("Decrease volume"),
      key_bindings.decrease_volume.to_string(),
      String::from("Playback"),
    ],
    vec![
      String::from("Increase volume"),
      key_bindings.increase_volume.to_string(),
      String::from("Playback"),
    ],
    vec![
      String::from("Toggle playback"),
      key_bindings.toggle_playback.to_string(),
      String::from("Playback"),
    ],
    vec![
      String::from("Seek backwards"),
      key_bindings.seek_backwards.to_string(),
      String::from("Playback"),
    ],
    vec![
      String::from("Seek forwards"),
      key_bindings.seek_forwards.to_string(),
      String::from("Playback"),
    ],
    vec![
      String::from("Seek to 0%-90% of the track"),
      String::from("0-9"),
      String::from("Playback"),
    ],
    vec![
      String::from("Next track"),
      key_bindings.next_track.to_string(),
      String::from("Playback"),
    ],
    vec![
      String::from("Previous track"),
      key_bindings.previous_track.to_string(),
      String::from("Playback"),
    ],
    vec![
      String::from("Move within a panel"),
      String::from("j/k or up/down"),
      String::from("Navigation"),
    ],
    vec![
      String::from("Switch between panels"),
      String::from("h/l or left/right"),
      String::from("Navigation"),
    ],
    vec![
      String::from("Play the selected track"),
      String::from("<Enter>"),
      String::from("Queue"),
    ],
    vec![
      String::from("Move the selected track up"),
      key_bindings.move_track_up.to_string(),
      String::from("Queue"),
    ],
    vec![
      String::from("Move the selected track down"),
      key_bindings.move_track_down.to_string(),
      String::from("Queue"),
    ],
    vec![
      String::from("Search the catalog"),
      key_bindings.search.to_string(),
      String::from("Search"),
    ],
    vec![
      String::from("Load the selected playlist"),
      String::from("<Enter>"),
      String::from("Playlists"),
    ],
    vec![
      String::from("Create a new (empty) playlist"),
      key_bindings.create_playlist.to_string(),
      String::from("Playlists"),
    ],
    vec![
      String::from("Save the queue as a playlist"),
      key_bindings.save_playlist.to_string(),
      String::from("Playlists"),
    ],
    vec![
      String::from("Delete the selected playlist"),
      String::from("D"),
      String::from("Playlists"),
    ],
    vec![
      String::from("Copy preview URL of the playing track"),
      key_bindings.copy_track_url.to_string(),
      String::from("General"),
    ],
    vec![
      String::from("Toggle dark/light theme"),
      key_bindings.toggle_theme.to_string(),
      String::from("General"),
    ],
    vec![
      String::from("Open lyrics view"),
      key_bindings.basic_view.to_string(),
      String::from("General"),
    ],
    vec![
      String::from("Open audio visualizer"),
      key_bindings.audio_analysis.to_string(),
      String::from("General"),
    ],
    vec![
      String::from("Cycle visualizer style (in visualizer)"),
      String::from("V"),
      String::from("General"),
    ],
    vec![
      String::from("Log out"),
      key_bindings.logout.to_string(),
      String::from("General"),
    ],
    vec![
      String::from("Go back or exit"),
      key_bindings.back.to_string(),
      String::from("General"),
    ],
  ]
}
