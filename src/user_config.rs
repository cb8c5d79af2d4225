use crate::event::Key;
use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use serde::{Deserialize, Serialize};
use std::{
  fs,
  path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const CONFIG_DIR: &str = ".config";
const APP_CONFIG_DIR: &str = "tunatui";

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UserTheme {
  pub mode: Option<String>,
  pub active: Option<String>,
  pub banner: Option<String>,
  pub error_border: Option<String>,
  pub error_text: Option<String>,
  pub hint: Option<String>,
  pub hovered: Option<String>,
  pub inactive: Option<String>,
  pub playbar_background: Option<String>,
  pub playbar_progress: Option<String>,
  pub playbar_progress_text: Option<String>,
  pub playbar_text: Option<String>,
  pub selected: Option<String>,
  pub text: Option<String>,
  pub background: Option<String>,
  pub header: Option<String>,
}

#[derive(Copy, Clone, Debug)]
pub struct Theme {
  pub active: Color,
  pub banner: Color,
  pub error_border: Color,
  pub error_text: Color,
  pub hint: Color,
  pub hovered: Color,
  pub inactive: Color,
  pub playbar_background: Color,
  pub playbar_progress: Color,
  pub playbar_progress_text: Color,
  pub playbar_text: Color,
  pub selected: Color,
  pub text: Color,
  pub background: Color,
  pub header: Color,
}

impl Theme {
  pub fn base_style(&self) -> Style {
    Style::default().fg(self.text).bg(self.background)
  }
}

impl Default for Theme {
  fn default() -> Self {
    ThemeMode::Dark.to_theme()
  }
}

/// Dark or light rendition of the player. Persisted in the `theme` section of
/// the config file and toggled at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum ThemeMode {
  #[default]
  Dark,
  Light,
}

impl ThemeMode {
  pub fn name(&self) -> &'static str {
    match self {
      ThemeMode::Dark => "dark",
      ThemeMode::Light => "light",
    }
  }

  pub fn from_name(name: &str) -> Self {
    match name {
      "light" => ThemeMode::Light,
      _ => ThemeMode::Dark,
    }
  }

  pub fn toggled(&self) -> Self {
    match self {
      ThemeMode::Dark => ThemeMode::Light,
      ThemeMode::Light => ThemeMode::Dark,
    }
  }

  /// Get the theme colors for this mode
  pub fn to_theme(self) -> Theme {
    // RGB colors for cross-terminal compatibility: named ANSI colors can be
    // remapped by terminal themes, causing inconsistent appearance
    match self {
      ThemeMode::Dark => Theme {
        active: Color::Rgb(0, 180, 180),
        banner: Color::Rgb(0, 200, 200),
        error_border: Color::Rgb(200, 0, 0),
        error_text: Color::Rgb(255, 100, 100),
        hint: Color::Rgb(200, 200, 0),
        hovered: Color::Rgb(180, 0, 180),
        inactive: Color::Rgb(128, 128, 128),
        playbar_background: Color::Rgb(20, 20, 20),
        playbar_progress: Color::Rgb(0, 200, 200),
        playbar_progress_text: Color::Rgb(255, 255, 255),
        playbar_text: Color::Reset,
        selected: Color::Rgb(0, 200, 200),
        text: Color::Reset,
        background: Color::Reset,
        header: Color::Reset,
      },
      ThemeMode::Light => Theme {
        active: Color::Rgb(0, 110, 110),
        banner: Color::Rgb(0, 110, 110),
        error_border: Color::Rgb(157, 0, 6),
        error_text: Color::Rgb(157, 0, 6),
        hint: Color::Rgb(181, 118, 20),
        hovered: Color::Rgb(143, 63, 113),
        inactive: Color::Rgb(146, 131, 116),
        playbar_background: Color::Rgb(235, 235, 225),
        playbar_progress: Color::Rgb(0, 110, 110),
        playbar_progress_text: Color::Rgb(60, 56, 54),
        playbar_text: Color::Rgb(60, 56, 54),
        selected: Color::Rgb(0, 110, 110),
        text: Color::Rgb(60, 56, 54),
        background: Color::Rgb(251, 241, 199),
        header: Color::Rgb(60, 56, 54),
      },
    }
  }
}

/// Available audio visualizer styles
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub enum VisualizerStyle {
  /// Equalizer mode: Uses tui-equalizer with half-block bars and brightness effect
  #[default]
  Equalizer,
  /// BarGraph mode: Uses tui-bar-graph with Braille patterns for high-resolution display
  BarGraph,
}

impl VisualizerStyle {
  pub fn all() -> &'static [VisualizerStyle] {
    &[VisualizerStyle::Equalizer, VisualizerStyle::BarGraph]
  }

  pub fn name(&self) -> &'static str {
    match self {
      VisualizerStyle::Equalizer => "Equalizer",
      VisualizerStyle::BarGraph => "Bar Graph",
    }
  }

  pub fn next(&self) -> Self {
    let styles = Self::all();
    let current_idx = styles.iter().position(|s| s == self).unwrap_or(0);
    let next_idx = (current_idx + 1) % styles.len();
    styles[next_idx]
  }
}

fn parse_key(key: String) -> Result<Key> {
  fn get_single_char(string: &str) -> char {
    match string.chars().next() {
      Some(c) => c,
      None => panic!(),
    }
  }

  match key.len() {
    1 => Ok(Key::Char(get_single_char(key.as_str()))),
    _ => {
      let sections: Vec<&str> = key.split('-').collect();

      if sections.len() > 2 {
        return Err(anyhow!(
          "Shortcut can only have 2 keys, \"{}\" has {}",
          key,
          sections.len()
        ));
      }

      match sections[0].to_lowercase().as_str() {
        "ctrl" => Ok(Key::Ctrl(get_single_char(sections[1]))),
        "alt" => Ok(Key::Alt(get_single_char(sections[1]))),
        "left" => Ok(Key::Left),
        "right" => Ok(Key::Right),
        "up" => Ok(Key::Up),
        "down" => Ok(Key::Down),
        "backspace" | "delete" => Ok(Key::Backspace),
        "del" => Ok(Key::Delete),
        "esc" | "escape" => Ok(Key::Esc),
        "pageup" => Ok(Key::PageUp),
        "pagedown" => Ok(Key::PageDown),
        "space" => Ok(Key::Char(' ')),
        _ => Err(anyhow!("The key \"{}\" is unknown.", sections[0])),
      }
    }
  }
}

fn check_reserved_keys(key: Key) -> Result<()> {
  let reserved = [
    Key::Char('h'),
    Key::Char('j'),
    Key::Char('k'),
    Key::Char('l'),
    Key::Char('H'),
    Key::Char('M'),
    Key::Char('L'),
    Key::Up,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Backspace,
    Key::Enter,
  ];
  for item in reserved.iter() {
    if key == *item {
      return Err(anyhow!(
        "The key {:?} is reserved and cannot be remapped",
        key
      ));
    }
  }
  Ok(())
}

#[derive(Clone)]
pub struct UserConfigPaths {
  pub config_file_path: PathBuf,
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyBindingsString {
  back: Option<String>,
  help: Option<String>,
  search: Option<String>,
  submit: Option<String>,
  toggle_playback: Option<String>,
  next_track: Option<String>,
  previous_track: Option<String>,
  seek_backwards: Option<String>,
  seek_forwards: Option<String>,
  increase_volume: Option<String>,
  decrease_volume: Option<String>,
  move_track_up: Option<String>,
  move_track_down: Option<String>,
  toggle_theme: Option<String>,
  audio_analysis: Option<String>,
  basic_view: Option<String>,
  copy_track_url: Option<String>,
  create_playlist: Option<String>,
  save_playlist: Option<String>,
  logout: Option<String>,
}

#[derive(Clone)]
pub struct KeyBindings {
  pub back: Key,
  pub help: Key,
  pub search: Key,
  pub submit: Key,
  pub toggle_playback: Key,
  pub next_track: Key,
  pub previous_track: Key,
  pub seek_backwards: Key,
  pub seek_forwards: Key,
  pub increase_volume: Key,
  pub decrease_volume: Key,
  pub move_track_up: Key,
  pub move_track_down: Key,
  pub toggle_theme: Key,
  pub audio_analysis: Key,
  pub basic_view: Key,
  pub copy_track_url: Key,
  pub create_playlist: Key,
  pub save_playlist: Key,
  pub logout: Key,
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BehaviorConfigString {
  pub seek_milliseconds: Option<u32>,
  pub volume_increment: Option<u8>,
  pub volume_percent: Option<u8>,
  pub tick_rate_milliseconds: Option<u64>,
  pub show_loading_indicator: Option<bool>,
  pub playing_icon: Option<String>,
  pub paused_icon: Option<String>,
  pub set_window_title: Option<bool>,
  pub visualizer_style: Option<VisualizerStyle>,
}

#[derive(Clone)]
pub struct BehaviorConfig {
  pub seek_milliseconds: u32,
  pub volume_increment: u8,
  pub volume_percent: u8,
  pub tick_rate_milliseconds: u64,
  pub show_loading_indicator: bool,
  pub playing_icon: String,
  pub paused_icon: String,
  pub set_window_title: bool,
  pub visualizer_style: VisualizerStyle,
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserConfigString {
  keybindings: Option<KeyBindingsString>,
  behavior: Option<BehaviorConfigString>,
  theme: Option<UserTheme>,
}

#[derive(Clone)]
pub struct UserConfig {
  pub keys: KeyBindings,
  pub theme: Theme,
  pub theme_mode: ThemeMode,
  pub behavior: BehaviorConfig,
  pub path_to_config: Option<UserConfigPaths>,
}

impl UserConfig {
  pub fn new() -> UserConfig {
    UserConfig {
      theme: Default::default(),
      theme_mode: ThemeMode::default(),
      keys: KeyBindings {
        back: Key::Char('q'),
        help: Key::Char('?'),
        search: Key::Char('/'),
        submit: Key::Enter,
        toggle_playback: Key::Char(' '),
        next_track: Key::Char('n'),
        previous_track: Key::Char('p'),
        seek_backwards: Key::Char('<'),
        seek_forwards: Key::Char('>'),
        increase_volume: Key::Char('+'),
        decrease_volume: Key::Char('-'),
        move_track_up: Key::Char('K'),
        move_track_down: Key::Char('J'),
        toggle_theme: Key::Char('t'),
        audio_analysis: Key::Char('v'),
        basic_view: Key::Char('B'),
        copy_track_url: Key::Char('c'),
        create_playlist: Key::Char('a'),
        save_playlist: Key::Char('s'),
        logout: Key::Ctrl('o'),
      },
      behavior: BehaviorConfig {
        seek_milliseconds: 5 * 1000,
        volume_increment: 10,
        volume_percent: 100,
        tick_rate_milliseconds: 50,
        show_loading_indicator: true,
        playing_icon: "▶".to_string(),
        paused_icon: "⏸".to_string(),
        set_window_title: true,
        visualizer_style: VisualizerStyle::default(),
      },
      path_to_config: None,
    }
  }

  pub fn get_or_build_paths(&mut self) -> Result<()> {
    match dirs::home_dir() {
      Some(home) => {
        let path = Path::new(&home);
        let home_config_dir = path.join(CONFIG_DIR);
        let app_config_dir = home_config_dir.join(APP_CONFIG_DIR);

        if !home_config_dir.exists() {
          fs::create_dir(&home_config_dir)?;
        }

        if !app_config_dir.exists() {
          fs::create_dir(&app_config_dir)?;
        }

        let config_file_path = &app_config_dir.join(FILE_NAME);

        let paths = UserConfigPaths {
          config_file_path: config_file_path.to_path_buf(),
        };
        self.path_to_config = Some(paths);
        Ok(())
      }
      None => Err(anyhow!("No $HOME directory found for user config")),
    }
  }

  pub fn load_keybindings(&mut self, keybindings: KeyBindingsString) -> Result<()> {
    macro_rules! to_keys {
      ($name: ident) => {
        if let Some(key_string) = keybindings.$name {
          self.keys.$name = parse_key(key_string)?;
          check_reserved_keys(self.keys.$name)?;
        }
      };
    }

    to_keys!(back);
    to_keys!(help);
    to_keys!(search);
    to_keys!(submit);
    to_keys!(toggle_playback);
    to_keys!(next_track);
    to_keys!(previous_track);
    to_keys!(seek_backwards);
    to_keys!(seek_forwards);
    to_keys!(increase_volume);
    to_keys!(decrease_volume);
    to_keys!(toggle_theme);
    to_keys!(audio_analysis);
    to_keys!(basic_view);
    to_keys!(copy_track_url);
    to_keys!(create_playlist);
    to_keys!(save_playlist);
    to_keys!(logout);

    // Reorder keys skip the reserved-key check: the defaults J/K shadow the
    // vim-style list jumps on purpose.
    if let Some(key_string) = keybindings.move_track_up {
      self.keys.move_track_up = parse_key(key_string)?;
    }
    if let Some(key_string) = keybindings.move_track_down {
      self.keys.move_track_down = parse_key(key_string)?;
    }

    Ok(())
  }

  pub fn load_theme(&mut self, theme: UserTheme) -> Result<()> {
    if let Some(mode) = &theme.mode {
      self.theme_mode = ThemeMode::from_name(mode);
      self.theme = self.theme_mode.to_theme();
    }

    macro_rules! to_theme_item {
      ($name: ident) => {
        if let Some(theme_item) = theme.$name {
          self.theme.$name = parse_theme_item(&theme_item)?;
        }
      };
    }

    to_theme_item!(active);
    to_theme_item!(banner);
    to_theme_item!(error_border);
    to_theme_item!(error_text);
    to_theme_item!(hint);
    to_theme_item!(hovered);
    to_theme_item!(inactive);
    to_theme_item!(playbar_background);
    to_theme_item!(playbar_progress);
    to_theme_item!(playbar_progress_text);
    to_theme_item!(playbar_text);
    to_theme_item!(selected);
    to_theme_item!(text);
    to_theme_item!(background);
    to_theme_item!(header);
    Ok(())
  }

  pub fn load_behaviorconfig(&mut self, behavior_config: BehaviorConfigString) -> Result<()> {
    if let Some(behavior_string) = behavior_config.seek_milliseconds {
      self.behavior.seek_milliseconds = behavior_string;
    }

    if let Some(behavior_string) = behavior_config.volume_increment {
      if behavior_string > 100 {
        return Err(anyhow!(
          "Volume increment must be between 0 and 100, is {}",
          behavior_string,
        ));
      }
      self.behavior.volume_increment = behavior_string;
    }

    if let Some(volume) = behavior_config.volume_percent {
      self.behavior.volume_percent = volume.min(100);
    }

    if let Some(tick_rate) = behavior_config.tick_rate_milliseconds {
      if tick_rate >= 1000 {
        return Err(anyhow!("Tick rate must be below 1000"));
      } else {
        self.behavior.tick_rate_milliseconds = tick_rate;
      }
    }

    if let Some(loading_indicator) = behavior_config.show_loading_indicator {
      self.behavior.show_loading_indicator = loading_indicator;
    }

    if let Some(paused_icon) = behavior_config.paused_icon {
      self.behavior.paused_icon = paused_icon;
    }

    if let Some(playing_icon) = behavior_config.playing_icon {
      self.behavior.playing_icon = playing_icon;
    }

    if let Some(set_window_title) = behavior_config.set_window_title {
      self.behavior.set_window_title = set_window_title;
    }

    if let Some(visualizer_style) = behavior_config.visualizer_style {
      self.behavior.visualizer_style = visualizer_style;
    }

    Ok(())
  }

  pub fn load_config(&mut self) -> Result<()> {
    let paths = match &self.path_to_config {
      Some(path) => path,
      None => {
        self.get_or_build_paths()?;
        self.path_to_config.as_ref().unwrap()
      }
    };
    if paths.config_file_path.exists() {
      let config_string = fs::read_to_string(&paths.config_file_path)?;
      // serde fails if file is empty
      if config_string.trim().is_empty() {
        return Ok(());
      }

      let config_yml: UserConfigString = serde_yaml::from_str(&config_string)?;

      if let Some(keybindings) = config_yml.keybindings.clone() {
        self.load_keybindings(keybindings)?;
      }

      if let Some(behavior) = config_yml.behavior {
        self.load_behaviorconfig(behavior)?;
      }
      if let Some(theme) = config_yml.theme {
        self.load_theme(theme)?;
      }

      Ok(())
    } else {
      Ok(())
    }
  }

  /// Switch between the dark and light renditions, dropping any per-element
  /// color overrides, and persist the new mode.
  pub fn toggle_theme_mode(&mut self) -> Result<()> {
    self.theme_mode = self.theme_mode.toggled();
    self.theme = self.theme_mode.to_theme();
    self.save_config()
  }

  /// Save the current configuration to the config file
  pub fn save_config(&self) -> Result<()> {
    let paths = match &self.path_to_config {
      Some(path) => path,
      None => return Err(anyhow!("Config path not initialized")),
    };

    // Helper to build behavior config from current values
    let build_behavior = || BehaviorConfigString {
      seek_milliseconds: Some(self.behavior.seek_milliseconds),
      volume_increment: Some(self.behavior.volume_increment),
      volume_percent: Some(self.behavior.volume_percent),
      tick_rate_milliseconds: Some(self.behavior.tick_rate_milliseconds),
      show_loading_indicator: Some(self.behavior.show_loading_indicator),
      playing_icon: Some(self.behavior.playing_icon.clone()),
      paused_icon: Some(self.behavior.paused_icon.clone()),
      set_window_title: Some(self.behavior.set_window_title),
      visualizer_style: Some(self.behavior.visualizer_style),
    };

    let build_theme = || UserTheme {
      mode: Some(self.theme_mode.name().to_string()),
      active: None,
      banner: None,
      error_border: None,
      error_text: None,
      hint: None,
      hovered: None,
      inactive: None,
      playbar_background: None,
      playbar_progress: None,
      playbar_progress_text: None,
      playbar_text: None,
      selected: None,
      text: None,
      background: None,
      header: None,
    };

    // If the file exists, read it first to preserve keybindings and any
    // per-element theme overrides
    let final_config = if paths.config_file_path.exists() {
      let config_string = fs::read_to_string(&paths.config_file_path)?;
      if !config_string.trim().is_empty() {
        let mut existing: UserConfigString = serde_yaml::from_str(&config_string)?;
        existing.behavior = Some(build_behavior());
        let mut theme = existing.theme.take().unwrap_or_else(build_theme);
        theme.mode = Some(self.theme_mode.name().to_string());
        existing.theme = Some(theme);
        existing
      } else {
        UserConfigString {
          keybindings: None,
          behavior: Some(build_behavior()),
          theme: Some(build_theme()),
        }
      }
    } else {
      UserConfigString {
        keybindings: None,
        behavior: Some(build_behavior()),
        theme: Some(build_theme()),
      }
    };

    let content_yml = serde_yaml::to_string(&final_config)?;
    let mut config_file = fs::File::create(&paths.config_file_path)?;
    std::io::Write::write_all(&mut config_file, content_yml.as_bytes())?;

    Ok(())
  }
}

fn parse_theme_item(theme_item: &str) -> Result<Color> {
  let color = match theme_item {
    "Reset" => Color::Reset,
    "Black" => Color::Black,
    "Red" => Color::Red,
    "Green" => Color::Green,
    "Yellow" => Color::Yellow,
    "Blue" => Color::Blue,
    "Magenta" => Color::Magenta,
    "Cyan" => Color::Cyan,
    "Gray" => Color::Gray,
    "DarkGray" => Color::DarkGray,
    "LightRed" => Color::LightRed,
    "LightGreen" => Color::LightGreen,
    "LightYellow" => Color::LightYellow,
    "LightBlue" => Color::LightBlue,
    "LightMagenta" => Color::LightMagenta,
    "LightCyan" => Color::LightCyan,
    "White" => Color::White,
    _ => {
      let colors = theme_item.split(',').collect::<Vec<&str>>();
      if let (Some(r), Some(g), Some(b)) = (colors.first(), colors.get(1), colors.get(2)) {
        Color::Rgb(
          r.trim().parse::<u8>()?,
          g.trim().parse::<u8>()?,
          b.trim().parse::<u8>()?,
        )
      } else {
        println!("Unexpected color {}", theme_item);
        Color::Black
      }
    }
  };

  Ok(color)
}

#[cfg(test)]
mod tests {
  #[test]
  fn test_parse_key() {
    use super::parse_key;
    use crate::event::Key;
    assert_eq!(parse_key(String::from("j")).unwrap(), Key::Char('j'));
    assert_eq!(parse_key(String::from("J")).unwrap(), Key::Char('J'));
    assert_eq!(parse_key(String::from("ctrl-j")).unwrap(), Key::Ctrl('j'));
    assert_eq!(parse_key(String::from("-")).unwrap(), Key::Char('-'));
    assert_eq!(parse_key(String::from("esc")).unwrap(), Key::Esc);
    assert_eq!(parse_key(String::from("del")).unwrap(), Key::Delete);
  }

  #[test]
  fn test_reserved_key() {
    use super::check_reserved_keys;
    use crate::event::Key;

    assert!(
      check_reserved_keys(Key::Enter).is_err(),
      "Enter key should be reserved"
    );
  }

  #[test]
  fn theme_mode_round_trips_through_name() {
    use super::ThemeMode;
    assert_eq!(ThemeMode::from_name("dark"), ThemeMode::Dark);
    assert_eq!(ThemeMode::from_name("light"), ThemeMode::Light);
    assert_eq!(ThemeMode::from_name("nonsense"), ThemeMode::Dark);
    assert_eq!(ThemeMode::Dark.toggled().name(), "light");
    assert_eq!(ThemeMode::Light.toggled().name(), "dark");
  }
}
