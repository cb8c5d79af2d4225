use crate::app::{ActiveBlock, App};
use crate::user_config::Theme;
use ratatui::{
  layout::Rect,
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::{Block, BorderType, Borders, List, ListItem, ListState},
  Frame,
};
use std::time::Duration;

pub const BASIC_VIEW_HEIGHT: u16 = 6;
pub const SMALL_TERMINAL_HEIGHT: u16 = 45;

pub fn get_highlight_state(app: &App, block_to_match: ActiveBlock) -> (bool, bool) {
  let current_route = app.get_current_route();
  (
    current_route.active_block == block_to_match,
    current_route.hovered_block == block_to_match,
  )
}

pub fn get_color((is_active, is_hovered): (bool, bool), theme: Theme) -> Style {
  match (is_active, is_hovered) {
    (true, _) => Style::default().fg(theme.selected).bg(theme.background),
    (false, true) => Style::default().fg(theme.hovered).bg(theme.background),
    _ => Style::default().fg(theme.inactive).bg(theme.background),
  }
}

pub fn draw_selectable_list<S>(
  f: &mut Frame<'_>,
  app: &App,
  layout_chunk: Rect,
  title: &str,
  items: &[S],
  highlight_state: (bool, bool),
  selected_index: Option<usize>,
) where
  S: std::convert::AsRef<str>,
{
  let mut state = ListState::default();
  state.select(selected_index);

  let lst_items: Vec<ListItem> = items
    .iter()
    .map(|i| ListItem::new(Span::raw(i.as_ref())))
    .collect();

  let block = Block::default()
    .borders(Borders::ALL)
    .border_type(BorderType::Rounded)
    .title(Span::styled(
      title,
      get_color(highlight_state, app.user_config.theme),
    ))
    .border_style(get_color(highlight_state, app.user_config.theme));

  let list = List::new(lst_items)
    .block(block)
    .style(app.user_config.theme.base_style())
    .highlight_style(get_color(highlight_state, app.user_config.theme).add_modifier(Modifier::BOLD))
    .highlight_symbol(Line::from("▶ ").style(get_color(highlight_state, app.user_config.theme)));
  f.render_stateful_widget(list, layout_chunk, &mut state);
}

pub fn millis_to_minutes(millis: u128) -> String {
  let minutes = millis / 60000;
  let seconds = (millis % 60000) / 1000;
  let seconds_display = if seconds < 10 {
    format!("0{}", seconds)
  } else {
    format!("{}", seconds)
  };

  if seconds == 60 {
    format!("{}:00", minutes + 1)
  } else {
    format!("{}:{}", minutes, seconds_display)
  }
}

pub fn display_track_progress(progress: u128, track_duration: Duration) -> String {
  let duration = millis_to_minutes(track_duration.as_millis());
  let progress_display = millis_to_minutes(progress);
  let remaining = millis_to_minutes(track_duration.as_millis().saturating_sub(progress));

  format!("{}/{} (-{})", progress_display, duration, remaining,)
}

pub fn get_track_progress_percentage(song_progress_ms: u128, track_duration_ms: u128) -> f64 {
  if track_duration_ms == 0 {
    return 0.0;
  }
  (song_progress_ms as f64 / track_duration_ms as f64).clamp(0.0, 1.0)
}

pub fn get_main_layout_margin(app: &App) -> u16 {
  if app.size.height > SMALL_TERMINAL_HEIGHT {
    1
  } else {
    0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_millis_to_minutes() {
    assert_eq!(millis_to_minutes(0), "0:00");
    assert_eq!(millis_to_minutes(1000), "0:01");
    assert_eq!(millis_to_minutes(30_000), "0:30");
    assert_eq!(millis_to_minutes(90_000), "1:30");
  }

  #[test]
  fn test_progress_percentage_bounds() {
    assert_eq!(get_track_progress_percentage(0, 0), 0.0);
    assert_eq!(get_track_progress_percentage(15_000, 30_000), 0.5);
    assert_eq!(get_track_progress_percentage(45_000, 30_000), 1.0);
  }
}
