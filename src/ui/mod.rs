pub mod audio_analysis;
pub mod help;
pub mod util;

use crate::app::{ActiveBlock, App, AuthField, AuthMode, InputPurpose, LyricsStatus};
use crate::banner::BANNER;
use help::get_help_docs;
use ratatui::{
  layout::{Alignment, Constraint, Layout, Rect},
  style::{Modifier, Style},
  text::{Line, Span, Text},
  widgets::{Block, BorderType, Borders, Clear, LineGauge, Paragraph, Row, Table, Wrap},
  Frame,
};
use util::{
  display_track_progress, draw_selectable_list, get_color, get_highlight_state,
  get_main_layout_margin, get_track_progress_percentage, BASIC_VIEW_HEIGHT,
};

pub fn draw_main_layout(f: &mut Frame<'_>, app: &App) {
  let margin = get_main_layout_margin(app);

  let [input_area, routes_area, playbar_area] = f.area().layout(
    &Layout::vertical([
      Constraint::Length(3),
      Constraint::Min(1),
      Constraint::Length(BASIC_VIEW_HEIGHT),
    ])
    .margin(margin),
  );

  // Search input and help
  draw_input_and_help_box(f, app, input_area);

  // Saved playlists and the active queue
  draw_routes(f, app, routes_area);

  // Currently playing
  draw_playbar(f, app, playbar_area);

  // Possibly draw confirm dialog
  draw_dialog(f, app);
}

pub fn draw_routes(f: &mut Frame<'_>, app: &App, layout_chunk: Rect) {
  let [playlists_area, queue_area] = layout_chunk.layout(&Layout::horizontal([
    Constraint::Percentage(30),
    Constraint::Percentage(70),
  ]));

  draw_playlists_block(f, app, playlists_area);
  draw_queue_block(f, app, queue_area);
}

pub fn draw_input_and_help_box(f: &mut Frame<'_>, app: &App, layout_chunk: Rect) {
  let [input_area, help_area] = layout_chunk.layout(&Layout::horizontal([
    Constraint::Percentage(65),
    Constraint::Percentage(35),
  ]));

  let highlight_state = get_highlight_state(app, ActiveBlock::Input);

  let title = match app.input_purpose {
    InputPurpose::Search => "Search",
    InputPurpose::CreatePlaylist => "New playlist name",
    InputPurpose::SavePlaylist => "Save playlist as",
  };

  let input_string: String = app.input.iter().collect();
  let lines = Text::from((&input_string).as_str());
  let input = Paragraph::new(lines).block(
    Block::default()
      .borders(Borders::ALL)
      .border_type(BorderType::Rounded)
      .title(Span::styled(
        title,
        get_color(highlight_state, app.user_config.theme),
      ))
      .border_style(get_color(highlight_state, app.user_config.theme)),
  );
  f.render_widget(input, input_area);

  let show_loading = app.is_loading && app.user_config.behavior.show_loading_indicator;
  let help_block_text = if show_loading {
    (app.user_config.theme.hint, "Loading...")
  } else {
    (app.user_config.theme.inactive, "Help")
  };

  let help_text = format!("Type {} for help", app.user_config.keys.help);
  let help = Paragraph::new(help_text)
    .style(Style::default().fg(app.user_config.theme.inactive))
    .block(
      Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
          help_block_text.1,
          Style::default().fg(help_block_text.0),
        ))
        .border_style(Style::default().fg(help_block_text.0)),
    );
  f.render_widget(help, help_area);
}

pub fn draw_playlists_block(f: &mut Frame<'_>, app: &App, layout_chunk: Rect) {
  let highlight_state = get_highlight_state(app, ActiveBlock::Playlists);

  let title = match &app.session {
    Some(user) => format!("Playlists ({})", user),
    None => "Playlists".to_string(),
  };

  draw_selectable_list(
    f,
    app,
    layout_chunk,
    &title,
    &app.saved_playlist_names,
    highlight_state,
    app.selected_playlist_index,
  );
}

pub fn draw_queue_block(f: &mut Frame<'_>, app: &App, layout_chunk: Rect) {
  use ratatui::widgets::{List, ListItem, ListState};

  let highlight_state = get_highlight_state(app, ActiveBlock::Queue);
  let playing_index = app.playing_index();

  let title = match &app.active_playlist {
    Some(name) => format!("Tracks ({})", name),
    None => "Tracks".to_string(),
  };

  let items: Vec<ListItem> = if app.queue.is_empty() {
    vec![ListItem::new(Span::styled(
      "Queue is empty.",
      Style::default().fg(app.user_config.theme.inactive),
    ))]
  } else {
    app
      .queue
      .iter()
      .enumerate()
      .map(|(i, track)| {
        if Some(i) == playing_index {
          let icon = if app.is_playing {
            &app.user_config.behavior.playing_icon
          } else {
            &app.user_config.behavior.paused_icon
          };
          ListItem::new(Span::styled(
            format!("{} {}", icon, track.display_label()),
            Style::default()
              .fg(app.user_config.theme.active)
              .add_modifier(Modifier::BOLD),
          ))
        } else {
          ListItem::new(Span::raw(track.display_label()))
        }
      })
      .collect()
  };

  let mut state = ListState::default();
  if !app.queue.is_empty() {
    state.select(Some(app.selected_queue_index.min(app.queue.len() - 1)));
  }

  let list = List::new(items)
    .block(
      Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
          title,
          get_color(highlight_state, app.user_config.theme),
        ))
        .border_style(get_color(highlight_state, app.user_config.theme)),
    )
    .style(app.user_config.theme.base_style())
    .highlight_style(get_color(highlight_state, app.user_config.theme).add_modifier(Modifier::BOLD))
    .highlight_symbol(
      Line::from("▶ ").style(get_color(highlight_state, app.user_config.theme)),
    );
  f.render_stateful_widget(list, layout_chunk, &mut state);
}

pub fn draw_playbar(f: &mut Frame<'_>, app: &App, layout_chunk: Rect) {
  let [track_area, _, progress_area] = layout_chunk.layout(
    &Layout::vertical([
      Constraint::Percentage(50),
      Constraint::Percentage(25),
      Constraint::Percentage(25),
    ])
    .margin(1),
  );

  if let Some(track) = app.current_track() {
    let play_title = if app.is_playing { "Playing" } else { "Paused" };

    let mut title = format!(
      "{:-7} (Volume: {:-2}%)",
      play_title, app.user_config.behavior.volume_percent
    );

    if let Some(message) = app.status_message.as_ref() {
      title = format!("{} | {}", title, message);
    }

    let title_block = Block::default()
      .borders(Borders::ALL)
      .border_type(BorderType::Rounded)
      .style(Style::default().bg(app.user_config.theme.playbar_background))
      .title(Span::styled(
        &title,
        Style::default().fg(app.user_config.theme.playbar_text),
      ))
      .border_style(Style::default().fg(app.user_config.theme.inactive));

    f.render_widget(title_block, layout_chunk);

    let lines = Text::from(Span::styled(
      track.artist.clone(),
      Style::default().fg(app.user_config.theme.playbar_text),
    ));

    let artist = Paragraph::new(lines)
      .style(Style::default().fg(app.user_config.theme.playbar_text))
      .block(
        Block::default().title(Span::styled(
          &track.title,
          Style::default()
            .fg(app.user_config.theme.selected)
            .add_modifier(Modifier::BOLD),
        )),
      );
    f.render_widget(artist, track_area);

    let duration = std::time::Duration::from_millis(app.duration_ms as u64);
    let perc = get_track_progress_percentage(app.song_progress_ms, app.duration_ms);
    let song_progress_label = display_track_progress(app.song_progress_ms, duration);

    let song_progress = LineGauge::default()
      .filled_style(
        Style::default()
          .fg(app.user_config.theme.playbar_progress)
          .add_modifier(Modifier::BOLD),
      )
      .unfilled_style(
        Style::default()
          .fg(app.user_config.theme.playbar_background)
          .add_modifier(Modifier::BOLD),
      )
      .ratio(perc)
      .filled_symbol("⣿")
      .unfilled_symbol("⣉")
      .label(Span::styled(
        &song_progress_label,
        Style::default().fg(app.user_config.theme.playbar_progress_text),
      ));
    f.render_widget(song_progress, progress_area);
  } else {
    let message = match app.status_message.as_ref() {
      Some(message) => format!("Status: {}", message),
      None => "No song available".to_string(),
    };
    let title_block = Block::default()
      .borders(Borders::ALL)
      .border_type(BorderType::Rounded)
      .style(Style::default().bg(app.user_config.theme.playbar_background))
      .title(Span::styled(
        message,
        Style::default().fg(app.user_config.theme.playbar_text),
      ))
      .border_style(Style::default().fg(app.user_config.theme.inactive));
    f.render_widget(title_block, layout_chunk);
  }
}

pub fn draw_basic_view(f: &mut Frame<'_>, app: &App) {
  let [lyrics_area, playbar_area] = f.area().layout(&Layout::vertical([
    Constraint::Min(0),
    Constraint::Length(BASIC_VIEW_HEIGHT),
  ]));

  draw_lyrics(f, app, lyrics_area);
  draw_playbar(f, app, playbar_area);
}

fn draw_lyrics(f: &mut Frame<'_>, app: &App, area: Rect) {
  let block = Block::default()
    .borders(Borders::ALL)
    .title(Span::styled(
      " Lyrics ",
      Style::default().fg(app.user_config.theme.inactive),
    ))
    .border_style(Style::default().fg(app.user_config.theme.inactive));

  if app.lyrics_status != LyricsStatus::Found {
    let text = match app.lyrics_status {
      LyricsStatus::Loading => "Fetching lyrics...",
      LyricsStatus::NotFound => "Lyrics not found.",
      LyricsStatus::NotStarted => "Play a track to fetch its lyrics.",
      LyricsStatus::Found => "",
    };

    let p = Paragraph::new(text)
      .style(Style::default().fg(app.user_config.theme.inactive))
      .alignment(Alignment::Center)
      .block(block);
    f.render_widget(p, area);
    return;
  }

  if let Some(lyrics) = &app.lyrics {
    let p = Paragraph::new(lyrics.as_str())
      .style(Style::default().fg(app.user_config.theme.text))
      .alignment(Alignment::Center)
      .wrap(Wrap { trim: true })
      .scroll((app.lyrics_scroll, 0))
      .block(block);
    f.render_widget(p, area);
  }
}

pub fn draw_auth_screen(f: &mut Frame<'_>, app: &App) {
  let [banner_area, mode_area, username_area, password_area, message_area] = f.area().layout(
    &Layout::vertical([
      Constraint::Length(8),
      Constraint::Length(1),
      Constraint::Length(3),
      Constraint::Length(3),
      Constraint::Min(2),
    ])
    .horizontal_margin(10)
    .vertical_margin(2),
  );

  let banner = Paragraph::new(BANNER)
    .style(Style::default().fg(app.user_config.theme.banner))
    .alignment(Alignment::Center);
  f.render_widget(banner, banner_area);

  let mode_text = match app.auth.mode {
    AuthMode::Login => "Log in (ctrl-r to switch to registration)",
    AuthMode::Register => "Register (ctrl-r to switch to login)",
  };
  let mode = Paragraph::new(mode_text)
    .style(Style::default().fg(app.user_config.theme.hint))
    .alignment(Alignment::Center);
  f.render_widget(mode, mode_area);

  let field_style = |field: AuthField| {
    if app.auth.focused == field {
      Style::default().fg(app.user_config.theme.selected)
    } else {
      Style::default().fg(app.user_config.theme.inactive)
    }
  };

  let username = Paragraph::new(app.auth.username.as_str()).block(
    Block::default()
      .borders(Borders::ALL)
      .border_type(BorderType::Rounded)
      .title(Span::styled("Username", field_style(AuthField::Username)))
      .border_style(field_style(AuthField::Username)),
  );
  f.render_widget(username, username_area);

  let masked: String = "*".repeat(app.auth.password.chars().count());
  let password = Paragraph::new(masked).block(
    Block::default()
      .borders(Borders::ALL)
      .border_type(BorderType::Rounded)
      .title(Span::styled("Password", field_style(AuthField::Password)))
      .border_style(field_style(AuthField::Password)),
  );
  f.render_widget(password, password_area);

  let mut lines = vec![];
  if let Some(error) = &app.auth.error {
    lines.push(Line::from(Span::styled(
      error.clone(),
      Style::default().fg(app.user_config.theme.error_text),
    )));
  } else if let Some(message) = &app.status_message {
    lines.push(Line::from(Span::styled(
      message.clone(),
      Style::default().fg(app.user_config.theme.hint),
    )));
  }
  lines.push(Line::from(Span::styled(
    "Tab switches fields, Enter submits, ctrl-c quits.",
    Style::default().fg(app.user_config.theme.inactive),
  )));
  let message = Paragraph::new(lines).alignment(Alignment::Center);
  f.render_widget(message, message_area);
}

pub fn draw_error_screen(f: &mut Frame<'_>, app: &App) {
  let [error_area] = f
    .area()
    .layout(&Layout::vertical([Constraint::Percentage(100)]).margin(5));

  let error_paragraph = vec![
    Line::from(Span::raw("Something went wrong:")),
    Line::from(Span::styled(
      app.api_error.clone(),
      Style::default().fg(app.user_config.theme.error_text),
    )),
    Line::from(Span::raw("")),
    Line::from(Span::styled(
      "Press <Esc> to return",
      Style::default().fg(app.user_config.theme.inactive),
    )),
  ];

  let error_screen = Paragraph::new(error_paragraph)
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(app.user_config.theme.text))
    .block(
      Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
          "Error",
          Style::default().fg(app.user_config.theme.error_text),
        ))
        .border_style(Style::default().fg(app.user_config.theme.error_border)),
    );

  f.render_widget(error_screen, error_area);
}

pub fn draw_help_menu(f: &mut Frame<'_>, app: &App) {
  let [help_area] = f
    .area()
    .layout(&Layout::vertical([Constraint::Percentage(100)]).margin(2));

  let white = Style::default().fg(app.user_config.theme.text);
  let gray = Style::default().fg(app.user_config.theme.inactive);

  let help_docs = get_help_docs(&app.user_config.keys);
  let head_offset = (app.help_menu_offset as usize).min(help_docs.len());
  let rows = help_docs[head_offset..]
    .iter()
    .map(|item| Row::new(item.clone()).style(gray));

  let help_menu = Table::new(
    rows,
    [
      Constraint::Length(50),
      Constraint::Length(40),
      Constraint::Length(20),
    ],
  )
  .header(Row::new(vec!["Description", "Event", "Context"]).style(white))
  .block(
    Block::default()
      .borders(Borders::ALL)
      .style(white)
      .title(Span::styled("Help (press <Esc> to go back)", gray))
      .border_style(gray),
  )
  .style(app.user_config.theme.base_style());
  f.render_widget(help_menu, help_area);
}

pub fn draw_dialog(f: &mut Frame<'_>, app: &App) {
  if ActiveBlock::Dialog == app.get_current_route().active_block {
    if let Some(playlist) = app.dialog.as_ref() {
      let bounds = f.area();
      // maybe do this better
      let width = std::cmp::min(bounds.width - 2, 45);
      let height = 8;
      let left = (bounds.width - width) / 2;
      let top = bounds.height / 4;

      let rect = Rect::new(left, top, width, height);

      f.render_widget(Clear, rect);

      let block = Block::default()
        .title(Span::styled(
          "Delete playlist",
          Style::default().fg(app.user_config.theme.inactive),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.user_config.theme.inactive));

      f.render_widget(block, rect);

      let [text_area, button_area] =
        rect.layout(&Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).margin(2));

      let text = Text::from(Span::raw(format!(
        "Are you sure you want to delete the playlist: \"{}\"?",
        playlist
      )));
      let text = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(app.user_config.theme.text));
      f.render_widget(text, text_area);

      let ok_text = Span::raw("Ok");
      let ok = Paragraph::new(ok_text)
        .style(Style::default().fg(if app.confirm {
          app.user_config.theme.hovered
        } else {
          app.user_config.theme.inactive
        }))
        .alignment(Alignment::Center);

      let cancel_text = Span::raw("Cancel");
      let cancel = Paragraph::new(cancel_text)
        .style(Style::default().fg(if app.confirm {
          app.user_config.theme.inactive
        } else {
          app.user_config.theme.hovered
        }))
        .alignment(Alignment::Center);

      let [ok_area, cancel_area] = button_area.layout(&Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
      ]));

      f.render_widget(ok, ok_area);
      f.render_widget(cancel, cancel_area);
    }
  }
}
