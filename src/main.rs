mod app;
mod audio;
mod banner;
mod event;
mod handlers;
mod model;
mod network;
mod player;
mod storage;
mod ui;
mod user_config;

use crate::app::{ActiveBlock, App};
use crate::event::Key;
use anyhow::{anyhow, Result};
use backtrace::Backtrace;
use banner::BANNER;
use clap::{Arg, Command as ClapApp};
use clap_complete::{generate, Shell};
use crossterm::{cursor::MoveTo, execute, terminal::SetTitle, ExecutableCommand};
use log::{info, warn};
use network::{IoEvent, Network};
use player::PlayerEvent;
use ratatui::backend::Backend;
use std::{
  fs,
  io::{self, stdout, Write},
  panic,
  path::PathBuf,
  sync::Arc,
};
use storage::Storage;
use tokio::sync::Mutex;
use user_config::{UserConfig, UserConfigPaths};

fn setup_logging() -> anyhow::Result<()> {
  // Get the current Process ID
  let pid = std::process::id();

  // Construct the log file path using the PID
  let log_dir = "/tmp/tunatui_logs/";
  let log_path = format!("{}/tunatuilog{}", log_dir, pid);

  // Ensure the directory exists. If not, create.
  if !std::path::Path::new(log_dir).exists() {
    std::fs::create_dir_all(log_dir)
      .map_err(|e| anyhow::anyhow!("Failed to create log directory {}: {}", log_dir, e))?;
  }
  // define format of log messages.
  fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "{}[{}][{}] {}",
        chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
        record.target(),
        record.level(),
        message
      ))
    })
    .level(log::LevelFilter::Info)
    .chain(fern::log_file(&log_path)?)
    .apply()
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

  // Print the location of log for user reference.
  println!("Logging to: {}", log_path);

  Ok(())
}

fn install_panic_hook() {
  let default_hook = panic::take_hook();
  panic::set_hook(Box::new(move |info| {
    ratatui::restore();
    let panic_log_path = dirs::home_dir().map(|home| {
      home
        .join(".config")
        .join("tunatui")
        .join("tunatui_panic.log")
    });

    if let Some(path) = panic_log_path.as_ref() {
      if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
      }
      if let Ok(mut f) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
      {
        let _ = writeln!(f, "\n==== tunatui panic ====");
        let _ = writeln!(f, "{}", info);
        let _ = writeln!(f, "{:?}", Backtrace::new());
      }
      eprintln!("A crash log was written to: {}", path.to_string_lossy());
    }
    default_hook(info);

    if cfg!(debug_assertions) && std::env::var_os("RUST_BACKTRACE").is_none() {
      eprintln!("{:?}", Backtrace::new());
    }
  }));
}

#[tokio::main]
async fn main() -> Result<()> {
  setup_logging()?;
  info!("tunatui {} starting up", env!("CARGO_PKG_VERSION"));

  install_panic_hook();
  info!("panic hook configured");

  let mut clap_app = ClapApp::new(env!("CARGO_PKG_NAME"))
    .version(env!("CARGO_PKG_VERSION"))
    .author(env!("CARGO_PKG_AUTHORS"))
    .about(env!("CARGO_PKG_DESCRIPTION"))
    .override_usage("Press `?` while running the app to see keybindings")
    .before_help(BANNER)
    .after_help("Configuration is stored in $HOME/.config/tunatui/config.yml")
    .arg(
      Arg::new("tick-rate")
        .short('t')
        .long("tick-rate")
        .help("Set the tick rate (milliseconds): the lower the number the higher the FPS.")
        .long_help(
          "Specify the tick rate in milliseconds: the lower the number the \
higher the FPS. It can be nicer to have a lower value when you want to use the audio visualizer \
of the app. Beware that this comes at a CPU cost!",
        ),
    )
    .arg(
      Arg::new("config")
        .short('c')
        .long("config")
        .help("Specify configuration file path."),
    )
    .arg(
      Arg::new("completions")
        .long("completions")
        .help("Generates completions for your preferred shell")
        .value_parser(["bash", "zsh", "fish", "power-shell", "elvish"])
        .value_name("SHELL"),
    );

  let matches = clap_app.clone().get_matches();

  // Shell completions don't need any player work
  if let Some(s) = matches.get_one::<String>("completions") {
    let shell = match s.as_str() {
      "fish" => Shell::Fish,
      "bash" => Shell::Bash,
      "zsh" => Shell::Zsh,
      "power-shell" => Shell::PowerShell,
      "elvish" => Shell::Elvish,
      _ => return Err(anyhow!("no completions avaible for '{}'", s)),
    };
    generate(shell, &mut clap_app, "tunatui", &mut io::stdout());
    return Ok(());
  }

  let mut user_config = UserConfig::new();
  if let Some(config_file_path) = matches.get_one::<String>("config") {
    let config_file_path = PathBuf::from(config_file_path);
    let path = UserConfigPaths { config_file_path };
    user_config.path_to_config.replace(path);
  }
  user_config.load_config()?;
  info!("user config loaded successfully");

  if let Some(tick_rate) = matches
    .get_one::<String>("tick-rate")
    .and_then(|tick_rate| tick_rate.parse().ok())
  {
    if tick_rate >= 1000 {
      panic!("Tick rate must be below 1000");
    } else {
      user_config.behavior.tick_rate_milliseconds = tick_rate;
    }
  }

  let storage = Storage::new()?;
  info!("durable storage opened");

  // The analyzer is shared between the audio engine (producer) and the UI
  // tick (consumer)
  let analyzer = audio::create_shared_analyzer();
  let initial_volume = user_config.behavior.volume_percent as f32 / 100.0;
  let (player_tx, player_events) = player::spawn_player(analyzer.clone(), initial_volume);
  info!("audio engine spawned");

  let (sync_io_tx, sync_io_rx) = std::sync::mpsc::channel::<IoEvent>();

  // Initialise app state
  let app = Arc::new(Mutex::new(App::new(
    sync_io_tx,
    player_tx.clone(),
    user_config.clone(),
    storage,
  )));

  {
    let mut app_mut = app.lock().await;
    app_mut.analyzer = Some(analyzer);
  }

  let cloned_app = Arc::clone(&app);
  info!("spawning network event handler");
  tokio::spawn(async move {
    let mut network = Network::new(&app, player_tx);
    start_tokio(sync_io_rx, &mut network).await;
  });

  let app_for_player_events = Arc::clone(&cloned_app);
  info!("spawning player event handler");
  tokio::spawn(async move {
    handle_player_events(player_events, app_for_player_events).await;
  });

  // The UI must run in the "main" thread
  info!("starting terminal ui event loop");
  start_ui(user_config, &cloned_app).await?;

  Ok(())
}

async fn start_tokio(io_rx: std::sync::mpsc::Receiver<IoEvent>, network: &mut Network) {
  while let Ok(io_event) = io_rx.recv() {
    network.handle_network_event(io_event).await;
  }
}

/// Apply lifecycle events from the audio engine to app state. Track
/// completion advances the queue; errors are logged and the UI keeps its
/// last good state.
async fn handle_player_events(
  mut event_rx: tokio::sync::mpsc::UnboundedReceiver<PlayerEvent>,
  app: Arc<Mutex<App>>,
) {
  while let Some(event) = event_rx.recv().await {
    match event {
      PlayerEvent::Status {
        position,
        duration,
        is_playing,
      } => {
        // Skip this update when the UI thread is busy; the next one is at
        // most 200ms away
        if let Ok(mut app) = app.try_lock() {
          if app.now_playing.is_some() {
            app.song_progress_ms = position.as_millis();
            app.duration_ms = duration.as_millis();
            app.is_playing = is_playing;
          }
        }
      }
      PlayerEvent::Ended => {
        let mut app = app.lock().await;
        info!("track finished, advancing queue");
        app.next_track();
      }
      PlayerEvent::Error(e) => {
        warn!("audio engine reported: {}", e);
      }
    }
  }
}

async fn start_ui(user_config: UserConfig, app: &Arc<Mutex<App>>) -> Result<()> {
  info!("ui thread initialized");
  use ratatui::{prelude::Style, widgets::Block};

  // Terminal initialization
  let mut terminal = ratatui::init();

  if user_config.behavior.set_window_title {
    execute!(stdout(), SetTitle("tunatui"))?;
  }

  let events = event::Events::new(user_config.behavior.tick_rate_milliseconds);

  let mut is_first_render = true;

  loop {
    let terminal_size = terminal.backend().size().ok();
    {
      let mut app = app.lock().await;

      // Get the size of the screen on each loop to account for resize event
      if let Some(size) = terminal_size {
        // Reset the help menu if the terminal was resized
        if is_first_render || app.size != size {
          app.help_menu_max_lines = 0;
          app.help_menu_offset = 0;
          app.help_menu_page = 0;

          app.size = size;

          // Based on the size of the terminal, adjust how many lines are
          // displayed in the help menu
          if app.size.height > 8 {
            app.help_menu_max_lines = (app.size.height as u32) - 8;
          } else {
            app.help_menu_max_lines = 0;
          }
        }
      };

      let current_route = app.get_current_route();
      terminal.draw(|f| {
        f.render_widget(
          Block::default().style(Style::default().bg(app.user_config.theme.background)),
          f.area(),
        );
        match current_route.active_block {
          ActiveBlock::HelpMenu => ui::draw_help_menu(f, &app),
          ActiveBlock::Error => ui::draw_error_screen(f, &app),
          ActiveBlock::Analysis => ui::audio_analysis::draw(f, &app),
          ActiveBlock::BasicView => ui::draw_basic_view(f, &app),
          ActiveBlock::Auth => ui::draw_auth_screen(f, &app),
          _ => ui::draw_main_layout(f, &app),
        }
      })?;

      if current_route.active_block == ActiveBlock::Input {
        terminal.show_cursor()?;
      } else {
        terminal.hide_cursor()?;
      }

      let cursor_offset = if app.size.height > ui::util::SMALL_TERMINAL_HEIGHT {
        2
      } else {
        1
      };

      // Put the cursor back inside the input box
      terminal
        .backend_mut()
        .execute(MoveTo(cursor_offset + app.input_cursor_position, cursor_offset))?;
    }

    match events.next()? {
      event::Event::Input(key) => {
        let mut app = app.lock().await;
        if key == Key::Ctrl('c') {
          app.close_io_channel();
          break;
        }

        let current_active_block = app.get_current_route().active_block;

        // The input and auth blocks need to swallow the global key presses
        // (`q`, `-`, space and friends are all typeable characters)
        if current_active_block == ActiveBlock::Input {
          handlers::input_handler(key, &mut app);
        } else if current_active_block == ActiveBlock::Auth {
          handlers::auth_handler(key, &mut app);
        } else if key == app.user_config.keys.back {
          // Go back through navigation stack and exit the app if there are
          // no more places to back to
          let pop_result = app.pop_navigation_stack();
          if pop_result.is_none() {
            app.close_io_channel();
            break; // Exit application
          }
        } else {
          handlers::handle_app(key, &mut app);
        }
      }
      event::Event::Tick => {
        let mut app = app.lock().await;
        app.update_on_tick();
      }
    }

    if is_first_render {
      let mut app = app.lock().await;
      app.help_docs_size = ui::help::get_help_docs(&app.user_config.keys).len() as u32;
      is_first_render = false;
    }
  }

  ratatui::restore();

  Ok(())
}
