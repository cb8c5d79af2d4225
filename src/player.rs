use crate::audio::SharedAnalyzer;
use log::{info, warn};
use rodio::{Decoder, OutputStream, Sink, Source};
use std::io::Cursor;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Previews are fixed-length clips; used when the decoder cannot report a
/// duration for the container.
const FALLBACK_DURATION: Duration = Duration::from_secs(30);

/// How often the engine reports position while idle between commands
const STATUS_INTERVAL: Duration = Duration::from_millis(200);

/// Samples accumulated before handing a chunk to the analyzer
const TAP_CHUNK: usize = 1024;

/// Commands accepted by the audio engine thread
pub enum PlayerCommand {
  /// Decode and play a fully fetched preview
  Play(Vec<u8>),
  Pause,
  Resume,
  Stop,
  /// Volume as a 0.0-1.0 multiplier
  SetVolume(f32),
  Seek(Duration),
}

/// Lifecycle events emitted by the audio engine thread
pub enum PlayerEvent {
  Status {
    position: Duration,
    duration: Duration,
    is_playing: bool,
  },
  /// The current source drained to its end
  Ended,
  /// Decode or device failure; the engine stays alive
  Error(String),
}

/// Pass-through source that feeds decoded samples into the spectrum
/// analyzer. Chunked so the audio callback never contends on the lock for
/// long; a busy analyzer just misses one chunk.
struct SampleTap<S> {
  inner: S,
  analyzer: SharedAnalyzer,
  buffer: Vec<f32>,
}

impl<S> SampleTap<S> {
  fn new(inner: S, analyzer: SharedAnalyzer) -> Self {
    Self {
      inner,
      analyzer,
      buffer: Vec::with_capacity(TAP_CHUNK),
    }
  }
}

impl<S> Iterator for SampleTap<S>
where
  S: Source<Item = f32>,
{
  type Item = f32;

  fn next(&mut self) -> Option<f32> {
    let sample = self.inner.next()?;
    self.buffer.push(sample);
    if self.buffer.len() >= TAP_CHUNK {
      if let Ok(mut analyzer) = self.analyzer.try_lock() {
        analyzer.push_samples(&self.buffer);
      }
      self.buffer.clear();
    }
    Some(sample)
  }
}

impl<S> Source for SampleTap<S>
where
  S: Source<Item = f32>,
{
  fn current_frame_len(&self) -> Option<usize> {
    self.inner.current_frame_len()
  }

  fn channels(&self) -> u16 {
    self.inner.channels()
  }

  fn sample_rate(&self) -> u32 {
    self.inner.sample_rate()
  }

  fn total_duration(&self) -> Option<Duration> {
    self.inner.total_duration()
  }
}

/// Spawn the audio engine on its own OS thread and return its command sender
/// plus the event stream. The thread owns the output device and all decoding;
/// the rest of the app only ever talks to it through these channels.
pub fn spawn_player(
  analyzer: SharedAnalyzer,
  initial_volume: f32,
) -> (mpsc::Sender<PlayerCommand>, UnboundedReceiver<PlayerEvent>) {
  let (cmd_tx, cmd_rx) = mpsc::channel::<PlayerCommand>();
  let (event_tx, event_rx) = unbounded_channel::<PlayerEvent>();

  thread::spawn(move || {
    engine_loop(cmd_rx, event_tx, analyzer, initial_volume);
  });

  (cmd_tx, event_rx)
}

fn engine_loop(
  cmd_rx: mpsc::Receiver<PlayerCommand>,
  event_tx: UnboundedSender<PlayerEvent>,
  analyzer: SharedAnalyzer,
  initial_volume: f32,
) {
  let (_stream, stream_handle) = match OutputStream::try_default() {
    Ok(pair) => pair,
    Err(e) => {
      warn!("no audio output device available: {}", e);
      let _ = event_tx.send(PlayerEvent::Error(format!(
        "No audio output device available: {}",
        e
      )));
      // Keep draining commands so senders never error out
      while cmd_rx.recv().is_ok() {}
      return;
    }
  };

  let mut sink = match Sink::try_new(&stream_handle) {
    Ok(sink) => sink,
    Err(e) => {
      warn!("failed to open audio sink: {}", e);
      let _ = event_tx.send(PlayerEvent::Error(format!("Failed to open audio sink: {}", e)));
      while cmd_rx.recv().is_ok() {}
      return;
    }
  };

  let mut volume = initial_volume.clamp(0.0, 1.0);
  sink.set_volume(volume);

  // Bytes of the current preview, kept for the manual-seek fallback
  let mut current_bytes: Option<Vec<u8>> = None;
  let mut total_duration = Duration::ZERO;

  // Time accounting: rodio sinks do not report position, so track it from
  // wall-clock time corrected for pauses and seeks
  let mut playback_start: Option<Instant> = None;
  let mut pause_start: Option<Instant> = None;
  let mut accumulated_pause = Duration::ZERO;
  let mut seek_offset = Duration::ZERO;
  let mut is_playing = false;
  let mut has_started = false;

  let mut last_status_time = Instant::now();
  let mut force_status_update = false;

  loop {
    match cmd_rx.recv_timeout(Duration::from_millis(20)) {
      Ok(cmd) => {
        match cmd {
          PlayerCommand::Play(bytes) => {
            let cursor = Cursor::new(bytes.clone());
            match Decoder::new(cursor) {
              Ok(decoder) => {
                total_duration = decoder.total_duration().unwrap_or(FALLBACK_DURATION);

                // Recreate the sink to prevent sample rate mismatch glitches
                // between consecutive previews
                match Sink::try_new(&stream_handle) {
                  Ok(new_sink) => sink = new_sink,
                  Err(e) => {
                    warn!("failed to recreate audio sink: {}", e);
                    let _ = event_tx.send(PlayerEvent::Error(e.to_string()));
                    continue;
                  }
                }
                sink.set_volume(volume);

                if let Ok(mut analyzer) = analyzer.lock() {
                  analyzer.clear();
                }
                let source = SampleTap::new(decoder.convert_samples::<f32>(), analyzer.clone());
                sink.append(source);
                sink.play();

                current_bytes = Some(bytes);
                playback_start = Some(Instant::now());
                pause_start = None;
                accumulated_pause = Duration::ZERO;
                seek_offset = Duration::ZERO;
                is_playing = true;
                has_started = true;
              }
              Err(e) => {
                warn!("failed to decode preview audio: {}", e);
                let _ = event_tx.send(PlayerEvent::Error(format!("Audio decode failed: {}", e)));
              }
            }
          }
          PlayerCommand::Pause => {
            if !sink.is_paused() {
              sink.pause();
              pause_start = Some(Instant::now());
              is_playing = false;
            }
          }
          PlayerCommand::Resume => {
            if sink.is_paused() {
              sink.play();
              if let Some(start) = pause_start.take() {
                accumulated_pause += start.elapsed();
              }
              is_playing = true;
            }
          }
          PlayerCommand::Stop => {
            sink.stop();
            if let Ok(mut analyzer) = analyzer.lock() {
              analyzer.clear();
            }
            current_bytes = None;
            is_playing = false;
            has_started = false;
            playback_start = None;
            total_duration = Duration::ZERO;
          }
          PlayerCommand::SetVolume(v) => {
            volume = v.clamp(0.0, 1.0);
            sink.set_volume(volume);
          }
          PlayerCommand::Seek(pos) => {
            let pos = pos.min(total_duration);
            if sink.try_seek(pos).is_err() {
              // Seek unsupported by this source; rebuild it skipping ahead
              if let Some(bytes) = &current_bytes {
                let cursor = Cursor::new(bytes.clone());
                if let Ok(decoder) = Decoder::new(cursor) {
                  let source = SampleTap::new(decoder.convert_samples::<f32>(), analyzer.clone())
                    .skip_duration(pos);
                  sink.stop();
                  sink.append(source);
                  sink.play();
                  if !is_playing {
                    sink.pause();
                    pause_start = Some(Instant::now());
                  }
                }
              }
            }
            playback_start = Some(Instant::now());
            accumulated_pause = Duration::ZERO;
            seek_offset = pos;
            if !is_playing {
              pause_start = Some(Instant::now());
            }
          }
        }
        force_status_update = true;
      }
      Err(mpsc::RecvTimeoutError::Timeout) => {}
      Err(mpsc::RecvTimeoutError::Disconnected) => {
        info!("player command channel closed, shutting down audio engine");
        break;
      }
    }

    // Derive the current position from wall clock, pauses and seeks
    let mut position = Duration::ZERO;
    if let Some(start) = playback_start {
      let raw_elapsed = start.elapsed();
      let paused_for = match pause_start {
        Some(p_start) => accumulated_pause + p_start.elapsed(),
        None => accumulated_pause,
      };
      position = (raw_elapsed + seek_offset).saturating_sub(paused_for);
    }
    if total_duration > Duration::ZERO && position > total_duration {
      position = total_duration;
    }

    if has_started && sink.empty() {
      has_started = false;
      is_playing = false;
      playback_start = None;
      if event_tx.send(PlayerEvent::Ended).is_err() {
        break;
      }
    } else if force_status_update || last_status_time.elapsed() >= STATUS_INTERVAL {
      let event = PlayerEvent::Status {
        position,
        duration: total_duration,
        is_playing,
      };
      if event_tx.send(event).is_err() {
        break;
      }
      last_status_time = Instant::now();
      force_status_update = false;
    }
  }
}
