//! Serenade - a terminal valentine card
//!
//! A question with an evasive No button, a confetti celebration, and a
//! music player with synced bilingual lyrics and a live spectrum.

mod config;

use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::Receiver;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::Span,
    widgets::{Block, Borders},
    Terminal,
};

use config::Config;
use serenade_audio::{AudioCommand, AudioEngine, AudioEvent, EngineState, TrackLoader};
use serenade_lyrics::load_or_empty;
use serenade_tui::{
    hit, AppState, ButtonAreaWidget, ConfettiWidget, LyricWidget, SpectrumWidget, TransportWidget,
};
use serenade_tui::widgets::{no_button_rect, yes_button_rect};

/// Frame rate for UI updates
const FPS: u64 = 30;

const QUESTION: &str = "Will you be my valentine?";
const CELEBRATION_TITLE: &str = "♥ Yay! ♥";
const CELEBRATION_SUBTITLE: &str = "오늘부터 1일";

fn main() -> anyhow::Result<()> {
    init_logging();

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Create audio channels
    let (cmd_tx, cmd_rx, evt_tx, evt_rx) = AudioEngine::create_channels();

    // Shutdown flag
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_audio = shutdown.clone();

    // Spawn audio thread
    let audio_handle = thread::spawn(move || {
        run_audio_thread(cmd_rx, evt_tx, shutdown_audio);
    });

    // Create engine handle for main thread
    let engine = AudioEngine::new(cmd_tx, evt_rx);

    // Run main event loop
    let result = run_app(&mut terminal, engine, shutdown.clone());

    // Cleanup
    shutdown.store(true, Ordering::SeqCst);
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Wait for audio thread
    let _ = audio_handle.join();

    result
}

/// Log to a file in the data dir; stdout belongs to the terminal UI
fn init_logging() {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("serenade");
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    if let Ok(file) = std::fs::File::create(dir.join("serenade.log")) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .try_init();
    }
}

fn run_audio_thread(
    cmd_rx: Receiver<AudioCommand>,
    evt_tx: crossbeam_channel::Sender<AudioEvent>,
    shutdown: Arc<AtomicBool>,
) {
    // Get audio host and device
    let host = cpal::default_host();
    let device = match host.default_output_device() {
        Some(d) => d,
        None => {
            let _ = evt_tx.send(AudioEvent::Error("No audio output device found".into()));
            return;
        }
    };

    let config = match device.default_output_config() {
        Ok(c) => c,
        Err(e) => {
            let _ = evt_tx.send(AudioEvent::Error(format!(
                "Failed to get audio config: {}",
                e
            )));
            return;
        }
    };

    let sample_rate = config.sample_rate().0;
    let channels = config.channels() as usize;

    // Create engine state
    let engine_state = Arc::new(std::sync::Mutex::new(EngineState::new(sample_rate)));
    let engine_for_callback = engine_state.clone();

    // Pre-allocate mono conversion buffer (avoid allocation in audio callback)
    let mut mono_conversion_buffer = vec![0.0f32; 16384];

    // State update interval
    let mut last_state_update = Instant::now();
    let state_update_interval = Duration::from_millis(33); // ~30fps

    // Build audio stream
    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            // Use try_lock to avoid blocking the real-time audio thread
            // On contention (rare), output silence rather than blocking
            if let Ok(mut state) = engine_for_callback.try_lock() {
                if channels == 2 {
                    state.process(data);
                } else {
                    process_mono(&mut state, data, &mut mono_conversion_buffer);
                }
            } else {
                data.fill(0.0);
            }
        },
        |err| {
            tracing::error!("audio stream error: {}", err);
        },
        None,
    );

    let stream = match stream {
        Ok(s) => s,
        Err(e) => {
            let _ = evt_tx.send(AudioEvent::Error(format!(
                "Failed to create audio stream: {}",
                e
            )));
            return;
        }
    };

    if let Err(e) = stream.play() {
        let _ = evt_tx.send(AudioEvent::Error(format!("Failed to start audio: {}", e)));
        return;
    }

    // Command processing loop
    while !shutdown.load(Ordering::Relaxed) {
        // Process commands
        match cmd_rx.recv_timeout(Duration::from_millis(10)) {
            Ok(AudioCommand::Shutdown) => break,
            Ok(cmd) => {
                if let Ok(mut state) = engine_state.lock() {
                    state.handle_command(cmd);
                }
            }
            Err(_) => {}
        }

        // Send state updates periodically
        if last_state_update.elapsed() >= state_update_interval {
            if let Ok(state) = engine_state.lock() {
                let _ = evt_tx.try_send(state.snapshot());
            }
            last_state_update = Instant::now();
        }
    }
}

/// Downmix the engine's stereo frames into a mono output buffer
///
/// Works through `scratch` in chunks, so a callback buffer larger than the
/// pre-allocated scratch space is handled without allocating.
fn process_mono(state: &mut EngineState, data: &mut [f32], scratch: &mut [f32]) {
    let frames_per_chunk = scratch.len() / 2;
    for chunk in data.chunks_mut(frames_per_chunk) {
        let stereo = &mut scratch[..chunk.len() * 2];
        state.process(stereo);
        for (i, sample) in chunk.iter_mut().enumerate() {
            *sample = (stereo[i * 2] + stereo[i * 2 + 1]) * 0.5;
        }
    }
}

/// Vertical screen regions: card, transport, spectrum, lyric line
fn screen_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::vertical([
        Constraint::Min(8),
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Length(3),
    ])
    .split(area)
}

/// Inner rect of the card's bordered block
fn card_inner(card: Rect) -> Rect {
    Rect::new(
        card.x + 1,
        card.y + 1,
        card.width.saturating_sub(2),
        card.height.saturating_sub(2),
    )
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    engine: AudioEngine,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let mut app = AppState::new();
    let mut rng = rand::rng();
    let track_loader = TrackLoader::new();

    // Load user config (last track, volume)
    let mut config = Config::load();
    if let Some(volume) = config.volume {
        engine.send(AudioCommand::SetVolume(volume));
    }

    // Track from the command line, falling back to the last played one
    let track_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.last_track.clone());
    if let Some(ref path) = track_path {
        load_track(&mut app, &engine, &track_loader, path, &mut config);
    }

    let frame_duration = Duration::from_millis(1000 / FPS);
    let mut last_frame = Instant::now();

    loop {
        // Check for shutdown
        if shutdown.load(Ordering::Relaxed) || app.should_quit {
            engine.send(AudioCommand::Shutdown);
            break;
        }

        // Process audio events
        while let Ok(event) = engine.event_rx.try_recv() {
            app.handle_audio_event(event);
        }

        // Advance live render loops
        app.on_frame(&mut rng);

        // Render
        terminal.draw(|frame| {
            render_ui(frame, &app);
        })?;

        // Current screen geometry for hit-testing and placement
        let size = terminal.size()?;
        let full = Rect::new(0, 0, size.width, size.height);
        let chunks = screen_chunks(full);
        let inner = card_inner(chunks[0]);

        // Handle input
        let timeout = frame_duration.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') => app.quit(),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit()
                    }
                    KeyCode::Char(' ') => engine.send(AudioCommand::Toggle),
                    KeyCode::Left => engine.send(AudioCommand::Nudge(-5.0)),
                    KeyCode::Right => engine.send(AudioCommand::Nudge(5.0)),
                    KeyCode::Up => engine.send(AudioCommand::AdjustVolume(0.05)),
                    KeyCode::Down => engine.send(AudioCommand::AdjustVolume(-0.05)),
                    KeyCode::Char('y') | KeyCode::Enter => {
                        if !app.celebrated {
                            app.celebrate(full, &mut rng);
                            engine.send(AudioCommand::Play);
                        }
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Moved => {
                        app.on_pointer(mouse.column, mouse.row);
                        if !app.celebrated && hit(app.no_rect(inner), (mouse.column, mouse.row)) {
                            app.evade(inner, &mut rng);
                        }
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        app.on_pointer(mouse.column, mouse.row);
                        if !app.celebrated {
                            if hit(yes_button_rect(inner), (mouse.column, mouse.row)) {
                                app.celebrate(full, &mut rng);
                                engine.send(AudioCommand::Play);
                            } else if hit(
                                no_button_rect(inner, app.no_position),
                                (mouse.column, mouse.row),
                            ) {
                                app.evade(inner, &mut rng);
                            }
                        }
                    }
                    _ => {}
                },
                Event::Resize(width, height) => {
                    let full = Rect::new(0, 0, width, height);
                    let chunks = screen_chunks(full);
                    app.on_resize(full, card_inner(chunks[0]), &mut rng);
                }
                _ => {}
            }
        }

        // Maintain frame rate
        let elapsed = last_frame.elapsed();
        if elapsed < frame_duration {
            thread::sleep(frame_duration - elapsed);
        }
        last_frame = Instant::now();
    }

    // Persist volume for next time; without a single engine snapshot the
    // placeholder 0.0 would clobber the saved value
    if app.snapshot_received {
        config.volume = Some(app.player.volume);
        let _ = config.save();
    }

    Ok(())
}

fn load_track(
    app: &mut AppState,
    engine: &AudioEngine,
    loader: &TrackLoader,
    path: &Path,
    config: &mut Config,
) {
    match loader.load(path) {
        Ok(track) => {
            engine.send(AudioCommand::Load(
                track.samples,
                track.sample_rate,
                track.name,
            ));
            config.last_track = Some(path.to_path_buf());
            let _ = config.save();

            // Lyrics sit next to the track with an .lrc extension
            let lyric_path = path.with_extension("lrc");
            let entries = load_or_empty(&lyric_path);
            if entries.is_empty() {
                tracing::info!("no lyrics for {}", path.display());
            }
            app.set_lyrics(entries);
        }
        Err(e) => {
            tracing::warn!("failed to load {}: {}", path.display(), e);
        }
    }
}

fn render_ui(frame: &mut ratatui::Frame, app: &AppState) {
    let area = frame.area();
    let theme = &app.theme;

    // Clear with background
    let background = Block::default().style(theme.normal());
    frame.render_widget(background, area);

    let chunks = screen_chunks(area);

    // Card: question with buttons, or the celebration banner
    if app.celebrated {
        render_celebration(frame, chunks[0], app);
    } else {
        let card = ButtonAreaWidget::new(theme, QUESTION, app.no_position);
        frame.render_widget(card, chunks[0]);
    }

    // Transport panel
    let transport = TransportWidget::new(&app.player, theme);
    frame.render_widget(transport, chunks[1]);

    // Spectrum: live while playing, decorative otherwise
    let spectrum = if app.spectrum_live() {
        SpectrumWidget::live(&app.player.spectrum, theme)
    } else {
        SpectrumWidget::idle(theme)
    };
    frame.render_widget(spectrum, chunks[2]);

    // Active lyric line
    let lyrics = LyricWidget::new(&app.lyric_line, theme);
    frame.render_widget(lyrics, chunks[3]);

    // Confetti overlays everything
    if let Some(field) = &app.confetti {
        frame.render_widget(ConfettiWidget::new(field), area);
    }
}

fn render_celebration(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(" SERENADE ", theme.title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height < 2 {
        return;
    }

    let buf = frame.buffer_mut();
    let center_y = inner.y + inner.height / 2;

    let title_width = CELEBRATION_TITLE.chars().count() as u16;
    if title_width <= inner.width {
        let x = inner.x + (inner.width - title_width) / 2;
        buf.set_string(x, center_y.saturating_sub(1), CELEBRATION_TITLE, theme.title());
    }

    let sub_width = CELEBRATION_SUBTITLE.chars().count() as u16;
    if sub_width <= inner.width {
        let x = inner.x + (inner.width - sub_width) / 2;
        buf.set_string(x, center_y, CELEBRATION_SUBTITLE, theme.dim());
    }
}
