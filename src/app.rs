use crate::audio::{AudioEngine, NullAudioEngine, RodioAudioEngine};
use crate::config;
use crate::model::Settings;
use crate::player::{Direction, Player, seek_target};
use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const VOLUME_STEP: f32 = 0.05;

#[derive(Debug, Default)]
pub struct AppStartupOptions {
    pub playlist: Option<PathBuf>,
}

pub fn run(options: AppStartupOptions) -> Result<()> {
    let tracks = config::load_tracks(options.playlist.as_deref())?;
    let settings = config::load_settings().unwrap_or_default();

    let mut player = Player::new(tracks)?;
    if settings.shuffle {
        player.toggle_shuffle();
    }

    let mut audio: Box<dyn AudioEngine> = match RodioAudioEngine::new() {
        Ok(engine) => Box::new(engine),
        Err(_) => Box::new(NullAudioEngine::new()),
    };
    audio.set_volume(settings.volume.clamp(0.0, 1.0));

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut last_tick = Instant::now();
    let mut playlist_rect = ratatui::prelude::Rect::default();

    let result: Result<()> = loop {
        maybe_auto_advance_track(&mut player, &mut *audio);

        // The timeline moves without any state change, so redraw on a timer
        // as well as on the dirty flag.
        if player.dirty || last_tick.elapsed() > Duration::from_millis(250) {
            terminal.draw(|frame| {
                playlist_rect = crate::ui::playlist_rect(frame.area());
                crate::ui::draw(frame, &player, &*audio)
            })?;
            player.dirty = false;
            last_tick = Instant::now();
        }

        if !event::poll(Duration::from_millis(33))? {
            continue;
        }

        match event::read()? {
            Event::Mouse(mouse) => handle_mouse(&mut player, mouse, playlist_rect),
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(&mut player, &mut *audio, key.code, key.modifiers) {
                    break Ok(());
                }
            }
            _ => {}
        }
    };

    audio.stop();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    let save_result = config::save_settings(&Settings {
        volume: audio.volume(),
        shuffle: player.shuffle,
    });
    result?;
    save_result?;
    Ok(())
}

/// Maps one key press onto the player and the engine. Returns true when the
/// app should quit.
fn handle_key(
    player: &mut Player,
    audio: &mut dyn AudioEngine,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> bool {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('q') => return true,
        KeyCode::Char(' ') => {
            player.toggle_play_pause();
            if player.playing {
                if audio.current_track().is_none() {
                    play_current(player, audio);
                } else {
                    audio.resume();
                }
            } else {
                audio.pause();
            }
        }
        KeyCode::Right => {
            player.advance(Direction::Next);
            play_current(player, audio);
        }
        KeyCode::Left => {
            player.advance(Direction::Previous);
            play_current(player, audio);
        }
        KeyCode::Char('s') | KeyCode::Char('S') => player.toggle_shuffle(),
        KeyCode::Down => player.select_next(),
        KeyCode::Up => player.select_prev(),
        KeyCode::Enter => {
            player.activate_selected();
            play_current(player, audio);
        }
        KeyCode::Char(digit @ '0'..='9') => {
            let fraction = f64::from(digit as u8 - b'0') * 10.0;
            match audio.duration() {
                Some(duration) => {
                    if let Err(err) = audio.seek_to(seek_target(fraction, duration)) {
                        player.set_status(&format!("seek error: {err:#}"));
                    } else {
                        player.set_status(&format!("Seek {fraction:.0}%"));
                    }
                }
                None => player.set_status("Seek unavailable: unknown duration"),
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let next = (audio.volume() + VOLUME_STEP).clamp(0.0, 1.0);
            audio.set_volume(next);
            player.set_status(&format!("Volume: {}%", (next * 100.0).round() as u16));
        }
        KeyCode::Char('-') => {
            let next = (audio.volume() - VOLUME_STEP).clamp(0.0, 1.0);
            audio.set_volume(next);
            player.set_status(&format!("Volume: {}%", (next * 100.0).round() as u16));
        }
        _ => {}
    }
    false
}

fn play_current(player: &mut Player, audio: &mut dyn AudioEngine) {
    let source = player.current_track().source.clone();
    if let Err(err) = audio.play(&source) {
        player.set_status(&format!("playback error: {err:#}"));
    }
}

fn maybe_auto_advance_track(player: &mut Player, audio: &mut dyn AudioEngine) {
    if audio.current_track().is_none() || audio.is_paused() || !audio.is_finished() {
        return;
    }

    player.on_ended();
    play_current(player, audio);
}

fn handle_mouse(player: &mut Player, mouse: MouseEvent, playlist_rect: ratatui::prelude::Rect) {
    let inside_playlist = point_in_rect(mouse.column, mouse.row, playlist_rect);
    match mouse.kind {
        MouseEventKind::ScrollDown if inside_playlist => player.select_next(),
        MouseEventKind::ScrollUp if inside_playlist => player.select_prev(),
        _ => {}
    }
}

fn point_in_rect(x: u16, y: u16, rect: ratatui::prelude::Rect) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}
