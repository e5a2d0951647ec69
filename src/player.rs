use crate::model::Track;
use anyhow::Result;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Playlist controller: owns every piece of playback state and decides which
/// track plays next. The audio engine and the terminal view only ever see the
/// decisions, never the bookkeeping.
#[derive(Debug)]
pub struct Player {
    tracks: Vec<Track>,
    pub current: usize,
    pub playing: bool,
    pub shuffle: bool,
    history: Vec<usize>,
    pub selected: usize,
    pub dirty: bool,
    pub status: String,
    rng: SmallRng,
}

impl Player {
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        Self::with_rng(tracks, SmallRng::from_os_rng())
    }

    /// Construction with a caller-supplied generator keeps shuffle selection
    /// deterministic under test.
    pub fn with_rng(tracks: Vec<Track>, rng: SmallRng) -> Result<Self> {
        anyhow::ensure!(!tracks.is_empty(), "playlist contains no tracks");
        Ok(Self {
            tracks,
            current: 0,
            playing: false,
            shuffle: false,
            history: Vec::new(),
            selected: 0,
            dirty: true,
            status: String::from("Ready"),
            rng,
        })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_track(&self) -> &Track {
        &self.tracks[self.current]
    }

    /// Indices played during the current shuffle session, in play order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Points the player at a track without starting it.
    pub fn load(&mut self, index: usize) {
        self.current = index.min(self.tracks.len() - 1);
        self.dirty = true;
    }

    /// Loads and starts a track; in shuffle mode the index joins the history
    /// so it is not picked again this epoch.
    pub fn play_track(&mut self, index: usize) -> &Track {
        self.play_at(index, true)
    }

    fn play_at(&mut self, index: usize, record: bool) -> &Track {
        self.load(index);
        self.playing = true;
        if record && self.shuffle && !self.history.contains(&self.current) {
            self.history.push(self.current);
        }
        &self.tracks[self.current]
    }

    pub fn toggle_play_pause(&mut self) {
        self.playing = !self.playing;
        self.dirty = true;
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
        self.history = if self.shuffle {
            vec![self.current]
        } else {
            Vec::new()
        };
        self.set_status(if self.shuffle {
            "Shuffle on"
        } else {
            "Shuffle off"
        });
    }

    pub fn advance(&mut self, direction: Direction) -> &Track {
        let len = self.tracks.len();
        match (direction, self.shuffle) {
            (Direction::Next, false) => {
                let target = (self.current + 1) % len;
                self.play_at(target, true)
            }
            (Direction::Previous, false) => {
                let target = (self.current + len - 1) % len;
                self.play_at(target, true)
            }
            (Direction::Next, true) => {
                let target = self.pick_unplayed();
                self.play_at(target, true)
            }
            (Direction::Previous, true) => {
                // Popping the current entry steps back to the prior one; the
                // replay does not push, so previous consumes history while
                // next grows it.
                if self.history.len() > 1 {
                    self.history.pop();
                    if let Some(target) = self.history.last().copied() {
                        return self.play_at(target, false);
                    }
                }
                let target = self.pick_unplayed();
                self.play_at(target, true)
            }
        }
    }

    /// Uniform pick over the indices not yet played this shuffle epoch. When
    /// every index has been played the history resets and any index is fair
    /// game again.
    pub fn pick_unplayed(&mut self) -> usize {
        let len = self.tracks.len();
        let unplayed: Vec<usize> = (0..len).filter(|idx| !self.history.contains(idx)).collect();
        if unplayed.is_empty() {
            self.history.clear();
            return self.rng.random_range(0..len);
        }
        unplayed[self.rng.random_range(0..unplayed.len())]
    }

    pub fn on_ended(&mut self) -> &Track {
        self.advance(Direction::Next)
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(self.tracks.len() - 1);
        self.dirty = true;
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.dirty = true;
    }

    pub fn activate_selected(&mut self) -> &Track {
        let index = self.selected;
        self.play_track(index)
    }

    pub fn set_status(&mut self, message: &str) {
        self.status = message.to_string();
        self.dirty = true;
    }
}

/// Displayed playback progress derived from engine-reported times.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub percent: f64,
    pub elapsed: String,
    pub total: String,
}

impl Progress {
    /// A zero, negative, or unknown duration renders as 0% rather than
    /// dividing by it.
    pub fn from_secs(position: f64, duration: f64) -> Self {
        let percent = if duration.is_finite() && duration > 0.0 {
            ((position / duration) * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            percent,
            elapsed: format_time(position),
            total: format_time(duration),
        }
    }
}

/// `m:ss` with unpadded minutes, e.g. `0:50` or `12:05`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Maps a progress-control value in `[0, 100]` onto a track position.
pub fn seek_target(fraction: f64, duration: Duration) -> Duration {
    let ratio = if fraction.is_finite() {
        (fraction / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    duration.mul_f64(ratio)
}
