use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A playable unit: display metadata plus the media source handed to the
/// audio engine. Built once at startup from the playlist file and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub source: PathBuf,
    #[serde(default)]
    pub cover: String,
}

/// On-disk playlist document: an ordered list of tracks.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Playlist {
    pub tracks: Vec<Track>,
}

/// Settings persisted across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default)]
    pub shuffle: bool,
}

fn default_volume() -> f32 {
    1.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            shuffle: false,
        }
    }
}
