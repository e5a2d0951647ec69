use crate::model::{Playlist, Settings, Track};
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "juke";
const PLAYLIST_FILE: &str = "playlist.json";
const SETTINGS_FILE: &str = "settings.json";

pub fn config_root() -> Result<PathBuf> {
    if let Ok(override_dir) = env::var("JUKE_CONFIG_DIR") {
        return Ok(PathBuf::from(override_dir));
    }

    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .context("neither HOME nor USERPROFILE is set")?;
    Ok(PathBuf::from(home).join(".config").join(APP_DIR))
}

pub fn playlist_path() -> Result<PathBuf> {
    Ok(config_root()?.join(PLAYLIST_FILE))
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(config_root()?.join(SETTINGS_FILE))
}

pub fn ensure_config_dir() -> Result<PathBuf> {
    let root = config_root()?;
    fs::create_dir_all(&root).with_context(|| format!("failed to create {}", root.display()))?;
    Ok(root)
}

/// Loads the startup track list. Resolution order: explicit `--playlist`
/// path, `JUKE_PLAYLIST` env var, the config-dir playlist file, and finally
/// the bundled demo playlist. An empty list is fatal: every index the player
/// computes assumes at least one track.
pub fn load_tracks(explicit: Option<&Path>) -> Result<Vec<Track>> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => match env::var("JUKE_PLAYLIST") {
            Ok(value) => Some(PathBuf::from(value)),
            Err(_) => {
                let default = playlist_path()?;
                default.exists().then_some(default)
            }
        },
    };

    let tracks = match path {
        Some(path) => read_playlist(&path)?.tracks,
        None => demo_tracks(),
    };

    anyhow::ensure!(!tracks.is_empty(), "playlist contains no tracks");
    Ok(tracks)
}

pub fn read_playlist(path: &Path) -> Result<Playlist> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read playlist file {}", path.display()))?;
    let playlist: Playlist = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse playlist file {}", path.display()))?;
    Ok(playlist)
}

pub fn load_settings() -> Result<Settings> {
    let path = settings_path()?;
    if !path.exists() {
        return Ok(Settings::default());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse settings file {}", path.display()))?;
    Ok(settings)
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    ensure_config_dir()?;
    let path = settings_path()?;
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Built-in playlist used when no playlist file exists yet, so a fresh
/// install starts with something on screen.
pub fn demo_tracks() -> Vec<Track> {
    [
        ("Sample Track 1", "Artist 1", "audio/audio_1.mp3"),
        ("Sample Track 2", "Artist 2", "audio/audio_2.mp3"),
        ("Sample Track 3", "Artist 3", "audio/audio_3.mp3"),
        ("Sample Track 4", "Artist 3", "audio/audio_4.mp3"),
    ]
    .into_iter()
    .map(|(title, artist, source)| Track {
        title: String::from(title),
        artist: String::from(artist),
        source: PathBuf::from(source),
        cover: String::new(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn settings_round_trip() {
        let dir = tempdir().expect("tempdir");
        unsafe {
            env::set_var("JUKE_CONFIG_DIR", dir.path().to_string_lossy().as_ref());
        }

        let settings = Settings {
            volume: 0.4,
            shuffle: true,
        };
        save_settings(&settings).expect("save");
        let loaded = load_settings().expect("load");
        assert_eq!(loaded.volume, 0.4);
        assert!(loaded.shuffle);
    }

    #[test]
    fn explicit_playlist_file_is_read() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("mix.json");
        let playlist = Playlist {
            tracks: demo_tracks(),
        };
        fs::write(&path, serde_json::to_string(&playlist).expect("json")).expect("write");

        let tracks = load_tracks(Some(&path)).expect("load");
        assert_eq!(tracks.len(), 4);
        assert_eq!(tracks[0].title, "Sample Track 1");
    }

    #[test]
    fn empty_playlist_file_is_fatal() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("empty.json");
        fs::write(&path, r#"{"tracks": []}"#).expect("write");

        assert!(load_tracks(Some(&path)).is_err());
    }

    #[test]
    fn malformed_playlist_file_is_fatal() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "not json").expect("write");

        assert!(load_tracks(Some(&path)).is_err());
    }
}
