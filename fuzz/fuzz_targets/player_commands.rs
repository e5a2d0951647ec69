#![no_main]

use juke::model::Track;
use juke::player::{Direction, Player};
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::HashSet;
use std::path::PathBuf;

fuzz_target!(|data: &[u8]| {
    let len = (data.len() % 16).max(1);
    let tracks: Vec<Track> = (0..len)
        .map(|idx| Track {
            title: format!("track {idx}"),
            artist: format!("artist {idx}"),
            source: PathBuf::from(format!("track_{idx}.mp3")),
            cover: String::new(),
        })
        .collect();
    let mut player = match Player::with_rng(tracks, SmallRng::seed_from_u64(0)) {
        Ok(player) => player,
        Err(_) => return,
    };

    for byte in data {
        match byte % 8 {
            0 => {
                player.advance(Direction::Next);
            }
            1 => {
                player.advance(Direction::Previous);
            }
            2 => player.toggle_shuffle(),
            3 => player.toggle_play_pause(),
            4 => {
                player.on_ended();
            }
            5 => player.select_next(),
            6 => player.select_prev(),
            _ => {
                player.play_track(usize::from(*byte) % len);
            }
        }

        assert!(player.current < len);
        assert!(player.selected < len);
        let history = player.history();
        assert!(history.len() <= len);
        let unique: HashSet<usize> = history.iter().copied().collect();
        assert_eq!(unique.len(), history.len());
        if !player.shuffle {
            assert!(history.is_empty());
        }
    }
});
