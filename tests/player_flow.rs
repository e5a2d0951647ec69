use juke::model::Track;
use juke::player::{Direction, Player};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::HashSet;
use std::path::PathBuf;

fn tracks(n: usize) -> Vec<Track> {
    (0..n)
        .map(|idx| Track {
            title: format!("track {idx}"),
            artist: format!("artist {idx}"),
            source: PathBuf::from(format!("track_{idx}.mp3")),
            cover: format!("https://covers.example/{idx}.jpg"),
        })
        .collect()
}

#[test]
fn sequential_session_walks_the_whole_playlist() {
    let mut player = Player::new(tracks(4)).expect("player");

    let visited: Vec<usize> = (0..3)
        .map(|_| {
            player.advance(Direction::Next);
            player.current
        })
        .collect();
    assert_eq!(visited, vec![1, 2, 3]);

    player.advance(Direction::Next);
    assert_eq!(player.current, 0);
    assert!(player.playing);
}

#[test]
fn next_then_previous_is_identity_from_any_start() {
    for start in 0..5 {
        let mut player = Player::new(tracks(5)).expect("player");
        player.load(start);
        player.advance(Direction::Next);
        player.advance(Direction::Previous);
        assert_eq!(player.current, start);
    }
}

#[test]
fn shuffle_session_covers_playlist_then_resets() {
    let mut player =
        Player::with_rng(tracks(4), SmallRng::seed_from_u64(99)).expect("player");
    player.toggle_shuffle();

    let mut epoch = HashSet::new();
    epoch.insert(player.current);
    for _ in 0..3 {
        player.advance(Direction::Next);
        assert!(epoch.insert(player.current), "track repeated within epoch");
    }
    assert_eq!(epoch.len(), 4);

    // Epoch boundary: the next pick starts a fresh history.
    player.advance(Direction::Next);
    assert_eq!(player.history(), &[player.current]);
}

#[test]
fn shuffle_previous_retraces_then_falls_back_to_fresh_picks() {
    let mut player =
        Player::with_rng(tracks(6), SmallRng::seed_from_u64(7)).expect("player");
    player.toggle_shuffle();
    player.advance(Direction::Next);
    player.advance(Direction::Next);
    let trail: Vec<usize> = player.history().to_vec();
    assert_eq!(trail.len(), 3);

    player.advance(Direction::Previous);
    assert_eq!(player.current, trail[1]);
    player.advance(Direction::Previous);
    assert_eq!(player.current, trail[0]);
    assert_eq!(player.history(), &[trail[0]]);

    // History is down to one entry, so previous now picks something new.
    player.advance(Direction::Previous);
    assert_ne!(player.current, trail[0]);
}

#[test]
fn seeded_rng_makes_shuffle_reproducible() {
    let mut a = Player::with_rng(tracks(8), SmallRng::seed_from_u64(1234)).expect("player");
    let mut b = Player::with_rng(tracks(8), SmallRng::seed_from_u64(1234)).expect("player");
    a.toggle_shuffle();
    b.toggle_shuffle();

    for _ in 0..20 {
        a.advance(Direction::Next);
        b.advance(Direction::Next);
        assert_eq!(a.current, b.current);
    }
}

#[test]
fn play_pause_round_trip_restores_paused_state() {
    let mut player = Player::new(tracks(2)).expect("player");
    assert!(!player.playing);
    player.toggle_play_pause();
    player.toggle_play_pause();
    assert!(!player.playing);
}

#[test]
fn track_ended_keeps_the_session_playing() {
    let mut player = Player::new(tracks(3)).expect("player");
    player.play_track(2);
    let next = player.on_ended().clone();
    assert_eq!(player.current, 0);
    assert_eq!(next.title, "track 0");
    assert!(player.playing);
}
