//! Playback state machine tests over real step logs

use std::time::Duration;

use cofactor_engine::{Playback, PlaybackPhase, Step, generate};

use crate::common::known_matrices;

const DELAY: Duration = Duration::from_millis(500);

fn loaded(fixture_index: usize) -> Playback {
    let mut playback = Playback::new(DELAY);
    playback.load(generate(&known_matrices()[fixture_index].matrix()));
    playback
}

#[test]
fn manual_stepping_visits_every_step_in_order() {
    let mut playback = loaded(3);
    let mut visited = vec![playback.current().cloned()];
    while playback.next() {
        visited.push(playback.current().cloned());
    }

    let expected: Vec<Option<Step>> = playback.steps().iter().cloned().map(Some).collect();
    assert_eq!(visited, expected);
    assert_eq!(playback.phase(), PlaybackPhase::AtEnd { cursor: 13 });

    while playback.prev() {}
    assert_eq!(playback.phase(), PlaybackPhase::Ready { cursor: 0 });
}

#[test]
fn autoplay_reaches_end_at_delay_cadence() {
    let mut playback = loaded(1);
    playback.play();

    assert!(!playback.tick(DELAY - Duration::from_millis(1)));
    assert!(playback.tick(Duration::from_millis(1)));
    assert_eq!(playback.cursor(), Some(1));

    // A long stall still advances one step per tick.
    assert!(playback.tick(DELAY * 10));
    assert_eq!(playback.cursor(), Some(2));
    assert!(playback.at_end());
    assert_eq!(playback.pending_advance(), None);
    assert!(!playback.tick(DELAY * 10));
}

#[test]
fn manual_step_restarts_the_delay() {
    let mut playback = loaded(4);
    playback.play();
    let first = playback.pending_advance().unwrap();

    assert!(!playback.tick(DELAY / 2));
    assert!(playback.next());
    let second = playback.pending_advance().unwrap();
    assert_ne!(first, second);
    assert_eq!(playback.time_until_advance(), Some(DELAY));

    assert!(!playback.fire(first));
    assert_eq!(playback.cursor(), Some(1));
    assert!(playback.fire(second));
    assert_eq!(playback.cursor(), Some(2));
}

#[test]
fn pause_and_reset_disarm_the_timer() {
    let mut playback = loaded(5);
    playback.play();
    playback.tick(DELAY);
    playback.tick(DELAY);
    assert_eq!(playback.cursor(), Some(2));

    let armed = playback.pending_advance().unwrap();
    playback.pause();
    assert_eq!(playback.pending_advance(), None);
    assert!(!playback.fire(armed));
    assert!(!playback.tick(DELAY * 3));
    assert_eq!(playback.cursor(), Some(2));

    playback.play();
    playback.reset();
    assert_eq!(playback.cursor(), Some(0));
    assert!(!playback.is_playing());
    assert_eq!(playback.pending_advance(), None);
}

#[test]
fn loading_new_log_replaces_run() {
    let mut playback = loaded(6);
    playback.play();
    playback.tick(DELAY);
    let stale = playback.pending_advance().unwrap();

    playback.load(generate(&known_matrices()[1].matrix()));
    assert_eq!(playback.len(), 3);
    assert_eq!(playback.cursor(), Some(0));
    assert!(!playback.is_playing());
    assert!(!playback.fire(stale));

    playback.load(Vec::new());
    assert_eq!(playback.phase(), PlaybackPhase::Empty);
    assert!(!playback.next());
}
