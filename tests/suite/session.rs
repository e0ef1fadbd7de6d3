//! End-to-end session tests: keys in, session state out

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use cofactor_engine::{
    App, AppSettings, CofactorConfig, Focus, PlaybackPhase, Preset, Step, UiOptions,
};
use cofactor_tui::{apply_event, apply_key};

use crate::common::{TEST_DELAY, final_determinant, test_app};

fn press(app: &mut App, codes: &[KeyCode]) {
    for &code in codes {
        apply_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        apply_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
}

#[test]
fn edit_then_calculate_two_by_two() {
    let mut app = test_app();
    press(&mut app, &[KeyCode::Char('[')]);
    assert_eq!(app.matrix().size(), 2);

    type_text(&mut app, "3");
    press(&mut app, &[KeyCode::Right]);
    type_text(&mut app, "8");
    press(&mut app, &[KeyCode::Down, KeyCode::Left]);
    type_text(&mut app, "4");
    press(&mut app, &[KeyCode::Right]);
    type_text(&mut app, "6");
    press(&mut app, &[KeyCode::Enter]);

    assert_eq!(app.focus(), Focus::Playback);
    assert_eq!(app.playback().len(), 3);
    assert_eq!(final_determinant(app.playback().steps()), 3.0 * 6.0 - 8.0 * 4.0);
}

#[test]
fn partially_typed_numbers_resolve_on_calculate() {
    let mut app = test_app();
    press(&mut app, &[KeyCode::Char('[')]);
    type_text(&mut app, "-.");
    press(&mut app, &[KeyCode::Right]);
    type_text(&mut app, "2.");
    press(&mut app, &[KeyCode::Down]);
    type_text(&mut app, ".5");
    press(&mut app, &[KeyCode::Enter]);

    // [[0, 2], [0, 0.5]]
    assert_eq!(
        app.playback().steps()[1],
        Step::Calc2x2Determinant {
            a: 0.0,
            b: 2.0,
            c: 0.0,
            d: 0.5,
            result: 0.0
        }
    );
}

#[test]
fn space_plays_through_to_result() {
    let mut app = test_app();
    press(&mut app, &[KeyCode::Enter, KeyCode::Char(' ')]);
    assert!(app.playback().is_playing());

    let mut ticks = 0;
    while !app.playback().at_end() && ticks < 100 {
        app.tick(TEST_DELAY);
        ticks += 1;
    }
    assert_eq!(ticks, 13);
    assert_eq!(
        app.playback().current(),
        Some(&Step::FinalResult { determinant: 0.0 })
    );
}

#[test]
fn switching_to_editor_and_editing_pauses() {
    let mut app = test_app();
    press(&mut app, &[KeyCode::Enter, KeyCode::Char(' '), KeyCode::Tab]);
    assert_eq!(app.focus(), Focus::Editor);
    assert!(app.playback().is_playing());

    type_text(&mut app, "5");
    assert!(!app.playback().is_playing());
    assert!(!app.tick(TEST_DELAY));

    // The loaded run is kept until the next calculation.
    assert_eq!(app.playback().phase(), PlaybackPhase::Ready { cursor: 0 });
}

#[test]
fn recalculating_replaces_run_and_rewinds() {
    let mut app = test_app();
    press(&mut app, &[KeyCode::Enter, KeyCode::Right, KeyCode::Right]);
    assert_eq!(app.playback().cursor(), Some(2));

    press(&mut app, &[KeyCode::Tab]);
    app.load_preset(Preset::FourByFour);
    press(&mut app, &[KeyCode::Enter]);

    assert_eq!(app.playback().cursor(), Some(0));
    assert_eq!(app.playback().len(), 14);
    assert_eq!(final_determinant(app.playback().steps()), 15.0);
}

#[test]
fn overflowing_entries_keep_previous_run() {
    let mut app = test_app();
    press(&mut app, &[KeyCode::Enter, KeyCode::Tab, KeyCode::Char('[')]);
    assert_eq!(app.playback().len(), 14);

    let huge = format!("1{}", "0".repeat(200));
    let moves: [&[KeyCode]; 4] = [&[], &[KeyCode::Right], &[KeyCode::Down], &[KeyCode::Left]];
    for moves in moves {
        press(&mut app, moves);
        type_text(&mut app, &huge);
    }
    press(&mut app, &[KeyCode::Enter]);

    assert_eq!(
        app.status_message(),
        Some("Cannot calculate: determinant overflows the number range")
    );
    assert_eq!(app.focus(), Focus::Editor);
    assert_eq!(app.playback().len(), 14);
    assert_eq!(final_determinant(app.playback().steps()), 0.0);
}

#[test]
fn quit_paths() {
    let mut app = test_app();
    assert!(!apply_event(
        &mut app,
        Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))
    ));
    assert!(apply_event(
        &mut app,
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
    ));
}

#[test]
fn settings_follow_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[app]\nascii_only = true\nhigh_contrast = true\n\n[playback]\nautoplay = true\n",
    )
    .unwrap();

    let config = CofactorConfig::load_from(&path).unwrap();
    let settings = AppSettings::from_config(config.as_ref());
    assert_eq!(
        settings.ui_options,
        UiOptions {
            ascii_only: true,
            high_contrast: true
        }
    );
    assert!(settings.autoplay);

    let mut app = App::with_settings(settings);
    press(&mut app, &[KeyCode::Enter]);
    assert!(app.playback().is_playing());
    assert!(app.playback().pending_advance().is_some());
}

#[test]
fn broken_config_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[playback]\nstep_delay_ms = \"soon\"\n").unwrap();

    let err = CofactorConfig::load_from(&path).unwrap_err();
    assert_eq!(err.path(), &path);
    assert_eq!(AppSettings::from_config(None), AppSettings::default());
}
