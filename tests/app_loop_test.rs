//! Full control loop with scripted input, a manual clock, recording audio
//! and an in-memory renderer.

use std::time::Duration;

use tui_2048::app::App;
use tui_2048::audio::RecordingAudio;
use tui_2048::core::{Board, Clock, GameSettings, GameState, ManualClock};
use tui_2048::input::ScriptedInput;
use tui_2048::term::{CaptureRenderer, GameView, Viewport};
use tui_2048::types::{Cue, Direction, GameAction, Phase, Pos, DEFAULT_ANIMATION_MS};

fn capture() -> CaptureRenderer {
    CaptureRenderer::new(GameView::default(), Viewport::new(80, 24))
}

#[test]
fn run_plays_until_quit() {
    let clock = ManualClock::new(0);
    let game = GameState::with_settings(GameSettings {
        seed: 9,
        animations_enabled: false,
        ..GameSettings::default()
    });
    let input = ScriptedInput::new(vec![
        vec![GameAction::ToggleInstructions],
        vec![GameAction::Confirm],
        vec![GameAction::Confirm],
        Direction::ALL.iter().map(|&d| GameAction::Move(d)).collect(),
        vec![GameAction::Quit],
    ]);

    let mut app = App::new(game, capture(), RecordingAudio::new(), input, &clock);
    app.run().unwrap();

    assert!(app.game().quit_requested());
    assert_eq!(app.game().phase(), Phase::Playing);
    assert!(app.game().moves() >= 1);

    let audio = app.audio();
    assert_eq!(audio.cues()[0], Cue::Start);
    assert_eq!(
        audio.cues().iter().filter(|&&c| c == Cue::Move).count(),
        app.game().moves() as usize
    );
    assert_eq!(audio.music_starts(), 1);
    assert!(!audio.music_playing());

    // Initial frame plus one per pass; the quitting pass draws nothing.
    assert_eq!(app.frames(), 5);
    assert_eq!(app.renderer().frames(), 5);
    assert!(app.renderer().frame().text().contains("SCORE"));
}

#[test]
fn run_stops_when_script_runs_out() {
    let clock = ManualClock::new(0);
    let mut app = App::new(
        GameState::new(1),
        capture(),
        RecordingAudio::new(),
        ScriptedInput::default(),
        &clock,
    );
    app.run().unwrap();

    assert!(app.game().quit_requested());
    assert_eq!(app.game().phase(), Phase::Home);
    assert!(app.audio().cues().is_empty());
    assert!(app.renderer().frame().text().contains("2 0 4 8"));
}

#[test]
fn step_drops_moves_while_animating() {
    let clock = ManualClock::new(0);
    let mut game = GameState::new(5);
    game.start_with_board(
        Board::from_rows([[0, 0, 2, 2], [0; 4], [0; 4], [0; 4]]).unwrap(),
        0,
    );
    let input = ScriptedInput::new(vec![
        vec![GameAction::Move(Direction::Left), GameAction::Move(Direction::Right)],
        vec![GameAction::Move(Direction::Right)],
    ]);
    let mut app = App::new(game, capture(), RecordingAudio::new(), input, &clock);

    clock.advance(16);
    app.step(Duration::ZERO).unwrap();
    let after_left = *app.game().board();
    assert_eq!(after_left.get(Pos::new(0, 0)), Some(4));
    assert_eq!(app.game().moves(), 1);
    assert!(app.game().animation_in_flight(clock.now_ms()));
    assert!(app.renderer().last_snapshot().unwrap().is_animating());

    // Once the slide has finished, input is accepted again.
    clock.advance(DEFAULT_ANIMATION_MS as u64);
    app.step(Duration::ZERO).unwrap();
    assert_eq!(app.game().moves(), 2);
    assert!(app.game().animation().is_some());
    assert_eq!(app.audio().cues(), &[Cue::Move, Cue::Move]);
}
