//! Game state module - the controller state machine
//!
//! `GameState` owns the board, score, session timer, phase and the in-flight
//! animation. It consumes one [`GameAction`] at a time, calls the board engine
//! and reports the sound cues each transition produced. It never does I/O;
//! the caller passes the current time into every method that needs it.

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::animation::Animation;
use crate::board::{has_legal_move, has_winning_tile, is_board_full, Board};
use crate::moves::{move_board, MoveOutcome};
use crate::snapshot::{AnimationSnapshot, GameSnapshot};
use crate::spawn::TileSpawner;
use crate::types::*;

/// Cues produced by one action, in the order they happened.
pub type Cues = ArrayVec<Cue, 2>;

/// Construction-time options for a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub seed: u64,
    pub animations_enabled: bool,
    pub animation_ms: u32,
    pub win_tile: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            seed: 1,
            animations_enabled: true,
            animation_ms: DEFAULT_ANIMATION_MS,
            win_tile: WIN_TILE,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    phase: Phase,
    board: Board,
    score: u32,
    /// Highest score reached this session (not persisted)
    best_score: u32,
    moves: u32,
    started_ms: u64,
    /// Set when the game ends; freezes the session timer
    ended_ms: Option<u64>,
    animation: Option<Animation>,
    animations_enabled: bool,
    animation_ms: u32,
    win_tile: u32,
    spawner: TileSpawner,
    quit: bool,
}

impl GameState {
    /// Create a controller on the home screen with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_settings(GameSettings {
            seed,
            ..GameSettings::default()
        })
    }

    pub fn with_settings(settings: GameSettings) -> Self {
        Self {
            phase: Phase::Home,
            board: Board::new(),
            score: 0,
            best_score: 0,
            moves: 0,
            started_ms: 0,
            ended_ms: None,
            animation: None,
            animations_enabled: settings.animations_enabled,
            animation_ms: settings.animation_ms.min(MAX_ANIMATION_MS),
            win_tile: settings.win_tile,
            spawner: TileSpawner::new(settings.seed),
            quit: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn animations_enabled(&self) -> bool {
        self.animations_enabled
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn seed(&self) -> u64 {
        self.spawner.seed()
    }

    /// Session timer: time since the game started, frozen once it ends.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.phase {
            Phase::Playing => now_ms.saturating_sub(self.started_ms),
            Phase::GameOver => self
                .ended_ms
                .unwrap_or(now_ms)
                .saturating_sub(self.started_ms),
            Phase::Home | Phase::Instructions => 0,
        }
    }

    /// True while a slide animation has not yet reached its end.
    pub fn animation_in_flight(&self, now_ms: u64) -> bool {
        self.animation
            .as_ref()
            .map(|a| !a.is_finished(now_ms))
            .unwrap_or(false)
    }

    /// Per-frame housekeeping: drop a finished animation.
    pub fn update(&mut self, now_ms: u64) {
        if self
            .animation
            .as_ref()
            .map(|a| a.is_finished(now_ms))
            .unwrap_or(false)
        {
            self.animation = None;
        }
    }

    /// Apply one input event
    pub fn apply_action(&mut self, action: GameAction, now_ms: u64) -> Cues {
        let mut cues = Cues::new();

        match (self.phase, action) {
            (_, GameAction::Quit) => {
                debug!("quit requested");
                self.quit = true;
            }
            (_, GameAction::ToggleAnimations) => {
                self.animations_enabled = !self.animations_enabled;
                // Board is already committed; dropping the animation only
                // changes what the next frame draws.
                self.animation = None;
                debug!(enabled = self.animations_enabled, "animations toggled");
            }
            (Phase::Home, GameAction::Confirm) => {
                self.new_game(now_ms);
                cues.push(Cue::Start);
            }
            (Phase::Home, GameAction::ToggleInstructions) => {
                self.set_phase(Phase::Instructions);
            }
            (Phase::Instructions, GameAction::Confirm | GameAction::ToggleInstructions) => {
                self.set_phase(Phase::Home);
            }
            (Phase::Playing, GameAction::Move(direction)) => {
                self.try_move(direction, now_ms, &mut cues);
            }
            (Phase::Playing, GameAction::Reset) => {
                self.animation = None;
                self.set_phase(Phase::Home);
            }
            (Phase::GameOver, GameAction::Confirm) => {
                self.animation = None;
                self.set_phase(Phase::Home);
                cues.push(Cue::Start);
            }
            (phase, action) => {
                trace!(phase = phase.as_str(), action = action.as_str(), "ignored");
            }
        }

        cues
    }

    /// Enter `Playing` with a given board instead of a random one.
    ///
    /// The terminal condition is checked right away, so a full board goes
    /// straight to `GameOver`.
    pub fn start_with_board(&mut self, board: Board, now_ms: u64) -> Cues {
        let mut cues = Cues::new();
        self.reset_session(now_ms);
        self.board = board;
        self.set_phase(Phase::Playing);
        self.check_terminal(now_ms, &mut cues);
        cues
    }

    fn new_game(&mut self, now_ms: u64) {
        self.reset_session(now_ms);
        self.board = self.spawner.fresh_board(INITIAL_TILES);
        self.set_phase(Phase::Playing);
    }

    fn reset_session(&mut self, now_ms: u64) {
        self.score = 0;
        self.moves = 0;
        self.started_ms = now_ms;
        self.ended_ms = None;
        self.animation = None;
    }

    fn try_move(&mut self, direction: Direction, now_ms: u64, cues: &mut Cues) {
        if self.animation_in_flight(now_ms) {
            trace!(direction = direction.as_str(), "move dropped during animation");
            return;
        }
        self.animation = None;

        let result = match move_board(&self.board, direction) {
            MoveOutcome::NoOp => return,
            MoveOutcome::Moved(result) => result,
        };

        self.board = self.spawner.spawn(&result.board);
        self.score = self.score.saturating_add(result.score_gained);
        self.best_score = self.best_score.max(self.score);
        self.moves += 1;
        cues.push(Cue::Move);

        debug!(
            direction = direction.as_str(),
            gained = result.score_gained,
            score = self.score,
            "move committed"
        );

        if self.animations_enabled {
            self.animation = Some(
                Animation::new(result.displacements, now_ms, self.animation_ms)
                    .with_anchors(result.anchors),
            );
        }

        self.check_terminal(now_ms, cues);
    }

    fn check_terminal(&mut self, now_ms: u64, cues: &mut Cues) {
        let won = has_winning_tile(&self.board, self.win_tile);
        if won || is_board_full(&self.board) {
            debug!(won, score = self.score, "game over");
            self.ended_ms = Some(now_ms);
            self.set_phase(Phase::GameOver);
            cues.push(Cue::GameOver);
        }
    }

    fn set_phase(&mut self, to: Phase) {
        if self.phase != to {
            debug!(from = self.phase.as_str(), to = to.as_str(), "phase transition");
        }
        self.phase = to;
    }

    pub fn snapshot_into(&self, now_ms: u64, out: &mut GameSnapshot) {
        out.board = *self.board.rows();
        out.score = self.score;
        out.best_score = self.best_score;
        out.moves = self.moves;
        out.phase = self.phase;
        out.elapsed_ms = self.elapsed_ms(now_ms);
        out.animations_enabled = self.animations_enabled;
        out.animation = self.animation.as_ref().map(|a| AnimationSnapshot {
            displacements: a.displacements().iter().copied().collect(),
            anchors: a.anchors().iter().copied().collect(),
            progress: a.progress(now_ms),
        });
        out.can_move = has_legal_move(&self.board);
    }

    pub fn snapshot(&self, now_ms: u64) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(now_ms, &mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Grid;

    fn board(rows: Grid) -> Board {
        Board::from_rows(rows).unwrap()
    }

    fn playing(rows: Grid) -> GameState {
        let mut state = GameState::new(12345);
        let cues = state.start_with_board(board(rows), 0);
        assert!(cues.is_empty());
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);
        assert_eq!(state.phase, Phase::Home);
        assert_eq!(state.score, 0);
        assert_eq!(state.moves, 0);
        assert!(state.animations_enabled);
        assert!(state.animation.is_none());
        assert!(!state.quit);
        assert_eq!(state.board, Board::new());
    }

    #[test]
    fn test_confirm_on_home_starts_game() {
        let mut state = GameState::new(12345);
        let cues = state.apply_action(GameAction::Confirm, 500);
        assert_eq!(cues.as_slice(), &[Cue::Start]);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.board.tile_count(), INITIAL_TILES);
        assert_eq!(state.started_ms, 500);
        assert_eq!(state.elapsed_ms(1500), 1000);
    }

    #[test]
    fn test_instructions_round_trip() {
        let mut state = GameState::new(1);
        assert!(state
            .apply_action(GameAction::ToggleInstructions, 0)
            .is_empty());
        assert_eq!(state.phase, Phase::Instructions);

        // Directional input does nothing outside Playing.
        state.apply_action(GameAction::Move(Direction::Left), 0);
        assert_eq!(state.phase, Phase::Instructions);

        state.apply_action(GameAction::Confirm, 0);
        assert_eq!(state.phase, Phase::Home);
    }

    #[test]
    fn test_move_commits_spawn_score_and_animation() {
        let mut state = playing([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let cues = state.apply_action(GameAction::Move(Direction::Left), 10);

        assert_eq!(cues.as_slice(), &[Cue::Move]);
        assert_eq!(state.score, 4);
        assert_eq!(state.moves, 1);
        assert_eq!(state.board.get(Pos::new(0, 0)), Some(4));
        assert_eq!(state.board.tile_count(), 2);

        let anim = state.animation.as_ref().unwrap();
        assert_eq!(anim.started_ms(), 10);
        assert_eq!(anim.displacements().len(), 1);
    }

    #[test]
    fn test_noop_move_is_silent() {
        let mut state = playing([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = state.board;
        let cues = state.apply_action(GameAction::Move(Direction::Left), 10);

        assert!(cues.is_empty());
        assert_eq!(state.board, before);
        assert_eq!(state.score, 0);
        assert_eq!(state.moves, 0);
        assert!(state.animation.is_none());
    }

    #[test]
    fn test_move_dropped_while_animating() {
        let mut state = playing([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        state.apply_action(GameAction::Move(Direction::Left), 0);
        let after_first = state.board;

        assert!(state.animation_in_flight(50));
        let cues = state.apply_action(GameAction::Move(Direction::Right), 50);
        assert!(cues.is_empty());
        assert_eq!(state.board, after_first);

        // After the animation ends, input is accepted again.
        state.update(DEFAULT_ANIMATION_MS as u64);
        assert!(state.animation.is_none());
    }

    #[test]
    fn test_animations_disabled_still_commits() {
        let mut state = GameState::with_settings(GameSettings {
            seed: 5,
            animations_enabled: false,
            ..GameSettings::default()
        });
        state.start_with_board(board([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);

        let cues = state.apply_action(GameAction::Move(Direction::Left), 0);
        assert_eq!(cues.as_slice(), &[Cue::Move]);
        assert_eq!(state.score, 4);
        assert!(state.animation.is_none());
        assert!(!state.animation_in_flight(0));
    }

    #[test]
    fn test_toggle_animations_clears_in_flight() {
        let mut state = playing([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        state.apply_action(GameAction::Move(Direction::Left), 0);
        assert!(state.animation.is_some());

        state.apply_action(GameAction::ToggleAnimations, 1);
        assert!(!state.animations_enabled);
        assert!(state.animation.is_none());
        assert_eq!(state.score, 4);

        state.apply_action(GameAction::ToggleAnimations, 2);
        assert!(state.animations_enabled);
    }

    #[test]
    fn test_winning_tile_ends_game() {
        let mut state = playing([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let cues = state.apply_action(GameAction::Move(Direction::Left), 40);

        assert_eq!(cues.as_slice(), &[Cue::Move, Cue::GameOver]);
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.score, 2048);
        assert_eq!(state.elapsed_ms(10_000), 40);
    }

    #[test]
    fn test_full_board_ends_game() {
        // One free cell; the slide moves it to the end of row 0 and the spawn fills it.
        let rows = [[0, 2, 4, 8], [4, 8, 16, 32], [8, 16, 32, 64], [16, 32, 64, 128]];
        let mut state = playing(rows);
        let cues = state.apply_action(GameAction::Move(Direction::Left), 0);

        assert!(is_board_full(&state.board));
        assert_eq!(cues.as_slice(), &[Cue::Move, Cue::GameOver]);
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_start_with_full_board_is_game_over() {
        let mut state = GameState::new(1);
        let full = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let cues = state.start_with_board(full, 0);
        assert_eq!(cues.as_slice(), &[Cue::GameOver]);
        assert_eq!(state.phase, Phase::GameOver);

        for dir in Direction::ALL {
            assert!(state.apply_action(GameAction::Move(dir), 1).is_empty());
        }
        assert_eq!(state.board, full);
    }

    #[test]
    fn test_game_over_confirm_returns_home() {
        let mut state = GameState::new(1);
        state.start_with_board(Board::new().with_tile(Pos::new(0, 0), 2048), 0);
        assert_eq!(state.phase, Phase::GameOver);

        let cues = state.apply_action(GameAction::Confirm, 10);
        assert_eq!(cues.as_slice(), &[Cue::Start]);
        assert_eq!(state.phase, Phase::Home);
    }

    #[test]
    fn test_reset_returns_home_and_next_game_is_fresh() {
        let mut state = playing([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        state.apply_action(GameAction::Move(Direction::Left), 0);
        assert_eq!(state.score, 4);

        state.apply_action(GameAction::Reset, 500);
        assert_eq!(state.phase, Phase::Home);
        assert!(state.animation.is_none());

        state.apply_action(GameAction::Confirm, 600);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.moves, 0);
        assert_eq!(state.best_score, 4);
        assert_eq!(state.board.tile_count(), INITIAL_TILES);
    }

    #[test]
    fn test_reset_ignored_outside_playing() {
        let mut state = GameState::new(1);
        state.apply_action(GameAction::Reset, 0);
        assert_eq!(state.phase, Phase::Home);
    }

    #[test]
    fn test_quit_from_any_phase() {
        let mut state = GameState::new(1);
        state.apply_action(GameAction::Quit, 0);
        assert!(state.quit_requested());

        let mut state = playing([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        state.apply_action(GameAction::Quit, 0);
        assert!(state.quit_requested());
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_snapshot_reflects_animation_progress() {
        let mut state = playing([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        state.apply_action(GameAction::Move(Direction::Left), 0);

        let snap = state.snapshot(60);
        assert_eq!(snap.phase, Phase::Playing);
        assert_eq!(snap.score, 4);
        assert_eq!(snap.board[0][0], 4);
        let anim = snap.animation.as_ref().unwrap();
        assert!((anim.progress - 0.5).abs() < 1e-6);
        assert!(snap.is_animating());
        assert!(snap.hides(Pos::new(0, 0)));
        assert_eq!(snap.anchor_value(Pos::new(0, 0)), Some(2));

        let done = state.snapshot(10_000);
        assert!(!done.is_animating());
        assert!(!done.hides(Pos::new(0, 0)));
    }

    #[test]
    fn test_huge_merges_saturate_score() {
        let half = crate::board::MAX_TILE / 2;
        let mut state = GameState::with_settings(GameSettings {
            win_tile: u32::MAX,
            ..GameSettings::default()
        });
        state.start_with_board(board([[half; 4], [half; 4], [0; 4], [0; 4]]), 0);
        assert_eq!(state.phase, Phase::Playing);

        state.apply_action(GameAction::Move(Direction::Left), 0);
        assert_eq!(state.score, u32::MAX);
        assert_eq!(state.best_score, u32::MAX);
        assert!(state.board.is_well_formed());
    }

    #[test]
    fn test_animation_duration_is_capped() {
        let state = GameState::with_settings(GameSettings {
            animation_ms: 60_000,
            ..GameSettings::default()
        });
        assert_eq!(state.animation_ms, MAX_ANIMATION_MS);
    }
}
