use tui_2048::core::{Board, GameSnapshot, GameState};
use tui_2048::term::{tile_colors, GameView, Viewport};
use tui_2048::types::{Direction, GameAction, Phase, Pos};

fn playing_snapshot(rows: [[u32; 4]; 4]) -> GameSnapshot {
    let mut game = GameState::new(1);
    game.start_with_board(Board::from_rows(rows).unwrap(), 0);
    game.snapshot(0)
}

#[test]
fn term_view_renders_border_corners() {
    let snap = playing_snapshot([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
    let view = GameView::default();
    assert_eq!(view.frame_size(), (35, 19));

    // Board frame is centered: (80 - 35) / 2 = 22, (24 - 19) / 2 = 2.
    let fb = view.render(&snap, Viewport::new(80, 24));
    assert_eq!(fb.get(22, 2).unwrap().ch, '┌');
    assert_eq!(fb.get(56, 2).unwrap().ch, '┐');
    assert_eq!(fb.get(22, 20).unwrap().ch, '└');
    assert_eq!(fb.get(56, 20).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_tile_value_centered_with_palette() {
    let snap = playing_snapshot([[0; 4], [0, 2048, 0, 0], [0; 4], [0; 4]]);
    let fb = GameView::default().render(&snap, Viewport::new(80, 24));

    // Tile (1, 1) starts at x = 22 + 2 + 8, y = 2 + 2 + 4 and is 7x3.
    let (x, y) = (32, 8);
    let (bg, fg) = tile_colors(2048);
    let row: String = (x..x + 7).map(|cx| fb.get(cx, y + 1).unwrap().ch).collect();
    assert_eq!(row, " 2048  ");
    assert_eq!(fb.get(x, y).unwrap().style.bg, bg);
    assert_eq!(fb.get(x + 1, y + 1).unwrap().style.fg, fg);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = playing_snapshot([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
    snap.score = 1234;
    snap.moves = 17;
    snap.elapsed_ms = 65_000;

    let text = GameView::default().render(&snap, Viewport::new(80, 24)).text();
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("MOVES"));
    assert!(text.contains("1:05"));

    let narrow = GameView::default().render(&snap, Viewport::new(40, 24)).text();
    assert!(!narrow.contains("SCORE"));
}

#[test]
fn term_view_home_and_instructions() {
    let mut snap = GameSnapshot::default();
    let view = GameView::default();

    let home = view.render(&snap, Viewport::new(60, 20)).text();
    assert!(home.contains("2 0 4 8"));
    assert!(home.contains("Enter  start a new game"));
    assert!(home.contains("animations: on"));

    snap.phase = Phase::Instructions;
    let help = view.render(&snap, Viewport::new(60, 20)).text();
    assert!(help.contains("HOW TO PLAY"));
    assert!(!help.contains("2 0 4 8"));
}

#[test]
fn term_view_game_over_overlay() {
    let mut game = GameState::new(1);
    game.start_with_board(
        Board::new()
            .with_tile(Pos::new(0, 0), 1024)
            .with_tile(Pos::new(0, 1), 1024),
        0,
    );
    game.apply_action(GameAction::Move(Direction::Left), 0);
    assert_eq!(game.phase(), Phase::GameOver);

    let text = GameView::default()
        .render(&game.snapshot(0), Viewport::new(80, 24))
        .text();
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("score 2048"));
}

#[test]
fn term_view_hides_destination_mid_slide() {
    let mut game = GameState::new(1);
    game.start_with_board(
        Board::new().with_tile(Pos::new(0, 3), 8),
        0,
    );
    game.apply_action(GameAction::Move(Direction::Left), 0);

    // Half way through the slide the 8 is drawn between its origin and
    // destination, not in its committed cell.
    let view = GameView::default();
    let mid = view.render(&game.snapshot(60), Viewport::new(80, 24));
    let dest_row: String = (24..31).map(|x| mid.get(x, 5).unwrap().ch).collect();
    assert_eq!(dest_row.trim(), "");

    let done = view.render(&game.snapshot(1000), Viewport::new(80, 24));
    let dest_row: String = (24..31).map(|x| done.get(x, 5).unwrap().ch).collect();
    assert_eq!(dest_row.trim(), "8");
}

#[test]
fn term_view_keeps_waiting_merge_partner_visible() {
    let mut game = GameState::new(1);
    game.start_with_board(
        Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap(),
        0,
    );
    game.apply_action(GameAction::Move(Direction::Left), 0);

    // Just after the move the sliding tile is still near (0, 1); the 2 that
    // never moved stays drawn at (0, 0) with its old value.
    let view = GameView::default();
    let early = view.render(&game.snapshot(1), Viewport::new(80, 24));
    let cell: String = (24..31).map(|x| early.get(x, 5).unwrap().ch).collect();
    assert_eq!(cell.trim(), "2");

    let done = view.render(&game.snapshot(1000), Viewport::new(80, 24));
    let cell: String = (24..31).map(|x| done.get(x, 5).unwrap().ch).collect();
    assert_eq!(cell.trim(), "4");
}
