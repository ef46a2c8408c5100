//! Game tests - lock/clear/score flow, top-out, hold and restart

use tick_tetris::core::{Board, Game, GameConfig, GameEvent, Tetromino};
use tick_tetris::types::{ClockState, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn start_game(mut game: Game) -> Game {
    game.start();
    game.drain_events().for_each(drop);
    game
}

fn started(seed: u32) -> Game {
    start_game(Game::with_seed(seed))
}

fn active(game: &Game) -> Tetromino {
    *game.active().expect("active piece")
}

/// Started game whose bottom row is full except where its first piece comes to
/// rest. Also returns how many of the piece's cells survive the clear.
fn single_clear_setup(seed: u32) -> (Game, usize) {
    let empty = Board::new();
    let mut ghost = active(&Game::with_seed(seed));
    ghost.drop(|coords| empty.fits(coords));
    let resting = ghost.coordinates();
    let bottom = BOARD_HEIGHT as i8 - 1;

    let mut board = Board::new();
    for x in 0..BOARD_WIDTH as i8 {
        if !resting.contains(&(x, bottom)) {
            board.set(x, bottom, Some(PieceKind::Z));
        }
    }
    let survivors = resting.iter().filter(|&&(_, y)| y != bottom).count();
    (
        start_game(Game::with_board(GameConfig::with_seed(seed), board)),
        survivors,
    )
}

/// Started game with rows 3..22 stacked and column 9 open so nothing clears.
/// Row 2 stays free, so every spawn box still fits.
fn stacked_to_ceiling(seed: u32) -> Game {
    let mut board = Board::new();
    for y in 3..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 - 1 {
            board.set(x, y, Some(PieceKind::J));
        }
    }
    start_game(Game::with_board(GameConfig::with_seed(seed), board))
}

/// Stacked game hard-dropped until a lock lands in the hidden rows
fn topped_out(seed: u32) -> Game {
    let mut game = stacked_to_ceiling(seed);
    // An I piece rests on row 2 without topping out; the next drop cannot
    for _ in 0..3 {
        if game.is_game_over() {
            break;
        }
        game.apply_action(GameAction::HardDrop);
    }
    game
}

#[test]
fn test_hard_drop_event_order() {
    let mut game = started(7);
    assert!(game.apply_action(GameAction::HardDrop));

    let names: Vec<&str> = game.drain_events().map(|e| e.name()).collect();
    let lock = names.iter().position(|n| *n == "lock").expect("lock");
    assert_eq!(&names[lock..lock + 3], ["lock", "clear", "score"]);
    assert!(names[lock..].contains(&"spawn"));
    assert_eq!(game.board().filled_count(), 4);
}

#[test]
fn test_single_clear_scores_and_speeds_up() {
    let (mut game, survivors) = single_clear_setup(11);
    game.apply_action(GameAction::HardDrop);

    let events: Vec<GameEvent> = game.drain_events().collect();
    assert!(events.contains(&GameEvent::Clear(vec![21])));
    assert!(events.contains(&GameEvent::Score { score: 1, combo: 1 }));

    assert_eq!(game.score(), 1);
    assert_eq!(game.combo(), 1);
    assert_eq!(game.clock().delay_ms(), 297);
    // Cells above the cleared row fell into it
    assert_eq!(game.board().filled_count(), survivors);
}

#[test]
fn test_dry_lock_keeps_delay() {
    let mut game = started(3);
    game.apply_action(GameAction::HardDrop);

    assert_eq!(game.score(), 0);
    assert_eq!(game.combo(), 0);
    assert_eq!(game.clock().delay_ms(), 300);
    assert!(game
        .drain_events()
        .any(|e| e == GameEvent::Clear(Vec::new())));
}

#[test]
fn test_lock_inside_hidden_rows_tops_out() {
    let mut game = topped_out(5);

    assert!(game.is_game_over());
    assert!(game.active().is_none());
    assert_eq!(game.clock().state(), ClockState::Stopped);

    let names: Vec<&str> = game.drain_events().map(|e| e.name()).collect();
    assert!(names.contains(&"lock"));
    let stop = names.iter().rposition(|n| *n == "stop").expect("stop");
    assert!(!names[stop..].contains(&"spawn"));

    assert!(!game.apply_action(GameAction::MoveLeft));
    assert!(!game.apply_action(GameAction::Pause));
}

#[test]
fn test_blocked_spawn_tops_out() {
    let mut board = Board::new();
    for y in 0..3 {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(PieceKind::O));
        }
    }
    let mut game = Game::with_board(GameConfig::with_seed(9), board);

    assert!(game.is_game_over());
    assert!(game.active().is_none());
    assert!(!game.drain_events().any(|e| e.name() == "spawn"));
}

#[test]
fn test_prepared_board_is_kept_and_piece_fits() {
    let board = Board::from_ascii(&["ZZZZ..ZZZZ", "ZZZZ..ZZZZ"]);
    let game = Game::with_board(GameConfig::with_seed(19), board.clone());

    assert_eq!(game.board(), &board);
    assert!(game.board().fits(&active(&game).coordinates()));
    assert!(!game.is_game_over());
}

#[test]
fn test_operations_without_active_piece_are_noops() {
    let mut game = topped_out(43);
    assert!(game.active().is_none());
    game.drain_events().for_each(drop);
    let before = game.snapshot();

    assert_eq!(game.left(), None);
    assert_eq!(game.right(), None);
    assert_eq!(game.down(), None);
    assert!(!game.rotate());
    game.drop(false, false);
    game.drop(true, false);
    game.drop(true, true);
    assert!(!game.hold());
    game.lock();
    game.reset_drop_time();
    game.advance(5_000);

    assert_eq!(game.snapshot(), before);
    assert_eq!(game.drain_events().count(), 0);
}

#[test]
fn test_restart_resets_everything() {
    let (mut game, _) = single_clear_setup(13);
    game.apply_action(GameAction::HardDrop);
    game.apply_action(GameAction::Hold);
    game.advance(1_000);
    assert!(game.score() > 0);

    game.restart();
    let snapshot = game.snapshot();

    assert_eq!(game.score(), 0);
    assert_eq!(game.combo(), 0);
    assert_eq!(game.score_keeper().dryspell(), 0);
    assert_eq!(game.held(), None);
    assert!(game.can_hold());
    assert!(!game.is_game_over());
    assert_eq!(game.board().filled_count(), 0);
    assert_eq!(game.clock().state(), ClockState::Stopped);
    assert_eq!(game.clock().ticks(), 0);
    assert_eq!(game.clock().delay_ms(), 300);
    assert!(snapshot.active.is_some());
    assert!(!snapshot.playable());
}

#[test]
fn test_restart_action_resumes_play() {
    let mut game = topped_out(17);
    assert!(game.is_game_over());

    assert!(game.apply_action(GameAction::Restart));
    assert!(!game.is_game_over());
    assert_eq!(game.clock().state(), ClockState::Running);
    assert!(game.apply_action(GameAction::MoveLeft));
}

#[test]
fn test_hold_swap_returns_piece_to_spawn() {
    let mut game = started(21);
    let first = active(&game).kind;
    let upcoming = game.preview()[0];

    game.apply_action(GameAction::MoveLeft);
    assert!(game.apply_action(GameAction::Hold));
    assert_eq!(game.held(), Some(first));
    assert_eq!(active(&game).kind, upcoming);
    assert!(!game.apply_action(GameAction::Hold));

    game.apply_action(GameAction::HardDrop);
    assert!(game.can_hold());
    let before = active(&game).kind;
    assert!(game.apply_action(GameAction::Hold));
    assert_eq!(active(&game), Tetromino::new(first));
    assert_eq!(game.held(), Some(before));
}

#[test]
fn test_auto_drop_follows_delay() {
    let mut game = started(23);
    let y = active(&game).y;

    game.advance(299);
    assert_eq!(active(&game).y, y);
    game.advance(1);
    assert_eq!(active(&game).y, y + 1);

    let names: Vec<&str> = game.drain_events().map(|e| e.name()).collect();
    assert_eq!(&names[..3], ["uptick", "downtick", "move"]);
}

#[test]
fn test_movement_resets_drop_timer() {
    let mut game = started(29);
    let y = active(&game).y;

    game.advance(250);
    assert!(game.apply_action(GameAction::MoveLeft));
    game.advance(250);
    assert_eq!(active(&game).y, y);
    game.advance(50);
    assert_eq!(active(&game).y, y + 1);
}

#[test]
fn test_paused_game_ignores_time_and_moves() {
    let mut game = started(31);
    let before = active(&game);

    assert!(game.apply_action(GameAction::Pause));
    game.advance(5_000);
    assert!(!game.apply_action(GameAction::MoveRight));
    assert_eq!(active(&game), before);
    assert!(game.snapshot().paused());

    assert!(game.apply_action(GameAction::Pause));
    assert!(game.snapshot().playable());
}

#[test]
fn test_max_ticks_stops_game_clock() {
    let config = GameConfig {
        max_ticks: Some(2),
        ..GameConfig::with_seed(37)
    };
    let mut game = Game::new(config);
    game.start();
    game.advance(10_000);

    assert_eq!(game.clock().state(), ClockState::Stopped);
    assert_eq!(game.clock().ticks(), 2);
    assert_eq!(active(&game).y, 2);
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::HardDrop,
        GameAction::Hold,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::SoftDrop,
        GameAction::HardDrop,
    ];

    let mut a = started(41);
    let mut b = started(41);
    for action in script {
        a.apply_action(action);
        b.apply_action(action);
        a.advance(120);
        b.advance(120);
    }
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(
        a.drain_events().collect::<Vec<_>>(),
        b.drain_events().collect::<Vec<_>>()
    );
}
