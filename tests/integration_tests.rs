//! Integration tests for the main loop pieces working together

use crossterm::event::{KeyCode, KeyEvent};

use tick_tetris::core::Game;
use tick_tetris::input::{handle_key_event, InputHandler};
use tick_tetris::term::{DirtyRegion, GameView, Viewport};
use tick_tetris::types::{ClockState, GameAction};

fn started(seed: u32) -> Game {
    let mut game = Game::with_seed(seed);
    game.start();
    game
}

#[test]
fn test_game_lifecycle() {
    let mut game = Game::with_seed(12345);
    assert_eq!(game.clock().state(), ClockState::Stopped);
    assert!(game.active().is_some());

    game.start();
    assert!(game.clock().is_running());
    assert!(!game.is_game_over());
}

#[test]
fn test_key_events_drive_game() {
    let mut game = started(12345);
    let x = game.active().unwrap().x;

    let action = handle_key_event(KeyEvent::from(KeyCode::Left)).unwrap();
    assert!(game.apply_action(action));
    assert_eq!(game.active().unwrap().x, x - 1);

    let action = handle_key_event(KeyEvent::from(KeyCode::Char(' '))).unwrap();
    assert_eq!(action, GameAction::HardDrop);
    assert!(game.apply_action(action));
    assert_eq!(game.board().filled_count(), 4);
}

#[test]
fn test_input_handler_integration() {
    let mut input = InputHandler::with_config(200, 45).with_key_release_timeout_ms(10_000);
    let mut game = started(12345);
    let x = game.active().unwrap().x;

    let first = input.handle_key_press(KeyCode::Right).unwrap();
    game.apply_action(first);
    assert_eq!(game.active().unwrap().x, x + 1);

    // DAS not yet reached
    assert!(input.update(199).is_empty());

    // 1ms past DAS plus one ARR interval
    let repeats = input.update(46);
    assert_eq!(repeats.as_slice(), &[GameAction::MoveRight]);
    for action in repeats {
        game.apply_action(action);
    }
    assert_eq!(game.active().unwrap().x, x + 2);

    // Holding against the wall keeps producing repeats that no longer move
    for _ in 0..20 {
        for action in input.update(45) {
            game.apply_action(action);
        }
    }
    let right_edge = game
        .active()
        .unwrap()
        .coordinates()
        .iter()
        .map(|&(cx, _)| cx)
        .max()
        .unwrap();
    assert_eq!(right_edge, 9);
}

#[test]
fn test_game_pause() {
    let mut game = started(12345);

    game.apply_action(GameAction::Pause);
    assert_eq!(game.clock().state(), ClockState::Paused);

    game.apply_action(GameAction::Pause);
    assert_eq!(game.clock().state(), ClockState::Running);
}

#[test]
fn test_events_mark_dirty_and_render() {
    let mut game = started(12345);
    let mut dirty = DirtyRegion::new();
    for event in game.drain_events() {
        dirty.observe(&event);
    }
    assert!(dirty.take());
    assert!(!dirty.is_dirty());

    // A soft drop from the spawn rows touches the visible board
    game.apply_action(GameAction::SoftDrop);
    game.apply_action(GameAction::SoftDrop);
    for event in game.drain_events() {
        dirty.observe(&event);
    }
    assert!(dirty.board_region().is_some());

    let fb = GameView::default().render(&game.snapshot(), Viewport::new(80, 24));
    assert_eq!((fb.width(), fb.height()), (80, 24));
}

#[test]
fn test_game_restart() {
    let mut game = started(12345);
    game.apply_action(GameAction::HardDrop);
    game.advance(1_000);

    assert!(game.apply_action(GameAction::Restart));
    assert_eq!(game.score(), 0);
    assert_eq!(game.board().filled_count(), 0);
    assert!(game.clock().is_running());
    assert_eq!(game.clock().ticks(), 0);
}
