//! Terminal Tetris runner (default binary).
//!
//! Polls crossterm input within a 16ms frame budget, feeds the elapsed wall-clock
//! time to the game's clock, and redraws only when drained events marked
//! something dirty. Drained events also go to the event journal when enabled.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tick_tetris::config::RunConfig;
use tick_tetris::core::Game;
use tick_tetris::eventlog::EventJournal;
use tick_tetris::input::{handle_key_event, should_quit, InputHandler};
use tick_tetris::term::{DirtyRegion, FrameBuffer, GameView, TerminalRenderer, Viewport};
use tick_tetris::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    let mut journal = EventJournal::start(&config.journal)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &mut journal);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(journal) = journal {
        if let Err(err) = journal.finish() {
            eprintln!("[Journal] {:#}", err);
        }
    }
    result
}

fn run(
    term: &mut TerminalRenderer,
    config: &RunConfig,
    journal: &mut Option<EventJournal>,
) -> Result<()> {
    let mut game = Game::new(config.game);
    game.start();

    let view = GameView::default();
    let mut input_handler = InputHandler::with_config(config.das_ms, config.arr_ms);
    let mut dirty = DirtyRegion::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_size = (0, 0);

    let frame = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        for event in game.drain_events() {
            dirty.observe(&event);
            if let Some(journal) = journal.as_mut() {
                journal.record(&event);
            }
        }

        // Render.
        let size = crossterm::terminal::size().unwrap_or((80, 24));
        if size != last_size {
            last_size = size;
            term.invalidate();
            dirty.mark_all();
        }
        if dirty.take() {
            view.render_into(&game.snapshot(), Viewport::new(size.0, size.1), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next frame.
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }

                        if let Some(action) = input_handler.handle_key_press(key.code) {
                            game.apply_action(action);
                        } else if let Some(action) = handle_key_event(key) {
                            match action {
                                // Held movement keys repeat through the DAS/ARR handler.
                                GameAction::MoveLeft
                                | GameAction::MoveRight
                                | GameAction::SoftDrop => {}
                                GameAction::Restart => {
                                    input_handler.reset();
                                    game.apply_action(action);
                                }
                                _ => {
                                    game.apply_action(action);
                                }
                            }
                        }
                    }
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => {
                        input_handler.handle_key_release(key.code);
                    }
                },
                Event::Resize(_, _) => dirty.mark_all(),
                _ => {}
            }
        }

        // Advance by whole milliseconds; the remainder carries into the next frame.
        let elapsed_ms = last_tick.elapsed().as_millis() as u32;
        if elapsed_ms >= TICK_MS {
            last_tick += Duration::from_millis(elapsed_ms as u64);

            for action in input_handler.update(elapsed_ms) {
                game.apply_action(action);
            }
            game.advance(elapsed_ms);
        }
    }
}
