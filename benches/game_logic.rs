use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tick_tetris::core::{Board, Game, Tetromino};
use tick_tetris::types::PieceKind;

fn bench_advance(c: &mut Criterion) {
    let mut game = Game::with_seed(12345);
    game.start();

    c.bench_function("advance_16ms", |b| {
        b.iter(|| {
            game.advance(black_box(16));
            if game.is_game_over() {
                game.restart();
                game.start();
            }
            game.drain_events().for_each(drop);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 18..22 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            black_box(board.clear_lines());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut game = Game::with_seed(12345);
    game.start();

    c.bench_function("hard_drop_lock_spawn", |b| {
        b.iter(|| {
            game.drop(true, false);
            if game.is_game_over() {
                game.restart();
                game.start();
            }
            game.drain_events().for_each(drop);
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let board = Board::new();
    let mut piece = Tetromino::new(PieceKind::T);

    c.bench_function("move_by", |b| {
        b.iter(|| {
            piece.move_by(black_box(1), 0, |coords| board.fits(coords));
            piece.move_by(black_box(-1), 0, |coords| board.fits(coords));
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let board = Board::new();
    let mut piece = Tetromino::new(PieceKind::I);

    c.bench_function("rotate_with_kicks", |b| {
        b.iter(|| {
            piece.rotate(|coords| board.fits(coords));
        })
    });
}

criterion_group!(
    benches,
    bench_advance,
    bench_line_clear,
    bench_hard_drop,
    bench_move,
    bench_rotate
);
criterion_main!(benches);
