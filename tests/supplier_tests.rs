//! Piece supplier tests - 7-bag guarantee and seeded determinism

use std::collections::HashSet;

use tick_tetris::core::PieceSupplier;
use tick_tetris::types::{PieceKind, BAG_SIZE, PREVIEW_LEN};

#[test]
fn test_every_block_of_seven_is_a_permutation() {
    for seed in [1, 7, 42, 12345, u32::MAX] {
        let mut supplier = PieceSupplier::new(seed);
        for block in 0..20 {
            let kinds: HashSet<PieceKind> = (0..BAG_SIZE).map(|_| supplier.pop()).collect();
            assert_eq!(kinds.len(), BAG_SIZE, "seed {} block {}", seed, block);
        }
    }
}

#[test]
fn test_same_seed_same_sequence() {
    let mut a = PieceSupplier::new(2024);
    let mut b = PieceSupplier::new(2024);
    for _ in 0..100 {
        assert_eq!(a.pop(), b.pop());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = PieceSupplier::new(1);
    let mut b = PieceSupplier::new(2);
    let seq_a: Vec<PieceKind> = (0..28).map(|_| a.pop()).collect();
    let seq_b: Vec<PieceKind> = (0..28).map(|_| b.pop()).collect();
    assert_ne!(seq_a, seq_b);
}

#[test]
fn test_peek_predicts_pops() {
    let mut supplier = PieceSupplier::new(99);
    for _ in 0..3 {
        let predicted = supplier.peek(BAG_SIZE);
        assert_eq!(predicted.len(), BAG_SIZE);
        for expected in predicted {
            assert_eq!(supplier.pop(), expected);
        }
    }
}

#[test]
fn test_preview_starts_with_next() {
    let mut supplier = PieceSupplier::new(5);
    for _ in 0..10 {
        let preview = supplier.preview();
        assert_eq!(preview.len(), PREVIEW_LEN);
        assert_eq!(preview[0], supplier.next());
        assert_eq!(preview.as_slice(), supplier.peek(PREVIEW_LEN).as_slice());
        supplier.pop();
    }
}

#[test]
fn test_next_seed_is_deterministic() {
    let mut a = PieceSupplier::new(31);
    let mut b = PieceSupplier::new(31);
    assert_eq!(a.next_seed(), b.next_seed());
}
