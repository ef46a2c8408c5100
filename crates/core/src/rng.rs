//! RNG module - bag-style piece supply
//!
//! The supplier keeps an output queue of seven kinds and a refill pool holding
//! a random permutation of all seven. Every draw takes the next kind off the
//! queue and feeds one kind from the pool back in, so the queue never shrinks.
//! When the pool runs dry a fresh permutation replaces it.
//!
//! Also provides a simple LCG for deterministic testing.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, BAG_SIZE, PREVIEW_LEN};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would be a fixed point of the multiplier alone
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max.max(1)
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// A random permutation of all seven kinds, picked one remaining element at a time
pub fn random_bag(rng: &mut SimpleRng) -> [PieceKind; BAG_SIZE] {
    let mut remaining: ArrayVec<PieceKind, BAG_SIZE> = PieceKind::ALL.into_iter().collect();
    let mut bag = PieceKind::ALL;
    for slot in bag.iter_mut() {
        let idx = rng.next_range(remaining.len() as u32) as usize;
        *slot = remaining.remove(idx);
    }
    bag
}

/// Piece supplier with a seven-slot output queue and a refill pool
#[derive(Debug, Clone)]
pub struct PieceSupplier {
    /// Output queue; the last slot is the next piece out, refills enter at slot 0
    queue: [PieceKind; BAG_SIZE],
    /// Refill pool; only `pool[..pool_len]` is live, consumed from the end
    pool: [PieceKind; BAG_SIZE],
    pool_len: usize,
    rng: SimpleRng,
}

impl PieceSupplier {
    /// Create a new supplier with the given seed
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let queue = random_bag(&mut rng);
        let pool = random_bag(&mut rng);
        Self {
            queue,
            pool,
            pool_len: BAG_SIZE,
            rng,
        }
    }

    /// Take the next piece kind and top the queue back up from the pool
    pub fn pop(&mut self) -> PieceKind {
        let next = self.queue[BAG_SIZE - 1];
        self.queue.copy_within(0..BAG_SIZE - 1, 1);

        self.pool_len -= 1;
        self.queue[0] = self.pool[self.pool_len];
        if self.pool_len == 0 {
            self.pool = random_bag(&mut self.rng);
            self.pool_len = BAG_SIZE;
        }

        next
    }

    /// The next `n` kinds in draw order without consuming them.
    ///
    /// The result is shorter than `n` only when it would reach past the
    /// pieces already decided (the queue plus the live pool).
    pub fn peek(&self, n: usize) -> ArrayVec<PieceKind, { BAG_SIZE * 2 }> {
        self.queue
            .iter()
            .rev()
            .chain(self.pool[..self.pool_len].iter().rev())
            .take(n)
            .copied()
            .collect()
    }

    /// Next piece kind
    pub fn next(&self) -> PieceKind {
        self.queue[BAG_SIZE - 1]
    }

    /// Upcoming kinds for the preview panel
    pub fn preview(&self) -> [PieceKind; PREVIEW_LEN] {
        let mut out = [PieceKind::I; PREVIEW_LEN];
        for (slot, kind) in out.iter_mut().zip(self.queue.iter().rev()) {
            *slot = *kind;
        }
        out
    }

    /// Seed for a successor supplier (used when a game restarts)
    pub fn next_seed(&mut self) -> u32 {
        self.rng.next_u32()
    }
}

impl Default for PieceSupplier {
    fn default() -> Self {
        Self::new(1)
    }
}
