use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Zobrist hashing
// * One random number for each (position, state) pair, e.g. (square, piece)
//
// key = [number for piece on a1] xor [number for piece on b1] xor ...
//
// Placing a piece and removing it again xor the same number twice, so
// applying then undoing a move restores the identical key.

/// Incremental position hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashKey(u64);

impl HashKey {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    #[inline(always)]
    fn toggle(&mut self, number: u64) {
        self.0 ^= number;
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct ZobristHash {
    numbers: Vec<u64>,
    num_states: usize,
    key: HashKey,
}

impl ZobristHash {
    /// Builds the random table from `seed`. Two tables with the same
    /// dimensions and seed produce identical keys.
    pub fn new(num_positions: usize, num_states: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let numbers: Vec<u64> = (0..num_positions * num_states).map(|_| rng.gen()).collect();

        Self {
            numbers,
            num_states,
            key: HashKey::default(),
        }
    }

    pub fn key(&self) -> HashKey {
        self.key
    }

    /// Toggles `state` at `position`. Call it again with the same arguments to undo.
    #[inline]
    pub fn apply_move(&mut self, position: usize, state: usize) {
        let number = self.number(position, state);
        self.key.toggle(number);
    }

    pub fn number(&self, position: usize, state: usize) -> u64 {
        debug_assert!(state < self.num_states, "state {} out of range", state);
        self.numbers[position * self.num_states + state]
    }

    pub fn reset(&mut self) {
        self.key = HashKey::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_then_undo_restores_key() {
        let mut zobrist = ZobristHash::new(9, 2, 42);
        zobrist.apply_move(4, 0);
        let after_first = zobrist.key();

        zobrist.apply_move(0, 1);
        assert_ne!(zobrist.key(), after_first);

        zobrist.apply_move(0, 1);
        assert_eq!(zobrist.key(), after_first);

        zobrist.apply_move(4, 0);
        assert_eq!(zobrist.key(), HashKey::default());
    }

    #[test]
    fn test_same_seed_same_numbers() {
        let a = ZobristHash::new(9, 2, 7);
        let b = ZobristHash::new(9, 2, 7);
        let c = ZobristHash::new(9, 2, 8);
        assert_eq!(a.number(3, 1), b.number(3, 1));
        assert_ne!(a.number(3, 1), c.number(3, 1));
    }

    #[test]
    fn test_move_order_does_not_matter() {
        let mut a = ZobristHash::new(9, 2, 1);
        let mut b = ZobristHash::new(9, 2, 1);
        a.apply_move(0, 0);
        a.apply_move(8, 1);
        b.apply_move(8, 1);
        b.apply_move(0, 0);
        assert_eq!(a.key(), b.key());
    }
}
