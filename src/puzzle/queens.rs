use std::fmt::Write;

use super::PuzzleController;

/// Place `size` queens on a `size` x `size` board so that none attack
/// each other. A position lists the queen's column for each filled row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Queens {
    size: u8,
}

impl Queens {
    pub fn new(size: u8) -> Self {
        Self { size }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    fn is_safe(columns: &[u8], col: u8) -> bool {
        let row = columns.len();
        columns.iter().enumerate().all(|(other_row, &other_col)| {
            other_col != col && other_col.abs_diff(col) as usize != row - other_row
        })
    }

    /// True if `columns` places every queen with no two attacking.
    pub fn is_solution(&self, columns: &[u8]) -> bool {
        columns.len() == self.size as usize
            && columns.iter().all(|&col| col < self.size)
            && (0..columns.len()).all(|row| Self::is_safe(&columns[..row], columns[row]))
    }

    pub fn render(&self, columns: &[u8]) -> String {
        let mut out = String::new();
        for &queen in columns {
            for col in 0..self.size {
                let cell = if col == queen { 'Q' } else { '.' };
                let _ = write!(out, "{} ", cell);
            }
            out.truncate(out.trim_end().len());
            out.push('\n');
        }
        out
    }
}

impl PuzzleController for Queens {
    type Position = Vec<u8>;
    type Move = u8;
    type Key = Vec<u8>;

    fn initial_position(&self) -> Vec<u8> {
        Vec::with_capacity(self.size as usize)
    }

    fn is_goal(&self, position: &Vec<u8>) -> bool {
        position.len() == self.size as usize
    }

    fn legal_moves(&self, position: &Vec<u8>) -> Vec<u8> {
        if self.is_goal(position) {
            return Vec::new();
        }
        (0..self.size)
            .filter(|&col| Self::is_safe(position, col))
            .collect()
    }

    fn apply(&self, position: &Vec<u8>, col: &u8) -> Vec<u8> {
        let mut next = position.clone();
        next.push(*col);
        next
    }

    fn key(&self, position: &Vec<u8>) -> Vec<u8> {
        position.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{ConcurrentSolver, PuzzleError, SequentialSolver};

    #[test]
    fn test_sequential_finds_first_solution() {
        let cases: [(u8, &[u8]); 5] = [
            (1, &[0]),
            (4, &[1, 3, 0, 2]),
            (5, &[0, 2, 4, 1, 3]),
            (6, &[1, 3, 5, 0, 2, 4]),
            (8, &[0, 4, 7, 5, 2, 6, 1, 3]),
        ];
        for (size, expected) in cases {
            let queens = Queens::new(size);
            let solution = SequentialSolver::new(&queens).solve().unwrap();
            assert_eq!(solution.position, expected.to_vec(), "size {}", size);
            assert_eq!(solution.moves, expected.to_vec());
            assert!(queens.is_solution(&solution.position));
            assert!(solution.positions_examined >= size as usize);
        }
    }

    #[test]
    fn test_unsolvable_sizes() {
        for size in [2, 3] {
            let queens = Queens::new(size);
            assert_eq!(SequentialSolver::new(&queens).solve(), None);
            assert_eq!(ConcurrentSolver::new(&queens, 2).solve().unwrap(), None);
        }
    }

    #[test]
    fn test_concurrent_finds_a_solution() {
        for size in [4, 8, 10] {
            let queens = Queens::new(size);
            let solution = ConcurrentSolver::new(&queens, 4).solve().unwrap().unwrap();
            assert!(queens.is_solution(&solution.position), "size {}", size);
            assert_eq!(solution.moves, solution.position);
        }
    }

    #[test]
    fn test_concurrent_needs_a_thread() {
        let queens = Queens::new(4);
        assert!(matches!(
            ConcurrentSolver::new(&queens, 0).solve(),
            Err(PuzzleError::NoThreads)
        ));
    }

    #[test]
    fn test_zero_size_is_already_solved() {
        let queens = Queens::new(0);
        let solution = ConcurrentSolver::new(&queens, 1).solve().unwrap().unwrap();
        assert!(solution.moves.is_empty());
        assert_eq!(solution.positions_examined, 1);
    }

    #[test]
    fn test_is_solution() {
        let queens = Queens::new(4);
        assert!(queens.is_solution(&[2, 0, 3, 1]));
        assert!(!queens.is_solution(&[0, 1, 2, 3]));
        assert!(!queens.is_solution(&[1, 3, 0]));
    }

    #[test]
    fn test_render() {
        let queens = Queens::new(4);
        assert_eq!(
            queens.render(&[1, 3, 0, 2]),
            ". Q . .\n. . . Q\nQ . . .\n. . Q .\n"
        );
    }
}
