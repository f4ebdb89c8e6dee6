//! Life step evaluators: Generation N in, Generation N+1 out.

use crate::board::Board;
use crate::error::BoardError;
use crate::rules::{live_neighbors, next_state};
use rayon::prelude::*;

/// Computes the next generation of `prev` into `next`.
///
/// Implementations read only from `prev` and write every cell of `next`.
pub trait StepEvaluator {
    fn step(&self, prev: &Board, next: &mut Board) -> Result<(), BoardError>;

    /// Convenience wrapper returning a freshly allocated generation.
    fn next_generation(&self, prev: &Board) -> Result<Board, BoardError> {
        let mut next = Board::new(prev.width(), prev.height())?;
        self.step(prev, &mut next)?;
        Ok(next)
    }
}

/// Single-threaded row-by-row evaluator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialEvaluator;

/// Evaluator that processes rows concurrently on the rayon pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParallelEvaluator;

fn check_same_size(prev: &Board, next: &Board) -> Result<(), BoardError> {
    if prev.dimensions() != next.dimensions() {
        return Err(BoardError::DimensionMismatch {
            src_width: prev.width(),
            src_height: prev.height(),
            dst_width: next.width(),
            dst_height: next.height(),
        });
    }
    Ok(())
}

fn step_row(prev: &Board, y: usize, row: &mut [bool]) {
    let width = prev.width();
    let src = &prev.cells()[y * width..(y + 1) * width];
    for (x, out) in row.iter_mut().enumerate() {
        *out = next_state(src[x], live_neighbors(prev, x, y));
    }
}

impl StepEvaluator for SerialEvaluator {
    fn step(&self, prev: &Board, next: &mut Board) -> Result<(), BoardError> {
        check_same_size(prev, next)?;
        let width = prev.width();
        next.cells_mut()
            .chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| step_row(prev, y, row));
        Ok(())
    }
}

impl StepEvaluator for ParallelEvaluator {
    fn step(&self, prev: &Board, next: &mut Board) -> Result<(), BoardError> {
        check_same_size(prev, next)?;
        let width = prev.width();
        next.cells_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| step_row(prev, y, row));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinker_horizontal() -> Board {
        Board::from_pattern(&[
            ".......",
            ".......",
            ".......",
            "..###..",
            ".......",
            ".......",
            ".......",
        ])
        .unwrap()
    }

    fn blinker_vertical() -> Board {
        Board::from_pattern(&[
            ".......",
            ".......",
            "...#...",
            "...#...",
            "...#...",
            ".......",
            ".......",
        ])
        .unwrap()
    }

    #[test]
    fn test_block_is_still_life() {
        let mut block = Board::new(10, 10).unwrap();
        for (x, y) in [(4, 4), (5, 4), (4, 5), (5, 5)] {
            block.set(x, y, true);
        }
        let next = SerialEvaluator.next_generation(&block).unwrap();
        assert_eq!(next, block);
        let next = ParallelEvaluator.next_generation(&block).unwrap();
        assert_eq!(next, block);
    }

    #[test]
    fn test_blinker_oscillates_with_period_two() {
        let start = blinker_horizontal();
        let one = ParallelEvaluator.next_generation(&start).unwrap();
        assert_eq!(one, blinker_vertical());
        let two = ParallelEvaluator.next_generation(&one).unwrap();
        assert_eq!(two, start);
    }

    #[test]
    fn test_glider_crosses_the_seam() {
        // After 4 generations a glider is the same shape shifted by (1, 1);
        // on an 8x8 torus, 32 generations bring it back to its start.
        let glider = Board::from_pattern(&[
            ".#......",
            "..#.....",
            "###.....",
            "........",
            "........",
            "........",
            "........",
            "........",
        ])
        .unwrap();

        let mut board = glider.clone();
        for _ in 0..32 {
            board = SerialEvaluator.next_generation(&board).unwrap();
            assert_eq!(board.population(), 5);
        }
        assert_eq!(board, glider);
    }

    #[test]
    fn test_corner_birth_across_wrap() {
        // The three cells surrounding (0, 0) only through wraparound.
        let mut board = Board::new(8, 8).unwrap();
        board.set(7, 7, true);
        board.set(7, 0, true);
        board.set(0, 7, true);
        let next = SerialEvaluator.next_generation(&board).unwrap();
        assert!(next.get(0, 0));
    }

    #[test]
    fn test_degenerate_boards_count_duplicates() {
        // Alive 1x1 sees itself eight times and dies.
        let single = Board::from_pattern(&["#"]).unwrap();
        let next = SerialEvaluator.next_generation(&single).unwrap();
        assert!(!next.get(0, 0));

        // Dead cell in ".#" sees the alive one six times: no birth.
        // The alive one sees itself twice: it survives.
        let pair = Board::from_pattern(&[".#"]).unwrap();
        let next = SerialEvaluator.next_generation(&pair).unwrap();
        assert_eq!(next.cells(), &[false, true]);
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let board = crate::initializer::BoardInitializer::new(Some(7))
            .generate(97, 61)
            .unwrap();
        let mut serial = board.clone();
        let mut parallel = board;
        for _ in 0..10 {
            serial = SerialEvaluator.next_generation(&serial).unwrap();
            parallel = ParallelEvaluator.next_generation(&parallel).unwrap();
            assert_eq!(serial, parallel);
        }
    }

    #[test]
    fn test_step_is_deterministic_and_leaves_input_untouched() {
        let board = blinker_horizontal();
        let before = board.clone();
        let a = ParallelEvaluator.next_generation(&board).unwrap();
        let b = ParallelEvaluator.next_generation(&board).unwrap();
        assert_eq!(a, b);
        assert_eq!(board, before);
    }

    #[test]
    fn test_mismatched_destination_rejected() {
        let prev = Board::new(4, 4).unwrap();
        let mut next = Board::new(4, 5).unwrap();
        let err = SerialEvaluator.step(&prev, &mut next).unwrap_err();
        assert_eq!(
            err,
            BoardError::DimensionMismatch {
                src_width: 4,
                src_height: 4,
                dst_width: 4,
                dst_height: 5,
            }
        );
        assert!(ParallelEvaluator.step(&prev, &mut next).is_err());
    }
}
