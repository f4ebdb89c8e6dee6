//! Ping-pong simulation: two generation buffers and an index toggle.

use crate::board::Board;
use crate::error::{BoardError, InitError};
use crate::evaluator::{ParallelEvaluator, StepEvaluator};
use crate::initializer::BoardInitializer;
use tracing::info;

/// Owns the previous/next generation buffers.
///
/// `buffers[current]` is the last completed generation. A tick reads it,
/// writes the other buffer, and only then flips `current`.
pub struct Simulation<E: StepEvaluator = ParallelEvaluator> {
    buffers: [Board; 2],
    current: usize,
    generation: u64,
    initializer: BoardInitializer,
    evaluator: E,
}

impl Simulation<ParallelEvaluator> {
    /// Creates a simulation seeded by `initializer`.
    pub fn new(width: usize, height: usize, initializer: BoardInitializer) -> Result<Self, InitError> {
        Self::with_evaluator(width, height, initializer, ParallelEvaluator)
    }
}

impl<E: StepEvaluator> Simulation<E> {
    pub fn with_evaluator(
        width: usize,
        height: usize,
        initializer: BoardInitializer,
        evaluator: E,
    ) -> Result<Self, InitError> {
        let board = initializer.generate(width, height)?;
        Ok(Self {
            buffers: [board.clone(), board],
            current: 0,
            generation: 0,
            initializer,
            evaluator,
        })
    }

    /// Starts from an explicit board instead of noise.
    ///
    /// A later [`Simulation::reset`] still reseeds from the initializer.
    pub fn from_board(board: Board, initializer: BoardInitializer, evaluator: E) -> Self {
        Self {
            buffers: [board.clone(), board],
            current: 0,
            generation: 0,
            initializer,
            evaluator,
        }
    }

    /// The last completed generation.
    pub fn current(&self) -> &Board {
        &self.buffers[self.current]
    }

    /// Completed ticks since the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.current().population()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.current().dimensions()
    }

    /// Advances one generation.
    pub fn tick(&mut self) -> Result<&Board, BoardError> {
        let [first, second] = &mut self.buffers;
        let (prev, next) = if self.current == 0 {
            (&*first, second)
        } else {
            (&*second, first)
        };
        self.evaluator.step(prev, next)?;

        self.current = 1 - self.current;
        self.generation += 1;
        Ok(self.current())
    }

    /// Reseeds Generation 0 into both buffers.
    pub fn reset(&mut self) -> Result<(), InitError> {
        let (width, height) = self.dimensions();
        let board = self.initializer.generate(width, height)?;
        self.buffers[1 - self.current].copy_from(&board)?;
        self.buffers[self.current] = board;
        self.generation = 0;
        info!(
            "Board reset ({}x{}, population {})",
            width,
            height,
            self.population()
        );
        Ok(())
    }
}
