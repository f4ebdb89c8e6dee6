//! Generation 0: a board thresholded from coherent noise.

use crate::board::Board;
use crate::error::{InitError, NoiseError};
use crate::noise::NoiseField;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Noise parameters for seeding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Number of fBm octaves.
    pub octaves: u32,
    /// Noise-space distance between neighboring cells.
    pub increment: f32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            octaves: 8,
            increment: 0.01,
        }
    }
}

impl NoiseParams {
    pub fn validate(&self) -> Result<(), NoiseError> {
        crate::noise::check_octaves(self.octaves)?;
        if !self.increment.is_finite() || self.increment <= 0.0 {
            return Err(NoiseError::InvalidIncrement(self.increment));
        }
        Ok(())
    }
}

/// Produces initial boards. With a fixed seed every call yields the same board.
#[derive(Debug, Clone)]
pub struct BoardInitializer {
    seed: Option<u64>,
    params: NoiseParams,
}

impl BoardInitializer {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            params: NoiseParams::default(),
        }
    }

    pub fn with_params(mut self, params: NoiseParams) -> Self {
        self.params = params;
        self
    }

    /// Generates a `width` x `height` board.
    ///
    /// Column `x` samples the field at `(x + 1) * increment`, row `y` at
    /// `(y + 1) * increment`. A cell is alive when `fbm + 0.5 >= 0.5`.
    pub fn generate(&self, width: usize, height: usize) -> Result<Board, InitError> {
        self.params.validate()?;
        let mut board = Board::new(width, height)?;

        let seed = match self.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                debug!("Drew board seed {}", seed);
                seed
            }
        };
        let field = NoiseField::new(self.params.octaves, seed)?;
        let incr = self.params.increment;

        board
            .cells_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                let sy = (y + 1) as f32 * incr;
                for (x, cell) in row.iter_mut().enumerate() {
                    let sx = (x + 1) as f32 * incr;
                    *cell = field.sample(sx, sy) + 0.5 >= crate::board::ALIVE_THRESHOLD;
                }
            });

        debug!(
            "Seeded {}x{} board, population {}",
            width,
            height,
            board.population()
        );
        Ok(board)
    }
}
