//! Error types for the simulation core.

use thiserror::Error;

/// Errors raised while building or stepping a board.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board dimensions {width}x{height}: width and height must both be at least 1")]
    InvalidDimensions { width: usize, height: usize },

    #[error("board dimensions {width}x{height} describe too many cells")]
    TooLarge { width: usize, height: usize },

    #[error("cell buffer has {actual} entries, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("destination board is {dst_width}x{dst_height} but source is {src_width}x{src_height}")]
    DimensionMismatch {
        src_width: usize,
        src_height: usize,
        dst_width: usize,
        dst_height: usize,
    },

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Errors raised by the coherent noise generator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NoiseError {
    #[error("octave count {0} out of range (1..=16)")]
    InvalidOctaves(u32),

    #[error("noise increment must be finite and positive, got {0}")]
    InvalidIncrement(f32),
}

/// Errors raised while seeding a board.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InitError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Noise(#[from] NoiseError),
}
