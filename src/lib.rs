//! Lifeshade: toroidal Game of Life seeded from coherent noise.
//!
//! The simulation core (board, rules, evaluators, initializer, ping-pong
//! simulation) is pure and runs without a graphics context; the window and
//! snapshot outputs consume finished generations.

pub mod board;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod frame;
pub mod initializer;
pub mod noise;
pub mod output;
pub mod pacing;
pub mod rules;
pub mod simulation;

pub use board::Board;
pub use error::{BoardError, InitError, NoiseError};
pub use evaluator::{ParallelEvaluator, SerialEvaluator, StepEvaluator};
pub use initializer::{BoardInitializer, NoiseParams};
pub use simulation::Simulation;
