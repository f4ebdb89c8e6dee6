//! Display consumers for completed generations.

pub mod snapshot;
pub mod window_output;

pub use snapshot::SnapshotOutput;
pub use window_output::{WindowConfig, WindowRenderer};

use crate::board::Board;
use anyhow::Result;

/// Trait for board output backends.
///
/// Backends only ever receive a board after its tick has completed.
pub trait OutputBackend {
    /// Hand a finished generation to the output.
    fn present(&mut self, board: &Board, generation: u64) -> Result<()>;
}
