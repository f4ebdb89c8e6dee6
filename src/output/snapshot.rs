//! PNG snapshot output for headless runs.

use super::OutputBackend;
use crate::board::Board;
use crate::frame::Frame;
use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes every `every`-th generation as a grayscale PNG into a directory.
///
/// Run 0 writes into the directory itself; each later run (one per reset)
/// gets its own `run_NNN` subdirectory.
pub struct SnapshotOutput {
    dir: PathBuf,
    run_dir: PathBuf,
    run: u32,
    every: u64,
    written: usize,
}

impl SnapshotOutput {
    pub fn new(dir: impl Into<PathBuf>, every: u64) -> Result<Self> {
        if every == 0 {
            return Err(anyhow!("snapshot interval must be at least 1"));
        }
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| anyhow!("Failed to create snapshot directory {:?}: {}", dir, e))?;
        Ok(Self {
            run_dir: dir.clone(),
            dir,
            run: 0,
            every,
            written: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Index of the current run, incremented by [`SnapshotOutput::start_run`].
    pub fn run(&self) -> u32 {
        self.run
    }

    /// Begins a new run after a reset, so its generation numbers cannot
    /// collide with files already written.
    pub fn start_run(&mut self) -> Result<()> {
        let run = self.run + 1;
        let run_dir = self.dir.join(format!("run_{:03}", run));
        fs::create_dir_all(&run_dir)
            .map_err(|e| anyhow!("Failed to create snapshot directory {:?}: {}", run_dir, e))?;
        self.run = run;
        self.run_dir = run_dir;
        debug!("Snapshot run {} writes to {:?}", self.run, self.run_dir);
        Ok(())
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn path_for(&self, generation: u64) -> PathBuf {
        self.run_dir.join(format!("gen_{:08}.png", generation))
    }
}

impl OutputBackend for SnapshotOutput {
    fn present(&mut self, board: &Board, generation: u64) -> Result<()> {
        if generation % self.every != 0 {
            return Ok(());
        }
        let path = self.path_for(generation);
        Frame::from_board(board).save(&path)?;
        self.written += 1;
        debug!("Wrote snapshot {:?}", path);
        Ok(())
    }
}
