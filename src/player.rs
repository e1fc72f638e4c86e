//! Playback abstraction
//!
//! Decoding and output live outside this crate. Front ends plug a real
//! engine in through `AudioEngine`; `HeadlessEngine` only tracks state.

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Audio engine trait - allows swapping the output backend
pub trait AudioEngine {
    /// Start playing a file, replacing whatever was loaded
    fn play(&mut self, path: &Path) -> Result<()>;

    /// Pause the current file
    fn pause(&mut self);

    /// Resume a paused file
    fn resume(&mut self);

    /// Stop playback and unload the current file
    fn stop(&mut self) -> Result<()>;

    /// Whether audio is currently being produced
    fn is_playing(&self) -> bool;

    /// Path of the loaded file, if any
    fn current_path(&self) -> Option<&Path>;
}

/// Engine that produces no sound and only records what it was asked to do
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    current: Option<PathBuf>,
    paused: bool,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioEngine for HeadlessEngine {
    fn play(&mut self, path: &Path) -> Result<()> {
        self.stop()?;
        if !path.is_file() {
            anyhow::bail!("Audio file not found: {:?}", path);
        }

        log::debug!("Headless playback of {:?}", path);
        self.current = Some(path.to_path_buf());
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        if self.current.is_some() {
            self.paused = true;
        }
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn stop(&mut self) -> Result<()> {
        self.current = None;
        self.paused = false;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.current.is_some() && !self.paused
    }

    fn current_path(&self) -> Option<&Path> {
        self.current.as_deref()
    }
}
