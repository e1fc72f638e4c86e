//! Application configuration

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Configuration for a playlist manager session
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application base directory
    pub base_dir: PathBuf,

    /// SQLite playlist store
    pub store_path: PathBuf,

    /// Directory scanned by bulk imports
    pub songs_dir: PathBuf,
}

impl AppConfig {
    /// Create a configuration rooted at `base_dir`
    ///
    /// The store lives at `database/playlist.db` and imports read from
    /// `songs/`, both relative to the base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            store_path: base_dir.join("database").join("playlist.db"),
            songs_dir: base_dir.join("songs"),
            base_dir,
        }
    }

    /// Use a different store file
    pub fn with_store_path(mut self, store_path: PathBuf) -> Self {
        self.store_path = store_path;
        self
    }

    /// Use a different import directory
    pub fn with_songs_dir(mut self, songs_dir: PathBuf) -> Self {
        self.songs_dir = songs_dir;
        self
    }

    /// Create the songs directory and the store's parent directory
    pub fn ensure_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.songs_dir)
            .with_context(|| format!("Failed to create songs directory {:?}", self.songs_dir))?;

        if let Some(parent) = self.store_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory {:?}", parent))?;
        }
        Ok(())
    }
}
