//! SQLite persistence for the playlist registry
//!
//! The store holds two tables, `playlists` and `songs`, with songs removed
//! by cascade when their playlist row goes away. `PlaylistStore` makes the
//! file match an in-memory registry on save and rebuilds a registry from
//! it on load.

mod reconciler;
mod schema;

pub use reconciler::PlaylistStore;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing the playlist store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create store directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open playlist store {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to normalize song path {path:?}")]
    Path {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
