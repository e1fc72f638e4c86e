//! Playlist Manager - named playlists of audio files, persisted in SQLite
//!
//! This library keeps an in-memory registry of ordered playlists and
//! reconciles it with a SQLite store on save and load.

pub mod config;
pub mod media;
pub mod model;
pub mod player;
pub mod session;
pub mod store;

pub use config::AppConfig;
pub use model::{Playlist, PlaylistRegistry, SongEntry};
pub use player::{AudioEngine, HeadlessEngine};
pub use session::{Navigation, Session, ShutdownReport};
pub use store::{PlaylistStore, StoreError};
