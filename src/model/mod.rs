//! In-memory playlist model
//!
//! Songs, playlists, and the registry that owns them. Nothing here
//! touches the disk; see `store` for persistence.

mod playlist;
mod registry;
mod song;

pub use playlist::Playlist;
pub use registry::{PlaylistRegistry, DEFAULT_PLAYLIST_NAME};
pub use song::SongEntry;
