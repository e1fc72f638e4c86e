use super::Playlist;
use std::collections::BTreeMap;

/// Name of the playlist seeded into an empty store
pub const DEFAULT_PLAYLIST_NAME: &str = "My Playlist";

/// All playlists known to the application, plus the active one
///
/// Names are trimmed before every comparison. Whenever `current` is set it
/// names a playlist present in `playlists`.
#[derive(Debug, Clone, Default)]
pub struct PlaylistRegistry {
    /// Playlists keyed by name (kept sorted)
    playlists: BTreeMap<String, Playlist>,

    /// Name of the active playlist
    current: Option<String>,
}

impl PlaylistRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding a single empty default playlist, marked active
    pub fn with_default_playlist() -> Self {
        let mut registry = Self::new();
        registry.create_playlist(DEFAULT_PLAYLIST_NAME);
        registry
    }

    /// Create an empty playlist
    ///
    /// Fails on an empty or already used name. The first playlist created
    /// in a registry without an active one becomes active.
    pub fn create_playlist(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.playlists.contains_key(name) {
            return false;
        }

        self.playlists
            .insert(name.to_string(), Playlist::new(name.to_string()));
        if self.current.is_none() {
            self.current = Some(name.to_string());
        }
        true
    }

    /// Remove a playlist and its songs
    ///
    /// Deleting the active playlist hands the active slot to the
    /// alphabetically first remaining playlist, if any.
    pub fn delete_playlist(&mut self, name: &str) -> bool {
        let name = name.trim();
        if self.playlists.remove(name).is_none() {
            return false;
        }

        if self.current.as_deref() == Some(name) {
            self.current = self.playlists.keys().next().cloned();
        }
        true
    }

    /// Make the named playlist active
    pub fn switch_playlist(&mut self, name: &str) -> bool {
        let name = name.trim();
        if !self.playlists.contains_key(name) {
            return false;
        }
        self.current = Some(name.to_string());
        true
    }

    /// Rename a playlist, keeping its songs and its active status
    ///
    /// Renaming onto any existing name fails, including the playlist's own.
    pub fn rename_playlist(&mut self, old_name: &str, new_name: &str) -> bool {
        let old_name = old_name.trim();
        let new_name = new_name.trim();
        if new_name.is_empty() || self.playlists.contains_key(new_name) {
            return false;
        }

        let Some(mut playlist) = self.playlists.remove(old_name) else {
            return false;
        };
        playlist.set_name(new_name.to_string());
        self.playlists.insert(new_name.to_string(), playlist);

        if self.current.as_deref() == Some(old_name) {
            self.current = Some(new_name.to_string());
        }
        true
    }

    /// All playlist names in ascending order
    pub fn list_names(&self) -> Vec<String> {
        self.playlists.keys().cloned().collect()
    }

    /// Get a playlist by name
    pub fn get(&self, name: &str) -> Option<&Playlist> {
        self.playlists.get(name.trim())
    }

    /// Get a mutable playlist by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Playlist> {
        self.playlists.get_mut(name.trim())
    }

    /// Name of the active playlist
    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The active playlist
    pub fn current(&self) -> Option<&Playlist> {
        self.current
            .as_deref()
            .and_then(|name| self.playlists.get(name))
    }

    /// The active playlist, mutably
    pub fn current_mut(&mut self) -> Option<&mut Playlist> {
        match self.current.as_deref() {
            Some(name) => self.playlists.get_mut(name),
            None => None,
        }
    }

    /// Iterate over all playlists in name order
    pub fn playlists(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.values()
    }

    /// Iterate over `(name, playlist)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Playlist)> {
        self.playlists
            .iter()
            .map(|(name, playlist)| (name.as_str(), playlist))
    }

    /// Number of playlists
    pub fn playlist_count(&self) -> usize {
        self.playlists.len()
    }

    /// Total number of songs across every playlist
    pub fn song_count(&self) -> usize {
        self.playlists.values().map(Playlist::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}
