use super::SongEntry;
use serde::Serialize;

/// Represents a named playlist
///
/// Entries are kept in insertion order. Titles are not required to be
/// unique: lookups and deletes act on the first match.
///
/// The name can only be changed through `PlaylistRegistry::rename_playlist`,
/// so it always matches the key the registry files it under.
#[derive(Debug, Clone, Serialize)]
pub struct Playlist {
    /// Playlist name
    name: String,

    /// Playlist entries (ordered)
    entries: Vec<SongEntry>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Playlist name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(super) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Append a song at the end of this playlist
    pub fn add(&mut self, title: impl Into<String>, filepath: impl Into<String>) {
        self.entries.push(SongEntry::new(title, filepath));
    }

    /// Remove the first song whose title matches exactly
    ///
    /// Returns `false` and leaves the playlist untouched when no song matches.
    pub fn delete(&mut self, title: &str) -> bool {
        match self.position(title) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Find the first song whose title matches exactly
    pub fn search(&self, title: &str) -> Option<&SongEntry> {
        self.entries.iter().find(|entry| entry.title == title)
    }

    /// Index of the first song whose title matches exactly
    pub fn position(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.title == title)
    }

    /// All entries, head to tail
    pub fn to_list(&self) -> Vec<SongEntry> {
        self.entries.clone()
    }

    /// Borrow the entries without cloning
    pub fn entries(&self) -> &[SongEntry] {
        &self.entries
    }

    /// Get an entry by position
    pub fn get(&self, index: usize) -> Option<&SongEntry> {
        self.entries.get(index)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of songs in this playlist
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
