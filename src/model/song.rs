use serde::{Deserialize, Serialize};

/// A single song inside a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongEntry {
    /// Display title, used as the lookup key within a playlist
    pub title: String,

    /// Path to the audio file as given by the caller
    pub filepath: String,
}

impl SongEntry {
    pub fn new(title: impl Into<String>, filepath: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            filepath: filepath.into(),
        }
    }
}
