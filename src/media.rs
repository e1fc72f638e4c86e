//! Audio file helpers
//!
//! Classification by extension, title derivation from file names, path
//! normalization before storage, and directory scanning for imports.

use anyhow::{Context, Result};
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Extensions accepted as audio files (lowercase, without the dot)
pub const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "wav", "ogg", "flac", "aac", "m4a"];

/// Check whether a path has a supported audio extension
pub fn is_audio_file(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            AUDIO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Turn a file name into a display title
///
/// `01_my-song.mp3` becomes `01 my song`.
pub fn pretty_title(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expand `~` and make a path absolute, resolving `.` and `..` lexically
///
/// An empty path stands for the current directory.
pub fn normalize_path(path: &str) -> io::Result<String> {
    let expanded = shellexpand::tilde(path);
    let absolute = if expanded.is_empty() {
        std::env::current_dir()?
    } else {
        std::path::absolute(Path::new(expanded.as_ref()))?
    };

    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }

    Ok(cleaned.to_string_lossy().into_owned())
}

/// List the supported audio files directly inside `dir`, sorted by name
///
/// Subdirectories are not descended into.
pub fn scan_audio_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to read directory: {:?}", dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_audio_file(entry.path()) {
            files.push(entry.into_path());
        } else {
            log::debug!("Skipping non-audio file: {:?}", entry.path());
        }
    }

    log::debug!("Found {} audio file(s) in {:?}", files.len(), dir);
    Ok(files)
}
