//! Application session
//!
//! Owns the one playlist registry of a running application together with
//! its store and audio engine. Every successful mutation is written back
//! to the store right away.

use crate::config::AppConfig;
use crate::media::{is_audio_file, pretty_title, scan_audio_files};
use crate::model::PlaylistRegistry;
use crate::player::AudioEngine;
use crate::store::PlaylistStore;
use anyhow::{Context, Result};
use std::path::Path;

/// Outcome of moving through the active playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Started playing the entry at `index`
    Playing { index: usize, title: String },

    /// Already at the last entry
    EndOfPlaylist,

    /// Already at the first entry
    StartOfPlaylist,

    /// No active playlist, or it has no entries
    Nothing,
}

/// What happened during a best-effort shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownReport {
    pub saved: bool,
    pub stopped: bool,
}

/// A running playlist manager
pub struct Session<E: AudioEngine> {
    config: AppConfig,
    store: PlaylistStore,
    registry: PlaylistRegistry,
    engine: E,

    /// Index of the selected entry in the active playlist
    selected: Option<usize>,
}

impl<E: AudioEngine> Session<E> {
    /// Prepare directories, open the store and load the registry from it
    pub fn open(config: AppConfig, engine: E) -> Result<Self> {
        config.ensure_directories()?;

        let store = PlaylistStore::open(config.store_path.clone())
            .with_context(|| format!("Failed to open playlist store {:?}", config.store_path))?;
        let registry = store.load().context("Failed to load playlists")?;

        log::info!(
            "Session started: {} playlist(s), active {:?}",
            registry.playlist_count(),
            registry.current_name()
        );

        Ok(Self {
            config,
            store,
            registry,
            engine,
            selected: None,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &PlaylistStore {
        &self.store
    }

    pub fn registry(&self) -> &PlaylistRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Index of the selected entry in the active playlist
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Write the registry to the store
    pub fn save(&self) -> Result<()> {
        self.store
            .save(&self.registry)
            .context("Failed to save playlists")
    }

    // ===== Playlist management =====

    pub fn create_playlist(&mut self, name: &str) -> Result<bool> {
        if !self.registry.create_playlist(name) {
            log::warn!("Invalid or duplicate playlist name: {:?}", name);
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn rename_playlist(&mut self, old_name: &str, new_name: &str) -> Result<bool> {
        if !self.registry.rename_playlist(old_name, new_name) {
            log::warn!("Cannot rename {:?} to {:?}", old_name, new_name);
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Rename the active playlist
    pub fn rename_current(&mut self, new_name: &str) -> Result<bool> {
        let Some(current) = self.registry.current_name().map(str::to_string) else {
            log::warn!("No playlist selected");
            return Ok(false);
        };
        self.rename_playlist(&current, new_name)
    }

    pub fn delete_playlist(&mut self, name: &str) -> Result<bool> {
        let was_current = self.registry.current_name() == Some(name.trim());
        if !self.registry.delete_playlist(name) {
            return Ok(false);
        }
        if was_current {
            self.selected = None;
        }
        self.save()?;
        Ok(true)
    }

    /// Make another playlist active; nothing is written
    pub fn switch_playlist(&mut self, name: &str) -> bool {
        if !self.registry.switch_playlist(name) {
            return false;
        }
        self.selected = None;
        true
    }

    // ===== Song management =====

    /// Append an audio file to the active playlist
    ///
    /// Returns the derived title, or `None` when there is no active playlist
    /// or the file is not a supported audio format. Duplicate titles are
    /// not checked here.
    pub fn add_file(&mut self, path: &Path) -> Result<Option<String>> {
        if !is_audio_file(path) {
            log::warn!("Not a supported audio format: {:?}", path);
            return Ok(None);
        }
        let Some(playlist) = self.registry.current_mut() else {
            log::warn!("Create or select a playlist first");
            return Ok(None);
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let title = pretty_title(&file_name);
        playlist.add(title.clone(), path.to_string_lossy().into_owned());
        log::info!("Added {:?} to {:?}", title, playlist.name());

        self.save()?;
        Ok(Some(title))
    }

    /// Add every audio file in `dir` whose title is not already present
    ///
    /// Returns how many entries were added. The store is only written when
    /// something was added.
    pub fn import_directory(&mut self, dir: &Path) -> Result<usize> {
        let Some(playlist) = self.registry.current_mut() else {
            log::warn!("Create or select a playlist first");
            return Ok(0);
        };

        let mut added = 0;
        for path in scan_audio_files(dir)? {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let title = pretty_title(&file_name);

            if playlist.search(&title).is_some() {
                log::debug!("Already imported: {:?}", title);
                continue;
            }
            playlist.add(title, path.to_string_lossy().into_owned());
            added += 1;
        }

        if added > 0 {
            log::info!("Imported {} song(s) into {:?}", added, playlist.name());
            self.save()?;
        } else {
            log::info!("No new audio files found in {:?}", dir);
        }
        Ok(added)
    }

    /// Import from the configured songs directory
    pub fn import_songs_dir(&mut self) -> Result<usize> {
        let dir = self.config.songs_dir.clone();
        self.import_directory(&dir)
    }

    /// Delete the first entry titled `title` from the active playlist
    ///
    /// Stops playback when the loaded file carries the same title.
    pub fn delete_song(&mut self, title: &str) -> Result<bool> {
        let Some(playlist) = self.registry.current_mut() else {
            return Ok(false);
        };
        if !playlist.delete(title) {
            log::warn!("Could not delete song {:?}", title);
            return Ok(false);
        }
        self.selected = None;
        self.save()?;

        let loaded_title = self
            .engine
            .current_path()
            .and_then(|p| p.file_name())
            .map(|n| pretty_title(&n.to_string_lossy()));
        if loaded_title.as_deref() == Some(title) {
            self.engine.stop()?;
            log::info!("Stopped (song deleted)");
        }
        Ok(true)
    }

    /// Case-insensitive substring search over the active playlist's titles
    ///
    /// Selects and returns the first match. An empty query matches nothing.
    pub fn find(&mut self, query: &str) -> Option<(usize, String)> {
        if query.is_empty() {
            return None;
        }

        let query = query.to_lowercase();
        let found = self.registry.current().and_then(|playlist| {
            playlist
                .entries()
                .iter()
                .position(|e| e.title.to_lowercase().contains(&query))
                .map(|index| (index, playlist.entries()[index].title.clone()))
        });

        if let Some((index, _)) = &found {
            self.selected = Some(*index);
        }
        found
    }

    // ===== Playback =====

    /// Play the first entry titled `title` in the active playlist
    pub fn play(&mut self, title: &str) -> Result<bool> {
        let index = match self.registry.current().and_then(|p| p.position(title)) {
            Some(index) => index,
            None => return Ok(false),
        };
        self.play_index(index)
    }

    /// Select and play the entry at `index`
    pub fn play_index(&mut self, index: usize) -> Result<bool> {
        let Some(entry) = self.registry.current().and_then(|p| p.get(index)).cloned() else {
            return Ok(false);
        };

        self.selected = Some(index);
        self.engine
            .play(Path::new(&entry.filepath))
            .with_context(|| format!("Failed to play {:?}", entry.filepath))?;
        log::info!("Playing: {}", entry.title);
        Ok(true)
    }

    pub fn next(&mut self) -> Result<Navigation> {
        let len = self.current_len();
        if len == 0 {
            return Ok(Navigation::Nothing);
        }
        let index = match self.selected {
            None => 0,
            Some(i) if i + 1 < len => i + 1,
            Some(_) => return Ok(Navigation::EndOfPlaylist),
        };
        self.navigate_to(index)
    }

    pub fn previous(&mut self) -> Result<Navigation> {
        let len = self.current_len();
        if len == 0 {
            return Ok(Navigation::Nothing);
        }
        let index = match self.selected {
            None => len - 1,
            Some(i) if i > 0 => i - 1,
            Some(_) => return Ok(Navigation::StartOfPlaylist),
        };
        self.navigate_to(index)
    }

    fn navigate_to(&mut self, index: usize) -> Result<Navigation> {
        if !self.play_index(index)? {
            return Ok(Navigation::Nothing);
        }
        let title = self
            .registry
            .current()
            .and_then(|p| p.get(index))
            .map(|e| e.title.clone())
            .unwrap_or_default();
        Ok(Navigation::Playing { index, title })
    }

    fn current_len(&self) -> usize {
        self.registry.current().map(|p| p.len()).unwrap_or(0)
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn resume(&mut self) {
        self.engine.resume();
    }

    pub fn stop(&mut self) -> Result<()> {
        self.engine.stop()
    }

    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    /// Save and stop, logging failures instead of returning them
    pub fn shutdown(&mut self) -> ShutdownReport {
        let saved = match self.save() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Ignoring save failure during shutdown: {:#}", e);
                false
            }
        };

        let stopped = match self.engine.stop() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Ignoring stop failure during shutdown: {:#}", e);
                false
            }
        };

        ShutdownReport { saved, stopped }
    }
}
