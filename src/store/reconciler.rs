//! Save and load of the whole registry

use super::schema::{enable_foreign_keys, init_schema};
use super::{Result, StoreError};
use crate::media::normalize_path;
use crate::model::PlaylistRegistry;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Playlist store backed by a single SQLite file
///
/// Every call opens its own connection and closes it before returning.
#[derive(Debug, Clone)]
pub struct PlaylistStore {
    path: PathBuf,
}

impl PlaylistStore {
    /// Open (or create) the store at `path`
    ///
    /// Creates the parent directory and both tables if they are missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let store = Self { path };
        let conn = store.connect()?;
        init_schema(&conn)?;

        log::info!("Playlist store ready at {:?}", store.path);
        Ok(store)
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).map_err(|source| StoreError::Open {
            path: self.path.clone(),
            source,
        })?;
        enable_foreign_keys(&conn)?;
        Ok(conn)
    }

    /// Make the store hold exactly the playlists and songs of `registry`
    ///
    /// Playlists missing from the registry are deleted (their songs go with
    /// them), every registry playlist gets a row, and each playlist's songs
    /// are replaced wholesale. Runs in one transaction: on error nothing
    /// is written.
    pub fn save(&self, registry: &PlaylistRegistry) -> Result<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        let stored = stored_names(&tx)?;
        let names: HashSet<String> = registry.list_names().into_iter().collect();

        for stale in stored.difference(&names) {
            log::debug!("Removing playlist {:?} from store", stale);
            tx.execute("DELETE FROM playlists WHERE name = ?1", params![stale])?;
        }

        let mut ids: HashMap<&str, i64> = HashMap::new();
        for (name, _) in registry.iter() {
            let id = ensure_playlist_row(&tx, name)?;
            ids.insert(name, id);
        }

        let mut song_rows = 0;
        for (name, playlist) in registry.iter() {
            let id = ids[name];
            tx.execute("DELETE FROM songs WHERE playlist_id = ?1", params![id])?;

            for entry in playlist.entries() {
                let filepath =
                    normalize_path(&entry.filepath).map_err(|source| StoreError::Path {
                        path: entry.filepath.clone(),
                        source,
                    })?;
                tx.execute(
                    "INSERT INTO songs (playlist_id, title, filepath) VALUES (?1, ?2, ?3)",
                    params![id, entry.title, filepath],
                )?;
                song_rows += 1;
            }
        }

        tx.commit()?;

        log::info!(
            "Saved {} playlist(s), {} song(s) to {:?}",
            registry.playlist_count(),
            song_rows,
            self.path
        );
        Ok(())
    }

    /// Rebuild a registry from the store
    ///
    /// An empty store yields a registry with one empty default playlist.
    /// Songs are appended in row-id order, which is their insertion order.
    /// The alphabetically first playlist is made active.
    pub fn load(&self) -> Result<PlaylistRegistry> {
        let conn = self.connect()?;

        let mut stmt = conn.prepare("SELECT id, name FROM playlists ORDER BY name ASC")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
        let mut playlists = Vec::new();
        for row in rows {
            playlists.push(row?);
        }

        if playlists.is_empty() {
            log::info!("Playlist store is empty, starting with a default playlist");
            return Ok(PlaylistRegistry::with_default_playlist());
        }

        let mut registry = PlaylistRegistry::new();
        let mut id_to_name: HashMap<i64, String> = HashMap::new();
        for (id, name) in playlists {
            if registry.create_playlist(&name) {
                id_to_name.insert(id, name.trim().to_string());
            } else {
                log::warn!("Skipping stored playlist with unusable name {:?}", name);
            }
        }

        let mut stmt =
            conn.prepare("SELECT playlist_id, title, filepath FROM songs ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut orphans = 0;
        for row in rows {
            let (playlist_id, title, filepath) = row?;
            let playlist = id_to_name
                .get(&playlist_id)
                .and_then(|name| registry.get_mut(name));
            match playlist {
                Some(playlist) => playlist.add(title, filepath),
                None => {
                    log::debug!(
                        "Song {:?} references unknown playlist id {}",
                        title,
                        playlist_id
                    );
                    orphans += 1;
                }
            }
        }
        if orphans > 0 {
            log::warn!("Ignored {} song row(s) without a playlist", orphans);
        }

        if let Some(first) = registry.list_names().into_iter().next() {
            registry.switch_playlist(&first);
        }

        log::info!(
            "Loaded {} playlist(s), {} song(s) from {:?}",
            registry.playlist_count(),
            registry.song_count(),
            self.path
        );
        Ok(registry)
    }

    /// Names of the playlists currently stored, ascending
    pub fn playlist_names(&self) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut names: Vec<String> = stored_names(&conn)?.into_iter().collect();
        names.sort();
        Ok(names)
    }

    /// Number of song rows currently stored
    pub fn song_count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn stored_names(conn: &Connection) -> Result<HashSet<String>> {
    let mut stmt = conn.prepare("SELECT name FROM playlists")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut names = HashSet::new();
    for row in rows {
        names.insert(row?);
    }
    Ok(names)
}

/// Id of the playlist row called `name`, inserting it when absent
fn ensure_playlist_row(conn: &Connection, name: &str) -> Result<i64> {
    let existing = conn
        .query_row(
            "SELECT id FROM playlists WHERE name = ?1",
            params![name],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;

    if let Some(id) = existing {
        return Ok(id);
    }

    conn.execute("INSERT INTO playlists (name) VALUES (?1)", params![name])?;
    let id = conn.last_insert_rowid();
    log::debug!("Inserted playlist {:?} with id {}", name, id);
    Ok(id)
}
