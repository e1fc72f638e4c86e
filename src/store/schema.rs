use rusqlite::Connection;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS playlists (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL
);

CREATE TABLE IF NOT EXISTS songs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    playlist_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    filepath TEXT NOT NULL,
    FOREIGN KEY (playlist_id) REFERENCES playlists(id) ON DELETE CASCADE
);
"#;

/// Turn on cascading deletes for this connection
///
/// SQLite leaves foreign keys off per connection, so this runs on every open.
pub fn enable_foreign_keys(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}

/// Create both tables if they do not exist yet
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        let rows = stmt.query_map([], |row| row.get(0)).unwrap();
        let names: Vec<String> = rows.map(|r| r.unwrap()).collect();
        names
    }

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        assert_eq!(table_names(&conn), vec!["playlists", "songs"]);
    }

    #[test]
    fn test_cascade_removes_songs() {
        let conn = Connection::open_in_memory().unwrap();
        enable_foreign_keys(&conn).unwrap();
        init_schema(&conn).unwrap();

        conn.execute("INSERT INTO playlists (name) VALUES ('Mix')", [])
            .unwrap();
        let id = conn.last_insert_rowid();
        conn.execute(
            "INSERT INTO songs (playlist_id, title, filepath) VALUES (?1, 'A', '/a.mp3')",
            [id],
        )
        .unwrap();

        conn.execute("DELETE FROM playlists WHERE id = ?1", [id])
            .unwrap();

        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_playlist_names_are_unique() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        conn.execute("INSERT INTO playlists (name) VALUES ('Mix')", [])
            .unwrap();
        assert!(conn
            .execute("INSERT INTO playlists (name) VALUES ('Mix')", [])
            .is_err());
    }
}
