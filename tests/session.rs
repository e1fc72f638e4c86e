use anyhow::Result;
use playlist_manager::{AppConfig, AudioEngine, HeadlessEngine, Navigation, Session};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Open a session rooted in a fresh temp directory
fn create_test_session() -> (TempDir, Session<HeadlessEngine>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = AppConfig::new(temp_dir.path().to_path_buf());
    let session = Session::open(config, HeadlessEngine::new()).expect("Failed to open session");
    (temp_dir, session)
}

/// Create dummy audio files in the songs directory
fn create_dummy_songs(session: &Session<HeadlessEngine>, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = session.config().songs_dir.join(name);
            fs::write(&path, b"dummy audio data").expect("Failed to write dummy song");
            path
        })
        .collect()
}

fn titles(session: &Session<HeadlessEngine>) -> Vec<String> {
    session
        .registry()
        .current()
        .unwrap()
        .to_list()
        .into_iter()
        .map(|e| e.title)
        .collect()
}

#[test]
fn test_open_creates_layout_and_default_playlist() {
    let (dir, session) = create_test_session();

    assert!(dir.path().join("songs").is_dir());
    assert!(dir.path().join("database/playlist.db").exists());
    assert_eq!(session.registry().list_names(), vec!["My Playlist"]);
}

#[test]
fn test_mutations_are_persisted() {
    let (dir, mut session) = create_test_session();

    assert!(session.create_playlist("Road Trip").unwrap());
    assert!(!session.create_playlist("  ").unwrap());
    assert!(session.rename_playlist("My Playlist", "Favourites").unwrap());
    assert!(!session.rename_playlist("Favourites", "Road Trip").unwrap());

    let reopened = Session::open(
        AppConfig::new(dir.path().to_path_buf()),
        HeadlessEngine::new(),
    )
    .unwrap();
    assert_eq!(
        reopened.registry().list_names(),
        vec!["Favourites", "Road Trip"]
    );
}

#[test]
fn test_rename_current_follows_active() {
    let (_dir, mut session) = create_test_session();
    session.create_playlist("Zed").unwrap();

    assert!(session.rename_current("Alpha").unwrap());
    assert_eq!(session.registry().current_name(), Some("Alpha"));
}

#[test]
fn test_add_file_derives_title_and_rejects_non_audio() {
    let (_dir, mut session) = create_test_session();
    let files = create_dummy_songs(&session, &["my-first_song.mp3", "cover.jpg"]);

    let title = session.add_file(&files[0]).unwrap();
    assert_eq!(title.as_deref(), Some("my first song"));

    assert_eq!(session.add_file(&files[1]).unwrap(), None);

    // adding the same file again is allowed at this layer
    session.add_file(&files[0]).unwrap();
    assert_eq!(titles(&session), vec!["my first song", "my first song"]);
    assert_eq!(session.store().song_count().unwrap(), 2);
}

#[test]
fn test_add_file_without_active_playlist() {
    let (dir, mut session) = create_test_session();
    let files = create_dummy_songs(&session, &["a.mp3"]);
    session.delete_playlist("My Playlist").unwrap();

    assert!(session.registry().current().is_none());
    assert_eq!(session.add_file(&files[0]).unwrap(), None);
    assert_eq!(session.import_directory(&dir.path().join("songs")).unwrap(), 0);
}

#[test]
fn test_import_skips_existing_titles() {
    let (_dir, mut session) = create_test_session();
    create_dummy_songs(&session, &["b-side.wav", "a_side.mp3", "readme.txt"]);

    assert_eq!(session.import_songs_dir().unwrap(), 2);
    assert_eq!(titles(&session), vec!["a side", "b side"]);

    create_dummy_songs(&session, &["c.flac"]);
    assert_eq!(session.import_songs_dir().unwrap(), 1);
    assert_eq!(session.import_songs_dir().unwrap(), 0);
    assert_eq!(titles(&session), vec!["a side", "b side", "c"]);
    assert_eq!(session.store().song_count().unwrap(), 3);
}

#[test]
fn test_delete_song_stops_matching_playback() {
    let (_dir, mut session) = create_test_session();
    create_dummy_songs(&session, &["one.mp3", "two.mp3"]);
    session.import_songs_dir().unwrap();

    assert!(session.play("one").unwrap());
    assert!(session.is_playing());

    assert!(session.delete_song("two").unwrap());
    assert!(session.is_playing());

    assert!(session.delete_song("one").unwrap());
    assert!(!session.is_playing());
    assert!(session.engine().current_path().is_none());

    assert!(!session.delete_song("one").unwrap());
    assert_eq!(session.store().song_count().unwrap(), 0);
}

#[test]
fn test_next_and_previous() {
    let (_dir, mut session) = create_test_session();
    create_dummy_songs(&session, &["a.mp3", "b.mp3", "c.mp3"]);
    session.import_songs_dir().unwrap();

    assert_eq!(
        session.next().unwrap(),
        Navigation::Playing { index: 0, title: "a".to_string() }
    );
    session.next().unwrap();
    session.next().unwrap();
    assert_eq!(session.next().unwrap(), Navigation::EndOfPlaylist);
    assert_eq!(session.selected(), Some(2));

    session.previous().unwrap();
    session.previous().unwrap();
    assert_eq!(session.previous().unwrap(), Navigation::StartOfPlaylist);

    // without a selection, previous starts from the end
    session.switch_playlist("My Playlist");
    assert_eq!(
        session.previous().unwrap(),
        Navigation::Playing { index: 2, title: "c".to_string() }
    );
}

#[test]
fn test_navigation_on_empty_playlist() {
    let (_dir, mut session) = create_test_session();
    assert_eq!(session.next().unwrap(), Navigation::Nothing);
    assert_eq!(session.previous().unwrap(), Navigation::Nothing);
    assert!(!session.play("anything").unwrap());
}

#[test]
fn test_find_is_case_insensitive_substring() {
    let (_dir, mut session) = create_test_session();
    create_dummy_songs(&session, &["Blue_Monday.mp3", "Love-Will-Tear.mp3"]);
    session.import_songs_dir().unwrap();

    assert_eq!(session.find("monday"), Some((0, "Blue Monday".to_string())));
    assert_eq!(session.selected(), Some(0));
    assert_eq!(session.find("TEAR"), Some((1, "Love Will Tear".to_string())));
    assert_eq!(session.find("ceremony"), None);
    assert_eq!(session.selected(), Some(1));
}

#[test]
fn test_find_empty_query_matches_nothing() {
    let (_dir, mut session) = create_test_session();
    create_dummy_songs(&session, &["Blue_Monday.mp3", "Love-Will-Tear.mp3"]);
    session.import_songs_dir().unwrap();

    assert_eq!(session.find("TEAR"), Some((1, "Love Will Tear".to_string())));
    assert_eq!(session.find(""), None);
    assert_eq!(session.selected(), Some(1));
}

#[test]
fn test_pause_and_resume() {
    let (_dir, mut session) = create_test_session();
    create_dummy_songs(&session, &["a.mp3"]);
    session.import_songs_dir().unwrap();

    session.play("a").unwrap();
    session.pause();
    assert!(!session.is_playing());
    session.resume();
    assert!(session.is_playing());
    session.stop().unwrap();
    assert!(!session.is_playing());
}

#[test]
fn test_play_missing_file_is_an_error() {
    let (dir, mut session) = create_test_session();
    let files = create_dummy_songs(&session, &["gone.mp3"]);
    session.add_file(&files[0]).unwrap();
    fs::remove_file(&files[0]).unwrap();

    assert!(session.play("gone").is_err());
    assert!(dir.path().join("database/playlist.db").exists());
}

/// Engine whose stop always fails
#[derive(Default)]
struct BrokenEngine;

impl AudioEngine for BrokenEngine {
    fn play(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }
    fn pause(&mut self) {}
    fn resume(&mut self) {}
    fn stop(&mut self) -> Result<()> {
        anyhow::bail!("output device lost")
    }
    fn is_playing(&self) -> bool {
        false
    }
    fn current_path(&self) -> Option<&Path> {
        None
    }
}

#[test]
fn test_shutdown_reports_failures_without_propagating() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = AppConfig::new(temp_dir.path().to_path_buf());
    let store_path = config.store_path.clone();
    let mut session = Session::open(config, BrokenEngine).unwrap();

    let report = session.shutdown();
    assert!(report.saved);
    assert!(!report.stopped);

    // make the store unreachable, then shut down again
    fs::remove_dir_all(store_path.parent().unwrap()).unwrap();
    fs::write(store_path.parent().unwrap(), b"blocker").unwrap();
    let report = session.shutdown();
    assert!(!report.saved);
}

#[test]
fn test_healthy_shutdown() {
    let (_dir, mut session) = create_test_session();
    let report = session.shutdown();
    assert!(report.saved);
    assert!(report.stopped);
    assert_eq!(session.store().playlist_names().unwrap(), vec!["My Playlist"]);
}
