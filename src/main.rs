use anyhow::Result;
use clap::{Parser, Subcommand};
use playlist_manager::{AppConfig, HeadlessEngine, Session};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "playlist-manager")]
#[command(about = "Organize audio files into named playlists", long_about = None)]
struct Args {
    /// Application directory holding database/ and songs/
    #[arg(short = 'b', long, default_value = ".")]
    base_dir: String,

    /// Path to the playlist database (defaults to <base-dir>/database/playlist.db)
    #[arg(long)]
    db: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all playlists (the active one is marked with *)
    List,

    /// Show the songs of a playlist (the active one by default)
    Show {
        name: Option<String>,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an empty playlist
    Create { name: String },

    /// Rename a playlist
    Rename { old: String, new: String },

    /// Delete a playlist and its songs
    Delete { name: String },

    /// Add an audio file to a playlist
    Add { playlist: String, file: PathBuf },

    /// Remove a song from a playlist by title
    Remove { playlist: String, title: String },

    /// Look up a song by exact title
    Search { playlist: String, title: String },

    /// Import every new audio file from a directory (the songs directory by default)
    Import {
        playlist: String,
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in paths
    let base_dir = shellexpand::tilde(&args.base_dir);
    let mut config = AppConfig::new(PathBuf::from(base_dir.as_ref()));
    if let Some(db) = &args.db {
        config = config.with_store_path(PathBuf::from(shellexpand::tilde(db).as_ref()));
    }

    let mut session = Session::open(config, HeadlessEngine::new())?;
    let outcome = run(&mut session, args.command);

    let report = session.shutdown();
    log::debug!("Shutdown: {:?}", report);

    match outcome {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => Err(e),
    }
}

/// Run one command; `Ok(false)` means the request was rejected
fn run(session: &mut Session<HeadlessEngine>, command: Command) -> Result<bool> {
    match command {
        Command::List => {
            let current = session.registry().current_name().map(str::to_string);
            for name in session.registry().list_names() {
                let marker = if current.as_deref() == Some(name.as_str()) { "*" } else { " " };
                println!("{} {}", marker, name);
            }
            Ok(true)
        }

        Command::Show { name, json } => {
            if let Some(name) = &name {
                if !select(session, name) {
                    return Ok(false);
                }
            }
            let Some(playlist) = session.registry().current() else {
                eprintln!("No playlist selected.");
                return Ok(false);
            };

            if json {
                println!("{}", serde_json::to_string_pretty(playlist.entries())?);
            } else {
                println!("{} ({} song(s))", playlist.name(), playlist.len());
                for (i, entry) in playlist.entries().iter().enumerate() {
                    println!("{:>3}. {}  [{}]", i + 1, entry.title, entry.filepath);
                }
            }
            Ok(true)
        }

        Command::Create { name } => {
            if !session.create_playlist(&name)? {
                eprintln!("Invalid or duplicate playlist name.");
                return Ok(false);
            }
            println!("Created playlist '{}'", name.trim());
            Ok(true)
        }

        Command::Rename { old, new } => {
            if !session.rename_playlist(&old, &new)? {
                eprintln!("Invalid name or already exists.");
                return Ok(false);
            }
            println!("Renamed '{}' to '{}'", old.trim(), new.trim());
            Ok(true)
        }

        Command::Delete { name } => {
            if !session.delete_playlist(&name)? {
                eprintln!("Could not delete playlist '{}'.", name);
                return Ok(false);
            }
            println!("Playlist deleted");
            Ok(true)
        }

        Command::Add { playlist, file } => {
            if !select(session, &playlist) {
                return Ok(false);
            }
            match session.add_file(&file)? {
                Some(title) => {
                    println!("Added '{}' to '{}'", title, playlist.trim());
                    Ok(true)
                }
                None => {
                    eprintln!("Selected file is not a supported audio format.");
                    Ok(false)
                }
            }
        }

        Command::Remove { playlist, title } => {
            if !select(session, &playlist) {
                return Ok(false);
            }
            if !session.delete_song(&title)? {
                eprintln!("Could not delete song '{}'.", title);
                return Ok(false);
            }
            println!("Removed '{}'", title);
            Ok(true)
        }

        Command::Search { playlist, title } => {
            if !select(session, &playlist) {
                return Ok(false);
            }
            match session.registry().current().and_then(|p| p.search(&title)) {
                Some(entry) => {
                    println!("{}  [{}]", entry.title, entry.filepath);
                    Ok(true)
                }
                None => {
                    eprintln!("No match found.");
                    Ok(false)
                }
            }
        }

        Command::Import { playlist, dir } => {
            if !select(session, &playlist) {
                return Ok(false);
            }
            let added = match dir {
                Some(dir) => session.import_directory(&dir)?,
                None => session.import_songs_dir()?,
            };
            if added > 0 {
                println!("Imported {} song(s) into '{}'", added, playlist.trim());
            } else {
                println!("No new audio files found or all already added.");
            }
            Ok(true)
        }
    }
}

fn select(session: &mut Session<HeadlessEngine>, name: &str) -> bool {
    if session.switch_playlist(name) {
        return true;
    }
    eprintln!("No playlist named '{}'.", name.trim());
    false
}
