/// Tempo - terminal music player
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tempo_cli::{
    backend::{LogMediaSession, TerminalBackend},
    config::TempoConfig,
    repl::{self, Command},
};
use tempo_core::Catalog;
use tempo_library::LibraryScanner;
use tempo_playback::PlayerController;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tempo")]
#[command(about = "Play queue for a local music folder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive player session
    Play {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Catalog JSON written by `tempo scan`
        #[arg(long, env = "TEMPO_CATALOG")]
        catalog: Option<PathBuf>,
        /// Music directory to scan (and to resolve track files against)
        #[arg(short, long, env = "TEMPO_MUSIC_DIR")]
        music_dir: Option<PathBuf>,
    },
    /// Scan a directory and print or save its catalog
    Scan {
        /// Directory path to scan
        path: PathBuf,
        /// Write the catalog JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempo=info,tempo_playback=info,tempo_library=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            catalog,
            music_dir,
        } => {
            play(config.as_deref(), catalog, music_dir)?;
        }
        Commands::Scan {
            path,
            output,
            config,
        } => {
            scan(&path, output.as_deref(), config.as_deref())?;
        }
    }

    Ok(())
}

fn play(
    config_path: Option<&Path>,
    catalog: Option<PathBuf>,
    music_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Load configuration, command-line flags win
    let mut config = TempoConfig::load(config_path)?;
    if catalog.is_some() {
        config.library.catalog_file = catalog;
    }
    if music_dir.is_some() {
        config.library.music_dir = music_dir;
    }
    config.validate()?;

    let catalog = load_catalog(&config)?;
    tracing::info!("Loaded {} tracks", catalog.len());

    let root = config
        .library
        .music_dir
        .clone()
        .or_else(|| {
            config
                .library
                .catalog_file
                .as_deref()
                .and_then(Path::parent)
                .map(Path::to_path_buf)
        })
        .unwrap_or_else(|| PathBuf::from("."));

    let mut player = PlayerController::new(
        catalog,
        TerminalBackend::new(root),
        config.player_config(),
    )
    .with_media_session(LogMediaSession);

    println!("{}", repl::HELP);
    run_session(&mut player)
}

fn run_session(player: &mut PlayerController<TerminalBackend>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("tempo> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        // The clock only advances between commands
        if player.is_playing() && player.backend().has_ended() {
            if let Err(e) = player.on_track_ended() {
                eprintln!("{}", e);
            }
        }

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{} (type `help`)", e);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        match repl::execute(player, &command) {
            Ok(Some(output)) => println!("{}", output.trim_end()),
            Ok(None) => {}
            Err(e) => eprintln!("{}", e),
        }

        for event in player.drain_events() {
            tracing::debug!("Event: {:?}", event);
        }
    }

    Ok(())
}

fn load_catalog(config: &TempoConfig) -> anyhow::Result<Catalog> {
    if let Some(path) = &config.library.catalog_file {
        return Catalog::load(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()));
    }

    let music_dir = config
        .library
        .music_dir
        .as_deref()
        .context("No music directory configured")?;
    let mut scanner = LibraryScanner::with_config(config.scan_config());
    let (catalog, stats) = scanner.scan(music_dir)?;
    for (path, error) in &stats.errors {
        tracing::warn!("Skipped {}: {}", path.display(), error);
    }
    Ok(catalog)
}

fn scan(path: &Path, output: Option<&Path>, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = TempoConfig::load(config_path)?;
    let mut scanner = LibraryScanner::with_config(config.scan_config());

    let (catalog, stats) = scanner.scan(path)?;
    match output {
        Some(output) => {
            catalog
                .save(output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Catalog written to {}", output.display());
        }
        None => println!("{}", catalog.to_json()?),
    }

    eprintln!("Scan complete!");
    eprintln!("  Files discovered: {}", stats.files_discovered);
    eprintln!("  Tracks added: {}", stats.tracks_added);
    eprintln!("  With artwork: {}", stats.tracks_with_artwork);
    eprintln!("  Errors: {}", stats.errors.len());
    for (path, error) in &stats.errors {
        eprintln!("    {}: {}", path.display(), error);
    }

    Ok(())
}
