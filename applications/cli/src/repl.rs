//! Line-oriented player commands
//!
//! Each input line maps to one controller operation; the output is the
//! text shown back to the user.

use crate::error::{CliError, Result};
use std::fmt::Write as _;
use tempo_core::TrackId;
use tempo_playback::{format_time, AudioBackend, PlayerController};

pub const HELP: &str = "\
Commands:
  list                 show the catalog
  play <id>            play a track, queueing the rest of the catalog after it
  add <id>             play a track next
  toggle               play/pause
  pause                pause
  next | prev          skip forward / back
  ended                simulate the end of the current track
  seek <0..1>          seek to a fraction of the track
  shuffle | repeat     toggle shuffle / repeat
  move <from> <to>     move a queue row
  order <id>...        replace the queue order
  queue                show the queue
  status               show the current track and position
  help                 show this help
  quit                 exit";

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Play(TrackId),
    Add(TrackId),
    Toggle,
    Pause,
    Next,
    Previous,
    Ended,
    Seek(f64),
    Shuffle,
    Repeat,
    Move(usize, usize),
    Order(Vec<TrackId>),
    Queue,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line
    ///
    /// Returns `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_lowercase().as_str(), args.as_slice()) {
            ("list" | "ls", []) => Command::List,
            ("play", [id]) => Command::Play(TrackId::from(*id)),
            ("add" | "enqueue", [id]) => Command::Add(TrackId::from(*id)),
            ("toggle" | "p", []) => Command::Toggle,
            ("pause", []) => Command::Pause,
            ("next" | "n", []) => Command::Next,
            ("prev" | "previous", []) => Command::Previous,
            ("ended", []) => Command::Ended,
            ("seek", [fraction]) => Command::Seek(parse_number(fraction)?),
            ("shuffle", []) => Command::Shuffle,
            ("repeat", []) => Command::Repeat,
            ("move" | "mv", [from, to]) => Command::Move(parse_number(from)?, parse_number(to)?),
            ("order", ids) if !ids.is_empty() => {
                Command::Order(ids.iter().map(|id| TrackId::from(*id)).collect())
            }
            ("queue" | "q", []) => Command::Queue,
            ("status", []) => Command::Status,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => return Err(CliError::Command(line.trim().to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T> {
    text.parse()
        .map_err(|_| CliError::Command(format!("not a number: {}", text)))
}

/// Run one command against the controller
///
/// Returns the text to print, if any.
pub fn execute<B: AudioBackend>(
    player: &mut PlayerController<B>,
    command: &Command,
) -> Result<Option<String>> {
    match command {
        Command::List => return Ok(Some(render_catalog(player))),
        Command::Play(id) => player.select_track(id)?,
        Command::Add(id) => player.enqueue(id)?,
        Command::Toggle => player.toggle_play_pause()?,
        Command::Pause => player.pause()?,
        Command::Next => player.next()?,
        Command::Previous => player.previous()?,
        Command::Ended => player.on_track_ended()?,
        Command::Seek(fraction) => player.seek_to_fraction(*fraction)?,
        Command::Shuffle => {
            let on = player.toggle_shuffle();
            return Ok(Some(format!("Shuffle {}", if on { "on" } else { "off" })));
        }
        Command::Repeat => {
            let on = player.toggle_repeat();
            return Ok(Some(format!("Repeat {}", if on { "on" } else { "off" })));
        }
        Command::Move(from, to) => player.move_track(*from, *to)?,
        Command::Order(ids) => player.apply_permutation(ids),
        Command::Queue => return Ok(Some(render_queue(player))),
        Command::Status => return Ok(Some(render_status(player))),
        Command::Help => return Ok(Some(HELP.to_string())),
        Command::Quit => return Ok(None),
    }

    Ok(Some(render_status(player)))
}

/// Catalog listing, one track per line
pub fn render_catalog<B: AudioBackend>(player: &PlayerController<B>) -> String {
    let mut out = String::new();
    for track in player.catalog().tracks() {
        let _ = writeln!(
            out,
            "{:>4}  {} - {} ({})",
            track.id, track.title, track.artist, track.album
        );
    }
    out
}

/// Queue listing with the current row marked
pub fn render_queue<B: AudioBackend>(player: &PlayerController<B>) -> String {
    let entries = player.queue_entries();
    if entries.is_empty() {
        return "Queue is empty".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let marker = if entry.is_current { ">" } else { " " };
        let _ = writeln!(
            out,
            "{} {:>3}. [{}] {} - {}",
            marker, entry.position, entry.track.id, entry.track.title, entry.track.artist
        );
    }
    out
}

/// One-line summary of the current track and flags
pub fn render_status<B: AudioBackend>(player: &PlayerController<B>) -> String {
    let store = player.queue_store();
    let flags = format!(
        "{}{}",
        if store.is_shuffled() { " [shuffle]" } else { "" },
        if store.is_repeat() { " [repeat]" } else { "" }
    );

    let Some(track) = player.current_track() else {
        return format!("Nothing loaded{}", flags);
    };

    let backend = player.backend();
    let position = format_time(backend.current_time());
    let duration = backend
        .duration()
        .map_or_else(|| "-:--".to_string(), format_time);

    format!(
        "{} {} - {} [{} / {}]{}",
        if player.is_playing() { "Playing" } else { "Paused" },
        track.title,
        track.artist,
        position,
        duration,
        flags
    )
}
