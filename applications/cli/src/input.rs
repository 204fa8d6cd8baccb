//! Interactive line commands
//!
//! One command per stdin line. Queue commands are forwarded to the session
//! loop; `state`, `json` and `help` are answered locally from the last
//! published snapshot.

use crate::error::{CliError, Result};
use crate::render;
use crate::simulator::{lock, SharedDeck};
use podcastr_core::Episode;
use podcastr_playback::{Command, NowPlaying, PlaybackState, SessionHandle};
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

pub const HELP: &str = "\
commands:
  toggle        play / pause
  next          next episode
  prev          previous episode
  loop          toggle loop
  shuffle       toggle shuffle
  seek <secs>   jump within the current episode
  episode <i>   play the catalog from playlist index i
  clear         stop and empty the queue
  state         print the current state
  json          print the current state as JSON
  quit          exit";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Toggle,
    Next,
    Previous,
    Loop,
    Shuffle,
    Seek(u64),
    Episode(usize),
    Clear,
    State,
    Json,
    Help,
    Quit,
}

impl FromStr for Input {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CliError::InvalidCommand("empty line".to_string()));
        };
        let argument = words.next();

        if words.next().is_some() {
            return Err(CliError::InvalidCommand(format!(
                "too many arguments: {}",
                line.trim()
            )));
        }

        let input = match (name.to_ascii_lowercase().as_str(), argument) {
            ("toggle" | "play" | "pause" | "p", None) => Input::Toggle,
            ("next" | "n", None) => Input::Next,
            ("prev" | "previous", None) => Input::Previous,
            ("loop" | "l", None) => Input::Loop,
            ("shuffle" | "s", None) => Input::Shuffle,
            ("seek", Some(secs)) => Input::Seek(parse_number(secs)?),
            ("episode" | "e", Some(index)) => Input::Episode(parse_number(index)?),
            ("clear", None) => Input::Clear,
            ("state", None) => Input::State,
            ("json", None) => Input::Json,
            ("help" | "?", None) => Input::Help,
            ("quit" | "exit" | "q", None) => Input::Quit,
            _ => return Err(CliError::InvalidCommand(line.trim().to_string())),
        };

        Ok(input)
    }
}

fn parse_number<T: FromStr>(value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::InvalidCommand(format!("not a number: {}", value)))
}

impl Input {
    /// Session command for this input, if it is one
    ///
    /// `episode <i>` restarts the whole playlist at `i` so next/previous
    /// keep working across the catalog.
    pub fn to_command(&self, playlist: &[Episode]) -> Result<Option<Command>> {
        let command = match self {
            Input::Toggle => Command::TogglePlay,
            Input::Next => Command::PlayNext,
            Input::Previous => Command::PlayPrevious,
            Input::Loop => Command::ToggleLoop,
            Input::Shuffle => Command::ToggleShuffle,
            Input::Seek(secs) => Command::Seek(Duration::from_secs(*secs)),
            Input::Episode(index) => {
                if *index >= playlist.len() {
                    return Err(CliError::InvalidCommand(format!(
                        "episode {} out of range (0..{})",
                        index,
                        playlist.len()
                    )));
                }
                Command::PlayList {
                    episodes: playlist.to_vec(),
                    index: *index,
                }
            }
            Input::Clear => Command::Clear,
            Input::Quit => Command::Shutdown,
            Input::State | Input::Json | Input::Help => return Ok(None),
        };

        Ok(Some(command))
    }
}

/// Last state published by the store
pub type SharedState = Arc<Mutex<PlaybackState>>;

/// Read commands until `quit` or end of input
///
/// The session loop is always told to shut down on return, including when
/// reading fails.
pub async fn read_commands<R>(
    reader: R,
    handle: SessionHandle,
    playlist: Vec<Episode>,
    state: SharedState,
    deck: SharedDeck,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let result = process_lines(reader, &handle, &playlist, &state, &deck).await;
    // Fails only when the loop already stopped
    let _ = handle.send(Command::Shutdown);
    result
}

async fn process_lines<R>(
    reader: R,
    handle: &SessionHandle,
    playlist: &[Episode],
    state: &SharedState,
    deck: &SharedDeck,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let input = match line.parse::<Input>() {
            Ok(input) => input,
            Err(e) => {
                println!("{} (type `help`)", e);
                continue;
            }
        };
        debug!(?input, "Read command");

        match input {
            Input::Quit => return Ok(()),
            Input::State => println!("{}", describe(state, deck)),
            Input::Json => {
                let snapshot = state.lock().unwrap_or_else(PoisonError::into_inner).clone();
                match serde_json::to_string_pretty(&snapshot) {
                    Ok(json) => println!("{}", json),
                    Err(e) => warn!("Failed to serialize state: {}", e),
                }
            }
            Input::Help => println!("{}", HELP),
            _ => match input.to_command(playlist) {
                Ok(Some(command)) => handle.send(command)?,
                Ok(None) => {}
                Err(e) => println!("{}", e),
            },
        }
    }

    debug!("Input closed");
    Ok(())
}

fn describe(state: &SharedState, deck: &SharedDeck) -> String {
    let snapshot = state.lock().unwrap_or_else(PoisonError::into_inner).clone();
    let progress = lock(deck).progress();

    let mut text = render::status_line(&snapshot);
    if let Some(now) = NowPlaying::from_state(&snapshot, &progress) {
        text.push('\n');
        text.push_str(&render::now_playing_line(&now));
    }
    text
}
