//! Interactive player: session loop, simulated clock and line input wired
//! together
use crate::config::SimulationSettings;
use crate::error::Result;
use crate::input::{self, SharedState};
use crate::render;
use crate::simulator::{self, SimulatedHost};
use podcastr_core::Episode;
use podcastr_playback::{channel, EventLoop, PlaybackConfig, PlaybackState, PlayerSession, QueueStore};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::io::AsyncBufRead;
use tracing::info;

#[derive(Debug, Clone)]
pub struct PlayerOptions {
    /// Playlist index to start from
    pub index: usize,
    pub playback: PlaybackConfig,
    pub simulation: SimulationSettings,
}

/// Play `playlist` from `options.index` until the input says `quit` or ends
///
/// Returns the session so callers can inspect the final state.
pub async fn run_player<R>(
    playlist: Vec<Episode>,
    options: PlayerOptions,
    reader: R,
) -> Result<PlayerSession<SimulatedHost>>
where
    R: AsyncBufRead + Unpin,
{
    let (handle, inbox) = channel();
    let deck = simulator::shared_deck();
    let host = SimulatedHost::new(Arc::clone(&deck), handle.clone());
    let mut session = PlayerSession::new(QueueStore::new(&options.playback), host);

    let state: SharedState = Arc::new(Mutex::new(PlaybackState::default()));
    let published = Arc::clone(&state);
    session.subscribe(move |event, snapshot| {
        println!("{}", render::event_line(event, snapshot));
        *published.lock().unwrap_or_else(PoisonError::into_inner) = snapshot.clone();
    });

    session.try_play_list(playlist.clone(), options.index)?;
    info!(
        episodes = playlist.len(),
        index = options.index,
        "Starting playback"
    );

    let event_loop = EventLoop::new(session, inbox);
    let clock = tokio::spawn(simulator::run_clock(
        Arc::clone(&deck),
        handle.clone(),
        options.simulation,
    ));

    let (session, input_result) = tokio::join!(
        event_loop.run(),
        input::read_commands(reader, handle, playlist, state, deck)
    );
    clock.abort();
    input_result?;

    Ok(session)
}
