//! Single-threaded command loop
//!
//! User commands and host events share one unbounded channel and are
//! applied to the session strictly in arrival order, one at a time. Any
//! number of [`SessionHandle`] clones (UI, host callbacks, timers) can post
//! into it.

use crate::{
    error::{PlaybackError, Result},
    host::{AudioHost, HostEvent},
    session::PlayerSession,
};
use podcastr_core::Episode;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// User-triggered commands
#[derive(Debug, Clone)]
pub enum Command {
    PlayEpisode(Episode),
    PlayList { episodes: Vec<Episode>, index: usize },
    TogglePlay,
    ToggleLoop,
    ToggleShuffle,
    PlayNext,
    PlayPrevious,
    Seek(Duration),
    Clear,
    /// Stop the loop and hand the session back
    Shutdown,
}

/// Anything the loop can receive
#[derive(Debug, Clone)]
pub enum Message {
    Command(Command),
    Host {
        event: HostEvent,
        /// Load the event belongs to; `None` applies to the current one
        load_id: Option<u64>,
    },
}

/// Sender side of the command loop
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Message>,
}

impl SessionHandle {
    pub fn send(&self, command: Command) -> Result<()> {
        self.post(Message::Command(command))
    }

    /// Forward a host callback for whatever is currently loaded
    pub fn post_host_event(&self, event: HostEvent) -> Result<()> {
        self.post(Message::Host {
            event,
            load_id: None,
        })
    }

    /// Forward a host callback stamped with [`MediaSource::load_id`]
    ///
    /// Dropped by the session if another load replaced it in the meantime.
    ///
    /// [`MediaSource::load_id`]: crate::MediaSource::load_id
    pub fn post_host_event_for(&self, load_id: u64, event: HostEvent) -> Result<()> {
        self.post(Message::Host {
            event,
            load_id: Some(load_id),
        })
    }

    fn post(&self, message: Message) -> Result<()> {
        self.tx
            .send(message)
            .map_err(|_| PlaybackError::SessionClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving end of the command channel
///
/// Created before the session so hosts can be given a [`SessionHandle`]
/// up front.
#[derive(Debug)]
pub struct Inbox {
    rx: mpsc::UnboundedReceiver<Message>,
}

/// Create the command channel
pub fn channel() -> (SessionHandle, Inbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SessionHandle { tx }, Inbox { rx })
}

/// Owns the session and applies messages from the inbox
pub struct EventLoop<H: AudioHost> {
    session: PlayerSession<H>,
    rx: mpsc::UnboundedReceiver<Message>,
}

impl<H: AudioHost> EventLoop<H> {
    pub fn new(session: PlayerSession<H>, inbox: Inbox) -> Self {
        Self {
            session,
            rx: inbox.rx,
        }
    }

    pub fn session(&self) -> &PlayerSession<H> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PlayerSession<H> {
        &mut self.session
    }

    /// Process messages until `Shutdown` or every handle is dropped
    pub async fn run(mut self) -> PlayerSession<H> {
        info!("Session loop started");

        while let Some(message) = self.rx.recv().await {
            if !self.dispatch(message) {
                break;
            }
        }

        info!("Session loop stopped");
        self.session
    }

    /// Apply everything already queued without waiting
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.rx.try_recv() {
            handled += 1;
            if !self.dispatch(message) {
                break;
            }
        }
        handled
    }

    /// Apply one message; false means stop
    pub fn dispatch(&mut self, message: Message) -> bool {
        debug!(?message, "Dispatching");

        match message {
            Message::Host {
                event,
                load_id: Some(load_id),
            } => self.session.handle_host_event_for(load_id, event),
            Message::Host {
                event,
                load_id: None,
            } => self.session.handle_host_event(event),
            Message::Command(command) => match command {
                Command::PlayEpisode(episode) => self.session.play_episode(episode),
                Command::PlayList { episodes, index } => self.session.play_list(episodes, index),
                Command::TogglePlay => self.session.toggle_play(),
                Command::ToggleLoop => self.session.toggle_loop(),
                Command::ToggleShuffle => self.session.toggle_shuffle(),
                Command::PlayNext => {
                    self.session.play_next();
                }
                Command::PlayPrevious => {
                    self.session.play_previous();
                }
                Command::Seek(position) => self.session.seek(position),
                Command::Clear => self.session.clear_player_state(),
                Command::Shutdown => return false,
            },
        }

        true
    }
}
