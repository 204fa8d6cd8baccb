//! Player session - joins the queue store, the host audio element and the
//! locally tracked progress
//!
//! The store only records intent. After each user command the session
//! compares the store before and after and pushes the difference to the
//! host:
//! - new selection -> `load` (autoplay, current loop flag)
//! - loop flag changed -> `set_looping`
//! - playing flag changed -> `play` / `pause`
//! - queue emptied -> `unload`
//!
//! Host events flow the other way and are mirrored into the store without
//! being echoed back to the host.

use crate::{
    error::Result,
    events::{QueueEvent, SubscriptionId},
    host::{AudioHost, HostEvent, MediaSource},
    navigation::Step,
    store::QueueStore,
    types::PlaybackState,
    view::{ControlsView, NowPlaying},
};
use podcastr_core::Episode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Position within the current episode, as last reported by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Current position
    pub position: Duration,

    /// Length reported by the host once metadata is loaded
    pub reported_duration: Option<Duration>,
}

impl Progress {
    /// Whole seconds elapsed
    pub fn elapsed_secs(&self) -> u64 {
        self.position.as_secs()
    }
}

/// Store fields the host cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Observed {
    selection: u64,
    has_episode: bool,
    is_playing: bool,
    is_looping: bool,
}

impl Observed {
    fn capture(store: &QueueStore) -> Self {
        let state = store.state();
        Self {
            selection: store.selection(),
            has_episode: state.current_episode().is_some(),
            is_playing: state.is_playing,
            is_looping: state.is_looping,
        }
    }
}

/// Presentation-facing playback controller
pub struct PlayerSession<H: AudioHost> {
    store: QueueStore,
    host: H,
    progress: Progress,
}

impl<H: AudioHost> PlayerSession<H> {
    pub fn new(store: QueueStore, host: H) -> Self {
        Self {
            store,
            host,
            progress: Progress::default(),
        }
    }

    // ===== Reads =====

    pub fn store(&self) -> &QueueStore {
        &self.store
    }

    pub fn state(&self) -> &PlaybackState {
        self.store.state()
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn controls(&self) -> ControlsView {
        ControlsView::from_state(self.store.state())
    }

    pub fn now_playing(&self) -> Option<NowPlaying> {
        NowPlaying::from_state(self.store.state(), &self.progress)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&QueueEvent, &PlaybackState) + Send + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn into_parts(self) -> (QueueStore, H) {
        (self.store, self.host)
    }

    // ===== User commands =====

    pub fn play_episode(&mut self, episode: Episode) {
        self.apply(|store| store.play_episode(episode));
    }

    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) {
        self.apply(|store| store.play_list(list, index));
    }

    pub fn try_play_list(&mut self, list: Vec<Episode>, index: usize) -> Result<()> {
        self.apply(|store| store.try_play_list(list, index))
    }

    pub fn toggle_play(&mut self) {
        self.apply(QueueStore::toggle_play);
    }

    pub fn toggle_loop(&mut self) {
        self.apply(QueueStore::toggle_loop);
    }

    pub fn toggle_shuffle(&mut self) {
        self.apply(QueueStore::toggle_shuffle);
    }

    /// Next episode; replays the current one while looping
    pub fn play_next(&mut self) -> Step {
        let step = self.apply(QueueStore::play_next);
        if step == Step::Hold {
            self.restart_current();
        }
        step
    }

    pub fn play_previous(&mut self) -> Step {
        self.apply(QueueStore::play_previous)
    }

    pub fn clear_player_state(&mut self) {
        self.apply(QueueStore::clear_player_state);
    }

    /// Seek within the current episode
    ///
    /// Clamped to the episode length. Ignored when nothing is selected.
    pub fn seek(&mut self, position: Duration) {
        let Some(episode) = self.store.current_episode() else {
            debug!("Seek with no episode selected, ignoring");
            return;
        };

        let limit = self.progress.reported_duration.unwrap_or(episode.duration);
        let target = position.min(limit);

        self.host.set_current_time(target);
        self.progress.position = target;
    }

    // ===== Host events =====

    /// Apply an event reported for the load stamped `load_id`
    ///
    /// Events from a load that has since been replaced are dropped, so a
    /// completion that was already queued when the user moved on cannot
    /// advance the queue a second time.
    pub fn handle_host_event_for(&mut self, load_id: u64, event: HostEvent) {
        let current = self.store.selection();
        if load_id != current {
            debug!(load_id, current, ?event, "Dropping event from a replaced load");
            return;
        }

        self.handle_host_event(event);
    }

    /// Apply an event for whatever is currently loaded
    pub fn handle_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Play => self.store.set_playing_state(true),
            HostEvent::Pause => self.store.set_playing_state(false),
            HostEvent::Ended => self.handle_episode_ended(),
            HostEvent::LoadedMetadata { duration } => {
                if self.store.current_episode().is_none() {
                    return;
                }
                self.progress = Progress {
                    position: Duration::ZERO,
                    reported_duration: Some(duration),
                };
                self.host.set_current_time(Duration::ZERO);
            }
            HostEvent::TimeUpdate { position } => {
                if self.store.current_episode().is_some() {
                    self.progress.position = position;
                }
            }
            HostEvent::Error { message } => {
                warn!("Host reported error: {}", message);
                self.store.set_playing_state(false);
            }
        }
    }

    /// Natural end of the current episode
    ///
    /// Availability is read once, before acting: advance if there is a next
    /// episode, otherwise clear the queue.
    fn handle_episode_ended(&mut self) {
        if self.store.current_episode().is_none() {
            debug!("Ended with nothing selected, ignoring");
            return;
        }

        if self.store.has_next() {
            self.play_next();
        } else {
            info!("Reached end of queue");
            self.clear_player_state();
        }
    }

    fn restart_current(&mut self) {
        if self.store.current_episode().is_none() {
            return;
        }

        self.progress.position = Duration::ZERO;
        self.host.set_current_time(Duration::ZERO);
        self.host.play();
    }

    fn apply<T>(&mut self, command: impl FnOnce(&mut QueueStore) -> T) -> T {
        let before = Observed::capture(&self.store);
        let output = command(&mut self.store);
        self.sync_host(before);
        output
    }

    fn sync_host(&mut self, before: Observed) {
        let after = Observed::capture(&self.store);
        let state = self.store.state();

        let Some(episode) = state.current_episode() else {
            if before.has_episode {
                info!("Queue empty, unloading host");
                self.host.unload();
                self.progress = Progress::default();
            }
            return;
        };

        if after.selection != before.selection {
            info!("Loading episode {} ({})", episode.id, episode.title);
            self.progress = Progress::default();
            self.host
                .load(MediaSource::for_episode(episode, state.is_looping, after.selection));
            return;
        }

        if after.is_looping != before.is_looping {
            self.host.set_looping(after.is_looping);
        }

        if after.is_playing != before.is_playing {
            if after.is_playing {
                self.host.play();
            } else {
                self.host.pause();
            }
        }
    }
}

impl<H: AudioHost + std::fmt::Debug> std::fmt::Debug for PlayerSession<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerSession")
            .field("store", &self.store)
            .field("host", &self.host)
            .field("progress", &self.progress)
            .finish()
    }
}
