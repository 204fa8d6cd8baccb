//! Queue store - single owner of playback state
//!
//! Every mutation goes through a command on [`QueueStore`]. Commands never
//! fail towards the caller: a command whose precondition does not hold is
//! logged and ignored, leaving the state untouched. Subscribers are told
//! about every command that actually changed something.

use crate::{
    error::{PlaybackError, Result},
    events::{QueueEvent, SubscriptionId},
    navigation::{NavigationContext, Step},
    types::{PlaybackConfig, PlaybackState},
};
use podcastr_core::Episode;
use rand::rngs::StdRng;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

type Listener = Box<dyn FnMut(&QueueEvent, &PlaybackState) + Send>;

/// Authoritative playback queue
pub struct QueueStore {
    state: PlaybackState,

    // Shuffle source, seedable for tests
    rng: StdRng,

    // Bumped whenever an episode is (re)selected, including shuffle picks
    // of the current index. Lets the session tell "load again" apart from
    // "nothing changed".
    selection: u64,

    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl QueueStore {
    /// Create an empty store: no episodes, no selection, all flags off
    pub fn new(config: &PlaybackConfig) -> Self {
        Self::with_rng(config.shuffle_rng())
    }

    /// Create an empty store with an explicit shuffle source
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            state: PlaybackState::default(),
            rng,
            selection: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    // ===== Reads =====

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Owned copy of the state (the episode list is shared)
    pub fn snapshot(&self) -> PlaybackState {
        self.state.clone()
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.state.current_episode()
    }

    pub fn has_next(&self) -> bool {
        self.navigation().has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.navigation().has_previous()
    }

    pub fn navigation(&self) -> NavigationContext {
        NavigationContext::from_state(&self.state)
    }

    /// Selection counter, changes whenever an episode is (re)selected
    pub fn selection(&self) -> u64 {
        self.selection
    }

    // ===== Subscriptions =====

    /// Register a listener called after every state change
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&QueueEvent, &PlaybackState) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener, returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    // ===== Queue replacement =====

    /// Play a single episode now
    pub fn play_episode(&mut self, episode: Episode) {
        debug!("Playing single episode {}", episode.id);
        self.replace_queue(vec![episode], 0);
    }

    /// Replace the queue and start at `index`
    ///
    /// Empty lists and out-of-range indices are ignored.
    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) {
        if let Err(e) = self.try_play_list(list, index) {
            warn!("Ignoring play_list: {}", e);
        }
    }

    /// Checked form of [`play_list`](Self::play_list)
    pub fn try_play_list(&mut self, list: Vec<Episode>, index: usize) -> Result<()> {
        if list.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        if index >= list.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: list.len(),
            });
        }

        debug!("Playing list of {} episodes from index {}", list.len(), index);
        self.replace_queue(list, index);
        Ok(())
    }

    fn replace_queue(&mut self, list: Vec<Episode>, index: usize) {
        let length = list.len();

        self.state.episode_list = Arc::new(list);
        self.state.current_episode_index = Some(index);
        self.selection += 1;
        self.notify(QueueEvent::QueueReplaced { length, index });

        // Optimistic: host play/pause events reconcile this later
        self.set_playing_state(true);
    }

    /// Empty the queue; loop and shuffle preferences are kept
    pub fn clear_player_state(&mut self) {
        if self.state.episode_list.is_empty() && self.state.current_episode_index.is_none() {
            debug!("Queue already clear");
            return;
        }

        self.state.episode_list = Arc::new(Vec::new());
        self.state.current_episode_index = None;
        self.notify(QueueEvent::Cleared);
    }

    // ===== Flags =====

    pub fn toggle_play(&mut self) {
        self.set_playing_state(!self.state.is_playing);
    }

    pub fn toggle_loop(&mut self) {
        self.state.is_looping = !self.state.is_looping;
        self.notify(QueueEvent::LoopingChanged {
            is_looping: self.state.is_looping,
        });
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.is_shuffling = !self.state.is_shuffling;
        self.notify(QueueEvent::ShufflingChanged {
            is_shuffling: self.state.is_shuffling,
        });
    }

    /// Mirror the host's own play/pause state
    pub fn set_playing_state(&mut self, is_playing: bool) {
        if self.state.is_playing == is_playing {
            return;
        }

        self.state.is_playing = is_playing;
        self.notify(QueueEvent::PlayingChanged { is_playing });
    }

    // ===== Navigation =====

    /// Advance per loop/shuffle policy
    ///
    /// Returns what happened so the caller can replay on [`Step::Hold`].
    pub fn play_next(&mut self) -> Step {
        let step = self.navigation().next(&mut self.rng);
        self.apply_step("next", step);
        step
    }

    /// Step back per shuffle policy
    pub fn play_previous(&mut self) -> Step {
        let step = self.navigation().previous(&mut self.rng);
        self.apply_step("previous", step);
        step
    }

    fn apply_step(&mut self, direction: &str, step: Step) {
        match step {
            Step::Move(index) => {
                let previous_index = self.state.current_episode_index;
                self.state.current_episode_index = Some(index);
                self.selection += 1;

                let episode_id = self.state.episode_list[index].id.clone();
                self.notify(QueueEvent::EpisodeChanged {
                    index,
                    episode_id,
                    previous_index,
                });
            }
            Step::Hold => {
                debug!("Looping, {} keeps index {:?}", direction, self.state.current_episode_index);
            }
            Step::Blocked => {
                warn!(
                    "No {} episode (index {:?} of {}), ignoring",
                    direction,
                    self.state.current_episode_index,
                    self.state.episode_list.len()
                );
            }
        }
    }

    fn notify(&mut self, event: QueueEvent) {
        debug!(?event, "Queue state changed");

        let state = &self.state;
        for (_, listener) in &mut self.listeners {
            listener(&event, state);
        }
    }
}

impl Default for QueueStore {
    fn default() -> Self {
        Self::new(&PlaybackConfig::default())
    }
}

impl fmt::Debug for QueueStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueStore")
            .field("state", &self.state)
            .field("selection", &self.selection)
            .field("subscribers", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
