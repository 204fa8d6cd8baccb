//! Core types for playback management

use crate::navigation::NavigationContext;
use podcastr_core::Episode;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Numeric form of "no current episode" for display layers
pub const NO_SELECTION: i64 = -1;

/// Queue state owned by the [`QueueStore`](crate::QueueStore)
///
/// Read-only outside the store. Cloning is cheap: the episode list is
/// shared, not copied. Serializable for state dumps only; valid values come
/// from the store, so there is no `Deserialize`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    /// Episodes in playback order
    pub episode_list: Arc<Vec<Episode>>,

    /// Index into `episode_list`, `None` when nothing is selected
    ///
    /// Always `None` for an empty list and always in range otherwise.
    pub current_episode_index: Option<usize>,

    /// Whether the host should be playing
    pub is_playing: bool,

    /// Replay the current episode on completion
    pub is_looping: bool,

    /// Pick random indices on next/previous
    pub is_shuffling: bool,
}

impl PlaybackState {
    /// Currently selected episode
    pub fn current_episode(&self) -> Option<&Episode> {
        self.current_episode_index
            .and_then(|index| self.episode_list.get(index))
    }

    /// Current index, or [`NO_SELECTION`]
    pub fn current_index_or_sentinel(&self) -> i64 {
        self.current_episode_index
            .map_or(NO_SELECTION, |index| index as i64)
    }

    pub fn has_next(&self) -> bool {
        NavigationContext::from_state(self).has_next()
    }

    pub fn has_previous(&self) -> bool {
        NavigationContext::from_state(self).has_previous()
    }

    pub fn len(&self) -> usize {
        self.episode_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episode_list.is_empty()
    }
}

/// Configuration for the queue store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Fixed seed for shuffle navigation (default: random per session)
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

impl PlaybackConfig {
    /// Config with a fixed shuffle seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            shuffle_seed: Some(seed),
        }
    }

    /// Random source for shuffle navigation
    pub fn shuffle_rng(&self) -> StdRng {
        match self.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
