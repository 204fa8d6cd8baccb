//! Queue Events
//!
//! Notifications pushed to store subscribers after every state change.
//! Subscribers receive the event together with the post-change state and
//! must treat that state as the only source for rendering.

use podcastr_core::EpisodeId;
use serde::{Deserialize, Serialize};

/// Events emitted by the queue store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueEvent {
    /// Episode list replaced (play list / play single episode)
    QueueReplaced {
        /// New queue length
        length: usize,
        /// Selected index in the new queue
        index: usize,
    },

    /// Current episode moved by next/previous
    ///
    /// Under shuffle `index` may equal `previous_index`; the episode is
    /// still considered re-selected.
    EpisodeChanged {
        index: usize,
        episode_id: EpisodeId,
        previous_index: Option<usize>,
    },

    /// Playing flag changed
    PlayingChanged { is_playing: bool },

    /// Loop flag changed
    LoopingChanged { is_looping: bool },

    /// Shuffle flag changed
    ShufflingChanged { is_shuffling: bool },

    /// Queue emptied, selection reset
    Cleared,
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);
