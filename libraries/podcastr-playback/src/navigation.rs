//! Queue navigation
//!
//! Pure next/previous computation over `(length, current, looping,
//! shuffling)`. Nothing here mutates queue state; the store applies the
//! resulting [`Step`].
//!
//! Policy:
//! - Looping holds the current index on "next" (the caller replays).
//! - Shuffling picks a uniformly random index in `[0, len)` on every call,
//!   repeats allowed, for both directions.
//! - Otherwise step by one and stop at either end.

use crate::types::PlaybackState;
use rand::Rng;

/// Outcome of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Select this index (may equal the current one under shuffle)
    Move(usize),

    /// Keep the current index; the current episode should replay
    Hold,

    /// No valid target, nothing changes
    Blocked,
}

/// Inputs to a navigation decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationContext {
    pub len: usize,
    pub current: Option<usize>,
    pub is_looping: bool,
    pub is_shuffling: bool,
}

impl NavigationContext {
    pub fn new(len: usize, current: Option<usize>, is_looping: bool, is_shuffling: bool) -> Self {
        Self {
            len,
            current,
            is_looping,
            is_shuffling,
        }
    }

    pub fn from_state(state: &PlaybackState) -> Self {
        Self::new(
            state.episode_list.len(),
            state.current_episode_index,
            state.is_looping,
            state.is_shuffling,
        )
    }

    /// Current index if it points into the list
    fn current_in_range(&self) -> Option<usize> {
        self.current.filter(|&index| index < self.len)
    }

    /// Whether "next" would do anything
    pub fn has_next(&self) -> bool {
        let Some(current) = self.current_in_range() else {
            return false;
        };

        self.is_looping || self.is_shuffling || current + 1 < self.len
    }

    /// Whether a sequential "previous" target exists
    ///
    /// Shuffle does not widen this; `previous` under shuffle still works
    /// when invoked, but index 0 reports no previous.
    pub fn has_previous(&self) -> bool {
        self.current_in_range().is_some_and(|current| current >= 1)
    }

    pub fn next<R: Rng + ?Sized>(&self, rng: &mut R) -> Step {
        let Some(current) = self.current_in_range() else {
            return Step::Blocked;
        };

        if self.is_looping {
            Step::Hold
        } else if self.is_shuffling {
            Step::Move(random_index(self.len, rng))
        } else if current + 1 < self.len {
            Step::Move(current + 1)
        } else {
            Step::Blocked
        }
    }

    pub fn previous<R: Rng + ?Sized>(&self, rng: &mut R) -> Step {
        let Some(current) = self.current_in_range() else {
            return Step::Blocked;
        };

        if self.is_shuffling {
            Step::Move(random_index(self.len, rng))
        } else {
            current.checked_sub(1).map_or(Step::Blocked, Step::Move)
        }
    }
}

/// Uniform pick in `[0, len)`
///
/// Callers guarantee `len > 0`.
fn random_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
    rng.gen_range(0..len)
}
