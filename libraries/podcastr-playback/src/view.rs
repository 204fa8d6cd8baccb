//! Read-only projections for rendering the player

use crate::session::Progress;
use crate::types::PlaybackState;
use podcastr_core::{format_duration, EpisodeId};
use serde::Serialize;

/// Which player buttons are usable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ControlsView {
    /// Needs a current episode and more than one in the queue
    pub shuffle_enabled: bool,
    pub previous_enabled: bool,
    pub play_enabled: bool,
    pub next_enabled: bool,
    pub loop_enabled: bool,

    pub is_playing: bool,
    pub is_shuffling: bool,
    pub is_looping: bool,
}

impl ControlsView {
    pub fn from_state(state: &PlaybackState) -> Self {
        let has_episode = state.current_episode().is_some();

        Self {
            shuffle_enabled: has_episode && state.len() > 1,
            previous_enabled: has_episode && state.has_previous(),
            play_enabled: has_episode,
            next_enabled: has_episode && state.has_next(),
            loop_enabled: has_episode,
            is_playing: state.is_playing,
            is_shuffling: state.is_shuffling,
            is_looping: state.is_looping,
        }
    }
}

/// Current episode details with formatted progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NowPlaying {
    pub episode_id: EpisodeId,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    pub url: String,
    pub elapsed_secs: u64,
    pub total_secs: u64,
    /// `HH:MM:SS`
    pub elapsed: String,
    /// `HH:MM:SS`
    pub total: String,
}

impl NowPlaying {
    /// `None` when nothing is selected
    pub fn from_state(state: &PlaybackState, progress: &Progress) -> Option<Self> {
        let episode = state.current_episode()?;
        let elapsed_secs = progress.elapsed_secs();
        let total_secs = episode.duration_secs();

        Some(Self {
            episode_id: episode.id.clone(),
            title: episode.title.clone(),
            members: episode.members.clone(),
            thumbnail: episode.thumbnail.clone(),
            url: episode.url.clone(),
            elapsed_secs,
            total_secs,
            elapsed: format_duration(elapsed_secs),
            total: format_duration(total_secs),
        })
    }
}
