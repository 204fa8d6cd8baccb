//! Shared fixtures for playback integration tests

#![allow(dead_code)]

use podcastr_core::Episode;
use podcastr_playback::{AudioHost, MediaSource};
use std::time::Duration;

pub fn create_episode(id: &str, duration_secs: u64) -> Episode {
    Episode::new(
        id,
        format!("Episode {}", id),
        format!("https://cdn.example.com/{}.mp3", id),
        Duration::from_secs(duration_secs),
    )
}

pub fn episodes(ids: &[&str]) -> Vec<Episode> {
    ids.iter().map(|id| create_episode(id, 180)).collect()
}

/// Host call log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Load { url: String, looping: bool },
    Play,
    Pause,
    SetLooping(bool),
    Seek(Duration),
    Unload,
}

/// Host double recording calls in order
#[derive(Debug, Default)]
pub struct FakeHost {
    pub calls: Vec<Call>,
}

impl FakeHost {
    pub fn take(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    pub fn loaded_urls(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Load { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl AudioHost for FakeHost {
    fn load(&mut self, source: MediaSource) {
        self.calls.push(Call::Load {
            url: source.url,
            looping: source.looping,
        });
    }

    fn play(&mut self) {
        self.calls.push(Call::Play);
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn set_looping(&mut self, looping: bool) {
        self.calls.push(Call::SetLooping(looping));
    }

    fn set_current_time(&mut self, position: Duration) {
        self.calls.push(Call::Seek(position));
    }

    fn unload(&mut self) {
        self.calls.push(Call::Unload);
    }
}
