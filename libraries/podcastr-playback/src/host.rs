//! Host audio element abstraction
//!
//! The playback core never decodes audio. A host (browser audio element,
//! native player, test double) receives intent through [`AudioHost`] and
//! reports what actually happened back as [`HostEvent`]s, which are posted
//! into the same command stream as user actions.

use podcastr_core::Episode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback configuration handed to the host on load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    /// Audio resource URL
    pub url: String,

    /// Host should loop the resource itself
    pub looping: bool,

    /// Start playing as soon as the resource is ready
    pub autoplay: bool,

    /// Length announced by the episode data source
    ///
    /// Hosts report the real length through `LoadedMetadata`.
    pub expected_duration: Duration,

    /// Store selection this load belongs to
    ///
    /// Hosts echo it with every event they report for the resource (see
    /// [`SessionHandle::post_host_event_for`](crate::SessionHandle::post_host_event_for)),
    /// so events still in flight for an earlier resource are dropped.
    pub load_id: u64,
}

impl MediaSource {
    pub fn for_episode(episode: &Episode, looping: bool, load_id: u64) -> Self {
        Self {
            url: episode.url.clone(),
            looping,
            autoplay: true,
            expected_duration: episode.duration,
            load_id,
        }
    }
}

/// Events reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostEvent {
    /// Playback started or resumed
    Play,

    /// Playback paused (also sent right before `Ended`)
    Pause,

    /// Resource played to its natural end
    Ended,

    /// Resource metadata is known
    LoadedMetadata { duration: Duration },

    /// Periodic position report
    TimeUpdate { position: Duration },

    /// Host failed to load or play the resource
    Error { message: String },
}

/// Platform audio element
///
/// Implementors apply intent only; they must not call back into the
/// session synchronously. Results are reported as [`HostEvent`]s.
pub trait AudioHost {
    /// Replace the current resource
    fn load(&mut self, source: MediaSource);

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Toggle host-side looping of the current resource
    fn set_looping(&mut self, looping: bool);

    /// Seek to position from start of the resource
    fn set_current_time(&mut self, position: Duration);

    /// Drop the current resource
    fn unload(&mut self);
}

impl<H: AudioHost + ?Sized> AudioHost for Box<H> {
    fn load(&mut self, source: MediaSource) {
        (**self).load(source);
    }

    fn play(&mut self) {
        (**self).play();
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn set_looping(&mut self, looping: bool) {
        (**self).set_looping(looping);
    }

    fn set_current_time(&mut self, position: Duration) {
        (**self).set_current_time(position);
    }

    fn unload(&mut self) {
        (**self).unload();
    }
}

/// Call recorded by [`RecordingHost`]
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Load(MediaSource),
    Play,
    Pause,
    SetLooping(bool),
    SetCurrentTime(Duration),
    Unload,
}

/// Host double that records every call
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
}

#[cfg(test)]
impl RecordingHost {
    pub fn take(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }
}

#[cfg(test)]
impl AudioHost for RecordingHost {
    fn load(&mut self, source: MediaSource) {
        self.calls.push(HostCall::Load(source));
    }

    fn play(&mut self) {
        self.calls.push(HostCall::Play);
    }

    fn pause(&mut self) {
        self.calls.push(HostCall::Pause);
    }

    fn set_looping(&mut self, looping: bool) {
        self.calls.push(HostCall::SetLooping(looping));
    }

    fn set_current_time(&mut self, position: Duration) {
        self.calls.push(HostCall::SetCurrentTime(position));
    }

    fn unload(&mut self) {
        self.calls.push(HostCall::Unload);
    }
}
