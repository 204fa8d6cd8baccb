//! Podcastr - Playback Management
//!
//! Episode queue controller for the Podcastr player.
//!
//! This crate provides:
//! - Queue store: the single owner of the episode list, current index and
//!   playing/loop/shuffle flags, with subscriber notifications
//! - Navigation: pure next/previous rules under loop and shuffle, with a
//!   seedable random source
//! - Player session: applies store intent to a host audio element and maps
//!   host events (play, pause, ended, metadata, time updates) back
//! - Command loop: user commands and host events serialized on one channel
//!
//! # Architecture
//!
//! `podcastr-playback` never decodes or streams audio. The platform supplies
//! an [`AudioHost`] and forwards its callbacks as [`HostEvent`]s.
//!
//! # Example: Queue Store
//!
//! ```rust
//! use podcastr_core::Episode;
//! use podcastr_playback::{PlaybackConfig, QueueStore, Step};
//! use std::time::Duration;
//!
//! let episodes: Vec<Episode> = ["a", "b", "c"]
//!     .iter()
//!     .map(|id| Episode::new(*id, *id, format!("https://cdn.example.com/{}.mp3", id), Duration::from_secs(60)))
//!     .collect();
//!
//! let mut store = QueueStore::new(&PlaybackConfig::seeded(42));
//! store.play_list(episodes, 0);
//! assert!(store.state().is_playing);
//!
//! assert_eq!(store.play_next(), Step::Move(1));
//! assert!(store.has_previous());
//!
//! store.clear_player_state();
//! assert_eq!(store.state().current_episode_index, None);
//! ```
//!
//! # Example: Session with a host
//!
//! ```rust
//! use podcastr_playback::{AudioHost, HostEvent, MediaSource, PlayerSession, QueueStore};
//! use podcastr_core::Episode;
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct SilentHost { loaded: Option<String> }
//!
//! impl AudioHost for SilentHost {
//!     fn load(&mut self, source: MediaSource) { self.loaded = Some(source.url); }
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn set_looping(&mut self, _looping: bool) {}
//!     fn set_current_time(&mut self, _position: Duration) {}
//!     fn unload(&mut self) { self.loaded = None; }
//! }
//!
//! let mut session = PlayerSession::new(QueueStore::default(), SilentHost::default());
//! session.play_episode(Episode::new("a", "A", "https://cdn.example.com/a.mp3", Duration::from_secs(60)));
//! assert_eq!(session.host().loaded.as_deref(), Some("https://cdn.example.com/a.mp3"));
//!
//! // Single episode, no next: completion clears the queue
//! session.handle_host_event(HostEvent::Ended);
//! assert!(session.host().loaded.is_none());
//! ```

mod dispatch;
mod error;
mod events;
mod host;
mod navigation;
mod session;
mod store;
pub mod types;
mod view;

// Public exports
pub use dispatch::{channel, Command, EventLoop, Inbox, Message, SessionHandle};
pub use error::{PlaybackError, Result};
pub use events::{QueueEvent, SubscriptionId};
pub use host::{AudioHost, HostEvent, MediaSource};
pub use navigation::{NavigationContext, Step};
pub use session::{PlayerSession, Progress};
pub use store::QueueStore;
pub use types::{PlaybackConfig, PlaybackState, NO_SELECTION};
pub use view::{ControlsView, NowPlaying};
