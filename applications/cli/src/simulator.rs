//! Simulated audio element
//!
//! Stands in for a real audio output: keeps a play head per loaded
//! resource, advances it on a timer and reports back through the session
//! handle exactly like a browser audio element would (`loadedmetadata`,
//! `play`, `pause`, `timeupdate`, `ended`). Nothing is decoded.

use crate::config::SimulationSettings;
use podcastr_playback::{AudioHost, HostEvent, MediaSource, Progress, SessionHandle};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Play head state shared between the host and its clock
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Deck {
    pub source: Option<MediaSource>,
    pub position: Duration,
    pub playing: bool,
    pub looping: bool,
}

impl Deck {
    /// Position as the session would track it
    pub fn progress(&self) -> Progress {
        Progress {
            position: self.position,
            reported_duration: self.source.as_ref().map(|s| s.expected_duration),
        }
    }
}

pub type SharedDeck = Arc<Mutex<Deck>>;

pub fn shared_deck() -> SharedDeck {
    Arc::new(Mutex::new(Deck::default()))
}

pub(crate) fn lock(deck: &SharedDeck) -> MutexGuard<'_, Deck> {
    deck.lock().unwrap_or_else(PoisonError::into_inner)
}

/// [`AudioHost`] backed by a [`Deck`]
///
/// Every state change is reported asynchronously through the session
/// handle, never by calling into the session directly.
pub struct SimulatedHost {
    deck: SharedDeck,
    events: SessionHandle,
}

impl SimulatedHost {
    pub fn new(deck: SharedDeck, events: SessionHandle) -> Self {
        Self { deck, events }
    }

    /// Post `event` stamped with the load it came from
    fn report(&self, load_id: u64, event: HostEvent) {
        if self.events.post_host_event_for(load_id, event).is_err() {
            debug!("Session closed, dropping host event");
        }
    }
}

impl AudioHost for SimulatedHost {
    fn load(&mut self, source: MediaSource) {
        info!(url = %source.url, looping = source.looping, "Loading episode");

        let duration = source.expected_duration;
        let autoplay = source.autoplay;
        let load_id = source.load_id;
        {
            let mut deck = lock(&self.deck);
            deck.position = Duration::ZERO;
            deck.looping = source.looping;
            deck.playing = autoplay;
            deck.source = Some(source);
        }

        self.report(load_id, HostEvent::LoadedMetadata { duration });
        if autoplay {
            self.report(load_id, HostEvent::Play);
        }
    }

    fn play(&mut self) {
        let started = {
            let mut deck = lock(&self.deck);
            let load_id = deck.source.as_ref().map(|s| s.load_id);
            let started = load_id.filter(|_| !deck.playing);
            if started.is_some() {
                deck.playing = true;
            }
            started
        };

        if let Some(load_id) = started {
            self.report(load_id, HostEvent::Play);
        }
    }

    fn pause(&mut self) {
        let stopped = {
            let mut deck = lock(&self.deck);
            let load_id = deck.source.as_ref().map(|s| s.load_id);
            let stopped = load_id.filter(|_| deck.playing);
            deck.playing = false;
            stopped
        };

        if let Some(load_id) = stopped {
            self.report(load_id, HostEvent::Pause);
        }
    }

    fn set_looping(&mut self, looping: bool) {
        lock(&self.deck).looping = looping;
    }

    fn set_current_time(&mut self, position: Duration) {
        let mut deck = lock(&self.deck);
        let end = deck
            .source
            .as_ref()
            .map_or(Duration::ZERO, |s| s.expected_duration);
        deck.position = position.min(end);
    }

    fn unload(&mut self) {
        debug!("Unloading episode");
        *lock(&self.deck) = Deck::default();
    }
}

/// Events fired by one clock step, stamped with the load they belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub load_id: u64,
    pub events: Vec<HostEvent>,
}

impl Tick {
    /// Post every event in firing order
    pub fn post(self, handle: &SessionHandle) -> podcastr_playback::Result<()> {
        for event in self.events {
            handle.post_host_event_for(self.load_id, event)?;
        }
        Ok(())
    }
}

/// Move the play head forward by `step`
///
/// Returns the events a real element would fire for that stretch, or
/// `None` when nothing is loaded or the deck is paused. A looping resource
/// wraps to zero without ending.
pub fn advance(deck: &SharedDeck, step: Duration) -> Option<Tick> {
    let mut deck = lock(deck);
    let (load_id, duration) = deck
        .source
        .as_ref()
        .map(|s| (s.load_id, s.expected_duration))?;
    if !deck.playing {
        return None;
    }

    deck.position = (deck.position + step).min(duration);
    let mut events = vec![HostEvent::TimeUpdate {
        position: deck.position,
    }];

    if deck.position >= duration {
        if deck.looping {
            deck.position = Duration::ZERO;
            events.push(HostEvent::TimeUpdate {
                position: Duration::ZERO,
            });
        } else {
            deck.playing = false;
            events.push(HostEvent::Pause);
            events.push(HostEvent::Ended);
        }
    }

    Some(Tick { load_id, events })
}

/// Drive the deck until the session goes away
pub async fn run_clock(deck: SharedDeck, events: SessionHandle, settings: SimulationSettings) {
    let mut ticker = tokio::time::interval(settings.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let Some(tick) = advance(&deck, settings.step()) else {
            continue;
        };
        if tick.post(&events).is_err() {
            debug!("Session closed, stopping clock");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcastr_core::Episode;
    use podcastr_playback::{
        channel, Command, EventLoop, PlaybackConfig, PlayerSession, QueueStore,
    };

    fn episodes(lengths: &[u64]) -> Vec<Episode> {
        lengths
            .iter()
            .enumerate()
            .map(|(i, secs)| {
                Episode::new(
                    format!("ep-{}", i),
                    format!("Episode {}", i),
                    format!("https://cdn.example.com/{}.mp3", i),
                    Duration::from_secs(*secs),
                )
            })
            .collect()
    }

    fn event_loop(deck: &SharedDeck) -> (EventLoop<SimulatedHost>, SessionHandle) {
        let (handle, inbox) = channel();
        let host = SimulatedHost::new(Arc::clone(deck), handle.clone());
        let session = PlayerSession::new(QueueStore::new(&PlaybackConfig::seeded(1)), host);
        (EventLoop::new(session, inbox), handle)
    }

    #[test]
    fn test_load_reports_metadata_and_autoplay() {
        let deck = shared_deck();
        let (mut event_loop, _handle) = event_loop(&deck);

        event_loop.session_mut().play_list(episodes(&[3, 3]), 0);
        // LoadedMetadata and Play
        assert_eq!(event_loop.drain(), 2);

        let deck = lock(&deck);
        assert!(deck.playing);
        assert_eq!(
            deck.source.as_ref().map(|s| s.url.as_str()),
            Some("https://cdn.example.com/0.mp3")
        );
        assert!(event_loop.session().state().is_playing);
    }

    #[test]
    fn test_track_end_advances_queue() {
        let deck = shared_deck();
        let (mut event_loop, handle) = event_loop(&deck);
        event_loop.session_mut().play_list(episodes(&[2, 5]), 0);
        event_loop.drain();

        let first = advance(&deck, Duration::from_secs(1)).unwrap();
        assert_eq!(
            first.events,
            vec![HostEvent::TimeUpdate {
                position: Duration::from_secs(1)
            }]
        );
        let second = advance(&deck, Duration::from_secs(1)).unwrap();
        assert_eq!(second.events.last(), Some(&HostEvent::Ended));

        first.post(&handle).unwrap();
        second.post(&handle).unwrap();
        event_loop.drain();

        let state = event_loop.session().state();
        assert_eq!(state.current_episode_index, Some(1));
        assert!(state.is_playing);
        assert_eq!(
            lock(&deck).source.as_ref().map(|s| s.url.as_str()),
            Some("https://cdn.example.com/1.mp3")
        );
    }

    #[test]
    fn test_leftover_end_after_next_does_not_skip() {
        let deck = shared_deck();
        let (mut event_loop, handle) = event_loop(&deck);
        event_loop.session_mut().play_list(episodes(&[2, 60, 60]), 0);
        event_loop.drain();

        // First episode finishes while the user is already moving on
        let leftover = advance(&deck, Duration::from_secs(5)).unwrap();
        assert_eq!(leftover.events.last(), Some(&HostEvent::Ended));

        handle.send(Command::PlayNext).unwrap();
        leftover.post(&handle).unwrap();
        event_loop.drain();

        let state = event_loop.session().state();
        assert_eq!(state.current_episode_index, Some(1));
        assert!(state.is_playing);
        let deck = lock(&deck);
        assert!(deck.playing);
        assert_eq!(
            deck.source.as_ref().map(|s| s.url.as_str()),
            Some("https://cdn.example.com/1.mp3")
        );
    }

    #[test]
    fn test_looping_wraps_without_ending() {
        let deck = shared_deck();
        let (mut event_loop, _handle) = event_loop(&deck);
        event_loop.session_mut().play_episode(episodes(&[2]).remove(0));
        event_loop.session_mut().toggle_loop();
        event_loop.drain();

        let tick = advance(&deck, Duration::from_secs(5)).unwrap();

        assert!(!tick.events.contains(&HostEvent::Ended));
        assert_eq!(lock(&deck).position, Duration::ZERO);
        assert!(lock(&deck).playing);
    }

    #[test]
    fn test_paused_deck_does_not_move() {
        let deck = shared_deck();
        let (mut event_loop, _handle) = event_loop(&deck);
        event_loop.session_mut().play_list(episodes(&[60]), 0);
        event_loop.drain();

        event_loop.session_mut().toggle_play();
        event_loop.drain();

        assert!(advance(&deck, Duration::from_secs(1)).is_none());
        assert!(!event_loop.session().state().is_playing);
    }

    #[test]
    fn test_clear_unloads_deck() {
        let deck = shared_deck();
        let (mut event_loop, _handle) = event_loop(&deck);
        event_loop.session_mut().play_list(episodes(&[60]), 0);
        event_loop.drain();

        event_loop.session_mut().clear_player_state();

        assert_eq!(*lock(&deck), Deck::default());
        assert!(advance(&deck, Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_seek_clamps_to_resource() {
        let deck = shared_deck();
        let (mut event_loop, _handle) = event_loop(&deck);
        event_loop.session_mut().play_list(episodes(&[30]), 0);
        event_loop.drain();

        event_loop.session_mut().seek(Duration::from_secs(10));
        assert_eq!(lock(&deck).progress().elapsed_secs(), 10);

        let mut host = SimulatedHost::new(Arc::clone(&deck), channel().0);
        host.set_current_time(Duration::from_secs(90));
        assert_eq!(lock(&deck).position, Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_posts_time_updates() {
        let deck = shared_deck();
        let (mut session_loop, handle) = event_loop(&deck);
        let settings = SimulationSettings {
            tick_ms: 100,
            seconds_per_tick: 1,
        };

        session_loop.session_mut().play_list(episodes(&[2, 2]), 0);
        let runner = tokio::spawn(session_loop.run());
        let clock = tokio::spawn(run_clock(Arc::clone(&deck), handle.clone(), settings));

        tokio::time::sleep(Duration::from_millis(250)).await;
        clock.abort();
        handle.send(Command::Shutdown).unwrap();
        let session = runner.await.unwrap();

        assert_eq!(session.state().current_episode_index, Some(1));
    }
}
