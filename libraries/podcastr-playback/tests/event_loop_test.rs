//! Command loop tests
//!
//! User commands and host callbacks posted from separate tasks must be
//! applied one at a time, in the order they reached the channel.

mod test_helpers;

use podcastr_playback::{
    channel, Command, EventLoop, HostEvent, PlaybackConfig, PlayerSession, QueueEvent, QueueStore,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use test_helpers::{episodes, Call, FakeHost};

fn new_session() -> PlayerSession<FakeHost> {
    PlayerSession::new(
        QueueStore::new(&PlaybackConfig::seeded(5)),
        FakeHost::default(),
    )
}

#[tokio::test]
async fn run_processes_until_shutdown() {
    let (handle, inbox) = channel();
    let event_loop = EventLoop::new(new_session(), inbox);
    let task = tokio::spawn(event_loop.run());

    handle
        .send(Command::PlayList {
            episodes: episodes(&["a", "b", "c"]),
            index: 0,
        })
        .unwrap();
    handle.post_host_event(HostEvent::Ended).unwrap();
    handle.send(Command::ToggleLoop).unwrap();
    handle.post_host_event(HostEvent::Ended).unwrap();
    handle.send(Command::Shutdown).unwrap();

    let session = task.await.unwrap();

    // Second completion happened while looping: index held at 1
    assert_eq!(session.state().current_episode_index, Some(1));
    assert!(session.state().is_looping);
    assert_eq!(
        session.host().loaded_urls(),
        vec!["https://cdn.example.com/a.mp3", "https://cdn.example.com/b.mp3"]
    );
}

#[tokio::test]
async fn run_ends_when_handles_dropped() {
    let (handle, inbox) = channel();
    let event_loop = EventLoop::new(new_session(), inbox);

    handle.send(Command::TogglePlay).unwrap();
    drop(handle);

    let session = event_loop.run().await;
    assert!(session.state().is_playing);
}

#[tokio::test]
async fn host_events_from_another_task_are_serialized() {
    let mut session = new_session();
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    session.subscribe(move |event, _| sink.lock().unwrap().push(event.clone()));

    let (handle, inbox) = channel();
    let event_loop = EventLoop::new(session, inbox);
    let runner = tokio::spawn(event_loop.run());

    handle
        .send(Command::PlayList {
            episodes: episodes(&["a", "b"]),
            index: 0,
        })
        .unwrap();

    let host_handle = handle.clone();
    tokio::spawn(async move {
        host_handle
            .post_host_event(HostEvent::TimeUpdate {
                position: Duration::from_secs(90),
            })
            .unwrap();
        host_handle.post_host_event(HostEvent::Pause).unwrap();
        host_handle.post_host_event(HostEvent::Ended).unwrap();
    })
    .await
    .unwrap();

    handle.send(Command::Shutdown).unwrap();
    let session = runner.await.unwrap();

    assert_eq!(session.state().current_episode_index, Some(1));
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            QueueEvent::QueueReplaced { length: 2, index: 0 },
            QueueEvent::PlayingChanged { is_playing: true },
            QueueEvent::PlayingChanged { is_playing: false },
            QueueEvent::EpisodeChanged {
                index: 1,
                episode_id: "b".into(),
                previous_index: Some(0),
            },
        ]
    );
    assert!(session.host().calls.contains(&Call::Load {
        url: "https://cdn.example.com/b.mp3".to_string(),
        looping: false,
    }));
}
