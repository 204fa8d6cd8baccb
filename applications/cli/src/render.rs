/// Terminal output for catalog listings and playback state
use podcastr_core::{format_duration, format_published_date, Catalog, Episode};
use podcastr_playback::{ControlsView, NowPlaying, PlaybackState, QueueEvent};
use std::fmt::Write;

/// Catalog as two blocks, each entry prefixed with its playlist index
pub fn catalog_listing(catalog: &Catalog) -> String {
    let mut out = String::new();

    out.push_str("Latest episodes\n");
    for (index, episode) in catalog.latest().iter().enumerate() {
        push_entry(&mut out, index, episode);
    }

    out.push_str("\nAll episodes\n");
    for (i, episode) in catalog.others().iter().enumerate() {
        let index = catalog.latest().len() + i;
        push_entry(&mut out, index, episode);
    }

    out
}

fn push_entry(out: &mut String, index: usize, episode: &Episode) {
    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        "  [{:>2}] {:<9} {}  {}",
        index,
        format_published_date(&episode.published_at),
        format_duration(episode.duration_secs()),
        episode.title,
    );
    if !episode.members.is_empty() {
        let _ = writeln!(out, "       {}", episode.members);
    }
}

/// One line summary: position in queue and flags
pub fn status_line(state: &PlaybackState) -> String {
    let controls = ControlsView::from_state(state);
    let position = match state.current_episode_index {
        Some(index) => format!("{}/{}", index + 1, state.len()),
        None => "-".to_string(),
    };

    format!(
        "[{}] {} loop:{} shuffle:{} prev:{} next:{}",
        position,
        if state.is_playing { "playing" } else { "paused" },
        on_off(state.is_looping),
        on_off(state.is_shuffling),
        on_off(controls.previous_enabled),
        on_off(controls.next_enabled),
    )
}

pub fn now_playing_line(now: &NowPlaying) -> String {
    if now.members.is_empty() {
        format!("{}  {} / {}", now.title, now.elapsed, now.total)
    } else {
        format!(
            "{} ({})  {} / {}",
            now.title, now.members, now.elapsed, now.total
        )
    }
}

/// What subscribers print after a store notification
pub fn event_line(event: &QueueEvent, state: &PlaybackState) -> String {
    let title = state
        .current_episode()
        .map_or("Nothing playing", |episode| episode.title.as_str());

    match event {
        QueueEvent::QueueReplaced { .. } | QueueEvent::EpisodeChanged { .. } => {
            format!("> {}  {}", title, status_line(state))
        }
        QueueEvent::Cleared => "> Queue finished".to_string(),
        _ => status_line(state),
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
