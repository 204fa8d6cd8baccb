//! Episode catalog
//!
//! Orders episodes newest first and splits them into the highlighted
//! "latest" block and the remaining "others" listing. The playback queue is
//! always the concatenation of both blocks, so an entry in `others` at
//! position `i` plays from queue index `latest.len() + i`.

use crate::episode::{Episode, EpisodeId, EpisodeRecord};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How many episodes to keep and how many to highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogOptions {
    /// Maximum number of episodes kept (default: 12)
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Number of newest episodes in the latest block (default: 2)
    #[serde(default = "default_latest")]
    pub latest: usize,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            latest: default_latest(),
        }
    }
}

fn default_limit() -> usize {
    12
}

fn default_latest() -> usize {
    2
}

/// Newest-first episode listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    latest: Vec<Episode>,
    others: Vec<Episode>,
}

impl Catalog {
    /// Build a catalog from already converted episodes
    pub fn from_episodes(mut episodes: Vec<Episode>, options: CatalogOptions) -> Self {
        // Stable sort keeps source order for equal timestamps
        episodes.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        episodes.truncate(options.limit);

        let split = options.latest.min(episodes.len());
        let others = episodes.split_off(split);

        Self {
            latest: episodes,
            others,
        }
    }

    /// Build a catalog from API records
    ///
    /// Fails on the first record that does not convert.
    pub fn from_records(records: Vec<EpisodeRecord>, options: CatalogOptions) -> Result<Self> {
        let episodes = records
            .into_iter()
            .map(Episode::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_episodes(episodes, options))
    }

    pub fn latest(&self) -> &[Episode] {
        &self.latest
    }

    pub fn others(&self) -> &[Episode] {
        &self.others
    }

    /// Full playback order (latest, then others)
    pub fn playlist(&self) -> Vec<Episode> {
        self.latest.iter().chain(self.others.iter()).cloned().collect()
    }

    /// Queue index of the `i`-th entry of `others`
    pub fn playlist_index_of_other(&self, i: usize) -> Option<usize> {
        (i < self.others.len()).then(|| self.latest.len() + i)
    }

    /// Find an episode and its queue index
    pub fn find(&self, id: &EpisodeId) -> Option<(usize, &Episode)> {
        self.latest
            .iter()
            .chain(self.others.iter())
            .enumerate()
            .find(|(_, episode)| &episode.id == id)
    }

    pub fn len(&self) -> usize {
        self.latest.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty() && self.others.is_empty()
    }
}

/// Read a JSON array of episode records from disk
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<EpisodeRecord>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let records: Vec<EpisodeRecord> = serde_json::from_str(&raw)?;

    tracing::debug!("Loaded {} episode records from {:?}", records.len(), path);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn create_episode(id: &str, day: u32) -> Episode {
        Episode::new(
            id,
            format!("Episode {}", id),
            format!("https://cdn.example.com/{}.mp3", id),
            Duration::from_secs(600),
        )
        .with_published_at(Utc.with_ymd_and_hms(2021, 1, day, 12, 0, 0).unwrap())
    }

    fn ids(episodes: &[Episode]) -> Vec<&str> {
        episodes.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn sorts_newest_first_and_splits() {
        let catalog = Catalog::from_episodes(
            vec![
                create_episode("old", 1),
                create_episode("newest", 20),
                create_episode("mid", 10),
                create_episode("new", 15),
            ],
            CatalogOptions::default(),
        );

        assert_eq!(ids(catalog.latest()), vec!["newest", "new"]);
        assert_eq!(ids(catalog.others()), vec!["mid", "old"]);
        assert_eq!(ids(&catalog.playlist()), vec!["newest", "new", "mid", "old"]);
    }

    #[test]
    fn limit_drops_oldest() {
        let episodes = (1..=20).map(|day| create_episode(&day.to_string(), day)).collect();
        let catalog = Catalog::from_episodes(episodes, CatalogOptions::default());

        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.latest()[0].id.as_str(), "20");
        assert_eq!(catalog.others().last().unwrap().id.as_str(), "9");
    }

    #[test]
    fn fewer_episodes_than_latest_block() {
        let catalog = Catalog::from_episodes(vec![create_episode("only", 3)], CatalogOptions::default());

        assert_eq!(catalog.latest().len(), 1);
        assert!(catalog.others().is_empty());
        assert_eq!(catalog.playlist_index_of_other(0), None);
    }

    #[test]
    fn others_index_is_offset_by_latest() {
        let catalog = Catalog::from_episodes(
            vec![
                create_episode("a", 5),
                create_episode("b", 4),
                create_episode("c", 3),
                create_episode("d", 2),
            ],
            CatalogOptions::default(),
        );

        assert_eq!(catalog.playlist_index_of_other(0), Some(2));
        assert_eq!(catalog.playlist_index_of_other(1), Some(3));
        assert_eq!(catalog.playlist_index_of_other(2), None);
        assert_eq!(catalog.playlist()[3].id.as_str(), "d");
    }

    #[test]
    fn find_returns_queue_index() {
        let catalog = Catalog::from_episodes(
            vec![create_episode("a", 5), create_episode("b", 4), create_episode("c", 3)],
            CatalogOptions::default(),
        );

        let (index, episode) = catalog.find(&EpisodeId::new("c")).unwrap();
        assert_eq!(index, 2);
        assert_eq!(episode.title, "Episode c");
        assert!(catalog.find(&EpisodeId::new("missing")).is_none());
    }
}
