//! Episode domain type and the API record it is built from

use crate::error::{CoreError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Episode identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(String);

impl EpisodeId {
    /// Create a new episode ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EpisodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single podcast episode
///
/// Immutable once handed to the playback queue. Durations are unsigned, so a
/// negative length cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Unique episode identifier
    pub id: EpisodeId,

    /// Episode title
    pub title: String,

    /// Thumbnail image reference
    pub thumbnail: String,

    /// Hosts and guests credit line
    pub members: String,

    /// Publish timestamp
    pub published_at: DateTime<Utc>,

    /// Audio length, serialized as whole seconds
    #[serde(with = "duration_secs")]
    pub duration: Duration,

    /// Audio resource URL
    pub url: String,
}

impl Episode {
    /// Create an episode with empty credits and thumbnail
    pub fn new(
        id: impl Into<EpisodeId>,
        title: impl Into<String>,
        url: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            thumbnail: String::new(),
            members: String::new(),
            published_at: DateTime::<Utc>::default(),
            duration,
            url: url.into(),
        }
    }

    #[must_use]
    pub fn with_members(mut self, members: impl Into<String>) -> Self {
        self.members = members.into();
        self
    }

    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    #[must_use]
    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = published_at;
        self
    }

    /// Duration in whole seconds
    pub fn duration_secs(&self) -> u64 {
        self.duration.as_secs()
    }
}

impl From<String> for EpisodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Audio file block of an episode record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeFile {
    pub url: String,

    #[serde(rename = "type", default)]
    pub mime_type: Option<String>,

    /// Length in seconds
    pub duration: u64,
}

/// Episode as served by the episode API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub id: String,
    pub title: String,
    pub members: String,
    pub published_at: String,
    pub thumbnail: String,
    #[serde(default)]
    pub description: Option<String>,
    pub file: EpisodeFile,
}

impl TryFrom<EpisodeRecord> for Episode {
    type Error = CoreError;

    fn try_from(record: EpisodeRecord) -> Result<Self> {
        if record.id.trim().is_empty() {
            return Err(CoreError::invalid_episode("record has an empty id"));
        }
        if record.file.url.trim().is_empty() {
            return Err(CoreError::invalid_episode(format!(
                "episode {} has no audio url",
                record.id
            )));
        }

        let published_at = parse_published_at(&record.id, &record.published_at)?;

        Ok(Self {
            id: EpisodeId::new(record.id),
            title: record.title,
            thumbnail: record.thumbnail,
            members: record.members,
            published_at,
            duration: Duration::from_secs(record.file.duration),
            url: record.file.url,
        })
    }
}

/// Parse an API timestamp
///
/// Accepts RFC 3339 and the `YYYY-MM-DD HH:MM:SS` form (taken as UTC).
fn parse_published_at(id: &str, raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| CoreError::invalid_date(id, raw))
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, published_at: &str) -> EpisodeRecord {
        EpisodeRecord {
            id: id.to_string(),
            title: "Faladev #30 | Carreira em programação".to_string(),
            members: "Diego e Richard".to_string(),
            published_at: published_at.to_string(),
            thumbnail: "https://cdn.example.com/thumb.jpg".to_string(),
            description: None,
            file: EpisodeFile {
                url: format!("https://cdn.example.com/{}.m4a", id),
                mime_type: Some("audio/x-m4a".to_string()),
                duration: 3981,
            },
        }
    }

    #[test]
    fn record_with_space_separated_date_converts() {
        let episode = Episode::try_from(record("faladev-30", "2021-01-22 12:00:00")).unwrap();

        assert_eq!(episode.id.as_str(), "faladev-30");
        assert_eq!(episode.duration, Duration::from_secs(3981));
        assert_eq!(episode.url, "https://cdn.example.com/faladev-30.m4a");
        assert_eq!(
            episode.published_at,
            Utc.with_ymd_and_hms(2021, 1, 22, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn record_with_rfc3339_date_converts_to_utc() {
        let episode =
            Episode::try_from(record("a-importancia", "2021-01-22T09:00:00-03:00")).unwrap();

        assert_eq!(
            episode.published_at,
            Utc.with_ymd_and_hms(2021, 1, 22, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let err = Episode::try_from(record("broken", "yesterday")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDate { ref id, .. } if id == "broken"));
    }

    #[test]
    fn empty_url_is_rejected() {
        let mut rec = record("silent", "2021-01-22 12:00:00");
        rec.file.url = String::new();

        assert!(matches!(
            Episode::try_from(rec),
            Err(CoreError::InvalidEpisode(_))
        ));
    }

    #[test]
    fn record_deserializes_from_api_json() {
        let json = r#"{
            "id": "uma-conversa-sobre-programacao-funcional-e-orientacao-a-objetos",
            "title": "Uma conversa sobre programação funcional e orientação a objetos",
            "members": "Diego Fernandes e Richard Nixon",
            "published_at": "2021-01-20 12:00:00",
            "thumbnail": "https://cdn.example.com/opensource.jpg",
            "description": "<p>Neste episódio...</p>",
            "file": {
                "url": "https://cdn.example.com/opensource.m4a",
                "type": "audio/x-m4a",
                "duration": 3340
            }
        }"#;

        let rec: EpisodeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.file.mime_type.as_deref(), Some("audio/x-m4a"));
        assert_eq!(rec.file.duration, 3340);
    }

    #[test]
    fn episode_serializes_duration_as_seconds() {
        let episode = Episode::new("a", "A", "https://cdn.example.com/a.mp3", Duration::from_secs(90));
        let value = serde_json::to_value(&episode).unwrap();

        assert_eq!(value["duration"], 90);
        assert_eq!(value["id"], "a");
    }
}
