use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::model::{Channel, Enclosure, Image, Item, AUDIO_MIME_TYPE};
use crate::util::{first_non_empty, warn_if_invalid_url};

/// Errors that can occur while loading the episode list.
#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error("Failed to read episode list {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid episode JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// One record of the source episode list.
///
/// Keys match field names ignoring ASCII case, so `"Title"` fills `title`.
/// A missing key or an explicit `null` leaves the zero value in place, a
/// repeated key overwrites the earlier value, and unknown keys are skipped.
/// `create_time` is passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Episode {
    pub title: String,
    pub audio_url: String,
    pub image: String,
    /// Length in seconds.
    pub duration: i64,
    pub create_time: String,
}

#[derive(Clone, Copy)]
enum Field {
    Title,
    AudioUrl,
    Image,
    Duration,
    CreateTime,
}

impl Field {
    const NAMES: [(&'static str, Field); 5] = [
        ("title", Field::Title),
        ("audio_url", Field::AudioUrl),
        ("image", Field::Image),
        ("duration", Field::Duration),
        ("create_time", Field::CreateTime),
    ];

    fn lookup(key: &str) -> Option<Field> {
        Self::NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|&(_, field)| field)
    }
}

/// Overwrites `slot` unless the value was `null`.
fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

struct EpisodeVisitor;

impl<'de> Visitor<'de> for EpisodeVisitor {
    type Value = Episode;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an episode object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Episode, A::Error> {
        let mut episode = Episode::default();

        while let Some(key) = map.next_key::<String>()? {
            match Field::lookup(&key) {
                Some(Field::Title) => assign(&mut episode.title, map.next_value()?),
                Some(Field::AudioUrl) => assign(&mut episode.audio_url, map.next_value()?),
                Some(Field::Image) => assign(&mut episode.image, map.next_value()?),
                Some(Field::Duration) => assign(&mut episode.duration, map.next_value()?),
                Some(Field::CreateTime) => assign(&mut episode.create_time, map.next_value()?),
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(episode)
    }
}

impl<'de> Deserialize<'de> for Episode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EpisodeVisitor)
    }
}

impl Episode {
    /// Builds the feed item for this episode.
    ///
    /// Author and summary come from the channel, the subtitle repeats the
    /// episode title, and the channel image takes precedence over the
    /// episode image. The guid is the audio URL, so two episodes sharing an
    /// audio URL share a guid.
    pub fn to_item(&self, channel: &Channel) -> Item {
        let duration = self.duration.to_string();
        Item {
            title: self.title.clone(),
            author: channel.author.clone(),
            subtitle: self.title.clone(),
            summary: channel.summary.clone(),
            image: Image::new(first_non_empty(&[channel.image.href.as_str(), self.image.as_str()])),
            enclosure: Enclosure {
                url: self.audio_url.clone(),
                mime_type: AUDIO_MIME_TYPE.to_string(),
                length: duration.clone(),
            },
            guid: self.audio_url.clone(),
            pub_date: self.create_time.clone(),
            duration,
        }
    }
}

/// Parses a JSON array of episodes.
///
/// A top-level `null` reads as an empty list and a `null` element as an
/// all-zero episode.
pub fn parse_episodes(json: &[u8]) -> Result<Vec<Episode>, serde_json::Error> {
    let episodes: Option<Vec<Option<Episode>>> = serde_json::from_slice(json)?;
    Ok(episodes
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Reads and parses the episode list at `path`.
pub fn load_episodes(path: &Path) -> Result<Vec<Episode>, EpisodeError> {
    let bytes = std::fs::read(path).map_err(|source| EpisodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let episodes = parse_episodes(&bytes).map_err(|source| EpisodeError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), episodes = episodes.len(), "Loaded episode list");
    Ok(episodes)
}

/// Maps every episode onto an item and appends it to the channel, in order.
pub fn attach_episodes(channel: &mut Channel, episodes: &[Episode]) {
    let mut seen_guids = HashSet::new();
    let mut items = Vec::with_capacity(episodes.len());

    for (index, episode) in episodes.iter().enumerate() {
        let item = episode.to_item(channel);

        warn_if_invalid_url("audio_url", &item.enclosure.url);
        if item.image.href != channel.image.href {
            warn_if_invalid_url("image", &item.image.href);
        }
        if !seen_guids.insert(item.guid.clone()) {
            tracing::debug!(index, guid = %item.guid, "Duplicate guid: episodes share an audio URL");
        }

        items.push(item);
    }

    channel.items.extend(items);
    tracing::info!(items = channel.items.len(), "Mapped episodes to feed items");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn channel(image: &str) -> Channel {
        Channel {
            title: "Show".to_string(),
            author: "Alice".to_string(),
            summary: "About the show".to_string(),
            image: Image::new(image),
            ..Channel::default()
        }
    }

    #[test]
    fn test_parse_full_record() {
        let json = br#"[{"title":"Ep1","audio_url":"http://x/1.m4a","image":"http://x/1.png","duration":120,"create_time":"2020-01-01"}]"#;
        let episodes = parse_episodes(json).unwrap();
        assert_eq!(
            episodes,
            vec![Episode {
                title: "Ep1".to_string(),
                audio_url: "http://x/1.m4a".to_string(),
                image: "http://x/1.png".to_string(),
                duration: 120,
                create_time: "2020-01-01".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_and_null_fields_use_zero_values() {
        let json = br#"[{"title":"Only title"},{"title":null,"duration":null}]"#;
        let episodes = parse_episodes(json).unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].title, "Only title");
        assert_eq!(episodes[0].audio_url, "");
        assert_eq!(episodes[0].duration, 0);
        assert_eq!(episodes[1], Episode::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = br#"[{"title":"Ep","views":10,"tags":["a"]}]"#;
        let episodes = parse_episodes(json).unwrap();
        assert_eq!(episodes[0].title, "Ep");
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_episodes(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_top_level_null_is_empty() {
        assert!(parse_episodes(b"null").unwrap().is_empty());
        assert!(parse_episodes(b" null\n").unwrap().is_empty());
    }

    #[test]
    fn test_null_element_is_zero_episode() {
        let episodes = parse_episodes(br#"[null,{"title":"Ep"}]"#).unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0], Episode::default());
        assert_eq!(episodes[1].title, "Ep");
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let episodes = parse_episodes(br#"[{"title":"One","duration":1,"title":"Two"}]"#).unwrap();
        assert_eq!(episodes[0].title, "Two");
        assert_eq!(episodes[0].duration, 1);
    }

    #[test]
    fn test_null_keeps_earlier_value() {
        let episodes = parse_episodes(br#"[{"title":"One","title":null}]"#).unwrap();
        assert_eq!(episodes[0].title, "One");
    }

    #[test]
    fn test_keys_match_ignoring_case() {
        let json = br#"[{"Title":"Ep","AUDIO_URL":"http://x/1.m4a","Duration":7,"create_TIME":"t"}]"#;
        let episodes = parse_episodes(json).unwrap();
        assert_eq!(
            episodes[0],
            Episode {
                title: "Ep".to_string(),
                audio_url: "http://x/1.m4a".to_string(),
                image: String::new(),
                duration: 7,
                create_time: "t".to_string(),
            }
        );
    }

    #[test]
    fn test_mixed_case_duplicate_last_wins() {
        let episodes = parse_episodes(br#"[{"title":"lower","TITLE":"upper"}]"#).unwrap();
        assert_eq!(episodes[0].title, "upper");
    }

    #[test]
    fn test_non_object_element_rejected() {
        assert!(parse_episodes(b"[1]").is_err());
        assert!(parse_episodes(br#"["Ep"]"#).is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(parse_episodes(b"[{\"title\":").is_err());
        assert!(parse_episodes(b"{\"title\":\"not an array\"}").is_err());
        assert!(parse_episodes(b"[{\"duration\":\"120\"}]").is_err());
    }

    #[test]
    fn test_to_item_derivation() {
        let episode = Episode {
            title: "Ep1".to_string(),
            audio_url: "http://x/1.m4a".to_string(),
            image: String::new(),
            duration: 120,
            create_time: "2020-01-01".to_string(),
        };
        let item = episode.to_item(&channel(""));

        assert_eq!(
            item,
            Item {
                title: "Ep1".to_string(),
                author: "Alice".to_string(),
                subtitle: "Ep1".to_string(),
                summary: "About the show".to_string(),
                image: Image::new(""),
                enclosure: Enclosure {
                    url: "http://x/1.m4a".to_string(),
                    mime_type: "audio/x-m4a".to_string(),
                    length: "120".to_string(),
                },
                guid: "http://x/1.m4a".to_string(),
                pub_date: "2020-01-01".to_string(),
                duration: "120".to_string(),
            }
        );
    }

    #[test]
    fn test_channel_image_wins() {
        let episode = Episode {
            image: "http://x/ep.png".to_string(),
            ..Episode::default()
        };
        let item = episode.to_item(&channel("http://x/show.png"));
        assert_eq!(item.image.href, "http://x/show.png");
    }

    #[test]
    fn test_episode_image_used_when_channel_has_none() {
        let episode = Episode {
            image: "http://x/ep.png".to_string(),
            ..Episode::default()
        };
        let item = episode.to_item(&channel(""));
        assert_eq!(item.image.href, "http://x/ep.png");
    }

    #[test]
    fn test_negative_duration_passes_through() {
        let episode = Episode {
            duration: -5,
            ..Episode::default()
        };
        let item = episode.to_item(&channel(""));
        assert_eq!(item.duration, "-5");
        assert_eq!(item.enclosure.length, "-5");
    }

    #[test]
    fn test_attach_preserves_order_and_duplicates() {
        let episodes: Vec<Episode> = ["b", "a", "b"]
            .iter()
            .map(|t| Episode {
                title: t.to_string(),
                audio_url: format!("http://x/{t}.m4a"),
                ..Episode::default()
            })
            .collect();

        let mut ch = channel("");
        attach_episodes(&mut ch, &episodes);

        let titles: Vec<&str> = ch.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a", "b"]);
        assert_eq!(ch.items[0].guid, ch.items[2].guid);
    }

    #[test]
    fn test_load_missing_file() {
        let path = Path::new("/tmp/podfeed_episode_test_missing.json");
        let err = load_episodes(path).unwrap_err();
        assert!(matches!(err, EpisodeError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json_names_file() {
        let dir = std::env::temp_dir().join("podfeed_episode_test_invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("data.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load_episodes(&path).unwrap_err();
        assert!(matches!(err, EpisodeError::Json { .. }));
        assert!(err.to_string().contains("data.json"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
