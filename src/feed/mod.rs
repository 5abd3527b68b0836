//! Feed construction: from episode records to the written RSS document.
//!
//! - [`model`] - serde structs mirroring the iTunes podcast RSS schema
//! - [`episode`] - source records and the episode → item mapping
//! - [`writer`] - XML rendering and the atomic file write
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use podfeed::feed::{self, Channel, WriteOptions};
//!
//! let channel = Channel { title: "Show".to_string(), ..Channel::default() };
//! let rss = feed::build(channel, Path::new("data.json"))?;
//! feed::write_to_file(&rss, Path::new("feed.xml"), WriteOptions::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod episode;
mod model;
mod writer;

use std::path::Path;

use anyhow::{Context, Result};

use crate::util::warn_if_invalid_url;

pub use episode::{attach_episodes, load_episodes, parse_episodes, Episode, EpisodeError};
pub use model::{
    Category, Channel, Enclosure, Image, Item, Owner, Rss, SubCategory, AUDIO_MIME_TYPE,
    ITUNES_NAMESPACE, RSS_VERSION,
};
pub use writer::{atomic_write, render, write_to_file, WriteOptions, XML_DECLARATION};

/// Loads the episode list at `source`, attaches the mapped items to
/// `channel` and wraps it in the root document.
pub fn build(mut channel: Channel, source: &Path) -> Result<Rss> {
    warn_if_invalid_url("link", &channel.link);
    warn_if_invalid_url("image", &channel.image.href);

    let episodes = load_episodes(source)
        .with_context(|| format!("Failed to load episodes from '{}'", source.display()))?;
    attach_episodes(&mut channel, &episodes);

    Ok(Rss::new(channel))
}
