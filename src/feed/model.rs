//! Document model for the generated feed.
//!
//! Each struct maps one-to-one onto an element of the iTunes podcast RSS
//! schema. Field order is element order: `quick-xml` serializes struct fields
//! in declaration order, and podcast directories expect this exact layout.
//! Fields renamed with a leading `@` become attributes. Every string goes
//! through [`xml_text`], so characters XML 1.0 forbids are written as U+FFFD.
use serde::{Serialize, Serializer};

use crate::util::replace_invalid_xml_chars;

/// Namespace URI bound to the `itunes:` prefix on the root element.
pub const ITUNES_NAMESPACE: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";

/// RSS version written on the root element.
pub const RSS_VERSION: &str = "2.0";

/// MIME type written on every `<enclosure>`.
pub const AUDIO_MIME_TYPE: &str = "audio/x-m4a";

/// Writes `value` with XML-forbidden characters replaced.
fn xml_text<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&replace_invalid_xml_chars(value))
}

/// Root `<rss>` element. Owns the single channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "rss")]
pub struct Rss {
    #[serde(rename = "@xmlns:itunes")]
    pub itunes_namespace: &'static str,
    #[serde(rename = "@version")]
    pub version: &'static str,
    pub channel: Channel,
}

impl Rss {
    /// Wraps a channel with the fixed protocol constants.
    pub fn new(channel: Channel) -> Self {
        Self {
            itunes_namespace: ITUNES_NAMESPACE,
            version: RSS_VERSION,
            channel,
        }
    }
}

/// Feed-level metadata plus the ordered episode items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Channel {
    #[serde(serialize_with = "xml_text")]
    pub copyright: String,
    #[serde(serialize_with = "xml_text")]
    pub language: String,
    #[serde(serialize_with = "xml_text")]
    pub link: String,
    #[serde(serialize_with = "xml_text")]
    pub title: String,
    #[serde(rename = "itunes:author", serialize_with = "xml_text")]
    pub author: String,
    #[serde(rename = "itunes:subtitle", serialize_with = "xml_text")]
    pub subtitle: String,
    #[serde(rename = "itunes:summary", serialize_with = "xml_text")]
    pub summary: String,
    #[serde(rename = "itunes:owner")]
    pub owner: Owner,
    #[serde(serialize_with = "xml_text")]
    pub description: String,
    #[serde(rename = "itunes:image")]
    pub image: Image,
    #[serde(rename = "itunes:category")]
    pub category: Category,
    #[serde(rename = "item")]
    pub items: Vec<Item>,
}

/// `<itunes:owner>`; only the name is carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Owner {
    #[serde(rename = "itunes:name", serialize_with = "xml_text")]
    pub name: String,
}

/// `<itunes:image href="..."/>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Image {
    #[serde(rename = "@href", serialize_with = "xml_text")]
    pub href: String,
}

impl Image {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// `<itunes:category text="..."><category text="..."/></itunes:category>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Category {
    #[serde(rename = "@text", serialize_with = "xml_text")]
    pub text: String,
    #[serde(rename = "category")]
    pub subcategory: SubCategory,
}

/// Nested plain `<category>` inside `<itunes:category>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubCategory {
    #[serde(rename = "@text", serialize_with = "xml_text")]
    pub text: String,
}

/// One `<item>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Item {
    #[serde(serialize_with = "xml_text")]
    pub title: String,
    #[serde(rename = "itunes:author", serialize_with = "xml_text")]
    pub author: String,
    #[serde(rename = "itunes:subtitle", serialize_with = "xml_text")]
    pub subtitle: String,
    #[serde(rename = "itunes:summary", serialize_with = "xml_text")]
    pub summary: String,
    #[serde(rename = "itunes:image")]
    pub image: Image,
    pub enclosure: Enclosure,
    #[serde(serialize_with = "xml_text")]
    pub guid: String,
    #[serde(rename = "pubDate", serialize_with = "xml_text")]
    pub pub_date: String,
    #[serde(rename = "itunes:duration", serialize_with = "xml_text")]
    pub duration: String,
}

/// `<enclosure url="..." type="..." length="..."/>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Enclosure {
    #[serde(rename = "@url", serialize_with = "xml_text")]
    pub url: String,
    #[serde(rename = "@type", serialize_with = "xml_text")]
    pub mime_type: String,
    #[serde(rename = "@length", serialize_with = "xml_text")]
    pub length: String,
}
