//! Channel config file parser.
//!
//! The file is plain text with one `key=value` pair per line. There is no
//! quoting, escaping, comment or blank-line handling: every line must hold
//! exactly one `=` with a non-empty key, otherwise loading fails.
//!
//! Missing keys resolve to empty strings. Unlike the interactive prompts, no
//! defaults are filled in here, and there are no `owner` or `subcategory`
//! keys: the owner name always mirrors `author` and the subcategory is left
//! empty.
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::feed::{Category, Channel, Image, Owner};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Config line {line}: missing '=' delimiter")]
    MissingDelimiter { line: usize },

    #[error("Config line {line}: values may not contain '='")]
    ExtraDelimiter { line: usize },

    #[error("Config line {line}: empty key")]
    EmptyKey { line: usize },
}

// ============================================================================
// Keys
// ============================================================================

/// The recognized config keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Copyright,
    Language,
    Link,
    Title,
    Author,
    Subtitle,
    Summary,
    Description,
    Image,
    Category,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 10] = [
        ConfigKey::Copyright,
        ConfigKey::Language,
        ConfigKey::Link,
        ConfigKey::Title,
        ConfigKey::Author,
        ConfigKey::Subtitle,
        ConfigKey::Summary,
        ConfigKey::Description,
        ConfigKey::Image,
        ConfigKey::Category,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Copyright => "copyright",
            ConfigKey::Language => "language",
            ConfigKey::Link => "link",
            ConfigKey::Title => "title",
            ConfigKey::Author => "author",
            ConfigKey::Subtitle => "subtitle",
            ConfigKey::Summary => "summary",
            ConfigKey::Description => "description",
            ConfigKey::Image => "image",
            ConfigKey::Category => "category",
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or(())
    }
}

// ============================================================================
// ChannelConfig
// ============================================================================

/// Channel metadata as read from a config file.
///
/// Every field defaults to the empty string when its key is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelConfig {
    pub copyright: String,
    pub language: String,
    pub link: String,
    pub title: String,
    pub author: String,
    pub subtitle: String,
    pub summary: String,
    pub description: String,
    pub image: String,
    pub category: String,
}

impl ChannelConfig {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load channel metadata from a `key=value` file.
    ///
    /// - Missing or unreadable file → `Err(ConfigError::Io)`
    /// - Malformed line → `Err` naming the 1-based line number
    /// - Unknown keys → ignored, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        let meta = std::fs::metadata(path).map_err(io_err)?;
        if meta.len() > Self::MAX_FILE_SIZE {
            return Err(ConfigError::TooLarge(format!(
                "Config file is {} bytes (max {} bytes)",
                meta.len(),
                Self::MAX_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path).map_err(io_err)?;
        let config = Self::parse(&content)?;
        tracing::info!(path = %path.display(), title = %config.title, "Loaded channel config");
        Ok(config)
    }

    /// Parse config text. Later occurrences of a key overwrite earlier ones.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let mut parts = raw.split('=');
            let key = parts.next().unwrap_or_default();
            let value = parts.next().ok_or(ConfigError::MissingDelimiter { line })?;
            if parts.next().is_some() {
                return Err(ConfigError::ExtraDelimiter { line });
            }
            if key.is_empty() {
                return Err(ConfigError::EmptyKey { line });
            }

            match key.parse::<ConfigKey>() {
                Ok(known) => *config.field_mut(known) = value.to_string(),
                Err(()) => {
                    tracing::warn!(key = %key, line, "Unknown key in config file, ignoring");
                }
            }
        }

        Ok(config)
    }

    fn field_mut(&mut self, key: ConfigKey) -> &mut String {
        match key {
            ConfigKey::Copyright => &mut self.copyright,
            ConfigKey::Language => &mut self.language,
            ConfigKey::Link => &mut self.link,
            ConfigKey::Title => &mut self.title,
            ConfigKey::Author => &mut self.author,
            ConfigKey::Subtitle => &mut self.subtitle,
            ConfigKey::Summary => &mut self.summary,
            ConfigKey::Description => &mut self.description,
            ConfigKey::Image => &mut self.image,
            ConfigKey::Category => &mut self.category,
        }
    }

    /// Build the feed channel. Values are copied verbatim.
    pub fn into_channel(self) -> Channel {
        Channel {
            copyright: self.copyright,
            language: self.language,
            link: self.link,
            title: self.title,
            owner: Owner {
                name: self.author.clone(),
            },
            author: self.author,
            subtitle: self.subtitle,
            summary: self.summary,
            description: self.description,
            image: Image::new(self.image),
            category: Category {
                text: self.category,
                ..Category::default()
            },
            items: Vec::new(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
