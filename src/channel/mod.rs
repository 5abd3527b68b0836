//! Channel resolution: where feed-level metadata comes from.
//!
//! Exactly one source is used per run:
//!
//! - [`from_config_file`] - a `key=value` file (see [`crate::config`])
//! - [`from_prompts`] - interactive questions through a [`Prompter`]
//!
//! The two paths are intentionally asymmetric. Only the interactive path
//! applies defaults and asks for a subcategory.

mod interactive;
mod prompt;

use std::path::Path;

use crate::config::{ChannelConfig, ConfigError};
use crate::feed::Channel;

pub use interactive::{from_prompts, DEFAULT_COPYRIGHT, DEFAULT_LANGUAGE};
pub use prompt::{ConsolePrompter, PromptError, Prompter};

/// Reads channel metadata from a config file. No defaults are applied.
pub fn from_config_file(path: &Path) -> Result<Channel, ConfigError> {
    ChannelConfig::load(path).map(ChannelConfig::into_channel)
}

/// Picks the source: the config file when a path is given, otherwise the
/// prompter. The prompter is never touched in config mode.
pub fn resolve<P: Prompter + ?Sized>(
    config: Option<&Path>,
    prompter: &mut P,
) -> anyhow::Result<Channel> {
    use anyhow::Context;

    match config {
        Some(path) => from_config_file(path)
            .with_context(|| format!("Failed to load channel config '{}'", path.display())),
        None => from_prompts(prompter).context("Failed to read channel details"),
    }
}
