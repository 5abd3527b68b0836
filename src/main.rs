use anyhow::Result;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use podfeed::channel::{self, ConsolePrompter};
use podfeed::feed::{self, WriteOptions};

#[derive(Parser, Debug)]
#[command(
    name = "podfeed",
    about = "Build an iTunes podcast RSS feed from a JSON episode list"
)]
struct Args {
    /// Channel config file (key=value lines). Prompts interactively when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON array of episodes
    #[arg(short, long, value_name = "FILE", default_value = "data.json")]
    source: PathBuf,

    /// Where to write the feed
    #[arg(short, long, value_name = "FILE", default_value = "feed.xml")]
    target: PathBuf,

    /// Indent the XML output
    #[arg(long)]
    pretty: bool,
}

/// Long flags that are also accepted with a single dash (`-source data.json`).
const SINGLE_DASH_FLAGS: [&str; 4] = ["config", "source", "target", "pretty"];

/// Rewrites `-source` and `-source=FILE` style arguments to their `--` form
/// so clap does not read them as `-s ource`. Arguments after `--` are left
/// alone.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut after_terminator = false;
    args.into_iter()
        .map(|arg| {
            if after_terminator {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                after_terminator = true;
                return arg;
            }
            let Some(rest) = text.strip_prefix('-').filter(|r| !r.starts_with('-')) else {
                return arg;
            };
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if SINGLE_DASH_FLAGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the interactive prompts
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse_from(normalize_args(std::env::args_os()));
    tracing::debug!(?args, "Starting");

    let mut prompter = ConsolePrompter::stdio();
    let channel = channel::resolve(args.config.as_deref(), &mut prompter)?;

    let rss = feed::build(channel, &args.source)?;
    feed::write_to_file(
        &rss,
        &args.target,
        WriteOptions {
            pretty: args.pretty,
        },
    )?;

    println!(
        "Wrote {} episodes to {}",
        rss.channel.items.len(),
        args.target.display()
    );
    Ok(())
}
