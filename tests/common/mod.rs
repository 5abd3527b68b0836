//! Shared helpers for integration tests: temp directories and reading a
//! generated feed back into flat field maps.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Fresh, empty directory under the system temp dir.
pub fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("podfeed_it_{name}"));
    std::fs::remove_dir_all(&dir).ok();
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// A feed read back from XML.
///
/// Keys are element paths relative to their scope, joined with `/`;
/// attributes are `path@name`. For example `itunes:owner/itunes:name` and
/// `enclosure@length`.
#[derive(Debug, Default)]
pub struct ParsedFeed {
    pub root: BTreeMap<String, String>,
    pub channel: BTreeMap<String, String>,
    pub items: Vec<BTreeMap<String, String>>,
}

impl ParsedFeed {
    pub fn channel(&self, key: &str) -> &str {
        self.channel.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn item(&self, index: usize, key: &str) -> &str {
        self.items[index].get(key).map(String::as_str).unwrap_or("")
    }
}

enum Scope {
    Root,
    Channel,
    Item,
}

fn scope_of(stack: &[String]) -> (Scope, usize) {
    match stack {
        [_, c, i, ..] if c == "channel" && i == "item" => (Scope::Item, 3),
        [_, c, ..] if c == "channel" => (Scope::Channel, 2),
        _ => (Scope::Root, 0),
    }
}

fn slot<'a>(feed: &'a mut ParsedFeed, stack: &[String], suffix: &str) -> &'a mut String {
    let (scope, skip) = scope_of(stack);
    let mut key = stack[skip.min(stack.len())..].join("/");
    key.push_str(suffix);
    let map = match scope {
        Scope::Root => &mut feed.root,
        Scope::Channel => &mut feed.channel,
        Scope::Item => feed.items.last_mut().expect("item scope without item"),
    };
    map.entry(key).or_default()
}

fn record_attributes(
    feed: &mut ParsedFeed,
    stack: &[String],
    e: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
) {
    for attr in e.attributes() {
        let attr = attr.unwrap();
        let name = String::from_utf8(attr.key.as_ref().to_vec()).unwrap();
        let value = attr
            .decode_and_unescape_value(reader.decoder())
            .unwrap()
            .into_owned();
        *slot(feed, stack, &format!("@{name}")) = value;
    }
}

/// Parses a generated feed. Panics on malformed XML.
pub fn read_feed(xml: &str) -> ParsedFeed {
    let mut reader = Reader::from_str(xml);
    let mut feed = ParsedFeed::default();
    let mut stack: Vec<String> = Vec::new();

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) => {
                stack.push(String::from_utf8(e.name().as_ref().to_vec()).unwrap());
                if matches!(scope_of(&stack), (Scope::Item, _)) && stack.len() == 3 {
                    feed.items.push(BTreeMap::new());
                }
                record_attributes(&mut feed, &stack, &e, &reader);
            }
            Event::Empty(e) => {
                stack.push(String::from_utf8(e.name().as_ref().to_vec()).unwrap());
                if matches!(scope_of(&stack), (Scope::Item, _)) && stack.len() == 3 {
                    feed.items.push(BTreeMap::new());
                }
                record_attributes(&mut feed, &stack, &e, &reader);
                stack.pop();
            }
            Event::Text(t) => {
                let text = t.unescape().unwrap().into_owned();
                if !stack.is_empty() && !text.trim().is_empty() {
                    slot(&mut feed, &stack, "").push_str(&text);
                }
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    feed
}
