use std::ffi::{OsStr, OsString};
use std::fs::{self, File, OpenOptions, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use quick_xml::se::Serializer;
use serde::Serialize;

use super::model::Rss;

/// Declaration line written ahead of the document body.
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Output formatting switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Indent the body with two spaces per level. The default is a compact,
    /// single-line body.
    pub pretty: bool,
}

/// Renders the complete document: declaration line, then the `<rss>` body.
pub fn render(rss: &Rss, options: WriteOptions) -> Result<String> {
    let mut out = String::from(XML_DECLARATION);

    let mut serializer = Serializer::new(&mut out);
    if options.pretty {
        serializer.indent(' ', 2);
    }
    rss.serialize(serializer)
        .context("Failed to serialize feed to XML")?;

    Ok(out)
}

/// Renders the feed and writes it to `path` atomically.
///
/// A failure at any step leaves an existing target untouched.
pub fn write_to_file(rss: &Rss, path: &Path, options: WriteOptions) -> Result<()> {
    let content = render(rss, options)?;
    atomic_write(path, content.as_bytes())?;

    tracing::info!(path = %path.display(), bytes = content.len(), "Wrote feed");
    Ok(())
}

/// Replaces the file at `path` with `bytes` through a single rename.
///
/// An existing target is resolved through symlinks first, so a link stays a
/// link and the file it points at receives the new contents. The replaced
/// file's permissions carry over.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let target = match fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == io::ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to resolve '{}'", path.display()))
        }
    };
    let permissions = fs::metadata(&target).ok().map(|m| m.permissions());
    let staging = staging_path(&target);

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&staging)
        .with_context(|| {
            format!(
                "Failed to create temporary file '{}': check directory permissions",
                staging.display()
            )
        })?;

    let result = stage_and_swap(file, &staging, &target, bytes, permissions);
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

/// Hidden sibling of `target`, unique per process and call.
fn staging_path(target: &Path) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    let mut name = OsString::from(".");
    name.push(target.file_name().unwrap_or_else(|| OsStr::new("feed")));
    name.push(format!(".{}.{:x}.tmp", std::process::id(), nanos));
    target.with_file_name(name)
}

fn stage_and_swap(
    mut file: File,
    staging: &Path,
    target: &Path,
    bytes: &[u8],
    permissions: Option<Permissions>,
) -> Result<()> {
    file.write_all(bytes)
        .with_context(|| format!("Failed to write temporary file '{}'", staging.display()))?;
    if let Some(permissions) = permissions {
        file.set_permissions(permissions).with_context(|| {
            format!("Failed to copy permissions onto '{}'", staging.display())
        })?;
    }
    file.sync_all()
        .with_context(|| format!("Failed to sync temporary file '{}'", staging.display()))?;
    drop(file);

    fs::rename(staging, target).with_context(|| {
        format!(
            "Failed to rename '{}' to '{}'",
            staging.display(),
            target.display()
        )
    })
}
