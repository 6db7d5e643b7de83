//! String helpers for root-relative tree paths.
//!
//! Every path handled by the indexer is relative to the watched root and uses
//! `/` as its only separator. The root itself is the empty string.

use std::path::{Component, Path};

/// Separator used by all root-relative paths.
pub const SEPARATOR: char = '/';

/// Line separator placed between links in generated index bodies.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Return `path` with its final segment removed, or `""` for a top-level path.
pub fn parent_of(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Final segment of `path`.
pub fn file_name(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Join a directory and a child name. Joining onto the root yields the bare name.
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}{SEPARATOR}{name}")
    }
}

/// Convert an absolute filesystem path into a root-relative tree path.
///
/// Returns `None` for paths outside `root` and for the root itself.
pub fn relative_to(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}
