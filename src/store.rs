//! Storage collaborator: the only place the indexer touches the filesystem.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::ffi::OsStr;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::paths;

/// Kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// A node of the tree, addressed by its root-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Dir,
        }
    }

    pub fn name(&self) -> &str {
        paths::file_name(&self.path)
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Operations the indexer needs from the underlying tree.
pub trait Store {
    /// Name of the tree root, used to name the root index.
    fn root_name(&self) -> String;
    /// Entry at `path`, or `None` if nothing exists there.
    fn entry(&self, path: &str) -> Option<Entry>;
    /// Direct children of `dir` in a deterministic order.
    fn list_children(&self, dir: &str) -> io::Result<Vec<Entry>>;
    /// Whether `path` and every directory above it would show up in a listing.
    fn is_visible(&self, path: &str) -> bool;
    /// Create an empty file. Fails if anything already exists at `path`.
    fn create_empty_file(&self, path: &str) -> io::Result<Entry>;
    /// Replace the whole content of `entry`.
    fn overwrite(&self, entry: &Entry, text: &str) -> io::Result<()>;
    fn delete(&self, entry: &Entry) -> io::Result<()>;
}

const DEFAULT_IGNORES: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    ".DS_Store",
    ".obsidian",
    ".trash",
];

/// Build a GlobSet from user patterns plus the default ignore list.
/// Invalid patterns are skipped and logged.
pub fn build_ignore_set(user_patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    let mut invalid = Vec::new();
    for pattern in DEFAULT_IGNORES {
        if let Ok(g) = Glob::new(pattern) {
            builder.add(g);
        }
    }
    for pattern in user_patterns {
        match Glob::new(pattern) {
            Ok(g) => {
                builder.add(g);
            }
            Err(_) => {
                invalid.push(pattern.clone());
            }
        }
    }
    if !invalid.is_empty() {
        warn!(patterns = ?invalid, "invalid ignore pattern(s), skipped");
    }
    builder.build().unwrap_or_else(|e| {
        warn!(error = %e, "failed to build ignore set");
        GlobSet::empty()
    })
}

/// `Store` backed by a real directory.
pub struct FsStore {
    root: PathBuf,
    ignore: GlobSet,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>, ignore: GlobSet) -> Self {
        Self {
            root: root.into(),
            ignore,
        }
    }

    fn absolute(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            return self.root.clone();
        }
        path.split(paths::SEPARATOR)
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    /// Hidden and ignored entries are invisible to the indexer.
    fn is_hidden(&self, rel: &Path, name: &OsStr) -> bool {
        name.to_string_lossy().starts_with('.')
            || self.ignore.is_match(rel)
            || self.ignore.is_match(name)
    }

    fn is_listed(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        let rel = entry
            .path()
            .strip_prefix(&self.root)
            .unwrap_or_else(|_| entry.path());
        !self.is_hidden(rel, entry.file_name())
    }
}

impl Store for FsStore {
    fn root_name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "root".to_string())
    }

    fn entry(&self, path: &str) -> Option<Entry> {
        let meta = fs::symlink_metadata(self.absolute(path)).ok()?;
        let kind = if meta.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };
        Some(Entry {
            path: path.to_string(),
            kind,
        })
    }

    fn list_children(&self, dir: &str) -> io::Result<Vec<Entry>> {
        let walker = WalkDir::new(self.absolute(dir))
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by(sort_cmp);

        let mut children = Vec::new();
        for result in walker.into_iter().filter_entry(|e| self.is_listed(e)) {
            match result {
                Ok(entry) => {
                    let name = entry.file_name().to_string_lossy().to_string();
                    let path = paths::join(dir, &name);
                    if entry.file_type().is_dir() {
                        children.push(Entry::dir(path));
                    } else {
                        children.push(Entry::file(path));
                    }
                }
                // The directory itself could not be read.
                Err(e) if e.depth() == 0 => return Err(io::Error::from(e)),
                Err(e) => {
                    warn!(dir, error = %e, "skipping unreadable entry");
                }
            }
        }
        Ok(children)
    }

    fn is_visible(&self, path: &str) -> bool {
        let mut rel = PathBuf::new();
        path.split(paths::SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .all(|segment| {
                rel.push(segment);
                !self.is_hidden(&rel, OsStr::new(segment))
            })
    }

    fn create_empty_file(&self, path: &str) -> io::Result<Entry> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.absolute(path))?;
        trace!(path, "created empty file");
        Ok(Entry::file(path))
    }

    fn overwrite(&self, entry: &Entry, text: &str) -> io::Result<()> {
        let target = self.absolute(&entry.path);
        // Hidden sibling, renamed over the target once fully written.
        let tmp = self
            .absolute(paths::parent_of(&entry.path))
            .join(format!(".{}.tmp", entry.name()));
        fs::write(&tmp, text)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        Ok(())
    }

    fn delete(&self, entry: &Entry) -> io::Result<()> {
        let target = self.absolute(&entry.path);
        match entry.kind {
            EntryKind::Dir => fs::remove_dir_all(target),
            EntryKind::File => fs::remove_file(target),
        }
    }
}

/// Comparison function for walkdir sorting.
/// Directories first, then case-insensitive alpha, exact name as tie-break.
fn sort_cmp(a: &DirEntry, b: &DirEntry) -> std::cmp::Ordering {
    let a_is_dir = a.file_type().is_dir();
    let b_is_dir = b.file_type().is_dir();

    // Directories before files
    if a_is_dir != b_is_dir {
        return if a_is_dir {
            std::cmp::Ordering::Less
        } else {
            std::cmp::Ordering::Greater
        };
    }

    let a_name = a.file_name().to_string_lossy().to_string();
    let b_name = b.file_name().to_string_lossy().to_string();

    a_name
        .to_lowercase()
        .cmp(&b_name.to_lowercase())
        .then_with(|| a_name.cmp(&b_name))
}
