//! Folder inclusion filter.
//!
//! The raw list is comma or newline separated. Each entry is either an exact
//! folder (`Projects`, matching everything under `Projects/`) or a prefix
//! ending with the wildcard marker (`Proj*`, matching anything starting with
//! `Proj`). Matching is plain case-sensitive string comparison.

use crate::config::Settings;
use crate::paths::SEPARATOR;

/// Marker that turns an entry into a prefix match.
pub const WILDCARD: char = '*';

#[derive(Debug, Clone, PartialEq, Eq)]
enum FolderPattern {
    /// `entry*`: path starts with `entry`.
    Prefix(String),
    /// `entry`: path starts with `entry/`.
    Subtree(String),
}

impl FolderPattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            FolderPattern::Prefix(prefix) => path.starts_with(prefix.as_str()),
            FolderPattern::Subtree(folder) => path
                .strip_prefix(folder.as_str())
                .is_some_and(|rest| rest.starts_with(SEPARATOR)),
        }
    }
}

/// Parsed folder inclusion list. An empty filter allows every path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderFilter {
    patterns: Vec<FolderPattern>,
}

impl FolderFilter {
    pub fn parse(raw: &str) -> Self {
        let patterns = raw
            .split(|c: char| c == ',' || c == '\n')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.strip_suffix(WILDCARD) {
                Some(prefix) => FolderPattern::Prefix(prefix.to_string()),
                None => FolderPattern::Subtree(entry.to_string()),
            })
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether `path` lies within at least one configured folder.
    pub fn is_allowed(&self, path: &str) -> bool {
        self.is_empty() || self.patterns.iter().any(|p| p.matches(path))
    }
}

/// Evaluate the inclusion list of `settings` against `path`.
pub fn is_allowed(settings: &Settings, path: &str) -> bool {
    FolderFilter::parse(&settings.folders_included).is_allowed(path)
}
