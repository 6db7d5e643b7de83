use tracing::{debug, trace, warn};

use super::Indexer;
use crate::error::{Result, SyncError};
use crate::paths;
use crate::store::Store;

/// What a walk does to each index file it visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Remove every index file of the directory.
    Delete,
    /// Create the index if needed and rewrite its content.
    Generate,
}

impl<S: Store> Indexer<S> {
    /// Apply `action` to every directory whose index is affected by a change at `start`.
    ///
    /// Covers the directory one level above the owner of `start`, the owner
    /// itself and, when `start` is a directory, its whole subtree. An empty
    /// `start` covers the entire tree, and a hidden or ignored `start` covers
    /// nothing. The walk never climbs past the root.
    ///
    /// Only placeholder creation failures abort the walk; any other failure
    /// is logged and the walk moves on to the next directory.
    pub fn walk(&self, start: &str, action: Action) -> Result<()> {
        if start.is_empty() {
            return self.descend("", action);
        }
        if !self.store.is_visible(start) {
            trace!(start, "hidden entry, nothing to walk");
            return Ok(());
        }

        let owner = paths::parent_of(start);
        if !owner.is_empty() {
            self.visit(paths::parent_of(owner), action)?;
        }
        self.visit(owner, action)?;

        match self.store.entry(start) {
            Some(entry) if entry.is_dir() => self.descend(start, action),
            _ => Ok(()),
        }
    }

    fn descend(&self, dir: &str, action: Action) -> Result<()> {
        self.visit(dir, action)?;

        let children = match self.store.list_children(dir) {
            Ok(children) => children,
            Err(source) => {
                let err = SyncError::Read {
                    path: dir.to_string(),
                    source,
                };
                warn!(error = %err, "not descending");
                return Ok(());
            }
        };

        for child in children.iter().filter(|c| c.is_dir()) {
            self.descend(&child.path, action)?;
        }
        Ok(())
    }

    fn visit(&self, dir: &str, action: Action) -> Result<()> {
        if !self.is_indexed_dir(dir) {
            trace!(dir, "excluded by folder filter");
            return Ok(());
        }

        let outcome = match action {
            Action::Generate => self
                .ensure_index(dir)
                .and_then(|index| self.regenerate(&index)),
            Action::Delete => self.delete_indexes(dir),
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                warn!(dir, error = %err, "index skipped");
                Ok(())
            }
        }
    }

    /// Remove the index of `dir` along with any stale index-named files.
    fn delete_indexes(&self, dir: &str) -> Result<()> {
        for index in self.index_candidates(dir)? {
            match self.store.delete(&index) {
                Ok(()) => debug!(path = %index.path, "index deleted"),
                Err(source) => {
                    let err = SyncError::Delete {
                        path: index.path.clone(),
                        source,
                    };
                    warn!(error = %err, "stale index left in place");
                }
            }
        }
        Ok(())
    }
}
