//! Synchronization entry point driven by tree change events.

use tracing::{info, trace};

use crate::config::Settings;
use crate::error::Result;
use crate::index::{Action, Indexer};
use crate::store::Store;

/// Kind of change reported for a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Create,
    Delete,
    Rename,
}

/// A change to one entry of the tree, with root-relative paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEvent {
    pub kind: ChangeKind,
    pub path: String,
    /// Previous path, set for renames only.
    pub old_path: Option<String>,
}

impl TreeEvent {
    pub fn create(path: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Create,
            path: path.into(),
            old_path: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Delete,
            path: path.into(),
            old_path: None,
        }
    }

    pub fn rename(old_path: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Rename,
            path: path.into(),
            old_path: Some(old_path.into()),
        }
    }
}

/// Keeps index files consistent with the tree.
///
/// Every operation takes `&mut self`, so whoever owns the synchronizer runs
/// cycles strictly one after another.
pub struct Synchronizer<S: Store> {
    indexer: Indexer<S>,
}

impl<S: Store> Synchronizer<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        Self {
            indexer: Indexer::new(store, settings),
        }
    }

    pub fn indexer(&self) -> &Indexer<S> {
        &self.indexer
    }

    pub fn settings(&self) -> &Settings {
        self.indexer.settings()
    }

    /// Swap in new settings; later cycles use them.
    pub fn update_settings(&mut self, settings: Settings) {
        self.indexer.set_settings(settings);
    }

    /// Whether an event is about an index file and must not trigger a cycle.
    pub fn is_own_output(&self, event: &TreeEvent) -> bool {
        event
            .path
            .contains(self.indexer.settings().index_prefix.as_str())
    }

    /// Handle one change event. Returns whether any cycle ran.
    ///
    /// Events for hidden or ignored entries are dropped. A rename runs one
    /// cycle for the old path and one for the new path, skipping whichever
    /// side is hidden; the second still runs if the first fails, and the
    /// first error is returned.
    pub fn on_tree_change(&mut self, event: &TreeEvent) -> Result<bool> {
        if self.is_own_output(event) {
            trace!(path = %event.path, "ignoring index file event");
            return Ok(false);
        }

        let store = self.indexer.store();
        let new_visible = store.is_visible(&event.path);
        match (&event.kind, &event.old_path) {
            (ChangeKind::Rename, Some(old_path)) => {
                let old_visible = store.is_visible(old_path);
                match (old_visible, new_visible) {
                    (true, true) => {
                        let old = self.sync_cycle(old_path);
                        let new = self.sync_cycle(&event.path);
                        old.and(new)?;
                    }
                    (true, false) => self.sync_cycle(old_path)?,
                    (false, true) => self.sync_cycle(&event.path)?,
                    (false, false) => return Ok(self.skip_hidden(&event.path)),
                }
            }
            _ if !new_visible => return Ok(self.skip_hidden(&event.path)),
            _ => self.sync_cycle(&event.path)?,
        }
        Ok(true)
    }

    fn skip_hidden(&self, path: &str) -> bool {
        trace!(path, "ignoring event for hidden entry");
        false
    }

    /// Clear every index affected by `path`, then regenerate them from scratch.
    pub fn sync_cycle(&mut self, path: &str) -> Result<()> {
        info!(path, "synchronizing");
        self.indexer.walk(path, Action::Delete)?;
        self.indexer.walk(path, Action::Generate)
    }

    /// Run a full cycle over the whole tree.
    pub fn sync_all(&mut self) -> Result<()> {
        info!(root_index = %self.indexer.root_index(), "synchronizing entire tree");
        self.indexer.walk("", Action::Delete)?;
        self.indexer.walk("", Action::Generate)
    }
}
