use tracing::{debug, trace};

use super::Indexer;
use crate::error::{Result, SyncError};
use crate::paths::{self, LINE_ENDING};
use crate::store::{Entry, Store};

/// Wiki-style reference to a root-relative path.
pub fn link(target: &str) -> String {
    format!("[[{target}]]")
}

impl<S: Store> Indexer<S> {
    /// Rewrite `index` from the current children of its directory.
    ///
    /// An index whose directory no longer exists is left alone.
    pub fn regenerate(&self, index: &Entry) -> Result<()> {
        let owner = paths::parent_of(&index.path);
        if !self.store.entry(owner).is_some_and(|e| e.is_dir()) {
            trace!(path = %index.path, "orphaned index, nothing to generate");
            return Ok(());
        }

        let body = self.render_index(index)?;
        self.store
            .overwrite(index, &body)
            .map_err(|source| SyncError::Write {
                path: index.path.clone(),
                source,
            })?;
        debug!(path = %index.path, bytes = body.len(), "index written");
        Ok(())
    }

    /// Body of `index`: one link per child of its directory, then a back-link
    /// to the parent directory's index unless `index` is the root index.
    pub fn render_index(&self, index: &Entry) -> Result<String> {
        let owner = paths::parent_of(&index.path);
        let children = self
            .store
            .list_children(owner)
            .map_err(|source| SyncError::Read {
                path: owner.to_string(),
                source,
            })?;

        let mut links: Vec<String> = children
            .iter()
            .filter(|child| paths::parent_of(&child.path) == owner)
            .filter(|child| child.is_dir() || !self.settings.is_index_name(child.name()))
            .map(|child| link(&child.path))
            .collect();

        if !owner.is_empty() && !self.is_root_index(&index.path) {
            let parent_index = self.index_path_of_dir(paths::parent_of(owner));
            links.push(link(&parent_index));
        }

        Ok(links.join(LINE_ENDING))
    }
}
