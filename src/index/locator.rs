use tracing::debug;

use super::Indexer;
use crate::error::{Result, SyncError};
use crate::paths;
use crate::store::{Entry, Store};

impl<S: Store> Indexer<S> {
    /// Canonical index path of directory `dir` (`""` for the root).
    pub fn index_path_of_dir(&self, dir: &str) -> String {
        if dir.is_empty() {
            self.root_index.clone()
        } else {
            let name = self.settings.index_file_name(paths::file_name(dir));
            paths::join(dir, &name)
        }
    }

    /// Index file owning `path`, i.e. the index of the directory containing it.
    /// Creates an empty placeholder when the directory has no index yet.
    /// Entry-level form of `ensure_index`, which the walker calls per directory.
    pub fn index_file_for(&self, path: &str) -> Result<Entry> {
        self.ensure_index(paths::parent_of(path))
    }

    /// Index file of directory `dir`, created empty if missing.
    pub fn ensure_index(&self, dir: &str) -> Result<Entry> {
        self.owning_dir(dir)?;
        let computed = self.index_path_of_dir(dir);
        if self.store.entry(&computed).is_none() {
            self.store
                .create_empty_file(&computed)
                .map_err(|source| SyncError::Create {
                    path: computed.clone(),
                    source,
                })?;
            debug!(path = %computed, "created index placeholder");
        }
        self.resolve(dir, &computed)?
            .ok_or(SyncError::Resolution { path: computed })
    }

    /// Index file of directory `dir` if one exists. Never creates anything.
    pub fn find_index(&self, dir: &str) -> Result<Option<Entry>> {
        self.owning_dir(dir)?;
        self.resolve(dir, &self.index_path_of_dir(dir))
    }

    /// Every file in `dir` named like an index file, current or stale.
    pub fn index_candidates(&self, dir: &str) -> Result<Vec<Entry>> {
        let children = self
            .store
            .list_children(dir)
            .map_err(|source| SyncError::Read {
                path: dir.to_string(),
                source,
            })?;
        Ok(children
            .into_iter()
            .filter(|e| !e.is_dir() && self.settings.is_index_name(e.name()))
            .collect())
    }

    /// The computed path wins when it holds a file; otherwise the first
    /// index-named file of the directory stands in for it.
    fn resolve(&self, dir: &str, computed: &str) -> Result<Option<Entry>> {
        match self.store.entry(computed) {
            Some(entry) if !entry.is_dir() => Ok(Some(entry)),
            _ => Ok(self.index_candidates(dir)?.into_iter().next()),
        }
    }

    fn owning_dir(&self, dir: &str) -> Result<()> {
        match self.store.entry(dir) {
            Some(entry) if entry.is_dir() => Ok(()),
            _ => Err(SyncError::Resolution {
                path: dir.to_string(),
            }),
        }
    }
}
