//! Index file location, content generation and subtree walking.

mod content;
mod locator;
mod walk;

pub use walk::Action;

use crate::config::Settings;
use crate::filter::FolderFilter;
use crate::store::Store;

/// Core index operations over a `Store`, bound to one set of settings.
pub struct Indexer<S: Store> {
    store: S,
    settings: Settings,
    filter: FolderFilter,
    /// Root-relative path of the root index, computed once per settings value.
    root_index: String,
}

impl<S: Store> Indexer<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        let filter = FolderFilter::parse(&settings.folders_included);
        let root_index = settings.index_file_name(&store.root_name());
        Self {
            store,
            settings,
            filter,
            root_index,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.filter = FolderFilter::parse(&settings.folders_included);
        self.root_index = settings.index_file_name(&self.store.root_name());
        self.settings = settings;
    }

    /// Path of the root index, e.g. `_Index_of_vault.md`.
    pub fn root_index(&self) -> &str {
        &self.root_index
    }

    pub fn is_root_index(&self, path: &str) -> bool {
        path == self.root_index
    }

    /// Whether `dir` takes part in indexing, judged by its index file path.
    pub fn is_indexed_dir(&self, dir: &str) -> bool {
        self.filter.is_allowed(&self.index_path_of_dir(dir))
    }
}
