#![allow(dead_code)]

use dirindex::config::Settings;
use dirindex::store::{build_ignore_set, FsStore};
use dirindex::sync::Synchronizer;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Name of the root directory of every fixture, so the root index is predictable.
pub const VAULT: &str = "vault";

/// Root index name under default settings.
pub const ROOT_INDEX: &str = "_Index_of_vault.md";

/// A fixture tree rooted at `<tmp>/vault`.
pub struct Vault {
    _tmp: TempDir,
    pub root: PathBuf,
}

impl Vault {
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel))
            .unwrap_or_else(|e| panic!("failed to read {rel}: {e}"))
    }

    /// Non-empty lines of a generated index.
    pub fn links(&self, rel: &str) -> Vec<String> {
        self.read(rel).lines().map(String::from).collect()
    }

    pub fn mkdir(&self, rel: &str) {
        fs::create_dir_all(self.path(rel)).unwrap();
    }

    pub fn touch(&self, rel: &str) {
        let full = self.path(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, "").unwrap();
    }

    pub fn store(&self) -> FsStore {
        FsStore::new(&self.root, build_ignore_set(&[]))
    }

    pub fn synchronizer(&self) -> Synchronizer<FsStore> {
        self.synchronizer_with(Settings::default())
    }

    pub fn synchronizer_with(&self, settings: Settings) -> Synchronizer<FsStore> {
        Synchronizer::new(self.store(), settings)
    }

    /// Names of every index file anywhere in the tree, as root-relative paths.
    pub fn index_files(&self, prefix: &str) -> Vec<String> {
        let mut found = Vec::new();
        collect_index_files(&self.root, &self.root, prefix, &mut found);
        found.sort();
        found
    }
}

fn collect_index_files(root: &Path, dir: &Path, prefix: &str, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.is_dir() {
            collect_index_files(root, &path, prefix, out);
        } else if entry.file_name().to_string_lossy().starts_with(prefix) {
            let rel = path.strip_prefix(root).unwrap();
            out.push(
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy().to_string())
                    .collect::<Vec<_>>()
                    .join("/"),
            );
        }
    }
}

/// Create a fixture from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> Vault {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join(VAULT);
    fs::create_dir(&root).unwrap();
    let vault = Vault { _tmp: tmp, root };
    for p in paths {
        if p.ends_with('/') {
            vault.mkdir(p.trim_end_matches('/'));
        } else {
            vault.touch(p);
        }
    }
    vault
}

/// Opt-in test logging: `RUST_LOG=debug cargo test -- --nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}
