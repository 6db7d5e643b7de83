use std::io;
use std::path::PathBuf;

/// Failures raised while synchronizing index files.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("failed to create index file {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("no owning directory or index file found for {path}")]
    Resolution { path: String },

    #[error("failed to write index file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to delete index file {path}: {source}")]
    Delete {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to list directory {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// Only a failed placeholder creation aborts the running cycle; every other
    /// failure is scoped to the branch that produced it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::Create { .. })
    }
}

/// Failures loading, saving or validating settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;
