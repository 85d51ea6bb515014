//! Filesystem snapshot store

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{Filter, ScalableFilter};
use crate::error::FilterError;
use crate::ports::SnapshotStore;

/// Stores one snapshot in one file, replacing it on every save
#[derive(Clone, Debug)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store backed by `path`; nothing is touched until first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&self, encoded: &[u8]) -> Result<(), FilterError> {
        fs::write(&self.path, encoded)?;
        debug!(path = %self.path.display(), bytes = encoded.len(), "Saved filter snapshot");
        Ok(())
    }

    fn load(&self) -> Result<Vec<u8>, FilterError> {
        let encoded = fs::read(&self.path)?;
        debug!(path = %self.path.display(), bytes = encoded.len(), "Loaded filter snapshot");
        Ok(encoded)
    }
}

impl Filter {
    /// Write the JSON snapshot of this filter to `path`
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), FilterError> {
        self.save_to(&FileSnapshotStore::new(path.as_ref()))
    }

    /// Read a filter written by [`Filter::to_file`]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FilterError> {
        Filter::load_from(&FileSnapshotStore::new(path.as_ref()))
    }
}

impl ScalableFilter {
    /// Write the JSON snapshot of the whole chain to `path`
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), FilterError> {
        self.save_to(&FileSnapshotStore::new(path.as_ref()))
    }

    /// Read a chain written by [`ScalableFilter::to_file`]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FilterError> {
        ScalableFilter::load_from(&FileSnapshotStore::new(path.as_ref()))
    }
}
