//! Injectable I/O collaborators handed to each stage.
//!
//! Stages never touch the filesystem directly: they read configuration
//! through a [`ConfigReader`] and persist tables through an
//! [`ArtifactStore`]. The filesystem implementations delegate to the format
//! modules; tests substitute fakes.
//!
//! Memoization is opt-in and owned by the caller via [`CachedConfigReader`],
//! so there is no process-wide cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use polars::prelude::DataFrame;
use tracing::trace;

use crate::error::Result;
use crate::{structured, tabular};

/// Reads structured configuration (YAML, which includes JSON).
pub trait ConfigReader: Send + Sync {
    /// Reads the document at `path`; an empty document is `Value::Null`.
    fn read_config(&self, path: &Path) -> Result<serde_yaml::Value>;
}

/// Persists and loads tabular artifacts.
pub trait ArtifactStore: Send + Sync {
    /// Writes `df` to `path`, replacing existing content.
    fn write_table(&self, df: &mut DataFrame, path: &Path) -> Result<()>;

    /// Loads the table previously written to `path`.
    fn read_table(&self, path: &Path) -> Result<DataFrame>;
}

/// Reads configuration files from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsConfigReader;

impl ConfigReader for FsConfigReader {
    fn read_config(&self, path: &Path) -> Result<serde_yaml::Value> {
        structured::read_yaml(path)
    }
}

/// Stores tables as CSV files on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsArtifactStore;

impl ArtifactStore for FsArtifactStore {
    fn write_table(&self, df: &mut DataFrame, path: &Path) -> Result<()> {
        tabular::write_csv(df, path)
    }

    fn read_table(&self, path: &Path) -> Result<DataFrame> {
        tabular::read_csv(path)
    }
}

/// Memoizes successful reads of an inner [`ConfigReader`] by path.
///
/// Failed reads are not cached, so a corrected file is picked up on retry.
#[derive(Debug, Default)]
pub struct CachedConfigReader<R> {
    inner: R,
    cache: Mutex<HashMap<PathBuf, serde_yaml::Value>>,
}

impl<R: ConfigReader> CachedConfigReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Drops the cached entry for `path`, if any.
    pub fn invalidate(&self, path: &Path) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
    }

    /// Drops all cached entries.
    pub fn clear(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: ConfigReader> ConfigReader for CachedConfigReader<R> {
    fn read_config(&self, path: &Path) -> Result<serde_yaml::Value> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = cache.get(path) {
            trace!(path = %path.display(), "config cache hit");
            return Ok(value.clone());
        }
        let value = self.inner.read_config(path)?;
        cache.insert(path.to_path_buf(), value.clone());
        Ok(value)
    }
}
