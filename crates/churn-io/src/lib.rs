//! Artifact and configuration I/O for the churn pipeline.
//!
//! One module per format, each with a single stable signature:
//!
//! - [`tabular`]: CSV tables (`read_csv`, `write_csv`)
//! - [`structured`]: YAML/JSON documents (`read_yaml`, `write_yaml`, `read_json`, `write_json`)
//! - [`object`]: versioned serde blobs (`save_object`, `load_object`)
//!
//! [`store`] wraps them behind the [`ConfigReader`] and [`ArtifactStore`]
//! traits that stages receive at construction.

use std::path::Path;

pub mod error;
pub mod object;
pub mod store;
pub mod structured;
pub mod tabular;

pub use error::{IoError, Result};
pub use object::{OBJECT_FORMAT_VERSION, load_object, save_object};
pub use store::{ArtifactStore, CachedConfigReader, ConfigReader, FsArtifactStore, FsConfigReader};
pub use structured::{read_json, read_yaml, write_json, write_yaml};
pub use tabular::{read_csv, write_csv};

/// Creates the parent directory of `path` if it is missing.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| IoError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
