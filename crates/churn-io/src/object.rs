//! Versioned blobs for serde-serializable objects (fitted transformers,
//! trained models, run state).
//!
//! Each blob is a JSON envelope carrying a format version and a caller-chosen
//! `kind` tag, checked on load before the payload is decoded.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ensure_parent_dir;
use crate::error::{IoError, Result};

/// Current object envelope version.
pub const OBJECT_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T: ?Sized> {
    format_version: u32,
    kind: &'a str,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    format_version: u32,
    kind: String,
    payload: serde_json::Value,
}

/// Saves `value` under `kind`, replacing any existing file.
pub fn save_object<T: Serialize + ?Sized>(path: &Path, kind: &str, value: &T) -> Result<()> {
    let envelope = EnvelopeRef {
        format_version: OBJECT_FORMAT_VERSION,
        kind,
        payload: value,
    };
    let bytes = serde_json::to_vec(&envelope).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    ensure_parent_dir(path)?;
    fs::write(path, bytes).map_err(|e| IoError::write(path, e))
}

/// Loads an object saved with [`save_object`], checking version and kind.
pub fn load_object<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<T> {
    let bytes = fs::read(path).map_err(|e| IoError::read(path, e))?;
    let envelope: Envelope = serde_json::from_slice(&bytes).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if envelope.format_version != OBJECT_FORMAT_VERSION {
        return Err(IoError::ObjectVersion {
            path: path.to_path_buf(),
            found: envelope.format_version,
            expected: OBJECT_FORMAT_VERSION,
        });
    }
    if envelope.kind != kind {
        return Err(IoError::ObjectKind {
            path: path.to_path_buf(),
            found: envelope.kind,
            expected: kind.to_string(),
        });
    }
    serde_json::from_value(envelope.payload).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })
}
