//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::PiggyError;

/// Read JSON from a file, returning a default value if the file doesn't exist
///
/// A file that exists but does not parse yields `PiggyError::Decode`.
pub fn read_json<T, P>(path: P) -> Result<T, PiggyError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| PiggyError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| PiggyError::Decode(format!("{}: {}", path.display(), e)))
}

/// Decode a JSON document from an in-memory buffer
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, PiggyError> {
    serde_json::from_slice(bytes).map_err(|e| PiggyError::Decode(e.to_string()))
}

/// Encode a value as pretty-printed JSON bytes
pub fn encode_json<T: Serialize>(data: &T) -> Result<Vec<u8>, PiggyError> {
    serde_json::to_vec_pretty(data)
        .map_err(|e| PiggyError::Json(format!("Failed to serialize data: {}", e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), PiggyError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            PiggyError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| PiggyError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| PiggyError::Json(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| PiggyError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| PiggyError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PiggyError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
