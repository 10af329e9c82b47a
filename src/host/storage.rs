//! Single-document JSON storage for the host bridge.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::bridge::BridgeError;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage result type.
pub type Result<T> = std::result::Result<T, StorageError>;

impl From<StorageError> for BridgeError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// One JSON document holding named sections.
///
/// The whole document is read and rewritten on every access. The data set is
/// a handful of small lists, and a single pretty-printed file keeps the
/// on-disk layout trivially inspectable.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store backed by the given file.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let document: Map<String, Value> = serde_json::from_str(&contents)?;
        Ok(document)
    }

    /// Read one section of the document.
    ///
    /// Returns `Ok(None)` when the file or the section does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or the section cannot be
    /// deserialized.
    pub fn read_section<T>(&self, section: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let document = self.read_document()?;
        match document.get(section) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Write one section of the document, leaving the others untouched.
    ///
    /// # Errors
    ///
    /// Returns error if the document cannot be read back or written.
    pub fn write_section<T>(&self, section: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let mut document = self.read_document()?;
        document.insert(section.to_string(), serde_json::to_value(value)?);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&document)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
