//! Durable document storage behind the settings store.
//!
//! Documents are raw bytes addressed by a logical key. The backend knows
//! nothing about the settings schema; encoding lives in the store.

use std::{
    fs::{OpenOptions, read, write},
    io::{Error as IoError, ErrorKind, Write},
    path::PathBuf,
};

use {thiserror::Error, tracing::debug};

use crate::config::paths::CONFIG_EXT;

/// Error type for backend operations.
#[derive(Error, Debug)]
pub enum BackendError {
    /// No document is stored under the key.
    #[error("document not found")]
    NotFound,
    /// A safe create found an existing document.
    #[error("document already exists")]
    AlreadyExists,
    /// Any other I/O failure.
    #[error("io error: {0}")]
    Io(#[from] IoError),
}

/// Key-addressed document store.
pub trait DocumentBackend: Send + Sync {
    /// Location of the document for `key`, for diagnostics.
    fn locate(&self, key: &str) -> PathBuf;

    /// Reads the full document. Returns `NotFound` when it is missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, BackendError>;

    /// Writes the full document, replacing any existing one.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), BackendError>;

    /// Writes the document only if none exists yet.
    fn create_raw(&self, key: &str, data: &[u8]) -> Result<(), BackendError>;
}

/// Stores documents as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Creates a backend rooted at `dir`. The directory is not created.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentBackend for JsonFileBackend {
    fn locate(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{CONFIG_EXT}"))
    }

    fn load_raw(&self, key: &str) -> Result<Vec<u8>, BackendError> {
        let path = self.locate(key);
        debug!("Reading document {:?}", path);
        match read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(BackendError::NotFound),
            Err(err) => Err(BackendError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), BackendError> {
        let path = self.locate(key);
        debug!("Writing document {:?}", path);
        write(path, data)?;
        Ok(())
    }

    fn create_raw(&self, key: &str, data: &[u8]) -> Result<(), BackendError> {
        let path = self.locate(key);
        debug!("Creating document {:?}", path);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(BackendError::AlreadyExists);
            }
            Err(err) => return Err(BackendError::Io(err)),
        };
        file.write_all(data)?;
        Ok(())
    }
}
