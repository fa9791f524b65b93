//! Domain-specific error types using `thiserror`.
//!
//! This module defines the error enum shared by the settings store, the
//! document backend and the JSON formatter.

use std::{io::Error as IoError, path::PathBuf};

use {serde_json::Error as SerdeJsonError, thiserror::Error};

use crate::config::backend::BackendError;

/// Settings-related errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The platform exposes no user configuration root.
    #[error("Unable to resolve the user configuration directory")]
    ConfigRootUnavailable,
    /// The application config directory could not be created.
    #[error("Error creating config directory {path:?}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    /// No settings document exists yet.
    #[error("Settings document not found")]
    DocumentAbsent,
    /// The settings document exists but could not be read.
    #[error("Failed to read settings document {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    /// The settings document is malformed.
    #[error("Unable to decode settings document: {0}")]
    Decode(#[source] SerdeJsonError),
    /// The in-memory settings could not be serialized.
    #[error("Unable to encode settings: {0}")]
    Encode(#[source] SerdeJsonError),
    /// The settings document could not be written.
    #[error("Failed write to config file {path:?}: {source}")]
    DocumentWrite {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    /// Scratch file I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

impl SettingsError {
    /// Whether this error must stop the application from continuing.
    ///
    /// Only an unreadable or undecodable settings document is fatal; every
    /// other failure leaves the in-memory snapshot usable.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Read { .. })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Error, ErrorKind::PermissionDenied},
        path::PathBuf,
    };

    use serde_json::from_str;

    use crate::{config::backend::BackendError, error::domain::SettingsError};

    #[test]
    fn test_settings_error_display() {
        assert_eq!(
            SettingsError::DocumentAbsent.to_string(),
            "Settings document not found"
        );

        let dir_error = SettingsError::DirectoryCreation {
            path: PathBuf::from("/nope/renfield"),
            source: Error::new(PermissionDenied, "denied"),
        };
        assert!(dir_error.to_string().contains("Error creating config directory"));
        assert!(dir_error.to_string().contains("denied"));

        let write_error = SettingsError::DocumentWrite {
            path: PathBuf::from("config.json"),
            source: BackendError::AlreadyExists,
        };
        assert!(write_error.to_string().contains("Failed write to config file"));
    }

    #[test]
    fn test_settings_error_fatality() {
        let decode = from_str::<u32>("not json").unwrap_err();
        assert!(SettingsError::Decode(decode).is_fatal());

        let read = SettingsError::Read {
            path: PathBuf::from("config.json"),
            source: BackendError::Io(Error::new(PermissionDenied, "denied")),
        };
        assert!(read.is_fatal());

        assert!(!SettingsError::DocumentAbsent.is_fatal());
        assert!(!SettingsError::ConfigRootUnavailable.is_fatal());
        assert!(
            !SettingsError::DocumentWrite {
                path: PathBuf::from("config.json"),
                source: BackendError::AlreadyExists,
            }
            .is_fatal()
        );
    }
}
