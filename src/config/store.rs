//! The process-wide settings store.
//!
//! `SettingsStore` holds the single live [`Settings`] snapshot, keeps it in
//! step with the durable document and serializes every mutation. One store
//! is constructed at startup and shared as `Arc<SettingsStore>`.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use {
    async_channel::{Receiver, Sender, unbounded},
    parking_lot::RwLock,
    serde_json::{from_slice, to_vec_pretty},
    tracing::{debug, info},
};

use crate::{
    config::{
        backend::{BackendError, DocumentBackend, JsonFileBackend},
        paths::{self, CONFIG_FILE},
        settings::{ProjectSettings, Settings},
    },
    error::{FailureReporter, ProcessReporter, SettingsError},
};

/// Settings change notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// The snapshot was replaced from the document (or first-run defaults).
    Loaded,
    /// The snapshot was replaced wholesale by `save`.
    Saved,
    /// A single project entry was inserted or replaced.
    ProjectUpdated(String),
}

/// Owns the in-memory settings snapshot and its persistence.
pub struct SettingsStore {
    /// Live snapshot; every read and write goes through this lock.
    settings: RwLock<Settings>,
    /// `<platform config root>/renfield`
    config_dir: PathBuf,
    backend: Box<dyn DocumentBackend>,
    reporter: Box<dyn FailureReporter>,
    /// Active subscribers for manual broadcast fan-out.
    subscribers: RwLock<Vec<Sender<SettingsEvent>>>,
}

impl Debug for SettingsStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SettingsStore")
            .field("settings", &*self.settings.read())
            .field("config_dir", &self.config_dir)
            .field("reporter", &self.reporter)
            .finish_non_exhaustive()
    }
}

impl SettingsStore {
    /// Creates a store under the platform user config root.
    ///
    /// The snapshot starts empty; call [`SettingsStore::load`] before use.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::ConfigRootUnavailable` if the platform has no
    /// user config directory.
    pub fn new() -> Result<Self, SettingsError> {
        Ok(Self::with_config_root(paths::platform_config_root()?))
    }

    /// Creates a store under a custom config root (for testing and embedding).
    ///
    /// # Arguments
    ///
    /// * `root` - Directory standing in for the platform config root.
    ///
    /// # Returns
    ///
    /// A store backed by `<root>/renfield/config.json` that exits the process
    /// on an undecodable document.
    pub fn with_config_root(root: impl AsRef<Path>) -> Self {
        let config_dir = paths::app_config_dir(root.as_ref());
        let backend = JsonFileBackend::new(config_dir.clone());
        Self::with_backend(config_dir, backend, ProcessReporter)
    }

    /// Creates a store with an explicit backend and failure reporter.
    ///
    /// # Arguments
    ///
    /// * `config_dir` - Application config directory (created on first run).
    /// * `backend` - Durable document storage.
    /// * `reporter` - Strategy for recoverable and fatal failures.
    pub fn with_backend(
        config_dir: impl Into<PathBuf>,
        backend: impl DocumentBackend + 'static,
        reporter: impl FailureReporter + 'static,
    ) -> Self {
        Self {
            settings: RwLock::new(Settings::default()),
            config_dir: config_dir.into(),
            backend: Box::new(backend),
            reporter: Box::new(reporter),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Loads the settings document into the snapshot.
    ///
    /// A missing document triggers [`SettingsStore::initialize`]. A zero
    /// timeout is backfilled with the default after decoding.
    ///
    /// # Errors
    ///
    /// An unreadable or malformed document is handed to the reporter's
    /// `fatal` hook first; if that returns, the error is propagated and the
    /// snapshot is left untouched.
    pub fn load(&self) -> Result<(), SettingsError> {
        match self.read_document() {
            Ok(bytes) => {
                let mut settings: Settings = match from_slice(&bytes) {
                    Ok(settings) => settings,
                    Err(err) => return Err(self.fail(SettingsError::Decode(err))),
                };
                settings.backfill_defaults();
                debug!(
                    projects = settings.projects.len(),
                    tags = settings.tags.len(),
                    "Loaded settings document"
                );
                *self.settings.write() = settings;
            }
            Err(SettingsError::DocumentAbsent) => {
                info!(
                    "No settings document found, initializing {:?}",
                    self.config_dir
                );
                self.initialize();
            }
            Err(err) => return Err(self.fail(err)),
        }

        self.broadcast_event(&SettingsEvent::Loaded);
        Ok(())
    }

    /// Sets up a first-run environment.
    ///
    /// Creates the config directory, resets the snapshot to defaults and
    /// writes them without overwriting an existing document. Failures are
    /// reported and do not stop the caller.
    pub fn initialize(&self) {
        if let Err(source) = create_dir_all(&self.config_dir) {
            self.reporter.report(&SettingsError::DirectoryCreation {
                path: self.config_dir.clone(),
                source,
            });
        }

        let written = {
            let mut guard = self.settings.write();
            *guard = Settings::with_defaults();
            to_vec_pretty(&*guard)
                .map_err(SettingsError::Encode)
                .and_then(|data| {
                    self.backend
                        .create_raw(CONFIG_FILE, &data)
                        .map_err(|source| self.write_error(source))
                })
        };
        if let Err(err) = written {
            self.reporter.report(&err);
        }
    }

    /// Replaces the snapshot and overwrites the document.
    ///
    /// A write failure is reported, not returned: the new snapshot stays
    /// authoritative for the session either way.
    ///
    /// # Arguments
    ///
    /// * `settings` - The complete new settings.
    pub fn save(&self, settings: Settings) {
        let persisted = {
            let mut guard = self.settings.write();
            *guard = settings;
            guard.backfill_defaults();
            self.persist(&guard)
        };
        if let Err(err) = persisted {
            self.reporter.report(&err);
        }
        self.broadcast_event(&SettingsEvent::Saved);
    }

    /// Inserts or replaces a project entry and persists the result.
    ///
    /// The read-modify-write runs under the write lock, so concurrent
    /// updates never lose each other's entries.
    ///
    /// # Arguments
    ///
    /// * `project` - Project settings, keyed by `project.id`.
    pub fn update_project(&self, project: ProjectSettings) {
        let id = project.id.clone();
        let persisted = {
            let mut guard = self.settings.write();
            guard.projects.insert(id.clone(), project);
            self.persist(&guard)
        };
        if let Err(err) = persisted {
            self.reporter.report(&err);
        }
        debug!("Updated project {}", id);
        self.broadcast_event(&SettingsEvent::ProjectUpdated(id));
    }

    /// Gets a copy of the current snapshot.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Gets the active project.
    ///
    /// # Returns
    ///
    /// The entry keyed by the current project id, or an empty
    /// `ProjectSettings` when there is no such entry.
    #[must_use]
    pub fn current_project(&self) -> ProjectSettings {
        self.find_current_project().unwrap_or_default()
    }

    /// Gets the active project, distinguishing "none" from an empty entry.
    #[must_use]
    pub fn find_current_project(&self) -> Option<ProjectSettings> {
        self.settings.read().current_project().cloned()
    }

    /// `<platform config root>/renfield`
    #[must_use]
    pub fn config_directory(&self) -> &Path {
        &self.config_dir
    }

    /// Location of the settings document.
    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        self.backend.locate(CONFIG_FILE)
    }

    /// Cache directory reserved for the WASM runtime; never created here.
    #[must_use]
    pub fn wasm_cache_path(&self) -> PathBuf {
        paths::wasm_cache_path(&self.config_dir)
    }

    /// Scratch file path scoped to the active project.
    ///
    /// # Arguments
    ///
    /// * `name` - Purpose of the scratch file, e.g. `"json"`.
    ///
    /// # Returns
    ///
    /// `<config dir>/projects/<current project id>/<name>.tmp`. The parent
    /// directory is the caller's to create.
    #[must_use]
    pub fn temp_file_path(&self, name: &str) -> PathBuf {
        let settings = self.settings.read();
        paths::temp_file_path(&self.config_dir, &settings.current_project_id, name)
    }

    /// Subscribes to settings change events.
    ///
    /// # Returns
    ///
    /// A receiver for every event broadcast after this call.
    pub fn subscribe(&self) -> Receiver<SettingsEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.write().push(tx);
        rx
    }

    /// Encodes and writes the snapshot.
    ///
    /// Runs under the snapshot lock; callers report the error after
    /// releasing it.
    fn persist(&self, settings: &Settings) -> Result<(), SettingsError> {
        let data = to_vec_pretty(settings).map_err(SettingsError::Encode)?;
        self.backend
            .save_raw(CONFIG_FILE, &data)
            .map_err(|source| self.write_error(source))
    }

    /// Reads the raw document, mapping a missing one to `DocumentAbsent`.
    fn read_document(&self) -> Result<Vec<u8>, SettingsError> {
        self.backend
            .load_raw(CONFIG_FILE)
            .map_err(|source| match source {
                BackendError::NotFound => SettingsError::DocumentAbsent,
                source => SettingsError::Read {
                    path: self.document_path(),
                    source,
                },
            })
    }

    fn write_error(&self, source: BackendError) -> SettingsError {
        SettingsError::DocumentWrite {
            path: self.document_path(),
            source,
        }
    }

    /// Hands a fatal error to the reporter and returns it for propagation.
    fn fail(&self, error: SettingsError) -> SettingsError {
        self.reporter.fatal(&error);
        error
    }

    /// Sends an event to all subscribers, dropping closed channels.
    fn broadcast_event(&self, event: &SettingsEvent) {
        self.subscribers
            .write()
            .retain(|tx| tx.try_send(event.clone()).is_ok());
    }
}
