//! User settings, their persistence, and the paths derived from them.
//!
//! The store keeps one live settings snapshot per process and persists it as
//! a JSON document under the platform config directory.

pub mod backend;
pub mod paths;
pub mod settings;
pub mod store;


pub use {
    backend::{BackendError, DocumentBackend, JsonFileBackend},
    settings::{
        DEFAULT_TINKER_TIMEOUT_SECS, JsonToolsPanelState, ProjectSettings, Settings, Tab, Tag,
        TinkerPanelState,
    },
    store::{SettingsEvent, SettingsStore},
};
