//! Renfield - settings store for a multi-project desktop tool
//!
//! Persists the user settings document (current project, per-project panel
//! state, color tags, tinker timeout) under the platform config directory,
//! serializes concurrent updates, and derives the per-project scratch paths
//! used by the JSON tools.

pub mod config;
pub mod error;
pub mod json;

// Re-export key types for convenience
pub use {
    config::{ProjectSettings, Settings, SettingsEvent, SettingsStore, Tag},
    error::{FailureReporter, LogReporter, ProcessReporter, SettingsError},
    json::JsonFormatter,
};
