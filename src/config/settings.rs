//! Settings data model.
//!
//! The persisted document is JSON with lower-case keys. Every field is
//! optional on read, so `{}` decodes into an empty [`Settings`].

use std::collections::BTreeMap;

use {
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

/// Timeout applied when the document carries none (or zero).
pub const DEFAULT_TINKER_TIMEOUT_SECS: i64 = 30;

/// The whole user settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Id of the active project; empty when none is selected.
    #[serde(rename = "currentproject")]
    pub current_project_id: String,
    /// Per-project settings keyed by project id.
    pub projects: BTreeMap<String, ProjectSettings>,
    /// Reusable label definitions.
    pub tags: Vec<Tag>,
    /// Tinker execution timeout in seconds. Only zero means "unset".
    #[serde(rename = "tinkertimeout")]
    pub tinker_timeout_seconds: i64,
}

impl Settings {
    /// Settings seeded for a first run.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut settings = Self::default();
        settings.backfill_defaults();
        settings
    }

    /// Replaces zero-valued fields that must never be persisted as zero.
    pub fn backfill_defaults(&mut self) {
        if self.tinker_timeout_seconds == 0 {
            self.tinker_timeout_seconds = DEFAULT_TINKER_TIMEOUT_SECS;
        }
    }

    /// Looks up the active project, if it exists.
    #[must_use]
    pub fn current_project(&self) -> Option<&ProjectSettings> {
        self.projects.get(&self.current_project_id)
    }
}

/// Settings owned by a single project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    pub id: String,
    pub name: String,
    pub path: String,
    /// Label of a [`Tag`], matched by value.
    pub tag: String,
    pub command: String,
    pub tinker: TinkerPanelState,
    #[serde(rename = "jsontools")]
    pub json_tools: JsonToolsPanelState,
}

/// UI state of the tinker panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TinkerPanelState {
    pub tabs: Vec<Tab>,
    #[serde(rename = "activetab")]
    pub active_tab: String,
}

/// UI state of the JSON tools panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonToolsPanelState {
    pub tabs: Vec<Tab>,
    #[serde(rename = "activetab")]
    pub active_tab: String,
    #[serde(rename = "activetool")]
    pub active_tool: String,
    pub filter: String,
}

/// Editor buffer descriptor, stored verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tab(pub Value);

/// A label and its display color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub label: String,
    pub color: String,
}
