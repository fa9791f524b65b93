//! Path derivation for the application config tree.
//!
//! Layout under the platform config root:
//!
//! ```text
//! renfield/
//!   config.json
//!   cache_wasm/
//!   projects/<project id>/<name>.tmp
//! ```

use std::path::{Path, PathBuf};

use crate::error::SettingsError;

/// Application subdirectory of the platform config root.
pub const APP_DIR: &str = "renfield";
/// Directory holding per-project scratch files.
pub const PROJECTS_DIR: &str = "projects";
/// Logical name of the settings document.
pub const CONFIG_FILE: &str = "config";
/// Extension of the settings document on disk.
pub const CONFIG_EXT: &str = "json";
/// Extension appended to scratch file names.
pub const TEMP_FILE_EXT: &str = ".tmp";
/// Cache directory used by the WASM runtime collaborator.
pub const WASM_CACHE_DIR: &str = "cache_wasm";

/// Resolves the platform user config root (e.g. `$XDG_CONFIG_HOME`).
///
/// # Errors
///
/// Returns `SettingsError::ConfigRootUnavailable` if the platform reports none.
pub fn platform_config_root() -> Result<PathBuf, SettingsError> {
    dirs::config_dir().ok_or(SettingsError::ConfigRootUnavailable)
}

/// `<root>/renfield`
#[must_use]
pub fn app_config_dir(root: &Path) -> PathBuf {
    root.join(APP_DIR)
}

/// `<config dir>/config.json`
#[must_use]
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(format!("{CONFIG_FILE}.{CONFIG_EXT}"))
}

/// `<config dir>/cache_wasm`
#[must_use]
pub fn wasm_cache_path(config_dir: &Path) -> PathBuf {
    config_dir.join(WASM_CACHE_DIR)
}

/// `<config dir>/projects/<project id>/<name>.tmp`
///
/// The parent directory is not created here.
#[must_use]
pub fn temp_file_path(config_dir: &Path, project_id: &str, name: &str) -> PathBuf {
    config_dir
        .join(PROJECTS_DIR)
        .join(project_id)
        .join(format!("{name}{TEMP_FILE_EXT}"))
}
