//! Renfield settings bootstrap.
//!
//! Loads (or initializes) the user settings document and reports where it
//! lives. Log verbosity follows `RUST_LOG`.

use {anyhow::Context, tracing::info, tracing_subscriber::EnvFilter};

use renfield::SettingsStore;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = SettingsStore::new().context("Failed to locate the settings directory")?;
    store.load().context("Failed to load settings")?;

    let settings = store.settings();
    info!(
        config_dir = ?store.config_directory(),
        document = ?store.document_path(),
        "Settings loaded"
    );
    match store.find_current_project() {
        Some(project) => info!(id = %project.id, name = %project.name, "Current project"),
        None => info!("No current project selected"),
    }
    info!(
        projects = settings.projects.len(),
        tags = settings.tags.len(),
        tinker_timeout_secs = settings.tinker_timeout_seconds,
        "Settings summary"
    );

    Ok(())
}
