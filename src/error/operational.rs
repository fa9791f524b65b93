//! Operational failure reporting.
//!
//! Settings persistence is best-effort: most failures are logged and the
//! in-memory snapshot stays authoritative. An undecodable settings document
//! is the one fatal case. What "fatal" means is decided by the injected
//! [`FailureReporter`], so embedders and tests can intercept it instead of
//! having the process exit underneath them.

use std::{fmt::Debug, process::exit};

use tracing::{error, warn};

use crate::error::domain::SettingsError;

/// Exit status used when the settings document cannot be decoded.
pub const DECODE_FAILURE_EXIT_CODE: i32 = 2;

/// Strategy for surfacing settings failures.
///
/// The store never holds its snapshot lock while calling a reporter, so an
/// implementation may read the store (e.g. to show the active project).
pub trait FailureReporter: Debug + Send + Sync {
    /// Reports a recoverable failure; the operation carries on.
    fn report(&self, error: &SettingsError);

    /// Reports a failure that makes further operation unsafe.
    ///
    /// Implementations may terminate the process. If this returns, the
    /// caller propagates the error instead.
    fn fatal(&self, error: &SettingsError);
}

/// Logs every failure and terminates the process on fatal ones.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessReporter;

impl FailureReporter for ProcessReporter {
    fn report(&self, error: &SettingsError) {
        error!(error = %error, "Settings operation failed");
    }

    fn fatal(&self, error: &SettingsError) {
        error!(error = %error, "Settings document is unusable, exiting");
        exit(DECODE_FAILURE_EXIT_CODE);
    }
}

/// Logs every failure and never terminates the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl FailureReporter for LogReporter {
    fn report(&self, error: &SettingsError) {
        warn!(error = %error, "Settings operation failed");
    }

    fn fatal(&self, error: &SettingsError) {
        error!(error = %error, "Settings document is unusable");
    }
}
