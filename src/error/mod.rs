//! Error handling built on `thiserror`.
//!
//! The domain error enum describes what went wrong; the operational side
//! decides what to do about it through an injectable reporter.

pub mod domain;
pub mod operational;

pub use {
    domain::SettingsError,
    operational::{DECODE_FAILURE_EXIT_CODE, FailureReporter, LogReporter, ProcessReporter},
};
