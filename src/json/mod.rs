//! JSON tools backed by per-project scratch files.

pub mod prettifier;

pub use prettifier::{JsonFormatter, NO_PRESET_CONTENT};
