//! JSON pretty-printing with last-input recall.
//!
//! Every non-empty input is kept in the active project's `json.tmp`
//! scratch file so the JSON tools panel can restore it on the next start.

use std::{
    fs::{create_dir_all, read_to_string, write},
    iter::Peekable,
    str::Chars,
    sync::Arc,
};

use {
    serde::de::IgnoredAny,
    serde_json::{Error as SerdeJsonError, from_str},
    tracing::{debug, error},
};

use crate::{config::SettingsStore, error::SettingsError};

/// Returned by [`JsonFormatter::last_code`] when nothing was saved yet.
pub const NO_PRESET_CONTENT: &str = "-no preset content found-";

/// Scratch file name used for the last input.
const SCRATCH_NAME: &str = "json";

/// Formats JSON and remembers the last input per project.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    store: Arc<SettingsStore>,
}

impl JsonFormatter {
    /// Creates a formatter that scopes its scratch file through `store`.
    #[must_use]
    pub fn new(store: Arc<SettingsStore>) -> Self {
        Self { store }
    }

    /// Re-indents `input` using `indent` spaces per level.
    ///
    /// Only whitespace changes: number literals, string escapes, key order
    /// and duplicate keys are copied through as written. The raw input is
    /// written to the scratch file before formatting, so it is kept even when
    /// it is not valid JSON.
    ///
    /// # Arguments
    ///
    /// * `indent` - Number of spaces per nesting level.
    /// * `input` - JSON text to format.
    ///
    /// # Returns
    ///
    /// The formatted JSON, an empty string for empty input, or the parser's
    /// message when `input` is not valid JSON.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Io` if the scratch file cannot be written.
    pub fn prettify(&self, indent: usize, input: &str) -> Result<String, SettingsError> {
        if input.is_empty() {
            return Ok(String::new());
        }

        let scratch = self.store.temp_file_path(SCRATCH_NAME);
        if let Some(parent) = scratch.parent() {
            create_dir_all(parent)?;
        }
        debug!("Writing JSON scratch file {:?}", scratch);
        write(&scratch, input)?;

        match reindent(indent, input) {
            Ok(formatted) => Ok(formatted),
            Err(err) => {
                error!(error = %err, "Invalid JSON input");
                Ok(err.to_string())
            }
        }
    }

    /// Gets the last input saved for the active project.
    #[must_use]
    pub fn last_code(&self) -> String {
        read_to_string(self.store.temp_file_path(SCRATCH_NAME))
            .unwrap_or_else(|_| NO_PRESET_CONTENT.to_string())
    }
}

/// Validates `input`, then re-emits its tokens with fresh indentation.
fn reindent(indent: usize, input: &str) -> Result<String, SerdeJsonError> {
    from_str::<IgnoredAny>(input)?;

    let unit = " ".repeat(indent);
    let mut out = String::with_capacity(input.len() * 2);
    let mut chars = input.chars().peekable();
    let mut depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '"' => copy_string(&mut chars, &mut out),
            '{' | '[' => {
                out.push(c);
                skip_whitespace(&mut chars);
                // Empty containers stay on one line.
                if let Some(close) = chars.next_if(|&next| next == '}' || next == ']') {
                    out.push(close);
                } else {
                    depth += 1;
                    push_newline(&mut out, &unit, depth);
                }
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                push_newline(&mut out, &unit, depth);
                out.push(c);
            }
            ',' => {
                out.push(c);
                push_newline(&mut out, &unit, depth);
            }
            ':' => out.push_str(": "),
            ' ' | '\t' | '\n' | '\r' => {}
            _ => out.push(c),
        }
    }

    Ok(out)
}

/// Copies a string literal (opening quote already consumed) verbatim.
fn copy_string(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    out.push('"');
    let mut escaped = false;
    for c in chars.by_ref() {
        out.push(c);
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return;
        }
    }
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars
        .next_if(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
        .is_some()
    {}
}

fn push_newline(out: &mut String, unit: &str, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(unit);
    }
}
