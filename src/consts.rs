//! Project-wide constants.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Where the rewriting service listens when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/rewrite";

/// Shown when the request went out but nothing came back.
pub const UNREACHABLE_MESSAGE: &str = "Error: Could not reach the backend server. Is it running?";

/// Loading indicator text.
pub const LOADING_MESSAGE: &str = "Loading results...";

/// Spinner label while a submission is in flight.
pub const SUBMITTING_LABEL: &str = "Rewriting...";

/// Shown before anything has been submitted.
pub const PLACEHOLDER_PROMPT: &str =
    "Enter an email and run /rewrite to see the results here.";

pub const NO_SUBJECT_PLACEHOLDER: &str = "(No subject rewritten)";
pub const NO_BODY_PLACEHOLDER: &str = "(No body rewritten)";
pub const NO_NOTES_PLACEHOLDER: &str = "(No cultural notes provided)";

/// Default database path: `~/.parley/parley.db`.
pub fn default_db_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".parley").join("parley.db"))
}
