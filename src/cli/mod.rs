//! CLI module for careerist - command-line interface and subcommands.

pub mod commands;

use std::fs;
use std::path::Path;

use careerist::{AssistantError, Result};

pub use commands::Cli;

/// Join `--text` and the contents of `--file` with a newline.
///
/// At least one of them is required; a named file must exist.
pub fn read_text_argument(text: Option<&str>, file: Option<&Path>) -> Result<String> {
    let mut chunks = Vec::new();

    if let Some(text) = text.filter(|t| !t.is_empty()) {
        chunks.push(text.to_string());
    }

    if let Some(path) = file {
        if !path.exists() {
            return Err(AssistantError::FileNotFound(path.to_path_buf()));
        }
        chunks.push(fs::read_to_string(path)?);
    }

    if chunks.is_empty() {
        return Err(AssistantError::MissingInput);
    }
    Ok(chunks.join("\n"))
}
