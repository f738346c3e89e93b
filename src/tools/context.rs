//! Tool execution context

use std::path::Path;

use serde_json::Value;

use crate::documents::{self, DEFAULT_MAX_EXCERPT_CHARS};

/// Execution context shared by all tools of a registry
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Budget for excerpts of referenced documents
    pub max_excerpt_chars: usize,
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EXCERPT_CHARS)
    }
}

impl ToolContext {
    pub fn new(max_excerpt_chars: usize) -> Self {
        Self { max_excerpt_chars }
    }

    /// Excerpt of the document named by `pdf_path`, if the argument is present.
    ///
    /// The whole text is one chunk here, so its blank lines survive.
    pub async fn document_excerpt(&self, input: &Value) -> Result<Option<String>, eyre::Error> {
        let Some(path) = super::str_arg(input, "pdf_path") else {
            return Ok(None);
        };

        let text = documents::read_text(Path::new(path)).await?;
        Ok(Some(documents::excerpt([text.as_str()], self.max_excerpt_chars)))
    }
}
