//! Document text extraction and bounded excerpts
//!
//! PDFs go through `pdf-extract`; anything else is read as UTF-8 text.
//! Excerpts are what the chat relay embeds in its system prompt.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AssistantError, Result};

/// Default excerpt budget, in characters
pub const DEFAULT_MAX_EXCERPT_CHARS: usize = 2000;

/// A document attached to a chat session
#[derive(Debug, Clone, Serialize)]
pub struct AttachedDocument {
    pub name: String,
    pub path: PathBuf,
    pub excerpt: String,
    pub attached_at: DateTime<Utc>,
}

impl AttachedDocument {
    /// Extract the document and keep a bounded excerpt of it
    pub fn load(path: &Path, max_chars: usize) -> Result<Self> {
        let text = extract_text(path)?;
        let excerpt = excerpt(paragraphs(&text), max_chars);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        log::info!(
            "Attached {} ({} chars extracted, {} kept)",
            name,
            text.chars().count(),
            excerpt.chars().count()
        );

        Ok(Self {
            name,
            path: path.to_path_buf(),
            excerpt,
            attached_at: Utc::now(),
        })
    }
}

/// Extract plain text from a document
pub fn extract_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(AssistantError::FileNotFound(path.to_path_buf()));
    }

    if is_pdf(path) {
        pdf_extract::extract_text(path)
            .map_err(|e| AssistantError::Document(format!("Failed to read PDF {}: {}", path.display(), e)))
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Async variant of [`extract_text`] for callers on the runtime.
///
/// Text files go through `tokio::fs`; PDF parsing runs on the blocking pool.
pub async fn read_text(path: &Path) -> Result<String> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(AssistantError::FileNotFound(path.to_path_buf()));
    }

    if is_pdf(path) {
        let owned = path.to_path_buf();
        tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
            .await
            .map_err(|e| AssistantError::Document(format!("PDF extraction task failed for {}: {}", path.display(), e)))?
            .map_err(|e| AssistantError::Document(format!("Failed to read PDF {}: {}", path.display(), e)))
    } else {
        Ok(tokio::fs::read_to_string(path).await?)
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Blank-line separated blocks of a document
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split("\n\n")
}

/// Join non-empty trimmed segments with `\n` until `max_chars` is spent.
///
/// The segment that crosses the budget is cut, not dropped. Separators count
/// against the budget, so the result is never longer than `max_chars`.
pub fn excerpt<I, S>(chunks: I, max_chars: usize) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buffer = String::new();
    let mut total = 0;

    for chunk in chunks {
        let chunk = chunk.as_ref().trim();
        if chunk.is_empty() {
            continue;
        }

        let separator = usize::from(total > 0);
        let remaining = max_chars.saturating_sub(total + separator);
        if remaining == 0 {
            break;
        }

        if separator == 1 {
            buffer.push('\n');
        }

        let len = chunk.chars().count();
        if len > remaining {
            buffer.extend(chunk.chars().take(remaining));
            break;
        }

        buffer.push_str(chunk);
        total += separator + len;
    }

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_excerpt_joins_non_empty_trimmed_chunks() {
        let result = excerpt(["  first  ", "", "   ", "second"], 100);
        assert_eq!(result, "first\nsecond");
    }

    #[test]
    fn test_excerpt_truncates_final_chunk() {
        let result = excerpt(["abcde", "fghij"], 8);
        // 5 + separator + 2 of the second chunk
        assert_eq!(result, "abcde\nfg");
        assert_eq!(result.chars().count(), 8);
    }

    #[test]
    fn test_excerpt_never_exceeds_budget() {
        let huge = "слово ".repeat(10_000);
        let chunks = vec![huge.clone(), huge.clone(), "tail".to_string()];
        for budget in [0, 1, 2, 7, 100, 2000] {
            let result = excerpt(&chunks, budget);
            assert!(result.chars().count() <= budget, "budget {budget}");
        }
    }

    #[test]
    fn test_excerpt_empty_inputs() {
        assert_eq!(excerpt(Vec::<String>::new(), 2000), "");
        assert_eq!(excerpt(["", "  \n "], 2000), "");
        assert_eq!(excerpt(["text"], 0), "");
    }

    #[test]
    fn test_excerpt_separator_exhausts_budget() {
        // first chunk fills the budget exactly, nothing else fits
        assert_eq!(excerpt(["abc", "def"], 3), "abc");
        assert_eq!(excerpt(["abc", "def"], 4), "abc");
    }

    #[test]
    fn test_extract_text_plain_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Иван Петров\n\nОпыт: 3 года").unwrap();

        assert_eq!(extract_text(&path).unwrap(), "Иван Петров\n\nОпыт: 3 года");
    }

    #[test]
    fn test_extract_text_missing_file() {
        let err = extract_text(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, AssistantError::FileNotFound(_)));
    }

    #[test]
    fn test_extract_text_broken_pdf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.PDF");
        std::fs::write(&path, "not a pdf at all").unwrap();

        let err = extract_text(&path).unwrap_err();
        assert!(matches!(err, AssistantError::Document(_)));
    }

    #[tokio::test]
    async fn test_read_text_plain_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vacancy.txt");
        tokio::fs::write(&path, "Требования:\n\nRust").await.unwrap();

        assert_eq!(read_text(&path).await.unwrap(), "Требования:\n\nRust");
    }

    #[tokio::test]
    async fn test_read_text_missing_file() {
        let err = read_text(Path::new("/definitely/not/here.txt")).await.unwrap_err();
        assert!(matches!(err, AssistantError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_read_text_broken_pdf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        tokio::fs::write(&path, "not a pdf at all").await.unwrap();

        let err = read_text(&path).await.unwrap_err();
        assert!(matches!(err, AssistantError::Document(_)));
    }

    #[test]
    fn test_attached_document_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cover.md");
        std::fs::write(&path, "Здравствуйте!\n\n\n\nХочу работать у вас.\n").unwrap();

        let doc = AttachedDocument::load(&path, 2000).unwrap();
        assert_eq!(doc.name, "cover.md");
        assert_eq!(doc.excerpt, "Здравствуйте!\nХочу работать у вас.");
    }

    #[test]
    fn test_attached_document_respects_budget() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("long.txt");
        std::fs::write(&path, "абв ".repeat(5000)).unwrap();

        let doc = AttachedDocument::load(&path, 50).unwrap();
        assert_eq!(doc.excerpt.chars().count(), 50);
    }
}
