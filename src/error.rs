//! Error types for Careerist
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// All error types that can occur in Careerist
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Remote chat service answered with a non-success status
    #[error("GigaChat API error: {status} {body}")]
    Transport { status: u16, body: String },

    /// Request never produced a status (connect failure, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Remote answer could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Tool name is not registered
    #[error("Tool {0} is not registered")]
    ToolNotFound(String),

    /// Tool ran but failed
    #[error("Tool error: {0}")]
    Tool(String),

    /// Template group lookup failed
    #[error("Unknown template group: {0}")]
    UnknownGroup(String),

    /// Neither --text nor --file was supplied
    #[error("Нужно передать --text или --file")]
    MissingInput,

    /// Referenced file does not exist
    #[error("Файл {} не найден", .0.display())]
    FileNotFound(PathBuf),

    /// Text extraction from a document failed
    #[error("Document error: {0}")]
    Document(String),

    /// Configuration could not be built
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssistantError {
    /// Errors produced by the remote chat service or the wire to it
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Network(_))
    }
}

/// Result type alias for Careerist operations
pub type Result<T> = std::result::Result<T, AssistantError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_carries_status_and_body() {
        let err = AssistantError::Transport {
            status: 401,
            body: "{\"message\":\"unauthorized\"}".to_string(),
        };
        assert_eq!(err.to_string(), "GigaChat API error: 401 {\"message\":\"unauthorized\"}");
        assert!(err.is_transport());
    }

    #[test]
    fn test_network_error_is_transport() {
        assert!(AssistantError::Network("timed out".to_string()).is_transport());
        assert!(!AssistantError::MissingInput.is_transport());
    }

    #[test]
    fn test_tool_not_found_error() {
        let err = AssistantError::ToolNotFound("foo".to_string());
        assert_eq!(err.to_string(), "Tool foo is not registered");
    }

    #[test]
    fn test_file_not_found_error() {
        let err = AssistantError::FileNotFound(PathBuf::from("cv.pdf"));
        assert_eq!(err.to_string(), "Файл cv.pdf не найден");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AssistantError = io_err.into();
        assert!(matches!(err, AssistantError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(AssistantError::MissingInput)
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
