//! LLM Client Layer - GigaChat integration with an offline fallback
//!
//! This module provides:
//! - Message types for LLM communication
//! - LlmClient trait for API abstraction
//! - GigaChatClient (remote) and OfflineClient (deterministic) implementations
//! - Construction-time selection between the two

pub mod client;
pub mod gigachat;
pub mod offline;
pub mod types;

pub use client::{LlmClient, MockLlmClient, MockReply};
pub use gigachat::{GigaChatClient, GigaChatConfig};
pub use offline::OfflineClient;
pub use types::{
    CompletionRequest, CompletionResponse, Message, Role, ToolCallRecord, ToolCallRequest, ToolChoice,
    ToolDefinition,
};

use crate::config::LlmConfig;
use crate::error::Result;

/// Pick the client variant once, based on credential presence
pub fn create_client(config: &LlmConfig) -> Result<Box<dyn LlmClient>> {
    match config.credential() {
        Some(api_key) => {
            log::info!("GigaChat credential found, using {} at {}", config.model, config.api_url);
            let client = GigaChatClient::with_api_key(api_key, config.to_gigachat_config())?;
            Ok(Box::new(client))
        }
        None => {
            log::info!("No GigaChat credential in {}, running offline", config.api_key_env);
            Ok(Box::new(OfflineClient::new()))
        }
    }
}
