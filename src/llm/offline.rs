//! Offline stand-in used when no GigaChat credential is configured

use async_trait::async_trait;

use crate::error::Result;
use crate::llm::client::LlmClient;
use crate::llm::types::{CompletionRequest, CompletionResponse};

/// Characters of the user's request echoed back
const ECHO_CHARS: usize = 400;

/// Deterministic client: same last user message, same answer. Never calls tools.
#[derive(Debug, Clone, Default)]
pub struct OfflineClient;

impl OfflineClient {
    pub fn new() -> Self {
        Self
    }

    /// Canned answer for a user request
    pub fn answer_for(user_text: &str) -> String {
        let summary: String = user_text.chars().take(ECHO_CHARS).collect();
        format!(
            "(GigaChat offline) Я сохранил контекст сообщения и могу использовать локальные инструменты. Запрос: {}",
            summary
        )
    }
}

#[async_trait]
impl LlmClient for OfflineClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let user_text = request
            .last_user_message()
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        Ok(CompletionResponse::text(Self::answer_for(user_text)))
    }

    fn is_online(&self) -> bool {
        false
    }

    fn model(&self) -> &str {
        "offline"
    }
}
