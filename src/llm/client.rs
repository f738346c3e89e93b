//! Core LLM client trait and a scripted test double

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{AssistantError, Result};
use crate::llm::types::{CompletionRequest, CompletionResponse};

/// Chat-completion client. The variant is chosen once, at construction time.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Whether completions come from the remote service
    fn is_online(&self) -> bool;

    /// Model name used for requests
    fn model(&self) -> &str;
}

/// Shared clients, so a caller can keep a handle on the client it hands out
#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Arc<T> {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        (**self).complete(request).await
    }

    fn is_online(&self) -> bool {
        (**self).is_online()
    }

    fn model(&self) -> &str {
        (**self).model()
    }
}

/// Scripted reply for [`MockLlmClient`]
#[derive(Debug, Clone)]
pub enum MockReply {
    Response(CompletionResponse),
    Transport { status: u16, body: String },
}

/// Online client double that replays queued replies and records requests
#[derive(Debug, Default)]
pub struct MockLlmClient {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client pre-loaded with responses
    pub fn with_responses(responses: impl IntoIterator<Item = CompletionResponse>) -> Self {
        let client = Self::new();
        for response in responses {
            client.push(MockReply::Response(response));
        }
        client
    }

    pub fn push(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn remaining_replies(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AssistantError::InvalidResponse("MockLlmClient: no more replies in queue".to_string()))?;

        match reply {
            MockReply::Response(response) => Ok(response),
            MockReply::Transport { status, body } => Err(AssistantError::Transport { status, body }),
        }
    }

    fn is_online(&self) -> bool {
        true
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}
