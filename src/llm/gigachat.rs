//! GigaChat API client implementation
//!
//! This module implements the LlmClient trait for the GigaChat chat-completions API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::error::{AssistantError, Result};
use crate::llm::client::LlmClient;
use crate::llm::types::{CompletionRequest, CompletionResponse, Message, Role, ToolCallRequest};

/// GigaChat chat-completions endpoint
pub const DEFAULT_API_URL: &str = "https://gigachat.devices.sberbank.ru/api/v1/chat/completions";

/// Default model to use
pub const DEFAULT_MODEL: &str = "GigaChat";

/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the GigaChat client
#[derive(Debug, Clone)]
pub struct GigaChatConfig {
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GigaChatConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GigaChatConfig {
    /// Create a new config pointing at a specific endpoint
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }
}

/// GigaChat API client
pub struct GigaChatClient {
    client: Client,
    api_key: String,
    config: GigaChatConfig,
}

impl GigaChatClient {
    /// Create a client with an explicit API key
    pub fn with_api_key(api_key: String, config: GigaChatConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssistantError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Build the request body for the chat-completions API
    fn build_request(&self, request: &CompletionRequest) -> Value {
        let messages: Vec<Value> = request.messages.iter().map(message_to_wire).collect();

        let mut body = json!({
            "model": self.config.model,
            "messages": messages
        });

        // Tools and tool_choice travel together; follow-up requests carry neither
        if !request.tools.is_empty() {
            let tools: Vec<Value> = request.tools.iter().map(|t| t.to_function_schema()).collect();
            body["tools"] = json!(tools);
            if let Some(choice) = request.tool_choice {
                body["tool_choice"] = json!(choice);
            }
        }

        body
    }

    /// Parse the API response into a CompletionResponse
    fn parse_response(&self, body: Value) -> Result<CompletionResponse> {
        let message = body["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .map(|choice| &choice["message"])
            .ok_or_else(|| AssistantError::InvalidResponse("response has no choices".to_string()))?;

        let content = message["content"].as_str().unwrap_or_default().to_string();

        let mut tool_calls = Vec::new();
        if let Some(calls) = message["tool_calls"].as_array() {
            for call in calls {
                let function = &call["function"];
                let Some(name) = function["name"].as_str() else {
                    log::warn!("Skipping tool call without a function name: {}", call);
                    continue;
                };
                let arguments = match &function["arguments"] {
                    Value::String(raw) => raw.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                tool_calls.push(ToolCallRequest::new(name, arguments));
            }
        }

        Ok(CompletionResponse {
            message: Message::assistant(content),
            tool_calls,
        })
    }

    /// Send a request to the GigaChat API
    async fn send_request(&self, body: Value) -> Result<Value> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            log::error!("GigaChat returned {}: {}", status, error_body);
            return Err(AssistantError::Transport {
                status: status.as_u16(),
                body: error_body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AssistantError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

/// Wire shape of a single conversation message
fn message_to_wire(message: &Message) -> Value {
    let mut wire = json!({
        "role": message.role,
        "content": message.content
    });
    if message.role == Role::Tool
        && let Some(name) = &message.tool_name
    {
        wire["name"] = json!(name);
    }
    wire
}

#[async_trait]
impl LlmClient for GigaChatClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        log::debug!(
            "GigaChat request: {} messages, {} tools",
            request.messages.len(),
            request.tools.len()
        );
        let body = self.build_request(&request);
        let response = self.send_request(body).await?;
        self.parse_response(response)
    }

    fn is_online(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

impl std::fmt::Debug for GigaChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GigaChatClient")
            .field("api_url", &self.config.api_url)
            .field("model", &self.config.model)
            .finish()
    }
}
