//! Orchestrator - routes requests to the agents and relays chat turns
//!
//! A chat turn runs through an explicit state machine:
//!
//! ```text
//! Idle -> AwaitingFirstResponse -> ToolDispatch -> AwaitingFollowup -> Idle
//!                               \-------------------------------------/
//!                                      (no tool calls requested)
//! ```
//!
//! Offline clients never reach the state machine: tools are picked by keyword
//! and their outputs are summarized locally.

use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};

use crate::agents::{
    CareerAgent, DocumentFindings, DocumentKind, LearningAgent, Roadmap, RoadmapRequest, TemplateResult,
    VacancyReport,
};
use crate::config::Config;
use crate::documents::AttachedDocument;
use crate::error::Result;
use crate::llm::{CompletionRequest, LlmClient, Message, ToolCallRecord, ToolCallRequest, create_client};
use crate::tools::{ToolContext, ToolRegistry};

/// Fixed part of the system prompt
pub const SYSTEM_INSTRUCTION: &str = "Ты — карьерный помощник. Помогаешь с резюме, сопроводительными письмами, \
     вакансиями, собеседованиями и планами обучения. Отвечай по-русски, кратко и по делу. \
     Если инструмент может дать полезные данные, вызови его.";

/// Prefix of every answer produced without the remote service
pub const OFFLINE_PREFIX: &str = "GigaChat временно недоступен";

/// Keyword -> tool table for offline turns, checked in order
const OFFLINE_KEYWORDS: &[(&[&str], &str)] = &[
    (&["резюме", "resume", "cv"], "career_resume_examples"),
    (&["ваканс", "vacancy"], "career_vacancy_reviews"),
    (&["собеседован", "интервью", "interview"], "career_interview_qa"),
    (&["карьерный путь", "карьерные пути", "траектор", "career path"], "learning_career_paths"),
    (&["курс", "материал", "course", "material"], "learning_materials_with_reviews"),
    (&["объясни", "термин", "explain", "term"], "learning_simple_explanations"),
];

/// Where a chat turn currently is
#[derive(Debug, Clone, PartialEq)]
pub enum TurnState {
    /// No turn in progress
    Idle,
    /// First request (with tool descriptors) sent
    AwaitingFirstResponse,
    /// Running the tool calls the service asked for
    ToolDispatch(Vec<ToolCallRequest>),
    /// Follow-up request (no tool descriptors) sent
    AwaitingFollowup,
}

/// Result of one chat turn
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub answer: String,
    pub used_tools: Vec<ToolCallRecord>,
    pub attachments: Vec<String>,
}

/// Working data of a turn in flight
struct Turn {
    system: Message,
    ledger: Vec<ToolCallRecord>,
    answer: String,
}

/// Routes user intents to the agents and owns the chat session
pub struct Orchestrator {
    learning: LearningAgent,
    career: CareerAgent,
    registry: ToolRegistry,
    client: Box<dyn LlmClient>,
    history: Vec<Message>,
    attachments: Vec<AttachedDocument>,
    state: TurnState,
}

impl Orchestrator {
    /// Build from configuration; the client variant is fixed here
    pub fn new(config: &Config) -> Result<Self> {
        let client = create_client(&config.llm)?;
        let context = ToolContext::new(config.documents.max_excerpt_chars);
        Ok(Self::with_client(client, context))
    }

    /// Build around an existing client
    pub fn with_client(client: Box<dyn LlmClient>, context: ToolContext) -> Self {
        Self {
            learning: LearningAgent::new(),
            career: CareerAgent::new(),
            registry: ToolRegistry::standard(context),
            client,
            history: Vec::new(),
            attachments: Vec::new(),
            state: TurnState::Idle,
        }
    }

    pub fn create_roadmap(&self, direction: &str, current_level: &str, target_level: &str) -> Roadmap {
        let request = RoadmapRequest {
            direction: direction.to_string(),
            current_level: current_level.to_string(),
            target_level: target_level.to_string(),
        };
        self.learning.build_roadmap(&request)
    }

    pub fn fetch_templates(&self, group: Option<&str>) -> Result<Vec<TemplateResult>> {
        self.career.provide_templates(group)
    }

    pub fn review_document(&self, text: &str, kind: DocumentKind) -> DocumentFindings {
        self.career.analyze_document(text, kind)
    }

    pub fn review_vacancy(&self, text: &str) -> VacancyReport {
        self.career.analyze_vacancy(text)
    }

    /// Extract a document and keep its excerpt for the rest of the session
    pub fn attach_document(&mut self, path: &Path) -> Result<&AttachedDocument> {
        let document = AttachedDocument::load(path, self.registry.context().max_excerpt_chars)?;
        self.attachments.push(document);
        Ok(&self.attachments[self.attachments.len() - 1])
    }

    pub fn attachments(&self) -> &[AttachedDocument] {
        &self.attachments
    }

    /// Conversation so far, oldest first
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn is_online(&self) -> bool {
        self.client.is_online()
    }

    /// Run one chat turn.
    ///
    /// The user message is recorded before anything is sent, so it stays in
    /// history even when the turn fails.
    pub async fn chat(&mut self, user_text: &str) -> Result<ChatReply> {
        let mut turn = Turn {
            system: self.system_prompt(),
            ledger: Vec::new(),
            answer: String::new(),
        };
        self.history.push(Message::user(user_text));

        if self.client.is_online() {
            self.state = TurnState::AwaitingFirstResponse;
            loop {
                let state = std::mem::replace(&mut self.state, TurnState::Idle);
                if state == TurnState::Idle {
                    break;
                }
                self.state = self.step(state, &mut turn).await?;
            }
        } else {
            self.offline_turn(user_text, &mut turn).await?;
        }

        self.history.push(Message::assistant(turn.answer.clone()));
        log::info!(
            "Chat turn finished: {} tool call(s), {} chars",
            turn.ledger.len(),
            turn.answer.chars().count()
        );

        Ok(ChatReply {
            answer: turn.answer,
            used_tools: turn.ledger,
            attachments: self.attachments.iter().map(|d| d.name.clone()).collect(),
        })
    }

    /// Advance the relay by one state
    async fn step(&mut self, state: TurnState, turn: &mut Turn) -> Result<TurnState> {
        match state {
            TurnState::Idle => Ok(TurnState::Idle),
            TurnState::AwaitingFirstResponse => {
                let request = self.conversation(&turn.system).with_tools(self.registry.describe());
                let response = self.client.complete(request).await?;
                self.history.push(response.message.clone());

                if response.needs_tool_dispatch() {
                    log::debug!("Service requested {} tool call(s)", response.tool_calls.len());
                    Ok(TurnState::ToolDispatch(response.tool_calls))
                } else {
                    turn.answer = response.message.content;
                    Ok(TurnState::Idle)
                }
            }
            TurnState::ToolDispatch(calls) => {
                turn.ledger = self.dispatch_tool_calls(&calls).await;
                Ok(TurnState::AwaitingFollowup)
            }
            TurnState::AwaitingFollowup => {
                let response = self.client.complete(self.conversation(&turn.system)).await?;
                turn.answer = response.message.content;
                Ok(TurnState::Idle)
            }
        }
    }

    /// Run requested tool calls in order, one tool message per dispatched call
    async fn dispatch_tool_calls(&mut self, calls: &[ToolCallRequest]) -> Vec<ToolCallRecord> {
        let mut ledger = Vec::with_capacity(calls.len());

        for call in calls {
            if !self.registry.has_tool(&call.name) {
                log::warn!("Service asked for unknown tool {}, skipping", call.name);
                continue;
            }

            let arguments = call.parsed_arguments();
            let output = self.run_tool(&call.name, arguments.clone()).await;
            self.history.push(Message::tool(&call.name, output.to_string()));
            ledger.push(ToolCallRecord {
                name: call.name.clone(),
                arguments,
                output,
            });
        }

        ledger
    }

    /// Invoke a tool; failures become an `{"error": ...}` output
    async fn run_tool(&self, name: &str, arguments: Value) -> Value {
        match self.registry.invoke(name, arguments).await {
            Ok(output) => output,
            Err(e) => {
                log::warn!("Tool {} failed: {}", name, e);
                json!({ "error": e.to_string() })
            }
        }
    }

    async fn offline_turn(&mut self, user_text: &str, turn: &mut Turn) -> Result<()> {
        let selected = select_offline_tools(user_text);
        log::debug!("Offline turn, selected tools: {:?}", selected);

        for name in selected {
            let arguments = json!({});
            let output = self.run_tool(name, arguments.clone()).await;
            turn.ledger.push(ToolCallRecord {
                name: name.to_string(),
                arguments,
                output,
            });
        }

        turn.answer = if turn.ledger.is_empty() {
            let response = self.client.complete(self.conversation(&turn.system)).await?;
            format!("{}.\n\n{}", OFFLINE_PREFIX, response.message.content)
        } else {
            format!(
                "{}, вот что есть в локальной базе:\n\n{}",
                OFFLINE_PREFIX,
                summarize_outputs(&turn.ledger)
            )
        };
        Ok(())
    }

    /// System prompt followed by the full history
    fn conversation(&self, system: &Message) -> CompletionRequest {
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        messages.push(system.clone());
        messages.extend(self.history.iter().cloned());
        CompletionRequest::new(messages)
    }

    fn system_prompt(&self) -> Message {
        let mut prompt = SYSTEM_INSTRUCTION.to_string();
        if !self.attachments.is_empty() {
            prompt.push_str("\n\nПрикреплённые документы:");
            for document in &self.attachments {
                prompt.push_str(&format!("\n\n[{}]\n{}", document.name, document.excerpt));
            }
        }
        Message::system(prompt)
    }
}

/// Tools whose keywords occur in the user text, in table order
pub fn select_offline_tools(user_text: &str) -> Vec<&'static str> {
    let text = user_text.to_lowercase();
    OFFLINE_KEYWORDS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, tool)| *tool)
        .collect()
}

/// Readable text for a set of tool outputs
pub fn summarize_outputs(records: &[ToolCallRecord]) -> String {
    records
        .iter()
        .map(|record| {
            let mut section = format!("[{}]", record.name);
            render_value(&record.output, 0, &mut section);
            section
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_value(value: &Value, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, item) in map {
                match item {
                    Value::Null => {}
                    Value::Object(_) | Value::Array(_) => {
                        out.push_str(&format!("\n{}{}:", indent, key));
                        render_value(item, depth + 1, out);
                    }
                    _ => out.push_str(&format!("\n{}{}: {}", indent, key, scalar(item))),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Object(_) | Value::Array(_) => {
                        out.push_str(&format!("\n{}-", indent));
                        render_value(item, depth + 1, out);
                    }
                    _ => out.push_str(&format!("\n{}- {}", indent, scalar(item))),
                }
            }
        }
        _ => out.push_str(&format!("\n{}{}", indent, scalar(value))),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
