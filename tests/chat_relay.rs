//! Chat relay integration tests
//!
//! Drives the orchestrator end to end, once with a scripted client and once
//! with the real GigaChat client talking to a local stub server.

use std::sync::{Arc, Mutex};

use careerist::AssistantError;
use careerist::config::{Config, LlmConfig};
use careerist::llm::{
    CompletionResponse, GigaChatClient, GigaChatConfig, LlmClient, MockLlmClient, Role, ToolCallRequest,
};
use careerist::orchestrator::{OFFLINE_PREFIX, Orchestrator, TurnState};
use careerist::tools::ToolContext;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Canned HTTP reply served by the stub
struct StubReply {
    status: u16,
    body: String,
}

impl StubReply {
    fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    fn error(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Serve `replies` one per connection; returns the endpoint URL and the captured request bodies
async fn spawn_stub(replies: Vec<StubReply>) -> (String, Arc<Mutex<Vec<Value>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();

    tokio::spawn(async move {
        for reply in replies {
            let (mut socket, _) = listener.accept().await.unwrap();
            let body = read_request_body(&mut socket).await;
            sink.lock().unwrap().push(serde_json::from_slice(&body).unwrap_or(Value::Null));

            let response = format!(
                "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                reply.status,
                reply.body.len(),
                reply.body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
    });

    (format!("http://{}/api/v1/chat/completions", addr), captured)
}

async fn read_request_body(socket: &mut tokio::net::TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return Vec::new();
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        let body_start = header_end + 4;
        if buf.len() >= body_start + length {
            return buf[body_start..body_start + length].to_vec();
        }
    }
}

fn gigachat_orchestrator(url: String) -> Orchestrator {
    let client = GigaChatClient::with_api_key("test-key".to_string(), GigaChatConfig::with_api_url(url)).unwrap();
    Orchestrator::with_client(Box::new(client), ToolContext::default())
}

#[tokio::test]
async fn test_transport_error_aborts_turn() {
    let (url, _captured) = spawn_stub(vec![StubReply::error(500, "internal failure")]).await;
    let mut orchestrator = gigachat_orchestrator(url);

    let err = orchestrator.chat("Привет").await.unwrap_err();

    match err {
        AssistantError::Transport { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("internal failure"));
        }
        other => panic!("Expected transport error, got {:?}", other),
    }
    assert_eq!(orchestrator.history().len(), 1);
    assert_eq!(orchestrator.history()[0].role, Role::User);
    assert_eq!(orchestrator.state(), &TurnState::Idle);
}

#[tokio::test]
async fn test_gigachat_two_round_trips() {
    let first = serde_json::json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": "",
                "tool_calls": [{
                    "id": "call-1",
                    "type": "function",
                    "function": {
                        "name": "career_interview_qa",
                        "arguments": "{\"topic\": \"провал\"}"
                    }
                }]
            }
        }]
    });
    let second = serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": "Расскажи по схеме STAR." } }]
    });

    let (url, captured) = spawn_stub(vec![StubReply::ok(first), StubReply::ok(second)]).await;
    let mut orchestrator = gigachat_orchestrator(url);

    let reply = orchestrator.chat("Как рассказать о провале?").await.unwrap();

    assert_eq!(reply.answer, "Расскажи по схеме STAR.");
    assert_eq!(reply.used_tools.len(), 1);
    assert_eq!(reply.used_tools[0].name, "career_interview_qa");

    let bodies = captured.lock().unwrap().clone();
    assert_eq!(bodies.len(), 2);

    // First request advertises the tools
    assert_eq!(bodies[0]["tools"].as_array().unwrap().len(), 6);
    assert_eq!(bodies[0]["tool_choice"], "auto");
    assert_eq!(bodies[0]["messages"][0]["role"], "system");

    // Follow-up carries the tool output and no tool descriptors
    assert!(bodies[1].get("tools").is_none());
    assert!(bodies[1].get("tool_choice").is_none());
    let messages = bodies[1]["messages"].as_array().unwrap();
    let tool_message = messages.last().unwrap();
    assert_eq!(tool_message["role"], "tool");
    assert_eq!(tool_message["name"], "career_interview_qa");
    assert!(tool_message["content"].as_str().unwrap().contains("STAR"));
}

#[tokio::test]
async fn test_scripted_client_full_session() {
    let mock = Arc::new(MockLlmClient::with_responses(vec![
        CompletionResponse::with_tool_calls(
            "",
            vec![
                ToolCallRequest::new("learning_simple_explanations", r#"{"term": "docker"}"#),
                ToolCallRequest::new("foo", "{}"),
                ToolCallRequest::new("learning_career_paths", "not json"),
            ],
        ),
        CompletionResponse::text("Docker - это контейнер."),
        CompletionResponse::text("Пожалуйста!"),
    ]));
    let mut orchestrator = Orchestrator::with_client(Box::new(mock.clone()), ToolContext::default());

    let reply = orchestrator.chat("Объясни docker").await.unwrap();
    let names: Vec<&str> = reply.used_tools.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["learning_simple_explanations", "learning_career_paths"]);
    assert_eq!(reply.used_tools[1].arguments, serde_json::json!({}));

    let followup = &mock.requests()[1];
    let tool_names: Vec<&str> = followup
        .messages
        .iter()
        .filter(|m| m.role == Role::Tool)
        .filter_map(|m| m.tool_name.as_deref())
        .collect();
    assert_eq!(tool_names, vec!["learning_simple_explanations", "learning_career_paths"]);

    let reply = orchestrator.chat("Спасибо").await.unwrap();
    assert_eq!(reply.answer, "Пожалуйста!");
    assert!(reply.used_tools.is_empty());
    assert_eq!(mock.call_count(), 3);

    // user, assistant, tool, tool, assistant, user, assistant
    assert_eq!(orchestrator.history().len(), 7);
}

#[tokio::test]
async fn test_offline_orchestrator_from_config() {
    let config = Config {
        llm: LlmConfig {
            api_key_env: "CAREERIST_TEST_NEVER_SET_KEY".to_string(),
            api_key: None,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut orchestrator = Orchestrator::new(&config).unwrap();
    assert!(!orchestrator.is_online());

    let reply = orchestrator.chat("покажи примеры резюме").await.unwrap();
    assert!(reply.answer.starts_with(OFFLINE_PREFIX));
    assert_eq!(reply.used_tools.len(), 1);
    assert_eq!(reply.used_tools[0].name, "career_resume_examples");
}

#[test]
fn test_gigachat_client_reports_model() {
    let client = GigaChatClient::with_api_key(
        "key".to_string(),
        GigaChatConfig {
            model: "GigaChat-Pro".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(client.is_online());
    assert_eq!(client.model(), "GigaChat-Pro");
}
