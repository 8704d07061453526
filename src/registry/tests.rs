use super::*;
use crate::model::{GenerateRequest, StreamPart};

fn live_config() -> GatewayConfig {
    GatewayConfig {
        api_key: Some("sk-or-test".to_string()),
        ..GatewayConfig::default()
    }
}

fn test_config() -> GatewayConfig {
    GatewayConfig {
        test_mode: true,
        ..GatewayConfig::default()
    }
}

#[test]
fn test_every_role_resolves_in_test_mode() {
    let registry = ModelRegistry::build(&test_config()).unwrap();
    assert_eq!(registry.mode(), RegistryMode::Test);
    for role in Role::ALL {
        let handle = registry.resolve(role);
        assert!(handle.model_id().starts_with("mock/"));
    }
}

#[test]
fn test_every_role_resolves_in_live_mode() {
    let registry = ModelRegistry::build(&live_config()).unwrap();
    assert_eq!(registry.mode(), RegistryMode::Live);
    let ids: Vec<String> = registry
        .entries()
        .map(|(_, h)| h.model_id().to_string())
        .collect();
    assert_eq!(
        ids,
        vec![
            "z-ai/glm-4.5-air:free",
            "deepseek/deepseek-r1-0528:free",
            "qwen/qwen3-coder:free",
            "z-ai/glm-4.5-air:free",
        ]
    );
}

#[test]
fn test_test_mode_reasoning_is_distinct_double() {
    let registry = ModelRegistry::test_doubles();
    let chat = registry.resolve(Role::Chat);
    let reasoning = registry.resolve(Role::ChatReasoning);
    assert!(!Arc::ptr_eq(&chat, &reasoning));
    assert_eq!(reasoning.model_id(), "mock/chat-model-reasoning");
    assert_ne!(chat.model_id(), reasoning.model_id());
}

#[test]
fn test_mode_flag_changes_every_identity() {
    let test = ModelRegistry::build(&test_config()).unwrap();
    let live = ModelRegistry::build(&live_config()).unwrap();
    for role in Role::ALL {
        assert_ne!(
            test.resolve(role).model_id(),
            live.resolve(role).model_id(),
            "{role} leaked between modes"
        );
    }
}

#[test]
fn test_live_mode_without_key_fails() {
    let err = ModelRegistry::build(&GatewayConfig::default()).err().unwrap();
    assert!(matches!(err, GatewayError::MissingApiKey));
}

#[test]
fn test_test_mode_needs_no_key() {
    let config = GatewayConfig {
        api_key: None,
        ..test_config()
    };
    assert!(ModelRegistry::build(&config).is_ok());
}

#[test]
fn test_configured_model_ids_are_bound() {
    let mut config = live_config();
    config.models.title = "openai/gpt-4o-mini".to_string();
    let registry = ModelRegistry::build(&config).unwrap();
    assert_eq!(registry.resolve(Role::Title).model_id(), "openai/gpt-4o-mini");
}

#[test]
fn test_resolve_key() {
    let registry = ModelRegistry::test_doubles();
    let handle = registry.resolve_key("title-model").unwrap();
    assert_eq!(handle.model_id(), "mock/title-model");
    assert!(matches!(
        registry.resolve_key("embedding-model"),
        Err(GatewayError::UnknownRole(_))
    ));
}

#[test]
fn test_resolve_returns_shared_handle() {
    let registry = ModelRegistry::test_doubles();
    assert!(Arc::ptr_eq(
        &registry.resolve(Role::Artifact),
        &registry.resolve(Role::Artifact)
    ));
}

#[tokio::test]
async fn test_reasoning_double_streams_reasoning_first() {
    let registry = ModelRegistry::test_doubles();
    let mut parts: Vec<StreamPart> = Vec::new();
    let generation = registry
        .resolve(Role::ChatReasoning)
        .stream(&GenerateRequest::new("hello"), &mut parts)
        .await
        .unwrap();
    assert!(matches!(parts.first(), Some(StreamPart::Reasoning(_))));
    assert_eq!(generation.text, "Hello, world!");
}

#[test]
fn test_registry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ModelRegistry>();
}

/// Serves one OpenRouter-style SSE response on a local port and returns
/// the base URL to point the client at.
async fn serve_sse_once(events: Vec<String>) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Read the full request (headers plus body) before answering.
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if request.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }

        let mut body = String::new();
        for event in events {
            body.push_str(&format!("data: {event}\n\n"));
        }
        body.push_str("data: [DONE]\n\n");

        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n{body}"
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{addr}")
}

fn chunk(delta: serde_json::Value, finish_reason: Option<&str>) -> String {
    let mut event = serde_json::json!({
        "id": "gen-1",
        "provider": "local",
        "model": "deepseek/deepseek-r1-0528:free",
        "object": "chat.completion.chunk",
        "created": 1,
        "choices": [{
            "index": 0,
            "delta": delta,
            "finish_reason": finish_reason,
            "native_finish_reason": finish_reason,
        }],
    });
    if finish_reason.is_some() {
        event["usage"] = serde_json::json!({
            "prompt_tokens": 1,
            "completion_tokens": 2,
            "total_tokens": 3,
        });
    }
    event.to_string()
}

fn reasoning_events() -> Vec<String> {
    vec![
        chunk(
            serde_json::json!({"role": "assistant", "reasoning": "hmm let me think"}),
            None,
        ),
        chunk(serde_json::json!({"content": "Answer"}), None),
        chunk(serde_json::json!({}), Some("stop")),
    ]
}

#[tokio::test]
async fn test_live_reasoning_role_streams_provider_reasoning() {
    let base_url = serve_sse_once(reasoning_events()).await;
    let config = GatewayConfig {
        base_url: Some(base_url),
        ..live_config()
    };
    let registry = ModelRegistry::build(&config).unwrap();

    let mut parts: Vec<StreamPart> = Vec::new();
    let generation = registry
        .resolve(Role::ChatReasoning)
        .stream(&GenerateRequest::new("why?"), &mut parts)
        .await
        .unwrap();

    assert_eq!(generation.text, "Answer");
    assert_eq!(generation.reasoning.as_deref(), Some("hmm let me think"));
    assert!(parts.contains(&StreamPart::Reasoning("hmm let me think".to_string())));
}

#[tokio::test]
async fn test_live_generate_keeps_provider_reasoning() {
    let base_url = serve_sse_once(reasoning_events()).await;
    let config = GatewayConfig {
        base_url: Some(base_url),
        ..live_config()
    };
    let registry = ModelRegistry::build(&config).unwrap();

    let generation = registry
        .resolve(Role::ChatReasoning)
        .generate(&GenerateRequest::new("why?"))
        .await
        .unwrap();

    assert_eq!(generation.text, "Answer");
    assert_eq!(generation.reasoning.as_deref(), Some("hmm let me think"));
}
