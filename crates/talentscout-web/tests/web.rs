use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use talentscout_core::{ChatSession, LlmClient, LlmResponse, Persona, ScoutError, Turn};
use talentscout_web::{app, AppState};
use tower::ServiceExt;

/// Mock LLM that answers with a fixed reply, or fails when `fail` is set.
struct MockLlm {
    fail: bool,
}

#[async_trait::async_trait]
impl LlmClient for MockLlm {
    async fn send(&self, _prior: &[Turn], live_message: &str) -> Result<LlmResponse, ScoutError> {
        if self.fail {
            return Err(ScoutError::llm("network unreachable"));
        }
        Ok(LlmResponse {
            text: format!("echo: {live_message}"),
            usage: None,
        })
    }

    fn model(&self) -> &str {
        "mock"
    }
}

fn router(fail: bool) -> axum::Router {
    let client = Arc::new(MockLlm { fail });
    let session = ChatSession::new(client, Persona::hiring_assistant());
    app(AppState::new(session))
}

fn chat_request(message: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({ "message": message }).to_string()))
        .unwrap()
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_index_serves_page() {
    let res = router(false)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("TalentScout Hiring Platform"));
    assert!(html.contains("Say hello"));
}

#[tokio::test]
async fn test_chat_returns_reply_and_records_transcript() {
    let app = router(false);

    let res = app.clone().oneshot(chat_request("My name is Alex")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["reply"], "echo: My name is Alex");

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/transcript")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let turns = body_json(res).await;
    assert_eq!(
        turns,
        serde_json::json!([
            {"role": "user", "text": "My name is Alex"},
            {"role": "assistant", "text": "echo: My name is Alex"}
        ])
    );
}

#[tokio::test]
async fn test_chat_masks_remote_failure() {
    let app = router(true);

    let res = app.clone().oneshot(chat_request("Hi")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let reply = body_json(res).await["reply"].as_str().unwrap().to_string();
    assert!(reply.starts_with("Error:"));

    // Still usable afterwards.
    let res = app.oneshot(chat_request("Hello again")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_chat_rejects_blank_message() {
    let res = router(false).oneshot(chat_request("   ")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reset_clears_transcript() {
    let app = router(false);
    app.clone().oneshot(chat_request("Hi")).await.unwrap();

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/reset")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/transcript")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(res).await, serde_json::json!([]));
}
