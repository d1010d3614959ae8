use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use talentscout_core::{ChatSession, Turn};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// State shared across HTTP handlers.
///
/// There is a single conversation per process; concurrent requests queue on the mutex
/// so only one remote call is in flight at a time.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<ChatSession>>,
}

impl AppState {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Serve the embedded chat page.
pub async fn index() -> Html<&'static str> {
    static INDEX: &str = include_str!("../assets/index.html");
    Html(INDEX)
}

/// Submit one user message. Remote failures still answer `200` with an `Error: ...`
/// reply, since that text is what the page shows.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, String)> {
    if req.message.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "message must not be empty".into()));
    }

    debug!("user message: {} chars", req.message.len());
    let mut session = state.session.lock().await;
    let reply = session.submit(req.message).await;
    Ok(Json(ChatReply { reply }))
}

pub async fn transcript(State(state): State<AppState>) -> Json<Vec<Turn>> {
    let session = state.session.lock().await;
    Json(session.transcript().turns().to_vec())
}

pub async fn reset(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.reset();
    info!("conversation reset");
    StatusCode::NO_CONTENT
}

/// Build the application router with the provided state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/chat", post(chat))
        .route("/api/transcript", get(transcript))
        .route("/api/reset", post(reset))
        .with_state(state)
}
