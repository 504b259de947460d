//! Test utilities for finsight-core
//!
//! Provides a mock OpenAI-compatible completion server so integration tests
//! can exercise the real HTTP backend end to end without a model provider.

use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::sync::oneshot;

/// Mock completion server for testing and development
pub struct MockCompletionServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockCompletionServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        Self::spawn(Router::new()
            .route("/v1/models", get(handle_models))
            .route("/v1/chat/completions", post(handle_chat)))
        .await
    }

    /// Start a variant whose completion endpoint always returns HTTP 500
    pub async fn start_failing() -> Self {
        Self::spawn(Router::new()
            .route("/v1/models", get(handle_models))
            .route("/v1/chat/completions", post(handle_chat_failing)))
        .await
    }

    async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockCompletionServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    role: String,
    #[allow(dead_code)]
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    model: String,
    choices: Vec<Choice>,
}

#[derive(Debug, Serialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Serialize)]
struct ResponseMessage {
    role: String,
    content: String,
}

/// Models endpoint (health check)
async fn handle_models() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "object": "list",
        "data": [{ "id": "mock-model", "object": "model" }]
    }))
}

/// Chat completions endpoint
///
/// Replies with a deterministic string that encodes how many prior turns
/// the request carried, so tests can assert on history windowing through
/// the real wire format.
async fn handle_chat(Json(request): Json<ChatRequest>) -> Json<ChatResponse> {
    let prior_turns = request
        .messages
        .iter()
        .filter(|m| m.role == "assistant")
        .count();

    Json(ChatResponse {
        model: request.model,
        choices: vec![Choice {
            message: ResponseMessage {
                role: "assistant".to_string(),
                content: format!("mock reply after {} prior turns", prior_turns),
            },
        }],
    })
}

/// Chat completions endpoint that always fails
async fn handle_chat_failing() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "mock completion failure")
}
