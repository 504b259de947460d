//! Mock backend for testing
//!
//! Returns a configurable canned reply and records every request it sees,
//! so tests can assert on what the session layer actually sent (window
//! size, system instruction, question) without a running model server.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::session::ConversationTurn;

use super::CompletionBackend;

/// One request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub system: String,
    /// Number of prior turns included in the request
    pub history_len: usize,
    pub question: String,
}

/// Mock completion backend for testing
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    reply: String,
    fail: bool,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            reply: "Mock answer.".to_string(),
            fail: false,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that always replies with `reply`
    pub fn with_reply(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            ..Self::new()
        }
    }

    /// Create a mock whose completions always fail
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::new()
        }
    }

    /// Snapshot of every request seen so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("mock request log poisoned").clone()
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn complete(
        &self,
        system: &str,
        history: &[ConversationTurn],
        question: &str,
    ) -> Result<String> {
        self.requests
            .lock()
            .expect("mock request log poisoned")
            .push(RecordedRequest {
                system: system.to_string(),
                history_len: history.len(),
                question: question.to_string(),
            });

        if self.fail {
            return Err(Error::Completion("mock backend configured to fail".into()));
        }
        Ok(self.reply.clone())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
