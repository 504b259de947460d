//! Pluggable completion backend abstraction
//!
//! The conversational layer only needs one operation from a model provider:
//! turn (system instruction, prior turns, new question) into a reply string.
//! This module keeps that boundary backend-agnostic.
//!
//! # Architecture
//!
//! - `CompletionBackend` trait: the request/response contract
//! - `CompletionClient` enum: concrete wrapper providing Clone + compile-time
//!   dispatch
//! - Backend implementations: `OpenAICompatibleBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `FINSIGHT_BACKEND`: Backend to use (groq, openai_compatible, mock).
//!   Default: groq
//! - `GROQ_API_KEY`: API key for the Groq backend (required for groq)
//! - `GROQ_MODEL`: Model name (default: llama-3.3-70b-versatile)
//! - `OPENAI_COMPATIBLE_HOST`: Server URL (required for openai_compatible)
//! - `OPENAI_COMPATIBLE_MODEL`: Model name (default: gpt-3.5-turbo)
//! - `OPENAI_COMPATIBLE_API_KEY`: API key if required (optional)

mod mock;
mod openai_compatible;

pub use mock::{MockBackend, RecordedRequest};
pub use openai_compatible::OpenAICompatibleBackend;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::session::ConversationTurn;

/// Default Groq model, per the original FinSight deployment
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Trait defining the completion-service contract
///
/// The reply string is used verbatim by the caller; an empty reply is a
/// valid (if unhelpful) answer. Backends must be Send + Sync to allow use
/// across async tasks.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Produce a reply for `question`, given the fixed system instruction
    /// and the windowed prior turns in chronological order
    async fn complete(
        &self,
        system: &str,
        history: &[ConversationTurn],
        question: &str,
    ) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete completion client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum CompletionClient {
    /// Any server implementing the OpenAI chat completions API
    /// (Groq, vLLM, LocalAI, llama-server, etc.)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl CompletionClient {
    /// Create a completion client from environment variables
    ///
    /// Checks `FINSIGHT_BACKEND` to determine which backend to use:
    /// - `groq` (default): Groq's OpenAI-compatible endpoint, requires
    ///   GROQ_API_KEY
    /// - `openai_compatible`: Uses OPENAI_COMPATIBLE_HOST and
    ///   OPENAI_COMPATIBLE_MODEL
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Credential problems surface here, before any session exists, as
    /// [`Error::MissingCredential`].
    pub fn from_env() -> Result<Self> {
        let backend = std::env::var("FINSIGHT_BACKEND").unwrap_or_else(|_| "groq".to_string());

        match backend.to_lowercase().as_str() {
            "groq" => {
                let api_key = std::env::var("GROQ_API_KEY").map_err(|_| {
                    Error::MissingCredential(
                        "GROQ_API_KEY is not set. Add it to your environment: \
                         GROQ_API_KEY=your_key_here"
                            .into(),
                    )
                })?;
                let model =
                    std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_GROQ_MODEL.to_string());
                Ok(CompletionClient::OpenAICompatible(
                    OpenAICompatibleBackend::groq(&api_key, &model),
                ))
            }
            "openai_compatible" | "openai" | "vllm" | "localai" | "llamacpp" => {
                let host = std::env::var("OPENAI_COMPATIBLE_HOST").map_err(|_| {
                    Error::MissingCredential("OPENAI_COMPATIBLE_HOST is not set".into())
                })?;
                let model = std::env::var("OPENAI_COMPATIBLE_MODEL")
                    .unwrap_or_else(|_| "gpt-3.5-turbo".to_string());
                let backend = match std::env::var("OPENAI_COMPATIBLE_API_KEY") {
                    Ok(key) => OpenAICompatibleBackend::with_api_key(&host, &model, &key),
                    Err(_) => OpenAICompatibleBackend::new(&host, &model),
                };
                Ok(CompletionClient::OpenAICompatible(backend))
            }
            "mock" => Ok(CompletionClient::Mock(MockBackend::new())),
            other => Err(Error::InvalidData(format!(
                "Unknown FINSIGHT_BACKEND: {}",
                other
            ))),
        }
    }

    /// Create a Groq-backed client directly
    pub fn groq(api_key: &str, model: &str) -> Self {
        CompletionClient::OpenAICompatible(OpenAICompatibleBackend::groq(api_key, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        CompletionClient::Mock(MockBackend::new())
    }
}

// Implement CompletionBackend for CompletionClient by delegating to the
// inner backend
#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(
        &self,
        system: &str,
        history: &[ConversationTurn],
        question: &str,
    ) -> Result<String> {
        match self {
            CompletionClient::OpenAICompatible(b) => b.complete(system, history, question).await,
            CompletionClient::Mock(b) => b.complete(system, history, question).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            CompletionClient::OpenAICompatible(b) => b.health_check().await,
            CompletionClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            CompletionClient::OpenAICompatible(b) => b.model(),
            CompletionClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            CompletionClient::OpenAICompatible(b) => b.host(),
            CompletionClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_client_identity() {
        let client = CompletionClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = CompletionClient::mock();
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_complete_roundtrip() {
        let client = CompletionClient::mock();
        let reply = client
            .complete("system", &[], "What did I spend?")
            .await
            .unwrap();
        assert!(!reply.is_empty());
    }
}
