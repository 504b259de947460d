//! Conversational session management
//!
//! A [`ChatSession`] binds one immutable context block to a growing
//! conversation and mediates every exchange with the completion backend.
//! The full history is retained for inspection, but only the most recent
//! `max_turns` turns are ever sent with a request.
//!
//! A turn is appended atomically, question and answer together, only after
//! a reply is obtained. A failed completion call leaves the history exactly
//! as it was, so per-turn errors are recoverable without losing the
//! conversation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::{CompletionBackend, CompletionClient};
use crate::error::Result;

/// Reply for a blank question; no backend call is made for these
pub const EMPTY_QUESTION_REPLY: &str = "Please ask me something about your finances!";

/// One question/answer exchange, the atomic unit of history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub question: String,
    pub answer: String,
}

/// Session tunables, fixed at construction
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Max number of full turns (question + answer pairs) sent per request
    pub max_turns: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_turns: 10 }
    }
}

/// A bounded conversation over one context-block snapshot
///
/// The `&mut self` receiver on [`ask`](Self::ask) serializes calls per
/// instance; callers owning multiple logical conversations use one session
/// each. The context block is immutable for the session's lifetime.
pub struct ChatSession {
    client: CompletionClient,
    system_prompt: String,
    history: Vec<ConversationTurn>,
    max_turns: usize,
}

impl ChatSession {
    /// Create a session around `context_block`
    pub fn new(client: CompletionClient, context_block: &str, config: SessionConfig) -> Self {
        Self {
            client,
            system_prompt: build_system_prompt(context_block),
            history: Vec::new(),
            max_turns: config.max_turns,
        }
    }

    /// Send a question and return the reply
    ///
    /// A blank question short-circuits with [`EMPTY_QUESTION_REPLY`] and
    /// touches neither the backend nor the history. The backend's reply is
    /// used verbatim; an empty string is a valid answer.
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        if question.trim().is_empty() {
            return Ok(EMPTY_QUESTION_REPLY.to_string());
        }

        let window = self.context_window();
        debug!(
            window = window.len(),
            stored = self.history.len(),
            "Sending chat turn"
        );
        let answer = self.client.complete(&self.system_prompt, window, question).await?;

        self.history.push(ConversationTurn {
            question: question.to_string(),
            answer: answer.clone(),
        });
        Ok(answer)
    }

    /// Reset the conversation; the bound context block is unaffected
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Full untruncated history, oldest first
    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    /// The suffix of history that the next request would carry
    pub fn context_window(&self) -> &[ConversationTurn] {
        let start = self.history.len().saturating_sub(self.max_turns);
        &self.history[start..]
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// The fixed system instruction, context block included
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

/// Build the fixed system instruction around the context block
///
/// The directives pin the model to the embedded figures: answer only from
/// the data, never fabricate numbers, admit when the data cannot answer.
pub fn build_system_prompt(context_block: &str) -> String {
    format!(
        "You are FinSight, a sharp and friendly personal finance analyst.\n\
         You have been given a complete summary of the user's transaction data below.\n\
         Use ONLY this data when answering factual questions. Never guess or make up numbers.\n\
         \n\
         When explaining trends, speak like a financial storyteller: \
         be concise, insightful, and occasionally point out surprising patterns.\n\
         If the user asks something the data cannot answer, say so honestly.\n\
         \n\
         --- DATA SUMMARY ---\n\
         {}\n\
         --- END OF DATA SUMMARY ---",
        context_block
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockBackend;

    fn session_with(mock: MockBackend, max_turns: usize) -> ChatSession {
        ChatSession::new(
            CompletionClient::Mock(mock),
            "CONTEXT",
            SessionConfig { max_turns },
        )
    }

    #[tokio::test]
    async fn test_blank_question_short_circuits() {
        let mock = MockBackend::new();
        let mut session = session_with(mock.clone(), 10);

        assert_eq!(session.ask("").await.unwrap(), EMPTY_QUESTION_REPLY);
        assert_eq!(session.ask("   ").await.unwrap(), EMPTY_QUESTION_REPLY);
        assert_eq!(session.ask("\n\t").await.unwrap(), EMPTY_QUESTION_REPLY);

        assert!(session.history().is_empty());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_successful_ask_appends_one_turn() {
        let mock = MockBackend::with_reply("You spent a lot.");
        let mut session = session_with(mock.clone(), 10);

        let answer = session.ask("How much did I spend?").await.unwrap();
        assert_eq!(answer, "You spent a lot.");
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].question, "How much did I spend?");
        assert_eq!(session.history()[0].answer, "You spent a lot.");
    }

    #[tokio::test]
    async fn test_system_prompt_embeds_context_block() {
        let mock = MockBackend::new();
        let mut session = session_with(mock.clone(), 10);
        session.ask("hi").await.unwrap();

        let requests = mock.requests();
        assert!(requests[0].system.contains("--- DATA SUMMARY ---"));
        assert!(requests[0].system.contains("CONTEXT"));
        assert!(requests[0].system.contains("--- END OF DATA SUMMARY ---"));
    }

    #[tokio::test]
    async fn test_window_caps_sent_history() {
        let mock = MockBackend::new();
        let mut session = session_with(mock.clone(), 10);

        for i in 0..25 {
            session.ask(&format!("question {}", i)).await.unwrap();
        }

        // Storage keeps everything; the wire sees at most max_turns.
        assert_eq!(session.history().len(), 25);
        let requests = mock.requests();
        assert_eq!(requests.len(), 25);
        assert_eq!(requests[0].history_len, 0);
        assert_eq!(requests[10].history_len, 10);
        assert_eq!(requests[24].history_len, 10);
        assert!(requests.iter().all(|r| r.history_len <= 10));
    }

    #[tokio::test]
    async fn test_window_sends_most_recent_turns() {
        let mock = MockBackend::new();
        let mut session = session_with(mock, 2);

        for q in ["first", "second", "third"] {
            session.ask(q).await.unwrap();
        }
        let window = session.context_window();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].question, "second");
        assert_eq!(window[1].question, "third");
    }

    #[tokio::test]
    async fn test_failure_leaves_history_unchanged() {
        let ok = MockBackend::new();
        let mut session = session_with(ok, 10);
        session.ask("works").await.unwrap();
        assert_eq!(session.history().len(), 1);

        // Swap in a failing client; history must stay as if the call never
        // happened.
        session.client = CompletionClient::Mock(MockBackend::failing());
        let err = session.ask("fails").await;
        assert!(err.is_err());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].question, "works");
    }

    #[tokio::test]
    async fn test_empty_reply_is_a_valid_answer() {
        let mock = MockBackend::with_reply("");
        let mut session = session_with(mock, 10);

        let answer = session.ask("anything?").await.unwrap();
        assert_eq!(answer, "");
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_http_failure_leaves_history_unchanged() {
        use crate::ai::OpenAICompatibleBackend;
        use crate::test_utils::MockCompletionServer;

        let mut server = MockCompletionServer::start_failing().await;
        let client = CompletionClient::OpenAICompatible(OpenAICompatibleBackend::new(
            &server.url(),
            "test-model",
        ));
        let mut session = ChatSession::new(client, "CONTEXT", SessionConfig::default());

        let err = session.ask("does this work?").await;
        assert!(err.is_err());
        assert!(session.history().is_empty());

        server.stop();
    }

    #[tokio::test]
    async fn test_clear_is_idempotent_and_keeps_context() {
        let mock = MockBackend::new();
        let mut session = session_with(mock.clone(), 10);
        session.ask("one").await.unwrap();
        session.ask("two").await.unwrap();

        session.clear();
        assert!(session.history().is_empty());
        session.clear();
        assert!(session.history().is_empty());

        // Context block still bound
        session.ask("three").await.unwrap();
        let requests = mock.requests();
        assert!(requests.last().unwrap().system.contains("CONTEXT"));
        assert_eq!(requests.last().unwrap().history_len, 0);
    }
}
