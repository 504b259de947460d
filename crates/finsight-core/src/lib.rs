//! FinSight Core Library
//!
//! Shared functionality for the FinSight transaction analytics agent:
//! - CSV ingestion for the raw transaction ledger
//! - Canonical spending-category mapping
//! - Grouped statistics (categories, merchants, monthly trend, peaks)
//! - Context-block rendering for LLM grounding
//! - Pluggable completion backends (Groq, OpenAI-compatible, mock)
//! - Bounded conversational sessions over one ledger snapshot

pub mod aggregate;
pub mod ai;
pub mod categories;
pub mod error;
pub mod ingest;
pub mod models;
pub mod session;
pub mod summary;

/// Test utilities including the mock completion server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::Aggregator;
pub use ai::{CompletionBackend, CompletionClient, MockBackend, OpenAICompatibleBackend};
pub use categories::SpendingCategory;
pub use error::{Error, Result};
pub use models::{
    AggregateReport, AnalyticsConfig, BehavioralPeak, CategoryAggregate, MerchantAggregate,
    MonthlyAggregate, ScalarStats, TransactionRecord,
};
pub use session::{ChatSession, ConversationTurn, SessionConfig, EMPTY_QUESTION_REPLY};
pub use summary::summarize;
