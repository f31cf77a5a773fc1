//! Usage event types
//!
//! A [`UsageEvent`] is an immutable record of one unit of model usage,
//! either a prompt/completion round trip or an embedding call. Token
//! counts come from the caller-supplied tokenizer; this module never
//! computes them itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a recorded usage event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageCategory {
    /// One round-trip text-generation invocation
    PromptCompletion,
    /// One text-to-vector invocation
    Embedding,
}

/// An immutable record of one unit of model usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEvent {
    /// Which kind of invocation produced this event
    pub category: UsageCategory,
    /// Text sent to the model (the sole text for embedding events)
    pub prompt: String,
    /// Token count of the prompt under the session tokenizer
    pub prompt_tokens: u64,
    /// Text returned by the model; empty for embedding events
    pub completion: String,
    /// Token count of the completion; zero for embedding events
    pub completion_tokens: u64,
    /// Opaque identifier correlating this event to an external trace.
    /// Caller-supplied; uniqueness is not enforced here.
    pub event_id: String,
    /// When the event was recorded
    pub timestamp: DateTime<Utc>,
}

impl UsageEvent {
    /// Build a prompt/completion event
    pub fn prompt_completion(
        prompt: impl Into<String>,
        prompt_tokens: u64,
        completion: impl Into<String>,
        completion_tokens: u64,
        event_id: impl Into<String>,
    ) -> Self {
        Self {
            category: UsageCategory::PromptCompletion,
            prompt: prompt.into(),
            prompt_tokens,
            completion: completion.into(),
            completion_tokens,
            event_id: event_id.into(),
            timestamp: Utc::now(),
        }
    }

    /// Build an embedding event (no completion side)
    pub fn embedding(text: impl Into<String>, tokens: u64, event_id: impl Into<String>) -> Self {
        Self {
            category: UsageCategory::Embedding,
            prompt: text.into(),
            prompt_tokens: tokens,
            completion: String::new(),
            completion_tokens: 0,
            event_id: event_id.into(),
            timestamp: Utc::now(),
        }
    }

    /// Total tokens for this event.
    ///
    /// Derived, never stored, so `total == prompt + completion` holds by
    /// construction.
    pub fn total_tokens(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// A consistent snapshot of all aggregate counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSummary {
    /// Total tokens across embedding events
    pub embedding_tokens: u64,
    /// Total prompt tokens across prompt/completion events
    pub prompt_tokens: u64,
    /// Total completion tokens across prompt/completion events
    pub completion_tokens: u64,
    /// Number of prompt/completion events recorded
    pub prompt_completion_events: usize,
    /// Number of embedding events recorded
    pub embedding_events: usize,
}

impl UsageSummary {
    /// Combined prompt + completion tokens
    pub fn llm_tokens(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

impl std::fmt::Display for UsageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "embedding tokens: {}, prompt tokens: {}, completion tokens: {}, llm tokens: {}",
            self.embedding_tokens,
            self.prompt_tokens,
            self.completion_tokens,
            self.llm_tokens()
        )
    }
}
