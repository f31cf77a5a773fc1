//! Usage recorder implementation
//!
//! Accumulates token usage per category and retains the full event
//! history for inspection.
//!
//! Features:
//! - Token counting delegated to an injected tokenizer
//! - Ordered per-category event history (insertion order = call order)
//! - Total-function aggregate reads (0 on empty history)
//! - Atomic reset of both histories
//! - Thread-safe: a recorder is a cheaply cloneable handle over shared state

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::tokens::Tokenizer;

use super::event::{UsageEvent, UsageSummary};

/// Event lists guarded by the recorder lock
#[derive(Debug, Default)]
struct RecorderState {
    prompt_completion_events: Vec<UsageEvent>,
    embedding_events: Vec<UsageEvent>,
}

/// Accumulates a running, queryable account of model-usage tokens.
///
/// Cloning yields another handle to the same underlying history, so one
/// recorder can be handed to several pipeline stages. All recording
/// calls, aggregate reads, and resets are safe to invoke concurrently.
#[derive(Clone)]
pub struct UsageRecorder {
    tokenizer: Option<Arc<dyn Tokenizer>>,
    state: Arc<Mutex<RecorderState>>,
    verbose: bool,
}

impl UsageRecorder {
    /// Create a recorder with the given tokenizer
    pub fn new(tokenizer: impl Tokenizer + 'static) -> Self {
        Self {
            tokenizer: Some(Arc::new(tokenizer)),
            state: Arc::new(Mutex::new(RecorderState::default())),
            verbose: false,
        }
    }

    /// Create a recorder with a shared tokenizer handle
    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            tokenizer: Some(tokenizer),
            state: Arc::new(Mutex::new(RecorderState::default())),
            verbose: false,
        }
    }

    /// Create a recorder without a tokenizer.
    ///
    /// Aggregate reads work immediately; any recording call fails with
    /// [`Error::Configuration`] until the recorder is rebuilt with a
    /// tokenizer.
    pub fn unconfigured() -> Self {
        Self {
            tokenizer: None,
            state: Arc::new(Mutex::new(RecorderState::default())),
            verbose: false,
        }
    }

    /// Log every recorded event at info level instead of debug
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn tokenizer(&self) -> Result<&dyn Tokenizer> {
        self.tokenizer
            .as_deref()
            .ok_or_else(|| Error::Configuration("recorder has no tokenizer installed".to_string()))
    }

    /// Counter reads stay usable after a panic in another caller holding
    /// the lock.
    fn lock(&self) -> MutexGuard<'_, RecorderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one prompt/completion round trip.
    ///
    /// Both texts are tokenized before anything is appended; if either
    /// tokenization fails the history is unchanged. Empty strings are
    /// legal and count zero tokens.
    pub fn record_prompt_completion(
        &self,
        prompt: &str,
        completion: &str,
        event_id: &str,
    ) -> Result<()> {
        let tokenizer = self.tokenizer()?;
        let prompt_tokens = tokenizer.count(prompt)? as u64;
        let completion_tokens = tokenizer.count(completion)? as u64;

        let event = UsageEvent::prompt_completion(
            prompt,
            prompt_tokens,
            completion,
            completion_tokens,
            event_id,
        );
        self.log_event(&event);
        self.lock().prompt_completion_events.push(event);
        Ok(())
    }

    /// Record one embedding invocation.
    ///
    /// The event carries the input token count only; its completion side
    /// is empty with zero tokens.
    pub fn record_embedding(&self, text: &str, event_id: &str) -> Result<()> {
        let tokenizer = self.tokenizer()?;
        let tokens = tokenizer.count(text)? as u64;

        let event = UsageEvent::embedding(text, tokens, event_id);
        self.log_event(&event);
        self.lock().embedding_events.push(event);
        Ok(())
    }

    fn log_event(&self, event: &UsageEvent) {
        if self.verbose {
            tracing::info!(
                event_id = %event.event_id,
                category = ?event.category,
                prompt_tokens = event.prompt_tokens,
                completion_tokens = event.completion_tokens,
                total_tokens = event.total_tokens(),
                "Recorded usage event"
            );
        } else {
            tracing::debug!(
                event_id = %event.event_id,
                category = ?event.category,
                prompt_tokens = event.prompt_tokens,
                completion_tokens = event.completion_tokens,
                total_tokens = event.total_tokens(),
                "Recorded usage event"
            );
        }
    }

    /// Total tokens across embedding events; 0 on empty history
    pub fn total_embedding_tokens(&self) -> u64 {
        self.lock()
            .embedding_events
            .iter()
            .map(|e| e.prompt_tokens)
            .sum()
    }

    /// Total prompt tokens across prompt/completion events
    pub fn total_prompt_tokens(&self) -> u64 {
        self.lock()
            .prompt_completion_events
            .iter()
            .map(|e| e.prompt_tokens)
            .sum()
    }

    /// Total completion tokens across prompt/completion events
    pub fn total_completion_tokens(&self) -> u64 {
        self.lock()
            .prompt_completion_events
            .iter()
            .map(|e| e.completion_tokens)
            .sum()
    }

    /// Combined prompt + completion tokens
    pub fn total_llm_tokens(&self) -> u64 {
        let state = self.lock();
        state
            .prompt_completion_events
            .iter()
            .map(|e| e.total_tokens())
            .sum()
    }

    /// Clear both event histories.
    ///
    /// Both lists are cleared under one lock acquisition, so no
    /// concurrent caller observes one list cleared and the other not.
    /// A recording racing this call lands wholly before or wholly after
    /// the clear, depending on which side wins the lock. Idempotent.
    pub fn reset_counts(&self) {
        let dropped = {
            let mut state = self.lock();
            let dropped =
                state.prompt_completion_events.len() + state.embedding_events.len();
            state.prompt_completion_events.clear();
            state.embedding_events.clear();
            dropped
        };
        tracing::debug!(dropped_events = dropped, "Reset usage counts");
    }

    /// Snapshot of the prompt/completion history in call order.
    ///
    /// A defensive copy; mutating it does not touch recorder state.
    pub fn prompt_completion_events(&self) -> Vec<UsageEvent> {
        self.lock().prompt_completion_events.clone()
    }

    /// Snapshot of the embedding history in call order
    pub fn embedding_events(&self) -> Vec<UsageEvent> {
        self.lock().embedding_events.clone()
    }

    /// Consistent snapshot of all aggregates under one lock acquisition
    pub fn summary(&self) -> UsageSummary {
        let state = self.lock();
        UsageSummary {
            embedding_tokens: state.embedding_events.iter().map(|e| e.prompt_tokens).sum(),
            prompt_tokens: state
                .prompt_completion_events
                .iter()
                .map(|e| e.prompt_tokens)
                .sum(),
            completion_tokens: state
                .prompt_completion_events
                .iter()
                .map(|e| e.completion_tokens)
                .sum(),
            prompt_completion_events: state.prompt_completion_events.len(),
            embedding_events: state.embedding_events.len(),
        }
    }
}

impl std::fmt::Debug for UsageRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageRecorder")
            .field("configured", &self.tokenizer.is_some())
            .field("verbose", &self.verbose)
            .field("summary", &self.summary())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::WhitespaceTokenizer;

    fn whitespace_recorder() -> UsageRecorder {
        UsageRecorder::new(WhitespaceTokenizer)
    }

    // ===========================================
    // Recording Tests
    // ===========================================

    #[test]
    fn test_record_embedding() {
        let recorder = whitespace_recorder();
        recorder.record_embedding("a b c", "id1").unwrap();

        assert_eq!(recorder.total_embedding_tokens(), 3);
        assert_eq!(recorder.embedding_events().len(), 1);
        assert_eq!(recorder.embedding_events()[0].event_id, "id1");
    }

    #[test]
    fn test_record_prompt_completion() {
        let recorder = whitespace_recorder();
        recorder
            .record_prompt_completion("one two three four", "ok", "id2")
            .unwrap();

        let events = recorder.prompt_completion_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].prompt_tokens, 4);
        assert_eq!(events[0].completion_tokens, 1);
        assert_eq!(events[0].total_tokens(), 5);
        assert_eq!(recorder.total_llm_tokens(), 5);
    }

    #[test]
    fn test_empty_strings_record_zero_tokens() {
        let recorder = whitespace_recorder();
        recorder.record_prompt_completion("", "", "id3").unwrap();

        assert_eq!(recorder.total_prompt_tokens(), 0);
        assert_eq!(recorder.total_completion_tokens(), 0);
        assert_eq!(recorder.prompt_completion_events().len(), 1);
    }

    #[test]
    fn test_categories_accumulate_independently() {
        let recorder = whitespace_recorder();
        recorder.record_embedding("a b", "e1").unwrap();
        recorder.record_prompt_completion("a b c", "d", "p1").unwrap();

        assert_eq!(recorder.total_embedding_tokens(), 2);
        assert_eq!(recorder.total_prompt_tokens(), 3);
        assert_eq!(recorder.total_completion_tokens(), 1);
        assert_eq!(recorder.total_llm_tokens(), 4);
    }

    // ===========================================
    // Error Tests
    // ===========================================

    #[test]
    fn test_unconfigured_recording_fails() {
        let recorder = UsageRecorder::unconfigured();
        let err = recorder.record_embedding("text", "id").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_unconfigured_reads_are_total() {
        let recorder = UsageRecorder::unconfigured();
        assert_eq!(recorder.total_llm_tokens(), 0);
        assert_eq!(recorder.total_embedding_tokens(), 0);
        assert!(recorder.prompt_completion_events().is_empty());
    }

    #[test]
    fn test_tokenizer_failure_appends_nothing() {
        struct FailingTokenizer;
        impl Tokenizer for FailingTokenizer {
            fn tokenize(&self, _text: &str) -> Result<Vec<u32>> {
                Err(Error::tokenization(anyhow::anyhow!("bad input")))
            }
        }

        let recorder = UsageRecorder::new(FailingTokenizer);
        let err = recorder
            .record_prompt_completion("p", "c", "id")
            .unwrap_err();
        assert!(matches!(err, Error::Tokenization { .. }));
        assert!(recorder.prompt_completion_events().is_empty());
        assert_eq!(recorder.total_llm_tokens(), 0);
    }

    // ===========================================
    // Reset Tests
    // ===========================================

    #[test]
    fn test_reset_clears_everything() {
        let recorder = whitespace_recorder();
        recorder.record_embedding("a b c", "e1").unwrap();
        recorder.record_prompt_completion("a b", "c", "p1").unwrap();

        recorder.reset_counts();

        assert_eq!(recorder.total_embedding_tokens(), 0);
        assert_eq!(recorder.total_prompt_tokens(), 0);
        assert_eq!(recorder.total_completion_tokens(), 0);
        assert_eq!(recorder.total_llm_tokens(), 0);
        assert!(recorder.prompt_completion_events().is_empty());
        assert!(recorder.embedding_events().is_empty());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let recorder = whitespace_recorder();
        recorder.record_embedding("a", "e1").unwrap();

        recorder.reset_counts();
        recorder.reset_counts();

        assert_eq!(recorder.summary(), UsageSummary::default());
    }

    // ===========================================
    // Snapshot Tests
    // ===========================================

    #[test]
    fn test_snapshots_are_defensive_copies() {
        let recorder = whitespace_recorder();
        recorder.record_embedding("a b", "e1").unwrap();

        let mut snapshot = recorder.embedding_events();
        snapshot.clear();

        assert_eq!(recorder.embedding_events().len(), 1);
        assert_eq!(recorder.total_embedding_tokens(), 2);
    }

    #[test]
    fn test_clones_share_history() {
        let recorder = whitespace_recorder();
        let other = recorder.clone();

        recorder.record_embedding("a b c", "e1").unwrap();

        assert_eq!(other.total_embedding_tokens(), 3);
        assert_eq!(other.embedding_events().len(), 1);
    }

    #[test]
    fn test_verbose_recorder_still_accumulates() {
        let recorder = whitespace_recorder().with_verbose(true);
        recorder.record_embedding("a b", "e1").unwrap();
        assert_eq!(recorder.total_embedding_tokens(), 2);
    }

    #[test]
    fn test_summary_snapshot() {
        let recorder = whitespace_recorder();
        recorder.record_embedding("a b", "e1").unwrap();
        recorder
            .record_prompt_completion("a b c", "d e", "p1")
            .unwrap();

        let summary = recorder.summary();
        assert_eq!(summary.embedding_tokens, 2);
        assert_eq!(summary.prompt_tokens, 3);
        assert_eq!(summary.completion_tokens, 2);
        assert_eq!(summary.llm_tokens(), 5);
        assert_eq!(summary.prompt_completion_events, 1);
        assert_eq!(summary.embedding_events, 1);
    }
}
