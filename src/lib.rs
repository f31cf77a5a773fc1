//! Tally - In-memory token usage accounting
//!
//! This library provides a [`UsageRecorder`] that observes an external
//! generation/embedding pipeline, tallies tokens per category with an
//! injected [`Tokenizer`], and retains the full event history for
//! inspection. It is strictly an in-memory counter: no persistence, no
//! rate limiting, no multi-tenant accounting.
//!
//! ```
//! use tally::{UsageRecorder, WhitespaceTokenizer};
//!
//! let recorder = UsageRecorder::new(WhitespaceTokenizer);
//! recorder.record_embedding("a b c", "evt-1")?;
//! recorder.record_prompt_completion("one two three four", "ok", "evt-2")?;
//!
//! assert_eq!(recorder.total_embedding_tokens(), 3);
//! assert_eq!(recorder.total_llm_tokens(), 5);
//! # Ok::<(), tally::Error>(())
//! ```

pub mod error;
pub mod tokens;
pub mod usage;

pub use crate::error::{Error, Result};
pub use crate::tokens::{BpeTokenizer, Tokenizer, WhitespaceTokenizer};
pub use crate::usage::{
    NullObserver, UsageCategory, UsageEvent, UsageObserver, UsageRecorder, UsageSummary,
};
