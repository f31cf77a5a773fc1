//! Observer seam between pipelines and the recorder
//!
//! Pipelines notify usage through this trait rather than holding a
//! concrete recorder, and they receive their observer explicitly at
//! construction. There is no ambient global registry.

use std::sync::Arc;

use crate::error::Result;

use super::recorder::UsageRecorder;

/// Receives usage notifications from an event-emitting pipeline.
///
/// Exactly two operations; the observer has no visibility into the
/// pipeline's internals beyond the text payloads and a correlation id.
pub trait UsageObserver: Send + Sync {
    /// Notify one prompt/completion round trip
    fn record_prompt_completion(&self, prompt: &str, completion: &str, event_id: &str)
        -> Result<()>;

    /// Notify one embedding invocation
    fn record_embedding(&self, text: &str, event_id: &str) -> Result<()>;
}

impl UsageObserver for UsageRecorder {
    fn record_prompt_completion(
        &self,
        prompt: &str,
        completion: &str,
        event_id: &str,
    ) -> Result<()> {
        UsageRecorder::record_prompt_completion(self, prompt, completion, event_id)
    }

    fn record_embedding(&self, text: &str, event_id: &str) -> Result<()> {
        UsageRecorder::record_embedding(self, text, event_id)
    }
}

/// Observer that discards every notification.
///
/// For pipelines constructed without usage tracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl UsageObserver for NullObserver {
    fn record_prompt_completion(
        &self,
        _prompt: &str,
        _completion: &str,
        _event_id: &str,
    ) -> Result<()> {
        Ok(())
    }

    fn record_embedding(&self, _text: &str, _event_id: &str) -> Result<()> {
        Ok(())
    }
}

impl<T: UsageObserver + ?Sized> UsageObserver for Arc<T> {
    fn record_prompt_completion(
        &self,
        prompt: &str,
        completion: &str,
        event_id: &str,
    ) -> Result<()> {
        (**self).record_prompt_completion(prompt, completion, event_id)
    }

    fn record_embedding(&self, text: &str, event_id: &str) -> Result<()> {
        (**self).record_embedding(text, event_id)
    }
}
