//! BPE tokenizer implementation
//!
//! Uses tiktoken-rs for accurate token counting compatible with OpenAI
//! models. One encoder is resolved at construction time; unknown model
//! names fall back to the gpt-4 encoder.

use tiktoken_rs::{get_bpe_from_model, CoreBPE};

use crate::error::Result;

use super::Tokenizer;

/// Byte-pair encoding tokenizer for a specific model
pub struct BpeTokenizer {
    model: String,
    bpe: CoreBPE,
}

impl BpeTokenizer {
    /// Create a tokenizer for a model, falling back for unknown models
    pub fn for_model(model: &str) -> Self {
        let bpe = match get_bpe_from_model(model) {
            Ok(e) => e,
            Err(e) => {
                // Fall back to gpt-4 encoder for unknown models
                tracing::warn!(
                    "Unknown model '{}', falling back to gpt-4 encoder: {}",
                    model,
                    e
                );
                get_bpe_from_model("gpt-4").expect("gpt-4 encoder should exist")
            }
        };

        Self {
            model: model.to_string(),
            bpe,
        }
    }

    /// The model name this tokenizer was constructed for
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Default for BpeTokenizer {
    fn default() -> Self {
        Self::for_model("gpt-4")
    }
}

impl Tokenizer for BpeTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<u32>> {
        Ok(self
            .bpe
            .encode_with_special_tokens(text)
            .into_iter()
            .map(|t| t as u32)
            .collect())
    }
}
