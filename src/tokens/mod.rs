//! Tokenizer capability
//!
//! The recorder never tokenizes text itself; it delegates to an injected
//! [`Tokenizer`] and only consumes the length of the produced sequence.
//! This keeps the accounting logic independent of the encoding in use:
//! a model-specific BPE, a whitespace approximation, or a test stub all
//! plug in behind the same trait.

pub mod bpe;
pub mod whitespace;

pub use bpe::BpeTokenizer;
pub use whitespace::WhitespaceTokenizer;

use crate::error::Result;

/// A pure function from text to an ordered sequence of token identifiers.
///
/// Consumers that only need a count should call [`Tokenizer::count`]; the
/// identifier values themselves are opaque to this crate.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into token identifiers
    fn tokenize(&self, text: &str) -> Result<Vec<u32>>;

    /// Count tokens in the given text
    fn count(&self, text: &str) -> Result<usize> {
        Ok(self.tokenize(text)?.len())
    }
}

/// Plain closures are tokenizers, so test stubs and one-off approximations
/// need no newtype.
impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<u32> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Result<Vec<u32>> {
        Ok(self(text))
    }
}
