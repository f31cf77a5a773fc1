//! Whitespace tokenizer
//!
//! One token per whitespace-separated word. A cheap approximation for
//! when encoder accuracy does not matter, and a predictable fixture for
//! tests.

use crate::error::Result;

use super::Tokenizer;

/// Tokenizer that splits on whitespace
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<u32>> {
        Ok(text
            .split_whitespace()
            .enumerate()
            .map(|(i, _)| i as u32)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_words() {
        assert_eq!(WhitespaceTokenizer.count("a b c").unwrap(), 3);
        assert_eq!(WhitespaceTokenizer.count("one two three four").unwrap(), 4);
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(WhitespaceTokenizer.count("").unwrap(), 0);
        assert_eq!(WhitespaceTokenizer.count("   \t\n").unwrap(), 0);
    }

    #[test]
    fn test_collapses_runs_of_whitespace() {
        assert_eq!(WhitespaceTokenizer.count("a   b\t\tc").unwrap(), 3);
    }
}
