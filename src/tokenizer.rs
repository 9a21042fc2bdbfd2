//! Seam to the external tokenizer.
//!
//! The vectorizer only needs `text -> tokens`. Anything deterministic that
//! never fails on well-formed text will do, including a plain closure.

/// Splits raw text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Same input must give the same tokens. May return an empty list.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Naive tokenizer: lower-case, strip punctuation, split on whitespace.
/// Good enough for tests and demos, not for real text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .collect()
    }
}
