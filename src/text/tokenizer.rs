//! Word tokenization and the corpus tokenizer pipeline

use super::{normalize, split_sentences};
use regex::Regex;
use std::sync::OnceLock;

/// Maximal runs of word characters. Punctuation is a separator, never a token.
fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\w+").expect("valid word regex"))
}

/// Split `text` into word tokens, as-is (no case folding).
pub fn word_tokens(text: &str) -> Vec<String> {
    word_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Normalizes corpus text and splits it into tokenized sentences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize raw corpus text and split it into sentence spans.
    pub fn sentences(&self, raw: &str) -> Vec<String> {
        split_sentences(&normalize(raw))
    }

    /// Tokenize one sentence (or any standalone input) into lowercase words.
    pub fn words(&self, sentence: &str) -> Vec<String> {
        word_tokens(&sentence.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_dropped() {
        assert_eq!(
            word_tokens("hello, world! it's"),
            vec!["hello", "world", "it", "s"]
        );
    }

    #[test]
    fn test_digits_and_underscores_are_word_chars() {
        assert_eq!(word_tokens("route_66 in 1999"), vec!["route_66", "in", "1999"]);
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(word_tokens("café naïve"), vec!["café", "naïve"]);
    }

    #[test]
    fn test_punctuation_only_is_empty() {
        assert!(word_tokens("?!... --").is_empty());
    }

    #[test]
    fn test_words_lowercases() {
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.words("The CAT"), vec!["the", "cat"]);
    }

    #[test]
    fn test_sentences_normalizes_first() {
        let tokenizer = Tokenizer::new();
        assert_eq!(
            tokenizer.sentences("Hello world. This is\n   a test."),
            vec!["hello world.", "this is a test."]
        );
    }
}
