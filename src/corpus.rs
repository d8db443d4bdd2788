//! Tokenized corpus: sentences, flat token stream, bigram stream, vocabulary
//!
//! Two token streams are derived from the same sentences:
//!
//! - `all_tokens`: every sentence's words concatenated, then one `<s>` and
//!   one `</s>` per sentence appended in bulk at the end. Unigram counts come
//!   from here.
//! - `bigram_stream`: each sentence padded with `<s>` ... `</s>` and cut into
//!   consecutive pairs. Bigram counts come from here.
//!
//! Both add exactly two boundary tokens per sentence, but they are not the
//! same sequence and must not be unified: doing so changes probabilities.

use crate::error::{InputError, QueryError};
use crate::text::Tokenizer;
use serde::Serialize;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Sentence start marker
pub const SENTENCE_START: &str = "<s>";
/// Sentence end marker
pub const SENTENCE_END: &str = "</s>";

/// An ordered pair of consecutive tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Bigram {
    pub left: String,
    pub right: String,
}

impl Bigram {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// `P(right|left)` label used by the text reporter
    pub fn conditional_label(&self) -> String {
        format!("P({}|{})", self.right, self.left)
    }
}

/// Renders as `left|right`.
impl std::fmt::Display for Bigram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.left, self.right)
    }
}

/// Parses `left|right`. Anything other than exactly two non-empty parts is rejected.
impl FromStr for Bigram {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('|');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(left), Some(right), None) => {
                let (left, right) = (left.trim(), right.trim());
                if left.is_empty() || right.is_empty() {
                    return Err(QueryError::MalformedBigram(s.to_string()));
                }
                Ok(Bigram::new(left, right))
            }
            _ => Err(QueryError::MalformedBigram(s.to_string())),
        }
    }
}

/// Pad a token sequence with one start and one end marker and pair it up.
///
/// An empty sequence yields the single pair `(<s>, </s>)`.
pub fn padded_bigrams(tokens: &[String]) -> Vec<Bigram> {
    let padded: Vec<&str> = std::iter::once(SENTENCE_START)
        .chain(tokens.iter().map(String::as_str))
        .chain(std::iter::once(SENTENCE_END))
        .collect();
    padded
        .windows(2)
        .map(|pair| Bigram::new(pair[0], pair[1]))
        .collect()
}

/// One sentence span and its word tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<String>,
}

/// The tokenized corpus for one analysis.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    sentences: Vec<Sentence>,
    all_tokens: Vec<String>,
    bigram_stream: Vec<Bigram>,
    vocabulary: BTreeSet<String>,
}

impl Corpus {
    /// Tokenize raw text into a corpus.
    ///
    /// Fails with [`InputError::EmptyCorpus`] when no word tokens remain.
    pub fn from_text(raw: &str) -> Result<Self, InputError> {
        let tokenizer = Tokenizer::new();
        let sentences: Vec<Sentence> = tokenizer
            .sentences(raw)
            .into_iter()
            .map(|text| {
                let tokens = tokenizer.words(&text);
                Sentence { text, tokens }
            })
            .collect();

        if sentences.iter().all(|s| s.tokens.is_empty()) {
            return Err(InputError::EmptyCorpus);
        }

        Ok(Self::build(sentences))
    }

    /// Derive both token streams and the vocabulary from tokenized sentences.
    pub fn build(sentences: Vec<Sentence>) -> Self {
        let word_count: usize = sentences.iter().map(|s| s.tokens.len()).sum();
        let sentence_count = sentences.len();

        let mut all_tokens = Vec::with_capacity(word_count + 2 * sentence_count);
        for sentence in &sentences {
            all_tokens.extend(sentence.tokens.iter().cloned());
        }
        all_tokens.extend(std::iter::repeat(SENTENCE_START.to_string()).take(sentence_count));
        all_tokens.extend(std::iter::repeat(SENTENCE_END.to_string()).take(sentence_count));

        let bigram_stream = sentences
            .iter()
            .flat_map(|s| padded_bigrams(&s.tokens))
            .collect();

        let vocabulary = all_tokens.iter().cloned().collect();

        Self {
            sentences,
            all_tokens,
            bigram_stream,
            vocabulary,
        }
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Word tokens followed by the bulk boundary markers
    pub fn all_tokens(&self) -> &[String] {
        &self.all_tokens
    }

    pub fn bigram_stream(&self) -> &[Bigram] {
        &self.bigram_stream
    }

    /// Distinct tokens, sorted
    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
