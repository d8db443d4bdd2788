//! Text processing: normalization, sentence splitting and word tokenization
//!
//! The same word rule is used for corpus sentences and for standalone
//! query sentences, so scoring sees exactly the tokens the model was
//! trained on.

mod normalize;
mod sentence;
mod tokenizer;

pub use normalize::normalize;
pub use sentence::{split_sentences, ABBREVIATIONS};
pub use tokenizer::{word_tokens, Tokenizer};
