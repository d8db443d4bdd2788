//! corpus-analyzer - bigram language model over a text corpus
//!
//! Reads a corpus, splits it into sentences and word tokens, counts
//! unigrams and bigrams, and estimates raw and add-k smoothed
//! probabilities. New sentences are scored by chaining smoothed bigram
//! probabilities.
//!
//! ```no_run
//! use corpus_analyzer::session::{Analyzer, NoProgress};
//!
//! let mut analyzer = Analyzer::default();
//! analyzer.analyze_text("The cat sat. The dog sat.", &NoProgress)?;
//! let score = analyzer.score("the cat sat")?;
//! println!("{}", score.likelihood);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod input;
pub mod model;
pub mod report;
pub mod reporters;
pub mod scorer;
pub mod session;
pub mod text;

pub use corpus::{Bigram, Corpus};
pub use error::{AnalyzerError, AnalyzerResult};
pub use session::{AnalysisSession, Analyzer};
