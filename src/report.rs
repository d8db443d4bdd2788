//! Report data: read-only projections of an analysis session
//!
//! Everything here is computed from an [`AnalysisSession`] on demand and
//! handed to a renderer in [`crate::reporters`]. Nothing writes back into
//! the session except the estimator's own memo cache.

use crate::corpus::{Bigram, Corpus};
use crate::error::{ModelError, QueryError};
use crate::model::ProbabilityEstimator;
use crate::scorer::SentenceScore;
use crate::session::AnalysisSession;
use serde::Serialize;

/// Which probability column a table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Estimate {
    Raw,
    Smoothed,
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Estimate::Raw => write!(f, "raw"),
            Estimate::Smoothed => write!(f, "smoothed"),
        }
    }
}

/// Corpus-level counts.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusStats {
    pub source: Option<String>,
    pub encoding: Option<String>,
    pub sentences: usize,
    pub tokens: usize,
    pub vocabulary: usize,
    pub bigrams: usize,
    pub distinct_bigrams: usize,
    pub k: f64,
}

impl CorpusStats {
    pub fn from_session(session: &AnalysisSession) -> Self {
        let corpus = session.corpus();
        let source = session.source();
        Self {
            source: source.path.as_ref().map(|p| p.display().to_string()),
            encoding: source.encoding.map(|e| e.name().to_string()),
            sentences: corpus.sentence_count(),
            tokens: corpus.all_tokens().len(),
            vocabulary: corpus.vocabulary().len(),
            bigrams: corpus.bigram_stream().len(),
            distinct_bigrams: session.model().bigrams().len(),
            k: session.estimator().smoothing().k(),
        }
    }
}

/// One numbered sentence (numbering starts at 1).
#[derive(Debug, Clone, Serialize)]
pub struct SentenceRow {
    pub index: usize,
    pub text: String,
    pub tokens: usize,
}

pub fn sentence_rows(corpus: &Corpus) -> Vec<SentenceRow> {
    corpus
        .sentences()
        .iter()
        .enumerate()
        .map(|(i, s)| SentenceRow {
            index: i + 1,
            text: s.text.clone(),
            tokens: s.tokens.len(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct UnigramRow {
    pub index: usize,
    pub token: String,
    pub count: usize,
    pub probability: f64,
}

/// Unigram rows in descending count order.
#[derive(Debug, Clone, Serialize)]
pub struct UnigramTable {
    pub estimate: Estimate,
    /// Rows before any `top` limit was applied
    pub total_rows: usize,
    pub rows: Vec<UnigramRow>,
}

impl UnigramTable {
    pub fn build(estimator: &ProbabilityEstimator, estimate: Estimate, top: Option<usize>) -> Self {
        let entries = estimator.model().unigrams().by_count_desc();
        let total_rows = entries.len();
        let rows = entries
            .into_iter()
            .take(top.unwrap_or(usize::MAX))
            .enumerate()
            .map(|(i, (token, count))| UnigramRow {
                index: i + 1,
                token: token.clone(),
                count,
                probability: match estimate {
                    Estimate::Raw => estimator.raw_unigram(token),
                    Estimate::Smoothed => estimator.smoothed_unigram(token),
                },
            })
            .collect();

        Self {
            estimate,
            total_rows,
            rows,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BigramRow {
    pub index: usize,
    /// `w1|w2`
    pub bigram: String,
    #[serde(skip)]
    pub pair: Bigram,
    pub count: usize,
    pub probability: f64,
}

/// Bigram rows in descending count order.
#[derive(Debug, Clone, Serialize)]
pub struct BigramTable {
    pub estimate: Estimate,
    pub total_rows: usize,
    pub rows: Vec<BigramRow>,
}

impl BigramTable {
    /// Fails if a bigram's context is missing from the unigram table.
    pub fn build(
        estimator: &ProbabilityEstimator,
        estimate: Estimate,
        top: Option<usize>,
    ) -> Result<Self, ModelError> {
        let model = estimator.model();
        let entries = model.bigrams().by_count_desc();
        let total_rows = entries.len();

        let mut rows = Vec::with_capacity(top.unwrap_or(total_rows).min(total_rows));
        for (i, (bigram, count)) in entries
            .into_iter()
            .take(top.unwrap_or(usize::MAX))
            .enumerate()
        {
            if model.unigram_count(&bigram.left) == 0 {
                return Err(ModelError::InternalInconsistency(format!(
                    "bigram row '{}' has no unigram count for '{}'",
                    bigram, bigram.left
                )));
            }
            rows.push(BigramRow {
                index: i + 1,
                bigram: bigram.to_string(),
                pair: bigram.clone(),
                count,
                probability: match estimate {
                    Estimate::Raw => estimator.raw_bigram(bigram),
                    Estimate::Smoothed => estimator.smoothed_bigram(bigram),
                },
            });
        }

        Ok(Self {
            estimate,
            total_rows,
            rows,
        })
    }
}

/// Smoothed `P(column|row)` for every vocabulary pair.
#[derive(Debug, Clone, Serialize)]
pub struct ProbabilityMatrix {
    pub vocabulary: Vec<String>,
    /// Decimal places used by text and markdown renderers
    #[serde(skip)]
    pub precision: usize,
    /// `rows[i][j]` is `P(vocabulary[j] | vocabulary[i])`
    pub rows: Vec<Vec<f64>>,
}

impl ProbabilityMatrix {
    pub fn build(estimator: &ProbabilityEstimator, corpus: &Corpus, precision: usize) -> Self {
        let vocabulary: Vec<String> = corpus.vocabulary().iter().cloned().collect();
        let rows = vocabulary
            .iter()
            .map(|context| {
                vocabulary
                    .iter()
                    .map(|word| estimator.smoothed_pair(context, word))
                    .collect()
            })
            .collect();

        Self {
            vocabulary,
            precision,
            rows,
        }
    }

    pub fn size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Raw and smoothed values for one lookup key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QueryResult {
    Unigram {
        word: String,
        count: usize,
        in_vocabulary: bool,
        raw: f64,
        smoothed: f64,
    },
    Bigram {
        bigram: String,
        count: usize,
        context_count: usize,
        raw: f64,
        smoothed: f64,
    },
}

impl QueryResult {
    /// Look up a single word. The word is lowercased like corpus tokens.
    pub fn unigram(estimator: &ProbabilityEstimator, word: &str) -> Self {
        let word = word.trim().to_lowercase();
        let model = estimator.model();
        QueryResult::Unigram {
            count: model.unigram_count(&word),
            in_vocabulary: model.unigrams().contains(word.as_str()),
            raw: estimator.raw_unigram(&word),
            smoothed: estimator.smoothed_unigram(&word),
            word,
        }
    }

    /// Look up a `w1|w2` key.
    pub fn bigram(estimator: &ProbabilityEstimator, key: &str) -> Result<Self, QueryError> {
        let parsed: Bigram = key.parse()?;
        let bigram = Bigram::new(parsed.left.to_lowercase(), parsed.right.to_lowercase());
        let model = estimator.model();
        Ok(QueryResult::Bigram {
            count: model.bigram_count(&bigram),
            context_count: model.unigram_count(&bigram.left),
            raw: estimator.raw_bigram(&bigram),
            smoothed: estimator.smoothed_bigram(&bigram),
            bigram: bigram.to_string(),
        })
    }
}

/// Everything a renderer can show. Absent sections are skipped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CorpusStats>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentences: Option<Vec<SentenceRow>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unigrams: Vec<UnigramTable>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bigrams: Vec<BigramTable>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<ProbabilityMatrix>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scores: Vec<SentenceScore>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryResult>,
}

impl Report {
    /// Full report: stats, sentences, all four tables and, if given, the matrix.
    pub fn full(
        session: &AnalysisSession,
        top: Option<usize>,
        matrix_precision: Option<usize>,
    ) -> Result<Self, ModelError> {
        let estimator = session.estimator();
        Ok(Self {
            stats: Some(CorpusStats::from_session(session)),
            sentences: Some(sentence_rows(session.corpus())),
            unigrams: vec![
                UnigramTable::build(estimator, Estimate::Raw, top),
                UnigramTable::build(estimator, Estimate::Smoothed, top),
            ],
            bigrams: vec![
                BigramTable::build(estimator, Estimate::Raw, top)?,
                BigramTable::build(estimator, Estimate::Smoothed, top)?,
            ],
            matrix: matrix_precision
                .map(|p| ProbabilityMatrix::build(estimator, session.corpus(), p)),
            ..Default::default()
        })
    }
}
