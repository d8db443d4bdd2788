//! Sentence likelihood under the smoothed bigram model

use crate::corpus::{padded_bigrams, Bigram};
use crate::model::ProbabilityEstimator;
use crate::text::Tokenizer;
use serde::Serialize;

/// One factor of a sentence likelihood.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep {
    pub bigram: Bigram,
    pub probability: f64,
}

impl TraceStep {
    /// `P(w2|w1) = 0.123`
    pub fn line(&self) -> String {
        format!("{} = {:.3}", self.bigram.conditional_label(), self.probability)
    }
}

/// Likelihood of a sentence plus the per-bigram factors that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct SentenceScore {
    pub sentence: String,
    pub tokens: Vec<String>,
    /// Product of all smoothed bigram probabilities
    pub likelihood: f64,
    /// Sum of natural logs of the factors (`-inf` when any factor is 0)
    pub log_likelihood: f64,
    /// `exp(-log_likelihood / bigrams)`
    pub perplexity: f64,
    pub trace: Vec<TraceStep>,
}

/// Scores standalone sentences against an estimator.
pub struct SentenceScorer<'a> {
    estimator: &'a ProbabilityEstimator,
    tokenizer: Tokenizer,
}

impl<'a> SentenceScorer<'a> {
    pub fn new(estimator: &'a ProbabilityEstimator) -> Self {
        Self {
            estimator,
            tokenizer: Tokenizer::new(),
        }
    }

    /// Score one sentence. Input without word tokens scores the single `(<s>, </s>)` pair.
    pub fn score(&self, sentence: &str) -> SentenceScore {
        let tokens = self.tokenizer.words(sentence);

        let trace: Vec<TraceStep> = padded_bigrams(&tokens)
            .into_iter()
            .map(|bigram| {
                let probability = self.estimator.smoothed_bigram(&bigram);
                TraceStep {
                    bigram,
                    probability,
                }
            })
            .collect();

        let likelihood: f64 = trace.iter().map(|step| step.probability).product();
        let log_likelihood: f64 = trace.iter().map(|step| step.probability.ln()).sum();
        let perplexity = (-log_likelihood / trace.len() as f64).exp();

        SentenceScore {
            sentence: sentence.to_string(),
            tokens,
            likelihood,
            log_likelihood,
            perplexity,
            trace,
        }
    }
}
