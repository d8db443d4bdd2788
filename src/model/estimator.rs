//! Maximum-likelihood and add-k (Lidstone) smoothed probabilities
//!
//! Smoothed lookups are memoized in caches owned by the estimator. The
//! estimator lives inside one analysis session and is dropped with it, so a
//! new corpus can never observe probabilities computed for an old one.

use super::FrequencyModel;
use crate::corpus::Bigram;
use crate::error::ConfigError;
use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

/// Default additive smoothing constant
pub const DEFAULT_K: f64 = 0.5;

/// Validated additive smoothing constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Smoothing {
    k: f64,
}

impl Smoothing {
    pub fn new(k: f64) -> Result<Self, ConfigError> {
        if !k.is_finite() || k <= 0.0 {
            return Err(ConfigError::InvalidSmoothing(k));
        }
        Ok(Self { k })
    }

    pub fn k(&self) -> f64 {
        self.k
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Self { k: DEFAULT_K }
    }
}

/// Denominators shared by every smoothed lookup of one corpus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Denominators {
    /// `N + k·V`
    pub unigram: f64,
    /// `k·(V − 2)`; the two boundary markers are excluded from the following vocabulary
    pub bigram_base: f64,
}

impl Denominators {
    pub fn new(total_tokens: usize, vocabulary_size: usize, smoothing: Smoothing) -> Self {
        let k = smoothing.k();
        let v = vocabulary_size as f64;
        Self {
            unigram: total_tokens as f64 + k * v,
            bigram_base: k * (v - 2.0),
        }
    }
}

/// Probability lookups over one frequency model.
#[derive(Debug)]
pub struct ProbabilityEstimator {
    model: FrequencyModel,
    smoothing: Smoothing,
    denominators: Denominators,
    unigram_memo: DashMap<String, f64>,
    bigram_memo: DashMap<Bigram, f64>,
}

impl ProbabilityEstimator {
    /// The vocabulary is exactly the key set of the unigram table.
    pub fn new(model: FrequencyModel, smoothing: Smoothing) -> Self {
        let denominators = Denominators::new(
            model.unigrams().total(),
            model.unigrams().len(),
            smoothing,
        );
        debug!(
            "Estimator ready: N={} V={} k={} unigram_denom={} bigram_base={}",
            model.unigrams().total(),
            model.unigrams().len(),
            smoothing.k(),
            denominators.unigram,
            denominators.bigram_base
        );
        Self {
            model,
            smoothing,
            denominators,
            unigram_memo: DashMap::new(),
            bigram_memo: DashMap::new(),
        }
    }

    pub fn model(&self) -> &FrequencyModel {
        &self.model
    }

    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    pub fn denominators(&self) -> Denominators {
        self.denominators
    }

    /// `count(w) / N`
    pub fn raw_unigram(&self, word: &str) -> f64 {
        let total = self.model.unigrams().total();
        if total == 0 {
            return 0.0;
        }
        self.model.unigram_count(word) as f64 / total as f64
    }

    /// `count(w1,w2) / count(w1)`, or 0 for an unseen context.
    pub fn raw_bigram(&self, bigram: &Bigram) -> f64 {
        let context = self.model.unigram_count(&bigram.left);
        if context == 0 {
            return 0.0;
        }
        self.model.bigram_count(bigram) as f64 / context as f64
    }

    /// `(count(w) + k) / (N + k·V)`; unseen words get `k / (N + k·V)`.
    pub fn smoothed_unigram(&self, word: &str) -> f64 {
        if let Some(p) = self.unigram_memo.get(word) {
            return *p;
        }

        let k = self.smoothing.k();
        let count = if self.model.unigrams().contains(word) {
            self.model.unigram_count(word) as f64
        } else {
            0.0
        };
        let p = (count + k) / self.denominators.unigram;

        self.unigram_memo.insert(word.to_string(), p);
        p
    }

    /// Add-k conditional probability `P(w2|w1)`.
    ///
    /// - degenerate vocabulary (`k·(V−2)` not positive): 0
    /// - seen pair: `(count(w1,w2) + k) / (count(w1) + k·(V−2))`
    /// - seen context, unseen pair: `k / (count(w1) + k·(V−2))`
    /// - unseen context: `k / k·(V−2)`
    pub fn smoothed_bigram(&self, bigram: &Bigram) -> f64 {
        if let Some(p) = self.bigram_memo.get(bigram) {
            return *p;
        }

        let k = self.smoothing.k();
        let base = self.denominators.bigram_base;
        let p = if base <= 0.0 {
            0.0
        } else {
            let context = self.model.unigram_count(&bigram.left) as f64;
            let pair = self.model.bigram_count(bigram);
            if pair > 0 {
                (pair as f64 + k) / (context + base)
            } else if self.model.unigrams().contains(bigram.left.as_str()) {
                k / (context + base)
            } else {
                k / base
            }
        };

        self.bigram_memo.insert(bigram.clone(), p);
        p
    }

    /// Convenience wrapper taking the two tokens separately
    pub fn smoothed_pair(&self, left: &str, right: &str) -> f64 {
        self.smoothed_bigram(&Bigram::new(left, right))
    }

    /// Number of memoized (unigram, bigram) entries
    pub fn memo_sizes(&self) -> (usize, usize) {
        (self.unigram_memo.len(), self.bigram_memo.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Corpus, Sentence};

    fn estimator(text: &str) -> ProbabilityEstimator {
        let corpus = Corpus::from_text(text).unwrap();
        let model = FrequencyModel::from_corpus(&corpus).unwrap();
        ProbabilityEstimator::new(model, Smoothing::default())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_smoothing_validation() {
        assert!(Smoothing::new(0.5).is_ok());
        assert!(Smoothing::new(1.0).is_ok());
        assert!(Smoothing::new(0.0).is_err());
        assert!(Smoothing::new(-1.0).is_err());
        assert!(Smoothing::new(f64::NAN).is_err());
        assert!(Smoothing::new(f64::INFINITY).is_err());
        assert_eq!(Smoothing::default().k(), DEFAULT_K);
    }

    #[test]
    fn test_denominators() {
        let d = Denominators::new(7, 6, Smoothing::default());
        assert!(approx(d.unigram, 10.0));
        assert!(approx(d.bigram_base, 2.0));
    }

    #[test]
    fn test_raw_unigram() {
        let e = estimator("the cat and the dog");
        assert!(approx(e.raw_unigram("the"), 2.0 / 7.0));
        assert!(approx(e.raw_unigram("cat"), 1.0 / 7.0));
        assert_eq!(e.raw_unigram("bird"), 0.0);
    }

    #[test]
    fn test_raw_bigram() {
        let e = estimator("the cat and the cat");
        let the = e.model().unigram_count("the") as f64;
        assert!(approx(e.raw_bigram(&Bigram::new("the", "cat")), 2.0 / the));
        assert_eq!(e.raw_bigram(&Bigram::new("bird", "cat")), 0.0);
        assert_eq!(e.raw_bigram(&Bigram::new("cat", "bird")), 0.0);
    }

    #[test]
    fn test_smoothed_unigram_always_positive() {
        let e = estimator("the cat");
        // N = 4, V = 4: (1 + 0.5) / (4 + 0.5 * 4)
        assert!(approx(e.smoothed_unigram("the"), 1.5 / 6.0));
        assert!(approx(e.smoothed_unigram("dog"), 0.5 / 6.0));
        assert!(e.smoothed_unigram("dog") > 0.0);
    }

    #[test]
    fn test_smoothed_bigram_branches() {
        let e = estimator("the cat");
        // V = 4 → base = 0.5 * 2 = 1
        let seen = e.smoothed_pair("the", "cat");
        let unseen_pair = e.smoothed_pair("the", "dog");
        let unseen_context = e.smoothed_pair("dog", "cat");

        assert!(approx(seen, (1.0 + 0.5) / (1.0 + 1.0)));
        assert!(approx(unseen_pair, 0.5 / (1.0 + 1.0)));
        assert!(approx(unseen_context, 0.5 / 1.0));
        assert!(unseen_pair > 0.0);
        assert!(unseen_pair < seen);
    }

    #[test]
    fn test_seen_bigram_formula() {
        let e = estimator("a b a b c. c a b. b b a!");
        let k = e.smoothing().k();
        let v = e.model().unigrams().len() as f64;
        for (bigram, count) in e.model().bigrams().by_count_desc() {
            let context = e.model().unigram_count(&bigram.left) as f64;
            let expected = (count as f64 + k) / (context + k * (v - 2.0));
            assert!(approx(e.smoothed_bigram(bigram), expected), "{bigram}");
        }
    }

    #[test]
    fn test_degenerate_vocabulary() {
        let corpus = Corpus::build(vec![Sentence {
            text: "".into(),
            tokens: vec![],
        }]);
        let model = FrequencyModel::from_corpus(&corpus).unwrap();
        let e = ProbabilityEstimator::new(model, Smoothing::default());
        assert_eq!(e.denominators().bigram_base, 0.0);
        assert_eq!(e.smoothed_pair("<s>", "</s>"), 0.0);
        assert!(e.smoothed_unigram("<s>") > 0.0);
    }

    #[test]
    fn test_memoization() {
        let e = estimator("the cat");
        assert_eq!(e.memo_sizes(), (0, 0));
        let first = e.smoothed_pair("the", "cat");
        let second = e.smoothed_pair("the", "cat");
        e.smoothed_unigram("the");
        e.smoothed_unigram("dog");
        assert_eq!(first, second);
        assert_eq!(e.memo_sizes(), (2, 1));
    }

    #[test]
    fn test_custom_k() {
        let corpus = Corpus::from_text("the cat").unwrap();
        let model = FrequencyModel::from_corpus(&corpus).unwrap();
        let e = ProbabilityEstimator::new(model, Smoothing::new(1.0).unwrap());
        // base = 1 * (4 - 2) = 2
        assert!(approx(e.smoothed_pair("the", "cat"), 2.0 / 3.0));
    }
}
