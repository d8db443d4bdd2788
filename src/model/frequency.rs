//! Unigram and bigram frequency tables

use crate::corpus::{Bigram, Corpus};
use crate::error::ModelError;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counts keyed by token or bigram.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    counts: HashMap<K, usize>,
    total: usize,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            total: 0,
        }
    }
}

impl<K: Eq + Hash + Ord + Clone> FrequencyTable<K> {
    /// Count every item of `items`.
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut table = Self::default();
        for item in items {
            *table.counts.entry(item.clone()).or_insert(0) += 1;
            table.total += 1;
        }
        table
    }

    /// Count for `key`, 0 if never observed.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.contains_key(key)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries by descending count, ties broken by key order.
    pub fn by_count_desc(&self) -> Vec<(&K, usize)> {
        let mut entries: Vec<(&K, usize)> = self.counts.iter().map(|(k, c)| (k, *c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Unigram and bigram counts for one corpus.
#[derive(Debug, Clone, Default)]
pub struct FrequencyModel {
    unigrams: FrequencyTable<String>,
    bigrams: FrequencyTable<Bigram>,
}

impl FrequencyModel {
    /// Count unigrams over the flat token stream and bigrams over the padded stream.
    pub fn from_corpus(corpus: &Corpus) -> Result<Self, ModelError> {
        let model = Self {
            unigrams: FrequencyTable::from_items(corpus.all_tokens()),
            bigrams: FrequencyTable::from_items(corpus.bigram_stream()),
        };
        model.check_consistency()?;
        Ok(model)
    }

    /// Every bigram context must also be a counted unigram.
    pub fn check_consistency(&self) -> Result<(), ModelError> {
        for (bigram, _) in self.bigrams.counts.iter() {
            if !self.unigrams.contains(bigram.left.as_str()) {
                return Err(ModelError::InternalInconsistency(format!(
                    "bigram '{}' has context '{}' missing from the unigram table",
                    bigram, bigram.left
                )));
            }
        }
        Ok(())
    }

    pub fn unigrams(&self) -> &FrequencyTable<String> {
        &self.unigrams
    }

    pub fn bigrams(&self) -> &FrequencyTable<Bigram> {
        &self.bigrams
    }

    pub fn unigram_count(&self, word: &str) -> usize {
        self.unigrams.count(word)
    }

    pub fn bigram_count(&self, bigram: &Bigram) -> usize {
        self.bigrams.count(bigram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(text: &str) -> FrequencyModel {
        FrequencyModel::from_corpus(&Corpus::from_text(text).unwrap()).unwrap()
    }

    #[test]
    fn test_unigram_counts() {
        let m = model("the cat and the dog");
        assert_eq!(m.unigram_count("the"), 2);
        assert_eq!(m.unigram_count("cat"), 1);
        assert_eq!(m.unigram_count("<s>"), 1);
        assert_eq!(m.unigram_count("</s>"), 1);
        assert_eq!(m.unigram_count("bird"), 0);
        assert_eq!(m.unigrams().total(), 7);
    }

    #[test]
    fn test_bigram_counts() {
        let m = model("the cat and the cat");
        assert_eq!(m.bigram_count(&Bigram::new("the", "cat")), 2);
        assert_eq!(m.bigram_count(&Bigram::new("<s>", "the")), 1);
        assert_eq!(m.bigram_count(&Bigram::new("cat", "</s>")), 1);
        assert_eq!(m.bigram_count(&Bigram::new("cat", "the")), 0);
    }

    #[test]
    fn test_totals_match_streams() {
        let text = "a b a c. b b c! c a b a? the end";
        let corpus = Corpus::from_text(text).unwrap();
        let m = FrequencyModel::from_corpus(&corpus).unwrap();
        let unigram_sum: usize = m.unigrams().by_count_desc().iter().map(|(_, c)| c).sum();
        let bigram_sum: usize = m.bigrams().by_count_desc().iter().map(|(_, c)| c).sum();
        assert_eq!(unigram_sum, corpus.all_tokens().len());
        assert_eq!(bigram_sum, corpus.bigram_stream().len());
        assert_eq!(m.unigrams().total(), unigram_sum);
        assert_eq!(m.bigrams().total(), bigram_sum);
    }

    #[test]
    fn test_descending_order_with_tiebreak() {
        let m = model("b a b c");
        let order: Vec<&str> = m
            .unigrams()
            .by_count_desc()
            .into_iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(order, vec!["b", "</s>", "<s>", "a", "c"]);
    }

    #[test]
    fn test_inconsistency_detected() {
        let mut m = model("the cat");
        m.bigrams = FrequencyTable::from_items(&[Bigram::new("ghost", "cat")]);
        assert!(matches!(
            m.check_consistency(),
            Err(ModelError::InternalInconsistency(_))
        ));
    }
}
