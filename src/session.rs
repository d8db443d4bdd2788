//! Analysis sessions
//!
//! An [`AnalysisSession`] is one complete generation of analysis state: the
//! corpus, its frequency tables, denominators and memo caches. The
//! [`Analyzer`] holds at most one session and replaces it wholesale on every
//! `analyze`/`clear`. Both take `&mut self`, so no query can overlap a
//! running analysis and at most one analysis is in flight.

use crate::corpus::{Bigram, Corpus};
use crate::error::{AnalyzerResult, InputError};
use crate::input::{read_corpus, Encoding};
use crate::model::{FrequencyModel, ProbabilityEstimator, Smoothing};
use crate::scorer::{SentenceScore, SentenceScorer};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Stages reported while an analysis runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Reading,
    Tokenizing,
    Counting,
    Estimating,
    Done,
}

impl Stage {
    pub fn message(&self) -> &'static str {
        match self {
            Stage::Reading => "Reading corpus...",
            Stage::Tokenizing => "Splitting sentences and words...",
            Stage::Counting => "Counting unigrams and bigrams...",
            Stage::Estimating => "Preparing probability estimator...",
            Stage::Done => "Analysis complete",
        }
    }
}

/// Receives stage notifications from an analysis.
pub trait ProgressObserver {
    fn stage(&self, stage: Stage);
}

impl<F: Fn(Stage)> ProgressObserver for F {
    fn stage(&self, stage: Stage) {
        self(stage)
    }
}

/// Observer that ignores every notification.
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn stage(&self, _stage: Stage) {}
}

/// Where the session's text came from.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusSource {
    pub path: Option<PathBuf>,
    pub encoding: Option<Encoding>,
}

/// One complete, read-only analysis of a corpus.
#[derive(Debug)]
pub struct AnalysisSession {
    source: CorpusSource,
    corpus: Corpus,
    estimator: ProbabilityEstimator,
}

impl AnalysisSession {
    /// Build a session from raw text.
    pub fn from_text(
        raw: &str,
        smoothing: Smoothing,
        progress: &dyn ProgressObserver,
    ) -> AnalyzerResult<Self> {
        Self::build(
            raw,
            CorpusSource {
                path: None,
                encoding: None,
            },
            smoothing,
            progress,
        )
    }

    /// Read and analyze a corpus file.
    pub fn from_file(
        path: &Path,
        smoothing: Smoothing,
        progress: &dyn ProgressObserver,
    ) -> AnalyzerResult<Self> {
        progress.stage(Stage::Reading);
        let input = read_corpus(path)?;
        Self::build(
            &input.text,
            CorpusSource {
                path: Some(input.path),
                encoding: Some(input.encoding),
            },
            smoothing,
            progress,
        )
    }

    fn build(
        raw: &str,
        source: CorpusSource,
        smoothing: Smoothing,
        progress: &dyn ProgressObserver,
    ) -> AnalyzerResult<Self> {
        let start = Instant::now();

        progress.stage(Stage::Tokenizing);
        let corpus = Corpus::from_text(raw)?;

        progress.stage(Stage::Counting);
        let model = FrequencyModel::from_corpus(&corpus)?;

        progress.stage(Stage::Estimating);
        let estimator = ProbabilityEstimator::new(model, smoothing);

        progress.stage(Stage::Done);
        info!(
            "Analyzed {} sentences, {} tokens, {} vocabulary in {:?}",
            corpus.sentence_count(),
            corpus.all_tokens().len(),
            corpus.vocabulary().len(),
            start.elapsed()
        );

        Ok(Self {
            source,
            corpus,
            estimator,
        })
    }

    pub fn source(&self) -> &CorpusSource {
        &self.source
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn model(&self) -> &FrequencyModel {
        self.estimator.model()
    }

    pub fn estimator(&self) -> &ProbabilityEstimator {
        &self.estimator
    }

    pub fn scorer(&self) -> SentenceScorer<'_> {
        SentenceScorer::new(&self.estimator)
    }
}

/// Owner of the current analysis session.
#[derive(Debug, Default)]
pub struct Analyzer {
    smoothing: Smoothing,
    session: Option<AnalysisSession>,
}

impl Analyzer {
    pub fn new(smoothing: Smoothing) -> Self {
        Self {
            smoothing,
            session: None,
        }
    }

    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Analyze a corpus file, replacing any previous session.
    ///
    /// The previous session is cleared first; if the analysis fails the
    /// analyzer is left empty.
    pub fn analyze_file(
        &mut self,
        path: &Path,
        progress: &dyn ProgressObserver,
    ) -> AnalyzerResult<&AnalysisSession> {
        self.clear();
        let session = AnalysisSession::from_file(path, self.smoothing, progress)?;
        Ok(self.session.insert(session))
    }

    /// Analyze raw text, replacing any previous session.
    pub fn analyze_text(
        &mut self,
        raw: &str,
        progress: &dyn ProgressObserver,
    ) -> AnalyzerResult<&AnalysisSession> {
        self.clear();
        let session = AnalysisSession::from_text(raw, self.smoothing, progress)?;
        Ok(self.session.insert(session))
    }

    /// Drop the current session and everything it owns.
    pub fn clear(&mut self) {
        if self.session.take().is_some() {
            info!("Cleared analysis session");
        }
    }

    /// The current session, or [`InputError::NoSession`].
    pub fn session(&self) -> Result<&AnalysisSession, InputError> {
        self.session.as_ref().ok_or(InputError::NoSession)
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn raw_unigram(&self, word: &str) -> Result<f64, InputError> {
        Ok(self.session()?.estimator().raw_unigram(word))
    }

    pub fn raw_bigram(&self, bigram: &Bigram) -> Result<f64, InputError> {
        Ok(self.session()?.estimator().raw_bigram(bigram))
    }

    pub fn smoothed_unigram(&self, word: &str) -> Result<f64, InputError> {
        Ok(self.session()?.estimator().smoothed_unigram(word))
    }

    pub fn smoothed_bigram(&self, bigram: &Bigram) -> Result<f64, InputError> {
        Ok(self.session()?.estimator().smoothed_bigram(bigram))
    }

    pub fn score(&self, sentence: &str) -> Result<SentenceScore, InputError> {
        Ok(self.session()?.scorer().score(sentence))
    }
}
