//! Error types for corpus analysis
//!
//! Input problems (missing file, undecodable bytes, empty corpus, no active
//! session) are reported to the caller and abort the analysis. Probability
//! lookups against unseen contexts are NOT errors; they resolve through the
//! smoothing branches in [`crate::model::ProbabilityEstimator`].

use std::path::PathBuf;
use thiserror::Error;

/// Problems with the text handed to the analyzer, or with asking for
/// results when no corpus has been analyzed.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Corpus file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decode {} (tried {tried})", path.display())]
    Decode { path: PathBuf, tried: String },

    #[error("Corpus contains no word tokens after normalization")]
    EmptyCorpus,

    #[error("No corpus analyzed. Run an analysis first")]
    NoSession,
}

/// Malformed lookup keys supplied by a caller.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("Malformed bigram '{0}': expected exactly two tokens written as 'w1|w2'")]
    MalformedBigram(String),
}

/// Violations of the invariants tying the frequency tables to their corpus.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelError {
    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),
}

/// Invalid configuration values or unreadable config files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Smoothing constant must be a finite number greater than 0, got {0}")]
    InvalidSmoothing(f64),

    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine the user config directory")]
    NoConfigDir,

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Top-level error for analyzer operations.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

impl AnalyzerError {
    /// True when the error means "analyze something first".
    pub fn is_no_session(&self) -> bool {
        matches!(self, AnalyzerError::Input(InputError::NoSession))
    }
}
