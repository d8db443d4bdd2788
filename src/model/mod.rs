//! Bigram language model: frequency tables and probability estimation

mod estimator;
mod frequency;

pub use estimator::{Denominators, ProbabilityEstimator, Smoothing, DEFAULT_K};
pub use frequency::{FrequencyModel, FrequencyTable};
