//! Configuration for corpus-analyzer
//!
//! This module handles:
//! - User and project configuration files (TOML)
//! - Environment overrides
//! - Defaults for smoothing and output

mod user_config;

pub use user_config::{
    AnalyzerConfig, MatrixConfig, OutputConfig, SmoothingConfig, ENV_SMOOTHING_K,
    PROJECT_CONFIG_FILE,
};
