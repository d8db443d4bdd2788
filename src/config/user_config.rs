//! Analyzer configuration
//!
//! Supports loading config from (lowest to highest priority):
//! - ~/.config/corpus-analyzer/config.toml
//! - ./corpus-analyzer.toml
//! - an explicit `--config` file
//! - environment variables (`CORPUS_ANALYZER_K`)
//! - the `-k/--smoothing` flag
//!
//! ```toml
//! [smoothing]
//! k = 0.5
//!
//! [output]
//! format = "text"   # text, json, markdown
//! precision = 3     # decimals in the probability matrix
//! top = 50          # default row limit for tables
//!
//! [matrix]
//! max_vocabulary = 200
//! ```

use crate::error::ConfigError;
use crate::model::{Smoothing, DEFAULT_K};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Project-local config file name
pub const PROJECT_CONFIG_FILE: &str = "corpus-analyzer.toml";

/// Environment variable overriding the smoothing constant
pub const ENV_SMOOTHING_K: &str = "CORPUS_ANALYZER_K";

const DEFAULT_FORMAT: &str = "text";
const DEFAULT_PRECISION: usize = 3;
const DEFAULT_MAX_MATRIX_VOCABULARY: usize = 200;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub smoothing: SmoothingConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub matrix: MatrixConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct SmoothingConfig {
    /// Additive smoothing constant (default: 0.5)
    pub k: Option<f64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Default output format: text, json, markdown
    pub format: Option<String>,

    /// Decimal places for matrix cells (default: 3)
    pub precision: Option<usize>,

    /// Default row limit for unigram/bigram tables (default: all)
    pub top: Option<usize>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct MatrixConfig {
    /// Largest vocabulary rendered as a full matrix without --force (default: 200)
    pub max_vocabulary: Option<usize>,
}

impl AnalyzerConfig {
    /// Load config from all sources, with priority:
    /// 1. Smoothing flag (highest)
    /// 2. Environment variables
    /// 3. Explicit config file
    /// 4. Project config (./corpus-analyzer.toml)
    /// 5. User config (~/.config/corpus-analyzer/config.toml)
    pub fn load(explicit: Option<&Path>, flag_k: Option<f64>) -> Result<Self, ConfigError> {
        let user = Self::user_config_path();
        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        let env_k = std::env::var(ENV_SMOOTHING_K).ok();
        Self::load_layers(
            user.as_deref(),
            Some(project.as_path()),
            explicit,
            env_k.as_deref(),
            flag_k,
        )
    }

    /// Layered load with every source passed in explicitly.
    ///
    /// Implicit files (user, project) that fail to parse are skipped with a
    /// warning; an explicit file must exist and parse. `k` is validated once,
    /// after every layer is applied, so a flag value replaces a bad lower one.
    pub fn load_layers(
        user: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
        env_k: Option<&str>,
        flag_k: Option<f64>,
    ) -> Result<Self, ConfigError> {
        let mut config = AnalyzerConfig::default();

        for path in [user, project].into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(layer) => {
                    debug!("Loaded config from {}", path.display());
                    config.merge(layer);
                }
                Err(e) => warn!("Ignoring config: {}", e),
            }
        }

        if let Some(path) = explicit {
            config.merge(Self::from_file(path)?);
            debug!("Loaded config from {}", path.display());
        }

        if let Some(raw) = env_k {
            match raw.trim().parse::<f64>() {
                Ok(k) => config.smoothing.k = Some(k),
                Err(_) if flag_k.is_some() => {
                    warn!("Ignoring {}='{}': overridden by --smoothing", ENV_SMOOTHING_K, raw)
                }
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_SMOOTHING_K.to_string(),
                        message: format!("'{}' is not a number", raw),
                    });
                }
            }
        }

        if let Some(k) = flag_k {
            config.smoothing.k = Some(k);
        }

        config.smoothing()?;
        Ok(config)
    }

    /// Parse a single TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("corpus-analyzer").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: AnalyzerConfig) {
        if other.smoothing.k.is_some() {
            self.smoothing.k = other.smoothing.k;
        }
        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
        if other.output.precision.is_some() {
            self.output.precision = other.output.precision;
        }
        if other.output.top.is_some() {
            self.output.top = other.output.top;
        }
        if other.matrix.max_vocabulary.is_some() {
            self.matrix.max_vocabulary = other.matrix.max_vocabulary;
        }
    }

    /// Validated smoothing constant
    pub fn smoothing(&self) -> Result<Smoothing, ConfigError> {
        Smoothing::new(self.smoothing.k.unwrap_or(DEFAULT_K))
    }

    pub fn format(&self) -> &str {
        self.output.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }

    pub fn precision(&self) -> usize {
        self.output.precision.unwrap_or(DEFAULT_PRECISION)
    }

    pub fn top(&self) -> Option<usize> {
        self.output.top
    }

    pub fn max_matrix_vocabulary(&self) -> usize {
        self.matrix
            .max_vocabulary
            .unwrap_or(DEFAULT_MAX_MATRIX_VOCABULARY)
    }

    /// Create the user config directory and an example config
    pub fn init_user_config() -> Result<PathBuf, ConfigError> {
        let config_path = Self::user_config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::write_example(&config_path)?;
        Ok(config_path)
    }

    /// Write the example config to `path` unless a file is already there.
    pub fn write_example(path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        if !path.exists() {
            let example = r#"# corpus-analyzer configuration

[smoothing]
# Additive (Lidstone) smoothing constant
# k = 0.5

[output]
# format = "text"   # text, json, markdown
# precision = 3     # decimals in the smoothed bigram matrix
# top = 50          # rows shown in unigram/bigram tables

[matrix]
# Vocabularies larger than this need --force to print a full matrix
# max_vocabulary = 200
"#;
            std::fs::write(path, example).map_err(write_err)?;
        }

        Ok(())
    }
}
