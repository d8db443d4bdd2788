//! Shared command setup: effective settings, corpus analysis with a
//! progress spinner, and output.

use corpus_analyzer::config::AnalyzerConfig;
use corpus_analyzer::model::Smoothing;
use corpus_analyzer::report::Report;
use corpus_analyzer::reporters::{self, OutputFormat};
use corpus_analyzer::session::{Analyzer, Stage};

use anyhow::{Context as _, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Settings resolved from config files, environment and global flags.
pub struct Context {
    pub config: AnalyzerConfig,
    pub format: OutputFormat,
    pub smoothing: Smoothing,
}

impl Context {
    /// Flags win over config values.
    pub fn load(
        config_path: Option<&Path>,
        format: Option<&str>,
        smoothing: Option<f64>,
    ) -> Result<Self> {
        let config =
            AnalyzerConfig::load(config_path, smoothing).context("Failed to load configuration")?;

        let format = OutputFormat::from_str(format.unwrap_or(config.format()))?;
        let smoothing = config.smoothing()?;
        debug!("Effective settings: format={} k={}", format, smoothing.k());

        Ok(Self {
            config,
            format,
            smoothing,
        })
    }

    /// Row limit: the flag, else `[output] top`, else everything.
    pub fn top(&self, flag: Option<usize>) -> Option<usize> {
        flag.or(self.config.top())
    }

    /// Read and analyze a corpus file, showing the stages on a spinner.
    pub fn analyze(&self, corpus: &Path) -> Result<Analyzer> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(create_spinner_style()?);
        spinner.enable_steady_tick(Duration::from_millis(100));

        let observer = |stage: Stage| spinner.set_message(stage.message());

        let mut analyzer = Analyzer::new(self.smoothing);
        let result = analyzer.analyze_file(corpus, &observer).map(|_| ());
        spinner.finish_and_clear();

        result.with_context(|| format!("Failed to analyze {}", corpus.display()))?;
        Ok(analyzer)
    }

    /// Render a report in the selected format to stdout.
    pub fn emit(&self, report: &Report) -> Result<()> {
        let out = reporters::report_with_format(report, self.format)?;
        print!("{}", out);
        if self.format == OutputFormat::Json {
            println!();
        }
        Ok(())
    }
}

/// Create spinner progress style
fn create_spinner_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")?)
}
