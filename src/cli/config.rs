//! Config command - write or show configuration

use corpus_analyzer::config::{
    AnalyzerConfig, MatrixConfig, OutputConfig, SmoothingConfig, ENV_SMOOTHING_K,
    PROJECT_CONFIG_FILE,
};

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Write the example user config unless one exists
pub fn init() -> Result<()> {
    let path = AnalyzerConfig::init_user_config().context("Failed to create user config")?;
    println!(
        "{} User config at {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    Ok(())
}

/// Print the effective configuration as TOML
pub fn show(explicit: Option<&Path>, smoothing: Option<f64>) -> Result<()> {
    let config =
        AnalyzerConfig::load(explicit, smoothing).context("Failed to load configuration")?;

    println!("{}", style("# Sources (lowest to highest priority)").dim());
    if let Some(user) = AnalyzerConfig::user_config_path() {
        println!("{}", source_line(&user, "user"));
    }
    println!("{}", source_line(Path::new(PROJECT_CONFIG_FILE), "project"));
    if let Some(path) = explicit {
        println!("{}", source_line(path, "--config"));
    }
    if let Ok(k) = std::env::var(ENV_SMOOTHING_K) {
        println!("{}", style(format!("#   {}={}", ENV_SMOOTHING_K, k)).dim());
    }
    if let Some(k) = smoothing {
        println!("{}", style(format!("#   --smoothing {}", k)).dim());
    }
    println!();

    let effective = AnalyzerConfig {
        smoothing: SmoothingConfig {
            k: Some(config.smoothing()?.k()),
        },
        output: OutputConfig {
            format: Some(config.format().to_string()),
            precision: Some(config.precision()),
            top: config.top(),
        },
        matrix: MatrixConfig {
            max_vocabulary: Some(config.max_matrix_vocabulary()),
        },
    };
    print!(
        "{}",
        toml::to_string_pretty(&effective).context("Failed to serialize configuration")?
    );
    Ok(())
}

fn source_line(path: &Path, label: &str) -> String {
    let state = if path.exists() { "found" } else { "missing" };
    style(format!("#   {:<9} {} ({})", label, path.display(), state))
        .dim()
        .to_string()
}
