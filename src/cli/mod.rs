//! CLI command definitions and handlers

mod analyze;
mod config;
mod interactive;
mod query;
mod tables;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use corpus_analyzer::model::Smoothing;
use std::path::PathBuf;

/// Parse the smoothing constant with the same rule the model enforces
fn parse_smoothing(s: &str) -> Result<f64, String> {
    let k: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    Smoothing::new(k)
        .map(|smoothing| smoothing.k())
        .map_err(|e| e.to_string())
}

/// corpus-analyzer - bigram language model over a text corpus
#[derive(Parser, Debug)]
#[command(name = "corpus-analyzer")]
#[command(
    version,
    about = "Bigram language model: unigram/bigram tables, add-k smoothing and sentence scoring",
    long_about = "corpus-analyzer reads a text corpus, splits it into sentences and word \
tokens, counts unigrams and bigrams, and estimates raw and add-k (Lidstone) smoothed \
probabilities. Sentences are scored by chaining smoothed bigram probabilities.",
    after_help = "\
Examples:
  corpus-analyzer stats corpus.txt                   Sentence, token and vocabulary counts
  corpus-analyzer bigrams corpus.txt --smoothed      Smoothed bigram table
  corpus-analyzer score corpus.txt \"the cat sat\"     Likelihood with per-bigram trace
  corpus-analyzer query corpus.txt bigram 'the|cat'  Raw and smoothed P(cat|the)
  corpus-analyzer report corpus.txt --format md      Everything as Markdown"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (overrides ./corpus-analyzer.toml and the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format: text, json, markdown (or md). Defaults to [output] format
    #[arg(long, short = 'f', global = true, value_parser = ["text", "json", "markdown", "md"])]
    pub format: Option<String>,

    /// Additive smoothing constant (overrides config and CORPUS_ANALYZER_K)
    #[arg(long, short = 'k', global = true, value_parser = parse_smoothing)]
    pub smoothing: Option<f64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sentence, token and vocabulary counts
    Stats {
        /// Corpus file
        corpus: PathBuf,
    },

    /// Numbered list of detected sentences
    Sentences {
        /// Corpus file
        corpus: PathBuf,
    },

    /// Unigram table in descending count order
    Unigrams {
        /// Corpus file
        corpus: PathBuf,

        /// Show add-k smoothed probabilities instead of raw ones
        #[arg(long)]
        smoothed: bool,

        /// Maximum rows to show (default: [output] top, else all)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Bigram table in descending count order
    Bigrams {
        /// Corpus file
        corpus: PathBuf,

        /// Show add-k smoothed probabilities instead of raw ones
        #[arg(long)]
        smoothed: bool,

        /// Maximum rows to show (default: [output] top, else all)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Smoothed bigram probability matrix (row = context, column = next word)
    Matrix {
        /// Corpus file
        corpus: PathBuf,

        /// Decimal places per cell (default: [output] precision)
        #[arg(long)]
        precision: Option<usize>,

        /// Print even if the vocabulary exceeds [matrix] max_vocabulary
        #[arg(long)]
        force: bool,
    },

    /// Score sentences against the corpus model
    Score {
        /// Corpus file
        corpus: PathBuf,

        /// Sentences to score, one result each
        #[arg(required = true, num_args = 1..)]
        sentences: Vec<String>,
    },

    /// Raw and smoothed probability of a single unigram or bigram
    #[command(after_help = "\
Examples:
  corpus-analyzer query corpus.txt unigram the
  corpus-analyzer query corpus.txt bigram 'the|cat'")]
    Query {
        /// Corpus file
        corpus: PathBuf,

        /// Key type
        #[arg(value_enum)]
        kind: QueryKind,

        /// A word, or `w1|w2` for bigrams
        key: String,
    },

    /// Stats, sentences and every table in one document
    Report {
        /// Corpus file
        corpus: PathBuf,

        /// Maximum rows per table (default: [output] top, else all)
        #[arg(long)]
        top: Option<usize>,

        /// Include the smoothed probability matrix
        #[arg(long)]
        matrix: bool,
    },

    /// Analyze once, then score sentences read from stdin
    ///
    /// Commands: `:clear` drops the analysis, `:quit` exits.
    Interactive {
        /// Corpus file
        corpus: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryKind {
    Unigram,
    Bigram,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write an example user config file
    Init,
    /// Show the effective configuration and where it was loaded from
    Show,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let Cli {
        config: config_path,
        format,
        smoothing,
        command,
        ..
    } = cli;
    let ctx = || analyze::Context::load(config_path.as_deref(), format.as_deref(), smoothing);

    match command {
        Commands::Stats { corpus } => tables::stats(&ctx()?, &corpus),
        Commands::Sentences { corpus } => tables::sentences(&ctx()?, &corpus),
        Commands::Unigrams {
            corpus,
            smoothed,
            top,
        } => tables::unigrams(&ctx()?, &corpus, smoothed, top),
        Commands::Bigrams {
            corpus,
            smoothed,
            top,
        } => tables::bigrams(&ctx()?, &corpus, smoothed, top),
        Commands::Matrix {
            corpus,
            precision,
            force,
        } => tables::matrix(&ctx()?, &corpus, precision, force),
        Commands::Score { corpus, sentences } => query::score(&ctx()?, &corpus, &sentences),
        Commands::Query { corpus, kind, key } => query::lookup(&ctx()?, &corpus, kind, &key),
        Commands::Report {
            corpus,
            top,
            matrix,
        } => tables::report(&ctx()?, &corpus, top, matrix),
        Commands::Interactive { corpus } => interactive::run(&ctx()?, &corpus),
        Commands::Config { action } => match action {
            ConfigAction::Init => config::init(),
            ConfigAction::Show => config::show(config_path.as_deref(), smoothing),
        },
    }
}
