//! Text (terminal) reporter
//!
//! Styling goes through `console`, so `--no-color` and non-terminal output
//! get plain text.

use crate::report::{
    BigramTable, CorpusStats, ProbabilityMatrix, QueryResult, Report, SentenceRow, UnigramTable,
};
use crate::scorer::SentenceScore;
use anyhow::Result;
use console::style;

const RULE: &str = "──────────────────────────────────────";

/// Render report as formatted terminal output
pub fn render(report: &Report) -> Result<String> {
    let mut out = String::new();

    if let Some(stats) = &report.stats {
        out.push_str(&render_stats(stats));
    }
    if let Some(sentences) = &report.sentences {
        out.push_str(&render_sentences(sentences));
    }
    for table in &report.unigrams {
        out.push_str(&render_unigrams(table));
    }
    for table in &report.bigrams {
        out.push_str(&render_bigrams(table));
    }
    if let Some(matrix) = &report.matrix {
        out.push_str(&render_matrix(matrix));
    }
    for score in &report.scores {
        out.push_str(&render_score(score));
    }
    if let Some(query) = &report.query {
        out.push_str(&render_query(query));
    }

    Ok(out)
}

fn heading(title: &str) -> String {
    format!("\n{}\n{}\n", style(title).bold(), style(RULE).dim())
}

fn render_stats(stats: &CorpusStats) -> String {
    let mut out = heading("CORPUS");
    if let Some(source) = &stats.source {
        out.push_str(&format!("  File:        {}\n", source));
    }
    if let Some(encoding) = &stats.encoding {
        out.push_str(&format!("  Encoding:    {}\n", encoding));
    }
    out.push_str(&format!(
        "  Sentences:   {}\n  Tokens:      {}\n  Vocabulary:  {}\n",
        style(stats.sentences).cyan(),
        style(stats.tokens).cyan(),
        style(stats.vocabulary).cyan()
    ));
    out.push_str(&format!(
        "  Bigrams:     {} ({} distinct)\n  Smoothing k: {}\n",
        stats.bigrams, stats.distinct_bigrams, stats.k
    ));
    out
}

fn render_sentences(rows: &[SentenceRow]) -> String {
    let mut out = heading(&format!("SENTENCES ({})", rows.len()));
    for row in rows {
        out.push_str(&format!("{} - {}\n", row.index, row.text));
    }
    out
}

fn shown(rows: usize, total: usize) -> String {
    if rows < total {
        format!("top {} of {}", rows, total)
    } else {
        format!("{}", total)
    }
}

fn render_unigrams(table: &UnigramTable) -> String {
    let mut out = heading(&format!(
        "UNIGRAMS {} ({})",
        table.estimate.to_string().to_uppercase(),
        shown(table.rows.len(), table.total_rows)
    ));
    let width = table
        .rows
        .iter()
        .map(|r| r.token.chars().count())
        .max()
        .unwrap_or(0)
        .max("TOKEN".len());

    out.push_str(&format!(
        "{}\n",
        style(format!(
            "  {:>5}  {:<width$}  {:>7}  PROBABILITY",
            "#", "TOKEN", "COUNT"
        ))
        .dim()
    ));
    for row in &table.rows {
        out.push_str(&format!(
            "  {:>5}  {:<width$}  {:>7}  {}\n",
            row.index, row.token, row.count, row.probability
        ));
    }
    out
}

fn render_bigrams(table: &BigramTable) -> String {
    let mut out = heading(&format!(
        "BIGRAMS {} ({})",
        table.estimate.to_string().to_uppercase(),
        shown(table.rows.len(), table.total_rows)
    ));
    let labels: Vec<String> = table
        .rows
        .iter()
        .map(|r| r.pair.conditional_label())
        .collect();
    let width = labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max("BIGRAM".len());

    out.push_str(&format!(
        "{}\n",
        style(format!(
            "  {:>5}  {:<width$}  {:>7}  PROBABILITY",
            "#", "BIGRAM", "COUNT"
        ))
        .dim()
    ));
    for (row, label) in table.rows.iter().zip(&labels) {
        out.push_str(&format!(
            "  {:>5}  {:<width$}  {:>7}  {}\n",
            row.index, label, row.count, row.probability
        ));
    }
    out
}

fn render_matrix(matrix: &ProbabilityMatrix) -> String {
    let mut out = heading(&format!(
        "SMOOTHED BIGRAM MATRIX ({0}x{0}, row = context)",
        matrix.size()
    ));
    let precision = matrix.precision;
    let label_width = matrix
        .vocabulary
        .iter()
        .map(|w| w.chars().count())
        .max()
        .unwrap_or(0);
    // "0." plus the decimals
    let cell_width = label_width.max(precision + 2);

    let mut header = format!("{:<label_width$}", "");
    for word in &matrix.vocabulary {
        header.push_str(&format!("  {:>cell_width$}", word));
    }
    out.push_str(&format!("{}\n", style(header).bold()));

    for (context, row) in matrix.vocabulary.iter().zip(&matrix.rows) {
        out.push_str(&format!("{}", style(format!("{:<label_width$}", context)).bold()));
        for p in row {
            out.push_str(&format!("  {:>cell_width$.precision$}", p));
        }
        out.push('\n');
    }
    out
}

fn render_score(score: &SentenceScore) -> String {
    let mut out = heading(&format!("SCORE: {}", score.sentence));
    for step in &score.trace {
        out.push_str(&format!("  {}\n", step.line()));
    }
    out.push_str(&format!(
        "  {} {:e}\n",
        style("Likelihood:").bold(),
        score.likelihood
    ));
    out.push_str(&format!(
        "  {} {:.4}   {} {:.4}\n",
        style("Log-likelihood:").dim(),
        score.log_likelihood,
        style("Perplexity:").dim(),
        score.perplexity
    ));
    out
}

fn render_query(query: &QueryResult) -> String {
    match query {
        QueryResult::Unigram {
            word,
            count,
            in_vocabulary,
            raw,
            smoothed,
        } => {
            let mut out = heading(&format!("UNIGRAM: {}", word));
            out.push_str(&format!("  Count:     {}\n", count));
            if !in_vocabulary {
                out.push_str(&format!("  {}\n", style("(not in vocabulary)").yellow()));
            }
            out.push_str(&format!("  Raw:       {}\n  Smoothed:  {}\n", raw, smoothed));
            out
        }
        QueryResult::Bigram {
            bigram,
            count,
            context_count,
            raw,
            smoothed,
        } => {
            let mut out = heading(&format!("BIGRAM: {}", bigram));
            out.push_str(&format!(
                "  Count:     {}\n  Context:   {}\n",
                count, context_count
            ));
            out.push_str(&format!("  Raw:       {}\n  Smoothed:  {}\n", raw, smoothed));
            out
        }
    }
}
