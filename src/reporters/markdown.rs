//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Tables use pipes, so `|` inside a cell (bigram keys) is escaped.

use crate::report::{
    BigramTable, CorpusStats, ProbabilityMatrix, QueryResult, Report, SentenceRow, UnigramTable,
};
use crate::scorer::SentenceScore;
use anyhow::Result;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &Report) -> Result<String> {
    let mut md = String::from("# Corpus Analysis Report\n");

    if let Some(stats) = &report.stats {
        md.push('\n');
        md.push_str(&render_stats(stats));
    }
    if let Some(sentences) = &report.sentences {
        md.push('\n');
        md.push_str(&render_sentences(sentences));
    }
    for table in &report.unigrams {
        md.push('\n');
        md.push_str(&render_unigrams(table));
    }
    for table in &report.bigrams {
        md.push('\n');
        md.push_str(&render_bigrams(table));
    }
    if let Some(matrix) = &report.matrix {
        md.push('\n');
        md.push_str(&render_matrix(matrix));
    }
    for score in &report.scores {
        md.push('\n');
        md.push_str(&render_score(score));
    }
    if let Some(query) = &report.query {
        md.push('\n');
        md.push_str(&render_query(query));
    }

    md.push_str("\n---\n\n*Generated by corpus-analyzer*\n");
    Ok(md)
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}

fn render_stats(stats: &CorpusStats) -> String {
    let mut md = String::from("## Summary\n\n| Metric | Value |\n|--------|-------|\n");
    if let Some(source) = &stats.source {
        md.push_str(&format!("| File | `{}` |\n", escape(source)));
    }
    if let Some(encoding) = &stats.encoding {
        md.push_str(&format!("| Encoding | {} |\n", encoding));
    }
    md.push_str(&format!("| Sentences | {} |\n", stats.sentences));
    md.push_str(&format!("| Tokens | {} |\n", stats.tokens));
    md.push_str(&format!("| Vocabulary | {} |\n", stats.vocabulary));
    md.push_str(&format!(
        "| Bigrams | {} ({} distinct) |\n",
        stats.bigrams, stats.distinct_bigrams
    ));
    md.push_str(&format!("| Smoothing k | {} |\n", stats.k));
    md
}

fn render_sentences(rows: &[SentenceRow]) -> String {
    let mut md = String::from("## Sentences\n\n");
    for row in rows {
        md.push_str(&format!("{}. {}\n", row.index, row.text));
    }
    md
}

fn caption(rows: usize, total: usize) -> String {
    if rows < total {
        format!("*Showing top {} of {} rows.*\n\n", rows, total)
    } else {
        String::new()
    }
}

fn render_unigrams(table: &UnigramTable) -> String {
    let mut md = format!("## Unigrams ({})\n\n", table.estimate);
    md.push_str(&caption(table.rows.len(), table.total_rows));
    md.push_str("| # | Token | Count | Probability |\n|---|-------|-------|-------------|\n");
    for row in &table.rows {
        md.push_str(&format!(
            "| {} | `{}` | {} | {} |\n",
            row.index,
            escape(&row.token),
            row.count,
            row.probability
        ));
    }
    md
}

fn render_bigrams(table: &BigramTable) -> String {
    let mut md = format!("## Bigrams ({})\n\n", table.estimate);
    md.push_str(&caption(table.rows.len(), table.total_rows));
    md.push_str("| # | Bigram | Count | Probability |\n|---|--------|-------|-------------|\n");
    for row in &table.rows {
        md.push_str(&format!(
            "| {} | `{}` | {} | {} |\n",
            row.index,
            escape(&row.bigram),
            row.count,
            row.probability
        ));
    }
    md
}

fn render_matrix(matrix: &ProbabilityMatrix) -> String {
    let precision = matrix.precision;
    let mut md = String::from("## Smoothed Bigram Matrix\n\nRows are contexts, columns the following word.\n\n|   |");
    for word in &matrix.vocabulary {
        md.push_str(&format!(" `{}` |", escape(word)));
    }
    md.push_str("\n|---|");
    for _ in &matrix.vocabulary {
        md.push_str("---|");
    }
    md.push('\n');

    for (context, row) in matrix.vocabulary.iter().zip(&matrix.rows) {
        md.push_str(&format!("| **`{}`** |", escape(context)));
        for p in row {
            md.push_str(&format!(" {:.precision$} |", p));
        }
        md.push('\n');
    }
    md
}

fn render_score(score: &SentenceScore) -> String {
    let mut md = format!("## Score: {}\n\n", score.sentence);
    md.push_str("```\n");
    for step in &score.trace {
        md.push_str(&step.line());
        md.push('\n');
    }
    md.push_str("```\n\n");
    md.push_str(&format!(
        "- **Likelihood:** {:e}\n- **Log-likelihood:** {:.4}\n- **Perplexity:** {:.4}\n",
        score.likelihood, score.log_likelihood, score.perplexity
    ));
    md
}

fn render_query(query: &QueryResult) -> String {
    match query {
        QueryResult::Unigram {
            word,
            count,
            in_vocabulary,
            raw,
            smoothed,
        } => format!(
            "## Unigram `{}`\n\n| Count | In vocabulary | Raw | Smoothed |\n|-------|---------------|-----|----------|\n| {} | {} | {} | {} |\n",
            escape(word),
            count,
            if *in_vocabulary { "yes" } else { "no" },
            raw,
            smoothed
        ),
        QueryResult::Bigram {
            bigram,
            count,
            context_count,
            raw,
            smoothed,
        } => format!(
            "## Bigram `{}`\n\n| Count | Context count | Raw | Smoothed |\n|-------|---------------|-----|----------|\n| {} | {} | {} | {} |\n",
            escape(bigram),
            count,
            context_count,
            raw,
            smoothed
        ),
    }
}
