//! Interactive scoring: analyze once, then score lines from stdin
//!
//! `:clear` drops the session; later sentences report the no-session
//! error until the loop ends. `:quit` or EOF ends the loop.

use super::analyze::Context;
use corpus_analyzer::report::Report;
use corpus_analyzer::reporters::{self, OutputFormat};
use corpus_analyzer::session::Analyzer;

use anyhow::Result;
use console::style;
use std::io::{BufRead, Write};
use std::path::Path;

pub fn run(ctx: &Context, corpus: &Path) -> Result<()> {
    let mut analyzer = ctx.analyze(corpus)?;

    eprintln!(
        "{} Loaded {}. Type a sentence to score it, {} to drop the analysis, {} to exit.",
        style("✓").green(),
        style(corpus.display()).cyan(),
        style(":clear").bold(),
        style(":quit").bold()
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    score_lines(&mut analyzer, ctx.format, stdin.lock(), &mut stdout.lock())
}

/// Score every non-empty line of `input` until `:quit` or EOF.
fn score_lines<R: BufRead, W: Write>(
    analyzer: &mut Analyzer,
    format: OutputFormat,
    input: R,
    out: &mut W,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();

        match line {
            "" => continue,
            ":quit" | ":q" => break,
            ":clear" => {
                analyzer.clear();
                writeln!(out, "Analysis cleared")?;
            }
            sentence => match analyzer.score(sentence) {
                Ok(score) => {
                    let report = Report {
                        scores: vec![score],
                        ..Default::default()
                    };
                    write!(out, "{}", reporters::report_with_format(&report, format)?)?;
                    if format == OutputFormat::Json {
                        writeln!(out)?;
                    }
                }
                Err(e) => writeln!(out, "{} {}", style("error:").red().bold(), e)?,
            },
        }
        out.flush()?;
    }
    Ok(())
}
