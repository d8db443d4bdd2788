//! Score and query commands

use super::analyze::Context;
use super::QueryKind;
use corpus_analyzer::report::{QueryResult, Report};

use anyhow::{Context as _, Result};
use std::path::Path;

pub fn score(ctx: &Context, corpus: &Path, sentences: &[String]) -> Result<()> {
    let analyzer = ctx.analyze(corpus)?;
    let scores = sentences
        .iter()
        .map(|s| analyzer.score(s))
        .collect::<Result<Vec<_>, _>>()?;

    ctx.emit(&Report {
        scores,
        ..Default::default()
    })
}

pub fn lookup(ctx: &Context, corpus: &Path, kind: QueryKind, key: &str) -> Result<()> {
    let analyzer = ctx.analyze(corpus)?;
    let estimator = analyzer.session()?.estimator();

    let result = match kind {
        QueryKind::Unigram => QueryResult::unigram(estimator, key),
        QueryKind::Bigram => QueryResult::bigram(estimator, key)
            .with_context(|| format!("Invalid bigram key '{}'", key))?,
    };

    ctx.emit(&Report {
        query: Some(result),
        ..Default::default()
    })
}
