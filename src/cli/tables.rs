//! Table commands: stats, sentences, unigrams, bigrams, matrix, report

use super::analyze::Context;
use corpus_analyzer::report::{
    sentence_rows, BigramTable, CorpusStats, Estimate, ProbabilityMatrix, Report, UnigramTable,
};

use anyhow::{bail, Result};
use std::path::Path;

fn estimate(smoothed: bool) -> Estimate {
    if smoothed {
        Estimate::Smoothed
    } else {
        Estimate::Raw
    }
}

pub fn stats(ctx: &Context, corpus: &Path) -> Result<()> {
    let analyzer = ctx.analyze(corpus)?;
    let session = analyzer.session()?;
    ctx.emit(&Report {
        stats: Some(CorpusStats::from_session(session)),
        ..Default::default()
    })
}

pub fn sentences(ctx: &Context, corpus: &Path) -> Result<()> {
    let analyzer = ctx.analyze(corpus)?;
    let session = analyzer.session()?;
    ctx.emit(&Report {
        sentences: Some(sentence_rows(session.corpus())),
        ..Default::default()
    })
}

pub fn unigrams(ctx: &Context, corpus: &Path, smoothed: bool, top: Option<usize>) -> Result<()> {
    let analyzer = ctx.analyze(corpus)?;
    let session = analyzer.session()?;
    let table = UnigramTable::build(session.estimator(), estimate(smoothed), ctx.top(top));
    ctx.emit(&Report {
        unigrams: vec![table],
        ..Default::default()
    })
}

pub fn bigrams(ctx: &Context, corpus: &Path, smoothed: bool, top: Option<usize>) -> Result<()> {
    let analyzer = ctx.analyze(corpus)?;
    let session = analyzer.session()?;
    let table = BigramTable::build(session.estimator(), estimate(smoothed), ctx.top(top))?;
    ctx.emit(&Report {
        bigrams: vec![table],
        ..Default::default()
    })
}

pub fn matrix(ctx: &Context, corpus: &Path, precision: Option<usize>, force: bool) -> Result<()> {
    let analyzer = ctx.analyze(corpus)?;
    let session = analyzer.session()?;

    let size = session.corpus().vocabulary().len();
    let limit = ctx.config.max_matrix_vocabulary();
    if size > limit && !force {
        bail!(
            "Vocabulary has {} tokens, more than the matrix limit of {} ({}x{} cells). \
             Raise [matrix] max_vocabulary or pass --force",
            size,
            limit,
            size,
            size
        );
    }

    let precision = precision.unwrap_or(ctx.config.precision());
    ctx.emit(&Report {
        matrix: Some(ProbabilityMatrix::build(
            session.estimator(),
            session.corpus(),
            precision,
        )),
        ..Default::default()
    })
}

pub fn report(ctx: &Context, corpus: &Path, top: Option<usize>, matrix: bool) -> Result<()> {
    let analyzer = ctx.analyze(corpus)?;
    let session = analyzer.session()?;

    let precision = if matrix {
        let size = session.corpus().vocabulary().len();
        let limit = ctx.config.max_matrix_vocabulary();
        if size > limit {
            bail!(
                "Vocabulary has {} tokens, more than the matrix limit of {}. \
                 Raise [matrix] max_vocabulary or drop --matrix",
                size,
                limit
            );
        }
        Some(ctx.config.precision())
    } else {
        None
    };

    ctx.emit(&Report::full(session, ctx.top(top), precision)?)
}
