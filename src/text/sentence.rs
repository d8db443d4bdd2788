//! Rule-based sentence boundary detection
//!
//! Runs on normalized (lowercased) text, so capitalization cannot be used as
//! a cue. A boundary is a run of `.`, `!` or `?`, optionally followed by
//! closing quotes or brackets, followed by whitespace or end of text. A lone
//! period is not a boundary when it closes a known abbreviation, an initial
//! inside a run of initials (`j. r. r. tolkien`), or a dotted acronym such as
//! `u.s.a.`. A lone single-letter word (`vitamin c.`) still ends a sentence.
//! Decimals never qualify because the period is followed by a digit.

/// Abbreviations whose trailing period does not end a sentence.
pub const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "cf", "al", "inc",
    "ltd", "corp", "vol", "fig", "approx", "dept", "gen", "col", "lt", "sgt", "capt", "rev",
    "gov", "jan", "feb", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn is_closing(ch: char) -> bool {
    matches!(ch, '"' | '\'' | ')' | ']' | '}' | '\u{201D}' | '\u{2019}' | '»')
}

fn is_opening(ch: char) -> bool {
    matches!(ch, '"' | '\'' | '(' | '[' | '{' | '\u{201C}' | '\u{2018}' | '«')
}

fn is_initial_letter(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

/// `x.` with a single letter
fn is_initial(word: &str) -> bool {
    word.strip_suffix('.').is_some_and(is_initial_letter)
}

/// Whether a period directly after `prefix` belongs to the preceding word.
/// `rest` is the text after the period.
fn period_is_internal(prefix: &str, rest: &str) -> bool {
    let mut words = prefix.split_whitespace().rev();
    let Some(word) = words.next() else {
        return false;
    };
    let word = word.trim_start_matches(is_opening);
    if word.is_empty() {
        return false;
    }

    if ABBREVIATIONS.contains(&word) {
        return true;
    }

    // Initials only count in runs of two or more
    if is_initial_letter(word) {
        let previous = words.next().map(|w| w.trim_start_matches(is_opening));
        let next = rest.split_whitespace().next();
        return previous.is_some_and(is_initial) || next.is_some_and(is_initial);
    }

    // Dotted acronym ("u.s.a", "e.g", "i.e")
    word.contains('.') && word.split('.').all(is_initial_letter)
}

/// Split normalized text into trimmed sentence spans, keeping terminal punctuation.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if !is_terminal(chars[i].1) {
            i += 1;
            continue;
        }

        let run_start = i;
        while i < chars.len() && is_terminal(chars[i].1) {
            i += 1;
        }
        let terminal_len = i - run_start;
        while i < chars.len() && is_closing(chars[i].1) {
            i += 1;
        }

        let end = chars.get(i).map_or(text.len(), |(pos, _)| *pos);
        let followed_by_space = chars.get(i).map_or(true, |(_, c)| c.is_whitespace());
        if !followed_by_space {
            continue;
        }

        let lone_period = terminal_len == 1 && chars[run_start].1 == '.';
        if lone_period && period_is_internal(&text[start..chars[run_start].0], &text[end..]) {
            continue;
        }

        push_span(&mut sentences, &text[start..end]);
        start = end;
    }

    push_span(&mut sentences, &text[start..]);
    sentences
}

fn push_span(sentences: &mut Vec<String>, span: &str) {
    let span = span.trim();
    if !span.is_empty() {
        sentences.push(span.to_string());
    }
}
