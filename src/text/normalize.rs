//! Corpus text normalization

use regex::Regex;
use std::sync::OnceLock;

/// A newline followed by leading whitespace is a wrapped line, not a break.
fn line_continuation() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\n\s+").expect("valid line continuation regex"))
}

/// Trim, lowercase and fold wrapped lines into single spaces.
pub fn normalize(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    line_continuation().replace_all(&lowered, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_trim() {
        assert_eq!(normalize("  The Cat SAT.  "), "the cat sat.");
    }

    #[test]
    fn test_wrapped_lines_collapse() {
        assert_eq!(
            normalize("the cat\n    sat on\n\tthe mat"),
            "the cat sat on the mat"
        );
    }

    #[test]
    fn test_blank_lines_collapse() {
        assert_eq!(normalize("first.\n\n\nsecond."), "first. second.");
    }

    #[test]
    fn test_bare_newline_kept() {
        assert_eq!(normalize("a\nb"), "a\nb");
    }
}
