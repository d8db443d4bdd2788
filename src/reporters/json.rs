//! JSON reporter
//!
//! Outputs the report as pretty-printed JSON for piping to jq or scripts.
//! Zero probabilities produce `-inf` log-likelihoods, which JSON cannot
//! represent; serde_json writes those as `null`.

use crate::report::Report;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_json_render_valid() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["stats"]["sentences"], 3);
        assert_eq!(parsed["unigrams"][0]["estimate"], "raw");
        assert_eq!(parsed["bigrams"][1]["estimate"], "smoothed");
        assert_eq!(parsed["query"]["kind"], "bigram");
        assert_eq!(parsed["query"]["bigram"], "the|cat");
        assert_eq!(parsed["scores"][0]["trace"][0]["bigram"]["left"], "<s>");
    }

    #[test]
    fn test_json_skips_absent_sections() {
        let report = Report::default();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed, serde_json::json!({}));
    }
}
