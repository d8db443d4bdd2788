//! CLI contract tests
//!
//! Runs the built binary against temporary corpora. Every run gets its own
//! working directory and config home so local config files cannot leak in.

use std::path::Path;
use std::process::{Command, Output, Stdio};

const CORPUS: &str = "The cat sat on the mat. The dog sat on the log. A cat ran!";

fn analyzer_bin() -> &'static str {
    env!("CARGO_BIN_EXE_corpus-analyzer")
}

fn setup_corpus(text: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("corpus.txt"), text).unwrap();
    dir
}

fn command(dir: &Path) -> Command {
    let mut cmd = Command::new(analyzer_bin());
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("config-home"))
        .env_remove("CORPUS_ANALYZER_K")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn run(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output: Output = command(dir).args(args).output().expect("Failed to run corpus-analyzer");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = args.to_vec();
    full.extend(["--format", "json"]);
    let (code, stdout, stderr) = run(dir, &full);
    assert_eq!(code, 0, "stderr: {stderr}");
    serde_json::from_str(&stdout).expect("Invalid JSON")
}

// ============================================================================
// stats / sentences
// ============================================================================

#[test]
fn test_stats_text() {
    let dir = setup_corpus("Hello world. This is a test.");
    let (code, stdout, stderr) = run(dir.path(), &["stats", "corpus.txt"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Sentences:   2"), "{stdout}");
    assert!(stdout.contains("Tokens:      10"), "{stdout}");
    assert!(stdout.contains("Vocabulary:  8"), "{stdout}");
    assert!(stdout.contains("utf-8"), "{stdout}");
}

#[test]
fn test_stats_json() {
    let dir = setup_corpus("Hello world. This is a test.");
    let v = run_json(dir.path(), &["stats", "corpus.txt"]);
    assert_eq!(v["stats"]["sentences"], 2);
    assert_eq!(v["stats"]["tokens"], 10);
    assert_eq!(v["stats"]["vocabulary"], 8);
    assert_eq!(v["stats"]["k"], 0.5);
}

#[test]
fn test_latin1_corpus() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("corpus.txt"), b"caf\xe9 au lait. caf\xe9 noir.").unwrap();
    let v = run_json(dir.path(), &["unigrams", "corpus.txt"]);
    let rows = v["unigrams"][0]["rows"].as_array().unwrap();
    let cafe = rows
        .iter()
        .find(|r| r["token"] == "café")
        .expect("café row");
    assert_eq!(cafe["count"], 2);
}

#[test]
fn test_sentences_numbered() {
    let dir = setup_corpus(CORPUS);
    let (code, stdout, _) = run(dir.path(), &["sentences", "corpus.txt"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("1 - the cat sat on the mat."));
    assert!(stdout.contains("3 - a cat ran!"));
}

// ============================================================================
// tables
// ============================================================================

#[test]
fn test_unigrams_top() {
    let dir = setup_corpus(CORPUS);
    let v = run_json(dir.path(), &["unigrams", "corpus.txt", "--top", "2"]);
    let table = &v["unigrams"][0];
    assert_eq!(table["estimate"], "raw");
    assert_eq!(table["rows"].as_array().unwrap().len(), 2);
    assert_eq!(table["rows"][0]["token"], "the");
    assert_eq!(table["rows"][0]["count"], 4);
}

#[test]
fn test_bigrams_smoothed_labels() {
    let dir = setup_corpus(CORPUS);
    let (code, stdout, _) = run(dir.path(), &["bigrams", "corpus.txt", "--smoothed"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("BIGRAMS SMOOTHED"));
    assert!(stdout.contains("P(cat|the)"));
}

#[test]
fn test_matrix_limit_and_force() {
    let dir = setup_corpus(CORPUS);
    std::fs::write(
        dir.path().join("corpus-analyzer.toml"),
        "[matrix]\nmax_vocabulary = 3\n",
    )
    .unwrap();

    let (code, _, stderr) = run(dir.path(), &["matrix", "corpus.txt"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("--force"), "{stderr}");

    let v = run_json(dir.path(), &["matrix", "corpus.txt", "--force"]);
    let vocab = v["matrix"]["vocabulary"].as_array().unwrap().len();
    assert_eq!(v["matrix"]["rows"].as_array().unwrap().len(), vocab);
}

#[test]
fn test_report_markdown() {
    let dir = setup_corpus(CORPUS);
    let (code, stdout, _) = run(dir.path(), &["report", "corpus.txt", "--format", "md"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("# Corpus Analysis Report"));
    assert!(stdout.contains("## Unigrams (smoothed)"));
    assert!(stdout.contains("## Bigrams (raw)"));
}

// ============================================================================
// score / query
// ============================================================================

#[test]
fn test_score_trace() {
    let dir = setup_corpus(CORPUS);
    let (code, stdout, stderr) = run(dir.path(), &["score", "corpus.txt", "the cat sat"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("P(the|<s>) = "));
    assert!(stdout.contains("P(</s>|sat) = "));
    assert!(stdout.contains("Likelihood:"));
}

#[test]
fn test_score_familiar_beats_unusual() {
    let dir = setup_corpus(CORPUS);
    let v = run_json(dir.path(), &["score", "corpus.txt", "the cat sat", "mat the on"]);
    let scores = v["scores"].as_array().unwrap();
    assert_eq!(scores.len(), 2);
    let familiar = scores[0]["likelihood"].as_f64().unwrap();
    let unusual = scores[1]["likelihood"].as_f64().unwrap();
    assert!(familiar > unusual);
}

#[test]
fn test_query_bigram() {
    let dir = setup_corpus("the cat and the cat");
    let v = run_json(dir.path(), &["query", "corpus.txt", "bigram", "the|cat"]);
    assert_eq!(v["query"]["kind"], "bigram");
    assert_eq!(v["query"]["count"], 2);
    assert_eq!(v["query"]["raw"], 1.0);
}

#[test]
fn test_query_unigram() {
    let dir = setup_corpus("the cat and the dog");
    let v = run_json(dir.path(), &["query", "corpus.txt", "unigram", "the"]);
    assert_eq!(v["query"]["count"], 2);
    let raw = v["query"]["raw"].as_f64().unwrap();
    assert!((raw - 2.0 / 7.0).abs() < 1e-12);
}

#[test]
fn test_query_malformed_bigram() {
    let dir = setup_corpus(CORPUS);
    let (code, _, stderr) = run(dir.path(), &["query", "corpus.txt", "bigram", "the"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Malformed bigram"), "{stderr}");
}

// ============================================================================
// errors and configuration
// ============================================================================

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run(dir.path(), &["stats", "nope.txt"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not found"), "{stderr}");
}

#[test]
fn test_empty_corpus() {
    let dir = setup_corpus("  ... !!! ");
    let (code, _, stderr) = run(dir.path(), &["stats", "corpus.txt"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no word tokens"), "{stderr}");
}

#[test]
fn test_smoothing_sources() {
    let dir = setup_corpus(CORPUS);
    std::fs::write(dir.path().join("corpus-analyzer.toml"), "[smoothing]\nk = 2.0\n").unwrap();
    let v = run_json(dir.path(), &["stats", "corpus.txt"]);
    assert_eq!(v["stats"]["k"], 2.0);

    let output = command(dir.path())
        .env("CORPUS_ANALYZER_K", "1.5")
        .args(["stats", "corpus.txt", "--format", "json"])
        .output()
        .unwrap();
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["stats"]["k"], 1.5);

    let v = run_json(dir.path(), &["stats", "corpus.txt", "-k", "0.25"]);
    assert_eq!(v["stats"]["k"], 0.25);
}

#[test]
fn test_smoothing_flag_overrides_invalid_env_and_project_config() {
    let dir = setup_corpus(CORPUS);
    let output = command(dir.path())
        .env("CORPUS_ANALYZER_K", "0")
        .args(["stats", "corpus.txt", "-k", "0.5", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["stats"]["k"], 0.5);

    std::fs::write(dir.path().join("corpus-analyzer.toml"), "[smoothing]\nk = -1\n").unwrap();
    let v = run_json(dir.path(), &["stats", "corpus.txt", "-k", "0.5"]);
    assert_eq!(v["stats"]["k"], 0.5);

    let (code, _, stderr) = run(dir.path(), &["stats", "corpus.txt"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("configuration"), "{stderr}");
}

#[test]
fn test_invalid_smoothing_flag() {
    let dir = setup_corpus(CORPUS);
    let (code, _, _) = run(dir.path(), &["stats", "corpus.txt", "-k", "0"]);
    assert_ne!(code, 0);
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = setup_corpus(CORPUS);
    let (code, _, stderr) = run(
        dir.path(),
        &["stats", "corpus.txt", "--config", "missing.toml"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("configuration"), "{stderr}");
}

#[test]
fn test_config_init_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run(dir.path(), &["config", "init"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("config.toml"));
    assert!(dir
        .path()
        .join("config-home/corpus-analyzer/config.toml")
        .exists());

    let (code, stdout, _) = run(dir.path(), &["config", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("[smoothing]"));
    assert!(stdout.contains("k = 0.5"));
}

// ============================================================================
// interactive
// ============================================================================

#[test]
fn test_interactive_session() {
    use std::io::Write;

    let dir = setup_corpus(CORPUS);
    let mut child = command(dir.path())
        .args(["interactive", "corpus.txt"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"the cat sat\n:clear\nthe dog sat\n:quit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert_eq!(stdout.matches("SCORE:").count(), 1);
    assert!(stdout.contains("Analysis cleared"));
    assert!(stdout.contains("No corpus analyzed"));
}
