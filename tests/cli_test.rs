//! CLI contract tests
//!
//! Runs the tabsense binary against temporary files and verifies the
//! resolution output: status lines, JSON shape, source attribution, and
//! the settings/editorconfig/override precedence as seen end to end.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn tabsense_bin() -> &'static str {
    env!("CARGO_BIN_EXE_tabsense")
}

/// Fresh project dir with a root .editorconfig so lookups never escape
/// into the surrounding filesystem.
fn setup_dir(editorconfig_body: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".editorconfig"),
        format!("root = true\n{editorconfig_body}"),
    )
    .unwrap();
    dir
}

fn run_tabsense(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(tabsense_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("run tabsense");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn test_detect_guesses_from_content() {
    let dir = setup_dir("");
    std::fs::write(dir.path().join("a.py"), "if a:\n  b\nif c:\n  d\n").unwrap();

    let (code, stdout, stderr) = run_tabsense(dir.path(), &["detect", "a.py"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(stdout.trim(), "Indentation: space/2 (guessing)");
}

#[test]
fn test_detect_prefers_editorconfig() {
    let dir = setup_dir("\n[*.py]\nindent_style = tab\nindent_size = 4\n");
    std::fs::write(dir.path().join("a.py"), "if a:\n  b\n").unwrap();

    let (code, stdout, _) = run_tabsense(dir.path(), &["detect", "a.py"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Indentation: tab/4 (config)");
}

#[test]
fn test_detect_merges_partial_editorconfig_with_guess() {
    let dir = setup_dir("\n[*.py]\nindent_style = space\n");
    std::fs::write(dir.path().join("a.py"), "if a:\n   b\n").unwrap();

    let (code, stdout, _) = run_tabsense(dir.path(), &["detect", "a.py"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Indentation: space/3 (config, guessing)");
}

#[test]
fn test_detect_no_editorconfig_flag_ignores_config() {
    let dir = setup_dir("\n[*.py]\nindent_style = tab\nindent_size = 4\n");
    std::fs::write(dir.path().join("a.py"), "if a:\n  b\n").unwrap();

    let (code, stdout, _) = run_tabsense(dir.path(), &["detect", "a.py", "--no-editorconfig"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Indentation: space/2 (guessing)");
}

#[test]
fn test_detect_empty_file_falls_to_default() {
    let dir = setup_dir("");
    std::fs::write(dir.path().join("empty.py"), "").unwrap();

    let (code, stdout, _) = run_tabsense(dir.path(), &["detect", "empty.py"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Indentation: space/4 (default)");
}

#[test]
fn test_detect_honors_configured_default() {
    let dir = setup_dir("");
    std::fs::write(
        dir.path().join("tabsense.toml"),
        "[default_indentation]\nstyle = \"tab\"\nsize = 3\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("empty.py"), "").unwrap();

    let (code, stdout, _) = run_tabsense(dir.path(), &["detect", "empty.py"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Indentation: tab/3 (default)");
}

#[test]
fn test_detect_makefile_forces_tab() {
    let dir = setup_dir("");
    std::fs::write(
        dir.path().join("Makefile"),
        "all:\n  echo one\n  echo two\n",
    )
    .unwrap();

    let (code, stdout, _) = run_tabsense(dir.path(), &["detect", "Makefile"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Indentation: tab/2 (special)");
}

#[test]
fn test_detect_json_output() {
    let dir = setup_dir("");
    std::fs::write(dir.path().join("a.py"), "if a:\n    b\n").unwrap();

    let (code, stdout, _) = run_tabsense(dir.path(), &["detect", "a.py", "--format", "json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(parsed["indent"], "space");
    assert_eq!(parsed["size"], 4);
    assert_eq!(parsed["sources"][0], "guessing");
}

#[test]
fn test_detect_reads_stdin() {
    let dir = setup_dir("");
    let mut child = Command::new(tabsense_bin())
        .args(["detect", "-"])
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn tabsense");
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(b"fn a() {\n\tb();\n\t\tc();\n}\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    // Tabs carry no width of their own; the default size fills it.
    assert_eq!(
        stdout.trim(),
        "Indentation: tab/4 (guessing, default)"
    );
}

#[test]
fn test_detect_missing_file_fails() {
    let dir = setup_dir("");
    let (code, _, stderr) = run_tabsense(dir.path(), &["detect", "nope.py"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("nope.py"));
}

#[test]
fn test_scan_tallies_styles() {
    let dir = setup_dir("");
    std::fs::write(dir.path().join("a.py"), "if a:\n  b\nif c:\n  d\n").unwrap();
    std::fs::write(dir.path().join("b.c"), "int f() {\n\tg();\n\th();\n}\n").unwrap();

    let (code, stdout, stderr) = run_tabsense(dir.path(), &["scan", "."]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("a.py"));
    assert!(stdout.contains("space/2"));
    assert!(stdout.contains("b.c"));
    assert!(stdout.contains("tab/1"));
}

#[test]
fn test_scan_json_summary() {
    let dir = setup_dir("");
    std::fs::write(dir.path().join("a.py"), "if a:\n  b\n").unwrap();
    std::fs::write(dir.path().join("flat.txt"), "no indentation here\n").unwrap();

    let (code, stdout, _) = run_tabsense(dir.path(), &["scan", ".", "--format", "json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(parsed["summary"]["space"], 1);
    assert!(parsed["summary"]["total"].as_u64().unwrap() >= 2);
}

#[test]
fn test_init_writes_config() {
    let dir = setup_dir("");
    let (code, _, _) = run_tabsense(dir.path(), &["init"]);
    assert_eq!(code, 0);
    let written = std::fs::read_to_string(dir.path().join("tabsense.toml")).unwrap();
    assert!(written.contains("[default_indentation]"));

    // Second run must not clobber the existing file.
    std::fs::write(dir.path().join("tabsense.toml"), "sample_bytes = 9\n").unwrap();
    let (code, _, _) = run_tabsense(dir.path(), &["init"]);
    assert_eq!(code, 0);
    let kept = std::fs::read_to_string(dir.path().join("tabsense.toml")).unwrap();
    assert_eq!(kept, "sample_bytes = 9\n");
}
