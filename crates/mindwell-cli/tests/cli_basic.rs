//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against an isolated data
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against `data_dir` and return (stdout, stderr, code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "mindwell-cli", "--quiet", "--"])
        .args(args)
        .env("MINDWELL_DATA_DIR", data_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_mood_log_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["mood", "log", "--value", "4", "--factor", "sleep"],
    );
    assert_eq!(code, 0, "mood log failed");
    assert!(stdout.contains("Mood saved."));
    assert!(stdout.contains("First Step"), "firstMood should unlock");

    let (stdout, _, code) = run_cli(dir.path(), &["mood", "list", "--json"]);
    assert_eq!(code, 0, "mood list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["value"], 4);
}

#[test]
fn test_mood_log_requires_a_selection() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["mood", "log"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("select a mood"));
}

#[test]
fn test_journal_write_counts_words() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["journal", "write", "three little words", "--tag", "daily"],
    );
    assert_eq!(code, 0, "journal write failed");
    assert!(stdout.contains("3 words"));
}

#[test]
fn test_breathe_session_records_cycles() {
    let dir = tempfile::tempdir().unwrap();
    // One box cycle is 16s of wall time; use seconds to keep the test short.
    let (stdout, _, code) = run_cli(
        dir.path(),
        &[
            "breathe", "run", "--technique", "box", "--seconds", "2", "--quiet",
        ],
    );
    assert_eq!(code, 0, "breathe run failed");
    assert!(stdout.contains("Session complete: 0 cycles"));

    let (stdout, _, code) = run_cli(dir.path(), &["stats", "show", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["breathing_sessions"], 1);
}

#[test]
fn test_stats_show_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["stats", "show", "--json"]);
    assert_eq!(code, 0, "stats show failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["streak"], 1);
    assert_eq!(parsed["moods"], 0);
    // Base 50 + minimum consistency contribution.
    assert_eq!(parsed["wellness"]["total"], 51);
}

#[test]
fn test_achievements_list() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["stats", "achievements", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 18);
    assert!(parsed
        .as_array()
        .unwrap()
        .iter()
        .all(|a| a["unlocked"] == false));
}

#[test]
fn test_export_import_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["mood", "log", "--value", "5"]);
    run_cli(
        dir.path(),
        &["sleep", "log", "--bedtime", "23:00", "--wake", "07:00", "--quality", "good"],
    );

    let export_path = dir.path().join("backup.json");
    let (_, _, code) = run_cli(
        dir.path(),
        &["data", "export", "--output", export_path.to_str().unwrap()],
    );
    assert_eq!(code, 0, "export failed");

    let fresh = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        fresh.path(),
        &["data", "import", export_path.to_str().unwrap()],
    );
    assert_eq!(code, 0, "import failed");
    assert!(stdout.contains("Imported 1 moods"));

    let (stdout, _, code) = run_cli(fresh.path(), &["stats", "show", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["moods"], 1);
    assert_eq!(parsed["sleep_logs"], 1);
}

#[test]
fn test_data_reset_requires_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["mood", "log", "--value", "3"]);

    let (_, _, code) = run_cli(dir.path(), &["data", "reset"]);
    assert_ne!(code, 0, "reset without --yes must refuse");

    let (_, _, code) = run_cli(dir.path(), &["data", "reset", "--yes"]);
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(dir.path(), &["stats", "show", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["moods"], 0);
}

#[test]
fn test_prefs_set_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["prefs", "set", "theme", "light"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(dir.path(), &["prefs", "show"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["theme"], "light");

    let (_, _, code) = run_cli(dir.path(), &["prefs", "set", "fontSize", "12"]);
    assert_ne!(code, 0, "unknown preference key must be rejected");
}

#[test]
fn test_breathe_techniques_lists_presets() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["breathe", "techniques"]);
    assert_eq!(code, 0);
    for key in ["478", "box", "calm", "coherent"] {
        assert!(stdout.contains(key), "missing technique {key}");
    }
}
