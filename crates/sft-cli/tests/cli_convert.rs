use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use sft_core::TrainingExample;

const LOG: &str = "\
2024-01-01 09:00:00,A,line1
2024-01-01 09:00:20,A,line2
2024-01-01 09:01:00,B,r1
2024-01-01 09:01:10,B,r2
2024-01-01 11:00:00,A,사진
2024-01-01 11:00:05,A,밥먹는중
2024-01-01 11:01:00,B,ok
2024-01-01 11:02:00,A,이모티콘
2024-01-01 11:03:00,B,맛있겠다
2024-01-01 13:00:00,A,dangling
";

fn chat_sft(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chat-sft"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn chat-sft")
}

fn write_log(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn read_examples(path: &Path) -> Vec<TrainingExample> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| TrainingExample::from_jsonl(l).unwrap())
        .collect()
}

#[test]
fn convert_writes_filtered_jsonl_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "chat.csv", LOG);
    let out = dir.path().join("out.jsonl");
    let stats = dir.path().join("stats.json");

    let output = chat_sft(&[
        "convert",
        &input,
        "--assistant",
        "B",
        "--filter-preset",
        "messenger",
        "--out",
        out.to_str().unwrap(),
        "--stats-json",
        stats.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let examples = read_examples(&out);
    assert_eq!(examples.len(), 2);
    assert_eq!(examples[0].messages[0].content, "line1\nline2");
    assert_eq!(examples[0].messages[1].content, "r1\nr2");
    assert_eq!(examples[1].messages[0].content, "밥먹는중");
    assert!(examples.iter().all(TrainingExample::is_well_formed));

    let stats: serde_json::Value = serde_json::from_str(&fs::read_to_string(&stats).unwrap()).unwrap();
    assert_eq!(stats["total_turns"], 3);
    assert_eq!(stats["partially_filtered_turns"], 1);
    assert_eq!(stats["completely_removed_turns"], 1);
    assert_eq!(stats["saved_turns"], 2);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Turns formed: 3"));
    assert!(stdout.contains("[sample 1]"));
}

#[test]
fn convert_without_keywords_keeps_every_turn() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "chat.csv", LOG);
    let out = dir.path().join("out.jsonl");

    let output = chat_sft(&["convert", &input, "-a", "B", "-o", out.to_str().unwrap()]);
    assert!(output.status.success());
    let examples = read_examples(&out);
    assert_eq!(examples.len(), 3);
    assert_eq!(examples[1].messages[0].content, "사진\n밥먹는중");
}

#[test]
fn convert_multiple_inputs_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_log(dir.path(), "a.csv", "2024-01-01 09:00:00,A,q1\n2024-01-01 09:01:00,B,a1\n");
    // Ends with a lone user message that must not pair across files.
    let second = write_log(
        dir.path(),
        "b.csv",
        "2024-01-01 09:00:00,A,q2\n2024-01-01 09:01:00,B,a2\n2024-01-01 09:02:00,A,tail\n",
    );
    let third = write_log(dir.path(), "c.csv", "2024-01-01 09:03:00,B,other file\n");
    let out = dir.path().join("out.jsonl");

    let output = chat_sft(&["convert", &first, &second, &third, "-a", "B", "-o", out.to_str().unwrap()]);
    assert!(output.status.success());
    let examples = read_examples(&out);
    let users: Vec<&str> = examples.iter().map(|e| e.messages[0].content.as_str()).collect();
    assert_eq!(users, vec!["q1", "q2"]);
}

#[test]
fn config_file_with_flag_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "chat.csv", LOG);
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"assistant_identity":"nobody","forbidden_keywords":["r2"]}"#).unwrap();
    let out = dir.path().join("out.jsonl");

    let output = chat_sft(&[
        "convert",
        &input,
        "--config",
        config.to_str().unwrap(),
        "--assistant",
        "B",
        "--gap-minutes",
        "500",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let examples = read_examples(&out);
    assert_eq!(examples[0].messages[1].content, "r1");
    assert_eq!(examples.last().unwrap().messages[1].content, "맛있겠다");
    // No gap in the log exceeds 500 minutes.
    assert!(String::from_utf8_lossy(&output.stdout).contains("Sessions: 1"));
}

#[test]
fn missing_assistant_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "chat.csv", LOG);
    let output = chat_sft(&["preview", &input]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--assistant"));
}

#[test]
fn invalid_timestamp_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "chat.csv", "2024-01-01 09:00:00,A,hi\nsoon,B,hello\n");
    let out = dir.path().join("out.jsonl");
    let output = chat_sft(&["convert", &input, "-a", "B", "-o", out.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid timestamp"));
}

#[test]
fn unknown_preset_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "chat.csv", LOG);
    let output = chat_sft(&["preview", &input, "-a", "B", "--filter-preset", "nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown filter preset"));
}

#[test]
fn preview_prints_summary_and_samples() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "chat.csv", LOG);
    let output = chat_sft(&["preview", &input, "-a", "B", "--samples", "1", "--width", "5"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("saved: 3"));
    assert!(stdout.contains("Samples (1):"));
    assert!(stdout.contains("line1..."));
    assert!(!stdout.contains("[sample 2]"));
}
