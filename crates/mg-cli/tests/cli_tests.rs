use std::io::Write;
use std::process::{Command, Output};
use std::str;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_microgpt"))
        .args(args)
        .output()
        .expect("failed to run microgpt")
}

fn stdout(output: &Output) -> &str {
    str::from_utf8(&output.stdout).expect("stdout is not valid UTF-8")
}

#[test]
fn test_help_lists_subcommands() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    for sub in ["generate", "tokenize", "embed", "loss"] {
        assert!(out.contains(sub), "help should mention {}: {}", sub, out);
    }
}

#[test]
fn test_generate_json_is_well_formed() {
    let output = run(&["generate", "-n", "4", "--seed", "7", "--json", "-t", "0.5"]);
    assert!(output.status.success(), "{:?}", output);
    let names: serde_json::Value = serde_json::from_str(stdout(&output)).unwrap();
    let names = names.as_array().unwrap();
    assert_eq!(names.len(), 4);
    for name in names {
        let tokens = name["tokens"].as_array().unwrap();
        assert_eq!(tokens.first().unwrap()["char"], "BOS");
        assert_eq!(tokens.last().unwrap()["id"], 26);
        assert!(tokens.len() <= 14);
        assert!((name["temperature"].as_f64().unwrap() - 0.5).abs() < 1e-9);
    }
}

fn generated(args: &[&str]) -> Vec<serde_json::Value> {
    let output = run(args);
    assert!(output.status.success(), "{:?}", output);
    let names: serde_json::Value = serde_json::from_str(stdout(&output)).unwrap();
    names.as_array().unwrap().clone()
}

#[test]
fn test_generate_clamps_to_configured_ranges() {
    let names = generated(&["generate", "-n", "50", "--seed", "3", "--json"]);
    assert_eq!(names.len(), 5);

    let names = generated(&["generate", "-n", "0", "--seed", "3", "--json"]);
    assert_eq!(names.len(), 1);

    let names = generated(&["generate", "-n", "1", "-t", "9", "--seed", "3", "--json"]);
    assert_eq!(names[0]["temperature"], 1.5);

    let names = generated(&["generate", "-n", "1", "-t", "0.74", "--seed", "3", "--json"]);
    let t = names[0]["temperature"].as_f64().unwrap();
    assert!((t - 0.7).abs() < 1e-9, "{}", t);
}

#[test]
fn test_generate_no_clamp_keeps_values() {
    let names = generated(&["generate", "-n", "8", "-t", "0.001", "--no-clamp", "--seed", "3", "--json"]);
    assert_eq!(names.len(), 8);
    assert_eq!(names[0]["temperature"], 0.001);
}

#[test]
fn test_generate_seed_is_reproducible() {
    let a = run(&["generate", "--seed", "123"]);
    let b = run(&["generate", "--seed", "123"]);
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn test_generate_trace() {
    let output = run(&["generate", "-n", "1", "--seed", "1", "--trace"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("pos  0"), "{}", out);
    assert!(out.contains("top:"));
}

#[test]
fn test_generate_rejects_non_positive_temperature() {
    let output = run(&["generate", "-t", "0"]);
    assert!(!output.status.success());
    let stderr = str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("temperature"), "{}", stderr);

    let output = run(&["generate", "-t", "-1.5"]);
    assert!(!output.status.success());
}

#[test]
fn test_tokenize() {
    let output = run(&["tokenize", "Emma"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("ids:     26 4 12 12 0 26"), "{}", out);
    assert!(out.contains("BOS -> e"));
}

#[test]
fn test_embed_rejects_unknown_symbol() {
    let ok = run(&["embed", "e", "--position", "2"]);
    assert!(ok.status.success());
    assert!(stdout(&ok).contains("combined"));

    let bad = run(&["embed", "E"]);
    assert!(!bad.status.success());
}

#[test]
fn test_loss_uses_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"training": {{"num_steps": 12}}}}"#).unwrap();
    let path = file.path().to_str().unwrap();

    let output = run(&["--config", path, "loss", "--json"]);
    assert!(output.status.success(), "{:?}", output);
    let curve: serde_json::Value = serde_json::from_str(stdout(&output)).unwrap();
    assert_eq!(curve.as_array().unwrap().len(), 12);
    assert_eq!(curve[0]["learningRate"], 0.01);
}

#[test]
fn test_bad_config_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"model": {{"vocab_size": 3}}}}"#).unwrap();
    let path = file.path().to_str().unwrap();

    let output = run(&["--config", path, "loss"]);
    assert!(!output.status.success());
}
