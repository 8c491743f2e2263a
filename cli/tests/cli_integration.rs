#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Integration tests for the `cfgbackup` binary: encode then decode through
//! files, output targets, and error classification on stderr.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn cfgbackup() -> Command {
    let mut cmd = Command::cargo_bin("cfgbackup").unwrap();
    cmd.env_remove("CFGBACKUP_KEY")
        .env_remove("CFGBACKUP_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn write_source(dir: &Path) -> PathBuf {
    let path = dir.join("living-room.yaml");
    fs::write(&path, "esphome:\n  name: living-room\n").unwrap();
    path
}

/// Encode `source` into `<dir>/config.b64` with the given extra flags.
fn encode(dir: &Path, source: &Path, flags: &[&str]) -> PathBuf {
    let out = dir.join("config.b64");
    cfgbackup()
        .arg("encode")
        .arg(source)
        .args(flags)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();
    out
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn plain_blob_prints_content() {
    let dir = TempDir::new().unwrap();
    let blob = dir.path().join("config.b64");
    fs::write(&blob, "aGVsbG86IHdvcmxk\n").unwrap();

    cfgbackup()
        .arg("decode")
        .arg(&blob)
        .assert()
        .success()
        .stdout("hello: world");
}

#[test]
fn aes256_roundtrip_to_explicit_path() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());
    let blob = encode(dir.path(), &source, &["--scheme", "aes256", "--key", "s3cret"]);
    let out = dir.path().join("restored.yaml");

    cfgbackup()
        .arg("decode")
        .arg(&blob)
        .args(["--scheme", "aes256", "--compression", "gzip", "--key", "s3cret", "-o"])
        .arg(&out)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&out).unwrap(), "esphome:\n  name: living-room\n");
}

#[test]
fn output_flag_without_value_uses_embedded_name() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());
    let blob = encode(dir.path(), &source, &["--scheme", "xor", "--key", "k"]);
    let work = dir.path().join("restore");
    fs::create_dir(&work).unwrap();

    cfgbackup()
        .current_dir(&work)
        .env("CFGBACKUP_KEY", "k")
        .arg("decode")
        .arg(&blob)
        .args(["--scheme", "xor", "--compression", "gzip", "-o"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(work.join("living-room.yaml")).unwrap(),
        "esphome:\n  name: living-room\n"
    );
}

#[test]
fn embedded_output_without_metadata_fails() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());
    let blob = encode(dir.path(), &source, &["--no-filename", "--no-compress"]);

    cfgbackup()
        .current_dir(dir.path())
        .arg("decode")
        .arg(&blob)
        .arg("-o")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no embedded filename"));
}

#[test]
fn gzip_transit_blob_decodes() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());
    let blob = encode(dir.path(), &source, &["--gzip-transit"]);

    cfgbackup()
        .arg("decode")
        .arg(&blob)
        .args(["--compression", "gzip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name: living-room"));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn wrong_key_suggests_retry() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());
    let blob = encode(dir.path(), &source, &["--scheme", "aes256", "--key", "right"]);

    cfgbackup()
        .arg("decode")
        .arg(&blob)
        .args(["--scheme", "aes256", "--compression", "gzip", "--key", "wrong"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("retry with another key"));
}

#[test]
fn wrong_xor_key_warns_when_printing() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());
    let blob = encode(dir.path(), &source, &["--scheme", "xor", "--key", "right", "--no-compress"]);

    cfgbackup()
        .arg("decode")
        .arg(&blob)
        .args(["--scheme", "xor", "--key", "wrong"])
        .assert()
        .success()
        .stdout(predicate::str::contains("living-room").not())
        .stderr(predicate::str::contains("retry with another key"));
}

#[test]
fn wrong_xor_key_blames_key_for_missing_name() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());
    let blob = encode(dir.path(), &source, &["--scheme", "xor", "--key", "right", "--no-compress"]);

    cfgbackup()
        .current_dir(dir.path())
        .arg("decode")
        .arg(&blob)
        .args(["--scheme", "xor", "--key", "wrong", "-o"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("retry with another key"))
        .stderr(predicate::str::contains("pass -o PATH").not());
}

#[test]
fn right_xor_key_prints_no_hint() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());
    let blob = encode(dir.path(), &source, &["--scheme", "xor", "--key", "right", "--no-compress"]);

    cfgbackup()
        .arg("decode")
        .arg(&blob)
        .args(["--scheme", "xor", "--key", "right"])
        .assert()
        .success()
        .stdout("esphome:\n  name: living-room\n")
        .stderr(predicate::str::contains("hint:").not());
}

#[test]
fn short_aes_blob_points_at_device() {
    let dir = TempDir::new().unwrap();
    let blob = dir.path().join("config.b64");
    fs::write(&blob, "AAAA").unwrap();

    cfgbackup()
        .arg("decode")
        .arg(&blob)
        .args(["--scheme", "aes256", "--key", "k"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("malformed blob"))
        .stderr(predicate::str::contains("device firmware"));
}

#[test]
fn missing_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let blob = dir.path().join("config.b64");
    fs::write(&blob, "AAAA").unwrap();

    cfgbackup()
        .arg("decode")
        .arg(&blob)
        .args(["--scheme", "xor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a key"));
}

#[test]
fn unknown_scheme_flag_is_usage_error() {
    cfgbackup()
        .args(["decode", "config.b64", "--scheme", "des"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown encryption scheme"));
}

#[test]
fn missing_input_argument_exits_one() {
    cfgbackup()
        .arg("decode")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("<INPUT>"));
}

#[test]
fn version_exits_zero() {
    cfgbackup()
        .arg("--version")
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("cfgbackup "));
}

#[test]
fn missing_input_file_fails() {
    let dir = TempDir::new().unwrap();
    cfgbackup()
        .arg("decode")
        .arg(dir.path().join("absent.b64"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// Encode output shapes
// ---------------------------------------------------------------------------

#[test]
fn c_array_output() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());

    cfgbackup()
        .arg("encode")
        .arg(&source)
        .args(["--c-array", "CONFIG_B64"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("const uint8_t CONFIG_B64["))
        .stdout(predicate::str::contains("const size_t CONFIG_B64_SIZE = "));
}

#[test]
fn encode_requires_key_for_xor() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path());

    cfgbackup()
        .arg("encode")
        .arg(&source)
        .args(["--scheme", "xor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a key"));
}

#[test]
fn settings_file_is_honoured() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.json");
    let log = dir.path().join("cfgbackup.log");
    fs::write(
        &settings,
        serde_json::json!({ "logLevel": "debug", "logFile": log }).to_string(),
    )
    .unwrap();
    let blob = dir.path().join("config.b64");
    fs::write(&blob, "aGk=").unwrap();

    cfgbackup()
        .arg("--config")
        .arg(&settings)
        .arg("decode")
        .arg(&blob)
        .assert()
        .success()
        .stdout("hi");
    assert!(fs::read_to_string(&log).unwrap().contains("Config recovered"));
}
