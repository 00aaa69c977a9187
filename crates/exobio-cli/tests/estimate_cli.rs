use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::tempdir;

fn fixture_snapshot() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/system_snapshot.json")
        .canonicalize()
        .expect("snapshot fixture present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("exobio-cli");
    cmd.env("RUST_LOG", "error")
        .env_remove("EXOBIO_CATALOG")
        .arg("--no-color");
    cmd
}

#[test]
fn estimates_every_body_in_a_snapshot() {
    cli()
        .arg("estimate")
        .arg("--snapshot")
        .arg(fixture_snapshot())
        .assert()
        .success()
        .stdout(contains("Synuefe AB-C d1 (Inner Orion Spur)"))
        .stdout(contains("Aleoida Arcus - Teal: 7,252,500 Cr [colony 150m]"))
        .stdout(contains("Bacterium: 1,000,000 - 1,949,000 Cr (2 species) [colony 500m]"))
        .stdout(contains("Bacterium Tela - Cyan: 1,949,000 Cr"))
        .stdout(contains("Synuefe AB-C d1 A 5: no biological signals"))
        .stdout(contains("Total:"));
}

#[test]
fn body_filter_is_case_insensitive() {
    cli()
        .args(["estimate", "--body", "synuefe ab-c d1 a 3", "--snapshot"])
        .arg(fixture_snapshot())
        .assert()
        .success()
        .stdout(contains("Synuefe AB-C d1 A 3: 9,614,500 - 11,650,400 Cr"))
        .stdout(contains("Synuefe AB-C d1 A 4").not());
}

#[test]
fn genus_filter_reports_one_genus() {
    cli()
        .args(["estimate", "--body", "Synuefe AB-C d1 A 3", "--genus", "Stratum"])
        .arg("--snapshot")
        .arg(fixture_snapshot())
        .assert()
        .success()
        .stdout(contains("Stratum: 1,362,000 - 2,448,900 Cr"))
        .stdout(contains("Aleoida").not());
}

#[test]
fn unknown_genus_suggests_a_close_match() {
    cli()
        .args(["estimate", "--genus", "Tubis", "--snapshot"])
        .arg(fixture_snapshot())
        .assert()
        .failure()
        .stderr(contains("Did you mean 'Tubus'?"));
}

#[test]
fn unknown_body_fails() {
    cli()
        .args(["estimate", "--body", "Nowhere 1", "--snapshot"])
        .arg(fixture_snapshot())
        .assert()
        .failure()
        .stderr(contains("unknown body: Nowhere 1"));
}

#[test]
fn json_output_is_machine_readable() {
    let output = cli()
        .args(["--format", "json", "estimate", "--body", "Synuefe AB-C d1 A 3"])
        .arg("--snapshot")
        .arg(fixture_snapshot())
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["system"], "Synuefe AB-C d1");
    assert_eq!(value["fully_scanned"], true);
    let body = &value["bodies"][0];
    assert_eq!(body["min_value"], 9_614_500);
    assert_eq!(body["max_value"], 11_650_400);
    let aleoida = &body["genera"][0];
    assert_eq!(aleoida["genus"], "Aleoida");
    assert_eq!(aleoida["identification"]["kind"], "unique");
    assert_eq!(aleoida["identification"]["candidate"]["color"], "Teal");
}

#[test]
fn malformed_snapshot_names_the_file() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").expect("write snapshot");

    cli()
        .arg("estimate")
        .arg("--snapshot")
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("broken.json"));
}
