use std::{fs, path::Path};

use assert_cmd::Command;
use chrono::{TimeZone, Utc};
use jobapp_core::{
    domain::{FormData, Location, Skill},
    storage::Snapshot,
    wizard::Step,
};
use predicates::str::contains;
use tempfile::TempDir;
use uuid::Uuid;

fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jobapp_cli").expect("binary exists");
    cmd.env("JOBAPP_HOME", home).env_remove("RUST_LOG");
    cmd
}

fn seed_snapshot(home: &Path) -> std::path::PathBuf {
    let mut data = FormData::default();
    data.personal_info.full_name = "Ada Lovelace".into();
    data.personal_info.current_location = Location::new("UK", "London");
    data.skills.push(Skill::new("Rust").with_years(4));
    let snapshot = Snapshot::new(
        Uuid::new_v4(),
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        data,
        Step::Skills,
        Step::Skills,
    );
    let dir = home.join("storage");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("jobApplicationForm.json");
    fs::write(&path, snapshot.to_json().unwrap()).unwrap();
    path
}

#[test]
fn status_reports_fresh_form() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Step 1 of 7: Personal Information"))
        .stdout(contains("Skills: 0"));
}

#[test]
fn status_reads_saved_snapshot() {
    let home = TempDir::new().unwrap();
    seed_snapshot(home.path());
    cli(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Step 4 of 7: Skills"))
        .stdout(contains("Skills: 1"));
}

#[test]
fn validate_reports_field_errors() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .args(["validate", "1"])
        .assert()
        .code(1)
        .stdout(contains("Name is required"))
        .stdout(contains("Country is required"));

    seed_snapshot(home.path());
    cli(home.path())
        .args(["validate", "4"])
        .assert()
        .success()
        .stdout(contains("Step 4 of 7: Skills: valid"));
}

#[test]
fn validate_rejects_unknown_step() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .args(["validate", "9"])
        .assert()
        .code(2)
        .stderr(contains("expected 1-7"));
}

#[test]
fn summary_lists_saved_entries() {
    let home = TempDir::new().unwrap();
    seed_snapshot(home.path());
    cli(home.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("Full Name: Ada Lovelace"))
        .stdout(contains("Location: London, UK"))
        .stdout(contains("Rust: 4 yrs"));
}

#[test]
fn reset_clears_saved_snapshot() {
    let home = TempDir::new().unwrap();
    let path = seed_snapshot(home.path());
    cli(home.path())
        .arg("reset")
        .assert()
        .success()
        .stdout(contains("Form reset"));
    assert!(!path.exists());
}

#[test]
fn unknown_command_prints_usage() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .arg("launch")
        .assert()
        .code(2)
        .stderr(contains("Usage: jobapp_cli"));
}
