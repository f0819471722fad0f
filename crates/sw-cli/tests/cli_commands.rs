//! Integration tests for the sw-cli binary commands.
#![allow(deprecated)] // Command::cargo_bin

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `sw` pointed at `dir`, seeded, never prompting.
fn sw(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sw").unwrap();
    cmd.env("SW_DATA_DIR", dir.path())
        .args(["--seed", "42", "--yes"]);
    cmd
}

/// A data directory holding a wheel of the given options.
fn wheel_of(options: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    sw(&dir).args(["clear"]).assert().success();
    sw(&dir).arg("add").args(options).assert().success();
    dir
}

// ---------------------------------------------------------------------------
// add / list
// ---------------------------------------------------------------------------

#[test]
fn fresh_wheel_lists_placeholders() {
    let dir = TempDir::new().unwrap();
    sw(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Option 1")
                .and(predicate::str::contains("Option 4"))
                .and(predicate::str::contains("4 options")),
        );
}

#[test]
fn add_reports_duplicates() {
    let dir = wheel_of(&["Pizza"]);
    sw(&dir)
        .args(["add", "Sushi", "pizza", "Tacos"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully added 2 options. 1 duplicate skipped.",
        ));
}

#[test]
fn add_reads_stdin() {
    let dir = wheel_of(&["A"]);
    sw(&dir)
        .args(["add", "-"])
        .write_stdin("B\n\nC\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 of 50 options"));
}

#[test]
fn add_blank_fails() {
    let dir = TempDir::new().unwrap();
    sw(&dir)
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter an option"));
}

#[test]
fn list_json_is_parseable() {
    let dir = wheel_of(&["A", "B"]);
    let output = sw(&dir).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[1]["text"], "B");
}

#[test]
fn state_is_written_to_data_dir() {
    let dir = wheel_of(&["A", "B"]);
    let raw = fs::read_to_string(dir.path().join("spinWheelCurrent.json")).unwrap();
    assert!(raw.contains("\"A\""));
}

// ---------------------------------------------------------------------------
// remove / clear
// ---------------------------------------------------------------------------

#[test]
fn remove_single_option() {
    let dir = wheel_of(&["A", "B", "C"]);
    sw(&dir)
        .args(["remove", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed \"B\""));
    sw(&dir)
        .args(["list", "--json"])
        .assert()
        .stdout(predicate::str::contains("\"text\": \"B\"").not());
}

#[test]
fn bulk_remove_must_keep_two() {
    let dir = wheel_of(&["A", "B", "C", "D"]);
    sw(&dir)
        .args(["remove", "1", "2", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2 options must remain"));
    sw(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("4 options"));
}

#[test]
fn bulk_remove_two_of_four() {
    let dir = wheel_of(&["A", "B", "C", "D"]);
    sw(&dir)
        .args(["remove", "1", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2 options"));
}

#[test]
fn remove_out_of_range_fails() {
    let dir = wheel_of(&["A", "B"]);
    sw(&dir)
        .args(["remove", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no option at position 9"));
}

#[test]
fn clear_declined_without_yes() {
    let dir = wheel_of(&["A", "B"]);
    Command::cargo_bin("sw")
        .unwrap()
        .env("SW_DATA_DIR", dir.path())
        .arg("clear")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));
    sw(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("2 options"));
}

// ---------------------------------------------------------------------------
// spin / stats
// ---------------------------------------------------------------------------

#[test]
fn spin_prints_winner_and_records_it() {
    let dir = wheel_of(&["Red", "Green", "Blue"]);
    sw(&dir)
        .arg("spin")
        .assert()
        .success()
        .stdout(predicate::str::contains("Winner: ").and(predicate::str::contains("(1 win)")));
    sw(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 spins"));
}

#[test]
fn seeded_spins_repeat() {
    let first = wheel_of(&["Red", "Green", "Blue", "Gold"]);
    let second = wheel_of(&["Red", "Green", "Blue", "Gold"]);
    let a = sw(&first).arg("spin").output().unwrap();
    let b = sw(&second).arg("spin").output().unwrap();
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn spin_needs_two_options() {
    let dir = wheel_of(&["Solo"]);
    sw(&dir)
        .arg("spin")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Add at least 2 options to spin"));
}

#[test]
fn spin_with_remove_after_win_removes_winner() {
    let dir = wheel_of(&["A", "B", "C"]);
    sw(&dir)
        .args(["settings", "--remove-after-win", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Will ask to remove winners after spinning",
        ));
    sw(&dir)
        .arg("spin")
        .assert()
        .success()
        .stdout(predicate::str::contains("removed from wheel"));
    sw(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("2 options"));
}

#[test]
fn stats_empty_and_clear() {
    let dir = wheel_of(&["A", "B"]);
    sw(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("No spins yet"));
    sw(&dir).arg("spin").assert().success();
    sw(&dir)
        .args(["stats", "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All statistics cleared"));
}

// ---------------------------------------------------------------------------
// saved wheels
// ---------------------------------------------------------------------------

#[test]
fn save_load_delete() {
    let dir = wheel_of(&["Pizza", "Sushi"]);
    sw(&dir)
        .args(["save", "Lunch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wheel \"Lunch\" saved successfully"));
    sw(&dir).arg("clear").assert().success();
    sw(&dir)
        .args(["load", "Lunch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("loaded successfully"));
    sw(&dir)
        .arg("saved")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch").and(predicate::str::contains("1 saved wheels")));
    sw(&dir)
        .args(["delete", "Lunch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wheel \"Lunch\" deleted"));
    sw(&dir)
        .arg("saved")
        .assert()
        .stdout(predicate::str::contains("No saved wheels"));
}

#[test]
fn load_unknown_wheel_fails() {
    let dir = TempDir::new().unwrap();
    sw(&dir)
        .args(["load", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nope"));
}

#[test]
fn malformed_store_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("spinWheelStatistics.json"), "{oops").unwrap();
    sw(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}
