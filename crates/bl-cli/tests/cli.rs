//! Integration tests for the brasslantern binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn bundled_world() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/../bl-core/data/world.json")
}

#[test]
fn check_accepts_the_bundled_world() {
    Command::cargo_bin("brasslantern")
        .unwrap()
        .args(["check", bundled_world()])
        .assert()
        .success()
        .stdout(predicate::str::contains("rooms").and(predicate::str::contains("ok")));
}

#[test]
fn check_rejects_a_broken_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"name": "broken""#).unwrap();

    Command::cargo_bin("brasslantern")
        .unwrap()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn check_rejects_a_dangling_reference() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dangling.json");
    std::fs::write(
        &path,
        r#"{
            "name": "t", "start_room": "a",
            "rooms": {"a": {"description": "A.", "actions": {"go north": {"destination": "missing"}}}},
            "items": {}
        }"#,
    )
    .unwrap();

    Command::cargo_bin("brasslantern")
        .unwrap()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown room"));
}

#[test]
fn play_runs_until_quit() {
    let dir = tempfile::tempdir().unwrap();
    let save = dir.path().join("save.json");

    Command::cargo_bin("brasslantern")
        .unwrap()
        .args(["play", "--save", save.to_str().unwrap()])
        .write_stdin("look\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("open field west of a white house")
                .and(predicate::str::contains("Thanks for playing!")),
        );
}

#[test]
fn play_ends_cleanly_when_stdin_closes() {
    let dir = tempfile::tempdir().unwrap();
    let save = dir.path().join("save.json");

    Command::cargo_bin("brasslantern")
        .unwrap()
        .args(["play", "--save", save.to_str().unwrap()])
        .write_stdin("inventory\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You are empty-handed."));
}

#[test]
fn saves_survive_across_processes() {
    let dir = tempfile::tempdir().unwrap();
    let save = dir.path().join("save.json");

    Command::cargo_bin("brasslantern")
        .unwrap()
        .args(["play", "--save", save.to_str().unwrap()])
        .write_stdin("go north\nsave\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved."));
    assert!(save.exists());

    Command::cargo_bin("brasslantern")
        .unwrap()
        .args(["play", "--save", save.to_str().unwrap()])
        .write_stdin("load\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("north side of a white house"));
}
