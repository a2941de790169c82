use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("nowplay")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("now"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_unknown_command_fails() {
    Command::cargo_bin("nowplay")
        .unwrap()
        .arg("bogus")
        .assert()
        .failure();
}

#[cfg(not(target_os = "macos"))]
#[test]
fn test_now_reports_unsupported_platform() {
    Command::cargo_bin("nowplay")
        .unwrap()
        .arg("now")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not available on this platform"));
}

#[cfg(not(target_os = "macos"))]
#[test]
fn test_watch_reports_unsupported_platform() {
    Command::cargo_bin("nowplay")
        .unwrap()
        .arg("watch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not available on this platform"));
}
