use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("azel").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("azel"));
}

#[test]
fn sites_lists_known_values() {
    let mut cmd = Command::cargo_bin("azel").unwrap();
    cmd.arg("sites");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("nanten2"))
        .stdout(predicate::str::contains("NRO 45m Telescope"))
        .stdout(predicate::str::contains("Europe/London"))
        .stdout(predicate::str::contains("#1e90ff"));
}

#[test]
fn print_request_shows_payload_without_network() {
    let mut cmd = Command::cargo_bin("azel").unwrap();
    cmd.args([
        "plot",
        "--date",
        "2025-03-20",
        "--site",
        "NRO45",
        "--target",
        "Moon",
        "--target",
        "Vega:#00CED1",
        "--target",
        "sun",
        "--print-request",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"date\": \"2025-03-20\""))
        .stdout(predicate::str::contains("\"site\": \"nro45\""))
        .stdout(predicate::str::contains("\"name\": \"Moon\""))
        .stdout(predicate::str::contains("\"color\": \"#1e90ff\""))
        .stdout(predicate::str::contains("\"color\": \"#00ced1\""))
        .stderr(predicate::str::contains("Target \"sun\" already exists."));
}

#[test]
fn malformed_target_color_is_reported() {
    let mut cmd = Command::cargo_bin("azel").unwrap();
    cmd.args(["plot", "--target", "Vega:#zz", "--print-request"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Vega").not())
        .stderr(predicate::str::contains("invalid color \"#zz\""));
}

#[test]
fn rejects_invalid_date() {
    let mut cmd = Command::cargo_bin("azel").unwrap();
    cmd.args(["plot", "--date", "21/03/2025", "--print-request"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn empty_target_list_has_nothing_to_print() {
    let mut cmd = Command::cargo_bin("azel").unwrap();
    cmd.args(["plot", "--clear-default", "--print-request"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("target list is empty"));
}

// Live test (opt-in): AZEL_API_URL=... cargo test --features online
#[cfg(feature = "online")]
#[test]
fn plot_online_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("azel.png");
    let mut cmd = Command::cargo_bin("azel").unwrap();
    cmd.args(["plot", "--target", "Moon", "--out"]).arg(&out);
    cmd.assert().success();
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}
