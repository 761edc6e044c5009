use std::io::Write as _;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const NETWORK: &str = "\
West;0.0, -2.0;Center;0.0, 0.0;red variant east;02:00;1.0
Center;0.0, 0.0;East;0.0, 2.0;red variant east;03:00;1.5
IslandA;50.0, 50.0;IslandB;51.0, 50.0;ferry variant out;10:00;8.0
";

fn network_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp network file");
    file.write_all(NETWORK.as_bytes()).expect("write network");
    file.flush().expect("flush network");
    file
}

fn cli(file: &NamedTempFile) -> Command {
    let mut cmd = cargo_bin_cmd!("transitmap-cli");
    cmd.env("RUST_LOG", "error")
        .arg("--network")
        .arg(file.path());
    cmd
}

#[test]
fn route_prints_the_stop_chain() {
    let file = network_file();
    let mut cmd = cli(&file);
    cmd.arg("route").arg("--from").arg("West").arg("--to").arg("East");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("West --> Center --> East"))
        .stdout(predicate::str::contains("2 hops"));
}

#[test]
fn route_json_emits_a_parseable_plan() {
    let file = network_file();
    let mut cmd = cli(&file);
    cmd.arg("route")
        .arg("--from")
        .arg("West")
        .arg("--to")
        .arg("East")
        .arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let plan: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON plan");
    assert_eq!(plan["start"]["name"], "West");
    assert_eq!(plan["goal"]["name"], "East");
    assert_eq!(plan["segments"].as_array().map(|s| s.len()), Some(2));
}

#[test]
fn unknown_stop_fails_with_a_suggestion() {
    let file = network_file();
    let mut cmd = cli(&file);
    cmd.arg("route").arg("--from").arg("Wist").arg("--to").arg("East");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown stop name: Wist"))
        .stderr(predicate::str::contains("Did you mean"));
}

#[test]
fn unreachable_goal_fails_with_route_not_found() {
    let file = network_file();
    let mut cmd = cli(&file);
    cmd.arg("route")
        .arg("--from")
        .arg("West")
        .arg("--to")
        .arg("IslandB");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no route found between West and IslandB"));
}

#[test]
fn stops_lists_names_sorted() {
    let file = network_file();
    let mut cmd = cli(&file);
    cmd.arg("stops");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Center\nEast\nIslandA\nIslandB\nWest\n"));
}

#[test]
fn missing_network_file_fails_with_context() {
    let mut cmd = cargo_bin_cmd!("transitmap-cli");
    cmd.env("RUST_LOG", "error")
        .arg("--network")
        .arg("no/such/file.csv")
        .arg("stops");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load network from"));
}
