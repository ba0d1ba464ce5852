//! Integration tests for the `roadnav` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SPLIT_TOWN: &str = r#"{
  "locations": [
    { "id": 0, "name": "North Depot" },
    { "id": 1, "name": "North Market" },
    { "id": 2, "name": "South Harbour" }
  ],
  "roads": [{ "from": 0, "to": 1, "distance": 1.5 }]
}"#;

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("roadnav");
    cmd.env("RUST_LOG", "error").env_remove("ROADNAV_NETWORK");
    cmd
}

/// Temporary directory holding a network definition file.
struct TestEnv {
    _temp_dir: TempDir,
    network_path: PathBuf,
}

impl TestEnv {
    fn with_network(contents: &str) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let network_path = temp_dir.path().join("network.json");
        fs::write(&network_path, contents).expect("write network definition");
        Self {
            _temp_dir: temp_dir,
            network_path,
        }
    }
}

#[test]
fn route_between_ids_prints_directions() {
    cli()
        .args(["route", "--from", "0", "--to", "11"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Route: Main St & 1st Ave -> Mountain Rd & 3rd Ave (5 hops)",
        ))
        .stdout(predicate::str::contains("Distance: 8.0km"))
        .stdout(predicate::str::contains("Estimated time: 16 min"))
        .stdout(predicate::str::contains(
            "6. Arrive at Mountain Rd & 3rd Ave (1.5km)",
        ));
}

#[test]
fn route_accepts_location_names() {
    cli()
        .args([
            "--format",
            "brief",
            "route",
            "--from",
            "main st & 1st ave",
            "--to",
            "Broadway & 1st Ave",
        ])
        .assert()
        .success()
        .stdout(predicate::eq(
            "Main St & 1st Ave -> Elm St & 1st Ave -> Broadway & 1st Ave (2.7km)\n",
        ));
}

#[test]
fn trace_flag_appends_search_trace() {
    cli()
        .args(["route", "--from", "0", "--to", "6", "--trace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Search trace:"))
        .stdout(predicate::str::contains(
            "  -> Updated route to Park Rd & 2nd Ave: 2.1km",
        ));
}

#[test]
fn json_output_contains_structured_result() {
    let output = cli()
        .args(["--format", "json", "route", "--from", "0", "--to", "11", "--trace"])
        .output()
        .expect("run roadnav");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["found"], true);
    assert_eq!(value["hops"], 5);
    assert_eq!(value["explored"], 12);
    let ids: Vec<u64> = value["steps"]
        .as_array()
        .expect("steps array")
        .iter()
        .map(|step| step["id"].as_u64().expect("numeric id"))
        .collect();
    assert_eq!(ids, vec![0, 3, 6, 7, 8, 11]);
    assert_eq!(value["trace"].as_array().map(Vec::len), Some(30));
    assert_eq!(value["trace"][0]["event"], "settled");
}

#[test]
fn speed_changes_the_estimate() {
    cli()
        .args(["route", "--from", "0", "--to", "11", "--speed", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated time: 8 min"));
}

#[test]
fn non_positive_speed_is_rejected() {
    cli()
        .args(["route", "--from", "0", "--to", "11", "--speed", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("speed must be a positive number"));
}

#[test]
fn unknown_node_id_is_an_error() {
    cli()
        .args(["route", "--from", "999", "--to", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown node: 999"));
}

#[test]
fn unknown_name_suggests_alternatives() {
    cli()
        .args(["route", "--from", "Oak St & 3rd Avenue", "--to", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "unknown location: Oak St & 3rd Avenue",
        ))
        .stderr(predicate::str::contains("Did you mean"))
        .stderr(predicate::str::contains("Oak St & 3rd Ave"));
}

#[test]
fn disconnected_locations_report_no_route_successfully() {
    let env = TestEnv::with_network(SPLIT_TOWN);
    cli()
        .arg("--network")
        .arg(&env.network_path)
        .args(["route", "--from", "North Depot", "--to", "South Harbour"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No route found from North Depot to South Harbour (2 intersections explored)",
        ));
}

#[test]
fn settle_budget_is_reported() {
    cli()
        .args(["route", "--from", "0", "--to", "11", "--max-settled", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("search budget exhausted"));
}

#[test]
fn network_can_come_from_the_environment() {
    let env = TestEnv::with_network(SPLIT_TOWN);
    cli()
        .env("ROADNAV_NETWORK", &env.network_path)
        .args(["--format", "brief", "route", "--from", "0", "--to", "1"])
        .assert()
        .success()
        .stdout(predicate::eq("North Depot -> North Market (1.5km)\n"));
}

#[test]
fn invalid_network_file_is_an_error() {
    let env = TestEnv::with_network(
        r#"{ "locations": [{ "id": 0 }, { "id": 1 }],
             "roads": [{ "from": 0, "to": 1, "distance": -2.0 }] }"#,
    );
    cli()
        .arg("--network")
        .arg(&env.network_path)
        .arg("locations")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load network"));
}

#[test]
fn locations_lists_the_demo_city() {
    cli()
        .arg("locations")
        .assert()
        .success()
        .stdout(predicate::str::contains("  0. Main St & 1st Ave (1, 5) [3 roads]"))
        .stdout(predicate::str::contains(" 11. Mountain Rd & 3rd Ave"));
}

#[test]
fn locations_json_lists_every_node() {
    let output = cli()
        .args(["locations", "--format", "json"])
        .output()
        .expect("run roadnav");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let rows = value.as_array().expect("array of locations");
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[4]["name"], "Pine St & 2nd Ave");
    assert_eq!(rows[4]["position"]["x"], 3.1);
}

#[test]
fn stats_summarises_the_demo_city() {
    cli()
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("  Roads: 22"))
        .stdout(predicate::str::contains(
            "  Roads per intersection: min 2, max 5, average 3.7",
        ))
        .stdout(predicate::str::contains(
            "  Connectivity: 100.0% (132/132 pairs reachable)",
        ))
        .stdout(predicate::str::contains("  Longest: 8.1km"))
        .stdout(predicate::str::contains("Distance matrix").not());
}

#[test]
fn stats_json_reports_partial_connectivity() {
    let env = TestEnv::with_network(SPLIT_TOWN);
    let output = cli()
        .arg("--network")
        .arg(&env.network_path)
        .args(["--format", "json", "stats", "--matrix"])
        .output()
        .expect("run roadnav");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["network"]["reachable_pairs"], 2);
    assert_eq!(value["network"]["total_pairs"], 6);
    assert_eq!(value["network"]["least_connected"]["id"], 2);
    assert_eq!(value["pairs"]["average"], 1.5);
    assert!(value["matrix"]["distances"][0][2].is_null());
}
