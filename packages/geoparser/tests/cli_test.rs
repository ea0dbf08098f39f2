//! Tests for the `marble-geoparser` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(path)
}

fn geoparser() -> Command {
    Command::cargo_bin("marble-geoparser").unwrap()
}

#[test]
fn test_parse_prints_summary() {
    geoparser()
        .arg("parse")
        .arg(fixture("kml/styled.kml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("as KML"))
        .stdout(predicate::str::contains("Placemarks: 2"))
        .stdout(predicate::str::contains("GroundOverlay"));
}

#[test]
fn test_parse_emits_yaml() {
    geoparser()
        .args(["parse", "--emit", "yaml"])
        .arg(fixture("gpx/simple_track.gpx"))
        .assert()
        .success()
        .stdout(predicate::str::contains("kind: Track"))
        .stdout(predicate::str::contains("test track"));
}

#[test]
fn test_parse_emits_json() {
    let output = geoparser()
        .args(["parse", "--emit", "json"])
        .arg(fixture("dgml/srtm.dgml"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let nodes = json["nodes"].as_array().unwrap();
    assert_eq!(nodes[0]["kind"], "SceneDocument");
    assert_eq!(nodes.len(), 5);
}

#[test]
fn test_explicit_format_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("track.xml");
    fs::copy(fixture("gpx/heart_rate.gpx"), &path).unwrap();

    geoparser()
        .args(["parse", "--format", "gpx"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("as GPX"));
}

#[test]
fn test_unknown_extension_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "<kml/>").unwrap();

    geoparser()
        .arg("parse")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_wrong_root_fails() {
    geoparser()
        .args(["parse", "--format", "kml"])
        .arg(fixture("gpx/simple_track.gpx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid KML document root"));
}

#[test]
fn test_tags_lists_handlers() {
    geoparser()
        .args(["tags", "--format", "dgml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("17 DGML handlers"))
        .stdout(predicate::str::contains(
            "{http://edu.kde.org/marble/dgml/2.0}downloadUrl",
        ));
}
