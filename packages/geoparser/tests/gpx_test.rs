//! End-to-end tests for GPX track files.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

use marble_geoparser::model::{Coordinates, MultiGeometry, Placemark, Track};
use marble_geoparser::{parse_str, DataFormat, GeoDocument, ParseOptions};

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("gpx")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn parse_fixture(name: &str) -> GeoDocument {
    parse_str(DataFormat::Gpx, &load_fixture(name), ParseOptions::default())
        .unwrap_or_else(|e| panic!("Failed to parse {name}: {e}"))
}

/// The single track of the single `<trk>` in a document.
fn only_track(document: &GeoDocument) -> &Track {
    let placemarks = document.placemarks();
    assert_eq!(placemarks.len(), 1);
    let placemark = document.get::<Placemark>(placemarks[0]).unwrap();
    let multi = document
        .get::<MultiGeometry>(placemark.geometry.unwrap())
        .unwrap();
    assert_eq!(multi.geometries.len(), 1);
    document.get::<Track>(multi.geometries[0]).unwrap()
}

fn at(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2011, 6, 24, hour, min, sec).unwrap()
}

#[test]
fn test_track_with_timestamps() {
    let document = parse_fixture("simple_track.gpx");
    let placemark = document.get::<Placemark>(document.placemarks()[0]).unwrap();
    assert_eq!(placemark.feature.name, "test track");

    let track = only_track(&document);
    assert_eq!(track.len(), 3);
    assert_eq!(
        track.when,
        vec![Some(at(10, 33, 40)), Some(at(10, 33, 55)), Some(at(10, 34, 0))]
    );
    assert_eq!(
        track.coordinates_at(at(10, 33, 40)),
        Some(Coordinates::new(12.560534449, 47.231477033, 1130.647705))
    );
    assert_eq!(
        track.coordinates_at(at(10, 34, 0)),
        Some(Coordinates::new(12.560612401, 47.231497569, 1121.995850))
    );
}

#[test]
fn test_track_without_timestamps() {
    let document = parse_fixture("without_time.gpx");
    let track = only_track(&document);

    assert_eq!(track.len(), 3);
    assert_eq!(track.when, vec![None, None, None]);
    assert_eq!(
        track.coordinates[1],
        Coordinates::new(12.560604354, 47.23148684, 1127.763672)
    );
    assert_eq!(track.coordinates_at(at(10, 33, 40)), None);
}

#[test]
fn test_track_with_partial_timestamps() {
    let document = parse_fixture("partial_time.gpx");
    let track = only_track(&document);

    assert_eq!(track.len(), 3);
    assert_eq!(track.when, vec![Some(at(10, 33, 40)), None, Some(at(10, 34, 0))]);
    assert_eq!(
        track.coordinates_at(at(10, 34, 0)),
        Some(Coordinates::new(12.560612401, 47.231497569, 1121.995850))
    );
}

#[test]
fn test_heart_rate_extension() {
    let document = parse_fixture("heart_rate.gpx");
    let track = only_track(&document);

    assert_eq!(track.len(), 3);
    assert_eq!(
        track.extended.get("heartrate"),
        Some(&vec!["108".to_string(), "109".to_string(), "110".to_string()])
    );
    assert_eq!(
        track.when[0],
        Some(Utc.with_ymd_and_hms(2011, 10, 29, 8, 35, 31).unwrap())
    );
    assert_eq!(track.coordinates[2].altitude, 572.12);
}

#[test]
fn test_track_is_a_root_feature() {
    let document = parse_fixture("heart_rate.gpx");
    let root = document.features(document.root());

    assert_eq!(root.len(), 1);
    let placemark = document.get::<Placemark>(root[0]).unwrap();
    assert_eq!(placemark.feature.name, "29-OKT-11 17:29:17");
}

#[test]
fn test_long_track_parses_in_linear_time() {
    let points = 30_000;
    let mut gpx = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><name>long</name><trkseg>
"#,
    );
    for i in 0..points {
        gpx.push_str(&format!(
            "    <trkpt lat=\"47.{i:05}\" lon=\"12.{i:05}\"><ele>{}</ele><time>2011-06-24T10:{:02}:{:02}Z</time></trkpt>\n",
            1000 + i % 100,
            (i / 60) % 60,
            i % 60
        ));
    }
    gpx.push_str("  </trkseg></trk>\n</gpx>\n");

    let started = Instant::now();
    let document = parse_str(DataFormat::Gpx, &gpx, ParseOptions::default()).unwrap();
    let elapsed = started.elapsed();

    let track = only_track(&document);
    assert_eq!(track.len(), points);
    assert!(track.when.iter().all(Option::is_some));
    assert_eq!(track.coordinates[points - 1].altitude, 1099.0);
    assert!(elapsed < Duration::from_secs(30), "parsing took {elapsed:?}");
}
