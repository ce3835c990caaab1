use std::fs;
use std::io::Write;

use tremor_config::{RawPoint, load_points_csv, load_series_csv};

#[test]
fn loads_series_with_strict_headers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trend.csv");
    fs::write(&path, "label,value\nMon,72\nTue, 68.5\n").unwrap();

    let series = load_series_csv(&path).expect("load series");
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].label, "Mon");
    assert_eq!(series[1].value, 68.5);
}

#[test]
fn rejects_series_with_wrong_headers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trend.csv");
    let mut f = fs::File::create(&path).unwrap();
    writeln!(f, "day,score").unwrap();
    writeln!(f, "Mon,72").unwrap();

    let err = load_series_csv(&path).expect_err("bad headers");
    assert!(format!("{err}").contains("CSV must have headers 'label,value'"));
}

#[test]
fn reports_the_offending_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("points.csv");
    fs::write(&path, "x,y\n1,2\n3,oops\n").unwrap();

    let err = load_points_csv(&path).expect_err("bad row");
    assert!(format!("{err}").contains("invalid CSV row 3"));
}

#[test]
fn loads_points_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("points.csv");
    fs::write(&path, "x,y\n10,45\n20,46.5\n30,44\n").unwrap();

    let pts = load_points_csv(&path).expect("load points");
    assert_eq!(
        pts,
        vec![
            RawPoint { x: 10.0, y: 45.0 },
            RawPoint { x: 20.0, y: 46.5 },
            RawPoint { x: 30.0, y: 44.0 },
        ]
    );
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_points_csv(&dir.path().join("nope.csv")).expect_err("missing");
    assert!(format!("{err}").contains("open CSV"));
}
