use std::fs;
use std::path::PathBuf;

use tglobe_core::{load_table, project, TableError};

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tglobe-{}-{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn three_row_table_yields_two_points() {
    let path = write_temp(
        "sites.csv",
        "latitude,longitude,name,country,visitors\n\
         48.8584,2.2945,Eiffel Tower,France,7000000\n\
         40.6892,-74.0445,Statue of Liberty,USA\n",
    );

    let points = load_table(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].fields.len(), 3);
    assert_eq!(points[1].fields.len(), 2);
    assert_eq!(points[1].fields[0], "Statue of Liberty");

    // Markers land on the unit globe exactly where the projector puts them.
    for point in &points {
        let p = point.position(1.0);
        assert_eq!(p, project(point.latitude, point.longitude, 1.0));
        assert!((p.coords.norm() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn bad_row_aborts_load() {
    let path = write_temp("bad.csv", "lat,lon\n12,north\n");
    let err = load_table(&path).unwrap_err();
    fs::remove_file(&path).ok();

    assert!(matches!(
        err,
        TableError::InvalidNumber {
            line: 2,
            column: "longitude",
            ..
        }
    ));
    assert!(err.to_string().contains("north"));
}
