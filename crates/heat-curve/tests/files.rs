//! Curve files on disk.

use std::path::Path;

use heat_curve::{
    create_curve_file, curve_path, read_curve_file, write_curve_file, CurveError, CurveName,
    TEMPERATURE_LABEL,
};
use proptest::prelude::*;

#[test]
fn field_survives_disk_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let points: Vec<(f64, f64)> = (0..11)
        .map(|i| {
            let x = i as f64 * 0.1;
            (x, (std::f64::consts::PI * x).sin() + 1.0e-3 * i as f64)
        })
        .collect();

    let path = curve_path(dir.path(), "demo", CurveName::Step(0));
    assert!(path.ends_with("demo/demo_soln_00000.curve"));
    let n = write_curve_file(&path, TEMPERATURE_LABEL, points.iter().copied()).unwrap();
    assert_eq!(n, 11);

    let curve = read_curve_file(&path).unwrap();
    assert_eq!(curve.label.as_deref(), Some(TEMPERATURE_LABEL));
    assert_eq!(curve.points, points);
    let xs: Vec<f64> = curve.points.iter().map(|p| p.0).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn rewrite_replaces_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = curve_path(dir.path(), "r", CurveName::Final);
    write_curve_file(&path, "a", [(0.0, 1.0), (1.0, 2.0)]).unwrap();
    write_curve_file(&path, "b", [(0.0, 3.0)]).unwrap();
    let curve = read_curve_file(&path).unwrap();
    assert_eq!(curve.label.as_deref(), Some("b"));
    assert_eq!(curve.points, vec![(0.0, 3.0)]);
}

#[test]
fn streamed_curve_creates_parents() {
    let dir = tempfile::tempdir().unwrap();
    let path = curve_path(dir.path(), "s", CurveName::Change);
    let mut writer = create_curve_file(&path, "s/s_l2_change").unwrap();
    for step in 1..=3 {
        writer.write_point(step as f64 * 0.5, 1.0 / step as f64).unwrap();
    }
    assert_eq!(writer.points_written(), 3);
    writer.finish().unwrap();

    let curve = read_curve_file(&path).unwrap();
    assert_eq!(curve.label.as_deref(), Some("s/s_l2_change"));
    assert_eq!(curve.points, vec![(0.5, 1.0), (1.0, 0.5), (1.5, 1.0 / 3.0)]);
}

#[test]
fn missing_file_is_io_error() {
    let err = read_curve_file(Path::new("/nonexistent/heat/none.curve")).unwrap_err();
    assert!(matches!(err, CurveError::Io(_)));
}

proptest! {
    #[test]
    fn printed_values_parse_back_exactly(v in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        let text = heat_curve::format_value(v);
        let back: f64 = text.trim().parse().unwrap();
        prop_assert_eq!(back, v);
    }
}
