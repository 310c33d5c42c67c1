//! Curve reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::CurveError;

/// A parsed curve file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curve {
    /// Text of the first comment line, without the `#`.
    pub label: Option<String>,
    /// `(x, y)` pairs in file order.
    pub points: Vec<(f64, f64)>,
}

impl Curve {
    /// The `y` column.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, y)| y).collect()
    }
}

/// Parse a curve from `reader`.
///
/// Blank lines and `#` comment lines are skipped; the first comment is
/// kept as the label. Every other line must hold exactly two numbers.
pub fn read_curve<R: BufRead>(reader: R) -> Result<Curve, CurveError> {
    let mut curve = Curve::default();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if let Some(comment) = text.strip_prefix('#') {
            if curve.label.is_none() {
                curve.label = Some(comment.trim().to_string());
            }
            continue;
        }
        curve.points.push(parse_point(i + 1, text)?);
    }
    Ok(curve)
}

/// Open and parse the curve file at `path`.
pub fn read_curve_file(path: &Path) -> Result<Curve, CurveError> {
    read_curve(BufReader::new(File::open(path)?))
}

fn parse_point(line: usize, text: &str) -> Result<(f64, f64), CurveError> {
    let malformed = |detail: String| CurveError::MalformedLine { line, detail };
    let mut cols = text.split_whitespace();
    let (Some(x), Some(y), None) = (cols.next(), cols.next(), cols.next()) else {
        return Err(malformed(format!("expected two columns in '{text}'")));
    };
    let x: f64 = x
        .parse()
        .map_err(|_| malformed(format!("'{x}' is not a number")))?;
    let y: f64 = y
        .parse()
        .map_err(|_| malformed(format!("'{y}' is not a number")))?;
    Ok((x, y))
}
