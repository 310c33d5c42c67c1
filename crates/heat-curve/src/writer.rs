//! Curve writer.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::CurveError;
use crate::format::format_point;

/// Streams one curve to a byte sink.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and persistence
/// uses `BufWriter<File>`. The label line is written on construction.
pub struct CurveWriter<W: Write> {
    writer: W,
    points_written: usize,
}

impl<W: Write> CurveWriter<W> {
    /// Start a curve, writing `# <label>`.
    pub fn new(mut writer: W, label: &str) -> Result<Self, CurveError> {
        writeln!(writer, "# {label}")?;
        Ok(Self {
            writer,
            points_written: 0,
        })
    }

    /// Append one `x y` line.
    pub fn write_point(&mut self, x: f64, y: f64) -> Result<(), CurveError> {
        writeln!(self.writer, "{}", format_point(x, y))?;
        self.points_written += 1;
        Ok(())
    }

    /// Append every point of `points` in order.
    pub fn write_points<I>(&mut self, points: I) -> Result<(), CurveError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        for (x, y) in points {
            self.write_point(x, y)?;
        }
        Ok(())
    }

    /// Number of data lines written so far.
    pub fn points_written(&self) -> usize {
        self.points_written
    }

    /// Flush and return the sink.
    pub fn finish(mut self) -> Result<W, CurveError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Open `path` for a curve written point by point, creating parent
/// directories and truncating any existing file.
pub fn create_curve_file(
    path: &Path,
    label: &str,
) -> Result<CurveWriter<BufWriter<File>>, CurveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    CurveWriter::new(BufWriter::new(File::create(path)?), label)
}

/// Write a whole curve to `path`, creating parent directories and
/// replacing any existing file. Returns the number of points written.
pub fn write_curve_file<I>(path: &Path, label: &str, points: I) -> Result<usize, CurveError>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut writer = create_curve_file(path, label)?;
    writer.write_points(points)?;
    let n = writer.points_written();
    writer.finish()?;
    Ok(n)
}
