//! Number formatting and file naming.

use std::path::{Path, PathBuf};

/// Format `v` like C's `% .17e`.
///
/// Positive values get a leading space in place of the sign and the
/// exponent always carries a sign and at least two digits.
pub fn format_value(v: f64) -> String {
    let sign = if v.is_sign_negative() { '-' } else { ' ' };
    if v.is_nan() {
        return format!("{sign}nan");
    }
    if v.is_infinite() {
        return format!("{sign}inf");
    }
    let text = format!("{:.17e}", v.abs());
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let exp_sign = if exp < 0 { '-' } else { '+' };
            format!("{sign}{mantissa}e{exp_sign}{:02}", exp.abs())
        }
        None => format!("{sign}{text}"),
    }
}

/// One data line without the newline: `x`, a space, then `y`.
pub fn format_point(x: f64, y: f64) -> String {
    format!("{} {}", format_value(x), format_value(y))
}

/// Which file of a run's output directory a curve goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CurveName {
    /// Field at a given step; step 0 is the initial field.
    Step(u64),
    /// Field at the end of the run.
    Final,
    /// Mean squared change per step.
    Change,
}

impl CurveName {
    /// File name inside the run directory, e.g. `wave_soln_00010.curve`.
    pub fn file_name(self, run: &str) -> String {
        match self {
            Self::Step(step) => format!("{run}_soln_{step:05}.curve"),
            Self::Final => format!("{run}_soln_final.curve"),
            Self::Change => format!("{run}_change.curve"),
        }
    }
}

/// `<root>/<run>/<file name>`.
pub fn curve_path(root: &Path, run: &str, name: CurveName) -> PathBuf {
    root.join(run).join(name.file_name(run))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_c_layout() {
        assert_eq!(format_value(0.01), " 1.00000000000000000e-02");
        assert_eq!(format_value(0.5), " 5.00000000000000000e-01");
        assert_eq!(format_value(-2.5), "-2.50000000000000000e+00");
        assert_eq!(format_value(0.0), " 0.00000000000000000e+00");
        assert_eq!(format_value(-0.0), "-0.00000000000000000e+00");
        assert_eq!(format_value(1.0e100), " 1.00000000000000000e+100");
        assert_eq!(format_value(273.0), " 2.73000000000000000e+02");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_value(f64::NAN), " nan");
        assert_eq!(format_value(f64::INFINITY), " inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn point_has_two_columns() {
        assert_eq!(
            format_point(0.01, 0.5),
            " 1.00000000000000000e-02  5.00000000000000000e-01"
        );
    }

    #[test]
    fn file_names() {
        assert_eq!(CurveName::Step(0).file_name("run"), "run_soln_00000.curve");
        assert_eq!(CurveName::Step(42).file_name("run"), "run_soln_00042.curve");
        assert_eq!(
            CurveName::Step(123_456).file_name("run"),
            "run_soln_123456.curve"
        );
        assert_eq!(CurveName::Final.file_name("run"), "run_soln_final.curve");
        assert_eq!(CurveName::Change.file_name("run"), "run_change.curve");
        assert_eq!(
            curve_path(Path::new("out"), "a", CurveName::Final),
            Path::new("out/a/a_soln_final.curve")
        );
    }
}
