//! Error types for curve reading and writing.

use std::fmt;
use std::io;

/// Errors from reading or writing a curve file.
#[derive(Debug)]
pub enum CurveError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// A data line is not two numbers.
    MalformedLine {
        /// One-based line number.
        line: usize,
        /// Human-readable description of what went wrong.
        detail: String,
    },
}

impl CurveError {
    /// Collapse into an `io::Error`; malformed lines become `InvalidData`.
    pub fn into_io(self) -> io::Error {
        match self {
            Self::Io(e) => e,
            other @ Self::MalformedLine { .. } => {
                io::Error::new(io::ErrorKind::InvalidData, other.to_string())
            }
        }
    }
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MalformedLine { line, detail } => {
                write!(f, "malformed curve line {line}: {detail}")
            }
        }
    }
}

impl std::error::Error for CurveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CurveError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
