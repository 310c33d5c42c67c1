//! C-compatible status codes.
//!
//! [`HeatStatus`] is a `repr(i32)` enum covering every failure the C API
//! can report. Handle-returning functions return these codes as `i64`.

use heat_core::HeatError;

/// Status code returned by FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeatStatus {
    /// Success.
    Ok = 0,
    /// Handle is unknown or was already destroyed.
    InvalidHandle = -1,
    /// A numeric parameter is out of range.
    InvalidParameter = -2,
    /// The initial-condition expression did not parse.
    ParseError = -3,
    /// FTCS stability bound exceeded under the strict policy.
    StabilityViolation = -4,
    /// A non-finite value appeared during the run.
    DivergenceDetected = -5,
    /// Writing a curve file failed.
    IoFailure = -6,
    /// A pointer is null, a string is not UTF-8, or an enum code or
    /// index is out of range.
    InvalidArgument = -7,
    /// Caller-provided buffer is too small.
    BufferTooSmall = -8,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl HeatStatus {
    /// The code as the integer type a function returns.
    pub fn code<T: From<i32>>(self) -> T {
        T::from(self as i32)
    }
}

impl From<&HeatError> for HeatStatus {
    fn from(e: &HeatError) -> Self {
        match e {
            HeatError::InvalidParameter { .. } => HeatStatus::InvalidParameter,
            HeatError::InvalidHandle { .. } => HeatStatus::InvalidHandle,
            HeatError::Parse(_) => HeatStatus::ParseError,
            HeatError::StabilityViolation(_) => HeatStatus::StabilityViolation,
            HeatError::DivergenceDetected { .. } => HeatStatus::DivergenceDetected,
            HeatError::IoFailure { .. } => HeatStatus::IoFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heat_core::{HandleKind, StabilityViolation};

    #[test]
    fn codes_are_negative_except_ok() {
        assert_eq!(HeatStatus::Ok.code::<i32>(), 0);
        assert_eq!(HeatStatus::Panicked.code::<i64>(), -128);
        for s in [
            HeatStatus::InvalidHandle,
            HeatStatus::InvalidParameter,
            HeatStatus::ParseError,
            HeatStatus::StabilityViolation,
            HeatStatus::DivergenceDetected,
            HeatStatus::IoFailure,
            HeatStatus::InvalidArgument,
            HeatStatus::BufferTooSmall,
        ] {
            assert!(s.code::<i32>() < 0, "{s:?}");
        }
    }

    #[test]
    fn maps_every_error() {
        assert_eq!(
            HeatStatus::from(&HeatError::invalid("dx", "bad")),
            HeatStatus::InvalidParameter
        );
        assert_eq!(
            HeatStatus::from(&HeatError::InvalidHandle {
                kind: HandleKind::Run,
                handle: 3
            }),
            HeatStatus::InvalidHandle
        );
        assert_eq!(
            HeatStatus::from(&HeatError::StabilityViolation(StabilityViolation {
                scheme: "FTCS",
                fourier: 1.0,
                limit: 0.5
            })),
            HeatStatus::StabilityViolation
        );
        assert_eq!(
            HeatStatus::from(&HeatError::DivergenceDetected { step: 1, index: 1 }),
            HeatStatus::DivergenceDetected
        );
    }
}
