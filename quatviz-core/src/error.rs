/// Error types for ring and highlight geometry
use thiserror::Error;

/// Errors raised when a ring descriptor or sweep angle breaks a precondition.
///
/// These are programmer errors: the generator fails fast instead of
/// producing a partially-correct mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The vertex list does not match the two-loop layout for `segments`.
    #[error("Invalid ring: {segments} segments require {expected} vertices, found {actual}")]
    InvalidRing {
        segments: u32,
        expected: usize,
        actual: usize,
    },

    /// Too few angular segments to describe a ring.
    #[error("Invalid segment count: {0}")]
    InvalidSegmentCount(u32),

    /// Radii must be finite with `0 <= inner < outer`.
    #[error("Invalid ring radii: inner {inner}, outer {outer}")]
    InvalidRadii { inner: f32, outer: f32 },

    /// The angle limit must be finite and within `[0, 180]` degrees.
    #[error("Invalid angle limit: {0} degrees")]
    InvalidAngleLimit(f32),

    /// The sweep angle was NaN.
    #[error("Sweep angle is not a number")]
    NonFiniteAngle,
}

pub type GeometryResult<T> = Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeometryError::InvalidRing {
            segments: 64,
            expected: 130,
            actual: 12,
        };
        let message = err.to_string();
        assert!(message.contains("64 segments"));
        assert!(message.contains("130"));
        assert!(message.contains("12"));

        let err = GeometryError::InvalidRadii {
            inner: 2.0,
            outer: 1.0,
        };
        assert!(err.to_string().contains("inner 2"));

        let err = GeometryError::InvalidAngleLimit(-10.0);
        assert!(err.to_string().contains("-10"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeometryError>();
    }
}
