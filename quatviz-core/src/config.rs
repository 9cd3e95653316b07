//! Default parameters for the protractor visualization
//!
//! Front-ends start from `VisualizationConfig::default()` and override
//! individual fields from their own inputs (CLI flags, JS arguments).

/// Angular segments in each protractor ring.
pub const DEFAULT_RING_SEGMENTS: u32 = 64;

/// Smallest segment count the ring factory accepts.
pub const MIN_RING_SEGMENTS: u32 = 3;

/// Rotation angles are limited to `[-ANGLE_LIMIT_DEGREES, ANGLE_LIMIT_DEGREES]`.
pub const ANGLE_LIMIT_DEGREES: f32 = 180.0;

/// Degrees added or removed per key press.
pub const DEFAULT_STEP_DEGREES: f32 = 5.0;

/// Inner ring radius as a multiple of the model's bounding radius.
pub const RING_INNER_SCALE: f32 = 1.2;

/// Outer ring radius as a multiple of the inner radius.
pub const RING_OUTER_SCALE: f32 = 1.1;

/// Axis arrows extend this far past the model's bounding box.
pub const AXIS_OVERSHOOT: f32 = 1.2;

/// Orthographic camera distance as a multiple of the outer ring radius.
pub const CAMERA_DISTANCE_SCALE: f32 = 1.15;

/// Tunable settings for a `Visualization`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualizationConfig {
    pub segments: u32,
    pub step_degrees: f32,
    pub angle_limit_degrees: f32,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_RING_SEGMENTS,
            step_degrees: DEFAULT_STEP_DEGREES,
            angle_limit_degrees: ANGLE_LIMIT_DEGREES,
        }
    }
}
