/// 3D transformation matrices and rotation state
use nalgebra::{Matrix4, Vector3};
use std::f32::consts::FRAC_PI_2;

use crate::config::ANGLE_LIMIT_DEGREES;

/// One of the three rotation axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in `ALL`.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn unit(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }

    /// Display colour as RGB: red, green and blue for X, Y and Z.
    pub fn color(self) -> [u8; 3] {
        match self {
            Axis::X => [0xff, 0x03, 0x03],
            Axis::Y => [0x00, 0xff, 0x28],
            Axis::Z => [0x00, 0x28, 0xff],
        }
    }

    /// Turns a ring built in the XY plane into the plane perpendicular to
    /// this axis.
    pub fn ring_orientation(self) -> Matrix4<f32> {
        match self {
            Axis::X => Matrix4::new_rotation(Vector3::new(0.0, FRAC_PI_2, 0.0)),
            Axis::Y => Matrix4::new_rotation(Vector3::new(FRAC_PI_2, 0.0, 0.0)),
            Axis::Z => Matrix4::identity(),
        }
    }
}

/// Clamp a user-entered angle to the supported range, mapping NaN to zero.
pub fn clamp_degrees(degrees: f32) -> f32 {
    if degrees.is_nan() {
        0.0
    } else {
        degrees.clamp(-ANGLE_LIMIT_DEGREES, ANGLE_LIMIT_DEGREES)
    }
}

/// Parse an integral angle from text input.
///
/// Anything that is not an integer becomes 0; out-of-range values clamp.
pub fn parse_degrees(input: &str) -> f32 {
    match input.trim().parse::<i64>() {
        Ok(value) => clamp_degrees(value as f32),
        Err(_) => {
            tracing::warn!(input, "ignoring non-numeric angle");
            0.0
        }
    }
}

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn radians(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn degrees(&self, axis: Axis) -> f32 {
        self.radians(axis).to_degrees()
    }

    pub fn set_radians(&mut self, axis: Axis, radians: f32) {
        match axis {
            Axis::X => self.x = radians,
            Axis::Y => self.y = radians,
            Axis::Z => self.z = radians,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::zero();
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        // Intrinsic XYZ order: Z is applied to the model first
        rx * ry * rz
    }
}
