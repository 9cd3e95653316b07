/// Visualization context: the three protractor rings and their highlights
///
/// Changing an angle goes through `set_angle`, which stores the clamped
/// value, rebuilds every ring highlight from scratch and then notifies the
/// subscribers. There is no other path that mutates the rotation.
use nalgebra::{Matrix4, Point3};
use std::fmt;

use crate::config::{
    VisualizationConfig, ANGLE_LIMIT_DEGREES, AXIS_OVERSHOOT, CAMERA_DISTANCE_SCALE,
    RING_INNER_SCALE, RING_OUTER_SCALE,
};
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{IndexedMesh, Mesh};
use crate::highlight::ring_highlight;
use crate::ring::RingMesh;
use crate::transform::{parse_degrees, Axis, RotationState, Transform};

/// The protractor for one axis: its fixed ring and the current highlight.
#[derive(Debug, Clone)]
pub struct AxisRing {
    pub axis: Axis,
    pub ring: RingMesh,
    pub highlight: IndexedMesh,
    /// Places the XY-plane ring perpendicular to `axis`
    pub orientation: Matrix4<f32>,
}

/// Handle returned by `Visualization::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&RotationState)>;

pub struct Visualization {
    config: VisualizationConfig,
    rotation: RotationState,
    rings: [AxisRing; 3],
    axis_tips: [Point3<f32>; 3],
    camera_distance: f32,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Visualization {
    /// Size the protractors around `model` and start with all angles at zero.
    pub fn for_model(config: VisualizationConfig, model: &Mesh) -> GeometryResult<Self> {
        let max = model
            .bounding_box()
            .map(|(_, max)| max)
            .unwrap_or_else(Point3::origin);
        let mut visualization = Self::new(config, model.bounding_radius())?;
        visualization.axis_tips = Axis::ALL.map(|axis| {
            let extent = max[axis.index()].ceil();
            Point3::from(axis.unit() * extent * AXIS_OVERSHOOT)
        });
        Ok(visualization)
    }

    /// Build rings for a model whose bounding sphere has `model_radius`.
    pub fn new(config: VisualizationConfig, model_radius: f32) -> GeometryResult<Self> {
        let limit = config.angle_limit_degrees;
        if !(0.0..=ANGLE_LIMIT_DEGREES).contains(&limit) {
            return Err(GeometryError::InvalidAngleLimit(limit));
        }

        let inner = model_radius.ceil() * RING_INNER_SCALE;
        let outer = inner * RING_OUTER_SCALE;

        let build = |axis: Axis| -> GeometryResult<AxisRing> {
            Ok(AxisRing {
                axis,
                ring: RingMesh::new(inner, outer, config.segments)?,
                highlight: IndexedMesh::new(),
                orientation: axis.ring_orientation(),
            })
        };
        let rings = [build(Axis::X)?, build(Axis::Y)?, build(Axis::Z)?];

        tracing::debug!(inner, outer, segments = config.segments, "built protractor rings");

        Ok(Self {
            config,
            rotation: RotationState::zero(),
            rings,
            axis_tips: Axis::ALL.map(|axis| Point3::from(axis.unit() * inner)),
            camera_distance: outer * CAMERA_DISTANCE_SCALE,
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    pub fn config(&self) -> &VisualizationConfig {
        &self.config
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn axis_ring(&self, axis: Axis) -> &AxisRing {
        &self.rings[axis.index()]
    }

    pub fn rings(&self) -> &[AxisRing; 3] {
        &self.rings
    }

    /// End point of the model-space arrow drawn for `axis`.
    pub fn axis_tip(&self, axis: Axis) -> Point3<f32> {
        self.axis_tips[axis.index()]
    }

    /// Distance at which an orthographic camera frames all three rings.
    pub fn camera_distance(&self) -> f32 {
        self.camera_distance
    }

    /// Rotation applied to the model.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Transform::rotation_matrix(&self.rotation)
    }

    /// Set one angle in degrees, clamped to the configured limit. NaN
    /// counts as zero.
    ///
    /// Returns whether the rotation changed; subscribers only hear about
    /// real changes.
    pub fn set_angle(&mut self, axis: Axis, degrees: f32) -> GeometryResult<bool> {
        let limit = self.config.angle_limit_degrees;
        let degrees = if degrees.is_nan() {
            0.0
        } else {
            degrees.clamp(-limit, limit)
        };
        let mut next = self.rotation;
        next.set_radians(axis, degrees.to_radians());
        self.apply(next)
    }

    /// Set one angle from text input; non-integers count as zero.
    pub fn set_angle_text(&mut self, axis: Axis, input: &str) -> GeometryResult<bool> {
        self.set_angle(axis, parse_degrees(input))
    }

    /// Move one angle by `steps` times the configured step size.
    pub fn step_angle(&mut self, axis: Axis, steps: f32) -> GeometryResult<bool> {
        let current = self.rotation.degrees(axis).round();
        self.set_angle(axis, current + steps * self.config.step_degrees)
    }

    /// Return every angle to zero.
    pub fn reset(&mut self) -> GeometryResult<bool> {
        self.apply(RotationState::zero())
    }

    fn apply(&mut self, next: RotationState) -> GeometryResult<bool> {
        if next == self.rotation {
            return Ok(false);
        }
        self.rotation = next;
        self.recompute()?;
        tracing::debug!(
            x = self.rotation.degrees(Axis::X),
            y = self.rotation.degrees(Axis::Y),
            z = self.rotation.degrees(Axis::Z),
            "rotation changed"
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.rotation);
        }
        Ok(true)
    }

    /// Rebuild every highlight from the current rotation.
    pub fn recompute(&mut self) -> GeometryResult<()> {
        for ring in self.rings.iter_mut() {
            ring.highlight = ring_highlight(&ring.ring, self.rotation.radians(ring.axis))?;
        }
        Ok(())
    }

    /// Register a callback invoked after each rotation change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&RotationState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}

impl fmt::Debug for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visualization")
            .field("config", &self.config)
            .field("rotation", &self.rotation)
            .field("rings", &self.rings)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn visualization() -> Visualization {
        Visualization::new(VisualizationConfig::default(), 8.3).unwrap()
    }

    #[test]
    fn test_ring_radii_follow_model() {
        let vis = visualization();
        let ring = &vis.axis_ring(Axis::Z).ring;
        // ceil(8.3) = 9 -> inner 10.8, outer 11.88
        assert_relative_eq!(ring.inner_loop()[0].x, 10.8, epsilon = 1e-4);
        assert_relative_eq!(ring.outer_loop()[0].x, 11.88, epsilon = 1e-4);
        assert_eq!(ring.segments(), 64);
        assert!(vis.camera_distance() > 11.88);
    }

    #[test]
    fn test_starts_with_empty_highlights() {
        let vis = visualization();
        for ring in vis.rings() {
            assert!(ring.highlight.is_empty());
        }
        assert_eq!(*vis.rotation(), RotationState::zero());
    }

    #[test]
    fn test_set_angle_recomputes_highlight() {
        let mut vis = visualization();
        assert!(vis.set_angle(Axis::X, 180.0).unwrap());

        let x = &vis.axis_ring(Axis::X).highlight;
        assert_eq!(x.vertex_count(), 66);
        assert_eq!(x.face_count(), 64);
        assert!(vis.axis_ring(Axis::Y).highlight.is_empty());

        vis.set_angle(Axis::Y, -90.0).unwrap();
        assert_eq!(vis.axis_ring(Axis::Y).highlight.vertex_count(), 34);
    }

    #[test]
    fn test_set_angle_clamps() {
        let mut vis = visualization();
        vis.set_angle(Axis::Z, 400.0).unwrap();
        assert_relative_eq!(vis.rotation().degrees(Axis::Z), 180.0, epsilon = 1e-3);
        vis.set_angle(Axis::Z, f32::NAN).unwrap();
        assert_eq!(vis.rotation().z, 0.0);
    }

    #[test]
    fn test_angle_limit_is_validated() {
        for limit in [-10.0, f32::NAN, f32::INFINITY, 181.0, 360.0] {
            let config = VisualizationConfig {
                angle_limit_degrees: limit,
                ..VisualizationConfig::default()
            };
            assert!(matches!(
                Visualization::new(config, 5.0),
                Err(GeometryError::InvalidAngleLimit(_))
            ));
        }
    }

    #[test]
    fn test_set_angle_honours_configured_limit() {
        let config = VisualizationConfig {
            angle_limit_degrees: 90.0,
            ..VisualizationConfig::default()
        };
        let mut vis = Visualization::new(config, 5.0).unwrap();
        vis.set_angle(Axis::X, 120.0).unwrap();
        assert_relative_eq!(vis.rotation().degrees(Axis::X), 90.0, epsilon = 1e-3);
        vis.set_angle(Axis::X, -300.0).unwrap();
        assert_relative_eq!(vis.rotation().degrees(Axis::X), -90.0, epsilon = 1e-3);

        let config = VisualizationConfig {
            angle_limit_degrees: 0.0,
            ..VisualizationConfig::default()
        };
        let mut vis = Visualization::new(config, 5.0).unwrap();
        assert!(!vis.set_angle(Axis::Y, 45.0).unwrap());
        assert!(vis.axis_ring(Axis::Y).highlight.is_empty());
    }

    #[test]
    fn test_set_angle_text() {
        let mut vis = visualization();
        assert!(vis.set_angle_text(Axis::Z, " -90 ").unwrap());
        assert_relative_eq!(vis.rotation().degrees(Axis::Z), -90.0, epsilon = 1e-3);
        assert_eq!(vis.axis_ring(Axis::Z).highlight.vertex_count(), 34);

        vis.set_angle_text(Axis::Z, "720").unwrap();
        assert_relative_eq!(vis.rotation().degrees(Axis::Z), 180.0, epsilon = 1e-3);

        vis.set_angle_text(Axis::Z, "abc").unwrap();
        assert_eq!(vis.rotation().z, 0.0);
    }

    #[test]
    fn test_step_angle() {
        let mut vis = visualization();
        vis.step_angle(Axis::Y, 1.0).unwrap();
        vis.step_angle(Axis::Y, 1.0).unwrap();
        assert_relative_eq!(vis.rotation().degrees(Axis::Y), 10.0, epsilon = 1e-3);
        vis.step_angle(Axis::Y, -3.0).unwrap();
        assert_relative_eq!(vis.rotation().degrees(Axis::Y), -5.0, epsilon = 1e-3);
    }

    #[test]
    fn test_subscribers_notified_on_change_only() {
        let mut vis = visualization();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = vis.subscribe(move |rotation| sink.borrow_mut().push(*rotation));

        vis.set_angle(Axis::X, 45.0).unwrap();
        assert!(!vis.set_angle(Axis::X, 45.0).unwrap());
        vis.reset().unwrap();
        assert!(!vis.reset().unwrap());

        {
            let seen = seen.borrow();
            assert_eq!(seen.len(), 2);
            assert_relative_eq!(seen[0].x, 45.0_f32.to_radians());
            assert_eq!(seen[1], RotationState::zero());
        }

        assert!(vis.unsubscribe(id));
        assert!(!vis.unsubscribe(id));
        vis.set_angle(Axis::Z, 10.0).unwrap();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_reset_clears_highlights() {
        let mut vis = visualization();
        vis.set_angle(Axis::X, 30.0).unwrap();
        vis.set_angle(Axis::Z, -30.0).unwrap();
        vis.reset().unwrap();
        for ring in vis.rings() {
            assert!(ring.highlight.is_empty());
        }
    }

    #[test]
    fn test_for_model_axis_tips() {
        let shuttle = Mesh::shuttle(100.0);
        let vis = Visualization::for_model(VisualizationConfig::default(), &shuttle).unwrap();
        let (_, max) = shuttle.bounding_box().unwrap();
        assert_relative_eq!(vis.axis_tip(Axis::X).x, 60.0, epsilon = 1e-3);
        for axis in Axis::ALL {
            let tip = vis.axis_tip(axis);
            let expected = max[axis.index()].ceil() * AXIS_OVERSHOOT;
            assert_relative_eq!(tip[axis.index()], expected, epsilon = 1e-3);
            assert_relative_eq!(tip.coords.norm(), expected, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_degenerate_model_is_rejected() {
        let result = Visualization::for_model(VisualizationConfig::default(), &Mesh::new());
        assert!(matches!(result, Err(GeometryError::InvalidRadii { .. })));

        let config = VisualizationConfig {
            segments: 2,
            ..VisualizationConfig::default()
        };
        assert!(matches!(
            Visualization::new(config, 5.0),
            Err(GeometryError::InvalidSegmentCount(2))
        ));
    }

    #[test]
    fn test_model_matrix_tracks_rotation() {
        let mut vis = visualization();
        vis.set_angle(Axis::Z, 90.0).unwrap();
        let p = vis.model_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
    }
}
