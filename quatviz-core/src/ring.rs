/// Protractor ring (annulus) meshes
///
/// A ring is two concentric closed polylines in the XY plane. Each loop has
/// `segments + 1` points: point `segments` duplicates point 0 so the loop
/// closes without wrapping indices. The inner loop comes first, then the
/// outer loop.
use nalgebra::Point3;
use std::f32::consts::TAU;

use crate::config::MIN_RING_SEGMENTS;
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::IndexedMesh;

/// A full ring mesh with a fixed vertex layout.
///
/// ```text
/// index:  0 ..= n          n+1 ..= 2n+1
///         inner loop       outer loop
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RingMesh {
    segments: u32,
    vertices: Vec<Point3<f32>>,
}

impl RingMesh {
    /// Build a flat ring centred on the origin, starting at +X and winding
    /// counter-clockwise about +Z.
    pub fn new(inner_radius: f32, outer_radius: f32, segments: u32) -> GeometryResult<Self> {
        if !inner_radius.is_finite()
            || !outer_radius.is_finite()
            || inner_radius < 0.0
            || inner_radius >= outer_radius
        {
            return Err(GeometryError::InvalidRadii {
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        if segments < MIN_RING_SEGMENTS {
            return Err(GeometryError::InvalidSegmentCount(segments));
        }

        let delta = TAU / segments as f32;
        let mut vertices = Vec::with_capacity(2 * (segments as usize + 1));
        for radius in [inner_radius, outer_radius] {
            for i in 0..=segments {
                // Reuse the exact start point so the closing vertex matches bit for bit.
                let angle = if i == segments { 0.0 } else { i as f32 * delta };
                let (sin, cos) = angle.sin_cos();
                vertices.push(Point3::new(radius * cos, radius * sin, 0.0));
            }
        }

        Ok(Self { segments, vertices })
    }

    /// Wrap an externally built vertex list, checking the two-loop layout.
    pub fn from_vertices(segments: u32, vertices: Vec<Point3<f32>>) -> GeometryResult<Self> {
        let ring = Self { segments, vertices };
        ring.validate()?;
        Ok(ring)
    }

    /// Check that the descriptor still satisfies the layout contract.
    pub fn validate(&self) -> GeometryResult<()> {
        if self.segments < 1 {
            return Err(GeometryError::InvalidSegmentCount(self.segments));
        }
        let expected = 2 * self.loop_len();
        if self.vertices.len() != expected {
            return Err(GeometryError::InvalidRing {
                segments: self.segments,
                expected,
                actual: self.vertices.len(),
            });
        }
        Ok(())
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Number of points in one loop, including the closing duplicate.
    pub fn loop_len(&self) -> usize {
        self.segments as usize + 1
    }

    /// Index into `vertices()` of inner loop point `i`.
    pub fn inner_index(&self, i: usize) -> usize {
        debug_assert!(i < self.loop_len());
        i
    }

    /// Index into `vertices()` of outer loop point `i`.
    pub fn outer_index(&self, i: usize) -> usize {
        debug_assert!(i < self.loop_len());
        self.loop_len() + i
    }

    pub fn inner_loop(&self) -> &[Point3<f32>] {
        &self.vertices[..self.loop_len()]
    }

    pub fn outer_loop(&self) -> &[Point3<f32>] {
        &self.vertices[self.loop_len()..]
    }

    /// Angular width of one segment in radians.
    pub fn segment_delta(&self) -> f32 {
        TAU / self.segments as f32
    }

    /// Triangulate the whole ring as one closed quad strip.
    pub fn to_indexed_mesh(&self) -> IndexedMesh {
        let mut mesh = IndexedMesh::with_capacity(self.vertices.len(), 2 * self.segments as usize);
        mesh.vertices.extend_from_slice(&self.vertices);
        mesh.add_quad_strip(self.loop_len());
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ring_layout() {
        let ring = RingMesh::new(10.0, 11.0, 64).unwrap();
        assert_eq!(ring.segments(), 64);
        assert_eq!(ring.vertices().len(), 130);
        assert_eq!(ring.loop_len(), 65);
        assert_eq!(ring.outer_index(0), 65);
        assert_eq!(ring.inner_loop().len(), ring.outer_loop().len());

        // Both loops start on +X and close on their first point
        assert_relative_eq!(ring.inner_loop()[0], Point3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(ring.outer_loop()[0], Point3::new(11.0, 0.0, 0.0));
        assert_eq!(ring.inner_loop()[64], ring.inner_loop()[0]);
        assert_eq!(ring.outer_loop()[64], ring.outer_loop()[0]);
    }

    #[test]
    fn test_ring_winds_counter_clockwise() {
        let ring = RingMesh::new(1.0, 2.0, 4).unwrap();
        let quarter = ring.inner_loop()[1];
        assert_relative_eq!(quarter.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(quarter.y, 1.0, epsilon = 1e-6);

        let last = ring.outer_loop()[3];
        assert_relative_eq!(last.y, -2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_ring_radii() {
        let ring = RingMesh::new(3.0, 4.5, 16).unwrap();
        for point in ring.inner_loop() {
            assert_relative_eq!(point.coords.norm(), 3.0, epsilon = 1e-5);
        }
        for point in ring.outer_loop() {
            assert_relative_eq!(point.coords.norm(), 4.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_invalid_ring_parameters() {
        assert_eq!(
            RingMesh::new(1.0, 2.0, 2),
            Err(GeometryError::InvalidSegmentCount(2))
        );
        assert!(matches!(
            RingMesh::new(2.0, 1.0, 8),
            Err(GeometryError::InvalidRadii { .. })
        ));
        assert!(RingMesh::new(-1.0, 1.0, 8).is_err());
        assert!(RingMesh::new(0.0, f32::NAN, 8).is_err());
        assert!(RingMesh::new(0.0, 1.0, 8).is_ok());
    }

    #[test]
    fn test_from_vertices_checks_layout() {
        let ring = RingMesh::new(1.0, 2.0, 8).unwrap();
        let copy = RingMesh::from_vertices(8, ring.vertices().to_vec()).unwrap();
        assert_eq!(copy, ring);

        let short = ring.vertices()[..10].to_vec();
        assert_eq!(
            RingMesh::from_vertices(8, short),
            Err(GeometryError::InvalidRing {
                segments: 8,
                expected: 18,
                actual: 10
            })
        );
        assert_eq!(
            RingMesh::from_vertices(0, Vec::new()),
            Err(GeometryError::InvalidSegmentCount(0))
        );
    }

    #[test]
    fn test_single_segment_descriptor() {
        let vertices = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let ring = RingMesh::from_vertices(1, vertices).unwrap();
        assert_eq!(ring.loop_len(), 2);
        assert_eq!(ring.outer_index(1), 3);
    }

    #[test]
    fn test_full_ring_mesh() {
        let ring = RingMesh::new(1.0, 2.0, 12).unwrap();
        let mesh = ring.to_indexed_mesh();
        assert_eq!(mesh.vertex_count(), 26);
        assert_eq!(mesh.face_count(), 24);
        assert!(mesh.indices_in_bounds());
    }
}
