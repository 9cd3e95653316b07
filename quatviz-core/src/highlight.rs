/// Protractor ring highlights
///
/// A highlight is the part of a ring swept by a signed angle, starting at
/// angular position 0. Positive angles sweep counter-clockwise (forward
/// through the loop), negative angles sweep clockwise (backward from the
/// closing end of the loop).
use std::f32::consts::TAU;

use crate::error::{GeometryError, GeometryResult};
use crate::geometry::IndexedMesh;
use crate::ring::RingMesh;

/// Number of ring segments needed to cover `theta` radians.
///
/// The count is `ceil(|theta| / (2π / segments))` clamped to `segments`, so
/// any non-zero sweep covers at least one segment and a sweep of a full
/// revolution or more covers the whole ring.
pub fn segments_to_draw(segments: u32, theta: f32) -> u32 {
    if segments == 0 || theta == 0.0 || theta.is_nan() {
        return 0;
    }
    let segment_delta = TAU / segments as f32;
    let needed = (theta.abs() / segment_delta).ceil();
    // Float-to-int casts saturate, which also covers infinite sweeps.
    (needed as u32).min(segments)
}

/// Loop indices covered by a sweep, anchor first.
fn sweep_indices(segments: u32, count: u32, forward: bool) -> impl Iterator<Item = usize> {
    let n = segments as usize;
    let count = count as usize;
    let walk: Box<dyn Iterator<Item = usize>> = if forward {
        Box::new(1..=count)
    } else {
        Box::new((n - count..n).rev())
    };
    std::iter::once(0).chain(walk)
}

/// Build the partial annulus covering `theta` radians of `ring`.
///
/// A zero sweep yields an empty mesh. Otherwise the result holds the swept
/// run of the inner loop followed by the matching run of the outer loop,
/// joined by a quad strip. Faces index the new vertex list only.
pub fn ring_highlight(ring: &RingMesh, theta: f32) -> GeometryResult<IndexedMesh> {
    ring.validate()?;
    if theta.is_nan() {
        return Err(GeometryError::NonFiniteAngle);
    }
    if theta == 0.0 {
        return Ok(IndexedMesh::new());
    }

    let count = segments_to_draw(ring.segments(), theta);
    let run_len = count as usize + 1;
    let forward = theta > 0.0;

    let mut mesh = IndexedMesh::with_capacity(2 * run_len, 2 * count as usize);
    let vertices = ring.vertices();
    mesh.vertices.extend(
        sweep_indices(ring.segments(), count, forward).map(|i| vertices[ring.inner_index(i)]),
    );
    mesh.vertices.extend(
        sweep_indices(ring.segments(), count, forward).map(|i| vertices[ring.outer_index(i)]),
    );
    mesh.add_quad_strip(mesh.vertices.len() / 2);

    tracing::trace!(
        theta,
        segments = count,
        vertices = mesh.vertex_count(),
        "ring highlight"
    );
    Ok(mesh)
}
