/// QuatViz Core Library - Shared geometry and rotation logic
///
/// This library provides the stateless core of the rotation visualizer:
/// protractor ring meshes, the swept-arc highlight generator, rotation
/// state, and projection helpers used by the front-ends.

pub mod config;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod projection;
pub mod ring;
pub mod transform;
pub mod visualization;

// Re-export commonly used types
pub use config::VisualizationConfig;
pub use error::{GeometryError, GeometryResult};
pub use geometry::{IndexedMesh, Mesh, Triangle, Vertex};
pub use highlight::{ring_highlight, segments_to_draw};
pub use projection::{Camera, ProjectionMode};
pub use ring::RingMesh;
pub use transform::{clamp_degrees, parse_degrees, Axis, RotationState, Transform};
pub use visualization::{AxisRing, SubscriptionId, Visualization};
