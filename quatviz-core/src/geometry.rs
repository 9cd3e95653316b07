/// Geometry primitives for 3D rendering
use nalgebra::{Point3, Vector3};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }

    pub fn from_point(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        face_normal(
            &self.vertices[0].position,
            &self.vertices[1].position,
            &self.vertices[2].position,
        )
    }
}

/// Unit normal of a triangle, falling back to +Z for degenerate faces.
fn face_normal(a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>) -> Vector3<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    edge1
        .cross(&edge2)
        .try_normalize(1e-12)
        .unwrap_or_else(Vector3::z)
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let mut points = self
            .triangles
            .iter()
            .flat_map(|triangle| triangle.vertices.iter().map(|v| v.position));
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p))))
    }

    /// Radius of the sphere enclosing the bounding box.
    pub fn bounding_radius(&self) -> f32 {
        self.bounding_box()
            .map(|(min, max)| (max - min).norm() / 2.0)
            .unwrap_or(0.0)
    }

    /// A low-poly space shuttle, nose along +X, wings along Z, fin up +Y.
    pub fn shuttle(length: f32) -> Self {
        const POINTS: [[f32; 3]; 18] = [
            // Fuselage rear
            [-0.5, -0.08, -0.08],
            [-0.5, 0.08, -0.08],
            [-0.5, 0.08, 0.08],
            [-0.5, -0.08, 0.08],
            // Fuselage front
            [0.3, -0.08, -0.08],
            [0.3, 0.08, -0.08],
            [0.3, 0.08, 0.08],
            [0.3, -0.08, 0.08],
            // Nose tip
            [0.5, 0.0, 0.0],
            // Starboard wing
            [0.1, -0.04, 0.08],
            [-0.45, -0.04, 0.08],
            [-0.45, -0.04, 0.4],
            // Port wing
            [0.1, -0.04, -0.08],
            [-0.45, -0.04, -0.08],
            [-0.45, -0.04, -0.4],
            // Tail fin
            [-0.2, 0.08, 0.0],
            [-0.5, 0.08, 0.0],
            [-0.5, 0.3, 0.0],
        ];
        const FACES: [[u32; 3]; 19] = [
            [0, 2, 1],
            [0, 3, 2],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
            [0, 1, 5],
            [0, 5, 4],
            [3, 7, 6],
            [3, 6, 2],
            [4, 5, 8],
            [5, 6, 8],
            [6, 7, 8],
            [7, 4, 8],
            [9, 10, 11],
            [12, 14, 13],
            [15, 16, 17],
            [15, 17, 16],
            [9, 11, 10],
        ];

        let indexed = IndexedMesh {
            vertices: POINTS
                .iter()
                .map(|&[x, y, z]| Point3::new(x * length, y * length, z * length))
                .collect(),
            faces: FACES.to_vec(),
        };
        indexed.to_mesh()
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// A mesh stored as a vertex list plus triangles indexing into it.
///
/// Highlight meshes and rings use this form; `to_mesh` flattens it into
/// the triangle list the renderers consume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    /// True when every face refers to an existing vertex.
    pub fn indices_in_bounds(&self) -> bool {
        let count = self.vertices.len();
        self.faces
            .iter()
            .flatten()
            .all(|&index| (index as usize) < count)
    }

    /// Connect two equal-length runs of vertices, stored back to back, into
    /// a strip of quads with two triangles each.
    ///
    /// `run_len` is the length of one run; the runs are `0..run_len` and
    /// `run_len..2 * run_len`.
    pub fn add_quad_strip(&mut self, run_len: usize) {
        let m = run_len as u32;
        for i in 0..m.saturating_sub(1) {
            self.faces.push([i, i + 1, m + i]);
            self.faces.push([i + 1, m + i + 1, m + i]);
        }
    }

    /// Expand into a triangle list with flat per-face normals.
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::with_capacity(self.faces.len());
        for &face in &self.faces {
            let [a, b, c] = face.map(|index| self.vertices[index as usize]);
            let normal = face_normal(&a, &b, &c);
            mesh.add_triangle(Triangle::new(
                Vertex::from_point(a, normal),
                Vertex::from_point(b, normal),
                Vertex::from_point(c, normal),
            ));
        }
        mesh
    }

    /// Positions flattened to `[x0, y0, z0, x1, ...]`.
    pub fn flat_positions(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|p| [p.x, p.y, p.z])
            .collect()
    }

    /// Face indices flattened to `[a0, b0, c0, a1, ...]`.
    pub fn flat_indices(&self) -> Vec<u32> {
        self.faces.iter().flatten().copied().collect()
    }
}
