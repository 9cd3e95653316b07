/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
    /// Half the visible height in orthographic mode
    pub half_height: f32,
    /// Height-to-width ratio of one screen pixel (about 2 for terminal cells)
    pub cell_aspect: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
            half_height: 1.0,
            cell_aspect: 1.0,
        }
    }

    /// Orthographic camera at `(d, d, d)` looking at the origin, showing
    /// `d` units above and below the centre.
    pub fn isometric(width: u32, height: u32, distance: f32) -> Self {
        Self {
            position: Point3::new(distance, distance, distance),
            near: 0.1,
            far: distance * 4.0,
            mode: ProjectionMode::Orthographic,
            half_height: distance,
            ..Self::new(width, height)
        }
    }

    /// Builder-style override of the pixel shape.
    pub fn with_cell_aspect(mut self, cell_aspect: f32) -> Self {
        self.cell_aspect = cell_aspect;
        self
    }

    /// Update the aspect ratio after the viewport changes size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Width-to-height ratio of the viewport in world units.
    fn effective_aspect(&self) -> f32 {
        self.aspect / self.cell_aspect
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let aspect = self.effective_aspect();
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = self.half_height;
                let width = height * aspect;
                Matrix4::new_orthographic(-width, width, -height, height, self.near, self.far)
            }
        }
    }

    /// Project a 3D point to 2D screen space
    ///
    /// Returns `(x, y, depth)` with depth in normalized device coordinates
    /// (smaller is closer), or `None` when the point falls outside the view.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;
        self.project_with(&mvp, point, width, height)
    }

    /// Same as `project_to_screen` with a precomputed model-view-projection
    /// matrix.
    pub fn project_with(
        &self,
        mvp: &Matrix4<f32>,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = mvp * point.to_homogeneous();

        // Prevent division by near-zero w
        if clip.w.abs() < 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;

        // Clip test
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z.abs() > 1.0 {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        // View matrix should be non-zero
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_origin_projects_to_centre() {
        let identity = Matrix4::identity();
        for camera in [Camera::new(80, 40), Camera::isometric(80, 40, 10.0)] {
            let (x, y, _) = camera
                .project_to_screen(&Point3::origin(), &identity, 80, 40)
                .unwrap();
            assert_relative_eq!(x, 40.0, epsilon = 1e-3);
            assert_relative_eq!(y, 20.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_isometric_depth_order() {
        let camera = Camera::isometric(100, 100, 10.0);
        let identity = Matrix4::identity();
        let (_, _, near) = camera
            .project_to_screen(&Point3::new(2.0, 2.0, 2.0), &identity, 100, 100)
            .unwrap();
        let (_, _, far) = camera
            .project_to_screen(&Point3::new(-2.0, -2.0, -2.0), &identity, 100, 100)
            .unwrap();
        assert!(near < far);
    }

    #[test]
    fn test_points_outside_view_are_clipped() {
        let camera = Camera::isometric(100, 100, 10.0);
        let identity = Matrix4::identity();
        let outside = Point3::new(100.0, -100.0, 0.0);
        assert!(camera
            .project_to_screen(&outside, &identity, 100, 100)
            .is_none());
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = Camera::isometric(100, 100, 10.0).with_cell_aspect(2.0);
        camera.resize(200, 50);
        assert_relative_eq!(camera.aspect, 4.0);
        assert_relative_eq!(camera.effective_aspect(), 2.0);
        camera.resize(10, 0);
        assert!(camera.aspect.is_finite());
    }
}
