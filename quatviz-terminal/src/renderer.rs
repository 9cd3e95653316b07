/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3, Vector3};
use std::io::Write;
use quatviz_core::{Camera, Mesh, Triangle};

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// How the triangles of a mesh are turned into characters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style {
    /// Brightness from the angle between the face and the view direction
    Shaded,
    /// One glyph and colour for every covered cell; a negative bias pulls
    /// the mesh towards the viewer so coplanar overlays win the depth test
    Flat {
        glyph: char,
        color: Color,
        depth_bias: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    glyph: ' ',
    color: Color::Reset,
};

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![EMPTY; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocate the buffers for a new terminal size
    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(EMPTY);
    }

    /// Glyph at a cell, mainly for inspection in tests.
    pub fn glyph_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].glyph)
    }

    pub fn render_mesh(&mut self, mesh: &Mesh, model_matrix: &Matrix4<f32>, camera: &Camera, style: Style) {
        let mvp = camera.projection_matrix() * camera.view_matrix() * model_matrix;
        let view_dir = (camera.position - camera.target).normalize();
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, &mvp, model_matrix, &view_dir, camera, style);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        mvp: &Matrix4<f32>,
        model_matrix: &Matrix4<f32>,
        view_dir: &Vector3<f32>,
        camera: &Camera,
        style: Style,
    ) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match camera.project_with(mvp, &vertex.position, self.width as u32, self.height as u32) {
                Some(coords) => *slot = coords,
                None => return, // Triangle is clipped
            }
        }

        let (cell, bias) = match style {
            Style::Shaded => {
                // Faces are lit from the viewer, front or back
                let normal = model_matrix
                    .transform_vector(&triangle.calculate_normal())
                    .normalize();
                let brightness = normal.dot(view_dir).abs();

                // Map brightness to character, never fully blank
                let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
                let char_index = char_index.clamp(1, LUMINOSITY_RAMP.len() - 1);
                let glyph = LUMINOSITY_RAMP[char_index];
                (Cell { glyph, color: shade_color(glyph) }, 0.0)
            }
            Style::Flat {
                glyph,
                color,
                depth_bias,
            } => (Cell { glyph, color }, depth_bias),
        };

        self.rasterize_triangle(&screen_coords, cell, bias);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], cell: Cell, bias: f32) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric weights are all positive inside the triangle
                // whichever way it winds
                if let Some((w0, w1, w2)) = barycentric(
                    (v0.0, v0.1),
                    (v1.0, v1.1),
                    (v2.0, v2.1),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2 + bias;
                        self.plot(x as usize, y as usize, depth, cell);
                    }
                }
            }
        }
    }

    /// Draw a depth-tested line between two model-space points
    pub fn render_line(
        &mut self,
        from: &Point3<f32>,
        to: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        glyph: char,
        color: Color,
    ) {
        let (w, h) = (self.width as u32, self.height as u32);
        let (Some(a), Some(b)) = (
            camera.project_to_screen(from, model_matrix, w, h),
            camera.project_to_screen(to, model_matrix, w, h),
        ) else {
            return;
        };

        // DDA: one sample per cell along the longer screen axis
        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as usize;
        let cell = Cell { glyph, color };
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = a.0 + (b.0 - a.0) * t;
            let y = a.1 + (b.1 - a.1) * t;
            let depth = a.2 + (b.2 - a.2) * t;
            if x >= 0.0 && y >= 0.0 && (x as usize) < self.width && (y as usize) < self.height {
                self.plot(x as usize, y as usize, depth, cell);
            }
        }
    }

    fn plot(&mut self, x: usize, y: usize, depth: f32, cell: Cell) {
        let idx = y * self.width + x;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.cells[idx] = cell;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            let mut current = None;
            for cell in row {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.glyph))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Color based on character intensity
fn shade_color(c: char) -> Color {
    match c {
        ' ' | '.' | ':' => Color::DarkGrey,
        '-' | '=' => Color::Grey,
        '+' | '*' => Color::White,
        '#' | '%' | '@' => Color::Cyan,
        _ => Color::White,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
///
/// Weights are normalized by the signed area, so they come out positive
/// inside the triangle for both windings.
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
