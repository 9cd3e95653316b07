/// QuatViz Web - WASM bindings for browser front-ends
///
/// The page owns rendering; this module hands it the protractor ring and
/// highlight buffers as flat `Float32Array` positions and `Uint32Array`
/// indices, recomputed whenever an angle changes.
use quatviz_core::{
    ring_highlight, Axis, GeometryError, RingMesh, Visualization, VisualizationConfig,
};
use wasm_bindgen::prelude::*;

fn to_js_error(err: GeometryError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn axis_from_index(axis: u8) -> Result<Axis, JsValue> {
    Axis::from_index(axis as usize)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown axis index {axis}, expected 0, 1 or 2")))
}

/// Flat positions and indices of one mesh
#[wasm_bindgen]
pub struct MeshBuffers {
    positions: Vec<f32>,
    indices: Vec<u32>,
}

#[wasm_bindgen]
impl MeshBuffers {
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> Vec<f32> {
        self.positions.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> Vec<u32> {
        self.indices.clone()
    }
}

/// Highlight for a freshly built ring, for pages that manage their own state.
#[wasm_bindgen]
pub fn ring_highlight_buffers(
    inner_radius: f32,
    outer_radius: f32,
    segments: u32,
    theta: f32,
) -> Result<MeshBuffers, JsValue> {
    let ring = RingMesh::new(inner_radius, outer_radius, segments).map_err(to_js_error)?;
    let mesh = ring_highlight(&ring, theta).map_err(to_js_error)?;
    Ok(MeshBuffers {
        positions: mesh.flat_positions(),
        indices: mesh.flat_indices(),
    })
}

#[wasm_bindgen]
pub struct WebVisualization {
    inner: Visualization,
}

#[wasm_bindgen]
impl WebVisualization {
    /// Rings sized for a model with the given bounding radius
    #[wasm_bindgen(constructor)]
    pub fn new(segments: u32, model_radius: f32) -> Result<WebVisualization, JsValue> {
        let config = VisualizationConfig {
            segments,
            ..VisualizationConfig::default()
        };
        let inner = Visualization::new(config, model_radius).map_err(to_js_error)?;
        Ok(WebVisualization { inner })
    }

    pub fn set_x(&mut self, degrees: f32) -> Result<bool, JsValue> {
        self.set(Axis::X, degrees)
    }

    pub fn set_y(&mut self, degrees: f32) -> Result<bool, JsValue> {
        self.set(Axis::Y, degrees)
    }

    pub fn set_z(&mut self, degrees: f32) -> Result<bool, JsValue> {
        self.set(Axis::Z, degrees)
    }

    /// Set an angle from the raw text of an input field
    pub fn set_angle_text(&mut self, axis: u8, text: &str) -> Result<bool, JsValue> {
        let axis = axis_from_index(axis)?;
        self.inner.set_angle_text(axis, text).map_err(to_js_error)
    }

    pub fn reset(&mut self) -> Result<bool, JsValue> {
        self.inner.reset().map_err(to_js_error)
    }

    /// Current `[x, y, z]` in degrees
    pub fn angles(&self) -> Vec<f32> {
        let rotation = self.inner.rotation();
        Axis::ALL.iter().map(|&axis| rotation.degrees(axis)).collect()
    }

    /// Column-major model rotation matrix
    pub fn model_matrix(&self) -> Vec<f32> {
        self.inner.model_matrix().as_slice().to_vec()
    }

    pub fn highlight_positions(&self, axis: u8) -> Result<Vec<f32>, JsValue> {
        let axis = axis_from_index(axis)?;
        Ok(self.inner.axis_ring(axis).highlight.flat_positions())
    }

    pub fn highlight_indices(&self, axis: u8) -> Result<Vec<u32>, JsValue> {
        let axis = axis_from_index(axis)?;
        Ok(self.inner.axis_ring(axis).highlight.flat_indices())
    }

    pub fn ring_positions(&self, axis: u8) -> Result<Vec<f32>, JsValue> {
        let axis = axis_from_index(axis)?;
        Ok(self.inner.axis_ring(axis).ring.to_indexed_mesh().flat_positions())
    }

    pub fn ring_indices(&self, axis: u8) -> Result<Vec<u32>, JsValue> {
        let axis = axis_from_index(axis)?;
        Ok(self.inner.axis_ring(axis).ring.to_indexed_mesh().flat_indices())
    }

    /// Column-major matrix turning the XY-plane ring onto its axis
    pub fn ring_orientation(&self, axis: u8) -> Result<Vec<f32>, JsValue> {
        let axis = axis_from_index(axis)?;
        Ok(self.inner.axis_ring(axis).orientation.as_slice().to_vec())
    }

    fn set(&mut self, axis: Axis, degrees: f32) -> Result<bool, JsValue> {
        self.inner.set_angle(axis, degrees).map_err(to_js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_buffers_follow_angles() {
        let mut vis = WebVisualization::new(64, 8.0).unwrap();
        assert!(vis.highlight_positions(0).unwrap().is_empty());

        assert!(vis.set_x(180.0).unwrap());
        assert_eq!(vis.highlight_positions(0).unwrap().len(), 66 * 3);
        assert_eq!(vis.highlight_indices(0).unwrap().len(), 64 * 3);
        assert!(vis.highlight_indices(1).unwrap().is_empty());

        vis.set_z(-10.0).unwrap();
        assert_eq!(vis.angles().len(), 3);
        assert!((vis.angles()[2] + 10.0).abs() < 1e-3);

        assert!(vis.reset().unwrap());
        assert!(vis.highlight_positions(0).unwrap().is_empty());
    }

    #[test]
    fn test_set_angle_text() {
        let mut vis = WebVisualization::new(64, 8.0).unwrap();
        assert!(vis.set_angle_text(1, "90").unwrap());
        assert_eq!(vis.highlight_positions(1).unwrap().len(), 34 * 3);

        vis.set_angle_text(1, "ninety").unwrap();
        assert!(vis.highlight_positions(1).unwrap().is_empty());
    }

    #[test]
    fn test_ring_buffers() {
        let vis = WebVisualization::new(16, 1.0).unwrap();
        assert_eq!(vis.ring_positions(2).unwrap().len(), 34 * 3);
        assert_eq!(vis.ring_indices(2).unwrap().len(), 32 * 3);
        assert_eq!(vis.ring_orientation(1).unwrap().len(), 16);
        assert_eq!(vis.model_matrix().len(), 16);
    }

    #[test]
    fn test_free_function() {
        let buffers = ring_highlight_buffers(10.0, 11.0, 64, -0.05).unwrap();
        assert_eq!(buffers.positions().len(), 12);
        assert_eq!(buffers.indices(), vec![0, 1, 2, 1, 3, 2]);
    }
}
