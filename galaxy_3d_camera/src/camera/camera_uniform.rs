/// CameraUniform — GPU-facing copy of a camera's matrices.
///
/// Plain `#[repr(C)]` data so a renderer can `bytemuck::bytes_of` it straight
/// into a uniform buffer. Matrices are column-major, matching glam.

use super::camera_state::CameraState;

/// Per-camera uniform block (std140 compatible: only vec4 and mat4 members).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_projection: [[f32; 4]; 4],
    pub view_inverse: [[f32; 4]; 4],
    pub projection_inverse: [[f32; 4]; 4],
    /// xyz = camera world position, w = near clip
    pub position_near: [f32; 4],
    /// Normalized viewport rectangle (x, y, width, height)
    pub viewport: [f32; 4],
}

impl CameraUniform {
    pub fn from_state(state: &CameraState) -> Self {
        let rect = state.viewport_rect();
        Self {
            view: state.view_matrix().to_cols_array_2d(),
            projection: state.projection_matrix().to_cols_array_2d(),
            view_projection: state.view_projection_matrix().to_cols_array_2d(),
            view_inverse: state.view_matrix_inverse().to_cols_array_2d(),
            projection_inverse: state.projection_matrix_inverse().to_cols_array_2d(),
            position_near: state.position().extend(state.near_clip()).to_array(),
            viewport: [rect.x, rect.y, rect.width, rect.height],
        }
    }

    /// Raw bytes, ready for a buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
#[path = "camera_uniform_tests.rs"]
mod tests;
