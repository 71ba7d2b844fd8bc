use glam::{Mat4, Vec3};
use crate::camera::camera_state::ViewportRect;
use crate::camera::transform::Transform;
use super::*;

#[test]
fn test_uniform_layout_size() {
    // 5 mat4 + 2 vec4
    assert_eq!(std::mem::size_of::<CameraUniform>(), 5 * 64 + 2 * 16);
    assert_eq!(CameraUniform::from_state(&CameraState::new()).as_bytes().len(), 352);
}

#[test]
fn test_uniform_mirrors_state() {
    let mut state = CameraState::new();
    state.set_viewport_rect(ViewportRect::new(0.5, 0.0, 0.5, 1.0)).unwrap();
    state.recompute_view(&Transform::from_position(Vec3::new(1.0, 2.0, 3.0)));

    let uniform = CameraUniform::from_state(&state);
    assert_eq!(Mat4::from_cols_array_2d(&uniform.view), *state.view_matrix());
    assert_eq!(Mat4::from_cols_array_2d(&uniform.projection), *state.projection_matrix());
    assert_eq!(Mat4::from_cols_array_2d(&uniform.view_projection), state.view_projection_matrix());
    assert_eq!(uniform.position_near, [1.0, 2.0, 3.0, 1.0]);
    assert_eq!(uniform.viewport, [0.5, 0.0, 0.5, 1.0]);
}

#[test]
fn test_zeroed_uniform() {
    let uniform: CameraUniform = bytemuck::Zeroable::zeroed();
    assert!(uniform.as_bytes().iter().all(|&b| b == 0));
}
