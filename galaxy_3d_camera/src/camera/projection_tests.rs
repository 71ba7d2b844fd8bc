use glam::{Mat4, Quat, Vec3, Vec4};
use super::*;

fn assert_mat4_near(a: &Mat4, b: &Mat4, eps: f32) {
    let a = a.to_cols_array();
    let b = b.to_cols_array();
    for i in 0..16 {
        assert!((a[i] - b[i]).abs() <= eps, "element {}: {} vs {}", i, a[i], b[i]);
    }
}

// ============================================================================
// perspective
// ============================================================================

#[test]
fn test_perspective_matches_glam_with_equivalent_vertical_fov() {
    let fov_x = 90f32.to_radians();
    let aspect = 16.0 / 9.0;
    let (proj, _) = perspective(fov_x, aspect, 0.5, 500.0);

    let expected = Mat4::perspective_rh(vertical_fov(fov_x, aspect), aspect, 0.5, 500.0);
    assert_mat4_near(&proj, &expected, 1e-5);
}

#[test]
fn test_perspective_inverse_is_exact() {
    for &(fov, aspect, near, far) in &[
        (90.0f32, 1.333f32, 1.0f32, 1000.0f32),
        (60.0, 16.0 / 9.0, 0.1, 100.0),
        (120.0, 0.5, 0.01, 10.0),
    ] {
        let (proj, inv) = perspective(fov.to_radians(), aspect, near, far);
        assert_mat4_near(&(proj * inv), &Mat4::IDENTITY, 1e-5);
        assert_mat4_near(&(inv * proj), &Mat4::IDENTITY, 1e-5);
    }
}

#[test]
fn test_perspective_depth_range_is_zero_to_one() {
    let (proj, _) = perspective(90f32.to_radians(), 1.0, 2.0, 50.0);
    let near = proj.project_point3(Vec3::new(0.0, 0.0, -2.0));
    let far = proj.project_point3(Vec3::new(0.0, 0.0, -50.0));
    assert!(near.z.abs() < 1e-6);
    assert!((far.z - 1.0).abs() < 1e-5);
}

#[test]
fn test_perspective_horizontal_fov_edges() {
    // 90° horizontal: the right frustum edge at distance d is x = d
    let (proj, _) = perspective(90f32.to_radians(), 2.0, 1.0, 100.0);
    let edge = proj.project_point3(Vec3::new(10.0, 0.0, -10.0));
    assert!((edge.x - 1.0).abs() < 1e-5);
    // Vertical half-extent is x / aspect
    let top = proj.project_point3(Vec3::new(0.0, 5.0, -10.0));
    assert!((top.y - 1.0).abs() < 1e-5);
}

// ============================================================================
// orthographic
// ============================================================================

#[test]
fn test_orthographic_matches_glam() {
    let (proj, _) = orthographic(8.0, 6.0, 1.0, 1000.0);
    let expected = Mat4::orthographic_rh(-4.0, 4.0, -3.0, 3.0, 1.0, 1000.0);
    assert_mat4_near(&proj, &expected, 1e-6);
}

#[test]
fn test_orthographic_inverse_is_exact() {
    let (proj, inv) = orthographic(6.665, 5.0, 1.0, 1000.0);
    assert_mat4_near(&(proj * inv), &Mat4::IDENTITY, 1e-5);
    assert_mat4_near(&(inv * proj), &Mat4::IDENTITY, 1e-5);
}

// ============================================================================
// rigid_view
// ============================================================================

#[test]
fn test_rigid_view_inverse_pair() {
    let rotation = Quat::from_euler(glam::EulerRot::YXZ, 0.7, -0.3, 0.1);
    let (view, view_inv) = rigid_view(Vec3::new(3.0, -2.0, 10.0), rotation);
    assert_mat4_near(&(view * view_inv), &Mat4::IDENTITY, 1e-5);
}

#[test]
fn test_rigid_view_moves_camera_to_origin() {
    let position = Vec3::new(1.0, 2.0, 3.0);
    let (view, view_inv) = rigid_view(position, Quat::IDENTITY);
    assert!(view.transform_point3(position).length() < 1e-6);
    assert_eq!(view_inv.w_axis, Vec4::new(1.0, 2.0, 3.0, 1.0));
}

#[test]
fn test_rigid_view_matches_look_at() {
    // Yaw 90° left: the camera looks down world -X
    let rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
    let eye = Vec3::new(0.0, 1.0, 0.0);
    let (view, _) = rigid_view(eye, rotation);
    let expected = Mat4::look_at_rh(eye, eye + Vec3::NEG_X, Vec3::Y);
    assert_mat4_near(&view, &expected, 1e-5);
}

#[test]
fn test_vertical_fov_square_aspect() {
    let fov = 75f32.to_radians();
    assert!((vertical_fov(fov, 1.0) - fov).abs() < 1e-6);
}
