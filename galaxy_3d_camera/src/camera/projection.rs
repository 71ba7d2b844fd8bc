/// Projection and view matrix builders.
///
/// Conventions shared by every camera in the crate:
/// - right-handed view space, the camera looks down -Z, +Y is up
/// - NDC X/Y in [-1, 1], NDC Z in [0, 1] (0 = near plane, 1 = far plane)
///
/// Each builder returns the matrix together with its inverse, computed in
/// closed form from the same parameters instead of by generic 4x4 inversion.

use glam::{Mat4, Quat, Vec3, Vec4};

/// Perspective projection from a horizontal field of view.
///
/// The vertical scale is derived from the horizontal one and the aspect
/// ratio (width / height).
///
/// Returns `(projection, projection_inverse)`.
pub fn perspective(fov_x_radians: f32, aspect_ratio: f32, near: f32, far: f32) -> (Mat4, Mat4) {
    let sx = 1.0 / (0.5 * fov_x_radians).tan();
    let sy = sx * aspect_ratio;
    let r = far / (near - far);

    let matrix = Mat4::from_cols(
        Vec4::new(sx, 0.0, 0.0, 0.0),
        Vec4::new(0.0, sy, 0.0, 0.0),
        Vec4::new(0.0, 0.0, r, -1.0),
        Vec4::new(0.0, 0.0, r * near, 0.0),
    );

    // clip = (sx*x, sy*y, r*z + r*n*w, -z)
    //   => z = -clip.w, w = clip.z / (r*n) + clip.w / n
    let inverse = Mat4::from_cols(
        Vec4::new(1.0 / sx, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0 / sy, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0 / (r * near)),
        Vec4::new(0.0, 0.0, -1.0, 1.0 / near),
    );

    (matrix, inverse)
}

/// Symmetric orthographic projection of a `width` x `height` window.
///
/// Returns `(projection, projection_inverse)`.
pub fn orthographic(width: f32, height: f32, near: f32, far: f32) -> (Mat4, Mat4) {
    let r = 1.0 / (near - far);

    let matrix = Mat4::from_cols(
        Vec4::new(2.0 / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 / height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, r, 0.0),
        Vec4::new(0.0, 0.0, r * near, 1.0),
    );

    let inverse = Mat4::from_cols(
        Vec4::new(0.5 * width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 0.5 * height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, near - far, 0.0),
        Vec4::new(0.0, 0.0, -near, 1.0),
    );

    (matrix, inverse)
}

/// View matrix of a camera placed at `position` with orientation `rotation`.
///
/// The view is the inverse of the rigid world transform: the conjugate
/// rotation applied after undoing the translation. The second matrix is
/// the world transform itself.
///
/// Returns `(view, view_inverse)`.
pub fn rigid_view(position: Vec3, rotation: Quat) -> (Mat4, Mat4) {
    let rotation = rotation.normalize();
    let view = Mat4::from_quat(rotation.conjugate()) * Mat4::from_translation(-position);
    let view_inverse = Mat4::from_rotation_translation(rotation, position);
    (view, view_inverse)
}

/// Vertical field of view matching a horizontal one at the given aspect ratio.
pub fn vertical_fov(fov_x_radians: f32, aspect_ratio: f32) -> f32 {
    2.0 * ((0.5 * fov_x_radians).tan() / aspect_ratio).atan()
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;
