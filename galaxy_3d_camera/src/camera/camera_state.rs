/// CameraState — the camera's parameters and its cached matrices.
///
/// One canonical record: setters validate and store, the derived
/// projection is rebuilt at the next explicit recompute point
/// (`recompute_projection()`, or `Camera::update()` when dirty), and the
/// view is rebuilt from the owner transform by `recompute_view()`.

use std::sync::{Arc, Weak};
use bitflags::bitflags;
use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::target::RenderTarget;
use super::projection;
use super::snapshot::CameraSnapshot;
use super::transform::TransformSource;

const LOG_SOURCE: &str = "galaxy3d::Camera";

/// Slack for `x + width` / `y + height` rounding just past 1.0.
const VIEWPORT_EPSILON: f32 = 1e-6;

/// How 3D geometry is projected onto the 2D viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectionType {
    /// Objects shrink with distance.
    #[default]
    Perspective,
    /// Parallel projection, no foreshortening.
    Orthographic,
}

bitflags! {
    /// Which buffers are cleared before the camera renders.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ClearFlags: u8 {
        const COLOR   = 1 << 0;
        const DEPTH   = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

impl Default for ClearFlags {
    fn default() -> Self {
        ClearFlags::all()
    }
}

/// Normalized sub-rectangle of the render target the camera draws into.
///
/// `x`/`y` locate the corner nearest to the pixel origin (top-left with
/// the default pixel convention).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    /// The whole render target.
    pub const FULL: Self = Self { x: 0.0, y: 0.0, width: 1.0, height: 1.0 };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

impl Default for ViewportRect {
    fn default() -> Self {
        Self::FULL
    }
}

/// Default clear color: neutral grey (83, 83, 83).
pub const DEFAULT_CLEAR_COLOR: Vec4 = Vec4::new(83.0 / 255.0, 83.0 / 255.0, 83.0 / 255.0, 1.0);

/// Camera parameters plus cached view/projection matrices.
#[derive(Debug, Clone)]
pub struct CameraState {
    aspect_ratio: f32,
    near_clip: f32,
    far_clip: f32,
    field_of_view: f32,
    viewport_rect: ViewportRect,
    projection_type: ProjectionType,
    ortho_height: f32,
    clear_color: Vec4,
    clear_depth: f32,
    clear_stencil: u16,
    clear_flags: ClearFlags,
    priority: i32,
    layers: u64,
    main: bool,
    render_target: Option<Weak<RenderTarget>>,

    proj_matrix: Mat4,
    proj_matrix_inverse: Mat4,
    view_matrix: Mat4,
    view_matrix_inverse: Mat4,
    projection_dirty: bool,
}

fn reject(err: Error) -> Result<()> {
    crate::engine_warn!(LOG_SOURCE, "{}", err);
    Err(err)
}

impl CameraState {
    /// Default camera at the world origin, looking down -Z.
    ///
    /// Matrices are consistent on return.
    pub fn new() -> Self {
        let defaults = CameraSnapshot::default();
        let mut state = Self {
            aspect_ratio: defaults.aspect_ratio,
            near_clip: defaults.near_clip,
            far_clip: defaults.far_clip,
            field_of_view: defaults.field_of_view,
            viewport_rect: defaults.viewport_rect,
            projection_type: defaults.projection_type,
            ortho_height: defaults.ortho_height,
            clear_color: defaults.clear_color,
            clear_depth: defaults.clear_depth,
            clear_stencil: defaults.clear_stencil,
            clear_flags: defaults.clear_flags,
            priority: defaults.priority,
            layers: defaults.layers,
            main: defaults.main,
            render_target: None,
            proj_matrix: Mat4::IDENTITY,
            proj_matrix_inverse: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            view_matrix_inverse: Mat4::IDENTITY,
            projection_dirty: true,
        };
        state.recompute_projection();
        state
    }

    /// Build a state from a persisted snapshot, with consistent matrices.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for the first snapshot field that violates an
    /// invariant.
    pub fn from_snapshot(snapshot: &CameraSnapshot) -> Result<Self> {
        let mut state = Self::new();
        state.apply_snapshot(snapshot)?;
        state.recompute_projection();
        Ok(state)
    }

    /// Apply every persisted field in dependency order.
    ///
    /// Stops at the first invalid field; fields before it stay applied.
    pub(crate) fn apply_snapshot(&mut self, snapshot: &CameraSnapshot) -> Result<()> {
        self.set_aspect_ratio(snapshot.aspect_ratio)?;
        self.set_clip_planes(snapshot.near_clip, snapshot.far_clip)?;
        self.set_field_of_view(snapshot.field_of_view)?;
        self.set_viewport_rect(snapshot.viewport_rect)?;
        self.set_projection_type(snapshot.projection_type);
        self.set_ortho_height(snapshot.ortho_height)?;
        self.set_clear_color(snapshot.clear_color)?;
        self.set_clear_depth(snapshot.clear_depth)?;
        self.set_clear_stencil(snapshot.clear_stencil);
        self.set_clear_flags(snapshot.clear_flags);
        self.set_priority(snapshot.priority);
        self.set_layers(snapshot.layers);
        self.set_main(snapshot.main);
        Ok(())
    }

    /// Field-by-field copy of the persisted state (render target excluded).
    pub fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            aspect_ratio: self.aspect_ratio,
            near_clip: self.near_clip,
            far_clip: self.far_clip,
            field_of_view: self.field_of_view,
            viewport_rect: self.viewport_rect,
            projection_type: self.projection_type,
            ortho_height: self.ortho_height,
            clear_color: self.clear_color,
            clear_depth: self.clear_depth,
            clear_stencil: self.clear_stencil,
            clear_flags: self.clear_flags,
            priority: self.priority,
            layers: self.layers,
            main: self.main,
        }
    }

    // ===== SETTERS =====

    /// Ratio between viewport width and height (width / height).
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) -> Result<()> {
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return reject(Error::invalid("aspect_ratio",
                format!("must be a finite value > 0, got {}", aspect_ratio)));
        }
        self.aspect_ratio = aspect_ratio;
        self.projection_dirty = true;
        Ok(())
    }

    /// Near and far clip distances; requires `0 < near < far`.
    pub fn set_clip_planes(&mut self, near: f32, far: f32) -> Result<()> {
        if !(near.is_finite() && far.is_finite()) {
            return reject(Error::invalid("clip_planes",
                format!("must be finite, got near={} far={}", near, far)));
        }
        if near <= 0.0 {
            return reject(Error::invalid("near_clip", format!("must be > 0, got {}", near)));
        }
        if far <= near {
            return reject(Error::invalid("far_clip",
                format!("must be greater than near ({}), got {}", near, far)));
        }
        self.near_clip = near;
        self.far_clip = far;
        self.projection_dirty = true;
        Ok(())
    }

    /// Move only the near plane (validated against the current far plane).
    pub fn set_near_clip(&mut self, near: f32) -> Result<()> {
        self.set_clip_planes(near, self.far_clip)
    }

    /// Move only the far plane (validated against the current near plane).
    pub fn set_far_clip(&mut self, far: f32) -> Result<()> {
        self.set_clip_planes(self.near_clip, far)
    }

    /// Horizontal field of view in degrees, in the open range (0, 180).
    pub fn set_field_of_view(&mut self, degrees: f32) -> Result<()> {
        if !(degrees > 0.0 && degrees < 180.0) {
            return reject(Error::invalid("field_of_view",
                format!("must be in (0, 180) degrees, got {}", degrees)));
        }
        self.field_of_view = degrees;
        self.projection_dirty = true;
        Ok(())
    }

    /// Normalized viewport; every component in [0, 1], width and height > 0,
    /// and the rectangle must lie inside the render target.
    pub fn set_viewport_rect(&mut self, rect: ViewportRect) -> Result<()> {
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !(in_unit(rect.x) && in_unit(rect.y) && in_unit(rect.width) && in_unit(rect.height)) {
            return reject(Error::invalid("viewport_rect",
                format!("components must lie in [0, 1], got {:?}", rect)));
        }
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return reject(Error::invalid("viewport_rect",
                format!("width and height must be > 0, got {:?}", rect)));
        }
        if rect.x + rect.width > 1.0 + VIEWPORT_EPSILON || rect.y + rect.height > 1.0 + VIEWPORT_EPSILON {
            return reject(Error::invalid("viewport_rect",
                format!("must fit inside the render target, got {:?}", rect)));
        }
        self.viewport_rect = rect;
        Ok(())
    }

    pub fn set_projection_type(&mut self, projection_type: ProjectionType) {
        if self.projection_type != projection_type {
            self.projection_type = projection_type;
            self.projection_dirty = true;
        }
    }

    /// Orthographic window height in world units. The width follows from
    /// the aspect ratio.
    pub fn set_ortho_height(&mut self, height: f32) -> Result<()> {
        if !(height.is_finite() && height > 0.0) {
            return reject(Error::invalid("ortho_height",
                format!("must be a finite value > 0, got {}", height)));
        }
        self.ortho_height = height;
        self.projection_dirty = true;
        Ok(())
    }

    /// RGBA clear color.
    pub fn set_clear_color(&mut self, color: Vec4) -> Result<()> {
        if !color.is_finite() {
            return reject(Error::invalid("clear_color",
                format!("components must be finite, got {}", color)));
        }
        self.clear_color = color;
        Ok(())
    }

    /// Depth clear value in [0, 1].
    pub fn set_clear_depth(&mut self, depth: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&depth) {
            return reject(Error::invalid("clear_depth",
                format!("must be in [0, 1], got {}", depth)));
        }
        self.clear_depth = depth;
        Ok(())
    }

    pub fn set_clear_stencil(&mut self, stencil: u16) {
        self.clear_stencil = stencil;
    }

    pub fn set_clear_flags(&mut self, flags: ClearFlags) {
        self.clear_flags = flags;
    }

    /// Render order among cameras sharing a target. Higher renders sooner.
    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    /// Layer bitmask used to select which objects this camera renders.
    pub fn set_layers(&mut self, layers: u64) {
        self.layers = layers;
    }

    /// Mark this camera as the one presenting the final frame.
    pub fn set_main(&mut self, main: bool) {
        self.main = main;
    }

    /// Bind (or unbind) the render target. Only a weak reference is kept.
    pub fn set_render_target(&mut self, target: Option<&Arc<RenderTarget>>) {
        self.render_target = target.map(Arc::downgrade);
    }

    // ===== RECOMPUTE POINTS =====

    /// Rebuild the projection matrix and its inverse from the current
    /// parameters.
    pub fn recompute_projection(&mut self) {
        let (matrix, inverse) = match self.projection_type {
            ProjectionType::Perspective => projection::perspective(
                self.field_of_view.to_radians(),
                self.aspect_ratio,
                self.near_clip,
                self.far_clip,
            ),
            ProjectionType::Orthographic => projection::orthographic(
                self.ortho_width(),
                self.ortho_height,
                self.near_clip,
                self.far_clip,
            ),
        };
        self.proj_matrix = matrix;
        self.proj_matrix_inverse = inverse;
        self.projection_dirty = false;
    }

    /// Rebuild the view matrix from the owner's current world transform.
    pub fn recompute_view(&mut self, owner: &impl TransformSource) {
        let (view, view_inverse) = projection::rigid_view(owner.world_position(), owner.world_rotation());
        self.view_matrix = view;
        self.view_matrix_inverse = view_inverse;
    }

    /// Whether a parameter changed since the projection was last rebuilt.
    pub fn is_projection_dirty(&self) -> bool {
        self.projection_dirty
    }

    // ===== GETTERS =====

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn near_clip(&self) -> f32 {
        self.near_clip
    }

    pub fn far_clip(&self) -> f32 {
        self.far_clip
    }

    /// Horizontal field of view, in degrees.
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    /// Vertical field of view derived from the horizontal one, in degrees.
    pub fn vertical_field_of_view(&self) -> f32 {
        projection::vertical_fov(self.field_of_view.to_radians(), self.aspect_ratio).to_degrees()
    }

    pub fn viewport_rect(&self) -> ViewportRect {
        self.viewport_rect
    }

    pub fn projection_type(&self) -> ProjectionType {
        self.projection_type
    }

    pub fn ortho_height(&self) -> f32 {
        self.ortho_height
    }

    /// Orthographic window width: always `ortho_height * aspect_ratio`.
    pub fn ortho_width(&self) -> f32 {
        self.ortho_height * self.aspect_ratio
    }

    pub fn clear_color(&self) -> Vec4 {
        self.clear_color
    }

    pub fn clear_depth(&self) -> f32 {
        self.clear_depth
    }

    pub fn clear_stencil(&self) -> u16 {
        self.clear_stencil
    }

    pub fn clear_flags(&self) -> ClearFlags {
        self.clear_flags
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn layers(&self) -> u64 {
        self.layers
    }

    pub fn is_main(&self) -> bool {
        self.main
    }

    /// The bound render target, if one is bound and still alive.
    pub fn render_target(&self) -> Option<Arc<RenderTarget>> {
        self.render_target.as_ref().and_then(Weak::upgrade)
    }

    /// True if an object on `layer` renders under this camera.
    pub fn renders_layer(&self, layer: u64) -> bool {
        layer & self.layers != 0
    }

    /// Cached projection matrix.
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.proj_matrix
    }

    /// Cached inverse projection matrix.
    pub fn projection_matrix_inverse(&self) -> &Mat4 {
        &self.proj_matrix_inverse
    }

    /// Cached view matrix (inverse of the owner's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Cached inverse view matrix (the owner's world transform).
    pub fn view_matrix_inverse(&self) -> &Mat4 {
        &self.view_matrix_inverse
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.proj_matrix * self.view_matrix
    }

    /// Camera world position, as of the last view recompute.
    pub fn position(&self) -> Vec3 {
        self.view_matrix_inverse.w_axis.truncate()
    }

    /// Camera viewing direction in world space, as of the last view recompute.
    pub fn forward(&self) -> Vec3 {
        self.view_matrix_inverse.transform_vector3(Vec3::NEG_Z).normalize()
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "camera_state_tests.rs"]
mod tests;
