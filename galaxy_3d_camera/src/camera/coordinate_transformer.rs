/// CoordinateTransformer — conversions between the camera's coordinate spaces.
///
/// Spaces, in transform order:
///
/// ```text
/// World --view--> View --projection--> NDC --viewport--> Viewport(px) <--target origin-- Screen(px)
/// ```
///
/// - **View**: right-handed, camera at the origin looking down -Z.
/// - **NDC**: X/Y in [-1, 1] relative to the viewport, Z in [0, 1].
/// - **Viewport**: pixels on the render target, inside the camera's
///   viewport sub-rectangle (render-target relative, so a viewport on the
///   right half of the target starts at `x = width / 2`).
/// - **Screen**: pixels on the surface hosting the render target; the
///   target's top-left pixel sits at `RenderTarget::screen_origin()`.
///
/// Every viewport-relative map, in either direction, rejects pixels
/// outside the viewport rectangle with `OutOfViewport` (inclusive bounds),
/// so whatever a forward map returns its inverse accepts.
///
/// Pixel Y grows downward by default (`PixelOrigin::TopLeft`);
/// `PixelOrigin::BottomLeft` flips it. The viewport rectangle's `y` is
/// measured from the same origin.
///
/// The transformer holds no state of its own: it borrows a `CameraState`
/// and uses whatever matrices that state has cached.

use glam::{UVec2, Vec2, Vec3};
use crate::error::{Error, Result};
use super::camera_state::{CameraState, ProjectionType};

/// Default ray parameter for depth-parameterized unprojection.
pub const DEFAULT_RAY_DEPTH: f32 = 0.5;

/// Where pixel (0, 0) sits on the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelOrigin {
    /// Y grows downward (Vulkan, D3D, window systems).
    #[default]
    TopLeft,
    /// Y grows upward (OpenGL framebuffers).
    BottomLeft,
}

/// World-space ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    /// Point at distance `t` along the ray.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Affine map between NDC and viewport pixels. Both directions come from
/// the same origin/size pair, so they are exact inverses of each other.
#[derive(Debug, Clone, Copy)]
struct ViewportMapping {
    origin: Vec2,
    size: Vec2,
    flip_y: bool,
}

impl ViewportMapping {
    fn to_pixels(&self, ndc: Vec2) -> Vec2 {
        let mut uv = ndc * 0.5 + Vec2::splat(0.5);
        if self.flip_y {
            uv.y = 1.0 - uv.y;
        }
        self.origin + uv * self.size
    }

    fn to_ndc(&self, pixel: Vec2) -> Vec2 {
        let mut uv = (pixel - self.origin) / self.size;
        if self.flip_y {
            uv.y = 1.0 - uv.y;
        }
        uv * 2.0 - Vec2::ONE
    }

    /// Inclusive bounds test.
    fn contains(&self, pixel: Vec2) -> bool {
        pixel.cmpge(self.origin).all() && pixel.cmple(self.origin + self.size).all()
    }
}

/// Stateless conversion API over a camera snapshot.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateTransformer<'a> {
    state: &'a CameraState,
    target_size: Option<UVec2>,
    screen_origin: Vec2,
    pixel_origin: PixelOrigin,
}

impl<'a> CoordinateTransformer<'a> {
    /// Transformer for `state`, sized from its bound render target (if the
    /// target is still alive).
    pub fn new(state: &'a CameraState) -> Self {
        let target = state.render_target();
        Self {
            state,
            target_size: target.as_ref().map(|t| t.size()),
            screen_origin: target.as_ref().map(|t| t.screen_origin()).unwrap_or(Vec2::ZERO),
            pixel_origin: PixelOrigin::default(),
        }
    }

    /// Override the render target pixel size.
    pub fn with_target_size(mut self, width: u32, height: u32) -> Self {
        self.target_size = Some(UVec2::new(width, height));
        self
    }

    /// Override where the render target sits in screen space.
    pub fn with_screen_origin(mut self, origin: Vec2) -> Self {
        self.screen_origin = origin;
        self
    }

    /// Select the pixel-origin convention.
    pub fn with_pixel_origin(mut self, pixel_origin: PixelOrigin) -> Self {
        self.pixel_origin = pixel_origin;
        self
    }

    pub fn state(&self) -> &'a CameraState {
        self.state
    }

    pub fn pixel_origin(&self) -> PixelOrigin {
        self.pixel_origin
    }

    fn viewport_mapping(&self) -> Result<ViewportMapping> {
        let size = self.target_size
            .filter(|s| s.x > 0 && s.y > 0)
            .ok_or(Error::NoRenderTarget)?
            .as_vec2();
        let rect = self.state.viewport_rect();
        Ok(ViewportMapping {
            origin: Vec2::new(rect.x, rect.y) * size,
            size: Vec2::new(rect.width, rect.height) * size,
            flip_y: self.pixel_origin == PixelOrigin::TopLeft,
        })
    }

    /// Viewport rectangle in render-target pixels, as `(origin, size)`.
    pub fn viewport_pixels(&self) -> Result<(Vec2, Vec2)> {
        let mapping = self.viewport_mapping()?;
        Ok((mapping.origin, mapping.size))
    }

    // ===== WORLD <-> VIEW =====

    pub fn world_to_view(&self, point: Vec3) -> Vec3 {
        self.state.view_matrix().transform_point3(point)
    }

    pub fn view_to_world(&self, point: Vec3) -> Vec3 {
        self.state.view_matrix_inverse().transform_point3(point)
    }

    // ===== VIEW <-> NDC =====

    /// View-space point to NDC, keeping depth (Z in [0, 1] between the
    /// clip planes).
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        self.state.projection_matrix().project_point3(point)
    }

    /// NDC point (with depth) back to view space.
    pub fn unproject_point(&self, point: Vec3) -> Vec3 {
        self.state.projection_matrix_inverse().project_point3(point)
    }

    /// View-space point to NDC X/Y.
    ///
    /// No visibility check: a perspective point behind the camera comes
    /// back mirrored, and one on the camera plane (`z == 0`) comes back
    /// non-finite. The pixel-space maps reject both with `BehindCamera`.
    pub fn view_to_ndc(&self, point: Vec3) -> Vec2 {
        self.project_point(point).truncate()
    }

    /// World-space point to NDC X/Y. Same caveats as `view_to_ndc`.
    pub fn world_to_ndc(&self, point: Vec3) -> Vec2 {
        self.view_to_ndc(self.world_to_view(point))
    }

    /// True if the view-space point has a positive clip-space W, i.e. it
    /// projects without a sign flip or a division by zero.
    pub fn is_in_front(&self, point: Vec3) -> bool {
        let w = (*self.state.projection_matrix() * point.extend(1.0)).w;
        w > 0.0
    }

    /// NDC point to view space at ray parameter `depth`.
    ///
    /// The ray runs from the camera origin (perspective) or the camera plane
    /// (orthographic) to the point on the near plane: `depth = 0` is the
    /// ray start, `depth = 1` the near-plane point. The resulting view-space
    /// Z is always `-depth * near_clip`. This is not NDC Z.
    pub fn ndc_to_view(&self, ndc: Vec2, depth: f32) -> Vec3 {
        let near_point = self.unproject_point(ndc.extend(0.0));
        match self.state.projection_type() {
            ProjectionType::Perspective => near_point * depth,
            ProjectionType::Orthographic => Vec3::new(near_point.x, near_point.y, near_point.z * depth),
        }
    }

    pub fn ndc_to_world(&self, ndc: Vec2, depth: f32) -> Vec3 {
        self.view_to_world(self.ndc_to_view(ndc, depth))
    }

    /// Ray parameter that `ndc_to_view` needs to land back on `point`.
    pub fn view_depth(&self, point: Vec3) -> f32 {
        -point.z / self.state.near_clip()
    }

    /// Ray parameter of a world-space point (see `view_depth`).
    pub fn world_depth(&self, point: Vec3) -> f32 {
        self.view_depth(self.world_to_view(point))
    }

    // ===== NDC <-> VIEWPORT =====

    /// NDC to render-target pixels inside the viewport rectangle.
    ///
    /// # Errors
    ///
    /// `NoRenderTarget` without a sized target, `OutOfViewport` if the
    /// pixel lands outside the viewport rectangle (no clamping).
    pub fn ndc_to_viewport(&self, ndc: Vec2) -> Result<Vec2> {
        let mapping = self.viewport_mapping()?;
        let pixel = mapping.to_pixels(ndc);
        if !mapping.contains(pixel) {
            return Err(Error::OutOfViewport { x: pixel.x, y: pixel.y });
        }
        Ok(pixel)
    }

    /// View-space point to viewport pixels.
    ///
    /// # Errors
    ///
    /// `BehindCamera` for points on or behind the camera plane, otherwise
    /// as `ndc_to_viewport`.
    pub fn view_to_viewport(&self, point: Vec3) -> Result<Vec2> {
        if !self.is_in_front(point) {
            return Err(Error::BehindCamera);
        }
        self.ndc_to_viewport(self.view_to_ndc(point))
    }

    pub fn world_to_viewport(&self, point: Vec3) -> Result<Vec2> {
        self.view_to_viewport(self.world_to_view(point))
    }

    /// Render-target pixels to NDC.
    ///
    /// # Errors
    ///
    /// `NoRenderTarget` without a sized target, `OutOfViewport` if the
    /// pixel is outside the viewport rectangle.
    pub fn viewport_to_ndc(&self, pixel: Vec2) -> Result<Vec2> {
        let mapping = self.viewport_mapping()?;
        if !mapping.contains(pixel) {
            return Err(Error::OutOfViewport { x: pixel.x, y: pixel.y });
        }
        Ok(mapping.to_ndc(pixel))
    }

    pub fn viewport_to_view(&self, pixel: Vec2, depth: f32) -> Result<Vec3> {
        Ok(self.ndc_to_view(self.viewport_to_ndc(pixel)?, depth))
    }

    pub fn viewport_to_world(&self, pixel: Vec2, depth: f32) -> Result<Vec3> {
        Ok(self.ndc_to_world(self.viewport_to_ndc(pixel)?, depth))
    }

    // ===== SCREEN <-> VIEWPORT =====

    /// Screen pixels to render-target pixels.
    ///
    /// # Errors
    ///
    /// `NoRenderTarget` without a sized target, `OutOfViewport` if the
    /// point does not fall inside this camera's viewport rectangle.
    pub fn screen_to_viewport(&self, pixel: Vec2) -> Result<Vec2> {
        let mapping = self.viewport_mapping()?;
        let local = pixel - self.screen_origin;
        if !mapping.contains(local) {
            return Err(Error::OutOfViewport { x: pixel.x, y: pixel.y });
        }
        Ok(local)
    }

    /// Render-target pixels to screen pixels.
    ///
    /// # Errors
    ///
    /// `NoRenderTarget` without a sized target, `OutOfViewport` if the
    /// pixel is outside the viewport rectangle.
    pub fn viewport_to_screen(&self, pixel: Vec2) -> Result<Vec2> {
        if !self.viewport_mapping()?.contains(pixel) {
            return Err(Error::OutOfViewport { x: pixel.x, y: pixel.y });
        }
        Ok(pixel + self.screen_origin)
    }

    // ===== RAYS =====

    /// World-space ray through a viewport pixel.
    ///
    /// The origin lies on the near plane. Perspective rays point away from
    /// the camera position; orthographic rays all share the forward axis.
    pub fn viewport_to_world_ray(&self, pixel: Vec2) -> Result<Ray> {
        let ndc = self.viewport_to_ndc(pixel)?;
        let origin = self.ndc_to_world(ndc, 1.0);
        let direction = match self.state.projection_type() {
            ProjectionType::Perspective => (origin - self.state.position()).normalize(),
            ProjectionType::Orthographic => self.state.forward(),
        };
        Ok(Ray { origin, direction })
    }

    pub fn screen_to_world_ray(&self, pixel: Vec2) -> Result<Ray> {
        self.viewport_to_world_ray(self.screen_to_viewport(pixel)?)
    }

    // ===== FRUSTUM EXTENTS =====

    /// Frustum width at `distance` along the viewing axis, in world units.
    ///
    /// Orthographic frusta have a constant width equal to `ortho_width`.
    pub fn frustum_width(&self, distance: f32) -> f32 {
        match self.state.projection_type() {
            ProjectionType::Perspective => {
                distance * 2.0 * (0.5 * self.state.field_of_view().to_radians()).tan()
            }
            ProjectionType::Orthographic => self.state.ortho_width(),
        }
    }

    /// Frustum height at `distance`: the width divided by the aspect ratio.
    pub fn frustum_height(&self, distance: f32) -> f32 {
        self.frustum_width(distance) / self.state.aspect_ratio()
    }
}

#[cfg(test)]
#[path = "coordinate_transformer_tests.rs"]
mod tests;
