/// Camera — lifecycle around a CameraState.
///
/// The owning scene node creates the camera, feeds it its world transform
/// once per tick through `update()`, may `reset()` it from a persisted
/// snapshot (scene load, editor revert), and finally `destroy()`s it.
///
/// Per tick:
///
/// ```text
/// owner transform final -> camera.update(&owner) -> renderer reads matrices
/// ```

use crate::error::{Error, Result};
use crate::{engine_bail, engine_debug, engine_error};
use super::camera_state::CameraState;
use super::camera_uniform::CameraUniform;
use super::coordinate_transformer::CoordinateTransformer;
use super::snapshot::CameraSnapshot;
use super::transform::{Transform, TransformSource};

const LOG_SOURCE: &str = "galaxy3d::Camera";

/// A camera attached to a scene node.
#[derive(Debug, Clone)]
pub struct Camera {
    /// `None` once destroyed
    state: Option<CameraState>,
    /// Owner transform as of the last create/update
    owner: Transform,
}

impl Camera {
    /// Default camera bound to `owner`. Matrices are consistent on return.
    pub fn new(owner: &impl TransformSource) -> Self {
        let owner = Transform::from_source(owner);
        let mut state = CameraState::new();
        state.recompute_view(&owner);
        engine_debug!(LOG_SOURCE, "Camera created at {}", owner.position);
        Self { state: Some(state), owner }
    }

    /// Camera bound to `owner` and configured from a snapshot.
    pub fn from_snapshot(owner: &impl TransformSource, snapshot: &CameraSnapshot) -> Result<Self> {
        let mut camera = Self::new(owner);
        camera.reset(snapshot)?;
        Ok(camera)
    }

    /// Replace the state with a fresh one configured from `snapshot`.
    ///
    /// Fields are replayed in a fixed order (aspect, clip planes, FOV,
    /// viewport, projection type, ortho height, clear values, priority,
    /// layers, main) and the matrices are rebuilt before the swap. The
    /// render-target binding carries over since it is not persisted.
    ///
    /// # Errors
    ///
    /// `CameraDestroyed` after `destroy()`. `InvalidParameter` if a
    /// snapshot field is invalid; the current state is then left untouched.
    pub fn reset(&mut self, snapshot: &CameraSnapshot) -> Result<()> {
        let Some(current) = self.state.as_ref() else {
            engine_bail!(LOG_SOURCE, Error::CameraDestroyed);
        };

        let mut fresh = CameraState::new();
        if let Err(err) = fresh.apply_snapshot(snapshot) {
            engine_error!(LOG_SOURCE, "Camera reset rejected: {}", err);
            return Err(err);
        }
        fresh.set_render_target(current.render_target().as_ref());
        fresh.recompute_projection();
        fresh.recompute_view(&self.owner);

        self.state = Some(fresh);
        engine_debug!(LOG_SOURCE, "Camera reset (priority {}, main {})",
            snapshot.priority, snapshot.main);
        Ok(())
    }

    /// Per-tick refresh from the owner's final world transform.
    ///
    /// The view is always rebuilt; the projection only if a parameter
    /// changed since it was last built.
    pub fn update(&mut self, owner: &impl TransformSource) -> Result<()> {
        let Some(state) = self.state.as_mut() else {
            engine_bail!(LOG_SOURCE, Error::CameraDestroyed);
        };
        self.owner = Transform::from_source(owner);
        state.recompute_view(&self.owner);
        if state.is_projection_dirty() {
            state.recompute_projection();
        }
        Ok(())
    }

    /// Release the camera state. Calling it again is a no-op.
    ///
    /// The render target is not affected.
    pub fn destroy(&mut self) {
        if self.state.take().is_some() {
            engine_debug!(LOG_SOURCE, "Camera destroyed");
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.is_none()
    }

    /// Owner transform as of the last `update()`.
    pub fn owner(&self) -> &Transform {
        &self.owner
    }

    pub fn state(&self) -> Result<&CameraState> {
        self.state.as_ref().ok_or(Error::CameraDestroyed)
    }

    /// Mutable state, for the setters. Parameter changes reach the
    /// projection matrix at the next `update()`.
    pub fn state_mut(&mut self) -> Result<&mut CameraState> {
        self.state.as_mut().ok_or(Error::CameraDestroyed)
    }

    /// Persisted view of the current state.
    pub fn snapshot(&self) -> Result<CameraSnapshot> {
        Ok(self.state()?.snapshot())
    }

    /// Coordinate conversions against the current state and bound target.
    pub fn transformer(&self) -> Result<CoordinateTransformer<'_>> {
        Ok(CoordinateTransformer::new(self.state()?))
    }

    /// Uniform block for the renderer.
    pub fn uniform(&self) -> Result<CameraUniform> {
        Ok(CameraUniform::from_state(self.state()?))
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
