/// CameraSnapshot — the camera data that survives save/load.
///
/// A flat record of every persisted camera parameter. The render target is
/// deliberately absent: targets are runtime resources and are re-bound by
/// whoever loads the scene.

use glam::Vec4;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use super::camera_state::{ClearFlags, ProjectionType, ViewportRect, DEFAULT_CLEAR_COLOR};

/// Persisted camera configuration.
///
/// Missing fields deserialize to their defaults, so older scene files keep
/// loading when fields are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSnapshot {
    pub aspect_ratio: f32,
    pub near_clip: f32,
    pub far_clip: f32,
    /// Horizontal field of view, in degrees.
    pub field_of_view: f32,
    pub viewport_rect: ViewportRect,
    pub projection_type: ProjectionType,
    pub ortho_height: f32,
    pub clear_color: Vec4,
    pub clear_depth: f32,
    pub clear_stencil: u16,
    pub clear_flags: ClearFlags,
    pub priority: i32,
    pub layers: u64,
    pub main: bool,
}

impl Default for CameraSnapshot {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.333,
            near_clip: 1.0,
            far_clip: 1000.0,
            field_of_view: 90.0,
            viewport_rect: ViewportRect::FULL,
            projection_type: ProjectionType::Perspective,
            ortho_height: 5.0,
            clear_color: DEFAULT_CLEAR_COLOR,
            clear_depth: 1.0,
            clear_stencil: 0,
            clear_flags: ClearFlags::all(),
            priority: 0,
            layers: u64::MAX,
            main: false,
        }
    }
}

impl CameraSnapshot {
    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON. Values are not validated here; validation happens
    /// when the snapshot is applied to a camera.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
