//! Camera module — camera state, coordinate conversions, and lifecycle.
//!
//! The engine does NOT own cameras. They are created, updated once per
//! tick, and destroyed by the scene node that owns them. A
//! `CameraRegistry` is available for callers that manage many.

mod camera;
mod camera_registry;
mod camera_state;
mod camera_uniform;
mod coordinate_transformer;
pub mod projection;
mod snapshot;
mod transform;

pub use camera::Camera;
pub use camera_registry::{CameraKey, CameraRegistry};
pub use camera_state::{
    CameraState, ClearFlags, ProjectionType, ViewportRect, DEFAULT_CLEAR_COLOR,
};
pub use camera_uniform::CameraUniform;
pub use coordinate_transformer::{CoordinateTransformer, PixelOrigin, Ray, DEFAULT_RAY_DEPTH};
pub use snapshot::CameraSnapshot;
pub use transform::{Transform, TransformSource};
