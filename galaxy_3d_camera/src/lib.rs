/*!
# Galaxy 3D Camera

Scene-attachable camera for the Galaxy 3D engine.

A camera turns a world-space scene into a projected 2D view. This crate
keeps the camera's parameters and derived matrices, converts points and rays
between coordinate spaces, and persists the camera's configuration across
save/load.

## Architecture

- **CameraState**: parameters (clip planes, FOV, viewport, clear values, ...)
  plus cached view/projection matrices and their closed-form inverses
- **CoordinateTransformer**: World ⇄ View ⇄ NDC ⇄ Viewport ⇄ Screen
  conversions and picking rays
- **Camera**: lifecycle (create, per-tick update, reset from a snapshot,
  destroy)
- **CameraSnapshot**: the persisted record (serde, JSON)
- **CameraRegistry**: many cameras, main camera and render order
- **TargetManager / RenderTarget**: the pixel surfaces cameras draw into

The renderer and the scene graph are external: the scene supplies the owner
transform through `TransformSource`, the renderer reads the matrices (or a
`CameraUniform`) after `Camera::update`.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod target;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Render target sub-module
    pub mod target {
        pub use crate::target::*;
    }
}

// Re-export math library at crate root
pub use glam;
