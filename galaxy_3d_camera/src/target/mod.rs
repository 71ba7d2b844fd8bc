//! Render target management module
//!
//! A render target is where a camera's output lands (window surface,
//! texture, etc.). Cameras only read its pixel size and screen placement;
//! they hold a weak reference and never own or mutate a target.

mod render_target;
mod target_manager;

pub use render_target::RenderTarget;
pub use target_manager::TargetManager;
