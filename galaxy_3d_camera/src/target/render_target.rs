/// Render target — where a camera's output gets rendered to.
///
/// Render targets are created via `TargetManager::create_render_target()`
/// and shared as `Arc<RenderTarget>`. Cameras keep a `Weak` reference, so
/// removing a target from its manager detaches it from every camera.

use std::sync::RwLock;
use glam::{UVec2, Vec2};

#[derive(Debug, Clone, Copy)]
struct Placement {
    size: UVec2,
    screen_origin: Vec2,
}

/// A rendering destination with a pixel size and an on-screen placement.
#[derive(Debug)]
pub struct RenderTarget {
    name: String,
    placement: RwLock<Placement>,
}

impl RenderTarget {
    /// Internal only — created via TargetManager::create_render_target()
    pub(crate) fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            placement: RwLock::new(Placement {
                size: UVec2::new(width, height),
                screen_origin: Vec2::ZERO,
            }),
        }
    }

    fn placement(&self) -> Placement {
        match self.placement.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn update(&self, f: impl FnOnce(&mut Placement)) {
        match self.placement.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    /// Name the target was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.placement().size.x
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.placement().size.y
    }

    /// Pixel size as (width, height).
    pub fn size(&self) -> UVec2 {
        self.placement().size
    }

    /// Position of the target's top-left pixel in screen coordinates.
    ///
    /// Zero for off-screen targets; the window position for window surfaces.
    pub fn screen_origin(&self) -> Vec2 {
        self.placement().screen_origin
    }

    /// Change the pixel size (window resize, texture re-allocation).
    pub fn resize(&self, width: u32, height: u32) {
        self.update(|p| p.size = UVec2::new(width, height));
    }

    /// Move the target on screen.
    pub fn set_screen_origin(&self, origin: Vec2) {
        self.update(|p| p.screen_origin = origin);
    }
}
