/// Central render target manager.
///
/// Owns named render targets. Cameras reference targets weakly, so
/// removing a target here is what detaches it from every camera.

use std::collections::HashMap;
use std::sync::Arc;
use crate::error::{Error, Result};
use crate::engine_bail;
use super::render_target::RenderTarget;

/// Target manager (managed by Engine, or owned directly by the caller)
pub struct TargetManager {
    render_targets: HashMap<String, Arc<RenderTarget>>,
}

impl TargetManager {
    /// Create a new empty target manager
    pub fn new() -> Self {
        Self {
            render_targets: HashMap::new(),
        }
    }

    /// Create a new named render target of the given pixel size
    ///
    /// # Errors
    ///
    /// Returns an error if a render target with the same name already exists.
    pub fn create_render_target(&mut self, name: &str, width: u32, height: u32) -> Result<Arc<RenderTarget>> {
        if self.render_targets.contains_key(name) {
            engine_bail!("galaxy3d::TargetManager",
                Error::InvalidResource(format!("RenderTarget '{}' already exists", name)));
        }

        let target = Arc::new(RenderTarget::new(name, width, height));
        self.render_targets.insert(name.to_string(), Arc::clone(&target));
        crate::engine_debug!("galaxy3d::TargetManager",
            "RenderTarget '{}' created ({}x{})", name, width, height);
        Ok(target)
    }

    /// Get a render target by name
    pub fn render_target(&self, name: &str) -> Option<Arc<RenderTarget>> {
        self.render_targets.get(name).cloned()
    }

    /// Resize a render target by name
    ///
    /// # Errors
    ///
    /// Returns an error if no render target has that name.
    pub fn resize_render_target(&self, name: &str, width: u32, height: u32) -> Result<()> {
        match self.render_targets.get(name) {
            Some(target) => {
                target.resize(width, height);
                Ok(())
            }
            None => engine_bail!("galaxy3d::TargetManager",
                Error::InvalidResource(format!("RenderTarget '{}' not found", name))),
        }
    }

    /// Remove a render target by name
    ///
    /// Returns the removed render target, or None if not found. Cameras
    /// lose their reference once the last strong handle is dropped.
    pub fn remove_render_target(&mut self, name: &str) -> Option<Arc<RenderTarget>> {
        self.render_targets.remove(name)
    }

    /// Get the number of render targets
    pub fn render_target_count(&self) -> usize {
        self.render_targets.len()
    }

    /// Get all render target names
    pub fn render_target_names(&self) -> Vec<&str> {
        self.render_targets.keys().map(|k| k.as_str()).collect()
    }

    /// Remove all render targets
    pub fn clear(&mut self) {
        self.render_targets.clear();
    }
}

impl Default for TargetManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "target_manager_tests.rs"]
mod tests;
