/// CameraRegistry — the set of cameras a scene owns.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys. Answers the
/// questions a renderer asks once per frame: which camera is main, in which
/// order cameras draw, and which cameras see a given layer.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::engine_warn;
use super::camera::Camera;
use super::transform::Transform;

const LOG_SOURCE: &str = "galaxy3d::CameraRegistry";

new_key_type! {
    /// Stable key for a Camera within a CameraRegistry.
    ///
    /// A key becomes invalid only when its own camera is removed.
    pub struct CameraKey;
}

#[derive(Debug, Default)]
pub struct CameraRegistry {
    cameras: SlotMap<CameraKey, Camera>,
}

impl CameraRegistry {
    pub fn new() -> Self {
        Self { cameras: SlotMap::with_key() }
    }

    pub fn insert(&mut self, camera: Camera) -> CameraKey {
        self.cameras.insert(camera)
    }

    /// Remove a camera, returning it. The camera is not destroyed.
    pub fn remove(&mut self, key: CameraKey) -> Option<Camera> {
        self.cameras.remove(key)
    }

    pub fn get(&self, key: CameraKey) -> Option<&Camera> {
        self.cameras.get(key)
    }

    pub fn get_mut(&mut self, key: CameraKey) -> Option<&mut Camera> {
        self.cameras.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CameraKey, &Camera)> {
        self.cameras.iter()
    }

    /// The live camera flagged as main.
    ///
    /// By convention there is one. If several are flagged, the one with the
    /// highest priority wins (registry order on ties) and a warning is logged.
    pub fn main_camera(&self) -> Option<CameraKey> {
        let mut mains = self.live()
            .filter(|(_, camera)| camera.state().map(|s| s.is_main()).unwrap_or(false));
        let (mut best_key, mut best_priority) = mains.next()
            .map(|(key, camera)| (key, priority_of(camera)))?;

        let mut count = 1;
        for (key, camera) in mains {
            count += 1;
            let priority = priority_of(camera);
            if priority > best_priority {
                best_key = key;
                best_priority = priority;
            }
        }
        if count > 1 {
            engine_warn!(LOG_SOURCE, "{} cameras are flagged as main, using {:?}", count, best_key);
        }
        Some(best_key)
    }

    /// Draw order for the frame.
    ///
    /// Cameras are grouped by render target (groups in the order their
    /// target is first seen) and sorted by priority within a group, highest
    /// first; equal priorities keep registry order. Destroyed cameras and
    /// cameras without a live target are skipped.
    pub fn render_order(&self) -> Vec<CameraKey> {
        let mut groups: FxHashMap<usize, usize> = FxHashMap::default();
        let mut entries: Vec<(usize, i32, CameraKey)> = Vec::new();

        for (key, camera) in self.live() {
            let Ok(state) = camera.state() else { continue };
            let Some(target) = state.render_target() else { continue };
            let next_group = groups.len();
            let group = *groups
                .entry(Arc::as_ptr(&target) as usize)
                .or_insert(next_group);
            entries.push((group, state.priority(), key));
        }

        entries.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
        entries.into_iter().map(|(_, _, key)| key).collect()
    }

    /// Live cameras whose layer mask intersects `layer`.
    pub fn cameras_for_layer(&self, layer: u64) -> Vec<CameraKey> {
        self.live()
            .filter(|(_, camera)| camera.state().map(|s| s.renders_layer(layer)).unwrap_or(false))
            .map(|(key, _)| key)
            .collect()
    }

    /// Per-tick update of every live camera.
    ///
    /// `owner_of` supplies each camera's owner transform; cameras it returns
    /// `None` for keep their previous owner transform.
    pub fn update_all(&mut self, mut owner_of: impl FnMut(CameraKey) -> Option<Transform>) {
        for (key, camera) in self.cameras.iter_mut() {
            if camera.is_destroyed() {
                continue;
            }
            let owner = owner_of(key).unwrap_or(*camera.owner());
            // Only fails for destroyed cameras, which are skipped above
            let _ = camera.update(&owner);
        }
    }

    /// Remove every destroyed camera. Returns how many were dropped.
    pub fn purge_destroyed(&mut self) -> usize {
        let before = self.cameras.len();
        self.cameras.retain(|_, camera| !camera.is_destroyed());
        before - self.cameras.len()
    }

    fn live(&self) -> impl Iterator<Item = (CameraKey, &Camera)> {
        self.cameras.iter().filter(|(_, camera)| !camera.is_destroyed())
    }
}

fn priority_of(camera: &Camera) -> i32 {
    camera.state().map(|s| s.priority()).unwrap_or(i32::MIN)
}

#[cfg(test)]
#[path = "camera_registry_tests.rs"]
mod tests;
