/// Tests for CameraRegistry: main camera selection, render ordering,
/// layer queries, and bulk update.

use glam::Vec3;
use serial_test::serial;
use std::sync::{Arc, Mutex};
use crate::engine::Engine;
use crate::log::{LogEntry, LogSeverity, Logger};
use crate::target::{RenderTarget, TargetManager};
use super::*;

fn camera_on(target: Option<&Arc<RenderTarget>>, priority: i32) -> Camera {
    let mut camera = Camera::new(&Transform::IDENTITY);
    let state = camera.state_mut().unwrap();
    state.set_render_target(target);
    state.set_priority(priority);
    camera
}

fn main_camera_with_priority(priority: i32) -> Camera {
    let mut camera = camera_on(None, priority);
    camera.state_mut().unwrap().set_main(true);
    camera
}

// ============================================================================
// Basic storage
// ============================================================================

#[test]
fn test_insert_get_remove() {
    let mut registry = CameraRegistry::new();
    assert!(registry.is_empty());

    let a = registry.insert(camera_on(None, 1));
    let b = registry.insert(camera_on(None, 2));
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get(b).unwrap().state().unwrap().priority(), 2);

    let removed = registry.remove(a).unwrap();
    assert!(!removed.is_destroyed());
    assert!(registry.get(a).is_none());
    assert!(registry.remove(a).is_none());
    // Other keys survive
    assert!(registry.get(b).is_some());
    assert_eq!(registry.iter().count(), 1);
}

#[test]
fn test_purge_destroyed() {
    let mut registry = CameraRegistry::new();
    let a = registry.insert(camera_on(None, 0));
    let b = registry.insert(camera_on(None, 0));
    registry.get_mut(a).unwrap().destroy();

    assert_eq!(registry.purge_destroyed(), 1);
    assert!(registry.get(a).is_none());
    assert!(registry.get(b).is_some());
}

// ============================================================================
// Main camera
// ============================================================================

#[test]
fn test_main_camera_none_when_unflagged() {
    let mut registry = CameraRegistry::new();
    registry.insert(camera_on(None, 0));
    assert!(registry.main_camera().is_none());
}

#[test]
fn test_main_camera_single() {
    let mut registry = CameraRegistry::new();
    registry.insert(camera_on(None, 0));
    let main = registry.insert(main_camera_with_priority(0));
    assert_eq!(registry.main_camera(), Some(main));
}

#[test]
fn test_main_camera_skips_destroyed() {
    let mut registry = CameraRegistry::new();
    let main = registry.insert(main_camera_with_priority(0));
    registry.get_mut(main).unwrap().destroy();
    assert!(registry.main_camera().is_none());
}

struct CaptureLogger {
    entries: Arc<Mutex<Vec<(LogSeverity, String)>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push((entry.severity, entry.message.clone()));
    }
}

#[test]
#[serial]
fn test_several_main_cameras_pick_highest_priority_and_warn() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(CaptureLogger { entries: entries.clone() });

    let mut registry = CameraRegistry::new();
    registry.insert(main_camera_with_priority(1));
    let best = registry.insert(main_camera_with_priority(9));
    registry.insert(main_camera_with_priority(9));
    let chosen = registry.main_camera();

    Engine::reset_logger();

    assert_eq!(chosen, Some(best));
    let entries = entries.lock().unwrap();
    assert!(entries.iter().any(|(severity, message)| {
        *severity == LogSeverity::Warn && message.contains("3 cameras are flagged as main")
    }));
}

// ============================================================================
// Render order
// ============================================================================

#[test]
fn test_render_order_groups_by_target_then_priority() {
    let mut tm = TargetManager::new();
    let screen = tm.create_render_target("screen", 800, 600).unwrap();
    let shadow = tm.create_render_target("shadow", 1024, 1024).unwrap();

    let mut registry = CameraRegistry::new();
    let s_low = registry.insert(camera_on(Some(&screen), 0));
    let m_high = registry.insert(camera_on(Some(&shadow), 10));
    let s_high = registry.insert(camera_on(Some(&screen), 5));
    let m_low = registry.insert(camera_on(Some(&shadow), -2));
    let s_tie = registry.insert(camera_on(Some(&screen), 0));

    assert_eq!(registry.render_order(), vec![s_high, s_low, s_tie, m_high, m_low]);
}

#[test]
fn test_render_order_skips_unbound_dead_and_destroyed() {
    let mut tm = TargetManager::new();
    let screen = tm.create_render_target("screen", 800, 600).unwrap();
    let temp = tm.create_render_target("temp", 64, 64).unwrap();

    let mut registry = CameraRegistry::new();
    let live = registry.insert(camera_on(Some(&screen), 0));
    registry.insert(camera_on(None, 100));
    registry.insert(camera_on(Some(&temp), 50));
    let destroyed = registry.insert(camera_on(Some(&screen), 99));
    registry.get_mut(destroyed).unwrap().destroy();

    drop(temp);
    tm.remove_render_target("temp");

    assert_eq!(registry.render_order(), vec![live]);
}

// ============================================================================
// Layers / update
// ============================================================================

#[test]
fn test_cameras_for_layer() {
    let mut registry = CameraRegistry::new();
    let all = registry.insert(camera_on(None, 0));
    let ui = registry.insert(camera_on(None, 0));
    registry.get_mut(ui).unwrap().state_mut().unwrap().set_layers(0b100);

    assert_eq!(registry.cameras_for_layer(0b001), vec![all]);
    let mut both = registry.cameras_for_layer(0b100);
    both.sort();
    let mut expected = vec![all, ui];
    expected.sort();
    assert_eq!(both, expected);
    assert!(registry.cameras_for_layer(0).is_empty());
}

#[test]
fn test_update_all_moves_cameras_with_owners() {
    let mut registry = CameraRegistry::new();
    let moved = registry.insert(camera_on(None, 0));
    let idle = registry.insert(Camera::new(&Transform::from_position(Vec3::new(0.0, 0.0, 4.0))));
    let dead = registry.insert(camera_on(None, 0));
    registry.get_mut(dead).unwrap().destroy();
    registry.get_mut(moved).unwrap().state_mut().unwrap().set_field_of_view(60.0).unwrap();

    registry.update_all(|key| {
        (key == moved).then(|| Transform::from_position(Vec3::new(7.0, 0.0, 0.0)))
    });

    let moved_state = registry.get(moved).unwrap().state().unwrap();
    assert!((moved_state.position() - Vec3::new(7.0, 0.0, 0.0)).length() < 1e-6);
    assert!(!moved_state.is_projection_dirty());

    let idle_state = registry.get(idle).unwrap().state().unwrap();
    assert!((idle_state.position() - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-6);
    assert!(registry.get(dead).unwrap().is_destroyed());
}
