/// Tests for TargetManager
///
/// These tests validate render target creation, lookup, resizing,
/// removal, and how removal interacts with weak camera references.

use std::sync::Arc;
use glam::{UVec2, Vec2};
use super::*;

// ============================================================================
// Tests: Create RenderTarget
// ============================================================================

#[test]
fn test_target_manager_new() {
    let tm = TargetManager::new();
    assert_eq!(tm.render_target_count(), 0);
}

#[test]
fn test_create_render_target() {
    let mut tm = TargetManager::new();
    let target = tm.create_render_target("screen", 1280, 720).unwrap();

    assert_eq!(target.name(), "screen");
    assert_eq!(target.size(), UVec2::new(1280, 720));
    assert_eq!(target.screen_origin(), Vec2::ZERO);
    assert_eq!(tm.render_target_count(), 1);
}

#[test]
fn test_create_render_target_duplicate_name_fails() {
    let mut tm = TargetManager::new();
    tm.create_render_target("screen", 800, 600).unwrap();

    let result = tm.create_render_target("screen", 640, 480);
    match result {
        Err(Error::InvalidResource(msg)) => assert!(msg.contains("already exists")),
        other => panic!("Expected InvalidResource, got {:?}", other.map(|t| t.name().to_string())),
    }
    assert_eq!(tm.render_target("screen").unwrap().width(), 800);
}

// ============================================================================
// Tests: Lookup / Resize
// ============================================================================

#[test]
fn test_render_target_lookup_shares_instance() {
    let mut tm = TargetManager::new();
    let created = tm.create_render_target("screen", 800, 600).unwrap();
    let found = tm.render_target("screen").unwrap();

    assert!(Arc::ptr_eq(&created, &found));
    assert!(tm.render_target("nonexistent").is_none());
}

#[test]
fn test_resize_render_target_visible_through_handles() {
    let mut tm = TargetManager::new();
    let target = tm.create_render_target("screen", 800, 600).unwrap();

    tm.resize_render_target("screen", 1920, 1080).unwrap();
    assert_eq!(target.width(), 1920);
    assert_eq!(target.height(), 1080);

    assert!(matches!(
        tm.resize_render_target("missing", 1, 1),
        Err(Error::InvalidResource(_))
    ));
}

#[test]
fn test_set_screen_origin() {
    let mut tm = TargetManager::new();
    let target = tm.create_render_target("window", 800, 600).unwrap();
    target.set_screen_origin(Vec2::new(100.0, 50.0));
    assert_eq!(tm.render_target("window").unwrap().screen_origin(), Vec2::new(100.0, 50.0));
}

// ============================================================================
// Tests: Remove / Clear
// ============================================================================

#[test]
fn test_remove_render_target_invalidates_weak_references() {
    let mut tm = TargetManager::new();
    let weak = Arc::downgrade(&tm.create_render_target("screen", 800, 600).unwrap());
    assert!(weak.upgrade().is_some());

    let removed = tm.remove_render_target("screen");
    assert!(removed.is_some());
    drop(removed);

    assert!(weak.upgrade().is_none());
    assert_eq!(tm.render_target_count(), 0);
}

#[test]
fn test_remove_render_target_not_found() {
    let mut tm = TargetManager::new();
    assert!(tm.remove_render_target("nonexistent").is_none());
}

#[test]
fn test_render_target_names_and_clear() {
    let mut tm = TargetManager::new();
    tm.create_render_target("screen", 800, 600).unwrap();
    tm.create_render_target("minimap", 256, 256).unwrap();

    let names = tm.render_target_names();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"screen"));
    assert!(names.contains(&"minimap"));

    tm.clear();
    assert_eq!(tm.render_target_count(), 0);
    assert!(tm.create_render_target("screen", 800, 600).is_ok());
}
