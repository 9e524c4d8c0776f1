//! Tests for the reflection clip manager.

use glam::Vec3;

use super::*;
use crate::host::testing::RecordingHost;

fn manager(height: f32) -> ReflectionClipManager {
    ReflectionClipManager::new(Vec3::Y, height)
}

// -- Clip plane orientation --

#[test]
fn test_main_pass_keeps_geometry_above_water() {
    let planes = ClipPlaneSet::from_height(Vec3::Y, 2.0);
    let main = planes.for_pass(RenderPassKind::Main);
    assert!(!main.clips(Vec3::new(0.0, 3.0, 0.0)));
    assert!(main.clips(Vec3::new(0.0, 1.0, 0.0)));
}

#[test]
fn test_reflected_pass_uses_opposite_orientation() {
    let planes = ClipPlaneSet::from_height(Vec3::Y, 2.0);
    let reflected = planes.for_pass(RenderPassKind::Reflected);
    assert!(reflected.clips(Vec3::new(0.0, 3.0, 0.0)));
    assert!(!reflected.clips(Vec3::new(0.0, 1.0, 0.0)));
    assert_eq!(reflected, planes.plane().flipped());
}

#[test]
fn test_offset_is_negated_height() {
    let planes = ClipPlaneSet::from_height(Vec3::Z, 7.5);
    assert_eq!(planes.offset(), -7.5);
    assert_eq!(planes.height(), 7.5);
    assert_eq!(planes.plane().to_vec4(), glam::Vec4::new(0.0, 0.0, 1.0, -7.5));
}

// -- Registration --

#[test]
fn test_register_attaches_planes_at_current_height() {
    let mut host = RecordingHost::with_objects([1]);
    let mut mgr = manager(3.0);

    mgr.register_object(&mut host, ObjectId(1)).unwrap();

    assert!(mgr.contains(ObjectId(1)));
    assert_eq!(mgr.len(), 1);
    assert_eq!(mgr.clip_planes(ObjectId(1)).unwrap().height(), 3.0);
    assert_eq!(host.planes_of(ObjectId(1)).len(), 1);
}

#[test]
fn test_register_without_render_representation_fails() {
    let mut host = RecordingHost::with_objects([1]);
    let mut mgr = manager(0.0);

    let err = mgr.register_object(&mut host, ObjectId(2)).unwrap_err();
    assert!(matches!(err, ReflectionError::PreconditionFailed(_)));
    assert!(mgr.is_empty());
    assert!(host.attached.is_empty());
}

#[test]
fn test_register_surfaces_host_allocation_failure() {
    let mut host = RecordingHost::with_objects([1]);
    host.fail_clip_alloc = true;
    let mut mgr = manager(0.0);

    let err = mgr.register_object(&mut host, ObjectId(1)).unwrap_err();
    assert!(matches!(err, ReflectionError::ResourceUnavailable(_)));
    assert!(mgr.is_empty());
}

#[test]
fn test_reregister_replaces_entry() {
    let mut host = RecordingHost::with_objects([1]);
    let mut mgr = manager(1.0);

    mgr.register_object(&mut host, ObjectId(1)).unwrap();
    mgr.register_object(&mut host, ObjectId(1)).unwrap();

    assert_eq!(mgr.len(), 1);
    assert_eq!(host.planes_of(ObjectId(1)).len(), 1);
    assert_eq!(host.detached.len(), 1);
}

#[test]
fn test_failed_reregister_keeps_old_entry() {
    let mut host = RecordingHost::with_objects([1]);
    let mut mgr = manager(1.0);
    mgr.register_object(&mut host, ObjectId(1)).unwrap();

    host.fail_clip_alloc = true;
    assert!(mgr.register_object(&mut host, ObjectId(1)).is_err());

    assert!(mgr.contains(ObjectId(1)));
    assert_eq!(host.planes_of(ObjectId(1)).len(), 1);
}

// -- Height updates --

#[test]
fn test_update_height_rederives_offsets() {
    let mut host = RecordingHost::with_objects([1, 2]);
    let mut mgr = manager(0.0);
    mgr.register_object(&mut host, ObjectId(1)).unwrap();
    mgr.register_object(&mut host, ObjectId(2)).unwrap();

    mgr.update_height(&mut host, 4.0).unwrap();

    let expected = ClipPlaneSet::from_height(Vec3::Y, 4.0);
    assert_eq!(mgr.height(), 4.0);
    for id in [1, 2] {
        assert_eq!(mgr.clip_planes(ObjectId(id)), Some(&expected));
        assert_eq!(host.planes_of(ObjectId(id)), vec![expected]);
    }
    assert_eq!(host.update_calls, 2);
}

#[test]
fn test_objects_registered_after_update_use_new_height() {
    let mut host = RecordingHost::with_objects([1]);
    let mut mgr = manager(0.0);
    mgr.update_height(&mut host, -3.0).unwrap();

    mgr.register_object(&mut host, ObjectId(1)).unwrap();
    assert_eq!(mgr.clip_planes(ObjectId(1)).unwrap().offset(), 3.0);
}

#[test]
fn test_non_finite_height_rejected_without_change() {
    let mut host = RecordingHost::with_objects([1]);
    let mut mgr = manager(2.0);
    mgr.register_object(&mut host, ObjectId(1)).unwrap();

    for bad in [f32::NAN, f32::INFINITY] {
        let err = mgr.update_height(&mut host, bad).unwrap_err();
        assert!(matches!(err, ReflectionError::InvalidArgument(_)));
    }
    assert_eq!(mgr.height(), 2.0);
    assert_eq!(mgr.clip_planes(ObjectId(1)).unwrap().height(), 2.0);
    assert_eq!(host.update_calls, 0);
}

// -- Unregistration --

#[test]
fn test_unregister_is_idempotent() {
    let mut host = RecordingHost::with_objects([1]);
    let mut mgr = manager(0.0);
    mgr.register_object(&mut host, ObjectId(1)).unwrap();

    assert!(mgr.unregister_object(&mut host, ObjectId(1)));
    assert!(!mgr.unregister_object(&mut host, ObjectId(1)));

    assert!(mgr.is_empty());
    assert!(host.attached.is_empty());
    assert_eq!(host.detached.len(), 1);
}

#[test]
fn test_unregister_unknown_object_is_noop() {
    let mut host = RecordingHost::with_objects([1]);
    let mut mgr = manager(0.0);
    mgr.register_object(&mut host, ObjectId(1)).unwrap();

    assert!(!mgr.unregister_object(&mut host, ObjectId(99)));
    assert_eq!(mgr.len(), 1);
    assert!(host.detached.is_empty());
}

#[test]
fn test_clear_releases_everything() {
    let mut host = RecordingHost::with_objects(1..=5);
    let mut mgr = manager(0.0);
    for id in 1..=5 {
        mgr.register_object(&mut host, ObjectId(id)).unwrap();
    }

    assert_eq!(mgr.clear(&mut host), 5);
    assert!(mgr.is_empty());
    assert!(host.attached.is_empty());
    assert_eq!(mgr.clear(&mut host), 0);
}

#[test]
fn test_objects_lists_registered_ids() {
    let mut host = RecordingHost::with_objects([4, 8]);
    let mut mgr = manager(0.0);
    mgr.register_object(&mut host, ObjectId(8)).unwrap();
    mgr.register_object(&mut host, ObjectId(4)).unwrap();

    let mut ids: Vec<_> = mgr.objects().collect();
    ids.sort();
    assert_eq!(ids, vec![ObjectId(4), ObjectId(8)]);
}
