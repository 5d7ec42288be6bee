// Host-side tests for the camera, billboards and the arena.

use glam::Vec3;
use globe_core::arena::Arena;
use globe_core::scene::billboard;
use globe_core::Camera;

#[test]
fn default_camera_looks_at_the_globe() {
    let cam = Camera::default();
    assert_eq!(cam.eye, Vec3::new(0.0, 30.0, -250.0));
    assert_eq!(cam.target, Vec3::ZERO);
    let clip = cam.view_proj().project_point3(Vec3::ZERO);
    assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5);
}

#[test]
fn viewport_sets_aspect() {
    let mut cam = Camera::default();
    cam.set_viewport(1920, 1080);
    assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    cam.set_viewport(0, 0);
    assert_eq!(cam.aspect, 1.0);
}

#[test]
fn billboard_axes_are_orthonormal_and_face_the_eye() {
    let cam = Camera::default();
    let (right, up) = cam.billboard_axes();
    assert!((right.length() - 1.0).abs() < 1e-5);
    assert!((up.length() - 1.0).abs() < 1e-5);
    assert!(right.dot(up).abs() < 1e-5);
    let facing = right.cross(up);
    let to_eye = (cam.eye - cam.target).normalize();
    assert!((facing - to_eye).length() < 1e-4);
}

#[test]
fn billboard_scales_and_translates_a_unit_quad() {
    let cam = Camera::default();
    let axes = cam.billboard_axes();
    let m = billboard(Vec3::new(1.0, 2.0, 3.0), 4.0, 2.0, axes);
    let corner = m.transform_point3(Vec3::new(0.5, 0.5, 0.0));
    let want = Vec3::new(1.0, 2.0, 3.0) + axes.0 * 2.0 + axes.1 * 1.0;
    assert!((corner - want).length() < 1e-5);
}

#[test]
fn arena_handles_resolve_until_cleared() {
    let mut arena = Arena::new();
    let a = arena.alloc("a");
    let b = arena.alloc("b");
    assert_ne!(a, b);
    assert_eq!(arena.get(b), Some(&"b"));
    if let Some(v) = arena.get_mut(a) {
        *v = "z";
    }
    assert_eq!(arena.iter().copied().collect::<Vec<_>>(), vec!["z", "b"]);
    arena.clear();
    assert!(arena.get(a).is_none());
}
