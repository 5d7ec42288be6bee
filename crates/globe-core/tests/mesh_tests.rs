// Host-side tests for the static quad and earth meshes.

use glam::Vec3;
use globe_core::mesh::{unit_quad, uv_sphere};
use globe_core::projection::project;

#[test]
fn unit_quad_is_centered() {
    let (v, i) = unit_quad();
    assert_eq!(v.len(), 4);
    assert_eq!(i.len(), 6);
    let sum = v.iter().fold(Vec3::ZERO, |acc, m| acc + Vec3::from_array(m.position));
    assert!(sum.length() < 1e-6);
}

#[test]
fn sphere_vertices_lie_on_the_radius() {
    let (v, i) = uv_sphere(50.0, 32, 32);
    assert_eq!(v.len(), 33 * 33);
    assert_eq!(i.len(), 32 * 32 * 6);
    assert!(i.iter().all(|&ix| (ix as usize) < v.len()));
    for m in &v {
        assert!((Vec3::from_array(m.position).length() - 50.0).abs() < 1e-3);
    }
}

#[test]
fn sphere_uvs_match_the_projection() {
    // u = (lon + 180) / 360, v = (90 - lat) / 180
    let (v, _) = uv_sphere(50.0, 36, 18);
    let row = 37;
    let check = |i: usize, j: usize| {
        let m = v[j * row + i];
        let lon = m.uv[0] as f64 * 360.0 - 180.0;
        let lat = 90.0 - m.uv[1] as f64 * 180.0;
        let want = project(50.0, lon, lat).as_vec3();
        let got = Vec3::from_array(m.position);
        assert!((got - want).length() < 1e-3, "i={i} j={j} got={got:?} want={want:?}");
    };
    check(9, 6);
    check(18, 9);
    check(27, 12);
    check(3, 4);
}
