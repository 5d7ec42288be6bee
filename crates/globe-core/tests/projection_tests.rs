// Host-side tests for lon/lat projection and surface orientation.

use glam::DVec3;
use globe_core::projection::{project, surface_orientation};

#[test]
fn projected_points_lie_on_the_sphere() {
    for &r in &[1.0, 50.0, 123.4] {
        for lon in (-180..=180).step_by(15) {
            for lat in (-90..=90).step_by(15) {
                let p = project(r, lon as f64, lat as f64);
                assert!((p.length() - r).abs() < 1e-9 * r.max(1.0), "r={r} lon={lon} lat={lat}");
            }
        }
    }
}

#[test]
fn poles_and_prime_meridian() {
    let north = project(50.0, 0.0, 90.0);
    assert!((north - DVec3::new(0.0, 50.0, 0.0)).length() < 1e-9);
    let origin = project(50.0, 0.0, 0.0);
    assert!((origin - DVec3::new(50.0, 0.0, 0.0)).length() < 1e-9);
}

#[test]
fn east_longitude_turns_toward_negative_z() {
    let east = project(50.0, 90.0, 0.0);
    assert!(east.x.abs() < 1e-9);
    assert!((east.z + 50.0).abs() < 1e-9);
}

#[test]
fn surface_orientation_points_plus_z_outward() {
    let p = project(50.0, 105.8542, 21.0285);
    let n = surface_orientation(p) * DVec3::Z;
    assert!((n - p.normalize()).length() < 1e-9);
}

#[test]
fn surface_orientation_of_origin_is_identity() {
    let q = surface_orientation(DVec3::ZERO);
    assert!((q * DVec3::Z - DVec3::Z).length() < 1e-12);
}
