// Host-side tests for the satellite rings.

use globe_core::constants::{ORBIT_RING_POINTS, ORBIT_SATELLITE_COLORS};
use globe_core::orbit::{build_rings, circle_points, satellite_indices};

#[test]
fn circle_stops_short_of_a_full_turn() {
    let open = circle_points(65.0, ORBIT_RING_POINTS, false);
    let closed = circle_points(65.0, ORBIT_RING_POINTS, true);
    assert_eq!(open.len(), 148);
    assert_eq!(closed.len(), open.len() + 1);
    assert_eq!(closed.first(), closed.last());
}

#[test]
fn circle_points_are_rounded_to_two_decimals() {
    for p in circle_points(65.0, 150, false) {
        for v in [p.x, p.z] {
            assert!(((v * 100.0).round() - v * 100.0).abs() < 1e-6);
        }
        assert_eq!(p.y, 0.0);
        assert!((p.length() - 65.0).abs() < 0.01);
    }
}

#[test]
fn satellites_spread_along_the_ring() {
    assert_eq!(satellite_indices(149, 2), vec![74, 148]);
    assert_eq!(satellite_indices(10, 3), vec![3, 6, 9]);
    assert_eq!(satellite_indices(10, 1), vec![0]);
    assert!(satellite_indices(0, 2).is_empty());
    assert!(satellite_indices(10, 0).is_empty());
}

#[test]
fn three_rings_with_their_own_colors() {
    let rings = build_rings(50.0, 2);
    assert_eq!(rings.len(), 3);
    for (ring, color) in rings.iter().zip(ORBIT_SATELLITE_COLORS) {
        assert_eq!(ring.satellite_color, color);
        assert_eq!(ring.satellites.len(), 2);
        assert_eq!(ring.satellite_positions().len(), 2);
    }
    assert_eq!(rings[1].scale, 1.2);
    assert_eq!(rings[2].scale, 0.8);
}

#[test]
fn spin_keeps_satellites_on_their_ring() {
    let mut rings = build_rings(50.0, 2);
    let ring = &mut rings[1];
    let r = 65.0 * ring.scale;
    for _ in 0..50 {
        ring.spin += -0.01;
        for p in ring.satellite_positions() {
            assert!((p.length() - r).abs() < 0.02);
        }
    }
}
