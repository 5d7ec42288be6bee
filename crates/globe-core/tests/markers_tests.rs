// Host-side tests for point, pillar and wave markers.

use glam::Vec3;
use globe_core::constants::{MARKER_LIFT, WAVE_PULSE_STEP};
use globe_core::geo::{CityRole, GeoPoint};
use globe_core::markers::{wave_opacity, PillarMarker, PointMarker, WaveMarker};
use globe_core::options::PunctuationOptions;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn hanoi() -> GeoPoint {
    GeoPoint::new("Hanoi", 105.8542, 21.0285)
}

fn colors() -> PunctuationOptions {
    PunctuationOptions {
        circle_color: 0x3892ff,
        start_color: 0xe4007f,
        end_color: 0xffffff,
    }
}

#[test]
fn wave_opacity_envelope() {
    assert!(wave_opacity(1.0).abs() < 1e-12);
    assert!((wave_opacity(1.5) - 1.0).abs() < 1e-12);
    assert!(wave_opacity(2.0).abs() < 1e-12);
    assert!((wave_opacity(1.25) - 0.5).abs() < 1e-12);
    assert!((wave_opacity(1.75) - 0.5).abs() < 1e-12);
}

#[test]
fn wave_opacity_is_clamped_outside_the_pulse() {
    assert_eq!(wave_opacity(0.3), 0.0);
    assert_eq!(wave_opacity(2.4), 0.0);
}

#[test]
fn wave_resets_to_start_after_crossing_end() {
    let mut w = WaveMarker::place(50.0, &hanoi(), &mut StdRng::seed_from_u64(1));
    w.pulse_phase = 2.0 - WAVE_PULSE_STEP / 2.0;
    w.tick();
    assert_eq!(w.pulse_phase, 1.0);
    assert!((w.scale - w.base_size).abs() < 1e-12);
    assert!(w.opacity.abs() < 1e-12);
}

#[test]
fn wave_scale_follows_phase() {
    let mut w = WaveMarker::place(50.0, &hanoi(), &mut StdRng::seed_from_u64(2));
    w.pulse_phase = 1.2;
    w.tick();
    assert!((w.scale - w.base_size * (1.2 + WAVE_PULSE_STEP)).abs() < 1e-9);
    for _ in 0..1_000 {
        w.tick();
        assert!(w.pulse_phase <= 2.0);
        assert!((0.0..=1.0).contains(&w.opacity));
    }
}

#[test]
fn point_marker_sits_just_above_the_surface() {
    let p = PointMarker::place(50.0, &hanoi());
    assert!((p.position.length() - 50.0 * MARKER_LIFT).abs() < 1e-9);
    assert!((p.size - 2.5).abs() < 1e-12);
}

#[test]
fn pillar_color_follows_role() {
    let origin = PillarMarker::place(50.0, &hanoi(), CityRole::Origin, &colors());
    let dest = PillarMarker::place(50.0, &hanoi(), CityRole::Destination, &colors());
    assert_eq!(origin.color, 0xe4007f);
    assert_eq!(dest.color, 0xffffff);
}

#[test]
fn pillar_rises_along_the_normal() {
    let pillar = PillarMarker::place(50.0, &hanoi(), CityRole::Origin, &colors());
    assert!((pillar.root.length() - 50.0).abs() < 1e-9);
    assert!((pillar.tip().length() - (50.0 + pillar.height)).abs() < 1e-9);
    assert!((pillar.height - 15.0).abs() < 1e-12);
}

#[test]
fn pillar_panels_reach_the_tip() {
    let pillar = PillarMarker::place(50.0, &hanoi(), CityRole::Destination, &colors());
    let mats = pillar.panel_matrices();
    assert_eq!(mats.len(), 2);
    let tip = pillar.tip().as_vec3();
    let root = pillar.root.as_vec3();
    for m in &mats {
        assert!((m.transform_point3(Vec3::new(0.0, 0.5, 0.0)) - tip).length() < 1e-3);
        assert!((m.transform_point3(Vec3::new(0.0, -0.5, 0.0)) - root).length() < 1e-3);
    }
}
