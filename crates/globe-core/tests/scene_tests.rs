// Host-side tests for scene construction, ticking and draw lists.

use globe_core::assets::TextureName;
use globe_core::constants::{ARC_SAMPLES, SEGMENT_SAMPLES};
use globe_core::geo::{default_routes, CityRole, GeoPoint, RouteRecord};
use globe_core::scene::GlobeScene;
use globe_core::{Camera, GlobeOptions};

fn default_scene() -> GlobeScene {
    GlobeScene::build(GlobeOptions::default(), &default_routes())
}

#[test]
fn builds_one_fly_line_per_destination() {
    let scene = default_scene();
    assert_eq!(scene.fly_lines.len(), 18);
    assert_eq!(scene.points.len(), 19);
    assert_eq!(scene.pillars.len(), 19);
    assert_eq!(scene.waves.len(), 19);
    assert!(scene.rings.is_empty());
}

#[test]
fn only_the_origin_gets_the_origin_pillar() {
    let scene = default_scene();
    let origins = scene
        .pillars
        .iter()
        .filter(|p| p.role == CityRole::Origin)
        .count();
    assert_eq!(origins, 1);
}

#[test]
fn repeated_cities_get_one_marker() {
    let mut routes = default_routes();
    routes.push(RouteRecord {
        start: GeoPoint::new("Hanoi", 105.8542, 21.0285),
        ends: vec![
            GeoPoint::new("Japan", 139.6503, 35.6762),
            GeoPoint::new("Thailand", 100.5018, 13.7563),
        ],
    });
    let scene = GlobeScene::build(GlobeOptions::default(), &routes);
    assert_eq!(scene.fly_lines.len(), 20);
    assert_eq!(scene.points.len(), 20);
    assert_eq!(scene.pillars.len(), 20);
}

#[test]
fn same_seed_builds_same_phases() {
    let a = default_scene();
    let b = default_scene();
    for (x, y) in a.fly_lines.iter().zip(b.fly_lines.iter()) {
        assert_eq!(x.segment.phase, y.segment.phase);
    }
}

#[test]
fn tick_spins_the_globe_unless_paused() {
    let mut scene = default_scene();
    for _ in 0..10 {
        scene.tick(1.0 / 60.0);
    }
    assert!((scene.rotation_y - 0.02).abs() < 1e-12);
    scene.pause_rotation();
    scene.tick(1.0 / 60.0);
    assert!((scene.rotation_y - 0.02).abs() < 1e-12);
    scene.resume_rotation();
    scene.tick(1.0 / 60.0);
    assert!((scene.rotation_y - 0.022).abs() < 1e-12);
}

#[test]
fn tick_advances_segments_and_glow() {
    let mut scene = default_scene();
    let before: Vec<f64> = scene.fly_lines.iter().map(|f| f.segment.phase).collect();
    scene.tick(0.016);
    for (f, p) in scene.fly_lines.iter().zip(before) {
        assert!(f.segment.phase != p);
    }
    assert_eq!(scene.glow.value, 99.0);
}

#[test]
fn intro_scales_the_group() {
    let mut scene = default_scene();
    assert_eq!(scene.intro.scale(), 0.0);
    for _ in 0..20 {
        scene.tick(0.1);
    }
    assert!((scene.intro.scale() - 1.0).abs() < 1e-6);
    let m = scene.group_transform();
    let p = m.transform_point3(glam::Vec3::new(0.0, 50.0, 0.0));
    assert!((p.y - 50.0).abs() < 1e-4);
}

#[test]
fn draw_list_sizes() {
    let scene = default_scene();
    let camera = Camera::default();
    assert_eq!(scene.arc_vertices().len(), 18 * ARC_SAMPLES * 2);
    assert_eq!(scene.segment_instances(&camera).len(), 18 * (SEGMENT_SAMPLES + 1));
    assert_eq!(scene.marker_instances().len(), 19 + 2 * 19 + 19);
    // glow halo only; satellites are hidden by default
    assert_eq!(scene.sprite_instances(&camera).len(), 1);
    assert!(scene.ring_vertices().is_empty());
}

#[test]
fn marker_instances_run_by_texture() {
    let scene = default_scene();
    let names: Vec<TextureName> = scene.marker_instances().iter().map(|q| q.texture).collect();
    assert!(names[..19].iter().all(|n| *n == TextureName::Label));
    assert!(names[19..57].iter().all(|n| *n == TextureName::LightColumn));
    assert!(names[57..].iter().all(|n| *n == TextureName::Aperture));
}

#[test]
fn satellites_show_when_enabled() {
    let mut options = GlobeOptions::default();
    options.satellite.show = true;
    let mut scene = GlobeScene::build(options, &default_routes());
    assert_eq!(scene.rings.len(), 3);
    let camera = Camera::default();
    assert_eq!(scene.sprite_instances(&camera).len(), 1 + 3 * 2);
    assert!(!scene.ring_vertices().is_empty());
    scene.tick(0.016);
    assert!((scene.rings[0].spin + 0.01).abs() < 1e-12);
}

#[test]
fn clear_empties_every_arena() {
    let mut scene = default_scene();
    scene.clear();
    assert!(scene.fly_lines.is_empty());
    assert!(scene.points.is_empty());
    assert!(scene.pillars.is_empty());
    assert!(scene.waves.is_empty());
    assert!(scene.arc_vertices().is_empty());
}
