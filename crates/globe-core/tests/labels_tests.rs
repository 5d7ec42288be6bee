// Host-side tests for the label cache.

mod common;

use common::CountingRasterizer;
use glam::DVec3;
use globe_core::constants::LABEL_SPRITE_HEIGHT;
use globe_core::labels::{LabelCache, LabelLayout, LabelStyle};
use globe_core::GlobeError;
use std::rc::Rc;

#[test]
fn same_text_and_style_share_one_image() {
    let mut r = CountingRasterizer::default();
    let mut cache = LabelCache::new();
    let style = LabelStyle::default();
    let a = cache.get_label(&mut r, "Tokyo", &style).unwrap();
    let b = cache.get_label(&mut r, "Tokyo", &style).unwrap();
    assert!(Rc::ptr_eq(&a.image, &b.image));
    assert_eq!(r.rasterized, vec!["Tokyo".to_string()]);
    assert_eq!(r.measured, 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn handles_have_independent_positions() {
    let mut r = CountingRasterizer::default();
    let mut cache = LabelCache::new();
    let style = LabelStyle::default();
    let mut a = cache.get_label(&mut r, "Tokyo", &style).unwrap();
    let b = cache.get_label(&mut r, "Tokyo", &style).unwrap();
    a.position = DVec3::new(1.0, 2.0, 3.0);
    assert_eq!(b.position, DVec3::ZERO);
    assert_ne!(a.position, b.position);
}

#[test]
fn style_is_part_of_the_key() {
    let mut r = CountingRasterizer::default();
    let mut cache = LabelCache::new();
    let small = LabelStyle::default();
    let big = LabelStyle {
        font_size_px: 32,
        ..LabelStyle::default()
    };
    let a = cache.get_label(&mut r, "Tokyo", &small).unwrap();
    let b = cache.get_label(&mut r, "Tokyo", &big).unwrap();
    assert!(!Rc::ptr_eq(&a.image, &b.image));
    assert!(cache.contains("Tokyo", &small));
    assert!(cache.contains("Tokyo", &big));
    assert_eq!(cache.len(), 2);
}

#[test]
fn clear_releases_every_image_and_next_call_is_fresh() {
    let mut r = CountingRasterizer::default();
    let mut cache = LabelCache::new();
    let style = LabelStyle::default();
    let before = cache.get_label(&mut r, "Tokyo", &style).unwrap();
    cache.get_label(&mut r, "Seoul", &style).unwrap();

    cache.clear(&mut r);
    assert!(cache.is_empty());
    let mut released = r.released.clone();
    released.sort_unstable();
    assert_eq!(released, vec![1, 2]);

    let after = cache.get_label(&mut r, "Tokyo", &style).unwrap();
    assert!(!Rc::ptr_eq(&before.image, &after.image));
    assert_eq!(*after.image, 3);
}

#[test]
fn batch_shares_duplicates() {
    let mut r = CountingRasterizer::default();
    let mut cache = LabelCache::new();
    let style = LabelStyle::default();
    let handles = cache
        .get_batch(&mut r, &["Tokyo", "Seoul", "Tokyo"], &style)
        .unwrap();
    assert_eq!(handles.len(), 3);
    assert!(Rc::ptr_eq(&handles[0].image, &handles[2].image));
    assert_eq!(r.rasterized.len(), 2);
}

#[test]
fn rasterizer_failure_is_reported_and_not_cached() {
    let mut r = CountingRasterizer::failing_on("Atlantis");
    let mut cache = LabelCache::new();
    let style = LabelStyle::default();
    let err = cache.get_label(&mut r, "Atlantis", &style).unwrap_err();
    assert!(matches!(err, GlobeError::Rasterize(_)));
    assert!(!cache.contains("Atlantis", &style));
}

#[test]
fn layout_keeps_sprite_height_and_canvas_aspect() {
    let style = LabelStyle::default();
    let layout = LabelLayout::compute(100.0, &style);
    // 100 px text + 2 * 8 px padding at 2x
    assert_eq!(layout.canvas_width, 132);
    // 20 px * 2 * 1.2 line height + padding
    assert_eq!(layout.canvas_height, 80);
    assert!((layout.sprite_size.y - LABEL_SPRITE_HEIGHT).abs() < 1e-12);
    let aspect = layout.canvas_width as f64 / layout.canvas_height as f64;
    assert!((layout.sprite_size.x / layout.sprite_size.y - aspect).abs() < 1e-12);
}

#[test]
fn css_font_uses_canvas_pixels() {
    assert_eq!(LabelStyle::default().css_font(), "600 40px Outfit, sans-serif");
}
