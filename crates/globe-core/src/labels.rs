//! Text badges for city names, rasterized once per (text, style) and shared.

use crate::constants::{LABEL_LINE_HEIGHT, LABEL_SPRITE_HEIGHT};
use crate::error::Result;
use fnv::FnvHashMap;
use glam::{DVec2, DVec3};
use std::rc::Rc;

/// Visual style of a label; every field takes part in the cache key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LabelStyle {
    pub font_size_px: u32,
    pub font_family: String,
    pub font_weight: String,
    pub color: String,
    /// `None` leaves the canvas transparent.
    pub background_color: Option<String>,
    pub padding_px: u32,
    /// Canvas pixels per CSS pixel.
    pub pixel_scale: u32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size_px: 20,
            font_family: "Outfit, sans-serif".to_string(),
            font_weight: "600".to_string(),
            color: "#ffffff".to_string(),
            background_color: None,
            padding_px: 8,
            pixel_scale: 2,
        }
    }
}

impl LabelStyle {
    /// CSS font shorthand at canvas resolution.
    pub fn css_font(&self) -> String {
        format!(
            "{} {}px {}",
            self.font_weight,
            self.font_size_px * self.pixel_scale,
            self.font_family
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LabelKey {
    pub text: String,
    pub style: LabelStyle,
}

/// Canvas size for a measured text plus the sprite size it maps to in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelLayout {
    pub font: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub sprite_size: DVec2,
}

impl LabelLayout {
    pub fn compute(text_width_px: f64, style: &LabelStyle) -> Self {
        let scale = style.pixel_scale as f64;
        let text_height = style.font_size_px as f64 * scale * LABEL_LINE_HEIGHT;
        let pad = style.padding_px as f64 * 2.0 * scale;
        let canvas_width = ((text_width_px.max(0.0) + pad) as u32).max(1);
        let canvas_height = ((text_height + pad) as u32).max(1);
        let aspect = canvas_width as f64 / canvas_height as f64;
        Self {
            font: style.css_font(),
            canvas_width,
            canvas_height,
            sprite_size: DVec2::new(LABEL_SPRITE_HEIGHT * aspect, LABEL_SPRITE_HEIGHT),
        }
    }
}

/// Turns text into an image the renderer can draw.
///
/// Implemented by the platform front-end (a 2D canvas in the browser).
pub trait LabelRasterizer {
    type Image;

    /// Advance width of `text` in canvas pixels for the CSS `font`.
    fn measure_text(&mut self, text: &str, font: &str) -> Result<f64>;

    fn rasterize(&mut self, text: &str, style: &LabelStyle, layout: &LabelLayout) -> Result<Self::Image>;

    /// Free whatever graphics resources back `image`.
    fn release(&mut self, image: &Self::Image);
}

struct CachedLabel<I> {
    image: Rc<I>,
    layout: LabelLayout,
}

/// A positionable label sharing its image with every other handle of the same key.
#[derive(Debug)]
pub struct LabelHandle<I> {
    pub image: Rc<I>,
    pub layout: LabelLayout,
    pub position: DVec3,
}

impl<I> Clone for LabelHandle<I> {
    fn clone(&self) -> Self {
        Self {
            image: Rc::clone(&self.image),
            layout: self.layout.clone(),
            position: self.position,
        }
    }
}

impl<I> LabelHandle<I> {
    /// World-space width and height of the sprite.
    #[inline]
    pub fn sprite_size(&self) -> DVec2 {
        self.layout.sprite_size
    }
}

/// Cache of rasterized labels, owned by the globe and cleared on teardown.
pub struct LabelCache<I> {
    entries: FnvHashMap<LabelKey, CachedLabel<I>>,
}

impl<I> Default for LabelCache<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> LabelCache<I> {
    pub fn new() -> Self {
        Self {
            entries: FnvHashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, text: &str, style: &LabelStyle) -> bool {
        self.entries.contains_key(&LabelKey {
            text: text.to_string(),
            style: style.clone(),
        })
    }

    /// Fetch the label for `(text, style)`, rasterizing it on first use.
    pub fn get_label<R>(&mut self, rasterizer: &mut R, text: &str, style: &LabelStyle) -> Result<LabelHandle<I>>
    where
        R: LabelRasterizer<Image = I>,
    {
        let key = LabelKey {
            text: text.to_string(),
            style: style.clone(),
        };
        if let Some(cached) = self.entries.get(&key) {
            return Ok(LabelHandle {
                image: Rc::clone(&cached.image),
                layout: cached.layout.clone(),
                position: DVec3::ZERO,
            });
        }

        let width = rasterizer.measure_text(text, &style.css_font())?;
        let layout = LabelLayout::compute(width, style);
        let image = Rc::new(rasterizer.rasterize(text, style, &layout)?);
        log::trace!(
            "[labels] rasterized {:?} at {}x{}",
            text,
            layout.canvas_width,
            layout.canvas_height
        );
        let handle = LabelHandle {
            image: Rc::clone(&image),
            layout: layout.clone(),
            position: DVec3::ZERO,
        };
        self.entries.insert(key, CachedLabel { image, layout });
        Ok(handle)
    }

    pub fn get_batch<R, S>(&mut self, rasterizer: &mut R, texts: &[S], style: &LabelStyle) -> Result<Vec<LabelHandle<I>>>
    where
        R: LabelRasterizer<Image = I>,
        S: AsRef<str>,
    {
        texts
            .iter()
            .map(|t| self.get_label(rasterizer, t.as_ref(), style))
            .collect()
    }

    /// Release every cached image and empty the cache.
    pub fn clear<R>(&mut self, rasterizer: &mut R)
    where
        R: LabelRasterizer<Image = I>,
    {
        for (_, cached) in self.entries.drain() {
            rasterizer.release(&cached.image);
        }
    }
}
