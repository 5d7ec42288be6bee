// Shared test doubles.

#![allow(dead_code)]
use globe_core::labels::{LabelLayout, LabelRasterizer, LabelStyle};
use globe_core::{GlobeError, Result};

/// Hands out numbered "images" and records every call.
#[derive(Default)]
pub struct CountingRasterizer {
    next_id: u32,
    pub measured: usize,
    pub rasterized: Vec<String>,
    pub released: Vec<u32>,
    pub fail_on: Option<String>,
}

impl CountingRasterizer {
    pub fn failing_on(text: &str) -> Self {
        Self {
            fail_on: Some(text.to_string()),
            ..Self::default()
        }
    }
}

impl LabelRasterizer for CountingRasterizer {
    type Image = u32;

    fn measure_text(&mut self, text: &str, _font: &str) -> Result<f64> {
        self.measured += 1;
        Ok(text.chars().count() as f64 * 20.0)
    }

    fn rasterize(&mut self, text: &str, _style: &LabelStyle, _layout: &LabelLayout) -> Result<u32> {
        if self.fail_on.as_deref() == Some(text) {
            return Err(GlobeError::Rasterize(format!("cannot draw {}", text)));
        }
        self.rasterized.push(text.to_string());
        self.next_id += 1;
        Ok(self.next_id)
    }

    fn release(&mut self, image: &u32) {
        self.released.push(*image);
    }
}
