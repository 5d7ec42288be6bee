//! City-name badges drawn with a 2D canvas and uploaded as GPU textures.

use crate::render::{GpuState, GpuTexture};
use globe_core::labels::{LabelLayout, LabelRasterizer, LabelStyle};
use globe_core::{GlobeError, Result};
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> GlobeError {
    GlobeError::Rasterize(format!("{:?}", e))
}

/// Rasterizes text on an offscreen canvas. Borrowed per use so the label cache
/// never holds on to the GPU.
pub struct CanvasRasterizer<'g, 'a> {
    canvas: &'g web::HtmlCanvasElement,
    ctx: &'g web::CanvasRenderingContext2d,
    gpu: &'g GpuState<'a>,
}

impl<'g, 'a> CanvasRasterizer<'g, 'a> {
    pub fn new(
        canvas: &'g web::HtmlCanvasElement,
        ctx: &'g web::CanvasRenderingContext2d,
        gpu: &'g GpuState<'a>,
    ) -> Self {
        Self { canvas, ctx, gpu }
    }
}

impl LabelRasterizer for CanvasRasterizer<'_, '_> {
    type Image = GpuTexture;

    fn measure_text(&mut self, text: &str, font: &str) -> Result<f64> {
        self.ctx.set_font(font);
        self.ctx
            .measure_text(text)
            .map(|m| m.width())
            .map_err(js_err)
    }

    fn rasterize(&mut self, text: &str, style: &LabelStyle, layout: &LabelLayout) -> Result<GpuTexture> {
        let (w, h) = (layout.canvas_width, layout.canvas_height);
        // Resizing resets the context state
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let ctx = self.ctx;
        ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        if let Some(bg) = &style.background_color {
            ctx.set_fill_style_str(bg);
            ctx.fill_rect(0.0, 0.0, w as f64, h as f64);
        }
        ctx.set_font(&layout.font);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str(&style.color);
        ctx.fill_text(text, w as f64 / 2.0, h as f64 / 2.0).map_err(js_err)?;

        let pixels = ctx
            .get_image_data(0.0, 0.0, w as f64, h as f64)
            .map_err(js_err)?
            .data();
        Ok(self.gpu.upload_rgba(&format!("label:{}", text), w, h, &pixels.0))
    }

    fn release(&mut self, image: &GpuTexture) {
        image.destroy();
    }
}
