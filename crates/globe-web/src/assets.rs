use crate::render::{GpuState, GpuTexture};
use globe_core::assets::{TextureName, TextureRegistry};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

async fn load_image(url: &str) -> anyhow::Result<web::HtmlImageElement> {
    let img = web::HtmlImageElement::new().map_err(js_err)?;
    img.set_cross_origin(Some("anonymous"));
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(url);
    JsFuture::from(loaded)
        .await
        .map_err(|_| anyhow::anyhow!("failed to load {}", url))?;
    img.set_onload(None);
    img.set_onerror(None);
    Ok(img)
}

/// Decode an image to tightly packed RGBA8 through the scratch canvas.
async fn load_rgba(
    url: &str,
    canvas: &web::HtmlCanvasElement,
    ctx: &web::CanvasRenderingContext2d,
) -> anyhow::Result<(u32, u32, Vec<u8>)> {
    let img = load_image(url).await?;
    let (w, h) = (img.natural_width().max(1), img.natural_height().max(1));
    canvas.set_width(w);
    canvas.set_height(h);
    ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    ctx.draw_image_with_html_image_element(&img, 0.0, 0.0)
        .map_err(js_err)?;
    let data = ctx
        .get_image_data(0.0, 0.0, w as f64, h as f64)
        .map_err(js_err)?;
    Ok((w, h, data.data().0))
}

/// Load every texture the scene draws with. Failures are recorded in the
/// registry and the matching draws are skipped.
pub async fn load_textures(
    gpu: &GpuState<'_>,
    canvas: &web::HtmlCanvasElement,
    ctx: &web::CanvasRenderingContext2d,
    base: &str,
) -> TextureRegistry<GpuTexture> {
    let mut registry = TextureRegistry::default();
    for name in TextureName::ALL {
        let url = format!("{}/{}", base.trim_end_matches('/'), name.file_name());
        match load_rgba(&url, canvas, ctx).await {
            Ok((w, h, rgba)) => registry.insert(name, gpu.upload_rgba(name.as_str(), w, h, &rgba)),
            Err(e) => {
                log::warn!("[assets] {:?}", e);
                registry.record_failure(name);
            }
        }
    }
    log::info!(
        "[assets] {} textures loaded, {} failed",
        registry.len(),
        registry.load_errors().len()
    );
    registry
}
