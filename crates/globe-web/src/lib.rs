#![cfg(target_arch = "wasm32")]
use globe_core::{default_routes, Camera, Globe, GlobeOptions, LabelStyle};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod assets;
mod constants;
mod dom;
mod frame;
mod labels;
mod render;

use frame::{FrameContext, FrameLoop};
use labels::CanvasRasterizer;

/// Where the widget lives on the page and where its images come from.
#[derive(Clone, Debug)]
pub struct WebConfig {
    pub canvas_id: String,
    pub asset_base: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            canvas_id: constants::CANVAS_ID.to_string(),
            asset_base: constants::ASSET_BASE.to_string(),
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("globe-web starting");

    let config = WebConfig::default();
    let auto_mount = dom::window_document()
        .and_then(|d| d.get_element_by_id(&config.canvas_id))
        .is_some();
    if auto_mount {
        spawn_local(async move {
            match init(config).await {
                // Page-owned globe: keep it for the lifetime of the page
                Ok(handle) => std::mem::forget(handle),
                Err(e) => log::error!("init error: {:?}", e),
            }
        });
    }
    Ok(())
}

/// Mount a globe on the canvas with id `canvas_id` (default `globe-canvas`).
#[wasm_bindgen]
pub async fn mount(canvas_id: Option<String>, asset_base: Option<String>) -> Result<GlobeHandle, JsValue> {
    let defaults = WebConfig::default();
    let config = WebConfig {
        canvas_id: canvas_id.unwrap_or(defaults.canvas_id),
        asset_base: asset_base.unwrap_or(defaults.asset_base),
    };
    init(config)
        .await
        .map_err(|e| JsValue::from_str(&format!("{:?}", e)))
}

async fn init(config: WebConfig) -> anyhow::Result<GlobeHandle> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::find_canvas(&document, &config.canvas_id)?;
    dom::sync_canvas_backing_size(&canvas);
    let (scratch_canvas, scratch_ctx) = dom::create_2d_canvas(&document)?;

    let options = GlobeOptions::default();
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas: &'static web_sys::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
    let gpu = render::GpuState::new(leaked_canvas, options.earth.radius as f32).await?;

    let textures = assets::load_textures(&gpu, &scratch_canvas, &scratch_ctx, &config.asset_base).await;
    if textures.has_load_errors() {
        log::warn!("[init] missing textures: {:?}", textures.missing());
    }

    let routes = default_routes();
    let globe = {
        let mut rasterizer = CanvasRasterizer::new(&scratch_canvas, &scratch_ctx, &gpu);
        Globe::new(options, &routes, LabelStyle::default(), &mut rasterizer)
    };
    log::info!(
        "[init] {} fly lines, {} labels",
        globe.scene.fly_lines.len(),
        globe.labels.len()
    );

    let mut camera = Camera::default();
    camera.set_viewport(canvas.width(), canvas.height());

    let ctx = Rc::new(RefCell::new(FrameContext {
        globe,
        gpu: Some(gpu),
        textures,
        camera,
        canvas,
        scratch_canvas,
        scratch_ctx,
        last_instant: Instant::now(),
    }));
    let driver = FrameLoop::start(ctx.clone());
    Ok(GlobeHandle { ctx, driver })
}

/// JS-facing control surface: pause, resume and destroy.
#[wasm_bindgen]
pub struct GlobeHandle {
    ctx: Rc<RefCell<FrameContext<'static>>>,
    driver: FrameLoop,
}

#[wasm_bindgen]
impl GlobeHandle {
    /// Stop ticking and stop the globe's own rotation.
    pub fn pause(&self) {
        self.ctx.borrow_mut().globe.pause();
        self.driver.cancel();
    }

    pub fn resume(&self) {
        let mut ctx = self.ctx.borrow_mut();
        if ctx.globe.resume() {
            ctx.reset_clock();
            drop(ctx);
            self.driver.request();
        }
    }

    #[wasm_bindgen(js_name = isPaused)]
    pub fn is_paused(&self) -> bool {
        !self.ctx.borrow().globe.state().should_tick()
    }

    /// Tear everything down. The handle is inert afterwards.
    pub fn destroy(&self) {
        self.driver.stop();
        self.ctx.borrow_mut().teardown();
    }
}
