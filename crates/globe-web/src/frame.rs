use crate::constants::MAX_FRAME_DT_SEC;
use crate::dom;
use crate::labels::CanvasRasterizer;
use crate::render::{DrawBatch, FrameData, Globals, GpuState, GpuTexture, InstanceRaw, MeshKind};
use globe_core::assets::{TextureName, TextureRegistry};
use globe_core::constants::GLOW_COLOR;
use globe_core::options::Rgb;
use globe_core::scene::QuadInstance;
use globe_core::{Camera, Globe};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub globe: Globe<GpuTexture>,
    pub gpu: Option<GpuState<'a>>,
    pub textures: TextureRegistry<GpuTexture>,
    pub camera: Camera,

    pub canvas: web::HtmlCanvasElement,
    pub scratch_canvas: web::HtmlCanvasElement,
    pub scratch_ctx: web::CanvasRenderingContext2d,

    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    /// Tick and draw once. Returns whether the loop should request another frame.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        match self.globe.tick(dt_sec) {
            Ok(true) => {}
            Ok(false) => return false,
            Err(e) => {
                log::debug!("[frame] stopping: {}", e);
                return false;
            }
        }

        dom::sync_canvas_backing_size(&self.canvas);
        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.camera.set_viewport(w, h);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize_if_needed(w, h);
            if let Err(e) = draw(gpu, &self.globe, &self.textures, &self.camera) {
                log::error!("render error: {:?}", e);
            }
        }
        self.globe.state().should_schedule()
    }

    /// Drop the dt accumulated while paused so the intro does not jump.
    pub fn reset_clock(&mut self) {
        self.last_instant = Instant::now();
    }

    /// Destroy the globe, its label images, every loaded texture and the GPU
    /// resources, in that order.
    pub fn teardown(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            let mut rasterizer = CanvasRasterizer::new(&self.scratch_canvas, &self.scratch_ctx, &gpu);
            self.globe.teardown(&mut rasterizer);
            self.textures.destroy(|_, tex| tex.destroy());
            gpu.destroy();
        } else {
            log::debug!("[frame] already torn down");
        }
    }
}

/// Close the current run of same-texture quads into a batch.
fn close_run<'t>(
    batches: &mut Vec<DrawBatch<'t>>,
    textures: &'t TextureRegistry<GpuTexture>,
    run: Option<(TextureName, u32)>,
    end: u32,
) {
    if let Some((name, start)) = run {
        if let Ok(texture) = textures.get(name) {
            batches.push(DrawBatch {
                mesh: MeshKind::Quad,
                texture,
                instances: start..end,
            });
        }
    }
}

fn draw(
    gpu: &mut GpuState<'_>,
    globe: &Globe<GpuTexture>,
    textures: &TextureRegistry<GpuTexture>,
    camera: &Camera,
) -> Result<(), wgpu::SurfaceError> {
    let scene = &globe.scene;
    let labels = globe.label_instances(camera);
    let mut instances: Vec<InstanceRaw> = Vec::new();
    let mut batches: Vec<DrawBatch<'_>> = Vec::new();

    if let Ok(earth) = textures.get(TextureName::Earth) {
        instances.push(InstanceRaw::new(scene.group_transform(), Rgb::WHITE.with_alpha(1.0)));
        batches.push(DrawBatch {
            mesh: MeshKind::Sphere,
            texture: earth,
            instances: 0..1,
        });
    }

    let quads: Vec<QuadInstance> = scene
        .marker_instances()
        .into_iter()
        .chain(scene.segment_instances(camera))
        .chain(scene.sprite_instances(camera))
        .collect();
    let mut run: Option<(TextureName, u32)> = None;
    for q in &quads {
        if run.map(|(name, _)| name) != Some(q.texture) {
            close_run(&mut batches, textures, run, instances.len() as u32);
            run = Some((q.texture, instances.len() as u32));
        }
        instances.push(InstanceRaw::new(q.model, q.color));
    }
    close_run(&mut batches, textures, run, instances.len() as u32);

    for (image, model) in &labels {
        let start = instances.len() as u32;
        instances.push(InstanceRaw::new(*model, Rgb::WHITE.with_alpha(1.0)));
        batches.push(DrawBatch {
            mesh: MeshKind::Quad,
            texture: image.as_ref(),
            instances: start..start + 1,
        });
    }

    let mut lines = scene.arc_vertices();
    lines.extend(scene.ring_vertices());

    gpu.render(&FrameData {
        globals: Globals::new(
            camera.view_proj(),
            camera.eye,
            scene.glow.value,
            Rgb::from_hex(GLOW_COLOR).with_alpha(1.0),
        ),
        lines: &lines,
        instances: &instances,
        batches: &batches,
    })
}

/// requestAnimationFrame driver. The closure is built once and reused across
/// pause/resume; it stops requesting frames when [`FrameContext::frame`] says so.
pub struct FrameLoop {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    raf_id: Rc<Cell<Option<i32>>>,
}

fn request_frame(tick: &RefCell<Option<Closure<dyn FnMut()>>>, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else { return };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => raf_id.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}

impl FrameLoop {
    pub fn start(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> Self {
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick_clone = tick.clone();
        let raf_clone = raf_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            raf_clone.set(None);
            let keep_going = frame_ctx.borrow_mut().frame();
            if keep_going {
                request_frame(&tick_clone, &raf_clone);
            }
        }) as Box<dyn FnMut()>));
        let driver = Self { tick, raf_id };
        driver.request();
        driver
    }

    /// Request the next frame unless one is already pending.
    pub fn request(&self) {
        if self.raf_id.get().is_none() {
            request_frame(&self.tick, &self.raf_id);
        }
    }

    pub fn cancel(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
    }

    /// Cancel and drop the closure, breaking its reference cycle.
    pub fn stop(&self) {
        self.cancel();
        self.tick.borrow_mut().take();
    }
}
