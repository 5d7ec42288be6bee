use crate::arena::Arena;
use crate::constants::{LABEL_OFFSET, MARKER_LIFT};
use crate::error::{GlobeError, Result};
use crate::geo::{unique_names, RouteRecord};
use crate::labels::{LabelCache, LabelHandle, LabelRasterizer, LabelStyle};
use crate::lifecycle::LoopState;
use crate::options::GlobeOptions;
use crate::projection::project;
use crate::scene::{billboard, GlobeScene};
use crate::state::Camera;
use glam::Mat4;
use std::rc::Rc;

/// The whole widget minus the platform: scene, city labels and loop state.
///
/// `I` is the rasterizer's image type. The label cache lives and dies with the
/// globe; [`Globe::teardown`] releases everything it created.
pub struct Globe<I> {
    pub scene: GlobeScene,
    pub labels: Arena<LabelHandle<I>>,
    pub label_style: LabelStyle,
    cache: LabelCache<I>,
    state: LoopState,
}

impl<I> Globe<I> {
    /// Build the scene and a label for every distinct city name.
    ///
    /// A label that fails to rasterize is logged and left out; the rest of the
    /// scene is still built.
    pub fn new<R>(options: GlobeOptions, routes: &[RouteRecord], label_style: LabelStyle, rasterizer: &mut R) -> Self
    where
        R: LabelRasterizer<Image = I>,
    {
        let state = LoopState::new(options.start_paused);
        let radius = options.earth.radius;
        let scene = GlobeScene::build(options, routes);

        let mut cache = LabelCache::new();
        let mut labels = Arena::new();
        for city in unique_names(routes) {
            match cache.get_label(rasterizer, &city.name, &label_style) {
                Ok(mut handle) => {
                    handle.position =
                        project(radius * MARKER_LIFT, city.longitude_deg, city.latitude_deg) * LABEL_OFFSET;
                    labels.alloc(handle);
                }
                Err(e) => log::error!("[globe] label for {} skipped: {}", city.name, e),
            }
        }
        log::debug!("[globe] {} labels, {} cached images", labels.len(), cache.len());

        Self {
            scene,
            labels,
            label_style,
            cache,
            state,
        }
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn cache(&self) -> &LabelCache<I> {
        &self.cache
    }

    /// Run one frame. `Ok(false)` while paused.
    pub fn tick(&mut self, dt_sec: f32) -> Result<bool> {
        match self.state {
            LoopState::Destroyed => Err(GlobeError::Destroyed),
            LoopState::Paused => Ok(false),
            LoopState::Running => {
                self.scene.tick(dt_sec);
                Ok(true)
            }
        }
    }

    pub fn pause(&mut self) {
        self.state.pause();
        self.scene.pause_rotation();
    }

    /// Returns true when the driver has to restart its frame requests.
    pub fn resume(&mut self) -> bool {
        if self.state.is_destroyed() {
            return false;
        }
        self.scene.resume_rotation();
        self.state.resume()
    }

    /// Camera-facing label sprites in world space.
    pub fn label_instances(&self, camera: &Camera) -> Vec<(Rc<I>, Mat4)> {
        let group = self.scene.group_transform();
        let scale = self.scene.intro.scale();
        let axes = camera.billboard_axes();
        self.labels
            .iter()
            .map(|l| {
                let size = l.sprite_size().as_vec2() * scale;
                let center = group.transform_point3(l.position.as_vec3());
                (Rc::clone(&l.image), billboard(center, size.x, size.y, axes))
            })
            .collect()
    }

    /// Stop ticking and release every label image; the scene is emptied.
    pub fn teardown<R>(&mut self, rasterizer: &mut R)
    where
        R: LabelRasterizer<Image = I>,
    {
        self.state.destroy();
        self.labels.clear();
        self.cache.clear(rasterizer);
        self.scene.clear();
        log::info!("[globe] torn down");
    }
}
