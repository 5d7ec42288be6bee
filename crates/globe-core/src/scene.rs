//! Scene state: every arc and marker in flat arenas, advanced once per tick,
//! plus the plain-data draw lists the renderer consumes.

use crate::arc::{build_arc, Arc};
use crate::arena::Arena;
use crate::assets::TextureName;
use crate::constants::*;
use crate::geo::{edges, unique_places, RouteRecord};
use crate::lifecycle::{GlowClock, IntroAnimation};
use crate::markers::{PillarMarker, PointMarker, WaveMarker};
use crate::options::{GlobeOptions, Rgb};
use crate::orbit::{build_rings, OrbitRing};
use crate::segment::{attach_moving_segment, MovingSegment};
use crate::state::Camera;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// An arc with the segment travelling along it.
#[derive(Clone, Debug, PartialEq)]
pub struct FlyLine {
    pub origin: String,
    pub destination: String,
    pub arc: Arc,
    pub segment: MovingSegment,
}

impl FlyLine {
    #[inline]
    pub fn advance(&mut self) {
        self.segment.advance();
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: Vec3,
    pub color: [f32; 4],
}

/// A textured unit quad (XY plane, centered) placed by `model`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadInstance {
    pub model: Mat4,
    pub color: [f32; 4],
    pub texture: TextureName,
}

/// Model matrix for a camera-facing quad centered at `center`.
#[inline]
pub fn billboard(center: Vec3, width: f32, height: f32, axes: (Vec3, Vec3)) -> Mat4 {
    let (right, up) = axes;
    Mat4::from_cols(
        (right * width).extend(0.0),
        (up * height).extend(0.0),
        right.cross(up).extend(0.0),
        center.extend(1.0),
    )
}

pub struct GlobeScene {
    pub options: GlobeOptions,
    pub fly_lines: Arena<FlyLine>,
    pub points: Arena<PointMarker>,
    pub pillars: Arena<PillarMarker>,
    pub waves: Arena<WaveMarker>,
    pub rings: Vec<OrbitRing>,
    pub rotation_y: f64,
    pub is_rotation: bool,
    pub intro: IntroAnimation,
    pub glow: GlowClock,
}

impl GlobeScene {
    pub fn build(options: GlobeOptions, routes: &[RouteRecord]) -> Self {
        let radius = options.earth.radius;
        let mut rng = StdRng::seed_from_u64(options.seed);

        let mut fly_lines = Arena::new();
        for edge in edges(routes) {
            let arc = build_arc(radius, edge.origin, edge.destination);
            let segment = attach_moving_segment(&arc, options.fly_line.speed, &mut rng);
            fly_lines.alloc(FlyLine {
                origin: edge.origin.name.clone(),
                destination: edge.destination.name.clone(),
                arc,
                segment,
            });
        }

        let mut points = Arena::new();
        let mut pillars = Arena::new();
        let mut waves = Arena::new();
        for (place, role) in unique_places(routes) {
            points.alloc(PointMarker::place(radius, place));
            pillars.alloc(PillarMarker::place(radius, place, role, &options.punctuation));
            waves.alloc(WaveMarker::place(radius, place, &mut rng));
        }

        let rings = if options.satellite.show {
            build_rings(radius, options.satellite.number)
        } else {
            Vec::new()
        };

        log::debug!(
            "[scene] built {} fly lines, {} markers, {} rings",
            fly_lines.len(),
            points.len(),
            rings.len()
        );

        Self {
            is_rotation: options.earth.is_rotation,
            options,
            fly_lines,
            points,
            pillars,
            waves,
            rings,
            rotation_y: 0.0,
            intro: IntroAnimation::default(),
            glow: GlowClock::default(),
        }
    }

    /// Advance every animated element by one frame.
    pub fn tick(&mut self, dt_sec: f32) {
        for fl in self.fly_lines.iter_mut() {
            fl.advance();
        }
        if self.is_rotation {
            self.rotation_y += self.options.earth.rotate_speed;
        }
        for ring in &mut self.rings {
            ring.spin += self.options.satellite.rotate_speed;
        }
        self.glow.tick();
        for wave in self.waves.iter_mut() {
            wave.tick();
        }
        self.intro.advance(dt_sec);
    }

    pub fn pause_rotation(&mut self) {
        self.is_rotation = false;
    }

    pub fn resume_rotation(&mut self) {
        self.is_rotation = true;
    }

    /// Globe-local to world: intro scale, then the spin about Y.
    pub fn group_transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.intro.scale()),
            Quat::from_rotation_y(self.rotation_y as f32),
            Vec3::ZERO,
        )
    }

    /// Every static arc as a line list in world space.
    pub fn arc_vertices(&self) -> Vec<LineVertex> {
        let group = self.group_transform();
        let color = Rgb::from_hex(self.options.fly_line.color).with_alpha(1.0);
        let mut out = Vec::with_capacity(self.fly_lines.len() * ARC_SAMPLES * 2);
        for fl in self.fly_lines.iter() {
            let pts: Vec<Vec3> = fl
                .arc
                .sample(ARC_SAMPLES)
                .into_iter()
                .map(|p| group.transform_point3(p.as_vec3()))
                .collect();
            for w in pts.windows(2) {
                out.push(LineVertex { position: w[0], color });
                out.push(LineVertex { position: w[1], color });
            }
        }
        out
    }

    /// Ring outlines as a line list in world space.
    pub fn ring_vertices(&self) -> Vec<LineVertex> {
        let group = self.group_transform();
        let color = Rgb::from_hex(ORBIT_RING_COLOR).with_alpha(0.4);
        let mut out = Vec::new();
        for ring in &self.rings {
            let pts: Vec<Vec3> = ring
                .outline()
                .into_iter()
                .map(|p| group.transform_point3(p.as_vec3()))
                .collect();
            for w in pts.windows(2) {
                out.push(LineVertex { position: w[0], color });
                out.push(LineVertex { position: w[1], color });
            }
        }
        out
    }

    /// Moving-segment points as camera-facing sprites, tail tapering to zero.
    pub fn segment_instances(&self, camera: &Camera) -> Vec<QuadInstance> {
        let group = self.group_transform();
        let scale = self.intro.scale();
        let axes = camera.billboard_axes();
        let tint = Rgb::from_hex(self.options.fly_line.fly_line_color);
        let mut out = Vec::with_capacity(self.fly_lines.len() * (SEGMENT_SAMPLES + 1));
        for fl in self.fly_lines.iter() {
            for v in fl.segment.vertices(&fl.arc, SEGMENT_SAMPLES) {
                let size = v.size * scale;
                let color = [v.color[0] * tint.r, v.color[1] * tint.g, v.color[2] * tint.b, 1.0];
                out.push(QuadInstance {
                    model: billboard(group.transform_point3(v.position), size, size, axes),
                    color,
                    texture: TextureName::Gradient,
                });
            }
        }
        out
    }

    /// Point badges, pillar panels and wave rings.
    pub fn marker_instances(&self) -> Vec<QuadInstance> {
        let group = self.group_transform();
        let badge = Rgb::from_hex(self.options.punctuation.circle_color).with_alpha(1.0);
        let wave_color = Rgb::from_hex(WAVE_MARKER_COLOR);
        let mut out = Vec::with_capacity(self.points.len() * 4);
        for p in self.points.iter() {
            out.push(QuadInstance {
                model: group * p.model_matrix(),
                color: badge,
                texture: TextureName::Label,
            });
        }
        for pillar in self.pillars.iter() {
            let color = Rgb::from_hex(pillar.color).with_alpha(1.0);
            for m in pillar.panel_matrices() {
                out.push(QuadInstance {
                    model: group * m,
                    color,
                    texture: TextureName::LightColumn,
                });
            }
        }
        for w in self.waves.iter() {
            out.push(QuadInstance {
                model: group * w.model_matrix(),
                color: wave_color.with_alpha(w.opacity as f32),
                texture: TextureName::Aperture,
            });
        }
        out
    }

    /// Satellites as small camera-facing dots, plus the earth glow halo.
    pub fn sprite_instances(&self, camera: &Camera) -> Vec<QuadInstance> {
        let group = self.group_transform();
        let scale = self.intro.scale();
        let axes = camera.billboard_axes();
        let mut out = Vec::new();

        let glow = (self.options.earth.radius * GLOW_SPRITE_SCALE) as f32 * scale;
        out.push(QuadInstance {
            model: billboard(Vec3::ZERO, glow, glow, axes),
            color: Rgb::from_hex(GLOW_COLOR).with_alpha(GLOW_OPACITY),
            texture: TextureName::Glow,
        });

        let size = (self.options.satellite.size * 2.0) as f32 * scale;
        for ring in &self.rings {
            let color = Rgb::from_hex(ring.satellite_color).with_alpha(1.0);
            for p in ring.satellite_positions() {
                out.push(QuadInstance {
                    model: billboard(group.transform_point3(p.as_vec3()), size, size, axes),
                    color,
                    texture: TextureName::Gradient,
                });
            }
        }
        out
    }

    /// Drop every arc, marker and ring.
    pub fn clear(&mut self) {
        self.fly_lines.clear();
        self.points.clear();
        self.pillars.clear();
        self.waves.clear();
        self.rings.clear();
    }
}
