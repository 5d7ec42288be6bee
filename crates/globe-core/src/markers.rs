//! Point, pillar and pulsing wave markers placed at projected city coordinates.

use crate::constants::*;
use crate::geo::{CityRole, GeoPoint};
use crate::options::PunctuationOptions;
use crate::projection::{project, surface_orientation};
use glam::{DQuat, DVec3, Mat4, Quat, Vec3};
use rand::Rng;
use smallvec::{smallvec, SmallVec};
use std::f64::consts::FRAC_PI_2;

#[inline]
fn flat_model(position: DVec3, orientation: DQuat, size: f64) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(size as f32),
        orientation.as_quat(),
        position.as_vec3(),
    )
}

/// Small flat badge lying on the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct PointMarker {
    pub position: DVec3,
    pub orientation: DQuat,
    pub size: f64,
}

impl PointMarker {
    pub fn place(radius: f64, at: &GeoPoint) -> Self {
        let position = project(radius * MARKER_LIFT, at.longitude_deg, at.latitude_deg);
        Self {
            position,
            orientation: surface_orientation(position),
            size: radius * POINT_MARKER_SCALE,
        }
    }

    /// Transform for a unit quad in the XY plane facing +Z.
    pub fn model_matrix(&self) -> Mat4 {
        flat_model(self.position, self.orientation, self.size)
    }
}

/// One flat panel of a pillar, turned about the pillar's vertical axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PillarPanel {
    pub turn: f64,
}

/// Vertical light column rooted at the surface, built from two crossed panels.
#[derive(Clone, Debug, PartialEq)]
pub struct PillarMarker {
    pub root: DVec3,
    pub orientation: DQuat,
    pub height: f64,
    pub width: f64,
    pub color: u32,
    pub role: CityRole,
    pub panels: SmallVec<[PillarPanel; 2]>,
}

impl PillarMarker {
    pub fn place(radius: f64, at: &GeoPoint, role: CityRole, colors: &PunctuationOptions) -> Self {
        let root = project(radius, at.longitude_deg, at.latitude_deg);
        Self {
            root,
            orientation: surface_orientation(root),
            height: radius * PILLAR_HEIGHT_SCALE,
            width: radius * PILLAR_WIDTH_SCALE,
            color: match role {
                CityRole::Origin => colors.start_color,
                CityRole::Destination => colors.end_color,
            },
            role,
            panels: smallvec![PillarPanel { turn: 0.0 }, PillarPanel { turn: FRAC_PI_2 }],
        }
    }

    /// Outward direction the pillar extends along.
    #[inline]
    pub fn axis(&self) -> DVec3 {
        self.orientation * DVec3::Z
    }

    /// World position of the pillar's tip.
    #[inline]
    pub fn tip(&self) -> DVec3 {
        self.root + self.axis() * self.height
    }

    /// Transform for a unit quad in the XY plane, one per panel.
    ///
    /// The quad is stood upright along local +Z, lifted so its base sits on the
    /// root, then turned about the vertical axis.
    pub fn panel_matrices(&self) -> SmallVec<[Mat4; 2]> {
        let base = Mat4::from_rotation_translation(self.orientation.as_quat(), self.root.as_vec3());
        let upright = Mat4::from_translation(Vec3::new(0.0, 0.0, (self.height * 0.5) as f32))
            * Mat4::from_quat(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2))
            * Mat4::from_scale(Vec3::new(self.width as f32, self.height as f32, 1.0));
        self.panels
            .iter()
            .map(|p| base * Mat4::from_rotation_z(p.turn as f32) * upright)
            .collect()
    }
}

/// Opacity envelope of a wave pulse: 0 at 1.0, 1 at 1.5, 0 at 2.0.
#[inline]
pub fn wave_opacity(pulse_phase: f64) -> f64 {
    let rise = WAVE_PULSE_PEAK - WAVE_PULSE_START;
    let fall = WAVE_PULSE_END - WAVE_PULSE_PEAK;
    let o = if pulse_phase <= WAVE_PULSE_PEAK {
        (pulse_phase - WAVE_PULSE_START) / rise
    } else {
        1.0 - (pulse_phase - WAVE_PULSE_PEAK) / fall
    };
    o.clamp(0.0, 1.0)
}

/// Flat ring that grows and fades in a loop.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveMarker {
    pub position: DVec3,
    pub orientation: DQuat,
    pub base_size: f64,
    pub pulse_phase: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl WaveMarker {
    pub fn place<R: Rng + ?Sized>(radius: f64, at: &GeoPoint, rng: &mut R) -> Self {
        let position = project(radius * MARKER_LIFT, at.longitude_deg, at.latitude_deg);
        let base_size = radius * WAVE_MARKER_SCALE;
        let pulse_phase = rng.gen::<f64>();
        Self {
            position,
            orientation: surface_orientation(position),
            base_size,
            pulse_phase,
            scale: base_size,
            opacity: wave_opacity(pulse_phase),
        }
    }

    /// Advance the pulse one tick.
    pub fn tick(&mut self) {
        self.pulse_phase += WAVE_PULSE_STEP;
        if self.pulse_phase > WAVE_PULSE_END {
            self.pulse_phase = WAVE_PULSE_START;
        }
        self.scale = self.base_size * self.pulse_phase;
        self.opacity = wave_opacity(self.pulse_phase);
    }

    pub fn model_matrix(&self) -> Mat4 {
        flat_model(self.position, self.orientation, self.scale)
    }
}
