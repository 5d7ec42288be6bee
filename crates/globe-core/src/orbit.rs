//! Optional satellite rings circling the globe.

use crate::constants::*;
use glam::{DQuat, DVec3};
use std::f64::consts::TAU;

/// Points on a horizontal (XZ) circle, rounded to two decimals.
///
/// Stops just short of a full turn so the last point doesn't duplicate the
/// first; `closed` appends the first point again.
pub fn circle_points(radius: f64, count: usize, closed: bool) -> Vec<DVec3> {
    let round2 = |v: f64| (v * 100.0).round() / 100.0;
    let step = TAU / count.max(1) as f64;
    let mut out = Vec::new();
    let mut j = 0.0;
    while j < TAU - 0.1 {
        out.push(DVec3::new(round2(j.cos() * radius), 0.0, round2(j.sin() * radius)));
        j += step;
    }
    if closed {
        if let Some(first) = out.first().copied() {
            out.push(first);
        }
    }
    out
}

/// One tilted ring carrying evenly spread satellites.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitRing {
    pub points: Vec<DVec3>,
    pub scale: f64,
    pub tilt_z: f64,
    /// Accumulated spin about the ring's own Y axis.
    pub spin: f64,
    pub satellites: Vec<usize>,
    pub satellite_color: u32,
}

impl OrbitRing {
    pub fn transform(&self) -> DQuat {
        DQuat::from_rotation_z(self.tilt_z) * DQuat::from_rotation_y(self.spin)
    }

    /// World-space (globe-local) satellite positions.
    pub fn satellite_positions(&self) -> Vec<DVec3> {
        let q = self.transform();
        self.satellites
            .iter()
            .filter_map(|&i| self.points.get(i))
            .map(|p| q * (*p * self.scale))
            .collect()
    }

    /// Ring outline in globe-local space.
    pub fn outline(&self) -> Vec<DVec3> {
        let q = self.transform();
        self.points.iter().map(|p| q * (*p * self.scale)).collect()
    }
}

/// Indices of `count` satellites spread along a ring of `len` points.
pub fn satellite_indices(len: usize, count: usize) -> Vec<usize> {
    if len == 0 || count == 0 {
        return Vec::new();
    }
    let stride = len / count;
    (0..count).map(|i| (stride * (i + 1)) % len).collect()
}

/// Build the three rings at `globe_radius + 15`.
pub fn build_rings(globe_radius: f64, satellites: usize) -> Vec<OrbitRing> {
    let points = circle_points(globe_radius + ORBIT_RADIUS_OFFSET, ORBIT_RING_POINTS, true);
    let satellites = satellite_indices(points.len(), satellites);
    ORBIT_RING_SCALES
        .iter()
        .zip(ORBIT_RING_TILTS.iter())
        .zip(ORBIT_SATELLITE_COLORS.iter())
        .map(|((&scale, &tilt_z), &satellite_color)| OrbitRing {
            points: points.clone(),
            scale,
            tilt_z,
            spin: 0.0,
            satellites: satellites.clone(),
            satellite_color,
        })
        .collect()
}
