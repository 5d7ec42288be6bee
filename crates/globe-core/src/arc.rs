//! Planar fly-line arcs between two points on the globe.
//!
//! An arc is computed in a local XY frame where both endpoints sit symmetric
//! about the +Y axis, origin on the right and destination on the left. The
//! circle through both endpoints and a raised apex on +Y gives the bulge. A
//! single quaternion carries the local frame back into world space.

use crate::constants::{ARC_BULGE_FACTOR, COLLINEAR_EPSILON, DEGENERATE_EPSILON};
use crate::geo::GeoPoint;
use crate::projection::project;
use glam::{DQuat, DVec2, DVec3};
use std::f64::consts::{FRAC_PI_2, TAU};

/// A circular arc in its local frame plus the rotation placing it in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct Arc {
    pub center: DVec2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Local frame -> world rotation.
    pub orientation: DQuat,
    /// Top of the bulge, in the local frame.
    pub apex: DVec2,
    /// Midpoint of the straight chord between the endpoints, local frame.
    pub chord_midpoint: DVec2,
    /// Great-circle angle between the endpoints, radians.
    pub central_angle: f64,
    degenerate: bool,
}

/// Both endpoints rotated into the shared local frame.
struct LocalFrame {
    start: DVec3,
    end: DVec3,
    orientation: DQuat,
    degenerate: bool,
}

impl LocalFrame {
    fn new(start: DVec3, end: DVec3) -> Self {
        let scale = start.length().max(end.length()).max(f64::MIN_POSITIVE);
        let mut degenerate = false;

        let cross = start.cross(end);
        let normal = if cross.length() > DEGENERATE_EPSILON * scale * scale {
            cross.normalize()
        } else {
            // coincident or antipodal: any plane through both points will do
            degenerate = true;
            let dir = start.normalize_or_zero();
            if dir == DVec3::ZERO {
                DVec3::Z
            } else {
                dir.any_orthonormal_vector()
            }
        };
        let to_xoy = DQuat::from_rotation_arc(normal, DVec3::Z);
        let s1 = to_xoy * start;
        let e1 = to_xoy * end;

        let mid = (s1 + e1) * 0.5;
        let mid_dir = if mid.truncate().length() > DEGENERATE_EPSILON * scale {
            mid
        } else {
            degenerate = true;
            DVec3::new(-s1.y, s1.x, 0.0)
        };
        // rotate about Z only, so both points stay in the XY plane
        let to_y = DQuat::from_rotation_z(FRAC_PI_2 - mid_dir.y.atan2(mid_dir.x));

        Self {
            start: to_y * s1,
            end: to_y * e1,
            orientation: (to_y * to_xoy).inverse(),
            degenerate,
        }
    }
}

/// Circumcenter of three planar points, or their centroid when collinear.
///
/// Returns the center and whether the centroid fallback was taken.
pub fn three_point_center(p1: DVec2, p2: DVec2, p3: DVec2) -> (DVec2, bool) {
    let (l1, l2, l3) = (p1.length_squared(), p2.length_squared(), p3.length_squared());
    let (x1, y1, x2, y2, x3, y3) = (p1.x, p1.y, p2.x, p2.y, p3.x, p3.y);
    let s = x1 * y2 + x2 * y3 + x3 * y1 - x1 * y3 - x2 * y1 - x3 * y2;
    let scale = l1.max(l2).max(l3).max(1.0);
    if s.abs() < COLLINEAR_EPSILON * scale {
        return ((p1 + p2 + p3) / 3.0, true);
    }
    let x = (l2 * y3 + l1 * y2 + l3 * y1 - l2 * y1 - l3 * y2 - l1 * y3) / s / 2.0;
    let y = (l3 * x2 + l2 * x1 + l1 * x3 - l1 * x2 - l2 * x3 - l3 * x1) / s / 2.0;
    (DVec2::new(x, y), false)
}

/// Angle between two directions from the origin; 0 when either is zero.
#[inline]
fn central_angle(a: DVec3, b: DVec3) -> f64 {
    let (ua, ub) = (a.normalize_or_zero(), b.normalize_or_zero());
    if ua == DVec3::ZERO || ub == DVec3::ZERO {
        return 0.0;
    }
    ua.dot(ub).clamp(-1.0, 1.0).acos()
}

/// Build the fly-line arc between two cities on a globe of `radius`.
pub fn build_arc(radius: f64, origin: &GeoPoint, destination: &GeoPoint) -> Arc {
    let start = project(radius, origin.longitude_deg, origin.latitude_deg);
    let end = project(radius, destination.longitude_deg, destination.latitude_deg);
    let arc = Arc::between(radius, start, end);
    if arc.is_degenerate() {
        log::warn!(
            "[arc] {} -> {} is coincident or antipodal; using fallback plane",
            origin.name,
            destination.name
        );
    }
    arc
}

impl Arc {
    /// Build the arc between two world-space points on a sphere of `radius`.
    pub fn between(radius: f64, start: DVec3, end: DVec3) -> Self {
        let frame = LocalFrame::new(start, end);
        let a = frame.start.truncate();
        let b = frame.end.truncate();
        let chord_midpoint = (a + b) * 0.5;

        let central_angle = central_angle(start, end);
        // the frame puts the chord midpoint on +Y
        let apex = DVec2::Y * (radius + central_angle * radius * ARC_BULGE_FACTOR);

        let (center, collinear) = three_point_center(a, b, apex);
        let circle_radius = center.distance(apex);

        let (start_angle, end_angle) = if circle_radius <= DEGENERATE_EPSILON * radius.abs().max(1.0) {
            (FRAC_PI_2, FRAC_PI_2)
        } else {
            let sa = (a - center).y.atan2((a - center).x);
            let mut ea = (b - center).y.atan2((b - center).x);
            while ea < sa {
                ea += TAU;
            }
            (sa, ea)
        };

        Self {
            center,
            radius: circle_radius,
            start_angle,
            end_angle,
            orientation: frame.orientation,
            apex,
            chord_midpoint,
            central_angle,
            degenerate: frame.degenerate || collinear,
        }
    }

    /// Total angular sweep from start to end.
    #[inline]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// True when a coincident/antipodal/collinear fallback was used.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Point on the circle at `angle`, in the local frame.
    #[inline]
    pub fn local_point_at(&self, angle: f64) -> DVec3 {
        DVec3::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
            0.0,
        )
    }

    /// Point on the circle at `angle`, in world space.
    #[inline]
    pub fn point_at(&self, angle: f64) -> DVec3 {
        self.orientation * self.local_point_at(angle)
    }

    /// `divisions + 1` evenly angle-spaced world points from start to end.
    pub fn sample(&self, divisions: usize) -> Vec<DVec3> {
        let n = divisions.max(1);
        let step = self.sweep() / n as f64;
        (0..=n)
            .map(|i| self.point_at(self.start_angle + step * i as f64))
            .collect()
    }

    /// World-space start and end points.
    pub fn endpoints(&self) -> (DVec3, DVec3) {
        (self.point_at(self.start_angle), self.point_at(self.end_angle))
    }

    /// Apex of the bulge in world space.
    pub fn apex_world(&self) -> DVec3 {
        self.orientation * self.apex.extend(0.0)
    }
}
