use crate::arc::Arc;
use crate::constants::{SEGMENT_DIVISOR, SEGMENT_HEAD_COLOR, SEGMENT_POINT_SIZE, SEGMENT_TAIL_COLOR};
use crate::options::Rgb;
use glam::Vec3;
use rand::Rng;

/// Short sub-span of an arc that travels from origin to destination and loops.
///
/// The segment covers `[start + phase, start + phase + segment_sweep]` on its
/// parent arc. `phase` stays in `[0, angular_span)`.
#[derive(Clone, Debug, PartialEq)]
pub struct MovingSegment {
    pub phase: f64,
    pub angular_span: f64,
    pub segment_sweep: f64,
    pub speed: f64,
}

/// Per-vertex data for one point of a moving segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentVertex {
    pub position: Vec3,
    pub color: [f32; 3],
    /// 0 at the tail, approaching 1 at the head.
    pub percent: f32,
    pub size: f32,
}

/// Create the moving segment for `arc` with a random starting phase.
pub fn attach_moving_segment<R: Rng + ?Sized>(arc: &Arc, speed: f64, rng: &mut R) -> MovingSegment {
    let segment_sweep = arc.sweep() / SEGMENT_DIVISOR;
    let angular_span = arc.sweep() - segment_sweep;
    MovingSegment {
        phase: angular_span * rng.gen::<f64>(),
        angular_span,
        segment_sweep,
        speed,
    }
}

impl MovingSegment {
    /// Advance one tick, wrapping to 0 at the end of the usable span.
    #[inline]
    pub fn advance(&mut self) {
        self.phase += self.speed;
        if self.phase >= self.angular_span {
            self.phase = 0.0;
        }
    }

    /// Angle of the trailing end on the parent arc.
    #[inline]
    pub fn tail_angle(&self, arc: &Arc) -> f64 {
        arc.start_angle + self.phase
    }

    /// Angle of the leading end on the parent arc.
    #[inline]
    pub fn head_angle(&self, arc: &Arc) -> f64 {
        self.tail_angle(arc) + self.segment_sweep
    }

    /// `divisions + 1` world-space vertices from tail to head, with the size
    /// taper and the two-stop color gradient applied.
    pub fn vertices(&self, arc: &Arc, divisions: usize) -> Vec<SegmentVertex> {
        let n = divisions.max(1);
        let count = n + 1;
        let tail = Rgb::from_hex(SEGMENT_TAIL_COLOR);
        let head = Rgb::from_hex(SEGMENT_HEAD_COLOR);
        let step = self.segment_sweep / n as f64;
        let start = self.tail_angle(arc);
        (0..count)
            .map(|i| {
                let percent = i as f32 / count as f32;
                SegmentVertex {
                    position: arc.point_at(start + step * i as f64).as_vec3(),
                    color: tail.lerp(head, percent).to_array(),
                    percent,
                    size: percent * SEGMENT_POINT_SIZE,
                }
            })
            .collect()
    }
}
