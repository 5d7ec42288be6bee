//! Loop state and the small time-based animations around the scene.

use crate::constants::{GLOW_TIME_RANGE, INTRO_DURATION_SEC};

/// Driving-loop state. `Destroyed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Paused,
    Destroyed,
}

impl LoopState {
    pub fn new(start_paused: bool) -> Self {
        if start_paused {
            LoopState::Paused
        } else {
            LoopState::Running
        }
    }

    pub fn pause(&mut self) {
        if *self == LoopState::Running {
            *self = LoopState::Paused;
        }
    }

    /// Returns true when the caller has to schedule a new frame.
    pub fn resume(&mut self) -> bool {
        match self {
            LoopState::Paused => {
                *self = LoopState::Running;
                true
            }
            _ => false,
        }
    }

    pub fn destroy(&mut self) {
        *self = LoopState::Destroyed;
    }

    #[inline]
    pub fn should_tick(self) -> bool {
        self == LoopState::Running
    }

    /// A paused loop stops requesting frames until resumed.
    #[inline]
    pub fn should_schedule(self) -> bool {
        self == LoopState::Running
    }

    #[inline]
    pub fn is_destroyed(self) -> bool {
        self == LoopState::Destroyed
    }
}

/// power2.out easing.
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Grows the globe group from nothing to full size when it first appears.
#[derive(Clone, Debug, PartialEq)]
pub struct IntroAnimation {
    elapsed: f32,
    duration: f32,
}

impl Default for IntroAnimation {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            duration: INTRO_DURATION_SEC,
        }
    }
}

impl IntroAnimation {
    pub fn advance(&mut self, dt_sec: f32) {
        self.elapsed = (self.elapsed + dt_sec.max(0.0)).min(self.duration);
    }

    pub fn scale(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ease_out_quad(self.elapsed / self.duration)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Earth shader clock: counts down one unit per tick and wraps to the top.
#[derive(Clone, Debug, PartialEq)]
pub struct GlowClock {
    pub value: f32,
}

impl Default for GlowClock {
    fn default() -> Self {
        Self {
            value: GLOW_TIME_RANGE,
        }
    }
}

impl GlowClock {
    pub fn tick(&mut self) {
        self.value = if self.value < -GLOW_TIME_RANGE {
            GLOW_TIME_RANGE
        } else {
            self.value - 1.0
        };
    }
}
