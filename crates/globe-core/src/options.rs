//! Scene configuration with the widget's tuned defaults.

/// Linear RGB color in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Decode a `0xRRGGBB` color.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    #[inline]
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> [f32; 4] {
        [self.r, self.g, self.b, a]
    }
}

/// Globe body settings.
///
/// - `radius`: sphere radius in world units; every marker size scales with it
/// - `rotate_speed`: radians added to the globe's Y rotation per tick
/// - `is_rotation`: whether the globe spins on its own
#[derive(Clone, Debug, PartialEq)]
pub struct EarthOptions {
    pub radius: f64,
    pub rotate_speed: f64,
    pub is_rotation: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SatelliteOptions {
    pub show: bool,
    pub rotate_speed: f64,
    pub size: f64,
    pub number: usize,
}

/// Marker colors: badge tint and pillar colors for origin/destination.
#[derive(Clone, Debug, PartialEq)]
pub struct PunctuationOptions {
    pub circle_color: u32,
    pub start_color: u32,
    pub end_color: u32,
}

/// Arc line color, moving-segment tint and per-tick segment speed (radians).
#[derive(Clone, Debug, PartialEq)]
pub struct FlyLineOptions {
    pub color: u32,
    pub fly_line_color: u32,
    pub speed: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlobeOptions {
    pub earth: EarthOptions,
    pub satellite: SatelliteOptions,
    pub punctuation: PunctuationOptions,
    pub fly_line: FlyLineOptions,
    /// Seed for the randomized segment and wave phases.
    pub seed: u64,
    pub start_paused: bool,
}

impl Default for GlobeOptions {
    fn default() -> Self {
        Self {
            earth: EarthOptions {
                radius: 50.0,
                rotate_speed: 0.002,
                is_rotation: true,
            },
            satellite: SatelliteOptions {
                show: false,
                rotate_speed: -0.01,
                size: 1.0,
                number: 2,
            },
            punctuation: PunctuationOptions {
                circle_color: 0x3892ff,
                start_color: 0xe4007f,
                end_color: 0xffffff,
            },
            fly_line: FlyLineOptions {
                color: 0x22d3ee,
                fly_line_color: 0x0cd1eb,
                speed: 0.004,
            },
            seed: 42,
            start_paused: false,
        }
    }
}
