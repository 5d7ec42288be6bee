// Shared geometry and animation tuning constants used by the core and the web frontend.

// Arc construction
pub const ARC_BULGE_FACTOR: f64 = 0.2; // apex height per radian of central angle, in globe radii
pub const ARC_SAMPLES: usize = 80; // spaced divisions along a static arc line
pub const DEGENERATE_EPSILON: f64 = 1e-9; // relative magnitude below which a cross/midpoint is treated as zero
pub const COLLINEAR_EPSILON: f64 = 1e-10; // three-point determinant threshold

// Moving segment
pub const SEGMENT_DIVISOR: f64 = 7.0; // segment sweep = arc sweep / divisor
pub const SEGMENT_SAMPLES: usize = 100; // spaced divisions along a moving segment
pub const SEGMENT_POINT_SIZE: f32 = 1.3; // head point size; the tail tapers to 0
pub const SEGMENT_TAIL_COLOR: u32 = 0xec8f43;
pub const SEGMENT_HEAD_COLOR: u32 = 0xf3ae76;

// Markers (all sizes are multiples of the globe radius)
pub const MARKER_LIFT: f64 = 1.001; // flat badges sit just above the surface
pub const POINT_MARKER_SCALE: f64 = 0.05;
pub const PILLAR_HEIGHT_SCALE: f64 = 0.3;
pub const PILLAR_WIDTH_SCALE: f64 = 0.05;
pub const WAVE_MARKER_SCALE: f64 = 0.12;
pub const WAVE_MARKER_COLOR: u32 = 0xe99f68;

// Wave pulse law
pub const WAVE_PULSE_STEP: f64 = 0.007; // phase increment per tick
pub const WAVE_PULSE_START: f64 = 1.0;
pub const WAVE_PULSE_PEAK: f64 = 1.5;
pub const WAVE_PULSE_END: f64 = 2.0;

// Labels
pub const LABEL_SPRITE_HEIGHT: f64 = 6.0; // world units; width follows the canvas aspect
pub const LABEL_OFFSET: f64 = 1.1; // labels float above the lifted surface point
pub const LABEL_LINE_HEIGHT: f64 = 1.2; // text box height per font pixel

// Earth sphere
pub const EARTH_SEGMENTS: u32 = 32;
pub const EARTH_RINGS: u32 = 32;

// Earth glow sprite
pub const GLOW_SPRITE_SCALE: f64 = 3.0;
pub const GLOW_COLOR: u32 = 0x4390d1;
pub const GLOW_OPACITY: f32 = 0.7;
pub const GLOW_TIME_RANGE: f32 = 100.0; // shader clock runs from +range down to -range

// Satellite rings
pub const ORBIT_RADIUS_OFFSET: f64 = 15.0;
pub const ORBIT_RING_POINTS: usize = 150;
pub const ORBIT_RING_SCALES: [f64; 3] = [1.0, 1.2, 0.8];
pub const ORBIT_RING_TILTS: [f64; 3] = [0.0, std::f64::consts::FRAC_PI_6, -std::f64::consts::FRAC_PI_6];
pub const ORBIT_SATELLITE_COLORS: [u32; 3] = [0xe0b187, 0x628fbb, 0x806bdf];
pub const ORBIT_RING_COLOR: u32 = 0x0c3172;

// Intro animation
pub const INTRO_DURATION_SEC: f32 = 2.0;

// Camera
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_EYE: [f32; 3] = [0.0, 30.0, -250.0];
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 100_000.0;
