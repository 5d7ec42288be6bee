// Host page
pub const CANVAS_ID: &str = "globe-canvas";
pub const ASSET_BASE: &str = "assets/images/earth";

// Background clear color (linear)
pub const CLEAR_COLOR: [f64; 3] = [0.005, 0.01, 0.03];

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

// Upper bound on dt fed to the scene after a tab was hidden
pub const MAX_FRAME_DT_SEC: f32 = 0.1;
