pub mod arc;
pub mod arena;
pub mod assets;
pub mod constants;
pub mod error;
pub mod geo;
pub mod globe;
pub mod labels;
pub mod lifecycle;
pub mod markers;
pub mod mesh;
pub mod options;
pub mod orbit;
pub mod projection;
pub mod scene;
pub mod segment;
pub mod state;

// Shaders bundled as string constants
pub static GLOBE_WGSL: &str = include_str!("../../../shaders/globe.wgsl");

pub use arc::{build_arc, Arc};
pub use error::{GlobeError, Result};
pub use geo::{default_routes, GeoPoint, RouteRecord};
pub use globe::Globe;
pub use labels::{LabelCache, LabelHandle, LabelRasterizer, LabelStyle};
pub use options::GlobeOptions;
pub use projection::project;
pub use segment::{attach_moving_segment, MovingSegment};
pub use state::*;
