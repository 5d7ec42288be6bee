use thiserror::Error;

/// Failures surfaced by the globe's collaborators.
///
/// Numeric edge cases in the geometry never show up here; they are absorbed by
/// the arc builder's fallbacks so the scene always stays renderable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GlobeError {
    #[error("asset `{name}` is unavailable")]
    AssetUnavailable { name: String },
    #[error("label rasterization failed: {0}")]
    Rasterize(String),
    #[error("globe has been torn down")]
    Destroyed,
}

pub type Result<T> = std::result::Result<T, GlobeError>;
