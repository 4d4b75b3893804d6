//! # mapcn
//!
//! Animated map surface: themed raster tiles, procedurally animated markers
//! and styled routes under programmatic camera control.
//!
//! The crate is frame driven. A host owns one [`AnimatedMap`], calls
//! [`AnimatedMap::frame`] once per display frame with its frame clock, and
//! paints the returned [`DrawCommand`]s. Camera requests go through the
//! [`CameraController`] and either run immediately or wait until the surface
//! reports that it is ready.

pub mod animation;
pub mod camera;
pub mod core;
pub mod marker;
pub mod prelude;
pub mod rendering;
pub mod route;
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
pub mod theme;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{AnimationConfig, AnimationProfile, CameraLimits, FitConfig, MapOptions},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::AnimatedMap,
    viewport::{CameraState, Viewport},
};

pub use animation::{AnimationChannel, AnimationEngine, EasingCurve};

pub use camera::{CameraController, CameraOperation, TourHandle, TourOutcome, TourStop};

pub use marker::{MarkerPainter, MarkerSpec, MarkerStyleConfig, MarkerStyleKind};

pub use rendering::{CameraSurface, Color, DrawCommand, HeadlessSurface, Stroke};

pub use route::{RouteRenderer, RouteSpec, RouteStyleConfig, RouteStyleKind, RouteUtils};

pub use theme::{ColorMatrix, MapcnThemes};

pub use tiles::{TileErrorBanner, TileUrlTemplate};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("Failed to load tile {coord}: {reason}")]
    TileLoad { coord: TileCoord, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "render")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Error type alias for convenience
pub type Error = MapError;
