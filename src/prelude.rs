//! Prelude module for common mapcn types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapcn::prelude::*;`

pub use crate::core::{
    config::{
        AnimationConfig, AnimationProfile, CameraLimits, FitConfig, MapOptions,
        MarkerAnimationConfig,
    },
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::AnimatedMap,
    viewport::{CameraState, Viewport},
};

pub use crate::animation::{
    AnimationChannel, AnimationEngine, EasingCurve, FrameScheduler, Interpolatable,
    ManualFrameScheduler,
};

pub use crate::camera::{
    CameraController, CameraOperation, StopCallback, TourHandle, TourOutcome, TourStop,
};

pub use crate::marker::{
    paint_marker, MarkerPainter, MarkerPhase, MarkerSpec, MarkerStyleConfig, MarkerStyleKind,
};

pub use crate::route::{
    simplify_route, RouteRenderer, RouteSpec, RouteStyleConfig, RouteStyleKind, RouteUtils,
};

pub use crate::rendering::{
    CameraSurface, Color, DrawCommand, HeadlessSurface, RenderContext, Stroke, StrokePattern,
};

pub use crate::theme::{ColorMatrix, MapcnThemes};

pub use crate::tiles::{tile_screen_rect, visible_tiles, TileErrorBanner, TileUrlTemplate};

#[cfg(feature = "render")]
pub use crate::tiles::{ThemedTileLayer, TileRasterSource};

pub use crate::{Error as MapError, Result};

pub use instant::Instant;
pub use std::{sync::Arc, time::Duration};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

#[cfg(feature = "tokio-runtime")]
pub use futures::Future;
