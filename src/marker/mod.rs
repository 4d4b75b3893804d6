pub mod painter;
pub mod style;

pub use painter::{paint_marker, MarkerPainter, MarkerPhase};
pub use style::{MarkerStyleConfig, MarkerStyleKind};

use crate::core::geo::LatLng;
use crate::rendering::context::Color;
use serde::{Deserialize, Serialize};

/// A marker placed on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub id: String,
    pub position: LatLng,
    pub color: Color,
    #[serde(default)]
    pub style: MarkerStyleConfig,
}

impl MarkerSpec {
    pub fn new(id: impl Into<String>, position: LatLng, color: Color) -> Self {
        Self {
            id: id.into(),
            position,
            color,
            style: MarkerStyleConfig::default(),
        }
    }

    pub fn with_style(self, style: MarkerStyleConfig) -> Self {
        Self { style, ..self }
    }
}
