use crate::core::geo::{LatLng, LatLngBounds};
use crate::route::{simplify::simplify_route, style::RouteStyleConfig, utils::RouteUtils};
use serde::{Deserialize, Serialize};

/// A route drawn on the map.
///
/// Distance, centroid and bounds are derived from `points` on every call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteSpec {
    pub id: Option<String>,
    pub points: Vec<LatLng>,
    #[serde(default)]
    pub style: RouteStyleConfig,
    pub label: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl RouteSpec {
    pub fn new(points: Vec<LatLng>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..self
        }
    }

    pub fn with_style(self, style: RouteStyleConfig) -> Self {
        Self { style, ..self }
    }

    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..self
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn total_distance_km(&self) -> f64 {
        RouteUtils::total_distance(&self.points)
    }

    pub fn centroid(&self) -> LatLng {
        RouteUtils::centroid(&self.points)
    }

    pub fn bounds(&self) -> Option<LatLngBounds> {
        RouteUtils::bounds(&self.points)
    }

    pub fn start(&self) -> Option<LatLng> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<LatLng> {
        self.points.last().copied()
    }

    /// Whether the route has enough points to be drawn
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Same route with Douglas-Peucker simplified points (`tolerance` in km)
    pub fn simplified(&self, tolerance: f64) -> Self {
        Self {
            points: simplify_route(&self.points, tolerance),
            ..self.clone()
        }
    }
}

impl From<geo_types::LineString<f64>> for RouteSpec {
    fn from(line: geo_types::LineString<f64>) -> Self {
        Self::new(line.0.into_iter().map(LatLng::from).collect())
    }
}

impl From<&RouteSpec> for geo_types::LineString<f64> {
    fn from(route: &RouteSpec) -> Self {
        route
            .points
            .iter()
            .map(|p| geo_types::Coord::from(*p))
            .collect::<Vec<_>>()
            .into()
    }
}
