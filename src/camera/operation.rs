use crate::animation::easing::EasingCurve;
use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A deferred camera request. Requests issued before the surface is ready are
/// stored as values of this type and replayed in order once it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraOperation {
    FlyTo {
        target: LatLng,
        zoom: f64,
        duration: Duration,
        easing: EasingCurve,
    },
    JumpTo {
        target: LatLng,
        zoom: Option<f64>,
    },
    /// Relative zoom change, resolved at execution time against the running
    /// flight's destination, or the camera when nothing is in flight
    ZoomStep { delta: f64 },
    RotateTo { degrees: f64, duration: Duration },
    FitAllPoints {
        points: Vec<LatLng>,
        padding: f64,
        max_zoom: f64,
    },
}

impl CameraOperation {
    pub fn fly_to(target: LatLng, zoom: f64, duration: Duration, easing: EasingCurve) -> Self {
        Self::FlyTo {
            target,
            zoom,
            duration,
            easing,
        }
    }

    pub fn rotate_to(degrees: f64, duration: Duration) -> Self {
        Self::RotateTo {
            degrees,
            duration,
        }
    }

    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::FlyTo { .. } => "fly_to",
            Self::JumpTo { .. } => "jump_to",
            Self::ZoomStep { .. } => "zoom_step",
            Self::RotateTo { .. } => "rotate_to",
            Self::FitAllPoints { .. } => "fit_all_points",
        }
    }
}
