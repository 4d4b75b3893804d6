//! Configuration for camera limits, animation timing and marker motion
//!
//! Options are plain serde values with defaults for every field, so a host
//! can load a partial JSON document and get a complete configuration back.
//! Presets are available through [`AnimationProfile`].

use crate::animation::easing::EasingCurve;
use crate::core::constants::{
    DEFAULT_FIT_MAX_ZOOM, DEFAULT_FIT_PADDING, DEFAULT_FLY_DURATION_MS,
    DEFAULT_MARKER_PERIOD_MS, DEFAULT_ROTATE_DURATION_MS, DEFAULT_ZOOM_DURATION_MS, MAX_ZOOM,
    MIN_ZOOM,
};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnimationProfile {
    Balanced,
    Snappy,
    Cinematic,
    Custom(AnimationConfig),
}

impl AnimationProfile {
    pub fn resolve(&self) -> AnimationConfig {
        match self {
            Self::Balanced => AnimationConfig::default(),
            Self::Snappy => AnimationConfig {
                fly_duration_ms: 500,
                zoom_duration_ms: 180,
                rotate_duration_ms: 250,
                fly_easing: EasingCurve::EaseOutCubic,
                zoom_easing: EasingCurve::FastOutSlowIn,
                rotate_easing: EasingCurve::EaseOut,
            },
            Self::Cinematic => AnimationConfig {
                fly_duration_ms: 2_500,
                zoom_duration_ms: 450,
                rotate_duration_ms: 900,
                fly_easing: EasingCurve::EaseInOutCubic,
                zoom_easing: EasingCurve::Decelerate,
                rotate_easing: EasingCurve::EaseInOutQuad,
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

/// Timing and curves for programmatic camera motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub fly_duration_ms: u64,
    pub zoom_duration_ms: u64,
    pub rotate_duration_ms: u64,
    pub fly_easing: EasingCurve,
    /// The fast curve used by relative zoom steps
    pub zoom_easing: EasingCurve,
    pub rotate_easing: EasingCurve,
}

impl AnimationConfig {
    pub fn fly_duration(&self) -> Duration {
        Duration::from_millis(self.fly_duration_ms)
    }

    pub fn zoom_duration(&self) -> Duration {
        Duration::from_millis(self.zoom_duration_ms)
    }

    pub fn rotate_duration(&self) -> Duration {
        Duration::from_millis(self.rotate_duration_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fly_duration_ms: DEFAULT_FLY_DURATION_MS,
            zoom_duration_ms: DEFAULT_ZOOM_DURATION_MS,
            rotate_duration_ms: DEFAULT_ROTATE_DURATION_MS,
            fly_easing: EasingCurve::EaseInOut,
            zoom_easing: EasingCurve::FastOutSlowIn,
            rotate_easing: EasingCurve::EaseInOut,
        }
    }
}

/// Zoom limits applied to relative zoom steps and fits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraLimits {
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    pub padding: f64,
    pub max_zoom: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_FIT_PADDING,
            max_zoom: DEFAULT_FIT_MAX_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerAnimationConfig {
    /// Length of one full marker animation cycle
    pub period_ms: u64,
    pub enabled: bool,
}

impl Default for MarkerAnimationConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_MARKER_PERIOD_MS,
            enabled: true,
        }
    }
}

/// Top level map configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub camera: CameraLimits,
    pub animation: AnimationConfig,
    pub fit: FitConfig,
    pub markers: MarkerAnimationConfig,
    /// Name of the color theme applied to base tiles
    pub theme: Option<String>,
}

impl MapOptions {
    pub fn with_profile(profile: AnimationProfile) -> Self {
        Self {
            animation: profile.resolve(),
            ..Self::default()
        }
    }

    /// Parses options from JSON; missing fields fall back to defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: MapOptions = serde_json::from_str(json)?;
        Ok(options.sanitized())
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replaces out-of-range values with safe defaults
    pub fn sanitized(mut self) -> Self {
        let limits = &mut self.camera;
        if !(limits.min_zoom.is_finite() && limits.max_zoom.is_finite())
            || limits.min_zoom > limits.max_zoom
        {
            log::warn!(
                "invalid zoom limits [{}, {}], using defaults",
                limits.min_zoom,
                limits.max_zoom
            );
            *limits = CameraLimits::default();
        }

        if !self.fit.padding.is_finite() || self.fit.padding < 0.0 {
            log::warn!("invalid fit padding {}, using default", self.fit.padding);
            self.fit.padding = DEFAULT_FIT_PADDING;
        }
        self.fit.max_zoom = self
            .fit
            .max_zoom
            .clamp(self.camera.min_zoom, self.camera.max_zoom);

        if self.markers.period_ms == 0 {
            log::warn!("marker period must be positive, using default");
            self.markers.period_ms = DEFAULT_MARKER_PERIOD_MS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let options = MapOptions::from_json_str(r#"{ "animation": { "fly_duration_ms": 2000 } }"#)
            .unwrap();
        assert_eq!(options.animation.fly_duration_ms, 2000);
        assert_eq!(options.animation.zoom_duration_ms, DEFAULT_ZOOM_DURATION_MS);
        assert_eq!(options.camera, CameraLimits::default());
    }

    #[test]
    fn test_invalid_values_are_sanitized() {
        let options = MapOptions::from_json_str(
            r#"{ "camera": { "min_zoom": 10, "max_zoom": 3 }, "fit": { "padding": -5 }, "markers": { "period_ms": 0 } }"#,
        )
        .unwrap();
        assert_eq!(options.camera, CameraLimits::default());
        assert_eq!(options.fit.padding, DEFAULT_FIT_PADDING);
        assert_eq!(options.markers.period_ms, DEFAULT_MARKER_PERIOD_MS);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(MapOptions::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let options = MapOptions::with_profile(AnimationProfile::Cinematic);
        let json = options.to_json_string().unwrap();
        assert_eq!(MapOptions::from_json_str(&json).unwrap(), options);
    }

    #[test]
    fn test_profiles_resolve() {
        assert_eq!(AnimationProfile::Balanced.resolve(), AnimationConfig::default());
        assert!(
            AnimationProfile::Snappy.resolve().fly_duration_ms
                < AnimationProfile::Cinematic.resolve().fly_duration_ms
        );
    }
}
