use crate::rendering::context::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RouteStyleKind {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Gradient,
    /// Solid stroke revealed progressively through `animation_progress`
    Animated,
}

/// How a route is stroked and decorated.
///
/// Optional fields are `None` when unset; builder methods return a new value
/// and never turn an unset field into a default concrete one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteStyleConfig {
    pub color: Color,
    pub width: f64,
    pub kind: RouteStyleKind,
    pub show_arrows: bool,
    pub arrow_spacing_px: f64,
    pub show_endpoints: bool,
    pub start_color: Option<Color>,
    pub end_color: Option<Color>,
    pub show_glow: bool,
    pub glow_intensity: f64,
    /// `[dash, gap]` lengths
    pub dash_pattern: [f64; 2],
    pub border_color: Option<Color>,
    pub border_width: f64,
    /// Fraction of the route (by arc length) to draw
    pub animation_progress: Option<f64>,
    pub interactive: bool,
}

impl Default for RouteStyleConfig {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0x3b82f6),
            width: 4.0,
            kind: RouteStyleKind::Solid,
            show_arrows: false,
            arrow_spacing_px: 100.0,
            show_endpoints: false,
            start_color: None,
            end_color: None,
            show_glow: false,
            glow_intensity: 0.5,
            dash_pattern: [15.0, 8.0],
            border_color: None,
            border_width: 0.0,
            animation_progress: None,
            interactive: false,
        }
    }
}

impl RouteStyleConfig {
    /// Turn-by-turn style: thick, bordered, glowing, with arrows and endpoints
    pub fn navigation() -> Self {
        Self {
            color: Color::from_hex(0x4285f4),
            width: 6.0,
            show_arrows: true,
            arrow_spacing_px: 80.0,
            show_endpoints: true,
            start_color: Some(Color::from_hex(0x22c55e)),
            end_color: Some(Color::from_hex(0xef4444)),
            show_glow: true,
            glow_intensity: 0.6,
            border_color: Some(Color::WHITE),
            border_width: 2.0,
            interactive: true,
            ..Self::default()
        }
    }

    /// Thin, muted line for context routes
    pub fn subtle() -> Self {
        Self {
            color: Color::from_hex(0x6b7280).with_opacity(0.7),
            width: 2.5,
            ..Self::default()
        }
    }

    pub fn walking() -> Self {
        Self {
            color: Color::from_hex(0x10b981),
            width: 4.0,
            kind: RouteStyleKind::Dotted,
            show_endpoints: true,
            ..Self::default()
        }
    }

    /// Progressive reveal with glow, for a vehicle being followed
    pub fn live_tracking() -> Self {
        Self {
            color: Color::from_hex(0xf97316),
            width: 5.0,
            kind: RouteStyleKind::Animated,
            show_arrows: true,
            arrow_spacing_px: 120.0,
            show_endpoints: true,
            show_glow: true,
            glow_intensity: 0.8,
            animation_progress: Some(0.0),
            interactive: true,
            ..Self::default()
        }
    }

    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub fn with_width(self, width: f64) -> Self {
        Self { width, ..self }
    }

    pub fn with_kind(self, kind: RouteStyleKind) -> Self {
        Self { kind, ..self }
    }

    pub fn with_arrows(self, show_arrows: bool, spacing_px: f64) -> Self {
        Self {
            show_arrows,
            arrow_spacing_px: spacing_px,
            ..self
        }
    }

    pub fn with_endpoints(self, show_endpoints: bool) -> Self {
        Self {
            show_endpoints,
            ..self
        }
    }

    pub fn with_start_color(self, color: Option<Color>) -> Self {
        Self {
            start_color: color,
            ..self
        }
    }

    pub fn with_end_color(self, color: Option<Color>) -> Self {
        Self {
            end_color: color,
            ..self
        }
    }

    pub fn with_glow(self, show_glow: bool, intensity: f64) -> Self {
        Self {
            show_glow,
            glow_intensity: intensity,
            ..self
        }
    }

    pub fn with_dash_pattern(self, dash: f64, gap: f64) -> Self {
        Self {
            dash_pattern: [dash, gap],
            ..self
        }
    }

    pub fn with_border(self, color: Option<Color>, width: f64) -> Self {
        Self {
            border_color: color,
            border_width: width,
            ..self
        }
    }

    pub fn with_animation_progress(self, progress: Option<f64>) -> Self {
        Self {
            animation_progress: progress,
            ..self
        }
    }

    pub fn with_interactive(self, interactive: bool) -> Self {
        Self {
            interactive,
            ..self
        }
    }

    /// Progress clamped to [0, 1], `None` when the whole route is drawn
    pub fn clamped_progress(&self) -> Option<f64> {
        self.animation_progress.map(|p| {
            if p.is_nan() {
                1.0
            } else {
                p.clamp(0.0, 1.0)
            }
        })
    }

    /// Fields [`RouteStyleConfig::sanitized`] would reset to their defaults
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if !(self.width.is_finite() && self.width > 0.0) {
            fields.push("width");
        }
        if !(self.arrow_spacing_px.is_finite() && self.arrow_spacing_px > 0.0) {
            fields.push("arrow_spacing_px");
        }
        if !self.dash_pattern.iter().all(|v| v.is_finite() && *v > 0.0) {
            fields.push("dash_pattern");
        }
        fields
    }

    /// Copy with out-of-range values replaced by safe ones. Silent, so it is
    /// safe to call every frame.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut style = self.clone();

        for field in self.invalid_fields() {
            match field {
                "width" => style.width = defaults.width,
                "arrow_spacing_px" => style.arrow_spacing_px = defaults.arrow_spacing_px,
                _ => style.dash_pattern = defaults.dash_pattern,
            }
        }
        style.glow_intensity = if style.glow_intensity.is_finite() {
            style.glow_intensity.clamp(0.0, 1.0)
        } else {
            defaults.glow_intensity
        };
        if !(style.border_width.is_finite() && style.border_width >= 0.0) {
            style.border_width = 0.0;
        }
        style.animation_progress = style.clamped_progress();
        style
    }
}
