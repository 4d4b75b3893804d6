use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarkerStyleKind {
    /// Expanding, fading halos around a solid core
    #[default]
    Pulse,
    Static,
    /// Rotating sweep over faint range rings
    Radar,
    /// Two expanding rings half a cycle apart
    Ring,
    /// Smooth grow/shrink oscillation
    Breathe,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyleConfig {
    pub core_radius: f64,
    /// Outermost radius reached by animated layers
    pub pulse_radius: f64,
    pub glow_intensity: f64,
    pub kind: MarkerStyleKind,
    pub show_shadow: bool,
    pub border_width: f64,
}

impl Default for MarkerStyleConfig {
    fn default() -> Self {
        Self {
            core_radius: 8.0,
            pulse_radius: 24.0,
            glow_intensity: 0.6,
            kind: MarkerStyleKind::Pulse,
            show_shadow: true,
            border_width: 2.0,
        }
    }
}

impl MarkerStyleConfig {
    pub fn minimal() -> Self {
        Self {
            core_radius: 6.0,
            pulse_radius: 6.0,
            glow_intensity: 0.3,
            kind: MarkerStyleKind::Static,
            show_shadow: false,
            border_width: 1.5,
        }
    }

    pub fn prominent() -> Self {
        Self {
            core_radius: 10.0,
            pulse_radius: 32.0,
            glow_intensity: 0.8,
            kind: MarkerStyleKind::Pulse,
            show_shadow: true,
            border_width: 3.0,
        }
    }

    pub fn elegant() -> Self {
        Self {
            core_radius: 7.0,
            pulse_radius: 20.0,
            glow_intensity: 0.5,
            kind: MarkerStyleKind::Breathe,
            show_shadow: false,
            border_width: 2.0,
        }
    }

    pub fn with_kind(self, kind: MarkerStyleKind) -> Self {
        Self { kind, ..self }
    }

    pub fn with_radii(self, core_radius: f64, pulse_radius: f64) -> Self {
        Self {
            core_radius,
            pulse_radius,
            ..self
        }
    }

    pub fn with_glow(self, glow_intensity: f64) -> Self {
        Self {
            glow_intensity,
            ..self
        }
    }

    pub fn with_shadow(self, show_shadow: bool) -> Self {
        Self {
            show_shadow,
            ..self
        }
    }

    pub fn with_border(self, border_width: f64) -> Self {
        Self {
            border_width,
            ..self
        }
    }

    /// True when [`MarkerStyleConfig::sanitized`] has to fall back to the
    /// default core radius
    pub fn has_invalid_radius(&self) -> bool {
        !(self.core_radius.is_finite() && self.core_radius > 0.0)
    }

    /// Copy with radii, glow and border forced into their valid ranges
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let core_radius = if self.has_invalid_radius() {
            defaults.core_radius
        } else {
            self.core_radius
        };
        let pulse_radius = if self.pulse_radius.is_finite() {
            self.pulse_radius.max(core_radius)
        } else {
            core_radius
        };
        let glow_intensity = if self.glow_intensity.is_finite() {
            self.glow_intensity.clamp(0.0, 1.0)
        } else {
            defaults.glow_intensity
        };
        let border_width = if self.border_width.is_finite() {
            self.border_width.max(0.0)
        } else {
            0.0
        };

        Self {
            core_radius,
            pulse_radius,
            glow_intensity,
            border_width,
            ..*self
        }
    }
}
