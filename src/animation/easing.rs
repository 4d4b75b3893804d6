use serde::{Deserialize, Serialize};

/// Interpolation trait for values that can be smoothly transitioned
pub trait Interpolatable {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Interpolatable for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Interpolatable for crate::core::geo::LatLng {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(self.lat.lerp(&other.lat, t), self.lng.lerp(&other.lng, t))
    }
}

impl Interpolatable for crate::core::geo::Point {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }
}

/// Easing curves for camera and marker animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EasingCurve {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseOutBack,
    /// Quick start, long gentle settle; used for zoom steps
    FastOutSlowIn,
    Decelerate,
}

impl EasingCurve {
    /// Apply the easing curve to a normalized time value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingCurve::Linear => t,
            // Cubic bezier (0.42, 0, 1, 1)
            EasingCurve::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            // Cubic bezier (0, 0, 0.58, 1)
            EasingCurve::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            // Cubic bezier (0.42, 0, 0.58, 1)
            EasingCurve::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            EasingCurve::EaseInQuad => t * t,
            EasingCurve::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingCurve::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingCurve::EaseInCubic => t * t * t,
            EasingCurve::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingCurve::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingCurve::EaseOutBack => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
            // Cubic bezier (0.4, 0, 0.2, 1)
            EasingCurve::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            EasingCurve::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Evaluates a CSS-style cubic bezier timing curve with fixed end points
/// (0,0) and (1,1) at horizontal position `t`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let bezier = |a: f64, b: f64, s: f64| {
        let u = 1.0 - s;
        3.0 * a * u * u * s + 3.0 * b * u * s * s + s * s * s
    };

    // Bisection on x(s) = t; x is monotonic for control points in [0, 1]
    let (mut low, mut high) = (0.0_f64, 1.0_f64);
    let mut s = t;
    for _ in 0..48 {
        let x = bezier(x1, x2, s);
        if (x - t).abs() < 1e-9 {
            break;
        }
        if x < t {
            low = s;
        } else {
            high = s;
        }
        s = (low + high) / 2.0;
    }
    bezier(y1, y2, s)
}
