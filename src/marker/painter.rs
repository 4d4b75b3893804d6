//! Animated marker drawing.
//!
//! Every function here is pure: it maps a color, a phase in [0, 1] and a
//! style to draw commands centred on (0, 0). Hosts place the result with
//! [`DrawCommand::translated`] and drive the phase with [`MarkerPhase`].

use crate::core::{config::MarkerAnimationConfig, constants::RADAR_SWEEP_DEGREES, geo::Point};
use crate::marker::style::{MarkerStyleConfig, MarkerStyleKind};
use crate::rendering::context::{Color, DrawCommand, Stroke};
use instant::Instant;
use std::f64::consts::TAU;
use std::time::Duration;

fn origin() -> Point {
    Point::new(0.0, 0.0)
}

fn clamp_phase(phase: f64) -> f64 {
    if phase.is_nan() {
        0.0
    } else {
        phase.clamp(0.0, 1.0)
    }
}

/// Draw commands for one marker frame, dispatched on `config.kind`
pub fn paint_marker(color: Color, phase: f64, config: &MarkerStyleConfig) -> Vec<DrawCommand> {
    match config.kind {
        MarkerStyleKind::Pulse => paint_pulse(color, phase, config),
        MarkerStyleKind::Static => paint_static(color, config),
        MarkerStyleKind::Radar => paint_radar(color, phase, config),
        MarkerStyleKind::Ring => paint_ring(color, phase, config),
        MarkerStyleKind::Breathe => paint_breathe(color, phase, config),
    }
}

/// Drop shadow, core and border shared by every style
fn core_layers(color: Color, radius: f64, config: &MarkerStyleConfig) -> Vec<DrawCommand> {
    let mut layers = Vec::with_capacity(3);
    if config.show_shadow {
        layers.push(DrawCommand::filled_circle(
            Point::new(0.0, 2.0),
            radius,
            Color::BLACK.with_opacity(0.2),
        ));
    }
    layers.push(DrawCommand::Circle {
        center: origin(),
        radius,
        fill: Some(color),
        stroke: (config.border_width > 0.0).then(|| Stroke::new(config.border_width, Color::WHITE)),
    });
    layers
}

pub fn paint_pulse(color: Color, phase: f64, config: &MarkerStyleConfig) -> Vec<DrawCommand> {
    let config = config.sanitized();
    let phase = clamp_phase(phase);
    let core = config.core_radius;
    let spread = config.pulse_radius - core;
    let fade = 1.0 - phase;

    let mut commands = vec![
        DrawCommand::filled_circle(
            origin(),
            core + spread * phase,
            color.with_opacity(config.glow_intensity * fade * 0.4),
        ),
        DrawCommand::filled_circle(
            origin(),
            core + spread * phase * 0.5,
            color.with_opacity(config.glow_intensity * fade * 0.6),
        ),
    ];
    commands.extend(core_layers(color, core, &config));
    commands.push(DrawCommand::filled_circle(
        Point::new(-core * 0.3, -core * 0.3),
        core * 0.3,
        Color::WHITE.with_opacity(0.6),
    ));
    commands
}

/// Phase-independent glow, core and border
pub fn paint_static(color: Color, config: &MarkerStyleConfig) -> Vec<DrawCommand> {
    let config = config.sanitized();
    let core = config.core_radius;
    let mut commands = vec![DrawCommand::filled_circle(
        origin(),
        core * 1.8,
        color.with_opacity(config.glow_intensity * 0.3),
    )];
    commands.extend(core_layers(color, core, &config));
    commands
}

pub fn paint_radar(color: Color, phase: f64, config: &MarkerStyleConfig) -> Vec<DrawCommand> {
    let config = config.sanitized();
    let phase = clamp_phase(phase);
    let reach = config.pulse_radius;

    let mut commands: Vec<DrawCommand> = [1.0 / 3.0, 2.0 / 3.0, 1.0]
        .iter()
        .map(|fraction| {
            DrawCommand::stroked_circle(origin(), reach * fraction, Stroke::new(1.0, color.with_opacity(0.15)))
        })
        .collect();

    commands.push(DrawCommand::Arc {
        center: origin(),
        radius: reach,
        start_angle: phase * TAU,
        sweep_angle: RADAR_SWEEP_DEGREES.to_radians(),
        stroke: Stroke::new(
            (config.core_radius * 0.5).max(2.0),
            color.with_opacity(config.glow_intensity * (1.0 - phase)),
        ),
    });
    commands.extend(core_layers(color, config.core_radius, &config));
    commands
}

pub fn paint_ring(color: Color, phase: f64, config: &MarkerStyleConfig) -> Vec<DrawCommand> {
    let config = config.sanitized();
    let phase = clamp_phase(phase);
    let core = config.core_radius;
    let spread = config.pulse_radius - core;

    let mut commands: Vec<DrawCommand> = [phase, (phase + 0.5) % 1.0]
        .iter()
        .map(|ring_phase| {
            let fade = 1.0 - ring_phase;
            DrawCommand::stroked_circle(
                origin(),
                core + spread * ring_phase,
                Stroke::new(
                    (3.0 * fade).max(0.5),
                    color.with_opacity(config.glow_intensity * fade),
                ),
            )
        })
        .collect();
    commands.extend(core_layers(color, core, &config));
    commands.push(DrawCommand::filled_circle(origin(), core * 0.4, Color::WHITE));
    commands
}

pub fn paint_breathe(color: Color, phase: f64, config: &MarkerStyleConfig) -> Vec<DrawCommand> {
    let config = config.sanitized();
    let phase = clamp_phase(phase);
    let core = config.core_radius;
    let swell = ((phase * TAU).sin() + 1.0) / 2.0;

    let mut commands = vec![DrawCommand::filled_circle(
        origin(),
        core + (config.pulse_radius - core) * swell,
        color.with_opacity(config.glow_intensity * (0.2 + 0.4 * swell)),
    )];
    commands.extend(core_layers(color, core * (0.9 + 0.1 * swell), &config));
    commands
}

/// One marker frame. Two painters with equal fields draw the same thing, so
/// [`MarkerPainter::should_repaint`] is a plain value comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPainter {
    pub color: Color,
    pub phase: f64,
    pub config: MarkerStyleConfig,
}

impl MarkerPainter {
    pub fn new(color: Color, phase: f64, config: MarkerStyleConfig) -> Self {
        Self {
            color,
            phase,
            config,
        }
    }

    pub fn paint(&self) -> Vec<DrawCommand> {
        paint_marker(self.color, self.phase, &self.config)
    }

    /// Paints centred on a screen position
    pub fn paint_at(&self, position: Point) -> Vec<DrawCommand> {
        self.paint()
            .iter()
            .map(|command| command.translated(position))
            .collect()
    }

    pub fn should_repaint(&self, old: &MarkerPainter) -> bool {
        self != old
    }
}

/// Turns frame-clock time into a looping marker phase
#[derive(Debug, Clone)]
pub struct MarkerPhase {
    period: Duration,
    enabled: bool,
    started_at: Option<Instant>,
}

impl MarkerPhase {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            enabled: true,
            started_at: None,
        }
    }

    pub fn from_config(config: &MarkerAnimationConfig) -> Self {
        Self {
            enabled: config.enabled,
            ..Self::new(Duration::from_millis(config.period_ms))
        }
    }

    /// Phase in [0, 1) at `now`; the cycle starts on the first call.
    /// Disabled or zero-period drivers stay at 0.
    pub fn phase_at(&mut self, now: Instant) -> f64 {
        if !self.enabled || self.period.is_zero() {
            return 0.0;
        }
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = if now > started_at {
            (now - started_at).as_secs_f64()
        } else {
            0.0
        };
        (elapsed / self.period.as_secs_f64()).fract()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn reset(&mut self) {
        self.started_at = None;
    }
}
