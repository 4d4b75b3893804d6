use crate::core::geo::{Point, TileCoord};
use serde::{Deserialize, Serialize};

/// Straight RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Builds an opaque color from `0xRRGGBB`
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Same color with alpha set to `opacity` (0.0 to 1.0)
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Same color with the current alpha multiplied by `factor`
    pub fn scale_alpha(self, factor: f64) -> Self {
        Self {
            a: (self.a as f64 * factor.clamp(0.0, 1.0)).round() as u8,
            ..self
        }
    }

    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

#[cfg(feature = "egui")]
impl From<egui::Color32> for Color {
    fn from(color: egui::Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        Self::new(r, g, b, a)
    }
}

#[cfg(feature = "egui")]
impl From<Color> for egui::Color32 {
    fn from(color: Color) -> Self {
        egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokePattern {
    Solid,
    /// Round dots spaced by the stroke width
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
    pub pattern: StrokePattern,
}

impl Stroke {
    pub fn new(width: f64, color: Color) -> Self {
        Self {
            width,
            color,
            pattern: StrokePattern::Solid,
        }
    }

    pub fn dotted(width: f64, color: Color) -> Self {
        Self {
            width,
            color,
            pattern: StrokePattern::Dotted,
        }
    }
}

/// Primitive the render surface knows how to paint. Coordinates are screen
/// pixels, angles are radians measured clockwise from the positive x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Circle {
        center: Point,
        radius: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Point>,
        fill: Color,
        stroke: Option<Stroke>,
    },
    /// Raster tile; the host applies `color_matrix` when painting
    Tile {
        coord: TileCoord,
        min: Point,
        max: Point,
        color_matrix: Option<[f64; 20]>,
    },
}

impl DrawCommand {
    pub fn filled_circle(center: Point, radius: f64, fill: Color) -> Self {
        Self::Circle {
            center,
            radius,
            fill: Some(fill),
            stroke: None,
        }
    }

    pub fn stroked_circle(center: Point, radius: f64, stroke: Stroke) -> Self {
        Self::Circle {
            center,
            radius,
            fill: None,
            stroke: Some(stroke),
        }
    }

    /// Moves the command by `offset` screen pixels
    pub fn translated(&self, offset: Point) -> Self {
        let shift = |points: &[Point]| -> Vec<Point> { points.iter().map(|p| p.add(&offset)).collect() };
        match self {
            Self::Circle {
                center,
                radius,
                fill,
                stroke,
            } => Self::Circle {
                center: center.add(&offset),
                radius: *radius,
                fill: *fill,
                stroke: *stroke,
            },
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep_angle,
                stroke,
            } => Self::Arc {
                center: center.add(&offset),
                radius: *radius,
                start_angle: *start_angle,
                sweep_angle: *sweep_angle,
                stroke: *stroke,
            },
            Self::Polyline { points, stroke } => Self::Polyline {
                points: shift(points),
                stroke: *stroke,
            },
            Self::Polygon {
                points,
                fill,
                stroke,
            } => Self::Polygon {
                points: shift(points),
                fill: *fill,
                stroke: *stroke,
            },
            Self::Tile {
                coord,
                min,
                max,
                color_matrix,
            } => Self::Tile {
                coord: *coord,
                min: min.add(&offset),
                max: max.add(&offset),
                color_matrix: *color_matrix,
            },
        }
    }
}

/// Draw list for one frame, back to front
#[derive(Debug, Default)]
pub struct RenderContext {
    pub size: Point,
    commands: Vec<DrawCommand>,
}

impl RenderContext {
    pub fn new(size: Point) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn extend<I: IntoIterator<Item = DrawCommand>>(&mut self, commands: I) {
        self.commands.extend(commands);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_opacity() {
        let red = Color::from_hex(0xff0000);
        assert_eq!(red, Color::rgb(255, 0, 0));
        assert_eq!(red.with_opacity(0.5).a, 128);
        assert_eq!(red.with_opacity(2.0).a, 255);
        assert_eq!(red.with_opacity(0.5).scale_alpha(0.5).a, 64);
    }

    #[test]
    fn test_translate_commands() {
        let offset = Point::new(10.0, 20.0);
        let circle = DrawCommand::filled_circle(Point::new(1.0, 2.0), 3.0, Color::WHITE);
        match circle.translated(offset) {
            DrawCommand::Circle { center, radius, .. } => {
                assert_eq!(center, Point::new(11.0, 22.0));
                assert_eq!(radius, 3.0);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let line = DrawCommand::Polyline {
            points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            stroke: Stroke::new(1.0, Color::BLACK),
        };
        match line.translated(offset) {
            DrawCommand::Polyline { points, .. } => {
                assert_eq!(points, vec![Point::new(10.0, 20.0), Point::new(11.0, 21.0)]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
