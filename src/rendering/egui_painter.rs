//! Paints draw lists with an [`egui::Painter`].
//!
//! egui has no color-matrix image filter, so tile commands are drawn with
//! whatever texture the host registered for the coordinate. Hosts that need
//! themed tiles upload the output of `ThemedTileLayer::themed_tile`.

use crate::core::geo::{Point, TileCoord};
use crate::rendering::context::{DrawCommand, Stroke, StrokePattern};
use egui::{Color32, Pos2, Rect, Shape, TextureId, Vec2};

const ARC_SEGMENTS_PER_RADIAN: f64 = 8.0;

pub struct EguiMapPainter<'a> {
    painter: &'a egui::Painter,
    origin: Pos2,
}

impl<'a> EguiMapPainter<'a> {
    /// `origin` is the screen position of the map's top-left corner
    pub fn new(painter: &'a egui::Painter, origin: Pos2) -> Self {
        Self { painter, origin }
    }

    fn pos(&self, point: &Point) -> Pos2 {
        Pos2::new(
            self.origin.x + point.x as f32,
            self.origin.y + point.y as f32,
        )
    }

    /// Paints `commands` in order. `texture_for` maps a tile to an uploaded
    /// texture; tiles without one are skipped.
    pub fn paint<F>(&self, commands: &[DrawCommand], mut texture_for: F)
    where
        F: FnMut(TileCoord) -> Option<TextureId>,
    {
        for command in commands {
            match command {
                DrawCommand::Circle {
                    center,
                    radius,
                    fill,
                    stroke,
                } => {
                    self.painter.circle(
                        self.pos(center),
                        *radius as f32,
                        fill.map(Color32::from).unwrap_or(Color32::TRANSPARENT),
                        stroke.map(egui_stroke).unwrap_or(egui::Stroke::NONE),
                    );
                }
                DrawCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    sweep_angle,
                    stroke,
                } => {
                    let points = arc_points(*center, *radius, *start_angle, *sweep_angle)
                        .iter()
                        .map(|p| self.pos(p))
                        .collect();
                    self.painter.add(Shape::line(points, egui_stroke(*stroke)));
                }
                DrawCommand::Polyline { points, stroke } => {
                    let points: Vec<Pos2> = points.iter().map(|p| self.pos(p)).collect();
                    match stroke.pattern {
                        StrokePattern::Solid => {
                            self.painter.add(Shape::line(points, egui_stroke(*stroke)));
                        }
                        StrokePattern::Dotted => {
                            let width = stroke.width as f32;
                            self.painter.extend(Shape::dotted_line(
                                &points,
                                Color32::from(stroke.color),
                                width * 2.0,
                                width / 2.0,
                            ));
                        }
                    }
                }
                DrawCommand::Polygon {
                    points,
                    fill,
                    stroke,
                } => {
                    self.painter.add(Shape::convex_polygon(
                        points.iter().map(|p| self.pos(p)).collect(),
                        Color32::from(*fill),
                        stroke.map(egui_stroke).unwrap_or(egui::Stroke::NONE),
                    ));
                }
                DrawCommand::Tile { coord, min, max, .. } => {
                    if let Some(texture) = texture_for(*coord) {
                        self.painter.image(
                            texture,
                            Rect::from_two_pos(self.pos(min), self.pos(max)),
                            Rect::from_min_size(Pos2::ZERO, Vec2::splat(1.0)),
                            Color32::WHITE,
                        );
                    }
                }
            }
        }
    }
}

fn egui_stroke(stroke: Stroke) -> egui::Stroke {
    egui::Stroke::new(stroke.width as f32, Color32::from(stroke.color))
}

/// Polyline approximation of an arc, angles clockwise from +x
pub fn arc_points(center: Point, radius: f64, start_angle: f64, sweep_angle: f64) -> Vec<Point> {
    let segments = ((sweep_angle.abs() * ARC_SEGMENTS_PER_RADIAN).ceil() as usize).max(1);
    (0..=segments)
        .map(|i| {
            let angle = start_angle + sweep_angle * i as f64 / segments as f64;
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_arc_points_span_sweep() {
        let points = arc_points(Point::new(0.0, 0.0), 10.0, 0.0, PI / 2.0);
        let first = points.first().unwrap();
        let last = points.last().unwrap();
        assert!((first.x - 10.0).abs() < 1e-9 && first.y.abs() < 1e-9);
        // clockwise on screen: +y is down
        assert!(last.x.abs() < 1e-9 && (last.y - 10.0).abs() < 1e-9);
        assert!(points.len() > 2);
    }
}
