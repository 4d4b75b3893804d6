use crate::animation::easing::Interpolatable;
use crate::core::{
    constants::{ROUTE_GLOW_ALPHA_FACTOR, ROUTE_GLOW_EXTRA_WIDTH},
    geo::{LatLng, Point},
    viewport::Viewport,
};
use crate::rendering::context::{Color, DrawCommand, Stroke};
use crate::route::{
    spec::RouteSpec,
    style::{RouteStyleConfig, RouteStyleKind},
    utils::RouteUtils,
};

/// Upper bound on dash pieces per route per frame
const MAX_DASH_SEGMENTS: usize = 4096;
/// Upper bound on arrow glyphs per route per frame
const MAX_ARROWS: usize = 512;

/// Turns [`RouteSpec`]s into screen-space draw commands for one viewport
#[derive(Debug, Clone, Copy)]
pub struct RouteRenderer<'a> {
    viewport: &'a Viewport,
}

impl<'a> RouteRenderer<'a> {
    pub fn new(viewport: &'a Viewport) -> Self {
        Self { viewport }
    }

    pub fn render_all(&self, routes: &[RouteSpec]) -> Vec<DrawCommand> {
        routes.iter().flat_map(|route| self.render(route)).collect()
    }

    /// Draw list for one route, back to front: border, glow, main stroke,
    /// arrows, endpoints. Routes with fewer than two points draw nothing.
    pub fn render(&self, route: &RouteSpec) -> Vec<DrawCommand> {
        if !route.is_drawable() {
            return Vec::new();
        }

        let style = route.style.sanitized();
        let progress = style.clamped_progress();
        let visible = match progress {
            Some(fraction) => RouteUtils::truncate_route(&route.points, fraction),
            None => route.points.clone(),
        };

        let mut commands = Vec::new();
        if visible.len() >= 2 {
            let screen = self.project(&visible);

            if let Some(border) = style.border_color {
                commands.push(DrawCommand::Polyline {
                    points: screen.clone(),
                    stroke: Stroke::new(style.width + 2.0 * style.border_width, border),
                });
            }

            if style.show_glow {
                commands.push(DrawCommand::Polyline {
                    points: screen.clone(),
                    stroke: Stroke::new(
                        style.width + ROUTE_GLOW_EXTRA_WIDTH,
                        style.color.with_opacity(style.glow_intensity * ROUTE_GLOW_ALPHA_FACTOR),
                    ),
                });
            }

            commands.extend(self.main_stroke(&visible, screen, &style));
        }

        if style.show_arrows {
            commands.extend(self.arrows(&route.points, progress, &style));
        }

        if style.show_endpoints {
            commands.extend(self.endpoints(route, &style));
        }

        commands
    }

    fn project(&self, points: &[LatLng]) -> Vec<Point> {
        points
            .iter()
            .map(|p| self.viewport.lat_lng_to_pixel(p))
            .collect()
    }

    fn main_stroke(
        &self,
        visible: &[LatLng],
        screen: Vec<Point>,
        style: &RouteStyleConfig,
    ) -> Vec<DrawCommand> {
        match style.kind {
            RouteStyleKind::Solid | RouteStyleKind::Gradient | RouteStyleKind::Animated => {
                vec![DrawCommand::Polyline {
                    points: screen,
                    stroke: Stroke::new(style.width, style.color),
                }]
            }
            RouteStyleKind::Dotted => vec![DrawCommand::Polyline {
                points: screen,
                stroke: Stroke::dotted(style.width, style.color),
            }],
            RouteStyleKind::Dashed => {
                dash_segments(visible, style.dash_pattern, self.viewport.pixels_per_degree())
                    .into_iter()
                    .map(|dash| DrawCommand::Polyline {
                        points: self.project(&dash),
                        stroke: Stroke::new(style.width, style.color),
                    })
                    .collect()
            }
        }
    }

    fn arrows(
        &self,
        points: &[LatLng],
        progress: Option<f64>,
        style: &RouteStyleConfig,
    ) -> Vec<DrawCommand> {
        let latitude = RouteUtils::centroid(points).lat;
        let spacing_km = style.arrow_spacing_px * self.viewport.resolution_at(latitude) / 1000.0;
        let fractions = arrow_fractions(RouteUtils::total_distance(points), spacing_km);
        let visible_until = progress.unwrap_or(1.0);
        let size = (style.width * 1.5).max(6.0);

        fractions
            .into_iter()
            .filter(|fraction| *fraction <= visible_until)
            .map(|fraction| {
                let anchor = self
                    .viewport
                    .lat_lng_to_pixel(&RouteUtils::interpolate_along_route(points, fraction));
                let heading = RouteUtils::bearing_at_fraction(points, fraction)
                    + self.viewport.camera.rotation;
                arrow_glyph(anchor, heading, size, Color::WHITE)
            })
            .collect()
    }

    fn endpoints(&self, route: &RouteSpec, style: &RouteStyleConfig) -> Vec<DrawCommand> {
        let radius = style.width + 2.0;
        let ends = [
            (route.start(), style.start_color),
            (route.end(), style.end_color),
        ];
        ends.into_iter()
            .filter_map(|(position, color)| {
                position.map(|p| DrawCommand::Circle {
                    center: self.viewport.lat_lng_to_pixel(&p),
                    radius,
                    fill: Some(color.unwrap_or(style.color)),
                    stroke: Some(Stroke::new(2.0, Color::WHITE)),
                })
            })
            .collect()
    }
}

/// Splits `points` into dash pieces, walking the path in planar lat/lng
/// units multiplied by `scale`. Each piece starts `dash + gap` after the
/// previous one, so the count is about `ceil(length * scale / (dash + gap))`.
pub fn dash_segments(points: &[LatLng], pattern: [f64; 2], scale: f64) -> Vec<Vec<LatLng>> {
    let [dash, gap] = pattern;
    let period = dash + gap;
    if points.len() < 2 || !(period > 0.0 && dash > 0.0 && scale > 0.0) {
        return Vec::new();
    }

    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;
    cumulative.push(0.0);
    for pair in points.windows(2) {
        total += RouteUtils::planar_length(pair) * scale;
        cumulative.push(total);
    }

    let mut dashes = Vec::new();
    let mut start = 0.0;
    while start < total {
        if dashes.len() == MAX_DASH_SEGMENTS {
            log::debug!("dash count capped at {}", MAX_DASH_SEGMENTS);
            break;
        }
        let end = (start + dash).min(total);
        dashes.push(slice_path(points, &cumulative, start, end));
        start += period;
    }
    dashes
}

/// Sub-path between two scaled planar distances
fn slice_path(points: &[LatLng], cumulative: &[f64], from: f64, to: f64) -> Vec<LatLng> {
    let at = |distance: f64| -> LatLng {
        let index = cumulative
            .windows(2)
            .position(|pair| distance <= pair[1])
            .unwrap_or(cumulative.len() - 2);
        let length = cumulative[index + 1] - cumulative[index];
        let t = if length > 0.0 {
            ((distance - cumulative[index]) / length).clamp(0.0, 1.0)
        } else {
            0.0
        };
        points[index].lerp(&points[index + 1], t)
    };

    let mut piece = vec![at(from)];
    piece.extend(
        cumulative
            .iter()
            .zip(points)
            .filter(|(distance, _)| **distance > from && **distance < to)
            .map(|(_, point)| *point),
    );
    piece.push(at(to));
    piece
}

/// Evenly spaced arc-length fractions for `floor(total_km / spacing_km)`
/// arrows, excluding both ends
pub fn arrow_fractions(total_km: f64, spacing_km: f64) -> Vec<f64> {
    if !(total_km > 0.0 && spacing_km > 0.0) {
        return Vec::new();
    }
    let raw = (total_km / spacing_km).floor();
    let count = if raw.is_finite() {
        (raw as usize).min(MAX_ARROWS)
    } else {
        MAX_ARROWS
    };
    (0..count)
        .map(|i| (i + 1) as f64 / (count + 1) as f64)
        .collect()
}

/// Filled triangle centred on `anchor`, pointing along `heading_deg`
/// (0 = up, clockwise)
fn arrow_glyph(anchor: Point, heading_deg: f64, size: f64, color: Color) -> DrawCommand {
    let origin = Point::new(0.0, 0.0);
    let shape = [
        Point::new(0.0, -size * 0.6),
        Point::new(size * 0.45, size * 0.4),
        Point::new(-size * 0.45, size * 0.4),
    ];
    DrawCommand::Polygon {
        points: shape
            .iter()
            .map(|p| p.rotate_around(&origin, heading_deg).add(&anchor))
            .collect(),
        fill: color,
        stroke: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewport::CameraState;

    fn viewport(zoom: f64) -> Viewport {
        Viewport::new(
            CameraState::new(LatLng::new(0.0, 0.5), zoom),
            Point::new(800.0, 600.0),
        )
    }

    fn straight() -> Vec<LatLng> {
        vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0)]
    }

    #[test]
    fn test_short_routes_draw_nothing() {
        let vp = viewport(8.0);
        let renderer = RouteRenderer::new(&vp);
        assert!(renderer.render(&RouteSpec::default()).is_empty());
        assert!(renderer
            .render(&RouteSpec::new(vec![LatLng::new(1.0, 1.0)]))
            .is_empty());
    }

    #[test]
    fn test_layer_order() {
        let vp = viewport(8.0);
        let style = RouteStyleConfig::default()
            .with_border(Some(Color::BLACK), 2.0)
            .with_glow(true, 1.0)
            .with_endpoints(true);
        let route = RouteSpec::new(straight()).with_style(style.clone());
        let commands = RouteRenderer::new(&vp).render(&route);

        assert_eq!(commands.len(), 5);
        match (&commands[0], &commands[1], &commands[2]) {
            (
                DrawCommand::Polyline { stroke: border, .. },
                DrawCommand::Polyline { stroke: glow, .. },
                DrawCommand::Polyline { stroke: main, .. },
            ) => {
                assert_eq!(border.width, style.width + 4.0);
                assert_eq!(border.color, Color::BLACK);
                assert_eq!(glow.width, style.width + 8.0);
                assert_eq!(glow.color.a, (0.3_f64 * 255.0).round() as u8);
                assert_eq!(main.width, style.width);
            }
            other => panic!("unexpected commands {other:?}"),
        }
        assert!(matches!(commands[3], DrawCommand::Circle { .. }));
        assert!(matches!(commands[4], DrawCommand::Circle { .. }));
    }

    #[test]
    fn test_dash_count_matches_period() {
        let scale = 230.0;
        let dashes = dash_segments(&straight(), [15.0, 8.0], scale);
        let expected = (scale / 23.0).floor() as i64;
        assert!((dashes.len() as i64 - expected).abs() <= 1);
        for dash in &dashes {
            assert!(dash.len() >= 2);
        }
    }

    #[test]
    fn test_dash_pieces_span_vertices() {
        let bent = vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 0.05),
            LatLng::new(0.05, 0.05),
        ];
        let dashes = dash_segments(&bent, [15.0, 8.0], 200.0);
        assert!(dashes.iter().any(|dash| dash.contains(&bent[1])));
    }

    #[test]
    fn test_arrow_fractions() {
        assert!(arrow_fractions(0.0, 1.0).is_empty());
        assert!(arrow_fractions(10.0, 0.0).is_empty());
        assert_eq!(arrow_fractions(10.0, 3.0), vec![0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_progress_limits_arrows_and_stroke() {
        let vp = viewport(10.0);
        let style = RouteStyleConfig::default().with_arrows(true, 40.0);
        let full = RouteRenderer::new(&vp).render(&RouteSpec::new(straight()).with_style(style.clone()));
        let half = RouteRenderer::new(&vp).render(
            &RouteSpec::new(straight()).with_style(style.with_animation_progress(Some(0.5))),
        );

        let arrows = |commands: &[DrawCommand]| {
            commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::Polygon { .. }))
                .count()
        };
        assert!(arrows(&full) > 0);
        assert!(arrows(&half) < arrows(&full));
    }

    #[test]
    fn test_endpoints_use_original_points() {
        let vp = viewport(8.0);
        let style = RouteStyleConfig::default()
            .with_endpoints(true)
            .with_start_color(Some(Color::BLACK))
            .with_animation_progress(Some(0.2));
        let commands = RouteRenderer::new(&vp).render(&RouteSpec::new(straight()).with_style(style.clone()));

        let circles: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { center, fill, .. } => Some((*center, *fill)),
                _ => None,
            })
            .collect();
        assert_eq!(circles.len(), 2);
        assert_eq!(circles[0].1, Some(Color::BLACK));
        assert_eq!(circles[1].1, Some(style.color));
        let end = vp.lat_lng_to_pixel(&straight()[1]);
        assert!(circles[1].0.distance_to(&end) < 1e-9);
    }

    #[test]
    fn test_zero_progress_skips_stroke() {
        let vp = viewport(8.0);
        let route = RouteSpec::new(straight())
            .with_style(RouteStyleConfig::default().with_animation_progress(Some(0.0)));
        assert!(RouteRenderer::new(&vp).render(&route).is_empty());
    }

    #[test]
    fn test_arrow_points_along_heading() {
        let glyph = arrow_glyph(Point::new(0.0, 0.0), 90.0, 10.0, Color::WHITE);
        match glyph {
            DrawCommand::Polygon { points, .. } => {
                assert!((points[0].x - 6.0).abs() < 1e-9);
                assert!(points[0].y.abs() < 1e-9);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
