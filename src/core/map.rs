use crate::{
    camera::CameraController,
    core::{
        config::MapOptions,
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    marker::{MarkerPainter, MarkerPhase, MarkerSpec},
    rendering::{
        context::{DrawCommand, RenderContext},
        surface::CameraSurface,
    },
    route::{RouteRenderer, RouteSpec},
    theme::{ColorMatrix, MapcnThemes},
};
use fxhash::FxHashMap;
use instant::Instant;

/// Last painted frame of one marker, centred on the origin
#[derive(Debug, Clone)]
struct PaintedMarker {
    painter: MarkerPainter,
    commands: Vec<DrawCommand>,
}

/// Frame loop owner.
///
/// The host calls [`AnimatedMap::frame`] once per display frame. Each frame
/// advances the camera, then draws routes and markers on top of the camera
/// the surface now holds. Base tiles are loaded separately (they are async)
/// using [`AnimatedMap::viewport`] and [`AnimatedMap::theme`].
pub struct AnimatedMap<S: CameraSurface> {
    controller: CameraController<S>,
    routes: Vec<RouteSpec>,
    markers: Vec<MarkerSpec>,
    marker_phase: MarkerPhase,
    painted: FxHashMap<String, PaintedMarker>,
    repainted_markers: usize,
    marker_paints: u64,
    theme: ColorMatrix,
    frame_count: u64,
}

impl<S: CameraSurface> AnimatedMap<S> {
    pub fn new(surface: S) -> Self {
        Self::with_options(surface, MapOptions::default())
    }

    pub fn with_options(surface: S, options: MapOptions) -> Self {
        let options = options.sanitized();
        let theme = match options.theme.as_deref() {
            Some(name) => Self::lookup_theme(name),
            None => ColorMatrix::IDENTITY,
        };

        Self {
            controller: CameraController::with_options(surface, &options),
            routes: Vec::new(),
            markers: Vec::new(),
            marker_phase: MarkerPhase::from_config(&options.markers),
            painted: FxHashMap::default(),
            repainted_markers: 0,
            marker_paints: 0,
            theme,
            frame_count: 0,
        }
    }

    fn lookup_theme(name: &str) -> ColorMatrix {
        match MapcnThemes::by_name(name) {
            Some(values) => ColorMatrix(values),
            None => {
                log::warn!("unknown theme '{}', using identity", name);
                ColorMatrix::IDENTITY
            }
        }
    }

    pub fn controller(&self) -> &CameraController<S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CameraController<S> {
        &mut self.controller
    }

    /// Forwards the surface's first-layout signal to the camera
    pub fn mark_ready(&mut self) {
        self.controller.mark_ready();
    }

    pub fn viewport(&self) -> Viewport {
        self.controller.surface().viewport()
    }

    // Routes

    /// Adds a route, replacing any route with the same id. Invalid style
    /// values are reported here and replaced, so frames draw quietly.
    pub fn add_route(&mut self, mut route: RouteSpec) {
        let invalid = route.style.invalid_fields();
        if !invalid.is_empty() {
            log::warn!(
                "route {:?}: invalid {}, using defaults",
                route.id,
                invalid.join(", ")
            );
            route.style = route.style.sanitized();
        }
        if let Some(id) = route.id.as_deref() {
            if let Some(existing) = self
                .routes
                .iter_mut()
                .find(|r| r.id.as_deref() == Some(id))
            {
                *existing = route;
                return;
            }
        }
        self.routes.push(route);
    }

    pub fn remove_route(&mut self, id: &str) -> Option<RouteSpec> {
        let index = self.routes.iter().position(|r| r.id.as_deref() == Some(id))?;
        Some(self.routes.remove(index))
    }

    pub fn route_mut(&mut self, id: &str) -> Option<&mut RouteSpec> {
        self.routes.iter_mut().find(|r| r.id.as_deref() == Some(id))
    }

    pub fn routes(&self) -> &[RouteSpec] {
        &self.routes
    }

    pub fn clear_routes(&mut self) {
        self.routes.clear();
    }

    // Markers

    /// Adds a marker, replacing any marker with the same id
    pub fn add_marker(&mut self, mut marker: MarkerSpec) {
        if marker.style.has_invalid_radius() {
            log::warn!(
                "marker '{}': core radius {} is invalid, using default",
                marker.id,
                marker.style.core_radius
            );
        }
        marker.style = marker.style.sanitized();
        match self.markers.iter_mut().find(|m| m.id == marker.id) {
            Some(existing) => *existing = marker,
            None => self.markers.push(marker),
        }
    }

    pub fn remove_marker(&mut self, id: &str) -> Option<MarkerSpec> {
        let index = self.markers.iter().position(|m| m.id == id)?;
        self.painted.remove(id);
        Some(self.markers.remove(index))
    }

    pub fn markers(&self) -> &[MarkerSpec] {
        &self.markers
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear();
        self.painted.clear();
    }

    pub fn set_marker_animation(&mut self, enabled: bool) {
        self.marker_phase.set_enabled(enabled);
    }

    // Theme

    /// Sets the tile theme from raw matrix values; invalid input falls back
    /// to the identity
    pub fn set_theme(&mut self, matrix: &[f64]) {
        self.theme = ColorMatrix::from_slice(matrix);
    }

    /// Sets a registered theme. Returns false and leaves the theme unchanged
    /// when the name is unknown.
    pub fn set_theme_by_name(&mut self, name: &str) -> bool {
        match MapcnThemes::by_name(name) {
            Some(values) => {
                self.theme = ColorMatrix(values);
                true
            }
            None => {
                log::warn!("unknown theme '{}'", name);
                false
            }
        }
    }

    pub fn theme(&self) -> ColorMatrix {
        self.theme
    }

    /// Flies the camera so every route point and marker is visible, using
    /// the configured fit padding and max zoom
    pub fn fit_to_content(&mut self) {
        let points: Vec<LatLng> = self
            .routes
            .iter()
            .flat_map(|route| route.points.iter().copied())
            .chain(self.markers.iter().map(|marker| marker.position))
            .collect();
        let fit = self.controller.fit_config().clone();
        self.controller
            .fit_all_points(&points, fit.padding, fit.max_zoom);
    }

    /// Advances animations to `now` and builds the frame's draw list:
    /// routes first, markers on top
    pub fn frame(&mut self, now: Instant) -> RenderContext {
        self.controller.tick(now);
        self.frame_count += 1;

        let viewport = self.viewport();
        let mut context = RenderContext::new(viewport.size);
        context.extend(RouteRenderer::new(&viewport).render_all(&self.routes));

        let phase = self.marker_phase.phase_at(now);
        let mut previous = std::mem::take(&mut self.painted);
        let mut repainted = 0;
        for marker in &self.markers {
            let painter = MarkerPainter::new(marker.color, phase, marker.style);
            let cached = previous
                .remove(&marker.id)
                .filter(|cached| !painter.should_repaint(&cached.painter));

            let position = viewport.lat_lng_to_pixel(&marker.position);
            if !is_on_screen(&position, &viewport.size, marker.style.pulse_radius) {
                if let Some(cached) = cached {
                    self.painted.insert(marker.id.clone(), cached);
                }
                continue;
            }

            let painted = match cached {
                Some(cached) => cached,
                None => {
                    repainted += 1;
                    PaintedMarker {
                        painter,
                        commands: painter.paint(),
                    }
                }
            };
            context.extend(painted.commands.iter().map(|command| command.translated(position)));
            self.painted.insert(marker.id.clone(), painted);
        }
        self.repainted_markers = repainted;
        self.marker_paints += repainted as u64;

        context
    }

    /// Markers painted in the last frame; unchanged markers reuse their
    /// previous draw list
    pub fn repainted_markers(&self) -> usize {
        self.repainted_markers
    }

    /// Marker paints since the map was created
    pub fn marker_paints(&self) -> u64 {
        self.marker_paints
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_animating(&self) -> bool {
        self.controller.is_animating() || self.controller.is_touring()
    }

    /// Stops every animation and tour and drops the draw state
    pub fn dispose(&mut self) {
        self.controller.dispose();
        self.painted.clear();
        self.marker_phase.reset();
    }
}

fn is_on_screen(position: &Point, size: &Point, margin: f64) -> bool {
    position.x >= -margin
        && position.y >= -margin
        && position.x <= size.x + margin
        && position.y <= size.y + margin
}
