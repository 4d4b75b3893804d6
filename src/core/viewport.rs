use crate::core::{
    constants::{EARTH_CIRCUMFERENCE_M, TILE_SIZE},
    geo::{LatLng, LatLngBounds, Point},
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Position of the camera: what the render surface is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub center: LatLng,
    pub zoom: f64,
    /// Map rotation in degrees, clockwise on screen
    pub rotation: f64,
}

impl CameraState {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            rotation: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(LatLng::default(), 2.0)
    }
}

/// A camera paired with the pixel size of the surface it renders into.
///
/// All geo ↔ screen conversions use the spherical Web Mercator projection
/// (EPSG:3857) with `TILE_SIZE` pixel tiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub camera: CameraState,
    /// The size of the viewport in pixels
    pub size: Point,
}

impl Viewport {
    pub fn new(camera: CameraState, size: Point) -> Self {
        Self { camera, size }
    }

    /// World size in pixels at the given zoom level
    pub fn world_size(zoom: f64) -> f64 {
        TILE_SIZE as f64 * 2_f64.powf(zoom)
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    pub fn project(lat_lng: &LatLng, zoom: f64) -> Point {
        let scale = Self::world_size(zoom);
        let lat_rad = LatLng::clamp_lat(lat_lng.lat).to_radians();

        let x = (lat_lng.lng + 180.0) / 360.0 * scale;
        let y = (1.0 - (PI / 4.0 + lat_rad / 2.0).tan().ln() / PI) / 2.0 * scale;
        Point::new(x, y)
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(pixel: &Point, zoom: f64) -> LatLng {
        let scale = Self::world_size(zoom);
        let lng = pixel.x / scale * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * pixel.y / scale);
        let lat = n.sinh().atan().to_degrees();
        LatLng::new(lat, lng)
    }

    fn screen_center(&self) -> Point {
        Point::new(self.size.x / 2.0, self.size.y / 2.0)
    }

    /// Converts a geographical coordinate to screen pixel coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let zoom = self.camera.zoom;
        let offset =
            Self::project(lat_lng, zoom).subtract(&Self::project(&self.camera.center, zoom));
        let screen_center = self.screen_center();
        screen_center
            .add(&offset)
            .rotate_around(&screen_center, self.camera.rotation)
    }

    /// Converts screen pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let zoom = self.camera.zoom;
        let screen_center = self.screen_center();
        let unrotated = pixel.rotate_around(&screen_center, -self.camera.rotation);
        let world = Self::project(&self.camera.center, zoom).add(&unrotated.subtract(&screen_center));
        Self::unproject(&world, zoom)
    }

    /// Geographic bounds covering every visible screen corner
    pub fn bounds(&self) -> LatLngBounds {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(self.size.x, 0.0),
            Point::new(0.0, self.size.y),
            Point::new(self.size.x, self.size.y),
        ];
        let mut bounds = {
            let first = self.pixel_to_lat_lng(&corners[0]);
            LatLngBounds::new(first, first)
        };
        for corner in &corners[1..] {
            bounds.extend(&self.pixel_to_lat_lng(corner));
        }
        bounds
    }

    /// Ground resolution in metres per pixel at `latitude` for the current zoom
    pub fn resolution_at(&self, latitude: f64) -> f64 {
        EARTH_CIRCUMFERENCE_M * latitude.to_radians().cos().abs() / Self::world_size(self.camera.zoom)
    }

    /// Screen pixels per degree of longitude at the current zoom
    pub fn pixels_per_degree(&self) -> f64 {
        Self::world_size(self.camera.zoom) / 360.0
    }

    /// Computes a camera that fits `bounds` inside the viewport minus `padding`
    /// on every side, with a continuous zoom capped to `[min_zoom, max_zoom]`.
    /// Rotation is kept as is.
    pub fn fit_bounds(
        &self,
        bounds: &LatLngBounds,
        padding: f64,
        min_zoom: f64,
        max_zoom: f64,
    ) -> Result<CameraState> {
        if bounds.is_degenerate() {
            return Err(MapError::DegenerateGeometry(
                "cannot fit a zero-area bounding box".to_string(),
            ));
        }

        let available = Point::new(self.size.x - 2.0 * padding, self.size.y - 2.0 * padding);
        if available.x <= 0.0 || available.y <= 0.0 {
            return Err(MapError::InvalidConfiguration(format!(
                "padding {padding} leaves no room in a {}x{} viewport",
                self.size.x, self.size.y
            )));
        }

        let nw = Self::project(&bounds.north_west(), 0.0);
        let se = Self::project(&bounds.south_east(), 0.0);
        let width = (se.x - nw.x).abs();
        let height = (se.y - nw.y).abs();

        let zoom_for = |available: f64, extent: f64| {
            if extent > 0.0 {
                (available / extent).log2()
            } else {
                f64::INFINITY
            }
        };
        let zoom = zoom_for(available.x, width).min(zoom_for(available.y, height));
        if !zoom.is_finite() {
            return Err(MapError::DegenerateGeometry(format!(
                "fit produced a non-finite zoom for {bounds:?}"
            )));
        }

        Ok(CameraState {
            center: bounds.center(),
            zoom: zoom.clamp(min_zoom, max_zoom.max(min_zoom)),
            rotation: self.camera.rotation,
        })
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(CameraState::default(), Point::new(800.0, 600.0))
    }
}
