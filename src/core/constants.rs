//! Core constants shared by the camera, geometry and rendering modules.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Mean Earth radius used by all spherical math, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Equatorial circumference used for ground resolution, in metres.
pub const EARTH_CIRCUMFERENCE_M: f64 = 40_075_016.686;

/// Lowest zoom reachable through relative zoom steps.
pub const MIN_ZOOM: f64 = 2.0;

/// Highest zoom reachable through relative zoom steps.
pub const MAX_ZOOM: f64 = 18.0;

/// Programmatic +/- zoom step when calling `zoom_in/zoom_out`.
pub const DEFAULT_ZOOM_DELTA: f64 = 1.0;

/// Default fly-to duration in milliseconds.
pub const DEFAULT_FLY_DURATION_MS: u64 = 1_000;

/// Default zoom-step duration in milliseconds.
pub const DEFAULT_ZOOM_DURATION_MS: u64 = 300;

/// Default rotation duration in milliseconds.
pub const DEFAULT_ROTATE_DURATION_MS: u64 = 500;

/// Default padding around fitted bounds, in pixels.
pub const DEFAULT_FIT_PADDING: f64 = 50.0;

/// Default zoom cap for `fit_all_points`.
pub const DEFAULT_FIT_MAX_ZOOM: f64 = 16.0;

/// Extra width of the glow stroke drawn under a route, in pixels.
pub const ROUTE_GLOW_EXTRA_WIDTH: f64 = 8.0;

/// Glow alpha is `glow_intensity * ROUTE_GLOW_ALPHA_FACTOR`.
pub const ROUTE_GLOW_ALPHA_FACTOR: f64 = 0.3;

/// Sweep of the radar marker's arc, in degrees.
pub const RADAR_SWEEP_DEGREES: f64 = 60.0;

/// Default period of one marker animation cycle, in milliseconds.
pub const DEFAULT_MARKER_PERIOD_MS: u64 = 2_000;
