//! Spherical and planar geometry over sequences of [`LatLng`].
//!
//! Distances and bearings are great-circle values on a sphere of radius
//! [`EARTH_RADIUS_KM`]. Two helpers deliberately use a planar model where
//! latitude/longitude are treated as Cartesian coordinates:
//! [`RouteUtils::perpendicular_distance`] (foot of the perpendicular) and the
//! per-segment interpolation in [`RouteUtils::interpolate_along_route`].
//! Simplification tolerances and dash spacing are tuned against this
//! approximation, which diverges from true geodesics on long segments or at
//! low zoom.

use crate::animation::easing::Interpolatable;
use crate::core::{
    constants::EARTH_RADIUS_KM,
    geo::{LatLng, LatLngBounds},
};

/// Namespace for route geometry helpers
pub struct RouteUtils;

impl RouteUtils {
    /// Haversine distance in kilometres
    pub fn distance(a: LatLng, b: LatLng) -> f64 {
        let lat1 = a.lat.to_radians();
        let lat2 = b.lat.to_radians();
        let delta_lat = (b.lat - a.lat).to_radians();
        let delta_lng = (b.lng - a.lng).to_radians();

        let h = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Initial great-circle bearing from `a` to `b`, in [0, 360).
    /// Identical points yield 0.
    pub fn bearing(a: LatLng, b: LatLng) -> f64 {
        let lat1 = a.lat.to_radians();
        let lat2 = b.lat.to_radians();
        let delta_lng = (b.lng - a.lng).to_radians();

        let y = delta_lng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();
        let degrees = y.atan2(x).to_degrees().rem_euclid(360.0);
        if degrees >= 360.0 {
            0.0
        } else {
            degrees
        }
    }

    /// Point reached by travelling `distance_km` from `start` on the initial
    /// bearing `bearing_deg`
    pub fn destination(start: LatLng, distance_km: f64, bearing_deg: f64) -> LatLng {
        let angular = distance_km / EARTH_RADIUS_KM;
        let bearing = bearing_deg.to_radians();
        let lat1 = start.lat.to_radians();
        let lng1 = start.lng.to_radians();

        let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
        let lng2 = lng1
            + (bearing.sin() * angular.sin() * lat1.cos())
                .atan2(angular.cos() - lat1.sin() * lat2.sin());

        LatLng::new(lat2.to_degrees(), LatLng::wrap_lng(lng2.to_degrees()))
    }

    /// Distance in kilometres from `point` to the infinite line through
    /// `line_start` and `line_end`. The foot of the perpendicular is found in
    /// planar lat/lng space; a zero-length line falls back to the distance to
    /// `line_start`.
    pub fn perpendicular_distance(point: LatLng, line_start: LatLng, line_end: LatLng) -> f64 {
        let dx = line_end.lng - line_start.lng;
        let dy = line_end.lat - line_start.lat;
        let length_sq = dx * dx + dy * dy;
        if length_sq == 0.0 {
            return Self::distance(point, line_start);
        }

        let u = ((point.lng - line_start.lng) * dx + (point.lat - line_start.lat) * dy) / length_sq;
        let foot = LatLng::new(line_start.lat + u * dy, line_start.lng + u * dx);
        Self::distance(point, foot)
    }

    /// Running arc length at every vertex; the first entry is 0
    pub fn cumulative_distances(points: &[LatLng]) -> Vec<f64> {
        let mut total = 0.0;
        let mut cumulative = Vec::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            if index > 0 {
                total += Self::distance(points[index - 1], *point);
            }
            cumulative.push(total);
        }
        cumulative
    }

    /// Total arc length in kilometres
    pub fn total_distance(points: &[LatLng]) -> f64 {
        points
            .windows(2)
            .map(|pair| Self::distance(pair[0], pair[1]))
            .sum()
    }

    /// Locates the segment holding `fraction` of the arc length. Returns the
    /// segment start index and the local parameter inside it.
    fn locate(points: &[LatLng], fraction: f64) -> Option<(usize, f64)> {
        if points.len() < 2 {
            return None;
        }
        let cumulative = Self::cumulative_distances(points);
        let total = cumulative[cumulative.len() - 1];
        if total <= 0.0 {
            return Some((0, 0.0));
        }

        let target = fraction.clamp(0.0, 1.0) * total;
        let last_segment = points.len() - 2;
        let index = cumulative
            .windows(2)
            .position(|pair| target <= pair[1])
            .unwrap_or(last_segment);

        let segment_length = cumulative[index + 1] - cumulative[index];
        let local = if segment_length > 0.0 {
            ((target - cumulative[index]) / segment_length).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Some((index, local))
    }

    /// Point at `fraction` of the arc length, interpolated linearly in
    /// lat/lng inside the containing segment.
    pub fn interpolate_along_route(points: &[LatLng], fraction: f64) -> LatLng {
        match points {
            [] => LatLng::new(0.0, 0.0),
            [only] => *only,
            _ if fraction <= 0.0 => points[0],
            _ if fraction >= 1.0 => points[points.len() - 1],
            _ => match Self::locate(points, fraction) {
                Some((index, local)) => points[index].lerp(&points[index + 1], local),
                None => points[0],
            },
        }
    }

    /// Prefix of the route up to `fraction` of its arc length, ending at the
    /// interpolated point. Fractions are clamped to [0, 1].
    pub fn truncate_route(points: &[LatLng], fraction: f64) -> Vec<LatLng> {
        let fraction = fraction.clamp(0.0, 1.0);
        if points.len() < 2 || fraction >= 1.0 {
            return points.to_vec();
        }
        if fraction <= 0.0 {
            return vec![points[0]];
        }

        match Self::locate(points, fraction) {
            Some((index, local)) => {
                let mut prefix = points[..=index].to_vec();
                let end = points[index].lerp(&points[index + 1], local);
                if prefix.last() != Some(&end) {
                    prefix.push(end);
                }
                prefix
            }
            None => points.to_vec(),
        }
    }

    /// Bearing of the segment that holds `fraction` of the arc length
    pub fn bearing_at_fraction(points: &[LatLng], fraction: f64) -> f64 {
        match Self::locate(points, fraction) {
            Some((index, _)) => Self::bearing(points[index], points[index + 1]),
            None => 0.0,
        }
    }

    /// Length of the path with lat/lng treated as planar coordinates
    pub fn planar_length(points: &[LatLng]) -> f64 {
        points
            .windows(2)
            .map(|pair| {
                let dx = pair[1].lng - pair[0].lng;
                let dy = pair[1].lat - pair[0].lat;
                (dx * dx + dy * dy).sqrt()
            })
            .sum()
    }

    pub fn bounds(points: &[LatLng]) -> Option<LatLngBounds> {
        LatLngBounds::from_points(points)
    }

    /// Arithmetic mean of the vertices; origin for an empty slice
    pub fn centroid(points: &[LatLng]) -> LatLng {
        if points.is_empty() {
            return LatLng::new(0.0, 0.0);
        }
        let count = points.len() as f64;
        let (lat, lng) = points
            .iter()
            .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
        LatLng::new(lat / count, lng / count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn nyc() -> LatLng {
        LatLng::new(40.7128, -74.0060)
    }

    fn la() -> LatLng {
        LatLng::new(34.0522, -118.2437)
    }

    #[test]
    fn test_distance_known_value() {
        let distance = RouteUtils::distance(nyc(), la());
        assert!((distance - 3936.0).abs() < 10.0, "got {distance}");
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [
            (nyc(), la()),
            (LatLng::new(0.0, 179.9), LatLng::new(0.0, -179.9)),
            (LatLng::new(-89.0, 0.0), LatLng::new(89.0, 90.0)),
        ];
        for (a, b) in pairs {
            assert!((RouteUtils::distance(a, b) - RouteUtils::distance(b, a)).abs() < EPS);
            assert_eq!(RouteUtils::distance(a, a), 0.0);
        }
    }

    #[test]
    fn test_bearing_range_and_cardinals() {
        let origin = LatLng::new(0.0, 0.0);
        assert!((RouteUtils::bearing(origin, LatLng::new(1.0, 0.0)) - 0.0).abs() < EPS);
        assert!((RouteUtils::bearing(origin, LatLng::new(0.0, 1.0)) - 90.0).abs() < EPS);
        assert!((RouteUtils::bearing(origin, LatLng::new(-1.0, 0.0)) - 180.0).abs() < EPS);
        assert!((RouteUtils::bearing(origin, LatLng::new(0.0, -1.0)) - 270.0).abs() < EPS);

        for lng in [-170.0, -45.0, 0.5, 90.0, 179.0] {
            for lat in [-80.0, -1.0, 0.0, 33.0, 80.0] {
                let b = RouteUtils::bearing(nyc(), LatLng::new(lat, lng));
                assert!((0.0..360.0).contains(&b), "bearing {b}");
            }
        }
        assert_eq!(RouteUtils::bearing(nyc(), nyc()), 0.0);
    }

    #[test]
    fn test_destination() {
        let start = nyc();
        for bearing in [0.0, 45.0, 200.0, 359.0] {
            assert!(RouteUtils::destination(start, 0.0, bearing).approx_eq(&start, EPS));
        }

        let north = RouteUtils::destination(LatLng::new(0.0, 0.0), 111.195, 0.0);
        assert!((north.lat - 1.0).abs() < 1e-3);
        assert!(north.lng.abs() < EPS);

        let reached = RouteUtils::destination(nyc(), RouteUtils::distance(nyc(), la()), RouteUtils::bearing(nyc(), la()));
        assert!(reached.approx_eq(&la(), 1e-6));
    }

    #[test]
    fn test_perpendicular_distance() {
        let start = LatLng::new(0.0, 0.0);
        let end = LatLng::new(0.0, 2.0);
        let point = LatLng::new(1.0, 1.0);
        let expected = RouteUtils::distance(point, LatLng::new(0.0, 1.0));
        assert!((RouteUtils::perpendicular_distance(point, start, end) - expected).abs() < EPS);

        // Infinite line: projection beyond the end point still lands on it
        let beyond = LatLng::new(1.0, 5.0);
        let expected = RouteUtils::distance(beyond, LatLng::new(0.0, 5.0));
        assert!((RouteUtils::perpendicular_distance(beyond, start, end) - expected).abs() < EPS);

        // Degenerate line falls back to point distance
        assert!(
            (RouteUtils::perpendicular_distance(point, start, start)
                - RouteUtils::distance(point, start))
            .abs()
                < EPS
        );
    }

    #[test]
    fn test_interpolate_boundaries() {
        let route = vec![nyc(), LatLng::new(38.0, -90.0), la()];
        assert_eq!(RouteUtils::interpolate_along_route(&route, 0.0), route[0]);
        assert_eq!(RouteUtils::interpolate_along_route(&route, -1.0), route[0]);
        assert_eq!(RouteUtils::interpolate_along_route(&route, 1.0), route[2]);
        assert_eq!(RouteUtils::interpolate_along_route(&route, 3.0), route[2]);
        assert_eq!(RouteUtils::interpolate_along_route(&[], 0.5), LatLng::new(0.0, 0.0));
        assert_eq!(RouteUtils::interpolate_along_route(&[la()], 0.5), la());
    }

    #[test]
    fn test_interpolate_midpoint_of_straight_route() {
        let route = vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0), LatLng::new(0.0, 2.0)];
        let mid = RouteUtils::interpolate_along_route(&route, 0.5);
        assert!(mid.approx_eq(&LatLng::new(0.0, 1.0), 1e-9));

        let quarter = RouteUtils::interpolate_along_route(&route, 0.25);
        assert!(quarter.approx_eq(&LatLng::new(0.0, 0.5), 1e-9));
    }

    #[test]
    fn test_truncate_route() {
        let route = vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0), LatLng::new(0.0, 2.0)];

        let half = RouteUtils::truncate_route(&route, 0.75);
        assert_eq!(half.len(), 3);
        assert_eq!(half[..2], route[..2]);
        assert!(half[2].approx_eq(&LatLng::new(0.0, 1.5), 1e-9));

        assert_eq!(RouteUtils::truncate_route(&route, 1.0), route);
        assert_eq!(RouteUtils::truncate_route(&route, 7.0), route);
        assert_eq!(RouteUtils::truncate_route(&route, -1.0), vec![route[0]]);
    }

    #[test]
    fn test_zero_length_segments() {
        let route = vec![LatLng::new(1.0, 1.0), LatLng::new(1.0, 1.0), LatLng::new(1.0, 1.0)];
        assert_eq!(RouteUtils::total_distance(&route), 0.0);
        assert_eq!(RouteUtils::interpolate_along_route(&route, 0.5), route[0]);
        assert_eq!(RouteUtils::bearing_at_fraction(&route, 0.5), 0.0);
    }

    #[test]
    fn test_bearing_at_fraction_follows_segments() {
        let route = vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0), LatLng::new(1.0, 1.0)];
        assert!((RouteUtils::bearing_at_fraction(&route, 0.25) - 90.0).abs() < 1e-6);
        assert!(RouteUtils::bearing_at_fraction(&route, 0.75) < 1e-6);
    }

    #[test]
    fn test_centroid_and_lengths() {
        let route = vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 3.0), LatLng::new(4.0, 3.0)];
        assert_eq!(RouteUtils::planar_length(&route), 7.0);
        assert_eq!(RouteUtils::centroid(&route), LatLng::new(4.0 / 3.0, 2.0));
        assert_eq!(RouteUtils::centroid(&[]), LatLng::new(0.0, 0.0));

        let cumulative = RouteUtils::cumulative_distances(&route);
        assert_eq!(cumulative[0], 0.0);
        assert!((cumulative[2] - RouteUtils::total_distance(&route)).abs() < EPS);
    }
}
