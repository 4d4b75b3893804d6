use geo::HaversineDistance;
use mapcn::prelude::*;
use mapcn::route::renderer::{arrow_fractions, dash_segments};

fn city_route() -> Vec<LatLng> {
    vec![
        LatLng::new(37.7749, -122.4194),
        LatLng::new(37.8044, -122.2712),
        LatLng::new(37.3382, -121.8863),
        LatLng::new(36.9741, -122.0308),
    ]
}

#[test]
fn test_distance_matches_geo_haversine() {
    let pairs = [
        (LatLng::new(51.5074, -0.1278), LatLng::new(48.8566, 2.3522)),
        (LatLng::new(40.7128, -74.0060), LatLng::new(35.6762, 139.6503)),
        (LatLng::new(-33.8688, 151.2093), LatLng::new(-33.9249, 18.4241)),
    ];

    for (a, b) in pairs {
        let ours = RouteUtils::distance(a, b);
        let theirs = geo::Point::from(a).haversine_distance(&geo::Point::from(b)) / 1000.0;
        assert!(
            ((ours - theirs) / theirs).abs() < 1e-4,
            "{ours} km vs {theirs} km"
        );
    }
}

#[test]
fn test_destination_inverts_distance_and_bearing() {
    let start = LatLng::new(52.52, 13.405);
    let end = RouteUtils::destination(start, 250.0, 75.0);
    assert!((RouteUtils::distance(start, end) - 250.0).abs() < 1e-6);
    assert!((RouteUtils::bearing(start, end) - 75.0).abs() < 1e-6);
}

#[test]
fn test_simplify_keeps_endpoints_and_shrinks() {
    let mut points = Vec::new();
    for i in 0..=100 {
        let t = i as f64 / 100.0;
        // gentle wiggle well under a kilometre
        points.push(LatLng::new(45.0 + t, 7.0 + t + 0.0005 * (t * 40.0).sin()));
    }

    let simplified = simplify_route(&points, 0.5);
    assert_eq!(simplified.first(), points.first());
    assert_eq!(simplified.last(), points.last());
    assert!(simplified.len() < points.len() / 4);

    // zero tolerance keeps every point that is off the line
    assert!(simplify_route(&points, 0.0).len() > simplified.len());
}

#[test]
fn test_route_spec_derived_values() {
    let route = RouteSpec::new(city_route()).with_id("bay");
    let total = route.total_distance_km();
    assert!(total > 100.0 && total < 200.0);
    assert_eq!(route.start(), Some(city_route()[0]));
    assert_eq!(route.end(), Some(city_route()[3]));

    let bounds = route.bounds().unwrap();
    assert!(city_route().iter().all(|p| bounds.contains(p)));
}

#[test]
fn test_partial_reveal_length() {
    let points = city_route();
    let total = RouteUtils::total_distance(&points);
    let half = RouteUtils::truncate_route(&points, 0.5);
    // the last piece is interpolated in lat/lng, so allow a small error
    let revealed = RouteUtils::total_distance(&half);
    assert!(((revealed - total / 2.0) / total).abs() < 1e-3);
    assert_eq!(RouteUtils::truncate_route(&points, 1.0), points);
}

#[test]
fn test_arrows_are_evenly_spaced() {
    let fractions = arrow_fractions(10.0, 2.5);
    assert_eq!(fractions.len(), 4);
    for pair in fractions.windows(2) {
        assert!((pair[1] - pair[0] - 0.2).abs() < 1e-9);
    }
    assert!(arrow_fractions(1.0, 5.0).is_empty());
}

#[test]
fn test_dashes_cover_route() {
    let points = vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0)];
    let dashes = dash_segments(&points, [10.0, 10.0], 100.0);
    // 100 px of route, 20 px per dash period
    assert_eq!(dashes.len(), 5);
    assert!(dashes.iter().all(|dash| dash.len() >= 2));
}

#[test]
fn test_renderer_skips_single_point_routes() {
    let viewport = Viewport::new(
        CameraState::new(LatLng::new(0.0, 0.0), 5.0),
        Point::new(400.0, 400.0),
    );
    let renderer = RouteRenderer::new(&viewport);
    assert!(renderer
        .render(&RouteSpec::new(vec![LatLng::new(0.0, 0.0)]))
        .is_empty());
}
