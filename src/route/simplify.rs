use crate::core::geo::LatLng;
use crate::route::utils::RouteUtils;

/// Douglas-Peucker simplification.
///
/// `tolerance` is in kilometres, measured with
/// [`RouteUtils::perpendicular_distance`] (planar foot of the perpendicular),
/// so a suitable value depends on the scale of the route. Inputs with fewer
/// than three points are returned unchanged; the first and last points are
/// always kept.
pub fn simplify_route(points: &[LatLng], tolerance: f64) -> Vec<LatLng> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;
    mark_kept(points, 0, points.len() - 1, tolerance, &mut keep);

    points
        .iter()
        .zip(keep)
        .filter_map(|(point, kept)| kept.then_some(*point))
        .collect()
}

fn mark_kept(points: &[LatLng], first: usize, last: usize, tolerance: f64, keep: &mut [bool]) {
    if last <= first + 1 {
        return;
    }

    let (index, max_distance) = (first + 1..last)
        .map(|i| {
            (
                i,
                RouteUtils::perpendicular_distance(points[i], points[first], points[last]),
            )
        })
        .fold((first, f64::NEG_INFINITY), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        });

    if max_distance > tolerance {
        keep[index] = true;
        mark_kept(points, first, index, tolerance, keep);
        mark_kept(points, index, last, tolerance, keep);
    }
}
