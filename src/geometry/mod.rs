//! Pure geometry over geodetic coordinates
//!
//! All clearance checks go through these functions so that distances near
//! rule thresholds come from one formula. Point-to-segment projection runs
//! in a local equirectangular frame centered on the query point, then the
//! returned distance is recomputed with the haversine formula for
//! consistency with `distance`.

use geo::Contains;
use geo_types::{Coord, LineString, Polygon};

use crate::core::types::GeoPoint;

/// Earth radius in meters, matching the host map SDK's distance formula
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Nearest point on a polyline or ring, with its haversine distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    pub position: GeoPoint,
    pub distance: f64,
}

/// Great-circle distance between two coordinates in meters (haversine)
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lon - a.lon).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Nearest point on a connected segment chain (not just its vertices).
///
/// Returns `None` for fewer than 2 points; callers treat such polylines
/// as incomplete and skip their checks.
pub fn closest_point_on_polyline(point: GeoPoint, polyline: &[GeoPoint]) -> Option<ClosestPoint> {
    if polyline.len() < 2 {
        return None;
    }
    closest_on_segments(point, polyline.windows(2).map(|w| (w[0], w[1])))
}

/// Nearest point on a closed ring's boundary, valid whether `point` lies
/// inside or outside the ring. `None` for fewer than 3 points.
pub fn closest_point_on_ring(point: GeoPoint, ring: &[GeoPoint]) -> Option<ClosestPoint> {
    if ring.len() < 3 {
        return None;
    }
    let closing = (ring[ring.len() - 1], ring[0]);
    closest_on_segments(
        point,
        ring.windows(2)
            .map(|w| (w[0], w[1]))
            .chain(std::iter::once(closing)),
    )
}

/// Point-in-polygon test on a single non-holed ring.
/// Fewer than 3 points is not a polygon and contains nothing.
pub fn point_in_polygon(point: GeoPoint, ring: &[GeoPoint]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut coords: Vec<Coord<f64>> = ring
        .iter()
        .map(|p| Coord { x: p.lon, y: p.lat })
        .collect();
    coords.push(coords[0]);
    let polygon = Polygon::new(LineString::new(coords), vec![]);
    polygon.contains(&point.to_point())
}

/// Total length of a polyline in meters
pub fn polyline_length(polyline: &[GeoPoint]) -> f64 {
    polyline
        .windows(2)
        .map(|w| distance(w[0], w[1]))
        .sum()
}

/// Middle vertex of a polyline, or the average of the two central
/// vertices when the point count is even
pub fn midpoint(polyline: &[GeoPoint]) -> Option<GeoPoint> {
    if polyline.is_empty() {
        return None;
    }
    let mid = polyline.len() / 2;
    if polyline.len() % 2 == 0 {
        let a = polyline[mid - 1];
        let b = polyline[mid];
        Some(GeoPoint::new((a.lat + b.lat) / 2.0, (a.lon + b.lon) / 2.0))
    } else {
        Some(polyline[mid])
    }
}

fn closest_on_segments(
    point: GeoPoint,
    segments: impl Iterator<Item = (GeoPoint, GeoPoint)>,
) -> Option<ClosestPoint> {
    let mut best: Option<ClosestPoint> = None;
    for (a, b) in segments {
        let candidate = closest_on_segment(point, a, b);
        let d = distance(point, candidate);
        match best {
            Some(ref current) if current.distance <= d => {}
            _ => {
                best = Some(ClosestPoint {
                    position: candidate,
                    distance: d,
                })
            }
        }
    }
    best
}

/// Nearest point on the segment a-b in a local equirectangular frame
/// centered on `point`
fn closest_on_segment(point: GeoPoint, a: GeoPoint, b: GeoPoint) -> GeoPoint {
    let cos_lat = point.lat.to_radians().cos();
    let to_local = |p: GeoPoint| -> (f64, f64) {
        (
            (p.lon - point.lon).to_radians() * cos_lat * EARTH_RADIUS_M,
            (p.lat - point.lat).to_radians() * EARTH_RADIUS_M,
        )
    };

    let (ax, ay) = to_local(a);
    let (bx, by) = to_local(b);
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return a;
    }

    // Query point is the local origin
    let t = ((-ax * dx - ay * dy) / len_sq).clamp(0.0, 1.0);
    GeoPoint::new(a.lat + (b.lat - a.lat) * t, a.lon + (b.lon - a.lon) * t)
}
