//! Geometry backend seam
//!
//! A host mapping SDK can supply its own distance and closest-point
//! queries through this trait, as long as its distance formula matches
//! the built-in constants; otherwise the built-in haversine
//! implementation is used. A backend that is still initializing reports
//! `is_ready() == false` and the validator degrades to a single ERROR
//! finding instead of failing.

use crate::core::types::GeoPoint;
use crate::geometry::{self, ClosestPoint};

pub trait GeoProvider {
    /// Whether the backend is initialized and able to answer queries
    fn is_ready(&self) -> bool {
        true
    }

    /// Great-circle distance between two coordinates in meters
    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64;

    /// Nearest point on a segment chain; `None` for fewer than 2 points
    fn closest_point_on_polyline(
        &self,
        point: GeoPoint,
        polyline: &[GeoPoint],
    ) -> Option<ClosestPoint>;

    /// Nearest point on a closed ring boundary; `None` for fewer than 3 points
    fn closest_point_on_ring(&self, point: GeoPoint, ring: &[GeoPoint]) -> Option<ClosestPoint>;

    /// Point-in-polygon test on a single ring
    fn point_in_polygon(&self, point: GeoPoint, ring: &[GeoPoint]) -> bool;
}

/// The standalone geometry implementation; always ready
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinGeo;

impl GeoProvider for BuiltinGeo {
    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        geometry::distance(a, b)
    }

    fn closest_point_on_polyline(
        &self,
        point: GeoPoint,
        polyline: &[GeoPoint],
    ) -> Option<ClosestPoint> {
        geometry::closest_point_on_polyline(point, polyline)
    }

    fn closest_point_on_ring(&self, point: GeoPoint, ring: &[GeoPoint]) -> Option<ClosestPoint> {
        geometry::closest_point_on_ring(point, ring)
    }

    fn point_in_polygon(&self, point: GeoPoint, ring: &[GeoPoint]) -> bool {
        geometry::point_in_polygon(point, ring)
    }
}
