//! Kerbside - rule-based placement validation for urban street objects
//!
//! The crate models an editable scene of street furniture, advertising
//! objects, roads, and sidewalks, and validates candidate placements
//! against a per-type rule catalog. Geodesic measurements use a
//! spherical-earth model; findings come back classified as INFO,
//! WARNING, or ERROR in a fixed evaluation order.

pub mod core;
pub mod geometry;
pub mod rules;
pub mod scene;
pub mod validation;
