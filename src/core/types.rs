//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for placed objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geodetic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Convert to a planar geo point (x = longitude, y = latitude)
    pub fn to_point(self) -> geo_types::Point<f64> {
        geo_types::Point::new(self.lon, self.lat)
    }
}

/// Which of the four scene collections an object belongs to.
/// Immutable for the lifetime of the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectClass {
    Furniture,
    Road,
    Sidewalk,
    Advertising,
}

impl std::fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ObjectClass::Furniture => "furniture",
            ObjectClass::Road => "road",
            ObjectClass::Sidewalk => "sidewalk",
            ObjectClass::Advertising => "advertising",
        };
        write!(f, "{}", s)
    }
}

/// Classes whose geometry is a single coordinate. Only these are
/// candidates for placement validation; roads and sidewalks enter the
/// scene through the drawing session instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointClass {
    Furniture,
    Advertising,
}

impl From<PointClass> for ObjectClass {
    fn from(class: PointClass) -> Self {
        match class {
            PointClass::Furniture => ObjectClass::Furniture,
            PointClass::Advertising => ObjectClass::Advertising,
        }
    }
}

impl std::fmt::Display for PointClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ObjectClass::from(*self).fmt(f)
    }
}

/// Classes drawn as multi-click geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawnClass {
    Road,
    Sidewalk,
}

impl From<DrawnClass> for ObjectClass {
    fn from(class: DrawnClass) -> Self {
        match class {
            DrawnClass::Road => ObjectClass::Road,
            DrawnClass::Sidewalk => ObjectClass::Sidewalk,
        }
    }
}

impl std::fmt::Display for DrawnClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ObjectClass::from(*self).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_uniqueness() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_object_id_hash() {
        use std::collections::HashMap;
        let id = ObjectId::new();
        let mut map: HashMap<ObjectId, &str> = HashMap::new();
        map.insert(id, "bench");
        assert_eq!(map.get(&id), Some(&"bench"));
    }

    #[test]
    fn test_point_class_to_object_class() {
        assert_eq!(ObjectClass::from(PointClass::Furniture), ObjectClass::Furniture);
        assert_eq!(ObjectClass::from(PointClass::Advertising), ObjectClass::Advertising);
        assert_eq!(ObjectClass::from(DrawnClass::Road), ObjectClass::Road);
        assert_eq!(ObjectClass::from(DrawnClass::Sidewalk), ObjectClass::Sidewalk);
    }

    #[test]
    fn test_geo_point_to_planar() {
        let p = GeoPoint::new(43.238566, 76.899828);
        let planar = p.to_point();
        assert_eq!(planar.x(), 76.899828);
        assert_eq!(planar.y(), 43.238566);
    }
}
