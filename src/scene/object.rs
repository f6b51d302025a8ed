//! Placed-object variants and their per-class attributes

use serde::{Deserialize, Serialize};

use crate::core::types::{GeoPoint, ObjectClass, ObjectId};

/// Minimum point count for a road polyline to be complete
pub const MIN_ROAD_POINTS: usize = 2;
/// Minimum point count for a sidewalk ring to be complete
pub const MIN_SIDEWALK_RING_POINTS: usize = 3;

/// Road classification (display/material only, never a clearance input)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadKind {
    MainStreet,
    DistrictStreet,
    LocalRoad,
    AccessRoad,
}

impl RoadKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            RoadKind::MainStreet => "Arterial street",
            RoadKind::DistrictStreet => "District street",
            RoadKind::LocalRoad => "Local road",
            RoadKind::AccessRoad => "Access road",
        }
    }
}

/// Sidewalk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidewalkKind {
    MainPedestrian,
    SecondaryPedestrian,
    BikePedestrian,
}

impl SidewalkKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            SidewalkKind::MainPedestrian => "Main pedestrian path",
            SidewalkKind::SecondaryPedestrian => "Secondary pedestrian path",
            SidewalkKind::BikePedestrian => "Shared bike/pedestrian path",
        }
    }
}

/// Surface material for roads and sidewalks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Asphalt,
    Concrete,
    PavingStones,
    Gravel,
    Dirt,
    RubberCrumb,
}

impl SurfaceKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            SurfaceKind::Asphalt => "Asphalt concrete",
            SurfaceKind::Concrete => "Cement concrete",
            SurfaceKind::PavingStones => "Paving stones / tiles",
            SurfaceKind::Gravel => "Gravel",
            SurfaceKind::Dirt => "Unpaved",
            SurfaceKind::RubberCrumb => "Rubber crumb (play areas)",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FurnitureObject {
    pub id: ObjectId,
    /// Key into the furniture rule catalog
    pub type_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub position: GeoPoint,
    #[serde(default)]
    pub is_accessible: bool,
}

impl FurnitureObject {
    pub fn new(type_id: &str, name: &str, position: GeoPoint, is_accessible: bool) -> Self {
        Self {
            id: ObjectId::new(),
            type_id: type_id.to_string(),
            name: name.to_string(),
            description: String::new(),
            position,
            is_accessible,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvertisingObject {
    pub id: ObjectId,
    /// Key into the advertising rule catalog
    pub type_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub position: GeoPoint,
}

impl AdvertisingObject {
    pub fn new(type_id: &str, name: &str, position: GeoPoint) -> Self {
        Self {
            id: ObjectId::new(),
            type_id: type_id.to_string(),
            name: name.to_string(),
            description: String::new(),
            position,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadObject {
    pub id: ObjectId,
    pub kind: RoadKind,
    pub name: String,
    /// Centerline polyline (open path)
    pub path: Vec<GeoPoint>,
    /// Corridor width in meters
    pub width: f64,
    pub lanes: u8,
    pub surface: SurfaceKind,
}

impl RoadObject {
    /// New road starting at a single point, with creation defaults
    pub fn started_at(kind: RoadKind, name: &str, first: GeoPoint) -> Self {
        Self {
            id: ObjectId::new(),
            kind,
            name: name.to_string(),
            path: vec![first],
            width: 7.0,
            lanes: 2,
            surface: SurfaceKind::Asphalt,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.path.len() >= MIN_ROAD_POINTS
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidewalkObject {
    pub id: ObjectId,
    pub kind: SidewalkKind,
    pub name: String,
    /// Single closed ring (no holes)
    pub ring: Vec<GeoPoint>,
    /// Passage width in meters
    pub width: f64,
    #[serde(default)]
    pub is_accessible_for_disabled: bool,
    pub surface: SurfaceKind,
}

impl SidewalkObject {
    /// New sidewalk starting at a single ring point, with creation defaults
    pub fn started_at(kind: SidewalkKind, name: &str, first: GeoPoint) -> Self {
        Self {
            id: ObjectId::new(),
            kind,
            name: name.to_string(),
            ring: vec![first],
            width: 2.0,
            is_accessible_for_disabled: false,
            surface: SurfaceKind::Asphalt,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.ring.len() >= MIN_SIDEWALK_RING_POINTS
    }
}

/// One placed object of any class. The class discriminant is the enum
/// variant itself and never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "object_class", rename_all = "snake_case")]
pub enum PlacedObject {
    Furniture(FurnitureObject),
    Road(RoadObject),
    Sidewalk(SidewalkObject),
    Advertising(AdvertisingObject),
}

impl PlacedObject {
    pub fn id(&self) -> ObjectId {
        match self {
            PlacedObject::Furniture(o) => o.id,
            PlacedObject::Road(o) => o.id,
            PlacedObject::Sidewalk(o) => o.id,
            PlacedObject::Advertising(o) => o.id,
        }
    }

    pub fn class(&self) -> ObjectClass {
        match self {
            PlacedObject::Furniture(_) => ObjectClass::Furniture,
            PlacedObject::Road(_) => ObjectClass::Road,
            PlacedObject::Sidewalk(_) => ObjectClass::Sidewalk,
            PlacedObject::Advertising(_) => ObjectClass::Advertising,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PlacedObject::Furniture(o) => &o.name,
            PlacedObject::Road(o) => &o.name,
            PlacedObject::Sidewalk(o) => &o.name,
            PlacedObject::Advertising(o) => &o.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_road_completeness() {
        let mut road = RoadObject::started_at(RoadKind::LocalRoad, "Road #1", GeoPoint::new(43.2, 76.9));
        assert!(!road.is_complete());
        road.path.push(GeoPoint::new(43.21, 76.9));
        assert!(road.is_complete());
        assert_eq!(road.width, 7.0);
        assert_eq!(road.lanes, 2);
    }

    #[test]
    fn test_sidewalk_completeness() {
        let mut sw = SidewalkObject::started_at(
            SidewalkKind::MainPedestrian,
            "Sidewalk #1",
            GeoPoint::new(43.2, 76.9),
        );
        sw.ring.push(GeoPoint::new(43.21, 76.9));
        assert!(!sw.is_complete());
        sw.ring.push(GeoPoint::new(43.21, 76.91));
        assert!(sw.is_complete());
        assert_eq!(sw.width, 2.0);
    }

    #[test]
    fn test_placed_object_class_tagging() {
        let bench = PlacedObject::Furniture(FurnitureObject::new(
            "bench",
            "Bench #1",
            GeoPoint::new(43.2, 76.9),
            true,
        ));
        assert_eq!(bench.class(), ObjectClass::Furniture);

        let json = serde_json::to_string(&bench).unwrap();
        assert!(json.contains(r#""object_class":"furniture""#));
        let back: PlacedObject = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), bench.id());
    }
}
