//! Rule catalog: per-object-type placement configuration
//!
//! The built-in table carries the municipal design-code values for street
//! furniture and advertising objects. Deployments can override or extend
//! entries from TOML files; the file format mirrors the in-memory shape,
//! so a clearance is written either as a bare number or as a
//! `{ min, default, max }` table.

use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{KerbsideError, Result};
use crate::core::types::PointClass;
use crate::rules::clearance::ClearanceRule;

/// Placement configuration for one object type (immutable catalog entry)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectTypeRule {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub can_be_accessible: bool,
    #[serde(default)]
    pub min_distance_to_path_edge: Option<ClearanceRule>,
    #[serde(default)]
    pub min_distance_to_road_edge: Option<ClearanceRule>,
    #[serde(default)]
    pub min_distance_to_other: Option<ClearanceRule>,
    /// Trash cans: distance band to the nearest bench
    #[serde(default)]
    pub min_distance_to_bench: Option<ClearanceRule>,
    /// Advisory catalog data, not evaluated by the validator
    #[serde(default)]
    pub min_distance_to_entrances: Option<ClearanceRule>,
    #[serde(default)]
    pub min_distance_to_walls: Option<ClearanceRule>,
    #[serde(default)]
    pub min_distance_to_residential: Option<ClearanceRule>,
    #[serde(default)]
    pub max_distance_from_entrance: Option<f64>,
    #[serde(default)]
    pub max_units_per_entrance: Option<u32>,
    /// Approximate footprint width used for passage-blocking checks
    pub effective_width: f64,
    #[serde(default)]
    pub placement_context: Vec<String>,
    /// Human-readable design-code guidance surfaced next to the findings
    #[serde(default)]
    pub guidance: Vec<String>,
}

impl ObjectTypeRule {
    /// Entry with no clearance rules; built-in definitions fill in the
    /// rest with struct update syntax
    pub fn new(id: &str, display_name: &str, effective_width: f64) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            can_be_accessible: false,
            min_distance_to_path_edge: None,
            min_distance_to_road_edge: None,
            min_distance_to_other: None,
            min_distance_to_bench: None,
            min_distance_to_entrances: None,
            min_distance_to_walls: None,
            min_distance_to_residential: None,
            max_distance_from_entrance: None,
            max_units_per_entrance: None,
            effective_width,
            placement_context: Vec::new(),
            guidance: Vec::new(),
        }
    }
}

/// TOML override file: lists of entries per class
#[derive(Debug, Default, Deserialize)]
struct RuleFile {
    #[serde(default)]
    furniture: Vec<ObjectTypeRule>,
    #[serde(default)]
    advertising: Vec<ObjectTypeRule>,
}

/// Read-only mapping from object-type identifier to its placement rule
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    furniture: AHashMap<String, ObjectTypeRule>,
    advertising: AHashMap<String, ObjectTypeRule>,
}

impl RuleCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the built-in municipal rule table
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for rule in builtin_furniture() {
            catalog.register_furniture(rule);
        }
        for rule in builtin_advertising() {
            catalog.register_advertising(rule);
        }
        catalog
    }

    /// Register or replace a furniture entry
    pub fn register_furniture(&mut self, rule: ObjectTypeRule) {
        self.furniture.insert(rule.id.clone(), rule);
    }

    /// Register or replace an advertising entry
    pub fn register_advertising(&mut self, rule: ObjectTypeRule) {
        self.advertising.insert(rule.id.clone(), rule);
    }

    pub fn furniture(&self, id: &str) -> Option<&ObjectTypeRule> {
        self.furniture.get(id)
    }

    pub fn advertising(&self, id: &str) -> Option<&ObjectTypeRule> {
        self.advertising.get(id)
    }

    /// Look up the rule for a point-object candidate
    pub fn point_rule(&self, class: PointClass, id: &str) -> Option<&ObjectTypeRule> {
        match class {
            PointClass::Furniture => self.furniture(id),
            PointClass::Advertising => self.advertising(id),
        }
    }

    /// Type identifiers per class, sorted for stable listings
    pub fn type_ids(&self, class: PointClass) -> Vec<&str> {
        let map = match class {
            PointClass::Furniture => &self.furniture,
            PointClass::Advertising => &self.advertising,
        };
        let mut ids: Vec<&str> = map.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// All entries of one class, sorted by identifier
    pub fn entries(&self, class: PointClass) -> Vec<&ObjectTypeRule> {
        let map = match class {
            PointClass::Furniture => &self.furniture,
            PointClass::Advertising => &self.advertising,
        };
        let mut rules: Vec<&ObjectTypeRule> = map.values().collect();
        rules.sort_unstable_by(|a, b| a.id.cmp(&b.id));
        rules
    }

    /// Merge entries from a TOML rule file, overriding by id
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)?;
        let file: RuleFile = toml::from_str(&content)
            .map_err(|e| KerbsideError::ParseError(format!("{}: {}", path.display(), e)))?;
        let count = file.furniture.len() + file.advertising.len();
        for rule in file.furniture {
            self.register_furniture(rule);
        }
        for rule in file.advertising {
            self.register_advertising(rule);
        }
        Ok(count)
    }

    /// Merge all .toml files from a directory (non-recursive, sorted by
    /// file name so overrides apply in a deterministic order)
    pub fn load_directory(&mut self, path: &Path) -> Result<usize> {
        let mut files: Vec<_> = std::fs::read_dir(path)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        files.sort();

        let mut count = 0;
        for file in files {
            count += self.load_file(&file)?;
        }
        Ok(count)
    }
}

fn num(value: f64) -> Option<ClearanceRule> {
    Some(ClearanceRule::scalar(value))
}

fn band(min: Option<f64>, default: Option<f64>, max: Option<f64>) -> Option<ClearanceRule> {
    Some(ClearanceRule::range(min, default, max))
}

fn contexts(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn texts(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

fn builtin_furniture() -> Vec<ObjectTypeRule> {
    vec![
        ObjectTypeRule {
            can_be_accessible: true,
            min_distance_to_path_edge: band(Some(0.5), Some(1.0), Some(1.5)),
            min_distance_to_road_edge: band(Some(1.5), Some(2.0), None),
            min_distance_to_other: num(1.5),
            placement_context: contexts(&[
                "sidewalk_edge",
                "recreation_area",
                "bus_stop",
                "near_entrance",
            ]),
            guidance: texts(&[
                "Place along pedestrian paths, in recreation areas, at stops, and near building entrances.",
                "For accessibility: some benches need armrests/backrests and at least 0.8 m of clear space beside them for a wheelchair.",
                "Must not obstruct the main pedestrian flow (keep 1.2-1.8 m of clear passage).",
                "Materials: treated wood, metal, concrete, composites.",
            ]),
            ..ObjectTypeRule::new("bench", "Bench", 0.6)
        },
        ObjectTypeRule {
            min_distance_to_path_edge: band(Some(0.3), Some(0.5), None),
            min_distance_to_road_edge: band(Some(1.0), Some(1.5), None),
            min_distance_to_other: num(1.0),
            min_distance_to_bench: band(Some(0.8), Some(1.0), Some(1.5)),
            min_distance_to_entrances: band(Some(3.0), Some(5.0), Some(10.0)),
            placement_context: contexts(&[
                "near_bench",
                "near_entrance",
                "bus_stop",
                "high_traffic_area",
                "along_sidewalk",
            ]),
            guidance: texts(&[
                "Near building entrances, stops, benches, along pedestrian paths, in high-traffic spots.",
                "Quantity follows foot traffic (typically one every 20-50 m).",
                "Must not obstruct pedestrian movement.",
            ]),
            ..ObjectTypeRule::new("trash_can", "Trash can", 0.4)
        },
        ObjectTypeRule {
            min_distance_to_path_edge: band(Some(0.6), Some(0.75), Some(1.0)),
            min_distance_to_road_edge: band(Some(0.6), Some(0.75), Some(1.0)),
            min_distance_to_other: band(Some(5.0), Some(15.0), Some(30.0)),
            placement_context: contexts(&["along_street", "along_sidewalk", "park_area", "square"]),
            guidance: texts(&[
                "Provide the normative illumination level.",
                "Spacing between lampposts per the lighting calculation (typically 15-30 m).",
                "Must not blind drivers or pedestrians.",
            ]),
            ..ObjectTypeRule::new("lamppost", "Lamppost", 0.3)
        },
        ObjectTypeRule {
            can_be_accessible: true,
            min_distance_to_path_edge: band(Some(0.5), Some(1.0), None),
            min_distance_to_road_edge: band(Some(1.5), Some(2.0), None),
            min_distance_to_walls: band(Some(0.5), Some(0.8), None),
            min_distance_to_other: num(1.0),
            placement_context: contexts(&[
                "near_public_building",
                "near_transport_hub",
                "recreation_area",
                "educational_institution",
            ]),
            guidance: texts(&[
                "Near public buildings, shopping centers, transport hubs, schools.",
                "Must leave clear pedestrian passage.",
                "Place on hard surfacing with room to maneuver a bicycle.",
            ]),
            ..ObjectTypeRule::new("bike_rack", "Bicycle rack", 0.8)
        },
        ObjectTypeRule {
            can_be_accessible: true,
            min_distance_to_path_edge: band(Some(0.5), Some(1.0), None),
            min_distance_to_road_edge: band(Some(2.0), Some(2.5), None),
            min_distance_to_other: num(1.5),
            placement_context: contexts(&[
                "high_traffic_area",
                "near_landmark",
                "park_entrance",
                "bus_stop",
                "intersection",
            ]),
            guidance: texts(&[
                "Place where pedestrian flow is heaviest: intersections, stops, landmarks.",
                "Fade-resistant materials; avoid protruding details that collect snow.",
                "Free-standing boards: flush foundation, safety glazing, internal lighting.",
                "Keep at least 20 m from pedestrian crossings, 3 m from trees, 1 m from power lines, 5 m from subway entrances.",
            ]),
            ..ObjectTypeRule::new("info_board", "Information board", 0.5)
        },
        ObjectTypeRule {
            can_be_accessible: true,
            min_distance_to_path_edge: band(Some(0.5), Some(1.0), None),
            min_distance_to_road_edge: band(Some(2.0), None, None),
            min_distance_to_other: num(1.0),
            max_distance_from_entrance: Some(15.0),
            max_units_per_entrance: Some(1),
            placement_context: contexts(&[
                "near_intersection",
                "near_object_entrance",
                "tourist_route",
            ]),
            guidance: texts(&[
                "See the information-board rules.",
                "Organization signs: at most 1 unit, within 15 m of the entrance, at most 1.5 x 0.9 m.",
                "Must not obscure traffic signs or signals.",
            ]),
            ..ObjectTypeRule::new("sign_custom", "Directional sign", 0.3)
        },
        ObjectTypeRule {
            min_distance_to_path_edge: band(None, Some(0.1), None),
            min_distance_to_road_edge: band(None, Some(0.3), None),
            min_distance_to_other: num(0.0),
            placement_context: contexts(&[
                "boundary_marker",
                "safety_barrier",
                "decorative_element",
            ]),
            guidance: texts(&[
                "Must match the overall streetscape style.",
                "Height and type follow the functional purpose.",
                "Must not create blind spots for drivers or pedestrians.",
            ]),
            ..ObjectTypeRule::new("fence", "Fence", 0.1)
        },
        ObjectTypeRule {
            min_distance_to_path_edge: band(Some(0.3), Some(0.5), None),
            min_distance_to_road_edge: band(Some(1.0), Some(1.5), None),
            min_distance_to_other: num(0.5),
            placement_context: contexts(&[
                "sidewalk_decoration",
                "entrance_group",
                "recreation_area",
            ]),
            guidance: texts(&[
                "Must not obstruct pedestrian passage.",
                "Materials and design should match the surroundings.",
                "Ensure stability.",
            ]),
            ..ObjectTypeRule::new("flower_pot", "Planter", 0.6)
        },
        ObjectTypeRule {
            can_be_accessible: true,
            min_distance_to_path_edge: band(Some(1.0), Some(1.5), None),
            min_distance_to_road_edge: band(Some(2.0), Some(3.0), None),
            min_distance_to_other: num(3.0),
            placement_context: contexts(&["bus_stop", "recreation_area", "park"]),
            guidance: texts(&[
                "The structure must be sturdy and safe, sheltering from rain and sun.",
                "Transit shelters: keep the approaching transport visible, provide seating, a trash can, and information.",
                "Accessible: level floor and enough clear space for a wheelchair.",
            ]),
            ..ObjectTypeRule::new("shelter_pavilion", "Shelter / pavilion", 2.0)
        },
        ObjectTypeRule {
            can_be_accessible: true,
            min_distance_to_path_edge: band(Some(1.5), Some(2.0), None),
            min_distance_to_road_edge: band(Some(5.0), Some(10.0), None),
            min_distance_to_other: num(3.0),
            placement_context: contexts(&["playground_area"]),
            guidance: texts(&[
                "Requires impact-absorbing surfacing.",
                "Equipment must be certified and matched to age groups.",
                "Keep safety zones around each element (typically 1.5-3 m).",
                "Fencing may be required, especially near roads.",
            ]),
            ..ObjectTypeRule::new("playground_equipment", "Playground element", 1.5)
        },
        ObjectTypeRule {
            can_be_accessible: true,
            min_distance_to_path_edge: band(Some(1.0), Some(1.5), None),
            min_distance_to_road_edge: band(Some(3.0), Some(5.0), None),
            min_distance_to_other: num(2.0),
            placement_context: contexts(&["sports_ground", "park_area", "recreation_zone"]),
            guidance: texts(&[
                "Requires safe surfacing and safety zones.",
                "Equipment must be sturdy and safe.",
                "Must not interfere with other activities.",
            ]),
            ..ObjectTypeRule::new("sports_equipment", "Sports equipment", 1.0)
        },
        ObjectTypeRule {
            can_be_accessible: true,
            min_distance_to_path_edge: band(Some(0.5), Some(0.8), None),
            min_distance_to_road_edge: band(Some(2.0), None, None),
            min_distance_to_other: num(1.5),
            placement_context: contexts(&["park", "recreation_area", "sports_ground", "promenade"]),
            guidance: texts(&[
                "Ensure hygiene and accessibility (including varied heights).",
                "Requires water supply and drainage.",
                "Do not place next to trash cans.",
            ]),
            ..ObjectTypeRule::new("drinking_fountain", "Drinking fountain", 0.5)
        },
        ObjectTypeRule {
            min_distance_to_path_edge: band(Some(0.2), Some(0.3), None),
            min_distance_to_road_edge: band(Some(0.2), Some(0.3), None),
            min_distance_to_other: band(Some(0.5), Some(0.75), None),
            placement_context: contexts(&[
                "path_edge",
                "road_edge",
                "parking_boundary",
                "prevent_vehicle_access",
                "zone_separation",
            ]),
            guidance: texts(&[
                "Must not obstruct wheelchair users unless intended as an access restriction.",
                "Must be visible: color, reflective elements.",
                "Typical height 0.5-0.9 m.",
            ]),
            ..ObjectTypeRule::new("bollard", "Bollard", 0.15)
        },
        ObjectTypeRule {
            can_be_accessible: true,
            min_distance_to_path_edge: band(Some(1.0), Some(1.5), None),
            min_distance_to_road_edge: band(Some(5.0), None, None),
            min_distance_to_other: num(5.0),
            min_distance_to_residential: num(20.0),
            placement_context: contexts(&["park", "square", "tourist_area", "transport_hub"]),
            guidance: texts(&[
                "Wheelchair accessibility is mandatory.",
                "Sanitary norms apply.",
                "Ventilation, lighting, signage.",
            ]),
            ..ObjectTypeRule::new("public_toilet", "Public toilet", 2.5)
        },
    ]
}

fn builtin_advertising() -> Vec<ObjectTypeRule> {
    vec![
        ObjectTypeRule {
            guidance: texts(&[
                "Placement follows the city advertising schemes.",
                "Must not block sight lines.",
            ]),
            ..ObjectTypeRule::new("billboard_static", "Static billboard", 0.5)
        },
        ObjectTypeRule {
            guidance: texts(&["Typically at transit stops or in pedestrian zones."]),
            ..ObjectTypeRule::new("city_light", "City light (lightbox)", 0.3)
        },
        ObjectTypeRule {
            guidance: texts(&["Requires a permit; usually temporary."]),
            ..ObjectTypeRule::new("banner_stretch", "Stretch banner", 0.1)
        },
    ]
}
