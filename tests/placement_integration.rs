//! Placement validation integration tests
//!
//! These exercise the full pipeline: built-in catalog, scene store, and
//! validator, with coordinates built from metric offsets around a fixed
//! city-center origin.

use kerbside::core::types::{GeoPoint, PointClass};
use kerbside::geometry::EARTH_RADIUS_M;
use kerbside::rules::RuleCatalog;
use kerbside::scene::{
    FurnitureObject, PlacedObject, RoadKind, RoadObject, SidewalkKind, SidewalkObject, SurfaceKind,
};
use kerbside::scene::SceneStore;
use kerbside::validation::{Candidate, PlacementValidator, Severity};

const METERS_PER_DEG_LAT: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
const ORIGIN: GeoPoint = GeoPoint {
    lat: 43.238566,
    lon: 76.899828,
};

/// Coordinate `east`/`north` meters from the origin
fn at(east: f64, north: f64) -> GeoPoint {
    let lat = ORIGIN.lat + north / METERS_PER_DEG_LAT;
    let lon = ORIGIN.lon + east / (METERS_PER_DEG_LAT * ORIGIN.lat.to_radians().cos());
    GeoPoint::new(lat, lon)
}

fn furniture_candidate(type_id: &str, position: GeoPoint) -> Candidate<'_> {
    Candidate {
        class: PointClass::Furniture,
        type_id,
        position,
        accessible: false,
    }
}

/// East-west road through the origin
fn east_west_road(width: f64) -> RoadObject {
    RoadObject {
        path: vec![at(-100.0, 0.0), at(100.0, 0.0)],
        width,
        ..RoadObject::started_at(RoadKind::LocalRoad, "Main Street", at(-100.0, 0.0))
    }
}

/// Square sidewalk ring centered on the origin, `half` meters from
/// center to each edge
fn square_sidewalk(half: f64, width: f64) -> SidewalkObject {
    SidewalkObject {
        ring: vec![
            at(-half, -half),
            at(half, -half),
            at(half, half),
            at(-half, half),
        ],
        width,
        kind: SidewalkKind::MainPedestrian,
        surface: SurfaceKind::PavingStones,
        ..SidewalkObject::started_at(SidewalkKind::MainPedestrian, "Plaza walk", at(-half, -half))
    }
}

#[test]
fn test_bench_too_close_to_road_edge() {
    // Road width 2.0: edges sit 1.0 m from the centerline. A bench 1.6 m
    // from the centerline has 0.6 m of clearance, below its 1.5 m minimum.
    let mut scene = SceneStore::new();
    scene.add(PlacedObject::Road(east_west_road(2.0)));

    let validator = PlacementValidator::new(RuleCatalog::builtin());
    let report = validator.validate(&furniture_candidate("bench", at(0.0, 1.6)), &scene, None);

    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].severity, Severity::Error);
    assert!(!report.passed_roads);
    assert!(report.blocks_commit());
}

#[test]
fn test_bench_clear_of_road_edge() {
    let mut scene = SceneStore::new();
    scene.add(PlacedObject::Road(east_west_road(2.0)));

    // 6 m from the centerline: 5 m of clearance, comfortably over 1.5 m
    let validator = PlacementValidator::new(RuleCatalog::builtin());
    let report = validator.validate(&furniture_candidate("bench", at(0.0, 6.0)), &scene, None);

    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].severity, Severity::Info);
    assert!(!report.blocks_commit());
}

#[test]
fn test_narrow_sidewalk_passage_warning() {
    // Sidewalk width 2.0 < bench effective width 0.6 + passage 1.5
    let mut scene = SceneStore::new();
    scene.add(PlacedObject::Sidewalk(square_sidewalk(10.0, 2.0)));

    let validator = PlacementValidator::new(RuleCatalog::builtin());
    let report = validator.validate(&furniture_candidate("bench", at(0.0, 0.0)), &scene, None);

    assert!(report.has_warnings());
    assert!(!report.blocks_commit(), "warnings must not block");
    let severities: Vec<Severity> = report.findings.iter().map(|f| f.severity).collect();
    assert_eq!(severities, vec![Severity::Warning, Severity::Info]);
}

#[test]
fn test_wide_sidewalk_no_warning() {
    let mut scene = SceneStore::new();
    scene.add(PlacedObject::Sidewalk(square_sidewalk(10.0, 3.0)));

    let validator = PlacementValidator::new(RuleCatalog::builtin());
    let report = validator.validate(&furniture_candidate("bench", at(0.0, 0.0)), &scene, None);

    assert!(!report.has_warnings());
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].severity, Severity::Info);
}

#[test]
fn test_outside_sidewalk_edge_clearance() {
    let mut scene = SceneStore::new();
    scene.add(PlacedObject::Sidewalk(square_sidewalk(10.0, 3.0)));

    let validator = PlacementValidator::new(RuleCatalog::builtin());

    // 0.2 m past the east edge: below the bench 0.5 m path-edge minimum
    let report = validator.validate(&furniture_candidate("bench", at(10.2, 0.0)), &scene, None);
    assert!(report.blocks_commit());
    assert!(!report.passed_sidewalks);

    // 2 m past the edge is fine
    let report = validator.validate(&furniture_candidate("bench", at(12.0, 0.0)), &scene, None);
    assert!(!report.blocks_commit());
}

#[test]
fn test_trash_can_bench_band() {
    let mut scene = SceneStore::new();
    scene.add(PlacedObject::Furniture(FurnitureObject::new(
        "bench",
        "Bench #1",
        at(0.0, 0.0),
        false,
    )));
    let validator = PlacementValidator::new(RuleCatalog::builtin());

    // 0.5 m: below the 0.8 m bench minimum (and the 1.0 m other-object
    // minimum), so errors from both checks
    let report = validator.validate(
        &furniture_candidate("trash_can", at(0.0, 0.5)),
        &scene,
        None,
    );
    assert!(!report.passed_clearance);
    assert!(!report.passed_adjacency);

    // 1.2 m: inside the recommended 0.8-1.5 m band, no advisory
    let report = validator.validate(
        &furniture_candidate("trash_can", at(0.0, 1.2)),
        &scene,
        None,
    );
    assert!(!report.blocks_commit());
    assert!(!report
        .findings
        .iter()
        .any(|f| f.message.contains("Recommended")));

    // 10 m: clear of everything but far from any bench, advisory INFO
    let report = validator.validate(
        &furniture_candidate("trash_can", at(0.0, 10.0)),
        &scene,
        None,
    );
    assert!(!report.blocks_commit());
    assert!(report
        .findings
        .iter()
        .any(|f| f.severity == Severity::Info && f.message.contains("Recommended")));
}

#[test]
fn test_finding_order_clearance_before_roads() {
    let mut scene = SceneStore::new();
    scene.add(PlacedObject::Road(east_west_road(2.0)));
    scene.add(PlacedObject::Furniture(FurnitureObject::new(
        "bench",
        "Bench #1",
        at(0.0, 2.0),
        false,
    )));

    // 1.0 m from the existing bench and 0.6 m clearance to the road edge:
    // both violated, furniture finding listed first
    let validator = PlacementValidator::new(RuleCatalog::builtin());
    let report = validator.validate(&furniture_candidate("bench", at(0.0, 1.6)), &scene, None);

    assert_eq!(report.findings.len(), 2);
    assert!(report.findings[0].message.contains("Bench #1"));
    assert!(report.findings[1].message.contains("Main Street"));
}

#[test]
fn test_repeated_validation_is_deterministic() {
    let mut scene = SceneStore::new();
    scene.add(PlacedObject::Road(east_west_road(7.0)));
    scene.add(PlacedObject::Sidewalk(square_sidewalk(20.0, 2.5)));
    for i in 0..5 {
        scene.add(PlacedObject::Furniture(FurnitureObject::new(
            "bench",
            &format!("Bench #{i}"),
            at(i as f64 * 3.0, 8.0),
            false,
        )));
    }

    let validator = PlacementValidator::new(RuleCatalog::builtin());
    let candidate = furniture_candidate("trash_can", at(1.0, 8.5));
    let first = validator.validate(&candidate, &scene, None);
    let second = validator.validate(&candidate, &scene, None);

    assert_eq!(first.findings, second.findings);
}

#[test]
fn test_unknown_type_yields_single_error() {
    let mut scene = SceneStore::new();
    scene.add(PlacedObject::Road(east_west_road(2.0)));

    let validator = PlacementValidator::new(RuleCatalog::builtin());
    let report = validator.validate(&furniture_candidate("fountain", at(0.0, 0.5)), &scene, None);

    // Nothing else runs for an unknown type, even next to a road
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].severity, Severity::Error);
}

#[test]
fn test_incomplete_geometry_is_skipped() {
    let mut scene = SceneStore::new();
    scene.add(PlacedObject::Road(RoadObject::started_at(
        RoadKind::LocalRoad,
        "Stub road",
        at(0.0, 0.1),
    )));
    scene.add(PlacedObject::Sidewalk(SidewalkObject::started_at(
        SidewalkKind::MainPedestrian,
        "Stub walk",
        at(0.0, 0.1),
    )));

    let validator = PlacementValidator::new(RuleCatalog::builtin());
    let report = validator.validate(&furniture_candidate("bench", at(0.0, 0.0)), &scene, None);

    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].severity, Severity::Info);
}

#[test]
fn test_scene_json_round_trip() {
    let mut scene = SceneStore::new();
    let id = scene.add(PlacedObject::Furniture(FurnitureObject::new(
        "bench",
        "Bench #1",
        ORIGIN,
        true,
    )));
    scene.add(PlacedObject::Road(east_west_road(7.0)));

    let json = serde_json::to_string(&scene).unwrap();
    let mut restored: SceneStore = serde_json::from_str(&json).unwrap();
    restored.reindex();

    assert_eq!(restored.len(), 2);
    assert!(restored.find(id).is_some());

    // Validation gives the same findings before and after the round trip
    let validator = PlacementValidator::new(RuleCatalog::builtin());
    let candidate = furniture_candidate("bench", at(0.0, 1.0));
    assert_eq!(
        validator.validate(&candidate, &scene, None).findings,
        validator.validate(&candidate, &restored, None).findings
    );
}
