//! The placement validator: evaluates every applicable rule for a
//! candidate object against the current scene
//!
//! Check order is fixed (other objects, roads, sidewalks, type-specific
//! adjacency) so repeated validation of the same inputs yields the same
//! ordered findings. The validator only classifies; committing or
//! rejecting the candidate is the caller's decision.

use crate::core::config::ValidatorConfig;
use crate::core::types::{GeoPoint, ObjectId, PointClass};
use crate::rules::{ClearanceContext, ObjectTypeRule, RuleCatalog};
use crate::scene::SceneStore;
use crate::validation::geo_provider::{BuiltinGeo, GeoProvider};
use crate::validation::{Finding, ValidationReport};

/// A candidate placement: type, class, coordinate, accessibility flag.
/// Roads and sidewalks are not candidates; they enter the scene through
/// the drawing session.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub class: PointClass,
    pub type_id: &'a str,
    pub position: GeoPoint,
    pub accessible: bool,
}

pub struct PlacementValidator<G: GeoProvider = BuiltinGeo> {
    catalog: RuleCatalog,
    config: ValidatorConfig,
    geo: G,
}

impl PlacementValidator<BuiltinGeo> {
    /// Validator over the built-in geometry backend
    pub fn new(catalog: RuleCatalog) -> Self {
        Self::with_provider(catalog, ValidatorConfig::default(), BuiltinGeo)
    }

    pub fn with_config(catalog: RuleCatalog, config: ValidatorConfig) -> Self {
        Self::with_provider(catalog, config, BuiltinGeo)
    }
}

impl<G: GeoProvider> PlacementValidator<G> {
    pub fn with_provider(catalog: RuleCatalog, config: ValidatorConfig, geo: G) -> Self {
        Self {
            catalog,
            config,
            geo,
        }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Evaluate all applicable rules for `candidate` against `scene`.
    ///
    /// `exclude` lets an in-place edit validate without comparing the
    /// object to itself. Never panics on malformed geometry: incomplete
    /// roads and sidewalk rings simply contribute no findings.
    pub fn validate(
        &self,
        candidate: &Candidate<'_>,
        scene: &SceneStore,
        exclude: Option<ObjectId>,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();

        if !self.geo.is_ready() {
            report.push(Finding::error(
                "Geometry backend is not ready. Retry validation once it has initialized.",
            ));
            return report;
        }

        let Some(rule) = self.catalog.point_rule(candidate.class, candidate.type_id) else {
            report.push(Finding::error(format!(
                "No rule configuration found for type '{}' ({}).",
                candidate.type_id, candidate.class
            )));
            return report;
        };

        self.check_other_objects(candidate, rule, scene, exclude, &mut report);
        self.check_roads(candidate, rule, scene, &mut report);
        self.check_sidewalks(candidate, rule, scene, &mut report);
        self.check_adjacency(candidate, rule, scene, exclude, &mut report);

        if report.findings.is_empty() {
            report.push(Finding::info(
                "Basic checks passed. Review the type-specific placement guidance.",
            ));
        }

        tracing::debug!(
            type_id = candidate.type_id,
            findings = report.findings.len(),
            errors = report.has_errors(),
            "validated candidate placement"
        );
        report
    }

    /// Minimum clearance to every existing furniture and advertising object
    fn check_other_objects(
        &self,
        candidate: &Candidate<'_>,
        rule: &ObjectTypeRule,
        scene: &SceneStore,
        exclude: Option<ObjectId>,
        report: &mut ValidationReport,
    ) {
        let Some(required) = rule
            .min_distance_to_other
            .and_then(|r| r.resolve(ClearanceContext::Min))
        else {
            return;
        };

        for item in scene.furniture() {
            if exclude == Some(item.id) {
                continue;
            }
            let measured = self.geo.distance(candidate.position, item.position);
            if measured < required {
                report.add_clearance(Finding::error(format!(
                    "Too close to furniture '{}' ({:.2} m). Minimum {} m required.",
                    label(&item.name, &item.type_id),
                    measured,
                    required
                )));
            }
        }

        for item in scene.advertising() {
            if exclude == Some(item.id) {
                continue;
            }
            let measured = self.geo.distance(candidate.position, item.position);
            if measured < required {
                report.add_clearance(Finding::error(format!(
                    "Too close to advertising object '{}' ({:.2} m). Minimum {} m required.",
                    label(&item.name, &item.type_id),
                    measured,
                    required
                )));
            }
        }
    }

    /// Clearance to each road edge, treating the road as a corridor of
    /// its configured width around the centerline
    fn check_roads(
        &self,
        candidate: &Candidate<'_>,
        rule: &ObjectTypeRule,
        scene: &SceneStore,
        report: &mut ValidationReport,
    ) {
        let Some(required) = rule
            .min_distance_to_road_edge
            .and_then(|r| r.resolve(ClearanceContext::Min))
        else {
            return;
        };

        for road in scene.roads() {
            let Some(closest) = self
                .geo
                .closest_point_on_polyline(candidate.position, &road.path)
            else {
                continue; // incomplete road, skip
            };
            let clearance = closest.distance - road.width / 2.0;
            let road_label = label(&road.name, &road.id.to_string());
            if clearance < required {
                report.add_road(Finding::error(format!(
                    "Too close to the edge of road '{}' ({:.2} m clearance). Minimum {} m from the edge required.",
                    road_label, clearance, required
                )));
            } else {
                report.add_road(Finding::info(format!(
                    "Road '{}' edge clearance {:.2} m (required {} m).",
                    road_label, clearance, required
                )));
            }
        }
    }

    /// On-sidewalk passage check when inside the ring, edge clearance when
    /// outside. The whole check applies only to types with a path-edge rule.
    fn check_sidewalks(
        &self,
        candidate: &Candidate<'_>,
        rule: &ObjectTypeRule,
        scene: &SceneStore,
        report: &mut ValidationReport,
    ) {
        let Some(required) = rule
            .min_distance_to_path_edge
            .and_then(|r| r.resolve(ClearanceContext::Min))
        else {
            return;
        };

        for sidewalk in scene.sidewalks() {
            let Some(closest) = self
                .geo
                .closest_point_on_ring(candidate.position, &sidewalk.ring)
            else {
                continue; // incomplete ring, skip
            };
            let sidewalk_label = label(&sidewalk.name, &sidewalk.id.to_string());

            if self.geo.point_in_polygon(candidate.position, &sidewalk.ring) {
                if sidewalk.width > 0.0
                    && sidewalk.width < rule.effective_width + self.config.min_passage_width
                {
                    report.add_sidewalk(Finding::warning(format!(
                        "Object may block passage on narrow sidewalk '{}': sidewalk width {} m, object width {} m, minimum passage {} m.",
                        sidewalk_label,
                        sidewalk.width,
                        rule.effective_width,
                        self.config.min_passage_width
                    )));
                }
                report.add_sidewalk(Finding::info(format!(
                    "Object placed on sidewalk '{}'. Distance to the nearest edge point: {:.2} m.",
                    sidewalk_label, closest.distance
                )));
            } else if closest.distance < required {
                report.add_sidewalk(Finding::error(format!(
                    "Too close to the edge of sidewalk '{}' ({:.2} m). Minimum {} m from the edge required.",
                    sidewalk_label, closest.distance, required
                )));
            } else {
                report.add_sidewalk(Finding::info(format!(
                    "Sidewalk '{}' edge clearance {:.2} m (required {} m).",
                    sidewalk_label, closest.distance, required
                )));
            }
        }
    }

    /// Type-specific adjacency: the near-bench band for types that declare
    /// one (trash cans in the built-in catalog)
    fn check_adjacency(
        &self,
        candidate: &Candidate<'_>,
        rule: &ObjectTypeRule,
        scene: &SceneStore,
        exclude: Option<ObjectId>,
        report: &mut ValidationReport,
    ) {
        let Some(band) = rule.min_distance_to_bench else {
            return;
        };
        let Some(min) = band.resolve(ClearanceContext::Min) else {
            return;
        };
        let near_limit = band
            .resolve(ClearanceContext::Max)
            .unwrap_or(min + self.config.near_bench_band_pad);

        let mut near_bench = false;
        let mut benches_exist = false;
        for item in scene.furniture() {
            if exclude == Some(item.id) || item.type_id != "bench" {
                continue;
            }
            benches_exist = true;
            let measured = self.geo.distance(candidate.position, item.position);
            if measured < min {
                report.add_adjacency(Finding::error(format!(
                    "Too close to bench '{}' ({:.2} m). Minimum {} m required.",
                    label(&item.name, &item.type_id),
                    measured,
                    min
                )));
            }
            if measured < near_limit {
                near_bench = true;
            }
        }

        if !near_bench && benches_exist {
            report.add_adjacency(Finding::info(format!(
                "Not placed near a bench. Recommended distance to a bench: {}-{} m.",
                min, near_limit
            )));
        }
    }
}

fn label(name: &str, fallback: &str) -> String {
    if name.is_empty() {
        fallback.to_string()
    } else {
        name.to_string()
    }
}
