//! Kerbside command-line front end
//!
//! Two subcommands: `rules` prints the catalog, `validate` checks a
//! candidate placement against a scene file and optionally commits it.
//! The process exits non-zero when validation reports an ERROR and
//! `--force` was not given.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use kerbside::core::config::ValidatorConfig;
use kerbside::core::error::Result;
use kerbside::core::types::{GeoPoint, PointClass};
use kerbside::geometry;
use kerbside::rules::{ClearanceContext, RuleCatalog};
use kerbside::scene::{AdvertisingObject, FurnitureObject, PlacedObject, SceneStore};
use kerbside::validation::{Candidate, PlacementValidator};

#[derive(Parser)]
#[command(name = "kerbside", about = "Placement validation for urban street objects")]
struct Cli {
    /// Directory of TOML rule files merged over the built-in catalog
    #[arg(long, global = true)]
    rules_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the object types in the rule catalog
    Rules {
        /// Limit the listing to one class
        #[arg(long, value_enum)]
        class: Option<ClassArg>,
        /// Show the full entry (clearances and guidance) for one type
        #[arg(long = "type")]
        type_id: Option<String>,
    },
    /// Validate a candidate placement against a scene
    Validate {
        /// Scene file (JSON), or an empty scene when omitted
        #[arg(long)]
        scene: Option<PathBuf>,
        #[arg(long, value_enum)]
        class: ClassArg,
        /// Object type identifier, e.g. "bench"
        #[arg(long = "type")]
        type_id: String,
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
        /// Mark the object as accessibility-adapted
        #[arg(long)]
        accessible: bool,
        /// Commit the object into the scene file even on ERROR findings
        #[arg(long)]
        force: bool,
        /// Write the scene with the new object back to this path
        #[arg(long)]
        commit: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClassArg {
    Furniture,
    Advertising,
}

impl From<ClassArg> for PointClass {
    fn from(value: ClassArg) -> Self {
        match value {
            ClassArg::Furniture => PointClass::Furniture,
            ClassArg::Advertising => PointClass::Advertising,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kerbside=info".into()),
        )
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut catalog = RuleCatalog::builtin();
    if let Some(dir) = &cli.rules_dir {
        let count = catalog.load_directory(dir)?;
        tracing::info!(count, dir = %dir.display(), "merged rule overrides");
    }

    match cli.command {
        Command::Rules { class, type_id } => {
            let classes: &[PointClass] = match class {
                Some(c) => match c.into() {
                    PointClass::Furniture => &[PointClass::Furniture],
                    PointClass::Advertising => &[PointClass::Advertising],
                },
                None => &[PointClass::Furniture, PointClass::Advertising],
            };

            if let Some(type_id) = type_id {
                let Some((class, rule)) = classes
                    .iter()
                    .find_map(|&c| catalog.point_rule(c, &type_id).map(|r| (c, r)))
                else {
                    eprintln!("unknown type '{type_id}'");
                    return Ok(ExitCode::FAILURE);
                };
                println!("{} ({class})", rule.display_name);
                println!("  effective width: {} m", rule.effective_width);
                println!("  can be accessible: {}", rule.can_be_accessible);
                let clearances = [
                    ("to sidewalk edge", rule.min_distance_to_path_edge),
                    ("to road edge", rule.min_distance_to_road_edge),
                    ("to other objects", rule.min_distance_to_other),
                    ("to benches", rule.min_distance_to_bench),
                    ("to entrances", rule.min_distance_to_entrances),
                    ("to walls", rule.min_distance_to_walls),
                    ("to residential buildings", rule.min_distance_to_residential),
                ];
                for (label, clearance) in clearances {
                    if let Some(min) = clearance.and_then(|c| c.resolve(ClearanceContext::Min)) {
                        println!("  min {label}: {min} m");
                    }
                }
                for line in &rule.guidance {
                    println!("  - {line}");
                }
                return Ok(ExitCode::SUCCESS);
            }

            for &class in classes {
                println!("{class}:");
                for rule in catalog.entries(class) {
                    let clearance = rule
                        .min_distance_to_other
                        .and_then(|r| r.resolve(ClearanceContext::Min))
                        .map(|d| format!("{d} m to others"))
                        .unwrap_or_else(|| "no clearance rules".to_string());
                    println!("  {:<24} {:<28} {}", rule.id, rule.display_name, clearance);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate {
            scene,
            class,
            type_id,
            lat,
            lon,
            accessible,
            force,
            commit,
        } => {
            let mut store: SceneStore = match &scene {
                Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
                None => SceneStore::new(),
            };
            store.reindex();

            for road in store.roads() {
                let length = geometry::polyline_length(&road.path);
                if let Some(mid) = geometry::midpoint(&road.path) {
                    tracing::info!(
                        name = %road.name,
                        length_m = length,
                        mid_lat = mid.lat,
                        mid_lon = mid.lon,
                        "scene road"
                    );
                }
            }

            let class: PointClass = class.into();
            let candidate = Candidate {
                class,
                type_id: &type_id,
                position: GeoPoint::new(lat, lon),
                accessible,
            };
            let validator = PlacementValidator::with_config(catalog, ValidatorConfig::default());
            let report = validator.validate(&candidate, &store, None);

            for finding in &report.findings {
                println!("{finding}");
            }

            let blocked = report.blocks_commit() && !force;
            if let Some(out) = commit {
                if blocked {
                    println!("not committed: validation reported errors (use --force to override)");
                } else {
                    let rule = validator.catalog().point_rule(class, &type_id);
                    let name = rule.map(|r| r.display_name.as_str()).unwrap_or(&type_id);
                    let object = match class {
                        PointClass::Furniture => PlacedObject::Furniture(FurnitureObject::new(
                            &type_id,
                            name,
                            candidate.position,
                            accessible,
                        )),
                        PointClass::Advertising => PlacedObject::Advertising(
                            AdvertisingObject::new(&type_id, name, candidate.position),
                        ),
                    };
                    let id = store.add(object);
                    std::fs::write(&out, serde_json::to_string_pretty(&store)?)?;
                    println!("committed {id} to {}", out.display());
                }
            }

            Ok(if blocked {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}
