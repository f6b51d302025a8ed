//! Placement rule catalog, overridable from TOML

mod catalog;
mod clearance;

pub use catalog::{ObjectTypeRule, RuleCatalog};
pub use clearance::{ClearanceContext, ClearanceRule};
