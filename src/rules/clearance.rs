//! Clearance rules: the distance requirements of the rule catalog
//!
//! A clearance is either a bare number or a min/default/max band; rule
//! files may write either form, so the union deserializes untagged.

use serde::{Deserialize, Serialize};

/// Which band edge a caller is asking for when resolving a clearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearanceContext {
    Min,
    Default,
    Max,
}

/// A distance requirement between a candidate object and some reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClearanceRule {
    Scalar(f64),
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        default: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
}

impl ClearanceRule {
    pub fn scalar(value: f64) -> Self {
        ClearanceRule::Scalar(value)
    }

    pub fn range(min: Option<f64>, default: Option<f64>, max: Option<f64>) -> Self {
        ClearanceRule::Range { min, default, max }
    }

    /// Resolve the applicable distance for a context.
    ///
    /// A scalar rule answers every context with its value. A range answers
    /// `Min`/`Max` with the matching edge when present; in every other
    /// case it falls back to `default`, then `min`, then `None` ("no
    /// applicable rule, skip this check").
    pub fn resolve(&self, context: ClearanceContext) -> Option<f64> {
        match *self {
            ClearanceRule::Scalar(value) => Some(value),
            ClearanceRule::Range { min, default, max } => match context {
                ClearanceContext::Min if min.is_some() => min,
                ClearanceContext::Max if max.is_some() => max,
                _ => default.or(min),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ClearanceContext::*;

    #[test]
    fn test_scalar_ignores_context() {
        let rule = ClearanceRule::scalar(1.5);
        assert_eq!(rule.resolve(Min), Some(1.5));
        assert_eq!(rule.resolve(Default), Some(1.5));
        assert_eq!(rule.resolve(Max), Some(1.5));
    }

    #[test]
    fn test_full_range_answers_each_context() {
        let rule = ClearanceRule::range(Some(1.0), Some(2.0), Some(3.0));
        assert_eq!(rule.resolve(Min), Some(1.0));
        assert_eq!(rule.resolve(Default), Some(2.0));
        assert_eq!(rule.resolve(Max), Some(3.0));
    }

    #[test]
    fn test_fallback_chain() {
        // No max: Max context falls through to default
        let rule = ClearanceRule::range(Some(1.5), Some(2.0), None);
        assert_eq!(rule.resolve(Max), Some(2.0));

        // No default: falls back to min
        let rule = ClearanceRule::range(Some(1.5), None, None);
        assert_eq!(rule.resolve(Max), Some(1.5));
        assert_eq!(rule.resolve(Default), Some(1.5));

        // Default only
        let rule = ClearanceRule::range(None, Some(0.1), None);
        assert_eq!(rule.resolve(Min), Some(0.1));

        // Empty range: no applicable rule
        let rule = ClearanceRule::range(None, None, None);
        assert_eq!(rule.resolve(Min), None);
    }

    #[test]
    fn test_untagged_deserialization() {
        let scalar: ClearanceRule = serde_json::from_str("1.5").unwrap();
        assert_eq!(scalar, ClearanceRule::scalar(1.5));

        let range: ClearanceRule =
            serde_json::from_str(r#"{"min": 0.5, "default": 1.0}"#).unwrap();
        assert_eq!(range, ClearanceRule::range(Some(0.5), Some(1.0), None));
    }
}
