//! Validator configuration with documented constants
//!
//! The tunable thresholds of the placement rules are collected here with
//! explanations of their purpose. The numeric clearance rules themselves
//! live in the rule catalog; this struct holds the values that apply
//! across object types.

/// Configuration for the placement validator
///
/// Passed explicitly into `PlacementValidator`; there is no process-wide
/// config singleton.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Minimum clear pedestrian passage that must remain on a sidewalk
    /// after an object is placed on it (meters)
    ///
    /// An object on a sidewalk of width W leaves W - effective_width of
    /// passage. Below this threshold the validator emits a WARNING that
    /// the object may block pedestrian traffic. 1.5 m is the accessibility
    /// norm for two-way pedestrian flow including wheelchairs.
    pub min_passage_width: f64,

    /// Padding added to a near-bench rule's `min` to form the upper edge
    /// of the "near a bench" band when the rule declares no `max` (meters)
    ///
    /// A trash can counts as "near" a bench when its distance to the
    /// closest bench falls inside [min, max]; with no configured max the
    /// band is [min, min + pad]. Tunable rather than a hard-coded literal.
    pub near_bench_band_pad: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_passage_width: 1.5,
            near_bench_band_pad: 2.0,
        }
    }
}

impl ValidatorConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.min_passage_width <= 0.0 {
            return Err(format!(
                "min_passage_width ({}) must be positive",
                self.min_passage_width
            ));
        }

        if self.near_bench_band_pad < 0.0 {
            return Err(format!(
                "near_bench_band_pad ({}) must not be negative",
                self.near_bench_band_pad
            ));
        }

        Ok(())
    }
}
