// Search configuration.
//
// Every tunable of the search lives in `SearchConfig`: the iteration cap, the
// any-angle switch, the heuristic, the frontier tie-break rule, the cost
// model, the sight ray heights and the coordinate bounds. Hosts load it from
// JSON; any field left out takes its default, so `{}` is a complete config.
//
// Defaults reproduce the standard walker: 100,000 iterations, any-angle on,
// Euclidean heuristic, first-in-first-out ties, unit steps with a 100x fall
// penalty, rays at 0.5 and 1.5 cells, and bounds of +/- 2^24 on every axis.
//
// See also: `cost.rs` (`CostParams`), `sight.rs` (`SightParams`),
// `frontier.rs` (`TieBreak`), `search.rs` which reads all of it.
//
// **Critical constraint:** a config is immutable for the duration of a
// search. Two searches with equal configs over the same world give equal
// results.

use crate::cost::CostParams;
use crate::error::{NavError, NavResult};
use crate::frontier::TieBreak;
use crate::heuristic::HeuristicKind;
use crate::sight::SightParams;
use crate::types::CoordBounds;
use serde::{Deserialize, Serialize};

/// Default iteration cap per search.
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Frontier pops allowed before the search gives up.
    pub max_iterations: usize,
    /// Let nodes take a grandparent as parent when it is in sight. Off gives
    /// plain grid A*.
    pub any_angle: bool,
    pub heuristic: HeuristicKind,
    pub tie_break: TieBreak,
    pub cost: CostParams,
    pub sight: SightParams,
    /// Endpoints outside are rejected; cells outside are treated as solid.
    pub bounds: CoordBounds,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            any_angle: true,
            heuristic: HeuristicKind::default(),
            tie_break: TieBreak::default(),
            cost: CostParams::default(),
            sight: SightParams::default(),
            bounds: CoordBounds::default(),
        }
    }
}

impl SearchConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> NavResult<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> NavResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the search cannot work with.
    pub fn validate(&self) -> NavResult<()> {
        let positive = |name: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(NavError::InvalidParameter { name, value })
            }
        };
        positive("cost.base_cost", self.cost.base_cost)?;
        positive("cost.fall_penalty", self.cost.fall_penalty)?;
        if !self.sight.foot_height.is_finite() {
            return Err(NavError::InvalidParameter {
                name: "sight.foot_height",
                value: self.sight.foot_height,
            });
        }
        if !self.sight.head_height.is_finite() {
            return Err(NavError::InvalidParameter {
                name: "sight.head_height",
                value: self.sight.head_height,
            });
        }
        if let Some((name, value)) = self.bounds.malformed_axis() {
            return Err(NavError::InvalidParameter {
                name,
                value: f64::from(value),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VoxelCoord;

    #[test]
    fn default_config_serializes() {
        let config = SearchConfig::default();
        let json = config.to_json().unwrap();
        let restored = SearchConfig::from_json(&json).unwrap();
        assert_eq!(restored, config);
        assert_eq!(restored.max_iterations, 100_000);
        assert!(restored.any_angle);
    }

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(SearchConfig::from_json("{}").unwrap(), SearchConfig::default());
    }

    #[test]
    fn config_loads_from_json_string() {
        let json = r#"{
            "max_iterations": 500,
            "any_angle": false,
            "heuristic": "Manhattan",
            "tie_break": "PreferDeeper",
            "cost": { "fall_penalty": 20.0 },
            "sight": { "head_height": 1.8 },
            "bounds": {
                "min": { "x": -10, "y": 0, "z": -10 },
                "max": { "x": 10, "y": 64, "z": 10 }
            }
        }"#;
        let config = SearchConfig::from_json(json).unwrap();
        assert_eq!(config.max_iterations, 500);
        assert!(!config.any_angle);
        assert_eq!(config.heuristic, HeuristicKind::Manhattan);
        assert_eq!(config.tie_break, TieBreak::PreferDeeper);
        assert_eq!(config.cost.base_cost, 1.0);
        assert_eq!(config.cost.fall_penalty, 20.0);
        assert_eq!(config.sight.foot_height, 0.5);
        assert_eq!(config.sight.head_height, 1.8);
        assert_eq!(config.bounds.max, VoxelCoord::new(10, 64, 10));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = SearchConfig::from_json("{ \"max_iterations\": \"lots\" }").unwrap_err();
        assert!(matches!(err, NavError::Config(_)));
    }

    #[test]
    fn bounds_at_the_i32_limit_are_rejected() {
        let json = r#"{
            "bounds": {
                "min": { "x": 0, "y": 0, "z": 0 },
                "max": { "x": 8, "y": 2147483647, "z": 8 }
            }
        }"#;
        let err = SearchConfig::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            NavError::InvalidParameter {
                name: "bounds.max.y",
                ..
            }
        ));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let config = SearchConfig {
            bounds: CoordBounds::new(VoxelCoord::new(5, 0, 0), VoxelCoord::new(1, 8, 8)),
            ..SearchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NavError::InvalidParameter {
                name: "bounds.min.x",
                ..
            })
        ));
    }

    #[test]
    fn non_positive_costs_are_rejected() {
        let err = SearchConfig::from_json(r#"{ "cost": { "base_cost": 0.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            NavError::InvalidParameter {
                name: "cost.base_cost",
                ..
            }
        ));
    }
}
