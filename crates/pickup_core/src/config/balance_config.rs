//! Balancer settings

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BalanceConfig {
    /// Goalkeeper value when fewer than two field players exist (default: 5.0)
    pub fallback_goalkeeper_value: f64,
    /// Largest total difference still reported as even (default: 1.0)
    pub even_threshold: f64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self { fallback_goalkeeper_value: 5.0, even_threshold: 1.0 }
    }
}
