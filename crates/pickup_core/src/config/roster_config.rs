//! Roster input settings

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RosterConfig {
    /// Skill given to every freshly parsed name (default: 5.0)
    pub default_skill: f64,
    /// Goalkeeper flags allowed across the whole roster (default: 2)
    pub max_goalkeepers: usize,
    /// Drop repeated names, keeping the first occurrence (default: true)
    pub deduplicate_names: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self { default_skill: 5.0, max_goalkeepers: 2, deduplicate_names: true }
    }
}
