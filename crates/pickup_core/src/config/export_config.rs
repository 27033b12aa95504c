//! Plain-text export layout

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExportConfig {
    pub team_a_heading: String,
    pub team_b_heading: String,
    /// Line printed under each heading
    pub rule: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            team_a_heading: "Equipo A".to_string(),
            team_b_heading: "Equipo B".to_string(),
            rule: "-".repeat(11),
        }
    }
}
