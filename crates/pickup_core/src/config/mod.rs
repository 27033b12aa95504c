//! # Configuration
//!
//! Every tunable of the roster builder, the balancer and the export lives
//! here, so a UI adapter can ship one file instead of hard-coding values.
//!
//! ```rust
//! use pickup_core::config::PickupConfig;
//!
//! let config = PickupConfig::default();
//! let english = PickupConfig::english();
//! assert_eq!(config.roster.max_goalkeepers, english.roster.max_goalkeepers);
//! ```

mod balance_config;
pub mod env;
mod export_config;
mod roster_config;

pub use balance_config::BalanceConfig;
pub use export_config::ExportConfig;
pub use roster_config::RosterConfig;
pub use env::{config_path_from_env, resolve_config, CONFIG_PATH_ENV};

use crate::error::ConfigError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use unic_langid::LanguageIdentifier;

pub const MIN_SKILL: f64 = 1.0;
pub const MAX_SKILL: f64 = 10.0;

/// The invariant "at most two goalkeepers" holds for every config.
pub const GOALKEEPER_CAP: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PickupConfig {
    pub roster: RosterConfig,
    pub balance: BalanceConfig,
    pub export: ExportConfig,
    /// Locale for status messages (default: "es-ES")
    pub locale: String,
    /// Directory of `<locale>.ftl` files overriding the built-in status text
    pub locales_dir: Option<PathBuf>,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            roster: RosterConfig::default(),
            balance: BalanceConfig::default(),
            export: ExportConfig::default(),
            locale: "es-ES".to_string(),
            locales_dir: None,
        }
    }
}

impl PickupConfig {
    /// English headings and status messages
    pub fn english() -> Self {
        let mut cfg = Self::default();
        cfg.export.team_a_heading = "Team A".to_string();
        cfg.export.team_b_heading = "Team B".to_string();
        cfg.locale = "en-US".to_string();
        cfg
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load and validate a config file; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_lowercase();
        let config = match ext.as_str() {
            "json" => Self::from_json(&content)?,
            "yaml" | "yml" => Self::from_yaml(&content)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let skill_range = MIN_SKILL..=MAX_SKILL;

        if !skill_range.contains(&self.roster.default_skill) {
            return Err(ConfigError::Invalid {
                field: "roster.default_skill",
                message: format!("must be within 1-10, got {}", self.roster.default_skill),
            });
        }
        if self.roster.max_goalkeepers > GOALKEEPER_CAP {
            return Err(ConfigError::Invalid {
                field: "roster.max_goalkeepers",
                message: format!(
                    "must be at most {}, got {}",
                    GOALKEEPER_CAP, self.roster.max_goalkeepers
                ),
            });
        }
        if !skill_range.contains(&self.balance.fallback_goalkeeper_value) {
            return Err(ConfigError::Invalid {
                field: "balance.fallback_goalkeeper_value",
                message: format!(
                    "must be within 1-10, got {}",
                    self.balance.fallback_goalkeeper_value
                ),
            });
        }
        if !self.balance.even_threshold.is_finite() || self.balance.even_threshold < 0.0 {
            return Err(ConfigError::Invalid {
                field: "balance.even_threshold",
                message: format!("must be a non-negative number, got {}", self.balance.even_threshold),
            });
        }
        if self.export.team_a_heading.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "export.team_a_heading",
                message: "must not be empty".to_string(),
            });
        }
        if self.export.team_b_heading.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "export.team_b_heading",
                message: "must not be empty".to_string(),
            });
        }
        if self.locale.parse::<LanguageIdentifier>().is_err() {
            return Err(ConfigError::Invalid {
                field: "locale",
                message: format!("'{}' is not a language identifier", self.locale),
            });
        }
        if let Some(dir) = &self.locales_dir {
            if !dir.is_dir() {
                return Err(ConfigError::Invalid {
                    field: "locales_dir",
                    message: format!("'{}' is not a directory", dir.display()),
                });
            }
        }
        Ok(())
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_default_config() {
        let cfg = PickupConfig::default();
        assert_eq!(cfg.roster.default_skill, 5.0);
        assert_eq!(cfg.roster.max_goalkeepers, 2);
        assert!(cfg.roster.deduplicate_names);
        assert_eq!(cfg.balance.fallback_goalkeeper_value, 5.0);
        assert_eq!(cfg.export.team_a_heading, "Equipo A");
        assert_eq!(cfg.export.rule, "-----------");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_english_preset() {
        let cfg = PickupConfig::english();
        assert_eq!(cfg.export.team_b_heading, "Team B");
        assert_eq!(cfg.locale, "en-US");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg = PickupConfig::from_json(r#"{ "roster": { "default_skill": 6.5 } }"#).unwrap();
        assert_eq!(cfg.roster.default_skill, 6.5);
        assert_eq!(cfg.roster.max_goalkeepers, 2);
        assert_eq!(cfg.export, ExportConfig::default());
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let mut cfg = PickupConfig::default();
        cfg.roster.default_skill = 11.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid { field: "roster.default_skill", .. })
        ));

        let mut cfg = PickupConfig::default();
        cfg.roster.max_goalkeepers = 3;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid { field: "roster.max_goalkeepers", .. })
        ));

        let mut cfg = PickupConfig::default();
        cfg.locale = "not a locale!".to_string();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { field: "locale", .. })));
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "locale: en-US\nexport:\n  rule: \"=====\"").unwrap();

        let cfg = PickupConfig::load(file.path()).unwrap();
        assert_eq!(cfg.locale, "en-US");
        assert_eq!(cfg.export.rule, "=====");
        assert_eq!(cfg.export.team_a_heading, "Equipo A");
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let file = Builder::new().suffix(".toml").tempfile().unwrap();
        assert!(matches!(
            PickupConfig::load(file.path()),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"
        ));
    }

    #[test]
    fn test_locales_dir_must_exist() {
        let mut cfg = PickupConfig::default();
        cfg.locales_dir = Some(PathBuf::from("/no/such/locales/dir"));
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { field: "locales_dir", .. })));

        let dir = tempfile::TempDir::new().unwrap();
        cfg.locales_dir = Some(dir.path().to_path_buf());
        assert!(cfg.validate().is_ok());
    }
}
