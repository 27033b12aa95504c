use super::PickupConfig;
use crate::error::ConfigError;
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "PICKUP_CONFIG_PATH";

/// Config file named by `PICKUP_CONFIG_PATH`, if the variable is set.
pub fn config_path_from_env() -> Option<PathBuf> {
    let path = env::var(CONFIG_PATH_ENV).ok()?;
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    Some(PathBuf::from(path))
}

/// An explicit path wins over the environment; with neither, defaults apply.
pub fn resolve_config(explicit: Option<&Path>) -> Result<PickupConfig, ConfigError> {
    if let Some(path) = explicit {
        return PickupConfig::load(path);
    }

    match config_path_from_env() {
        Some(path) => {
            log::debug!("Using config from {CONFIG_PATH_ENV}='{}'", path.display());
            PickupConfig::load(&path)
        }
        None => Ok(PickupConfig::default()),
    }
}
