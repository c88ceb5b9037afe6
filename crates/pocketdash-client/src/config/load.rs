use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::DashboardConfig;
use crate::{ClientError, ClientResult};

pub const CONFIG_ENV_VAR: &str = "POCKETDASH_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    Flag,
    Environment,
    HomeDefault,
    BuiltIn,
}

impl ConfigOrigin {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Environment => "environment",
            Self::HomeDefault => "home",
            Self::BuiltIn => "built_in",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: DashboardConfig,
    pub origin: ConfigOrigin,
    pub path: Option<PathBuf>,
}

/// Picks the config file location: explicit flag, then `POCKETDASH_CONFIG`,
/// then `~/.pocketdash/config.toml`.
pub fn resolve_config_path(flag: Option<&Path>) -> Option<(PathBuf, ConfigOrigin)> {
    if let Some(path) = flag {
        return Some((path.to_path_buf(), ConfigOrigin::Flag));
    }

    if let Some(value) = std::env::var_os(CONFIG_ENV_VAR)
        && !value.is_empty()
    {
        return Some((PathBuf::from(value), ConfigOrigin::Environment));
    }

    home::home_dir().map(|home| {
        (
            home.join(".pocketdash").join("config.toml"),
            ConfigOrigin::HomeDefault,
        )
    })
}

pub fn load_config(flag: Option<&Path>) -> ClientResult<LoadedConfig> {
    let Some((path, origin)) = resolve_config_path(flag) else {
        return Ok(built_in());
    };

    if !path.exists() {
        // Only the implicit home location is allowed to be absent.
        if origin == ConfigOrigin::HomeDefault {
            debug!(path = %path.display(), "no config file, using built-in defaults");
            return Ok(built_in());
        }
        return Err(ClientError::config_not_found(&path));
    }

    let config = read_config_file(&path)?;
    debug!(path = %path.display(), origin = origin.as_str(), "loaded config");
    Ok(LoadedConfig {
        config,
        origin,
        path: Some(path),
    })
}

fn read_config_file(path: &Path) -> ClientResult<DashboardConfig> {
    let body = fs::read_to_string(path)
        .map_err(|error| ClientError::config_read_failed(path, &error.to_string()))?;
    toml::from_str::<DashboardConfig>(&body)
        .map_err(|error| ClientError::config_invalid(path, &error.to_string()))
}

fn built_in() -> LoadedConfig {
    LoadedConfig {
        config: DashboardConfig::default(),
        origin: ConfigOrigin::BuiltIn,
        path: None,
    }
}
