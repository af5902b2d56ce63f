use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::helpers::find_similar_name;

pub const CONFIG_DIR: &str = ".objadm";
pub const CONFIG_FILE: &str = "config.toml";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A configured remote cluster: endpoint plus admin credentials.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Alias {
    pub url: String,
    pub access_key: String,
    pub secret_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Alias {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alias")
            .field("url", &self.url)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub aliases: BTreeMap<String, Alias>,
}

impl Config {
    /// Loads `config.toml` from `dir`. A missing file is an empty config, so
    /// the error surfaces later as an unknown alias.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using empty alias table");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn alias(&self, name: &str) -> Result<&Alias, ConfigError> {
        self.aliases.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.aliases.keys().map(String::as_str).collect();
            ConfigError::UnknownAlias {
                alias: name.to_string(),
                suggestion: find_similar_name(name, &known).map(str::to_string),
            }
        })
    }
}

/// Resolves the config directory: explicit value first, then `$HOME/.objadm`.
pub fn resolve_config_dir(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }

    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(CONFIG_DIR))
        .ok_or(ConfigError::NoConfigDir)
}
