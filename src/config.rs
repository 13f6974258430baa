//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/polytree/polytree.toml`
//! 3. Local config: file passed via `--config`
//! 4. Environment variables: `POLYTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{Order, DEFAULT_MAX_DEGREE};

/// Errors raised while loading or validating settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid traversal order in config: '{0}'")]
    InvalidOrder(String),

    #[error("max_degree must be at least 1")]
    InvalidDegree,
}

/// Unified configuration for polytree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Degree bound for trees built from the command line (default: 2)
    pub max_degree: usize,
    /// Traversals printed by `demo` and `build` (default: all five)
    pub orders: Vec<String>,
    /// Show node keys next to values
    pub show_keys: bool,
    /// Draw the tree after the traversals
    pub render: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_degree: DEFAULT_MAX_DEGREE,
            orders: ["pre-order", "post-order", "in-order", "bfs", "dfs"]
                .map(String::from)
                .to_vec(),
            show_keys: false,
            render: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_degree: Option<usize>,
    pub orders: Option<Vec<String>>,
    pub show_keys: Option<bool>,
    pub render: Option<bool>,
}

/// Get the XDG config directory for polytree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "polytree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("polytree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> SettingsError {
    SettingsError::Config {
        message: e.to_string(),
    }
}

/// Typed env value; `None` when the variable is unset, an error when it does not convert.
fn env_value<T: DeserializeOwned>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, SettingsError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_degree: overlay.max_degree.unwrap_or(self.max_degree),
            orders: overlay
                .orders
                .clone()
                .unwrap_or_else(|| self.orders.clone()),
            show_keys: overlay.show_keys.unwrap_or(self.show_keys),
            render: overlay.render.unwrap_or(self.render),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file (must exist when given)
    pub fn load(local: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_from(global_config_path().as_deref(), local)
    }

    /// Load settings from explicit global and local config paths.
    ///
    /// A missing global file is skipped; a missing local file is an error.
    #[instrument(level = "debug")]
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, SettingsError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("Loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Local config
        if let Some(local_path) = local {
            debug!("Loading local config: {}", local_path.display());
            current = current.merge_with(&load_raw_settings(local_path)?);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply POLYTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("POLYTREE")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("orders")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Some(val) = env_value::<usize>(&config, "max_degree")? {
            settings.max_degree = val;
        }
        if let Some(val) = env_value::<Vec<String>>(&config, "orders")? {
            settings.orders = val;
        }
        if let Some(val) = env_value::<bool>(&config, "show_keys")? {
            settings.show_keys = val;
        }
        if let Some(val) = env_value::<bool>(&config, "render")? {
            settings.render = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.max_degree == 0 {
            return Err(SettingsError::InvalidDegree);
        }
        self.traversal_orders().map(|_| ())
    }

    /// Configured traversal orders, parsed.
    pub fn traversal_orders(&self) -> Result<Vec<Order>, SettingsError> {
        self.orders
            .iter()
            .map(|name| {
                name.parse::<Order>()
                    .map_err(|_| SettingsError::InvalidOrder(name.clone()))
            })
            .collect()
    }

    /// Render settings as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Config {
            message: format!("serialize: {}", e),
        })
    }
}
