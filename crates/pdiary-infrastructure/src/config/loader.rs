//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables
//! and default values with Figment.

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::parse_log_level;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use pdiary_application::ports::registry::list_state_store_providers;
use pdiary_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration from all sources
    ///
    /// Later sources override earlier ones:
    /// 1. `AppConfig::default()`
    /// 2. The TOML file given with [`ConfigLoader::with_config_path`], or the
    ///    first default location that exists
    /// 3. Environment variables such as `PDIARY_STORAGE__PROVIDER`
    ///
    /// An explicit path that does not exist is an error; missing default
    /// files are not.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if !config_path.exists() {
                warn!(path = %config_path.display(), "Configuration file not found");
                return Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            figment = figment.merge(Toml::file(config_path));
            debug!(path = %config_path.display(), "Loaded configuration file");
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            debug!(path = %default_path.display(), "Loaded default configuration file");
        }

        figment = figment.merge(
            Env::prefixed(&format!("{CONFIG_ENV_PREFIX}_")).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;
        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).config_context("Failed to write config file")?;

        Ok(())
    }

    /// First existing default configuration file
    ///
    /// Looks in the working directory, its `pdiary/` subdirectory, the
    /// user config directory and `~/.pdiary/`.
    pub fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let mut candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
        ];
        candidates.extend(
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        );
        candidates.extend(dirs::home_dir().map(|d| {
            d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                .join(DEFAULT_CONFIG_FILENAME)
        }));

        candidates.into_iter().find(|path| path.is_file())
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    validate_storage_config(config)
}

fn validate_storage_config(config: &AppConfig) -> Result<()> {
    let storage = &config.storage;
    let known = list_state_store_providers();
    if !known.is_empty() && !known.iter().any(|(name, _)| *name == storage.provider) {
        let names: Vec<&str> = known.iter().map(|(name, _)| *name).collect();
        return Err(Error::configuration(format!(
            "Unknown storage provider '{}'. Available providers: {names:?}",
            storage.provider
        )));
    }
    if storage.provider == "filesystem" && storage.path.is_none() {
        return Err(Error::configuration(
            "storage.path is required for the filesystem provider",
        ));
    }
    Ok(())
}
