//! Configuration Loader
//!
//! Environment-aware configuration loading: YAML file discovery, environment
//! detection, environment-section merging and variable overrides.

use super::error::{ConfigResult, ConfigurationError};
use super::TelemetryConfig;
use serde_yaml::{Mapping, Value as YamlValue};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// File names searched in the configuration directory, in order
const CONFIG_FILE_NAMES: [&str; 2] = ["robot-telemetry.yaml", "robot-telemetry.yml"];

/// Environment names whose sections are stripped from the merged document
const KNOWN_ENVIRONMENTS: [&str; 3] = ["development", "test", "production"];

pub const ENV_ENVIRONMENT: &str = "ROBOT_TELEMETRY_ENV";
pub const ENV_BIND_ADDRESS: &str = "ROBOT_TELEMETRY_BIND_ADDRESS";
pub const ENV_DATA_FILE: &str = "ROBOT_TELEMETRY_DATA_FILE";
pub const ENV_LOG_LEVEL: &str = "ROBOT_TELEMETRY_LOG_LEVEL";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "ROBOT_TELEMETRY_REQUEST_TIMEOUT_MS";

/// Loaded configuration plus where it came from
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: TelemetryConfig,
    environment: String,
    config_directory: PathBuf,
    /// `None` when no file was found and defaults are in effect
    config_file: Option<PathBuf>,
    /// Environment variables that replaced file or default values
    applied_overrides: Vec<&'static str>,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_with_overrides(config_dir, environment, |key| env::var(key).ok())
    }

    /// Load configuration resolving overrides through `lookup` instead of the process
    /// environment, so tests need not mutate global state
    ///
    /// Loading usually happens before logging is initialized, so the outcome is kept
    /// on the manager and reported by [`ConfigManager::log_summary`].
    pub fn load_with_overrides<F>(
        config_dir: Option<PathBuf>,
        environment: &str,
        lookup: F,
    ) -> ConfigResult<Arc<ConfigManager>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = environment.trim().to_lowercase();
        let explicit_directory = config_dir.is_some();
        let config_directory = config_dir.unwrap_or_else(|| PathBuf::from("config"));

        if explicit_directory && !config_directory.is_dir() {
            return Err(ConfigurationError::DirectoryNotFound {
                path: config_directory,
            });
        }

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config_file = Self::find_config_file(&config_directory);
        let mut config = match &config_file {
            Some(path) => Self::load_and_merge_config(path, &environment)?,
            None => TelemetryConfig::default(),
        };

        let applied_overrides = Self::apply_overrides(&mut config, lookup)?;
        config.validate()?;

        Ok(Arc::new(ConfigManager {
            config,
            environment,
            config_directory,
            config_file,
            applied_overrides,
        }))
    }

    /// Wrap an already-built configuration, e.g. one assembled in tests
    pub fn from_config(config: TelemetryConfig, environment: &str) -> ConfigResult<ConfigManager> {
        config.validate()?;
        Ok(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory: PathBuf::from("config"),
            config_file: None,
            applied_overrides: Vec::new(),
        })
    }

    /// Report how the configuration was assembled
    ///
    /// Call once the tracing subscriber is installed.
    pub fn log_summary(&self) {
        if self.config_file.is_none() {
            warn!(
                directory = %self.config_directory.display(),
                "No robot-telemetry configuration file found, using defaults"
            );
        }

        for key in &self.applied_overrides {
            debug!(key = *key, "Applied environment override");
        }

        info!(
            environment = %self.environment,
            config_file = ?self.config_file,
            overrides = ?self.applied_overrides,
            bind_address = %self.config.web.bind_address,
            data_file = %self.config.store.data_file.display(),
            "Configuration loaded successfully"
        );
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    pub fn applied_overrides(&self) -> &[&'static str] {
        &self.applied_overrides
    }

    /// Effective configuration rendered as YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(&self.config)
            .map_err(|e| ConfigurationError::invalid_yaml("<effective configuration>", e))
    }

    /// Detect current environment from environment variables
    fn detect_environment() -> String {
        env::var(ENV_ENVIRONMENT)
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
    }

    fn find_config_file(config_directory: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| config_directory.join(name))
            .find(|path| path.is_file())
    }

    /// Safely read a configuration file with a size limit
    fn read_config_file_safely(path: &Path) -> ConfigResult<String> {
        const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

        let metadata = std::fs::metadata(path)
            .map_err(|e| ConfigurationError::file_read_error(path.display().to_string(), e))?;

        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigurationError::invalid_value(
                "file_size",
                metadata.len().to_string(),
                format!(
                    "Configuration file too large ({} bytes > {} bytes limit)",
                    metadata.len(),
                    MAX_CONFIG_FILE_SIZE
                ),
            ));
        }

        std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::file_read_error(path.display().to_string(), e))
    }

    /// Load and merge configuration with environment-specific overrides
    fn load_and_merge_config(
        config_file: &Path,
        environment: &str,
    ) -> ConfigResult<TelemetryConfig> {
        let yaml_content = Self::read_config_file_safely(config_file)?;

        let mut yaml_data: YamlValue = serde_yaml::from_str(&yaml_content)
            .map_err(|e| ConfigurationError::invalid_yaml(config_file.display().to_string(), e))?;

        // An empty file parses as null
        if yaml_data.is_null() {
            yaml_data = YamlValue::Mapping(Mapping::new());
        }

        if let Some(env_overrides) = yaml_data
            .get(YamlValue::String(environment.to_string()))
            .cloned()
        {
            debug!("Applying environment-specific overrides for: {}", environment);
            Self::merge_yaml_values(&mut yaml_data, env_overrides);
        }

        if let YamlValue::Mapping(ref mut map) = yaml_data {
            for name in KNOWN_ENVIRONMENTS {
                map.remove(YamlValue::String(name.to_string()));
            }
            map.remove(YamlValue::String(environment.to_string()));
        }

        serde_yaml::from_value(yaml_data).map_err(|e| {
            ConfigurationError::invalid_yaml(
                config_file.display().to_string(),
                format!("Failed to deserialize configuration: {e}"),
            )
        })
    }

    /// Recursively merge YAML values (environment overrides into base config)
    fn merge_yaml_values(base: &mut YamlValue, override_value: YamlValue) {
        match (&mut *base, override_value) {
            (YamlValue::Mapping(base_map), YamlValue::Mapping(override_map)) => {
                for (key, value) in override_map {
                    if let Some(existing_value) = base_map.get_mut(&key) {
                        Self::merge_yaml_values(existing_value, value);
                    } else {
                        base_map.insert(key, value);
                    }
                }
            }
            (base_ref, override_val) => {
                *base_ref = override_val;
            }
        }
    }

    /// Apply `ROBOT_TELEMETRY_*` overrides, returning the keys that were set
    fn apply_overrides<F>(
        config: &mut TelemetryConfig,
        lookup: F,
    ) -> ConfigResult<Vec<&'static str>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = Vec::new();

        if let Some(bind_address) = lookup(ENV_BIND_ADDRESS) {
            config.web.bind_address = bind_address;
            applied.push(ENV_BIND_ADDRESS);
        }

        if let Some(data_file) = lookup(ENV_DATA_FILE) {
            config.store.data_file = PathBuf::from(data_file);
            applied.push(ENV_DATA_FILE);
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.logging.level = level;
            applied.push(ENV_LOG_LEVEL);
        }

        if let Some(timeout) = lookup(ENV_REQUEST_TIMEOUT_MS) {
            config.web.request_timeout_ms = timeout.trim().parse().map_err(|e| {
                ConfigurationError::environment_override(
                    ENV_REQUEST_TIMEOUT_MS,
                    format!("'{timeout}' is not a number of milliseconds: {e}"),
                )
            })?;
            applied.push(ENV_REQUEST_TIMEOUT_MS);
        }

        Ok(applied)
    }
}
