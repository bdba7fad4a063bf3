use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Default 7Timer! endpoint serving the civil light product
pub const DEFAULT_API_URL: &str = "https://www.7timer.info/bin/api.pl";

const APP_DIR: &str = "skycast";
const CONFIG_FILE: &str = "config.toml";
const RECENT_FILE: &str = "recent_cities.json";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding config.toml and the recent-cities file
    pub config_dir: PathBuf,

    /// Forecast endpoint settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Presentation settings
    #[serde(default)]
    pub ui: UiConfig,

    /// Stand-in for the platform location service
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast endpoint (lon/lat/product/output are appended as query parameters)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Optional request timeout; the HTTP stack default applies when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Delay before a status message fades
    #[serde(default = "default_status_fade_ms")]
    pub status_fade_ms: u64,

    /// Number of forecast cards to render
    #[serde(default = "default_forecast_days")]
    pub forecast_days: usize,

    /// Directory the `images/<code>.png` icon paths are resolved against
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,
}

fn default_status_fade_ms() -> u64 {
    2000
}

fn default_forecast_days() -> usize {
    7
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            status_fade_ms: default_status_fade_ms(),
            forecast_days: default_forecast_days(),
            assets_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// When false, location requests are refused as if permission was denied
    #[serde(default = "default_location_enabled")]
    pub enabled: bool,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

fn default_location_enabled() -> bool {
    true
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enabled: default_location_enabled(),
            latitude: None,
            longitude: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            ui: UiConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the user config directory, creating a default file if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, creating a default file there if missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let mut config = Self::default();
            if let Some(parent) = config_path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; errors fail the load.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.api_url, "weather.api_url", &mut result);

        if self.weather.request_timeout_secs == Some(0) {
            result.add_error(
                "weather.request_timeout_secs",
                "Timeout must be greater than 0 (omit it to use the default)",
            );
        }

        if self.ui.forecast_days == 0 {
            result.add_error("ui.forecast_days", "At least one forecast day is required");
        } else if self.ui.forecast_days > 7 {
            result.add_warning(
                "ui.forecast_days",
                "The civil light product covers at most 7 days",
            );
        }

        if self.ui.status_fade_ms == 0 {
            result.add_warning("ui.status_fade_ms", "Status messages will fade immediately");
        }

        if let Some(dir) = &self.ui.assets_dir {
            if !dir.is_dir() {
                result.add_warning(
                    "ui.assets_dir",
                    format!("Path is not a directory: {}", dir.display()),
                );
            }
        }

        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    result.add_error("location.latitude", "Latitude must be within -90..=90");
                }
                if !(-180.0..=180.0).contains(&lon) {
                    result.add_error("location.longitude", "Longitude must be within -180..=180");
                }
            }
            (None, None) => {}
            _ => result.add_warning(
                "location",
                "Both latitude and longitude are needed; location lookups are unsupported",
            ),
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Where the recent-cities list is persisted
    pub fn recent_cities_path(&self) -> PathBuf {
        self.config_dir.join(RECENT_FILE)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join(APP_DIR);

        Ok(config_dir.join(CONFIG_FILE))
    }
}
