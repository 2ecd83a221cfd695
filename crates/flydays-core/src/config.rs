use anyhow::{Context, Result};
use flydays_analysis::{
    Thresholds, DEFAULT_MAX_RAIN_MM, DEFAULT_MAX_WIND_GUSTS_MS, DEFAULT_MAX_WIND_MS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

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

    /// All errors joined into one line
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default flight thresholds, overridable per run
    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    /// Historical weather archive (Open-Meteo)
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// Place-name search (Nominatim)
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Settings shared by all outbound requests
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    /// Maximum rain in mm/day
    pub max_rain: f64,
    /// Maximum mean wind speed in m/s
    pub max_wind: f64,
    /// Maximum wind gusts in m/s
    pub max_wind_gusts: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            max_rain: DEFAULT_MAX_RAIN_MM,
            max_wind: DEFAULT_MAX_WIND_MS,
            max_wind_gusts: DEFAULT_MAX_WIND_GUSTS_MS,
        }
    }
}

impl From<ThresholdsConfig> for Thresholds {
    fn from(config: ThresholdsConfig) -> Self {
        Thresholds::new(config.max_rain, config.max_wind, config.max_wind_gusts)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    pub base_url: String,
    /// IANA zone used for daily aggregation and for "yesterday"
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Length of the trailing window in years
    #[serde(default = "default_window_years")]
    pub window_years: u32,
    #[serde(default = "default_archive_timeout")]
    pub timeout_secs: u64,
}

fn default_timezone() -> String {
    "Europe/Oslo".to_string()
}

fn default_window_years() -> u32 {
    5
}

fn default_archive_timeout() -> u64 {
    30
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: "https://archive-api.open-meteo.com/v1/archive".to_string(),
            timezone: default_timezone(),
            window_years: default_window_years(),
            timeout_secs: default_archive_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    pub base_url: String,
    /// ISO 3166-1 alpha-2 filter passed as `countrycodes`
    #[serde(default = "default_country_code")]
    pub country_code: String,
    /// Maximum number of matches requested
    #[serde(default = "default_geocode_limit")]
    pub limit: u32,
    #[serde(default = "default_geocode_timeout")]
    pub timeout_secs: u64,
}

fn default_country_code() -> String {
    "no".to_string()
}

fn default_geocode_limit() -> u32 {
    5
}

fn default_geocode_timeout() -> u64 {
    10
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org/search".to_string(),
            country_code: default_country_code(),
            limit: default_geocode_limit(),
            timeout_secs: default_geocode_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Nominatim's usage policy requires an identifying agent
    pub user_agent: String,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_retry_delay")]
    pub initial_retry_delay_ms: u64,
    #[serde(default = "default_max_retry_delay")]
    pub max_retry_delay_ms: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_retry_delay() -> u64 {
    100
}

fn default_max_retry_delay() -> u64 {
    5000
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "DroneWeatherAnalyzer/1.0".to_string(),
            max_retries: default_max_retries(),
            initial_retry_delay_ms: default_initial_retry_delay(),
            max_retry_delay_ms: default_max_retry_delay(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, writing defaults if
    /// the file doesn't exist yet
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, writing defaults if the
    /// file doesn't exist yet
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::info!("No config at {}, writing defaults", config_path.display());
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; errors fail the load.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
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

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        let thresholds = [
            ("thresholds.max_rain", self.thresholds.max_rain),
            ("thresholds.max_wind", self.thresholds.max_wind),
            ("thresholds.max_wind_gusts", self.thresholds.max_wind_gusts),
        ];
        for (field, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                result.add_error(field, "Threshold must be a non-negative number");
            }
        }

        self.validate_url(&self.archive.base_url, "archive.base_url", &mut result);
        self.validate_url(&self.geocoding.base_url, "geocoding.base_url", &mut result);

        if self.archive.timezone.trim().is_empty() {
            result.add_error("archive.timezone", "Timezone must not be empty");
        }

        if self.archive.window_years == 0 {
            result.add_error("archive.window_years", "Window must cover at least one year");
        } else if self.archive.window_years > 20 {
            result.add_warning(
                "archive.window_years",
                "Windows longer than 20 years make slow, large requests",
            );
        }

        if self.archive.timeout_secs == 0 {
            result.add_error("archive.timeout_secs", "Timeout must be greater than 0");
        }
        if self.geocoding.timeout_secs == 0 {
            result.add_error("geocoding.timeout_secs", "Timeout must be greater than 0");
        }

        if self.geocoding.limit == 0 {
            result.add_error("geocoding.limit", "Limit must be greater than 0");
        } else if self.geocoding.limit > 50 {
            result.add_warning("geocoding.limit", "Nominatim caps results at 50");
        }

        if self.geocoding.country_code.len() != 2 {
            result.add_warning(
                "geocoding.country_code",
                "Country code should be a two-letter ISO code",
            );
        }

        if self.http.user_agent.trim().is_empty() {
            result.add_error("http.user_agent", "User agent must not be empty");
        }

        if self.http.max_retries > 10 {
            result.add_warning("http.max_retries", "More than 10 retries per request");
        }
        if self.http.initial_retry_delay_ms > self.http.max_retry_delay_ms {
            result.add_warning(
                "http.initial_retry_delay_ms",
                "Initial retry delay exceeds the maximum delay",
            );
        }

        result
    }

    /// Validate a URL field
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

    /// Save configuration to the given path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Path of the configuration file in the user's config directory
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("flydays");

        Ok(config_dir.join("config.toml"))
    }
}
