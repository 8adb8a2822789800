//! Configuration management for `tripweave`
//!
//! Handles loading configuration from files and environment variables
//! and provides validation for all configuration settings. Components receive
//! their section of [`TripweaveConfig`] at construction and never read the
//! process environment themselves.

use crate::TripweaveError;
use ::config::{Config, Environment, File};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `tripweave`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripweaveConfig {
    /// Mapping provider (Places API) configuration
    #[serde(default)]
    pub maps: MapsConfig,
    /// Generation provider (Gemini) configuration
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Image translation backend configuration
    #[serde(default)]
    pub translation: TranslationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Mapping provider configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    /// Places API key, also embedded in photo URLs
    pub api_key: Option<String>,
    /// Base URL of the Places web service
    #[serde(default = "default_maps_base_url")]
    pub base_url: String,
    /// Endpoint serving place photos
    #[serde(default = "default_photo_base_url")]
    pub photo_base_url: String,
    /// Nearby search radius in meters
    #[serde(default = "default_search_radius")]
    pub search_radius_m: u32,
    /// Maximum width requested for photo URLs
    #[serde(default = "default_photo_max_width")]
    pub photo_max_width: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Generation provider configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Gemini API key
    pub api_key: Option<String>,
    /// Base URL of the Generative Language API
    #[serde(default = "default_generation_base_url")]
    pub base_url: String,
    /// Model used for `generateContent`
    #[serde(default = "default_generation_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_generation_timeout")]
    pub timeout_seconds: u32,
}

/// Image translation backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Interpreter used to run the translation script
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    /// Path of the OCR/translation script
    #[serde(default = "default_script")]
    pub script: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_maps_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

fn default_photo_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place/photo".to_string()
}

fn default_search_radius() -> u32 {
    50_000
}

fn default_photo_max_width() -> u32 {
    400
}

fn default_timeout() -> u32 {
    30
}

fn default_generation_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_generation_model() -> String {
    "gemini-pro".to_string()
}

fn default_generation_timeout() -> u32 {
    120
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_script() -> String {
    "translate.py".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_maps_base_url(),
            photo_base_url: default_photo_base_url(),
            search_radius_m: default_search_radius(),
            photo_max_width: default_photo_max_width(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_generation_base_url(),
            model: default_generation_model(),
            timeout_seconds: default_generation_timeout(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            script: default_script(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TripweaveConfig {
    /// Load configuration from specified path
    ///
    /// Environment variables prefixed with `TRIPWEAVE_` override file values,
    /// using `__` between section and key (`TRIPWEAVE_MAPS__API_KEY`).
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(::config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("TRIPWEAVE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripweaveConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripweave").join("config.toml"))
    }

    /// Override the configured log level and re-check the settings
    pub fn override_log_level(&mut self, level: &str) -> Result<()> {
        self.logging.level = level.trim().to_lowercase();
        self.validate()
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.maps.base_url.is_empty() {
            self.maps.base_url = default_maps_base_url();
        }
        if self.maps.photo_base_url.is_empty() {
            self.maps.photo_base_url = default_photo_base_url();
        }
        if self.maps.search_radius_m == 0 {
            self.maps.search_radius_m = default_search_radius();
        }
        if self.maps.photo_max_width == 0 {
            self.maps.photo_max_width = default_photo_max_width();
        }
        if self.maps.timeout_seconds == 0 {
            self.maps.timeout_seconds = default_timeout();
        }
        if self.generation.base_url.is_empty() {
            self.generation.base_url = default_generation_base_url();
        }
        if self.generation.model.is_empty() {
            self.generation.model = default_generation_model();
        }
        if self.generation.timeout_seconds == 0 {
            self.generation.timeout_seconds = default_generation_timeout();
        }
        if self.translation.interpreter.is_empty() {
            self.translation.interpreter = default_interpreter();
        }
        if self.translation.script.is_empty() {
            self.translation.script = default_script();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys; both are optional until a provider client is built
    pub fn validate_api_keys(&self) -> Result<()> {
        for (name, key) in [
            ("maps.api_key", &self.maps.api_key),
            ("generation.api_key", &self.generation.api_key),
        ] {
            if let Some(key) = key {
                if key.trim().is_empty() {
                    return Err(TripweaveError::config(format!(
                        "{name} cannot be empty if provided. Either remove it or provide a valid key."
                    ))
                    .into());
                }
            }
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.maps.search_radius_m > 50_000 {
            return Err(
                TripweaveError::config("Search radius cannot exceed 50000 meters").into(),
            );
        }

        if self.maps.photo_max_width > 1600 {
            return Err(TripweaveError::config("Photo max width cannot exceed 1600 pixels").into());
        }

        if self.maps.timeout_seconds > 300 || self.generation.timeout_seconds > 600 {
            return Err(TripweaveError::config(
                "Request timeout cannot exceed 300 seconds (maps) or 600 seconds (generation)",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripweaveError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripweaveError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("maps.base_url", &self.maps.base_url),
            ("maps.photo_base_url", &self.maps.photo_base_url),
            ("generation.base_url", &self.generation.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripweaveError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
