use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::energy::ENERGY_DISPLAY_DISTANCES;
use crate::logging::{LogConfig, LogFormat, LogLevel};
use crate::models::Gender;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// Defaults for the athlete when CLI flags are omitted
    pub athlete: AthleteDefaults,

    /// Calculator defaults
    pub calculator: CalculatorSettings,

    /// Logging settings
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Stored athlete values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AthleteDefaults {
    pub birth_year: Option<i32>,
    pub weight_kg: Option<f64>,
    pub gender: Gender,
    pub resting_hr: Option<u16>,
    pub max_hr: Option<u16>,
    /// Current 5 km time, `M:SS`
    pub five_k_time: Option<String>,
}

/// Calculator defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorSettings {
    /// Race-day temperature in °C when none is given
    pub default_temperature_c: f64,

    /// Distances (km) listed in the energy section
    pub energy_distances: Vec<f64>,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        CalculatorSettings {
            default_temperature_c: 15.0,
            energy_distances: ENERGY_DISPLAY_DISTANCES.to_vec(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            athlete: AthleteDefaults::default(),
            calculator: CalculatorSettings::default(),
            logging: LogConfig::default(),
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".racepace")
            .join("config.toml")
    }

    /// Load configuration from `path`, falling back to defaults when it is missing
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(&config_path)
    }

    /// Keys accepted by [`AppConfig::get`] and [`AppConfig::set`]
    pub fn keys() -> &'static [&'static str] {
        &[
            "athlete.birth_year",
            "athlete.weight_kg",
            "athlete.gender",
            "athlete.resting_hr",
            "athlete.max_hr",
            "athlete.five_k_time",
            "calculator.default_temperature_c",
            "calculator.energy_distances",
            "logging.level",
            "logging.format",
            "logging.file_path",
        ]
    }

    /// Read one value as display text; unset optional values read as an empty string
    pub fn get(&self, key: &str) -> Result<String> {
        fn opt<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        let value = match key {
            "athlete.birth_year" => opt(&self.athlete.birth_year),
            "athlete.weight_kg" => opt(&self.athlete.weight_kg),
            "athlete.gender" => format!("{:?}", self.athlete.gender).to_lowercase(),
            "athlete.resting_hr" => opt(&self.athlete.resting_hr),
            "athlete.max_hr" => opt(&self.athlete.max_hr),
            "athlete.five_k_time" => opt(&self.athlete.five_k_time),
            "calculator.default_temperature_c" => self.calculator.default_temperature_c.to_string(),
            "calculator.energy_distances" => self
                .calculator
                .energy_distances
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(","),
            "logging.level" => self.logging.level.to_filter(),
            "logging.format" => format!("{:?}", self.logging.format).to_lowercase(),
            "logging.file_path" => self
                .logging
                .file_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            _ => return Err(anyhow!("Unknown configuration key: {}", key)),
        };
        Ok(value)
    }

    /// Set one value from text; an empty value clears optional settings
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fn parse_opt<T: std::str::FromStr>(key: &str, value: &str) -> Result<Option<T>>
        where
            T::Err: std::fmt::Display,
        {
            if value.trim().is_empty() {
                return Ok(None);
            }
            value
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| anyhow!("Invalid value for {}: {}", key, e))
        }

        match key {
            "athlete.birth_year" => self.athlete.birth_year = parse_opt(key, value)?,
            "athlete.weight_kg" => self.athlete.weight_kg = parse_opt(key, value)?,
            "athlete.gender" => {
                self.athlete.gender = value.parse().map_err(|e: String| anyhow!(e))?
            }
            "athlete.resting_hr" => self.athlete.resting_hr = parse_opt(key, value)?,
            "athlete.max_hr" => self.athlete.max_hr = parse_opt(key, value)?,
            "athlete.five_k_time" => {
                if !value.trim().is_empty() {
                    crate::format::parse_duration(value)?;
                }
                self.athlete.five_k_time = parse_opt(key, value)?;
            }
            "calculator.default_temperature_c" => {
                self.calculator.default_temperature_c = parse_opt::<f64>(key, value)?
                    .ok_or_else(|| anyhow!("{} cannot be empty", key))?
            }
            "calculator.energy_distances" => {
                self.calculator.energy_distances = value
                    .split(',')
                    .filter(|part| !part.trim().is_empty())
                    .map(|part| {
                        part.trim()
                            .parse::<f64>()
                            .map_err(|e| anyhow!("Invalid value for {}: {}", key, e))
                    })
                    .collect::<Result<Vec<_>>>()?
            }
            "logging.level" => {
                self.logging.level = value.parse::<LogLevel>().map_err(|e| anyhow!(e))?
            }
            "logging.format" => {
                self.logging.format = value.parse::<LogFormat>().map_err(|e| anyhow!(e))?
            }
            "logging.file_path" => self.logging.file_path = parse_opt(key, value)?,
            _ => return Err(anyhow!("Unknown configuration key: {}", key)),
        }

        self.metadata.updated_at = Utc::now();
        Ok(())
    }
}
