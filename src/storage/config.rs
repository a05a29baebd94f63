//! Application configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::metrics::DEFAULT_ADJUSTABLE_VALUE;

/// Longest accepted tick or request period: one hour.
pub const MAX_PERIOD_MS: u64 = 3_600_000;

/// Longest accepted scan timeout: one hour.
pub const MAX_SCAN_TIMEOUT_SECS: u64 = 3_600;

/// Largest accepted font scale.
pub const MAX_FONT_SCALE: f32 = 4.0;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Workout metric settings
    pub metrics: MetricsSettings,
    /// Treadmill reader settings
    pub treadmill: TreadmillSettings,
    /// UI settings
    pub ui: UiSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            metrics: MetricsSettings::default(),
            treadmill: TreadmillSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

impl AppConfig {
    /// Check that every interval and scale is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_period("metrics.elapsed_tick_ms", self.metrics.elapsed_tick_ms)?;
        check_period("metrics.distance_tick_ms", self.metrics.distance_tick_ms)?;
        check_period(
            "treadmill.request_interval_ms",
            self.treadmill.request_interval_ms,
        )?;

        for (name, value) in [
            ("metrics.initial_speed", self.metrics.initial_speed),
            ("metrics.initial_incline", self.metrics.initial_incline),
            ("metrics.adjust_step", self.metrics.adjust_step),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite number",
                    name
                )));
            }
        }

        if !(1..=MAX_SCAN_TIMEOUT_SECS).contains(&self.treadmill.scan_timeout_secs) {
            return Err(ConfigError::Invalid(format!(
                "treadmill.scan_timeout_secs must be between 1 and {}",
                MAX_SCAN_TIMEOUT_SECS
            )));
        }

        let scale = self.ui.font_scale;
        if !scale.is_finite() || scale <= 0.0 || scale > MAX_FONT_SCALE {
            return Err(ConfigError::Invalid(format!(
                "ui.font_scale must be greater than 0 and at most {}",
                MAX_FONT_SCALE
            )));
        }
        Ok(())
    }
}

fn check_period(name: &str, millis: u64) -> Result<(), ConfigError> {
    if millis == 0 || millis > MAX_PERIOD_MS {
        return Err(ConfigError::Invalid(format!(
            "{} must be between 1 and {}",
            name, MAX_PERIOD_MS
        )));
    }
    Ok(())
}

/// Workout metric settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Speed (mph) when a workout starts
    pub initial_speed: f64,
    /// Incline (%) when a workout starts
    pub initial_incline: f64,
    /// Amount a single button press changes speed or incline
    pub adjust_step: f64,
    /// Elapsed-time tick period in milliseconds
    pub elapsed_tick_ms: u64,
    /// Distance integration tick period in milliseconds
    pub distance_tick_ms: u64,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            initial_speed: DEFAULT_ADJUSTABLE_VALUE,
            initial_incline: DEFAULT_ADJUSTABLE_VALUE,
            adjust_step: 0.5,
            elapsed_tick_ms: 1000,
            distance_tick_ms: 500,
        }
    }
}

impl MetricsSettings {
    /// Elapsed-time tick period.
    pub fn elapsed_tick(&self) -> Duration {
        Duration::from_millis(self.elapsed_tick_ms)
    }

    /// Distance tick period.
    pub fn distance_tick(&self) -> Duration {
        Duration::from_millis(self.distance_tick_ms)
    }
}

/// Treadmill reader settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreadmillSettings {
    /// How often to ask the treadmill for its state, in milliseconds
    pub request_interval_ms: u64,
    /// How long to scan for the treadmill before giving up, in seconds
    pub scan_timeout_secs: u64,
}

impl Default for TreadmillSettings {
    fn default() -> Self {
        Self {
            request_interval_ms: 1000,
            scan_timeout_secs: 30,
        }
    }
}

impl TreadmillSettings {
    /// State request interval.
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }

    /// Scan timeout.
    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.scan_timeout_secs)
    }
}

/// UI-related settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Font scale multiplier
    pub font_scale: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_scale: 1.0 }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "rocketdonkey", "NongoFit")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = load_config_from(&get_config_path())?;
    config.data_dir = get_data_dir();
    Ok(config)
}

/// Load configuration from `path`, falling back to defaults if it is missing.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load configuration from the default location, writing the defaults there
/// on first launch.
pub fn init_config() -> Result<AppConfig, ConfigError> {
    let mut config = init_config_at(&get_config_path())?;
    config.data_dir = get_data_dir();
    Ok(config)
}

/// Load configuration from `path`, creating it with defaults if missing.
pub fn init_config_at(path: &Path) -> Result<AppConfig, ConfigError> {
    if path.exists() {
        return load_config_from(path);
    }

    let config = AppConfig::default();
    save_config_to(&config, path)?;
    tracing::info!("Wrote default config to {}", path.display());
    Ok(config)
}

/// Save application configuration to `path`.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.metrics, MetricsSettings::default());
        assert_eq!(config.metrics.adjust_step, 0.5);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[metrics]\ninitial_speed = 5.0\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.metrics.initial_speed, 5.0);
        assert_eq!(config.metrics.initial_incline, 3.5);
        assert_eq!(config.treadmill.request_interval_ms, 1000);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.metrics.adjust_step = 0.1;
        config.ui.font_scale = 1.25;
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.metrics.adjust_step, 0.1);
        assert_eq!(loaded.ui.font_scale, 1.25);
    }

    #[test]
    fn test_zero_tick_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[metrics]\ndistance_tick_ms = 0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = init_config_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.metrics, MetricsSettings::default());

        // An existing file is loaded, not overwritten
        std::fs::write(&path, "[metrics]\nadjust_step = 0.25\n").unwrap();
        let config = init_config_at(&path).unwrap();
        assert_eq!(config.metrics.adjust_step, 0.25);
    }

    #[test]
    fn test_oversized_periods_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        for content in [
            "[metrics]\nelapsed_tick_ms = 9223372036854775807\n",
            "[metrics]\ndistance_tick_ms = 3600001\n",
            "[treadmill]\nrequest_interval_ms = 9223372036854775807\n",
            "[treadmill]\nscan_timeout_secs = 0\n",
        ] {
            std::fs::write(&path, content).unwrap();
            let err = load_config_from(&path).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{}", content);
        }

        std::fs::write(&path, "[metrics]\nelapsed_tick_ms = 3600000\n").unwrap();
        assert!(load_config_from(&path).is_ok());
    }

    #[test]
    fn test_font_scale_must_be_positive_and_finite() {
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY, 4.5] {
            let mut config = AppConfig::default();
            config.ui.font_scale = scale;
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "{}",
                scale
            );
        }

        let mut config = AppConfig::default();
        config.ui.font_scale = 4.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "metrics = [").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
