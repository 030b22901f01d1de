// src/config/settings.rs
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const SETTINGS_FILE: &str = "settings.ron";
const APP_DIR: &str = "liquor-forecast";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the forecast service, without a trailing `/api`.
    pub base_url: String,
    /// Horizons offered in the selector, in periods.
    pub horizons: Vec<u32>,
    pub default_horizon: u32,
    /// Singular period noun used in labels ("week", "month").
    pub period_name: String,
    /// Characters in category keys rendered as spaces.
    pub category_separators: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            horizons: vec![4, 8, 12],
            default_horizon: 4,
            period_name: "week".to_string(),
            category_separators: "_".to_string(),
        }
    }
}

impl Settings {
    /// Loads defaults, then the user's settings file, then `FORECAST_*`
    /// environment variables.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        match &path {
            Some(path) => debug!("Looking for settings in {}", path.display()),
            None => debug!("No config directory on this platform, using defaults"),
        }
        Self::load_from(path.as_deref())
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        Self::load_layers(path, Self::environment())
    }

    // `FORECAST_HORIZONS=4,8,12` is read as a list; everything else is a scalar.
    fn environment() -> Environment {
        Environment::with_prefix("FORECAST")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("horizons")
    }

    fn load_layers(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Ron).required(false));
        }

        let settings: Settings = builder
            .add_source(environment)
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Failed to parse settings")?;

        Ok(settings.normalized())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    /// Repairs values the selector can't work with.
    pub fn normalized(mut self) -> Self {
        self.horizons.retain(|h| *h > 0);
        self.horizons.sort_unstable();
        self.horizons.dedup();
        if self.horizons.is_empty() {
            warn!("No usable forecast horizons configured, falling back to defaults");
            self.horizons = Settings::default().horizons;
        }
        if !self.horizons.contains(&self.default_horizon) {
            warn!(
                "Default horizon {} is not offered, using {}",
                self.default_horizon, self.horizons[0]
            );
            self.default_horizon = self.horizons[0];
        }

        let trimmed = self.base_url.trim().trim_end_matches('/');
        self.base_url = if trimmed.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };

        if self.period_name.trim().is_empty() {
            self.period_name = Settings::default().period_name;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(Some(&dir.path().join(SETTINGS_FILE))).unwrap();
        assert_eq!(settings.horizons, vec![4, 8, 12]);
        assert_eq!(settings.default_horizon, 4);
        assert_eq!(settings.category_separators, "_");
    }

    #[test]
    fn test_settings_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let custom = Settings {
            base_url: "http://forecast.internal:9000/".to_string(),
            horizons: vec![6, 3],
            default_horizon: 6,
            period_name: "month".to_string(),
            category_separators: "_-".to_string(),
        };
        fs::write(
            &path,
            ron::ser::to_string_pretty(&custom, ron::ser::PrettyConfig::new()).unwrap(),
        )
        .unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.base_url, "http://forecast.internal:9000");
        assert_eq!(settings.horizons, vec![3, 6]);
        assert_eq!(settings.default_horizon, 6);
        assert_eq!(settings.period_name, "month");
        assert_eq!(settings.category_separators, "_-");
    }

    #[test]
    fn test_partial_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r#"(period_name: "month")"#).unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.period_name, "month");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "(horizons: [4, 8], period_name: \"month\")").unwrap();

        let vars = config::Map::from([
            ("FORECAST_HORIZONS".to_string(), "12,6".to_string()),
            ("FORECAST_DEFAULT_HORIZON".to_string(), "6".to_string()),
            ("FORECAST_BASE_URL".to_string(), "http://10.0.0.5:8000/".to_string()),
            ("OTHER_HORIZONS".to_string(), "1".to_string()),
        ]);
        let environment = Settings::environment().source(Some(vars));
        let settings = Settings::load_layers(Some(&path), environment).unwrap();

        assert_eq!(settings.horizons, vec![6, 12]);
        assert_eq!(settings.default_horizon, 6);
        assert_eq!(settings.base_url, "http://10.0.0.5:8000");
        assert_eq!(settings.period_name, "month");
    }

    #[test]
    fn test_normalized_repairs_horizons() {
        let settings = Settings {
            horizons: vec![0],
            default_horizon: 5,
            base_url: "  ".to_string(),
            ..Settings::default()
        }
        .normalized();

        assert_eq!(settings.horizons, vec![4, 8, 12]);
        assert_eq!(settings.default_horizon, 4);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }
}
