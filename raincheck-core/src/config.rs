use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::error::RaincheckError;

pub const DEFAULT_FORECAST_URL: &str = "http://api.weatherapi.com/v1/forecast.json";
pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json/";

/// Key compiled into release builds, e.g. `RAINCHECK_API_KEY=... cargo build --release`.
const BUILD_API_KEY: Option<&str> = option_env!("RAINCHECK_API_KEY");

/// Optional settings file stored on disk.
///
/// Example TOML:
/// api_key = "..."
/// forecast_url = "http://api.weatherapi.com/v1/forecast.json"
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub api_key: Option<String>,
    pub forecast_url: Option<String>,
    pub geolocation_url: Option<String>,
}

impl Settings {
    /// Load settings from disk, or return `None` if the file doesn't exist.
    pub fn load() -> Result<Option<Self>> {
        let path = Self::file_path()?;
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings = Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(Some(settings))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Path to the settings file.
    pub fn file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "raincheck", "raincheck")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Everything the clients need, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub forecast_url: String,
    pub geolocation_url: String,
}

impl Config {
    /// Load `.env`, then resolve the configuration from the build, the
    /// process environment and the settings file.
    pub fn load() -> Result<Self> {
        load_dotenv()?;
        let settings = Settings::load()?;

        Self::from_sources(BUILD_API_KEY, |name| std::env::var(name).ok(), settings)
    }

    pub fn from_sources(
        build_key: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
        settings: Option<Settings>,
    ) -> Result<Self> {
        let settings = settings.unwrap_or_default();

        let api_key = resolve_api_key(build_key, env("API_KEY"), settings.api_key)
            .ok_or(RaincheckError::MissingApiKey)?;

        let forecast_url = non_empty(env("RAINCHECK_FORECAST_URL"))
            .or(non_empty(settings.forecast_url))
            .unwrap_or_else(|| DEFAULT_FORECAST_URL.to_string());

        let geolocation_url = non_empty(env("RAINCHECK_GEOLOCATION_URL"))
            .or(non_empty(settings.geolocation_url))
            .unwrap_or_else(|| DEFAULT_GEOLOCATION_URL.to_string());

        Ok(Self { api_key, forecast_url, geolocation_url })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(api_key: &str, base: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            forecast_url: format!("{base}/v1/forecast.json"),
            geolocation_url: format!("{base}/json/"),
        }
    }
}

/// First non-empty key wins: build-time, then environment, then settings file.
pub fn resolve_api_key(
    build_key: Option<&str>,
    env_key: Option<String>,
    settings_key: Option<String>,
) -> Option<String> {
    non_empty(build_key.map(str::to_string))
        .or(non_empty(env_key))
        .or(non_empty(settings_key))
}

/// Populate the process environment from `./.env`. A missing file is not an error.
pub fn load_dotenv() -> std::result::Result<(), RaincheckError> {
    load_dotenv_from(Path::new("."))
}

/// Load `<dir>/.env` only; parent directories are never searched.
pub fn load_dotenv_from(dir: &Path) -> std::result::Result<(), RaincheckError> {
    let path = dir.join(".env");
    match dotenv::from_path(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded .env");
            Ok(())
        }
        Err(dotenv::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(RaincheckError::EnvFile(err)),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
