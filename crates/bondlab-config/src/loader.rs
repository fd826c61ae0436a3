//! Loading configuration from TOML and JSON.

use std::path::Path;

use crate::analytics::AnalyticsConfig;
use crate::error::{ConfigError, ConfigResult, Validate};

impl AnalyticsConfig {
    /// Parses a TOML document and validates it.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses a JSON document and validates it.
    pub fn from_json_str(source: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a `.toml` or `.json` file, chosen by extension.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: display.clone(),
            reason: e.to_string(),
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&source),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&source),
            _ => Err(ConfigError::UnsupportedFormat { path: display }),
        }
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
