use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Default location stored alongside the credential, so the CLI can be used
/// without repeating `--lat`/`--lon` on every invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: String,
    pub longitude: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// BreezoMeter API key, obtained from the developer site.
    pub api_key: Option<String>,

    /// Example TOML:
    /// [location]
    /// latitude = "33.222659"
    /// longitude = "-97.115009"
    pub location: Option<LocationConfig>,
}

impl Config {
    /// Return the configured API key, or a hint on how to set one.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No BreezoMeter API key configured.\n\
                 Hint: run `breezo configure` and enter your API key."
            )
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn location(&self) -> Option<&LocationConfig> {
        self.location.as_ref()
    }

    pub fn set_location(&mut self, latitude: String, longitude: String) {
        self.location = Some(LocationConfig { latitude, longitude });
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "breezo", "breezo-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key().unwrap_err();

        assert!(err.to_string().contains("No BreezoMeter API key configured"));
        assert!(err.to_string().contains("Hint: run `breezo configure`"));
        assert!(!cfg.is_configured());
    }

    #[test]
    fn set_api_key_makes_config_usable() {
        let mut cfg = Config::default();

        cfg.set_api_key("API_KEY".into());

        assert!(cfg.is_configured());
        assert_eq!(cfg.api_key().expect("api key must exist"), "API_KEY");
    }

    #[test]
    fn set_location_round_trips() {
        let mut cfg = Config::default();
        assert!(cfg.location().is_none());

        cfg.set_location("33.222659".into(), "-97.115009".into());

        let loc = cfg.location().expect("location must exist");
        assert_eq!(loc.latitude, "33.222659");
        assert_eq!(loc.longitude, "-97.115009");
    }

    #[test]
    fn config_serializes_to_toml_and_back() {
        let mut cfg = Config::default();
        cfg.set_api_key("API_KEY".into());
        cfg.set_location("33.222659".into(), "-97.115009".into());

        let toml = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&toml).expect("parse");

        assert_eq!(parsed.api_key().unwrap(), "API_KEY");
        assert_eq!(parsed.location().unwrap().latitude, "33.222659");
    }
}
