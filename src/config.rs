//! Client configuration.

use crate::consts::cli_consts::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the API, e.g. `https://fit.example.com/api/v1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Interval used by `dashboard --headless --watch` when no interval is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval_secs: Option<u64>,
}

impl Config {
    /// Create Config pointing at the given API base URL.
    #[cfg(test)]
    pub fn new(api_url: Option<String>) -> Self {
        Config {
            api_url,
            refresh_interval_secs: None,
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the configuration if the file exists, otherwise returns the default.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the configuration file. A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Directory holding the settings file and the dashboard log.
pub fn get_config_dir() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine the home directory",
        )
    })?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Full path of the settings file.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Picks the API environment: command-line flag, then environment variable, then the
/// settings file, then the local default.
pub fn resolve_environment(
    flag: Option<&str>,
    env_var: Option<&str>,
    config: &Config,
) -> Result<Environment, String> {
    let candidate = flag
        .or(env_var.filter(|value| !value.trim().is_empty()))
        .or(config.api_url.as_deref());

    match candidate {
        Some(value) => value.parse::<Environment>(),
        None => Ok(Environment::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config {
            api_url: Some("http://10.0.0.5:8000/api/v1".to_string()),
            refresh_interval_secs: Some(30),
        };
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let config = Config::new(Some("http://localhost:9000/api/v1".to_string()));
        let result = config.save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Saving a configuration should overwrite an existing file.
    fn test_save_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config1 = Config::new(Some("http://one:8000/api/v1".to_string()));
        config1.save(&path).unwrap();

        let config2 = Config::new(Some("http://two:8000/api/v1".to_string()));
        config2.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config2, loaded_config);
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = Config::load_from_file(&path);
        assert!(result.is_err());
    }

    #[test]
    // An empty object is a valid configuration with nothing set.
    fn test_load_accepts_empty_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_clear_removes_file_and_tolerates_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config::default().save(&path).unwrap();

        Config::clear(&path).unwrap();
        assert!(!path.exists());
        assert!(Config::clear(&path).is_ok());
    }

    #[test]
    fn test_resolve_environment_precedence() {
        let config = Config::new(Some("http://from-config:8000/api/v1".to_string()));

        let env = resolve_environment(
            Some("http://from-flag:8000/api/v1"),
            Some("http://from-env:8000/api/v1"),
            &config,
        )
        .unwrap();
        assert_eq!(env.api_url(), "http://from-flag:8000/api/v1");

        let env = resolve_environment(None, Some("http://from-env:8000/api/v1"), &config).unwrap();
        assert_eq!(env.api_url(), "http://from-env:8000/api/v1");

        // A blank environment variable is ignored.
        let env = resolve_environment(None, Some("  "), &config).unwrap();
        assert_eq!(env.api_url(), "http://from-config:8000/api/v1");

        let env = resolve_environment(None, None, &Config::default()).unwrap();
        assert_eq!(env, Environment::Local);
    }

    #[test]
    fn test_resolve_environment_rejects_garbage() {
        assert!(resolve_environment(Some("ftp://nope"), None, &Config::default()).is_err());
    }
}
