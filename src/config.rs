use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::graph::MalformedLinePolicy;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pathfinder: PathfinderConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Pathfinder-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PathfinderConfig {
    /// Location file loaded at startup (`SOURCE:DEST(weight),...` per line).
    #[serde(default = "default_locations_file")]
    pub locations_file: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            locations_file: default_locations_file(),
            log_level: default_log_level(),
        }
    }
}

/// Location file loading configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoaderConfig {
    #[serde(default)]
    pub on_malformed_line: MalformedLinePolicy,
}

/// Route search configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    /// Longest route (in edges) the search will expand. Unbounded when unset.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_locations_file() -> PathBuf {
    PathBuf::from("locations.txt")
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in PATHFINDER_CONFIG environment variable (must exist)
    /// 2. ./config.toml in current directory
    /// 3. Built-in defaults when neither is present
    pub fn load() -> Result<Self> {
        // Optional; missing .env is fine
        let _ = dotenv::dotenv();

        if let Ok(path) = std::env::var("PATHFINDER_CONFIG") {
            return Self::load_from(path);
        }

        let default_path = Path::new("config.toml");
        if default_path.exists() {
            Self::load_from(default_path)
        } else {
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config_path = path.as_ref();
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.pathfinder.locations_file.as_os_str().is_empty() {
            anyhow::bail!("pathfinder.locations_file must not be empty");
        }

        let level = self.pathfinder.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            anyhow::bail!(
                "pathfinder.log_level must be one of {}, got '{}'",
                LOG_LEVELS.join("/"),
                self.pathfinder.log_level
            );
        }

        if self.search.max_depth == Some(0) {
            anyhow::bail!("search.max_depth must be greater than 0");
        }

        Ok(())
    }

    /// Get location file path
    pub fn locations_file(&self) -> &Path {
        &self.pathfinder.locations_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn write_config(temp_dir: &TempDir, content: &str) -> PathBuf {
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, content).unwrap();
        config_path
    }

    #[test]
    fn test_config_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(
            &temp_dir,
            r#"
[pathfinder]
locations_file = "states.txt"
log_level = "debug"

[loader]
on_malformed_line = "abort"

[search]
max_depth = 8
"#,
        );

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.locations_file(), Path::new("states.txt"));
        assert_eq!(config.pathfinder.log_level, "debug");
        assert_eq!(config.loader.on_malformed_line, MalformedLinePolicy::Abort);
        assert_eq!(config.search.max_depth, Some(8));
    }

    #[test]
    fn test_config_defaults_for_missing_sections() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, "[pathfinder]\nlog_level = \"warn\"\n");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.locations_file(), Path::new("locations.txt"));
        assert_eq!(config.loader.on_malformed_line, MalformedLinePolicy::Skip);
        assert_eq!(config.search.max_depth, None);
    }

    #[test]
    fn test_config_rejects_zero_depth() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, "[search]\nmax_depth = 0\n");

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(err.to_string().contains("max_depth"));
    }

    #[test]
    fn test_config_rejects_unknown_log_level() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, "[pathfinder]\nlog_level = \"loud\"\n");

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn test_config_rejects_unknown_policy() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, "[loader]\non_malformed_line = \"ignore\"\n");

        assert!(Config::load_from(&config_path).is_err());
    }

    #[test]
    fn test_config_env_override() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, "[pathfinder]\nlocations_file = \"from-env.txt\"\n");

        let original = std::env::var("PATHFINDER_CONFIG").ok();
        std::env::set_var("PATHFINDER_CONFIG", config_path.to_str().unwrap());
        let config = Config::load();
        std::env::remove_var("PATHFINDER_CONFIG");
        if let Some(v) = original {
            std::env::set_var("PATHFINDER_CONFIG", v);
        }

        let config = config.unwrap();
        assert_eq!(config.locations_file(), Path::new("from-env.txt"));
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let original = std::env::var("PATHFINDER_CONFIG").ok();
        std::env::set_var("PATHFINDER_CONFIG", "nonexistent.toml");
        let config = Config::load();
        std::env::remove_var("PATHFINDER_CONFIG");
        if let Some(v) = original {
            std::env::set_var("PATHFINDER_CONFIG", v);
        }
        assert!(config.is_err());
    }
}
