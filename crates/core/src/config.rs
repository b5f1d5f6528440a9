//! Application configuration.
//!
//! Settings are layered: built-in defaults, then `~/.config/vgcat/config.toml`
//! when present, then `VGCAT_*` environment variables (`__` separates nested
//! keys, e.g. `VGCAT_REPORT__PLATFORM`).

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::models::Genre;

/// Directory under the user's config root holding `config.toml`.
pub const CONFIG_DIR: &str = "vgcat";
/// Name of the configuration file.
pub const CONFIG_FILE: &str = "config.toml";

const ENV_PREFIX: &str = "VGCAT";

const DEFAULT_CONFIG: &str = r#"# vgcat configuration

# JSON file, or directory of JSON files, holding the catalog.
dataset_path = "data/videogames.json"
# Directory receiving vgcat.log.
log_dir = "logs"

[report]
title = "Final Fantasy VII"
genre = "HACK_AND_SLASH"
developer_genre = "ROLE_PLAYING"
developer = "Square Enix"
platform = "Xbox One"
release_year = 2017
before_year = 2000
after_year = 2018
award_label = "The game awards"
nominated_limit = 5
"#;

/// Top-level application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dataset file or directory.
    pub dataset_path: PathBuf,
    /// Directory for log files.
    pub log_dir: PathBuf,
    /// Parameters for the catalog report.
    pub report: ReportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/videogames.json"),
            log_dir: PathBuf::from("logs"),
            report: ReportConfig::default(),
        }
    }
}

/// Query parameters used when rendering the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Title looked up by name.
    pub title: String,
    /// Genre listed on its own.
    pub genre: Genre,
    /// Genre paired with `developer`.
    pub developer_genre: Genre,
    /// Developer paired with `developer_genre`.
    pub developer: String,
    /// Platform to list games for.
    pub platform: String,
    /// Release year to list games for.
    pub release_year: i32,
    /// Exclusive upper bound of the early range.
    pub before_year: i32,
    /// Inclusive lower bound of the late range.
    pub after_year: i32,
    /// Ceremony used for the per-award ranking.
    pub award_label: String,
    /// Length of the most-nominated ranking.
    pub nominated_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Final Fantasy VII".to_string(),
            genre: Genre::HackAndSlash,
            developer_genre: Genre::RolePlaying,
            developer: "Square Enix".to_string(),
            platform: "Xbox One".to_string(),
            release_year: 2017,
            before_year: 2000,
            after_year: 2018,
            award_label: "The game awards".to_string(),
            nominated_limit: 5,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration from `path` (optional) plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_layers(path.as_ref(), environment())
    }

    fn load_layers(path: &Path, environment: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(environment)
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }
}

// `VGCAT_` prefix, `__` between nested keys: `VGCAT_REPORT__PLATFORM`.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Path of the user configuration file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the default configuration file unless one already exists.
///
/// Returns whether a new file was written.
pub fn ensure_default_config() -> Result<bool> {
    ensure_default_config_at(config_path())
}

/// Write the default configuration to `path` if missing; returns whether it was written.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;
    use tempfile::tempdir;

    #[test]
    fn default_file_matches_built_in_defaults() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("nested").join(CONFIG_FILE);

        assert!(ensure_default_config_at(&path)?);
        assert!(!ensure_default_config_at(&path)?);

        assert_eq!(AppConfig::load_from(&path)?, AppConfig::default());
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
dataset_path = "/srv/catalog"

[report]
genre = "Role playing"
nominated_limit = 3
"#,
        )?;

        let parsed = AppConfig::load_from(&path)?;
        assert_eq!(parsed.dataset_path, PathBuf::from("/srv/catalog"));
        assert_eq!(parsed.log_dir, PathBuf::from("logs"));
        assert_eq!(parsed.report.genre, Genre::RolePlaying);
        assert_eq!(parsed.report.nominated_limit, 3);
        assert_eq!(parsed.report.platform, "Xbox One");
        Ok(())
    }

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let temp = tempdir()?;
        let parsed = AppConfig::load_from(temp.path().join("absent.toml"))?;
        assert_eq!(parsed, AppConfig::default());
        Ok(())
    }

    #[test]
    fn environment_overrides_file_with_single_underscore_prefix() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "[report]\nplatform = \"PC\"\nnominated_limit = 3\n")?;

        let vars: Map<String, String> = [
            ("VGCAT_REPORT__PLATFORM", "Switch"),
            ("VGCAT_REPORT__NOMINATED_LIMIT", "7"),
            ("VGCAT_LOG_DIR", "/var/log/vgcat"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let parsed = AppConfig::load_layers(&path, environment().source(Some(vars)))?;
        assert_eq!(parsed.report.platform, "Switch");
        assert_eq!(parsed.report.nominated_limit, 7);
        assert_eq!(parsed.log_dir, PathBuf::from("/var/log/vgcat"));
        assert_eq!(parsed.report.title, "Final Fantasy VII");
        Ok(())
    }
}
