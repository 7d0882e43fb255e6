//! Configuration handling for depviz
//!
//! Configuration is a TOML file, looked up as `--config <path>`, then
//! `./depviz.toml`, then `~/.config/depviz/config.toml` (platform equivalent).
//!
//! ```toml
//! packageName = "express"
//! repositoryUrl = "https://registry.npmjs.org"
//! outputFilePath = "graphs/express.dot"
//! maxDepth = 3
//! visualizerPath = "/usr/local/bin/dot"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::registry::{RegistryOptions, ResolveOptions};
use crate::render::{DEFAULT_RASTERIZER, DEFAULT_VISUALIZER};

/// File name searched for in the working directory
pub const LOCAL_CONFIG_FILE: &str = "depviz.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("No configuration file found (searched: {0})")]
    NotFound(String),
}

fn default_visualizer() -> String {
    DEFAULT_VISUALIZER.to_string()
}

fn default_rasterizer() -> String {
    DEFAULT_RASTERIZER.to_string()
}

/// Settings for one resolve-and-render run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Graphviz executable, used verbatim on the command line
    #[serde(default = "default_visualizer")]
    pub visualizer_path: String,

    /// SVG to PNG converter, used verbatim on the command line
    #[serde(default = "default_rasterizer")]
    pub rasterizer_path: String,

    /// Root package to resolve
    #[serde(default)]
    pub package_name: String,

    /// Graph-source path; its extension is replaced by `.dot`, `.svg` and `.png`
    #[serde(default)]
    pub output_file_path: PathBuf,

    /// Deepest level whose dependencies are looked up (root = 1)
    #[serde(default)]
    pub max_depth: u32,

    /// Registry base URL
    #[serde(default)]
    pub repository_url: String,

    /// Do not expand packages already on the current path
    #[serde(default)]
    pub cycle_guard: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// Values supplied on the command line that replace file settings
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub package_name: Option<String>,
    pub max_depth: Option<u32>,
    pub output_file_path: Option<PathBuf>,
}

impl AppConfig {
    /// Parses configuration text without validating it
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Locates, reads and parses the configuration file
    ///
    /// Returns the parsed config and the path it came from.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, PathBuf)> {
        let path = Self::locate(explicit)?;

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        Ok((config, path))
    }

    /// Picks the configuration file to use
    ///
    /// An explicit path is returned as-is, even if missing, so the read
    /// error names it.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let candidates = Self::default_locations();
        candidates
            .iter()
            .find(|path| path.is_file())
            .cloned()
            .ok_or_else(|| {
                let searched: Vec<String> = candidates
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect();
                ConfigError::NotFound(searched.join(", "))
            })
    }

    /// Search order used when no path is given
    pub fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = Self::global_config_dir() {
            locations.push(dir.join("config.toml"));
        }
        locations
    }

    /// Returns the per-user config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "depviz", "depviz").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Replaces file settings with command-line values
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(package_name) = overrides.package_name {
            self.package_name = package_name;
        }
        if let Some(max_depth) = overrides.max_depth {
            self.max_depth = max_depth;
        }
        if let Some(output_file_path) = overrides.output_file_path {
            self.output_file_path = output_file_path;
        }
    }

    /// Checks the settings a run cannot do without
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package_name.trim().is_empty() {
            return Err(ConfigError::Invalid("packageName is required".to_string()));
        }

        if self.max_depth < 1 {
            return Err(ConfigError::Invalid(
                "maxDepth must be at least 1".to_string(),
            ));
        }

        if self.output_file_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "outputFilePath is required".to_string(),
            ));
        }

        if self.visualizer_path.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "visualizerPath must not be empty".to_string(),
            ));
        }

        let url = Url::parse(&self.repository_url).map_err(|e| {
            ConfigError::Invalid(format!(
                "repositoryUrl '{}' is not a valid URL: {}",
                self.repository_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "repositoryUrl must use http or https, got '{}'",
                url.scheme()
            )));
        }

        Ok(())
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions::new(self.max_depth).with_cycle_guard(self.cycle_guard)
    }

    pub fn registry_options(&self) -> RegistryOptions {
        let defaults = RegistryOptions::default();
        RegistryOptions {
            connect_timeout: self
                .connect_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            request_timeout: self
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FULL: &str = r#"
visualizerPath = "/opt/graphviz/bin/dot"
packageName = "express"
outputFilePath = "graphs/express.dot"
maxDepth = 3
repositoryUrl = "https://registry.npmjs.org"
"#;

    #[test]
    fn parse_full_config() {
        let config = AppConfig::from_toml_str(FULL).unwrap();

        assert_eq!(config.visualizer_path, "/opt/graphviz/bin/dot");
        assert_eq!(config.package_name, "express");
        assert_eq!(config.output_file_path, PathBuf::from("graphs/express.dot"));
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.repository_url, "https://registry.npmjs.org");
        assert!(!config.cycle_guard);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn defaults_for_tools() {
        let config = AppConfig::from_toml_str(
            r#"
packageName = "left-pad"
outputFilePath = "out.dot"
maxDepth = 1
repositoryUrl = "http://localhost:4873"
"#,
        )
        .unwrap();

        assert_eq!(config.visualizer_path, "dot");
        assert_eq!(config.rasterizer_path, "convert");
        assert_eq!(config.registry_options(), RegistryOptions::default());
    }

    #[test]
    fn timeouts_and_cycle_guard() {
        let config = AppConfig::from_toml_str(&format!(
            "{FULL}\ncycleGuard = true\nrequestTimeoutSecs = 3\nconnectTimeoutSecs = 1\n"
        ))
        .unwrap();

        assert!(config.resolve_options().cycle_guard);
        assert_eq!(config.resolve_options().max_depth, 3);
        assert_eq!(
            config.registry_options().request_timeout,
            Duration::from_secs(3)
        );
        assert_eq!(
            config.registry_options().connect_timeout,
            Duration::from_secs(1)
        );
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let result = AppConfig::from_toml_str("maxDepth = \"deep\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn validation_rejects_missing_fields() {
        let mut config = AppConfig::from_toml_str(FULL).unwrap();
        config.package_name.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("packageName"));

        let mut config = AppConfig::from_toml_str(FULL).unwrap();
        config.max_depth = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("maxDepth"));

        let mut config = AppConfig::from_toml_str(FULL).unwrap();
        config.output_file_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_bad_urls() {
        let mut config = AppConfig::from_toml_str(FULL).unwrap();
        config.repository_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.repository_url = "ftp://mirror.example.com".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = AppConfig::from_toml_str(FULL).unwrap();
        config.apply_overrides(ConfigOverrides {
            package_name: Some("koa".to_string()),
            max_depth: Some(5),
            output_file_path: None,
        });

        assert_eq!(config.package_name, "koa");
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.output_file_path, PathBuf::from("graphs/express.dot"));
    }

    #[test]
    fn load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, FULL).unwrap();

        let (config, loaded_from) = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.package_name, "express");
        assert_eq!(loaded_from, path);
    }

    #[test]
    fn load_missing_explicit_path_names_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("absent.toml"));
    }

    #[test]
    fn default_locations_start_with_local_file() {
        let locations = AppConfig::default_locations();
        assert_eq!(locations[0], PathBuf::from(LOCAL_CONFIG_FILE));
    }
}
