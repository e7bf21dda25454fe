//! Configuration management for mmdsvg.
//!
//! Parses optional `mmdsvg.toml` files with serde and provides auto-discovery
//! of the config file in the current directory and its parents. Without a
//! config file, the built-in defaults convert against the public Kroki
//! service and scan the `apps/sensorgrid_*` layout.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! `kroki.url` supports `${VAR}` and `${VAR:-default}` expansion.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mmdsvg.toml";

/// Public Kroki instance.
pub const DEFAULT_KROKI_URL: &str = "https://kroki.io";

/// Request timeout in seconds, matching the Kroki client's own default.
pub const DEFAULT_TIMEOUT_SECS: u64 = mmdsvg_kroki::DEFAULT_TIMEOUT.as_secs();

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Kroki base URL.
    pub kroki_url: Option<String>,
    /// Override request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Override the project root scanned in batch mode.
    pub project_root: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering service settings.
    pub kroki: KrokiConfig,
    /// Batch discovery layout.
    pub discovery: DiscoveryConfig,

    /// Root directory for batch discovery (set after loading).
    #[serde(skip)]
    pub project_root: PathBuf,
    /// Path to the config file, if one was loaded.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_root(Path::new("."))
    }
}

/// Kroki rendering service configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KrokiConfig {
    /// Base URL of the Kroki server.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl KrokiConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for KrokiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_KROKI_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Directory layout scanned by `--all`.
///
/// All paths are relative: `apps_dir` to the project root, `source_dir` and
/// `output_dir` to each group or app directory.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Directory holding the application groups.
    pub apps_dir: String,
    /// Name prefix selecting group directories under `apps_dir`.
    pub group_prefix: String,
    /// Folder holding `.mmd` sources.
    pub source_dir: String,
    /// Folder receiving rendered `.svg` files.
    pub output_dir: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            apps_dir: "apps".to_owned(),
            group_prefix: "sensorgrid_".to_owned(),
            source_dir: "doc/mermaid".to_owned(),
            output_dir: "doc/img".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`kroki.url`").
        field: String,
        /// Error message (e.g., "${`KROKI_URL`}: environment variable not found").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise, searches
    /// for `mmdsvg.toml` in the current directory and its parents, falling
    /// back to defaults rooted at the current directory.
    ///
    /// CLI settings are applied after loading and are validated together with
    /// the file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(kroki_url) = &settings.kroki_url {
            self.kroki.url.clone_from(kroki_url);
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.kroki.timeout_secs = timeout_secs;
        }
        if let Some(project_root) = &settings.project_root {
            self.project_root.clone_from(project_root);
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.kroki.url, "kroki.url")?;
        require_http_url(&self.kroki.url, "kroki.url")?;
        if self.kroki.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "kroki.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        let discovery = &self.discovery;
        require_non_empty(&discovery.apps_dir, "discovery.apps_dir")?;
        require_non_empty(&discovery.group_prefix, "discovery.group_prefix")?;
        require_non_empty(&discovery.source_dir, "discovery.source_dir")?;
        require_non_empty(&discovery.output_dir, "discovery.output_dir")?;
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_root(&cwd)
    }

    fn default_with_root(root: &Path) -> Self {
        Self {
            kroki: KrokiConfig::default(),
            discovery: DiscoveryConfig::default(),
            project_root: root.to_path_buf(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    ///
    /// The project root becomes the directory containing the file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.kroki.url = expand::expand_env(&config.kroki.url, "kroki.url")?;

        let config_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        config.project_root = config_dir;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }
}
