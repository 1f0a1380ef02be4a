//! Configuration management for DSK.
//!
//! Parses `dsk.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `catalog.root`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override catalogue root (relative to the current directory).
    pub root: Option<PathBuf>,
    /// Override hidden directory skipping.
    pub skip_hidden: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "dsk.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Catalogue configuration (root is a relative string from TOML).
    catalog: CatalogConfigRaw,

    /// Resolved catalogue configuration (set after loading).
    #[serde(skip)]
    pub catalog_resolved: CatalogConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Raw catalogue configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CatalogConfigRaw {
    root: Option<String>,
    skip_hidden: Option<bool>,
}

/// Resolved catalogue configuration.
#[derive(Debug, Default)]
pub struct CatalogConfig {
    /// Design definitions root. Absolute and symlink-free once loaded.
    pub root: PathBuf,
    /// Skip directories starting with `.` when building the tree.
    pub skip_hidden: bool,
}

impl CatalogConfig {
    /// Project name shown in the UI: the root directory's base name.
    #[must_use]
    pub fn project_name(&self) -> String {
        self.root
            .file_name()
            .map_or_else(|| "DSK".to_owned(), |n| n.to_string_lossy().into_owned())
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
        /// Config field path (e.g., "`catalog.root`").
        field: String,
        /// Error message (e.g., "${`DSK_ROOT`} not set").
        message: String,
    },
    /// Catalogue root cannot be resolved.
    #[error("Cannot use {} as root directory: {source}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `dsk.toml` in current directory and parents,
    /// falling back to defaults with the current directory as root.
    ///
    /// CLI settings are applied after loading. The catalogue root is then
    /// made absolute and its symlinks resolved.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the root directory cannot be resolved.
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
        config.canonicalize_root()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(root) = &settings.root {
            self.catalog_resolved.root.clone_from(root);
        }
        if let Some(skip_hidden) = settings.skip_hidden {
            self.catalog_resolved.skip_hidden = skip_hidden;
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        if self.catalog_resolved.root.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "catalog.root cannot be empty".to_owned(),
            ));
        }

        Ok(())
    }

    /// Make the root absolute and resolve symlinks.
    ///
    /// The traversal guard compares paths lexically, so the root must be in
    /// its canonical form for request paths joined onto it to compare equal.
    fn canonicalize_root(&mut self) -> Result<(), ConfigError> {
        let root = &self.catalog_resolved.root;
        let canonical = std::fs::canonicalize(root).map_err(|source| ConfigError::Root {
            path: root.clone(),
            source,
        })?;
        if !canonical.is_dir() {
            return Err(ConfigError::Root {
                path: canonical,
                source: std::io::ErrorKind::NotADirectory.into(),
            });
        }
        self.catalog_resolved.root = canonical;
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with the current working directory as root.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with the given directory as root.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            catalog: CatalogConfigRaw::default(),
            catalog_resolved: CatalogConfig {
                root: base.to_path_buf(),
                skip_hidden: false,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_field("server.host", &self.server.host)?;

        if let Some(ref root) = self.catalog.root {
            self.catalog.root = Some(expand::expand_field("catalog.root", root)?);
        }

        Ok(())
    }

    /// Resolve the catalogue root relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.catalog_resolved = CatalogConfig {
            root: config_dir.join(self.catalog.root.as_deref().unwrap_or(".")),
            skip_hidden: self.catalog.skip_hidden.unwrap_or(false),
        };
    }
}
