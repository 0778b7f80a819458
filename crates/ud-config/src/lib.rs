//! Configuration for userdocs shortcodes.
//!
//! Parses `userdocs.toml` with serde and discovers it in the current directory
//! or any parent. Host-side overrides are applied during load via [`Overrides`].
//!
//! ```toml
//! [shortcodes]
//! max_depth = 10
//!
//! [templates]
//! dir = "${USERDOCS_TEMPLATES:-templates}"
//!
//! [codetabs]
//! source = "codetabs.json"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `templates.dir` and `codetabs.source` support `${VAR}` (error if unset) and
//! `${VAR:-default}`. Relative paths resolve against the config file's directory.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "userdocs.toml";

/// Upper bound for `shortcodes.max_depth`.
const MAX_DEPTH_LIMIT: usize = 64;

/// Host settings that override configuration file values.
///
/// Only `Some` fields override the loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override the shortcode recursion limit.
    pub max_depth: Option<usize>,
    /// Override the template override directory.
    pub templates_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shortcode parser configuration.
    pub shortcodes: ShortcodesConfig,
    /// Template configuration (paths are raw strings from TOML).
    templates: TemplatesConfigRaw,
    /// Code tab seed data configuration (raw).
    codetabs: CodeTabsConfigRaw,

    /// Resolved template configuration (set after loading).
    #[serde(skip)]
    pub templates_resolved: TemplatesConfig,
    /// Resolved code tab configuration (set after loading).
    #[serde(skip)]
    pub codetabs_resolved: CodeTabsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Shortcode parser configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ShortcodesConfig {
    /// Maximum nesting of recursive shortcode expansion.
    pub max_depth: usize,
}

impl Default for ShortcodesConfig {
    fn default() -> Self {
        Self { max_depth: 10 }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TemplatesConfigRaw {
    dir: Option<String>,
}

/// Resolved template configuration.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TemplatesConfig {
    /// Directory with `<Name>.html` overrides for built-in templates.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CodeTabsConfigRaw {
    source: Option<String>,
}

/// Resolved code tab configuration.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CodeTabsConfig {
    /// JSON file with code tab records to seed the in-memory store.
    pub source: Option<PathBuf>,
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
        /// Config field path (e.g., "`templates.dir`").
        field: String,
        /// Error message (e.g., "${`USERDOCS_TEMPLATES`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration with optional host overrides.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches for
    /// `userdocs.toml` in the current directory and its parents, falling back to
    /// defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the result (after overrides) is invalid.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            tracing::info!(path = %discovered.display(), "Using discovered configuration");
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string, resolving paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion, or validation fails.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base_dir);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(max_depth) = overrides.max_depth {
            self.shortcodes.max_depth = max_depth;
        }
        if let Some(dir) = &overrides.templates_dir {
            self.templates_resolved.dir = Some(dir.clone());
        }
    }

    /// Search for the config file in the current directory and parents.
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

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let depth = self.shortcodes.max_depth;
        if depth == 0 {
            return Err(ConfigError::Validation(
                "shortcodes.max_depth must be greater than 0".to_owned(),
            ));
        }
        if depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Validation(format!(
                "shortcodes.max_depth cannot exceed {MAX_DEPTH_LIMIT}"
            )));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.templates.dir {
            self.templates.dir = Some(expand::expand_env(dir, "templates.dir")?);
        }
        if let Some(ref source) = self.codetabs.source {
            self.codetabs.source = Some(expand::expand_env(source, "codetabs.source")?);
        }
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        self.templates_resolved = TemplatesConfig {
            dir: self.templates.dir.as_deref().map(|d| config_dir.join(d)),
        };
        self.codetabs_resolved = CodeTabsConfig {
            source: self.codetabs.source.as_deref().map(|s| config_dir.join(s)),
        };
    }
}
