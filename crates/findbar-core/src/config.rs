//! Find-bar configuration
//!
//! The command list and find-bar settings load from TOML, YAML or JSON. The
//! format follows the file extension. Definitions are validated and compiled
//! at load time, so a bad command list fails before the first keystroke.

use crate::cache::SuggestionCache;
use crate::catalog::{Catalog, CommandSet};
use crate::error::ConfigError;
use crate::suggest::SuggestionLimits;
use findbar_pattern::CommandDefinition;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Placeholder shown while no scope is active
pub const DEFAULT_PLACEHOLDER: &str = "Type to search or execute commands";

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Pick format from a file extension
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedFormat`] for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(ext)),
        }
    }

    /// Short format name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

/// Find-bar settings and command list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindBarConfig {
    /// Placeholder shown with no active scope
    pub placeholder: String,

    /// Max cached suggestion lists
    pub cache_capacity: u64,

    /// Suggestion list caps
    pub limits: SuggestionLimits,

    /// Declared commands, in match priority order
    pub commands: Vec<CommandDefinition>,
}

impl Default for FindBarConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            cache_capacity: SuggestionCache::DEFAULT_CAPACITY,
            limits: SuggestionLimits::default(),
            commands: Vec::new(),
        }
    }
}

impl FindBarConfig {
    /// Config with the given commands and default settings
    #[must_use]
    pub fn with_commands(commands: Vec<CommandDefinition>) -> Self {
        Self {
            commands,
            ..Self::default()
        }
    }

    /// Parse and validate a document
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed documents and any
    /// validation error from [`validate`](Self::validate).
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: Self = match format {
            ConfigFormat::Toml => {
                toml::from_str(contents).map_err(|e| ConfigError::parse_error(format.name(), e))?
            }
            ConfigFormat::Yaml => serde_yaml::from_str(contents)
                .map_err(|e| ConfigError::parse_error(format.name(), e))?,
            ConfigFormat::Json => serde_json::from_str(contents)
                .map_err(|e| ConfigError::parse_error(format.name(), e))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    ///
    /// # Errors
    /// IO, format and validation errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let config = Self::parse(&contents, format)?;
        tracing::info!(
            path = %path.display(),
            commands = config.commands.len(),
            "loaded find-bar config"
        );
        Ok(config)
    }

    /// Check settings and compile the command list
    ///
    /// # Errors
    /// [`ConfigError::InvalidSetting`] for a zero cache capacity, plus any
    /// error from [`CommandSet::compile`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "cache_capacity",
                message: "must be greater than zero".to_string(),
            });
        }
        CommandSet::compile(&self.commands).map(|_| ())
    }

    /// Compile the command list into a catalog
    ///
    /// # Errors
    /// See [`CommandSet::compile`].
    pub fn build_catalog(&self) -> Result<Catalog, ConfigError> {
        let set = CommandSet::compile(&self.commands)?;
        Ok(Catalog::new(set, self.limits, self.cache_capacity))
    }
}
