//! Error types for the find bar
//!
//! Matching and suggesting never fail. Errors only arise while loading a
//! command list:
//! - Reading or parsing a configuration file
//! - Validating definitions (missing fields, duplicate tokens)
//! - Compiling patterns

use findbar_pattern::PatternError;
use std::path::PathBuf;

/// Errors raised while loading configuration or a command list
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid for its format
    #[error("invalid {format} config: {message}")]
    Parse { format: &'static str, message: String },

    /// File extension maps to no known format
    #[error("unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    /// A definition lacks its token or pattern
    #[error("command #{index} is missing its {field}")]
    MissingField { index: usize, field: &'static str },

    /// Two definitions share a token
    #[error("duplicate command token: '{0}'")]
    DuplicateToken(String),

    /// A pattern could not be compiled
    #[error("command '{token}': {source}")]
    Pattern {
        token: String,
        #[source]
        source: PatternError,
    },

    /// Out-of-range setting
    #[error("invalid setting {name}: {message}")]
    InvalidSetting { name: &'static str, message: String },
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create parse error for a format
    pub fn parse_error(format: &'static str, message: impl ToString) -> Self {
        Self::Parse {
            format,
            message: message.to_string(),
        }
    }
}

/// Combined find-bar error
#[derive(Debug, thiserror::Error)]
pub enum FindBarError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Scope names a token the catalog does not contain
    #[error("unknown command token: '{0}'")]
    UnknownToken(String),
}

/// Result type alias for find-bar operations
pub type FindBarResult<T> = Result<T, FindBarError>;
