//! findbar command patterns
//!
//! Declarative command patterns compiled into anchored, case-insensitive
//! matchers.
//!
//! # Overview
//!
//! - **CommandDefinition**: `{ token, pattern }` plus pass-through metadata
//! - **compile**: definition → immutable [`CompiledCommand`]
//! - **search**: the built-in free-text command that matches anything
//!
//! # Example
//!
//! ```rust
//! use findbar_pattern::{compile, CommandDefinition};
//!
//! let command = compile(&CommandDefinition::new("openFile", "open (:fileName)")).unwrap();
//! assert_eq!(command.regexp(), "open (.*)");
//! assert_eq!(command.param().unwrap().display, "File Name");
//!
//! let capture = command.captures("open report.txt").unwrap();
//! assert_eq!(capture.value(), Some("report.txt"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod command;
pub mod definition;
pub mod param;
pub mod pattern;

// Re-exports
pub use command::{search, Capture, CommandKind, CompiledCommand, SEARCH_PARAM, SEARCH_TOKEN};
pub use definition::CommandDefinition;
pub use param::{camel_case_to_words, ParamSpec};
pub use pattern::{compile, find_placeholder, CompiledPattern, PatternError, Placeholder};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
