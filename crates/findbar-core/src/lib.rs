//! findbar Core
//!
//! Resolves find-bar input against a declared command list.
//!
//! # Core Operations
//!
//! - **Match**: typed text → dispatch an action, prompt for a parameter, or search
//! - **Suggest**: typed text → fuzzy-ranked, highlightable command suggestions
//! - **Reload**: atomically swap the compiled command list
//!
//! # Architecture
//!
//! ```text
//! FindBarConfig → CommandSet::compile → Catalog ──match_input──→ MatchOutcome
//!                                          │
//!                                          └──suggest──→ SuggestionCache → Vec<Suggestion>
//!                                                  ↑
//!                                          FindBarSession (input, scope, menu state)
//! ```
//!
//! # Example
//!
//! ```rust
//! use findbar_core::prelude::*;
//! use std::sync::Arc;
//!
//! let catalog = Catalog::from_definitions(&[
//!     CommandDefinition::new("newProject", "new project"),
//!     CommandDefinition::new("openFile", "open (:fileName)"),
//! ])
//! .unwrap();
//!
//! let mut session = FindBarSession::new(Arc::new(catalog));
//! session.set_input_text("open");
//! let outcome = session.submit();
//! assert!(matches!(outcome, MatchOutcome::Prompt { .. }));
//! assert_eq!(session.placeholder(), "File Name");
//!
//! session.set_input_text("report.txt");
//! let outcome = session.submit();
//! assert_eq!(outcome.action().and_then(|a| a.param("fileName")), Some("report.txt"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod matcher;
pub mod session;
pub mod suggest;

// Re-exports for convenience
pub use cache::{CacheStats, SuggestionCache};
pub use catalog::{Catalog, CommandSet};
pub use config::{ConfigFormat, FindBarConfig, DEFAULT_PLACEHOLDER};
pub use error::{ConfigError, FindBarError, FindBarResult};
pub use matcher::{effective_input, match_input, Action, MatchOutcome, Scope};
pub use session::{FindBarSession, SuggestionUpdate};
pub use suggest::{suggest, Suggestion, SuggestionLimits};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for embedding a find bar
    pub use crate::catalog::{Catalog, CommandSet};
    pub use crate::config::FindBarConfig;
    pub use crate::error::{ConfigError, FindBarError};
    pub use crate::matcher::{Action, MatchOutcome, Scope};
    pub use crate::session::FindBarSession;
    pub use crate::suggest::{Suggestion, SuggestionLimits};
    pub use findbar_pattern::{CommandDefinition, CompiledCommand, ParamSpec};
}
