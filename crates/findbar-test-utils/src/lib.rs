//! Testing utilities for the findbar workspace
//!
//! Shared command lists, catalogs and sessions.

#![allow(missing_docs)]

use findbar_core::{Catalog, CommandSet, FindBarSession};
use findbar_pattern::CommandDefinition;
use std::sync::Arc;

/// TOML document mirroring [`editor_commands`]
pub const EDITOR_CONFIG_TOML: &str = r#"
[[commands]]
token = "newProject"
pattern = "new project"

[[commands]]
token = "openFile"
pattern = "open (:fileName)"
icon = "folder"

[[commands]]
token = "goToLine"
pattern = "go to line (:line as Line Number)"

[[commands]]
token = "closeTab"
pattern = "close tab"

[[commands]]
token = "findInFiles"
pattern = "find in files (:query)"

[[commands]]
token = "toggleSidebar"
pattern = "toggle sidebar"
"#;

pub fn definitions(pairs: &[(&str, &str)]) -> Vec<CommandDefinition> {
    pairs
        .iter()
        .map(|(token, pattern)| CommandDefinition::new(*token, *pattern))
        .collect()
}

/// The two-command list used throughout the docs
pub fn example_commands() -> Vec<CommandDefinition> {
    definitions(&[
        ("newProject", "new project"),
        ("openFile", "open (:fileName)"),
    ])
}

/// A realistic editor command list
pub fn editor_commands() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("newProject", "new project"),
        CommandDefinition::new("openFile", "open (:fileName)").with_metadata("icon", "folder"),
        CommandDefinition::new("goToLine", "go to line (:line as Line Number)"),
        CommandDefinition::new("closeTab", "close tab"),
        CommandDefinition::new("findInFiles", "find in files (:query)"),
        CommandDefinition::new("toggleSidebar", "toggle sidebar"),
    ]
}

pub fn command_set(definitions: &[CommandDefinition]) -> CommandSet {
    CommandSet::compile(definitions).unwrap()
}

pub fn catalog(definitions: &[CommandDefinition]) -> Arc<Catalog> {
    Arc::new(Catalog::from_definitions(definitions).unwrap())
}

pub fn session(definitions: &[CommandDefinition]) -> FindBarSession {
    FindBarSession::new(catalog(definitions))
}
