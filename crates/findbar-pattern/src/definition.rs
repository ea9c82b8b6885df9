//! Command definitions as supplied by the embedding application
//!
//! Provides [`CommandDefinition`], the raw `{ token, pattern }` declaration
//! that [`compile`](crate::compile) turns into a [`CompiledCommand`](crate::CompiledCommand).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A declared command
///
/// `token` is the dispatch key. `pattern` is literal text optionally ending
/// in a `(:name)` or `(:name as Label)` placeholder. Any other keys are kept
/// in `metadata` and passed through compilation untouched.
///
/// Empty `token`/`pattern` values deserialize fine; the catalog rejects them
/// when the command list is loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// Dispatch key
    #[serde(default)]
    pub token: String,

    /// Literal prefix with optional trailing placeholder
    #[serde(default)]
    pub pattern: String,

    /// Caller-defined display metadata
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl CommandDefinition {
    /// Create definition without metadata
    #[inline]
    #[must_use]
    pub fn new(token: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            pattern: pattern.into(),
            metadata: Map::new(),
        }
    }

    /// Attach a metadata entry, returning the definition
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_is_flattened_from_json() {
        let def: CommandDefinition = serde_json::from_str(
            r#"{"token":"openFile","pattern":"open (:fileName)","icon":"folder","rank":2}"#,
        )
        .unwrap();

        assert_eq!(def.token, "openFile");
        assert_eq!(def.pattern, "open (:fileName)");
        assert_eq!(def.metadata.get("icon"), Some(&Value::from("folder")));
        assert_eq!(def.metadata.get("rank"), Some(&Value::from(2)));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let def: CommandDefinition = serde_json::from_str(r#"{"icon":"x"}"#).unwrap();
        assert!(def.token.is_empty());
        assert!(def.pattern.is_empty());
    }

    #[test]
    fn parses_from_toml_and_yaml() {
        let from_toml: CommandDefinition =
            toml::from_str("token = \"newProject\"\npattern = \"new project\"\n").unwrap();
        let from_yaml: CommandDefinition =
            serde_yaml::from_str("token: newProject\npattern: new project\n").unwrap();

        assert_eq!(from_toml, CommandDefinition::new("newProject", "new project"));
        assert_eq!(from_yaml, from_toml);
    }

    #[test]
    fn with_metadata_builder() {
        let def = CommandDefinition::new("a", "b").with_metadata("hint", "Alt+A");
        assert_eq!(def.metadata.len(), 1);
    }
}
