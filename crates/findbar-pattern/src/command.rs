//! Compiled commands
//!
//! Provides [`CompiledCommand`], the immutable matchable form of a
//! [`CommandDefinition`](crate::CommandDefinition), and the built-in
//! free-text [`search`] command.

use crate::param::ParamSpec;
use crate::pattern::{anchored, PARAM_CAPTURE};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Dispatch key of the built-in search command
pub const SEARCH_TOKEN: &str = "search";

/// Payload key carrying the search term
pub const SEARCH_PARAM: &str = "searchTerm";

static SEARCH: Lazy<Arc<CompiledCommand>> = Lazy::new(|| {
    let matcher = anchored(PARAM_CAPTURE).expect("search wildcard is a valid regex");
    Arc::new(CompiledCommand {
        token: SEARCH_TOKEN.to_string(),
        pattern: String::new(),
        prefix: String::new(),
        regexp: PARAM_CAPTURE.to_string(),
        param: Some(ParamSpec::new(SEARCH_PARAM, "")),
        kind: CommandKind::Search,
        metadata: Map::new(),
        matcher,
    })
});

/// The always-present free-text search command
///
/// Matches any input and captures all of it as the search term.
#[must_use]
pub fn search() -> Arc<CompiledCommand> {
    Arc::clone(&SEARCH)
}

/// Origin of a compiled command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Declared by the embedding application
    Declared,
    /// Built-in search fallback
    Search,
}

/// Immutable, matchable command
#[derive(Debug, Clone, Serialize)]
pub struct CompiledCommand {
    token: String,
    pattern: String,
    prefix: String,
    regexp: String,
    param: Option<ParamSpec>,
    kind: CommandKind,
    #[serde(flatten)]
    metadata: Map<String, Value>,
    #[serde(skip)]
    matcher: Regex,
}

/// Text captured by a successful match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture<'h> {
    raw: Option<&'h str>,
}

impl<'h> Capture<'h> {
    /// Raw wildcard capture, if the wildcard participated
    #[inline]
    #[must_use]
    pub fn raw(&self) -> Option<&'h str> {
        self.raw
    }

    /// Trimmed capture; blank captures count as absent
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&'h str> {
        self.raw.map(str::trim).filter(|value| !value.is_empty())
    }
}

impl CompiledCommand {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        token: String,
        pattern: String,
        prefix: String,
        regexp: String,
        param: Option<ParamSpec>,
        kind: CommandKind,
        metadata: Map<String, Value>,
        matcher: Regex,
    ) -> Self {
        Self {
            token,
            pattern,
            prefix,
            regexp,
            param,
            kind,
            metadata,
            matcher,
        }
    }

    /// Dispatch key
    #[inline]
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Source pattern
    #[inline]
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Literal text before the placeholder
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Unanchored regexp source
    #[inline]
    #[must_use]
    pub fn regexp(&self) -> &str {
        &self.regexp
    }

    /// Declared parameter
    #[inline]
    #[must_use]
    pub fn param(&self) -> Option<&ParamSpec> {
        self.param.as_ref()
    }

    /// Command origin
    #[inline]
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Whether this is the built-in search command
    #[inline]
    #[must_use]
    pub fn is_search(&self) -> bool {
        self.kind == CommandKind::Search
    }

    /// Caller metadata from the definition
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Text shown for and typed to reach this command
    ///
    /// The literal prefix, or the token when the pattern is all placeholder.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.prefix.is_empty() {
            &self.token
        } else {
            &self.prefix
        }
    }

    /// Match `haystack` from its start, case-insensitively
    ///
    /// A parameterised command whose prefix ends in whitespace also matches
    /// the bare literal without that whitespace (`open` for `open (:file)`),
    /// with no capture.
    #[must_use]
    pub fn captures<'h>(&self, haystack: &'h str) -> Option<Capture<'h>> {
        if let Some(caps) = self.matcher.captures(haystack) {
            return Some(Capture {
                raw: caps.get(1).map(|m| m.as_str()),
            });
        }
        if self.param.is_some() && self.is_bare_literal(haystack) {
            return Some(Capture { raw: None });
        }
        None
    }

    /// Whether the anchored matcher accepts `haystack`
    #[inline]
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.captures(haystack).is_some()
    }

    fn is_bare_literal(&self, haystack: &str) -> bool {
        let head = self.prefix.trim_end();
        !head.is_empty() && haystack.trim_end().to_lowercase() == head.to_lowercase()
    }
}

impl PartialEq for CompiledCommand {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
            && self.pattern == other.pattern
            && self.kind == other.kind
            && self.metadata == other.metadata
    }
}

impl Eq for CompiledCommand {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile, CommandDefinition};

    fn command(token: &str, pattern: &str) -> CompiledCommand {
        compile(&CommandDefinition::new(token, pattern)).unwrap()
    }

    #[test]
    fn literal_matches_prefix_case_insensitively() {
        let cmd = command("newProject", "new project");
        assert!(cmd.is_match("new project"));
        assert!(cmd.is_match("NEW Project please"));
        assert!(!cmd.is_match("a new project"));
        assert!(!cmd.is_match("new proj"));
    }

    #[test]
    fn param_capture_is_raw_until_trimmed() {
        let cmd = command("openFile", "open (:fileName)");
        let capture = cmd.captures("open   rep ").unwrap();
        assert_eq!(capture.raw(), Some("  rep "));
        assert_eq!(capture.value(), Some("rep"));
    }

    #[test]
    fn blank_capture_has_no_value() {
        let cmd = command("openFile", "open (:fileName)");
        let capture = cmd.captures("open    ").unwrap();
        assert_eq!(capture.value(), None);
    }

    #[test]
    fn bare_literal_matches_without_separator() {
        let cmd = command("openFile", "open (:fileName)");
        let capture = cmd.captures("Open").unwrap();
        assert_eq!(capture.raw(), None);
        assert!(!cmd.is_match("opener"));
    }

    #[test]
    fn bare_literal_rule_needs_param() {
        let cmd = command("quit", "quit now ");
        assert!(!cmd.is_match("quit now"));
        assert!(cmd.is_match("quit now "));
    }

    #[test]
    fn label_falls_back_to_token() {
        assert_eq!(command("ask", "(:question)").label(), "ask");
        assert_eq!(command("openFile", "open (:fileName)").label(), "open ");
    }

    #[test]
    fn search_matches_everything() {
        let search = search();
        assert!(search.is_search());
        assert_eq!(search.token(), SEARCH_TOKEN);
        assert_eq!(search.param().map(|p| p.name.as_str()), Some(SEARCH_PARAM));
        assert_eq!(search.captures("").unwrap().value(), None);
        assert_eq!(search.captures(" hello world ").unwrap().value(), Some("hello world"));
    }

    #[test]
    fn serializes_without_matcher() {
        let cmd = compile(&CommandDefinition::new("openFile", "open (:fileName)").with_metadata("icon", "doc")).unwrap();
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["token"], "openFile");
        assert_eq!(json["regexp"], "open (.*)");
        assert_eq!(json["param"]["display"], "File Name");
        assert_eq!(json["kind"], "declared");
        assert_eq!(json["icon"], "doc");
        assert!(json.get("matcher").is_none());
    }
}
