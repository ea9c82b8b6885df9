//! Pattern compiler
//!
//! A pattern is literal text optionally followed by a single placeholder:
//!
//! ```text
//! open (:fileName)            → prefix "open ",  param fileName / "File Name"
//! go to (:line as Line No.)   → prefix "go to ", param line / "Line No."
//! new project                 → prefix "new project", no param
//! ```
//!
//! The literal prefix is escaped so it only matches itself. A placeholder
//! appends a capturing wildcard. Text after the placeholder is ignored.

use crate::command::{CommandKind, CompiledCommand};
use crate::definition::CommandDefinition;
use crate::param::ParamSpec;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// `(:identifier)` or `(:identifier as Any Label)`
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(:([a-zA-Z_$][a-zA-Z0-9_$]*)(?: as (.*))?\)")
        .expect("placeholder grammar is a valid regex")
});

/// Wildcard appended when a placeholder is present
pub const PARAM_CAPTURE: &str = "(.*)";

/// Location and contents of a placeholder within a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'p> {
    /// Byte offset of the opening parenthesis
    pub start: usize,
    /// Parameter identifier
    pub name: &'p str,
    /// Explicit `as` label, if given and non-empty
    pub label: Option<&'p str>,
}

/// Locate the first well-formed placeholder
///
/// Malformed placeholders (`(:)`, `(:1st)`) are not reported; they stay part
/// of the literal text.
#[must_use]
pub fn find_placeholder(pattern: &str) -> Option<Placeholder<'_>> {
    let caps = PLACEHOLDER.captures(pattern)?;
    let whole = caps.get(0)?;
    let name = caps.get(1)?.as_str();
    let label = caps
        .get(2)
        .map(|m| m.as_str())
        .filter(|label| !label.is_empty());
    Some(Placeholder {
        start: whole.start(),
        name,
        label,
    })
}

/// String-level compilation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    /// Literal text before the placeholder
    pub prefix: String,
    /// Escaped prefix, plus [`PARAM_CAPTURE`] when a param exists
    pub regexp: String,
    /// Declared parameter
    pub param: Option<ParamSpec>,
}

impl CompiledPattern {
    /// Compile a raw pattern string. Never fails.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let placeholder = find_placeholder(pattern);
        let split = placeholder.map_or(pattern.len(), |p| p.start);
        let prefix = &pattern[..split];

        let mut regexp = regex::escape(prefix);
        let param = placeholder.map(|p| {
            regexp.push_str(PARAM_CAPTURE);
            match p.label {
                Some(label) => ParamSpec::new(p.name, label),
                None => ParamSpec::from_name(p.name),
            }
        });

        Self {
            prefix: prefix.to_string(),
            regexp,
            param,
        }
    }
}

/// Errors raised while building a command matcher
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// The regex engine refused the compiled expression (size limits)
    #[error("pattern '{pattern}' could not be compiled: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Build the anchored, case-insensitive matcher for a regexp
pub(crate) fn anchored(regexp: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!("^{regexp}"))
        .case_insensitive(true)
        .build()
}

/// Compile a definition into an immutable command
///
/// # Errors
/// Returns [`PatternError::Regex`] only when the escaped prefix exceeds the
/// regex engine's limits. Placeholder syntax errors never fail compilation.
pub fn compile(definition: &CommandDefinition) -> Result<CompiledCommand, PatternError> {
    let CompiledPattern {
        prefix,
        regexp,
        param,
    } = CompiledPattern::parse(&definition.pattern);

    let matcher = anchored(&regexp).map_err(|source| PatternError::Regex {
        pattern: definition.pattern.clone(),
        source,
    })?;

    tracing::debug!(
        token = %definition.token,
        regexp = %regexp,
        param = ?param.as_ref().map(|p| p.name.as_str()),
        "compiled command pattern"
    );

    Ok(CompiledCommand::from_parts(
        definition.token.clone(),
        definition.pattern.clone(),
        prefix,
        regexp,
        param,
        CommandKind::Declared,
        definition.metadata.clone(),
        matcher,
    ))
}
