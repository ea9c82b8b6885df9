//! Parameter placeholders
//!
//! Provides [`ParamSpec`] and the camel-case label transform used when a
//! placeholder carries no explicit `as` label.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Parameter declared by a command pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Identifier used as the payload key
    pub name: String,

    /// Human-readable prompt label
    pub display: String,
}

impl ParamSpec {
    /// Create param with explicit display label
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display: display.into(),
        }
    }

    /// Create param whose label is derived from the name
    ///
    /// `fileName` → `File Name`
    #[must_use]
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let display = camel_case_to_words(&name);
        Self { name, display }
    }
}

impl Display for ParamSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(:{} as {})", self.name, self.display)
    }
}

/// Split a camel-case identifier into capitalised words
///
/// A space goes before every ASCII uppercase letter after the first char,
/// then the first char is upper-cased. Runs of capitals are split letter by
/// letter (`URLPath` → `U R L Path`).
#[must_use]
pub fn camel_case_to_words(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    for (i, ch) in identifier.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
            continue;
        }
        if ch.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
