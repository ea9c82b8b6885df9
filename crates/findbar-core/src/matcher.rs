//! Command matcher
//!
//! Resolves typed text into a [`MatchOutcome`]:
//!
//! ```text
//! effective = scope.prefix + input
//!     │
//!     ├─ scoped command, else first declared command whose matcher accepts it
//!     │     ├─ param declared, no value  → Prompt  (enter parameter mode)
//!     │     └─ otherwise                 → Dispatch(token, {param: value})
//!     └─ nothing matched                 → Search(searchTerm)
//! ```
//!
//! Outside a command scope, commands are tried strictly in declaration order;
//! there is no ranking at match time.

use crate::catalog::CommandSet;
use findbar_pattern::{search, CompiledCommand, SEARCH_PARAM, SEARCH_TOKEN};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt::{self, Display, Formatter};

/// Sticky input context
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Scope {
    /// Entering the parameter of a partially matched command
    Command {
        /// Command awaiting its parameter
        token: String,
        /// Literal prefix re-prepended to every keystroke
        prefix: String,
    },
    /// Free-text search mode
    Search,
}

impl Scope {
    /// Parameter-entry scope for a command
    #[must_use]
    pub fn for_command(command: &CompiledCommand) -> Self {
        Self::Command {
            token: command.token().to_string(),
            prefix: command.prefix().to_string(),
        }
    }

    /// Text re-prepended to input
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &str {
        match self {
            Self::Command { prefix, .. } => prefix,
            Self::Search => "",
        }
    }

    /// Text the embedding layer shows beside the input
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Command { token, prefix } => {
                let trimmed = prefix.trim();
                if trimmed.is_empty() {
                    token
                } else {
                    trimmed
                }
            }
            Self::Search => SEARCH_TOKEN,
        }
    }

    /// Whether this is search mode
    #[inline]
    #[must_use]
    pub fn is_search(&self) -> bool {
        matches!(self, Self::Search)
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Action handed to the embedding layer's dispatcher
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Dispatch key
    pub token: String,
    /// `{ paramName: value }`, or `None` for parameterless commands
    pub payload: Option<Map<String, Value>>,
}

impl Action {
    /// Action without payload
    #[inline]
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            payload: None,
        }
    }

    /// Action carrying a single named value
    #[must_use]
    pub fn with_param(token: impl Into<String>, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut payload = Map::new();
        payload.insert(name.into(), value.into());
        Self {
            token: token.into(),
            payload: Some(payload),
        }
    }

    /// String value of a payload entry
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.payload.as_ref()?.get(name)?.as_str()
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Action", 2)?;
        state.serialize_field("type", &self.token)?;
        state.serialize_field("payload", &self.payload)?;
        state.end()
    }
}

/// Result of resolving input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// A command matched fully
    Dispatch {
        /// Action to dispatch
        action: Action,
    },
    /// Nothing matched; run a free-text search and enter search mode
    Search {
        /// `search` action with `{ searchTerm: term | null }`
        action: Action,
    },
    /// A command needs its parameter; enter parameter mode
    Prompt {
        /// Scope to install
        scope: Scope,
        /// Placeholder prompt (the parameter's display label)
        prompt: String,
    },
}

impl MatchOutcome {
    /// Action to dispatch, if any
    #[must_use]
    pub fn action(&self) -> Option<&Action> {
        match self {
            Self::Dispatch { action } | Self::Search { action } => Some(action),
            Self::Prompt { .. } => None,
        }
    }

    /// Search term of a search outcome
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        match self {
            Self::Search { action } => action.param(SEARCH_PARAM),
            _ => None,
        }
    }
}

/// Build the string commands are matched against
#[must_use]
pub fn effective_input(input: &str, scope: Option<&Scope>) -> String {
    match scope {
        Some(scope) => format!("{}{input}", scope.prefix()),
        None => input.to_string(),
    }
}

/// Resolve `input` under `scope` against `commands`
///
/// In search mode every input is a search.
#[must_use]
pub fn match_input(input: &str, scope: Option<&Scope>, commands: &CommandSet) -> MatchOutcome {
    if scope.is_some_and(Scope::is_search) {
        return search_outcome(input);
    }

    let effective = effective_input(input, scope);

    // The scoped command gets first claim on its own parameter
    let scoped = match scope {
        Some(Scope::Command { token, .. }) => commands.get(token),
        _ => None,
    };
    let found = scoped
        .into_iter()
        .chain(commands.iter())
        .find_map(|command| command.captures(&effective).map(|capture| (command, capture)));

    let Some((command, capture)) = found else {
        return search_outcome(&effective);
    };

    let outcome = match (command.param(), capture.value()) {
        (Some(param), Some(value)) => MatchOutcome::Dispatch {
            action: Action::with_param(command.token(), param.name.clone(), value),
        },
        (Some(param), None) => MatchOutcome::Prompt {
            scope: Scope::for_command(command),
            prompt: param.display.clone(),
        },
        (None, _) => MatchOutcome::Dispatch {
            action: Action::new(command.token()),
        },
    };

    tracing::debug!(input = %effective, token = command.token(), "matched command");
    outcome
}

fn search_outcome(text: &str) -> MatchOutcome {
    let term = search()
        .captures(text)
        .and_then(|capture| capture.value())
        .map_or(Value::Null, Value::from);

    tracing::debug!(term = ?term, "no command matched, searching");
    MatchOutcome::Search {
        action: Action::with_param(SEARCH_TOKEN, SEARCH_PARAM, term),
    }
}
