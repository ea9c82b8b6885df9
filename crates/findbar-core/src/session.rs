//! Find-bar session
//!
//! [`FindBarSession`] is the state the embedding UI drives: the input text,
//! the active scope, the placeholder, and the suggestion menu. UI events map
//! onto the methods here. The session returns outcomes to dispatch and
//! publishes suggestion lists to subscribers.

use crate::catalog::Catalog;
use crate::config::DEFAULT_PLACEHOLDER;
use crate::error::{FindBarError, FindBarResult};
use crate::matcher::{MatchOutcome, Scope};
use crate::suggest::Suggestion;
use crossbeam::channel::{self, Receiver, Sender};
use std::sync::Arc;

/// Suggestion list pushed to subscribers
pub type SuggestionUpdate = Arc<Vec<Suggestion>>;

/// Interactive find-bar state
#[derive(Debug)]
pub struct FindBarSession {
    catalog: Arc<Catalog>,
    default_placeholder: String,
    input: String,
    scope: Option<Scope>,
    placeholder: String,
    open: bool,
    highlighted: usize,
    subscribers: Vec<Sender<SuggestionUpdate>>,
}

impl FindBarSession {
    /// Create session over a catalog
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_placeholder(catalog, DEFAULT_PLACEHOLDER)
    }

    /// Create session with a custom idle placeholder
    #[must_use]
    pub fn with_placeholder(catalog: Arc<Catalog>, placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        Self {
            catalog,
            default_placeholder: placeholder.clone(),
            input: String::new(),
            scope: None,
            placeholder,
            open: false,
            highlighted: 0,
            subscribers: Vec::new(),
        }
    }

    /// Current input text
    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Active scope
    #[inline]
    #[must_use]
    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    /// Placeholder to show in the empty input
    #[inline]
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Whether the suggestion menu is open
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Highlighted menu index
    #[inline]
    #[must_use]
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Receive a suggestion list after every input or scope change
    pub fn subscribe(&mut self) -> Receiver<SuggestionUpdate> {
        let (tx, rx) = channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Suggestions for the current input and scope
    #[must_use]
    pub fn suggestions(&self) -> SuggestionUpdate {
        self.catalog.suggest(&self.input, self.scope.as_ref())
    }

    /// Replace the input text
    ///
    /// Opens the menu and moves the highlight back to the top.
    pub fn set_input_text(&mut self, text: impl Into<String>) -> SuggestionUpdate {
        self.input = text.into();
        self.open = true;
        self.highlighted = 0;
        self.publish()
    }

    /// Replace the scope and the placeholder that goes with it
    ///
    /// A command scope prompts with its parameter label, search mode shows
    /// no placeholder, and `None` restores the idle placeholder.
    pub fn set_scope(&mut self, scope: Option<Scope>) -> SuggestionUpdate {
        match &scope {
            Some(Scope::Command { token, .. }) => {
                let prompt = self
                    .catalog
                    .snapshot()
                    .get(token)
                    .and_then(|command| command.param().map(|param| param.display.clone()));
                match prompt {
                    Some(prompt) => self.placeholder = prompt,
                    None => self.placeholder.clone_from(&self.default_placeholder),
                }
            }
            Some(Scope::Search) => self.placeholder.clear(),
            None => self.placeholder.clone_from(&self.default_placeholder),
        }
        self.scope = scope;
        self.publish()
    }

    /// Enter parameter mode for a declared command
    ///
    /// # Errors
    /// [`FindBarError::UnknownToken`] if the catalog has no such command.
    pub fn set_scope_token(&mut self, token: &str) -> FindBarResult<SuggestionUpdate> {
        let scope = self
            .catalog
            .snapshot()
            .scope_for(token)
            .ok_or_else(|| FindBarError::UnknownToken(token.to_string()))?;
        Ok(self.set_scope(Some(scope)))
    }

    /// Move highlight down, wrapping to the top
    pub fn highlight_next(&mut self) {
        let len = self.suggestions().len();
        self.highlighted = if !self.open || len == 0 || self.highlighted + 1 >= len {
            0
        } else {
            self.highlighted + 1
        };
        self.open = true;
    }

    /// Move highlight up, wrapping to the bottom
    pub fn highlight_previous(&mut self) {
        let len = self.suggestions().len();
        self.highlighted = if self.highlighted == 0 {
            len.saturating_sub(1)
        } else {
            self.highlighted - 1
        };
        self.open = true;
    }

    /// Highlight an entry directly (pointer hover)
    pub fn highlight(&mut self, index: usize) {
        self.highlighted = index;
    }

    /// Resolve the input and apply the outcome to the session
    ///
    /// With the menu open, the highlighted non-search suggestion first
    /// replaces the input with its label. Search outcomes enter search mode;
    /// prompts clear the input and enter parameter mode. The outcome is
    /// returned for the caller to dispatch.
    pub fn submit(&mut self) -> MatchOutcome {
        if self.open {
            let suggestions = self.suggestions();
            if let Some(choice) = suggestions.get(self.highlighted) {
                if !choice.is_search() {
                    self.input = choice.label().to_string();
                }
            }
        }
        self.open = false;
        self.highlighted = 0;

        let outcome = self.catalog.match_input(&self.input, self.scope.as_ref());
        match &outcome {
            MatchOutcome::Search { .. } => {
                self.scope = Some(Scope::Search);
                self.placeholder.clear();
            }
            MatchOutcome::Prompt { scope, prompt } => {
                self.input.clear();
                self.scope = Some(scope.clone());
                self.placeholder.clone_from(prompt);
            }
            MatchOutcome::Dispatch { action } => {
                tracing::debug!(token = %action.token, "dispatching find-bar action");
            }
        }
        self.publish();
        outcome
    }

    /// Choose an entry directly (pointer click)
    pub fn select(&mut self, index: usize) -> MatchOutcome {
        self.open = true;
        self.highlighted = index;
        self.submit()
    }

    /// Delete the last char; on empty input, leave the scope instead
    pub fn delete_backward(&mut self) -> SuggestionUpdate {
        self.open = true;
        self.highlighted = 0;
        if self.input.pop().is_none() {
            self.clear_scope_if_idle();
        }
        self.publish()
    }

    /// Close the menu; leave the scope if nothing has been typed
    pub fn dismiss(&mut self) {
        self.open = false;
        self.highlighted = 0;
        if self.clear_scope_if_idle() {
            self.publish();
        }
    }

    fn clear_scope_if_idle(&mut self) -> bool {
        if self.input.is_empty() && self.scope.is_some() {
            self.scope = None;
            self.placeholder.clone_from(&self.default_placeholder);
            return true;
        }
        false
    }

    fn publish(&mut self) -> SuggestionUpdate {
        let update = self.suggestions();
        self.subscribers
            .retain(|tx| tx.send(Arc::clone(&update)).is_ok());
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use findbar_pattern::CommandDefinition;

    fn session() -> FindBarSession {
        let catalog = Catalog::from_definitions(&[
            CommandDefinition::new("newProject", "new project"),
            CommandDefinition::new("openFile", "open (:fileName)"),
        ])
        .unwrap();
        FindBarSession::new(Arc::new(catalog))
    }

    #[test]
    fn starts_idle() {
        let session = session();
        assert_eq!(session.input(), "");
        assert!(session.scope().is_none());
        assert_eq!(session.placeholder(), DEFAULT_PLACEHOLDER);
        assert!(!session.is_open());
    }

    #[test]
    fn typing_opens_menu() {
        let mut session = session();
        let list = session.set_input_text("new");
        assert!(session.is_open());
        assert_eq!(list[0].command().token(), "newProject");
        assert!(list.last().unwrap().is_search());
    }

    #[test]
    fn highlight_wraps_both_ways() {
        let mut session = session();
        session.set_input_text("");
        // empty input: two declared commands
        session.highlight_next();
        assert_eq!(session.highlighted(), 1);
        session.highlight_next();
        assert_eq!(session.highlighted(), 0);
        session.highlight_previous();
        assert_eq!(session.highlighted(), 1);
    }

    #[test]
    fn highlight_next_on_closed_menu_starts_at_top() {
        let mut session = session();
        session.set_input_text("");
        session.highlight_next();
        session.dismiss();
        session.highlight_next();
        assert_eq!(session.highlighted(), 0);
        assert!(session.is_open());
    }

    #[test]
    fn delete_backward_on_empty_input_leaves_scope() {
        let mut session = session();
        session.set_scope_token("openFile").unwrap();
        assert_eq!(session.placeholder(), "File Name");

        session.delete_backward();
        assert!(session.scope().is_none());
        assert_eq!(session.placeholder(), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn unknown_scope_token_is_error() {
        let mut session = session();
        let err = session.set_scope_token("nope").unwrap_err();
        assert!(matches!(err, FindBarError::UnknownToken(token) if token == "nope"));
    }

    #[test]
    fn subscribers_receive_updates() {
        let mut session = session();
        let rx = session.subscribe();
        session.set_input_text("open");
        let update = rx.try_recv().unwrap();
        assert_eq!(update[0].command().token(), "openFile");
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut session = session();
        drop(session.subscribe());
        session.set_input_text("x");
        assert!(session.subscribers.is_empty());
    }
}
