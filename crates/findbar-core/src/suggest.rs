//! Suggestion ranker
//!
//! Fuzzy-ranks command labels against the typed text. Scoped input gets no
//! suggestions; non-empty input always ends with the search entry.

use crate::catalog::CommandSet;
use crate::matcher::Scope;
use findbar_pattern::{search, CompiledCommand};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;

/// Caps on suggestion list length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionLimits {
    /// Ranked entries shown for non-empty input (search entry excluded)
    pub ranked: usize,
    /// Entries shown for empty input
    pub empty: usize,
}

impl Default for SuggestionLimits {
    fn default() -> Self {
        Self { ranked: 4, empty: 5 }
    }
}

/// One entry of the suggestion menu
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    command: Arc<CompiledCommand>,
    score: i64,
    matched: Vec<usize>,
}

impl Suggestion {
    fn unranked(command: Arc<CompiledCommand>) -> Self {
        Self {
            command,
            score: 0,
            matched: Vec::new(),
        }
    }

    /// The trailing "search for ..." entry
    #[must_use]
    pub fn search() -> Self {
        Self::unranked(search())
    }

    /// Suggested command
    #[inline]
    #[must_use]
    pub fn command(&self) -> &Arc<CompiledCommand> {
        &self.command
    }

    /// Fuzzy score (0 when unranked)
    #[inline]
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Char positions in [`label`](Self::label) that matched the input
    #[inline]
    #[must_use]
    pub fn matched(&self) -> &[usize] {
        &self.matched
    }

    /// Whether this is the search entry
    #[inline]
    #[must_use]
    pub fn is_search(&self) -> bool {
        self.command.is_search()
    }

    /// Text the suggestion stands for
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        self.command.label()
    }

    /// Label with each run of matched chars wrapped in `pre`/`post`
    ///
    /// ```text
    /// label "open ", input "opn", ("<b>", "</b>") → "<b>op</b>e<b>n</b> "
    /// ```
    #[must_use]
    pub fn highlighted(&self, pre: &str, post: &str) -> String {
        let mut out = String::with_capacity(self.label().len() + self.matched.len() * (pre.len() + post.len()));
        let mut open = false;
        for (index, ch) in self.label().chars().enumerate() {
            let hit = self.matched.binary_search(&index).is_ok();
            if hit && !open {
                out.push_str(pre);
            } else if !hit && open {
                out.push_str(post);
            }
            open = hit;
            out.push(ch);
        }
        if open {
            out.push_str(post);
        }
        out
    }
}

impl Serialize for Suggestion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Suggestion", 5)?;
        state.serialize_field("token", self.command.token())?;
        state.serialize_field("label", self.label())?;
        state.serialize_field("score", &self.score)?;
        state.serialize_field("matched", &self.matched)?;
        state.serialize_field("search", &self.is_search())?;
        state.end()
    }
}

/// Rank suggestions for `input`
///
/// - any active scope → empty
/// - empty input → first `limits.empty` commands in declaration order
/// - otherwise → best `limits.ranked` fuzzy matches, then the search entry
#[must_use]
pub fn suggest(
    input: &str,
    scope: Option<&Scope>,
    commands: &CommandSet,
    limits: SuggestionLimits,
) -> Vec<Suggestion> {
    if scope.is_some() {
        return Vec::new();
    }

    if input.is_empty() {
        return commands
            .iter()
            .take(limits.empty)
            .map(|command| Suggestion::unranked(Arc::clone(command)))
            .collect();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut ranked: Vec<Suggestion> = commands
        .iter()
        .filter_map(|command| {
            let (score, mut matched) = matcher.fuzzy_indices(command.label(), input)?;
            matched.sort_unstable();
            Some(Suggestion {
                command: Arc::clone(command),
                score,
                matched,
            })
        })
        .collect();

    // Stable: equal scores keep declaration order
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(limits.ranked);
    ranked.push(Suggestion::search());
    ranked
}
