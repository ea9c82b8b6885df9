//! Command catalog
//!
//! [`CommandSet`] is a validated, compiled, declaration-ordered command list.
//! [`Catalog`] owns the current set together with the suggestion cache and
//! swaps in recompiled sets atomically.

use crate::cache::SuggestionCache;
use crate::error::ConfigError;
use crate::matcher::{self, MatchOutcome, Scope};
use crate::suggest::{self, Suggestion, SuggestionLimits};
use findbar_pattern::{compile, CommandDefinition, CompiledCommand};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Validated, compiled command list
///
/// Iteration order is declaration order, which is also match priority.
#[derive(Debug, Clone, Default)]
pub struct CommandSet {
    commands: IndexMap<String, Arc<CompiledCommand>>,
    generation: u64,
}

impl CommandSet {
    /// Empty set: every input falls through to search
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate and compile definitions
    ///
    /// # Errors
    /// - [`ConfigError::MissingField`] for a blank token or pattern
    /// - [`ConfigError::DuplicateToken`] when a token repeats
    /// - [`ConfigError::Pattern`] when a pattern cannot be compiled
    pub fn compile(definitions: &[CommandDefinition]) -> Result<Self, ConfigError> {
        let mut commands = IndexMap::with_capacity(definitions.len());

        for (index, definition) in definitions.iter().enumerate() {
            if definition.token.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    index,
                    field: "token",
                });
            }
            if definition.pattern.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    index,
                    field: "pattern",
                });
            }
            if commands.contains_key(&definition.token) {
                return Err(ConfigError::DuplicateToken(definition.token.clone()));
            }

            let compiled = compile(definition).map_err(|source| ConfigError::Pattern {
                token: definition.token.clone(),
                source,
            })?;
            commands.insert(definition.token.clone(), Arc::new(compiled));
        }

        Ok(Self {
            commands,
            generation: 0,
        })
    }

    /// Look up a command by token
    #[inline]
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&Arc<CompiledCommand>> {
        self.commands.get(token)
    }

    /// Commands in declaration order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CompiledCommand>> {
        self.commands.values()
    }

    /// Number of declared commands (search excluded)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands are declared
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Reload counter of the catalog that produced this set
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Parameter-entry scope for a declared command
    #[must_use]
    pub fn scope_for(&self, token: &str) -> Option<Scope> {
        self.get(token).map(|command| Scope::for_command(command))
    }
}

/// Shared, reloadable command catalog
///
/// Readers take a [`snapshot`](Self::snapshot) and never observe a
/// half-updated list.
#[derive(Debug)]
pub struct Catalog {
    current: RwLock<Arc<CommandSet>>,
    cache: SuggestionCache,
    limits: SuggestionLimits,
}

impl Catalog {
    /// Create catalog from a compiled set
    #[must_use]
    pub fn new(set: CommandSet, limits: SuggestionLimits, cache_capacity: u64) -> Self {
        tracing::info!(commands = set.len(), "loaded command catalog");
        Self {
            current: RwLock::new(Arc::new(set)),
            cache: SuggestionCache::new(cache_capacity),
            limits,
        }
    }

    /// Validate and compile definitions with default limits and cache size
    ///
    /// # Errors
    /// See [`CommandSet::compile`].
    pub fn from_definitions(definitions: &[CommandDefinition]) -> Result<Self, ConfigError> {
        let set = CommandSet::compile(definitions)?;
        Ok(Self::new(
            set,
            SuggestionLimits::default(),
            SuggestionCache::DEFAULT_CAPACITY,
        ))
    }

    /// Current compiled set
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Arc<CommandSet> {
        Arc::clone(&self.current.read())
    }

    /// Suggestion limits in effect
    #[inline]
    #[must_use]
    pub fn limits(&self) -> SuggestionLimits {
        self.limits
    }

    /// Current generation
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.current.read().generation
    }

    /// Recompile and atomically replace the command list
    ///
    /// Compilation happens before the swap; on error the previous list stays
    /// in place. Cached suggestions for older generations are evicted.
    ///
    /// # Errors
    /// See [`CommandSet::compile`].
    pub fn reload(&self, definitions: &[CommandDefinition]) -> Result<u64, ConfigError> {
        let mut set = match CommandSet::compile(definitions) {
            Ok(set) => set,
            Err(err) => {
                tracing::warn!("command reload rejected: {}", err);
                return Err(err);
            }
        };

        let generation = {
            let mut current = self.current.write();
            set.generation = current.generation + 1;
            let generation = set.generation;
            *current = Arc::new(set);
            generation
        };
        self.cache.invalidate_all();

        tracing::info!(commands = definitions.len(), generation, "reloaded command catalog");
        Ok(generation)
    }

    /// Resolve input against the current list
    #[must_use]
    pub fn match_input(&self, input: &str, scope: Option<&Scope>) -> MatchOutcome {
        matcher::match_input(input, scope, &self.snapshot())
    }

    /// Ranked suggestions, cached per `(input, scope)` for this generation
    #[must_use]
    pub fn suggest(&self, input: &str, scope: Option<&Scope>) -> Arc<Vec<Suggestion>> {
        let set = self.snapshot();
        self.cache.get_or_compute(set.generation(), input, scope, || {
            suggest::suggest(input, scope, &set, self.limits)
        })
    }

    /// Suggestion cache handle
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }
}
