//! Rule registration: the mutable accumulation phase before a backend is
//! built.
//!
//! A [`RuleSet`] is filled once at startup with `(pattern, tags)` pairs and
//! then compiled into an immutable [`Matcher`] via [`RuleSet::build`]. The
//! built index never changes; workers share it read-only.

use std::sync::Arc;

use thiserror::Error;

use crate::matcher::{Backend, Matcher, PatternIndex};
use crate::naive::NaiveIndex;
use crate::tag::Tag;
use crate::trie::Trie;

/// Registration-time violation. Raised immediately, never deferred to
/// query time.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RuleError {
    /// Patterns must contain at least one character.
    #[error("empty pattern cannot be registered")]
    EmptyPattern,
}

/// Ordered batch of match rules.
///
/// Registering the same pattern twice OR-combines the tags. The set itself
/// stores rules in registration order; order has no effect on matching
/// (longest match wins regardless), but it keeps grammar definitions
/// readable when debugged.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<(String, Tag)>,
}

impl RuleSet {
    /// Empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one pattern with the given tags.
    ///
    /// # Errors
    ///
    /// [`RuleError::EmptyPattern`] when `pattern` has no characters.
    pub fn register(&mut self, pattern: &str, tags: Tag) -> Result<(), RuleError> {
        if pattern.is_empty() {
            return Err(RuleError::EmptyPattern);
        }
        self.rules.push((pattern.to_owned(), tags));
        Ok(())
    }

    /// Register a whole pattern set under one tag, e.g. a keyword list or
    /// a digit alphabet.
    ///
    /// # Errors
    ///
    /// [`RuleError::EmptyPattern`] on the first empty member; members
    /// before it remain registered.
    pub fn register_all(&mut self, patterns: &[&str], tags: Tag) -> Result<(), RuleError> {
        for pattern in patterns {
            self.register(pattern, tags)?;
        }
        Ok(())
    }

    /// Number of registered rules (duplicates included).
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// `true` when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Tag)> {
        self.rules.iter().map(|(p, t)| (p.as_str(), *t))
    }

    /// Compile the registrations into an immutable, queryable [`Matcher`].
    ///
    /// The returned matcher (and every clone of it) shares one read-only
    /// index; there is no mutation path after this call.
    pub fn build(&self, backend: Backend) -> Matcher {
        let index: Arc<dyn PatternIndex> = match backend {
            Backend::Trie => Arc::new(Trie::build(self)),
            Backend::Naive => Arc::new(NaiveIndex::build(self)),
        };
        Matcher::new(index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_pattern_is_rejected_at_registration() {
        let mut rules = RuleSet::new();
        assert_eq!(rules.register("", Tag::KEYWORD), Err(RuleError::EmptyPattern));
        assert!(rules.is_empty());
    }

    #[test]
    fn duplicate_patterns_or_their_tags() {
        let mut rules = RuleSet::new();
        rules.register("\n", Tag::EOL).unwrap();
        rules.register("\n", Tag::TERMINAL).unwrap();
        let mut m = rules.build(Backend::Trie);
        let tags = m.probe("\n", 0);
        assert_eq!(tags, Tag::EOL | Tag::TERMINAL);
    }

    #[test]
    fn build_on_empty_set_matches_nothing() {
        let rules = RuleSet::new();
        let mut m = rules.build(Backend::Trie);
        assert!(m.probe("anything", 0).is_empty());
        assert_eq!(m.matched(), 0);
    }

    #[test]
    fn register_all_registers_each_member() {
        let mut rules = RuleSet::new();
        rules
            .register_all(&["0", "1", "2", "3"], Tag::DIGIT)
            .unwrap();
        assert_eq!(rules.len(), 4);
        let mut m = rules.build(Backend::Naive);
        assert!(m.probe("3", 0).contains(Tag::DIGIT));
    }
}
