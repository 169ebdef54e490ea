//! Multi-pattern longest-match engine.
//!
//! Maps fixed, non-recursive character sequences to sets of category tags
//! (a bitfield). Not as powerful as regexes -- no wildcards, no backtracking --
//! but exactly what a token scanner needs: register a batch of rules once,
//! build an immutable index, then answer greedy longest-match queries
//! character by character.
//!
//! Two interchangeable backends implement [`PatternIndex`]:
//! - [`Trie`]: a compact trie whose nodes store a dense child array over the
//!   observed character range. O(1) child lookup, built once, never mutated.
//! - [`NaiveIndex`]: a hash map of full patterns, scanned by prefix length.
//!   Kept as a reference implementation; tests assert both agree.
//!
//! ```
//! use glint_match::{Backend, RuleSet, Tag};
//!
//! let mut rules = RuleSet::new();
//! rules.register("//", Tag::LINE_COMMENT)?;
//! rules.register_all(&["0", "1", "2"], Tag::DIGIT)?;
//! let mut matcher = rules.build(Backend::Trie);
//!
//! let tags = matcher.probe("// hi", 0);
//! assert!(tags.contains(Tag::LINE_COMMENT));
//! assert_eq!(matcher.end(), 2);
//! # Ok::<(), glint_match::RuleError>(())
//! ```

pub mod matcher;
pub mod naive;
pub mod rules;
pub mod tag;
pub mod trie;

pub use matcher::{Backend, Match, Matcher, PatternIndex};
pub use naive::NaiveIndex;
pub use rules::{RuleError, RuleSet};
pub use tag::Tag;
pub use trie::Trie;
