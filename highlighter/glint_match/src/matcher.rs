//! Match results, the backend trait, and the cursor-carrying facade.

use std::sync::Arc;

use crate::tag::Tag;

/// Result of a longest-match query.
///
/// Describes the longest registered pattern that is a prefix of the input
/// starting at the queried offset. When nothing matches, `len() == 0` and
/// `end()` equals the queried offset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Match {
    len: usize,
    end: usize,
    tags: Tag,
}

impl Match {
    /// The "no match" result at offset `at`.
    pub fn none(at: usize) -> Self {
        Self {
            len: 0,
            end: at,
            tags: Tag::empty(),
        }
    }

    /// A successful match spanning `start..end`.
    pub fn found(start: usize, end: usize, tags: Tag) -> Self {
        debug_assert!(start < end, "a match must consume at least one byte");
        Self {
            len: end - start,
            end,
            tags,
        }
    }

    /// Number of bytes matched. Zero means no registered pattern matched.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when no pattern matched at the queried offset.
    pub fn is_none(&self) -> bool {
        self.len == 0
    }

    /// Byte offset one past the matched text (the queried offset itself
    /// when nothing matched).
    pub fn end(&self) -> usize {
        self.end
    }

    /// Tags of the matched pattern, empty when nothing matched.
    pub fn tags(&self) -> Tag {
        self.tags
    }
}

/// A built, immutable pattern index answering longest-match queries.
///
/// Implementations never mutate after construction, so one instance can be
/// shared read-only across threads.
pub trait PatternIndex: Send + Sync {
    /// Longest registered pattern that is a prefix of `source[start..]`.
    ///
    /// Querying at or beyond `source.len()` returns "no match" rather than
    /// erroring. Ties in length cannot occur: patterns of equal length and
    /// content terminate at the same node, so their tags are OR-combined.
    fn lookup(&self, source: &str, start: usize) -> Match;
}

/// Backend selection for [`RuleSet::build`](crate::RuleSet::build).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Backend {
    /// Compact trie with dense per-node child arrays.
    #[default]
    Trie,
    /// Hash-map substring scan, the reference implementation.
    Naive,
}

/// Facade over a shared [`PatternIndex`], carrying the cursor state of the
/// last query.
///
/// The index is immutable once built, so clones share it; each clone gets
/// independent cursor state and is therefore lock-free to use from its own
/// thread.
///
/// `matched()` and `end()` refer to the most recent [`probe`](Self::probe)
/// and should only be consulted while that result is still the one being
/// acted on.
#[derive(Clone)]
pub struct Matcher {
    index: Arc<dyn PatternIndex>,
    last: Match,
}

impl Matcher {
    pub(crate) fn new(index: Arc<dyn PatternIndex>) -> Self {
        Self {
            index,
            last: Match::none(0),
        }
    }

    /// Query the longest match at `at` and return its tags.
    ///
    /// Records the full result; retrieve the extent via
    /// [`matched`](Self::matched) and [`end`](Self::end).
    pub fn probe(&mut self, source: &str, at: usize) -> Tag {
        self.last = self.index.lookup(source, at);
        self.last.tags()
    }

    /// Byte length of the last probed match (zero when nothing matched).
    pub fn matched(&self) -> usize {
        self.last.len()
    }

    /// Offset one past the last probed match; equals the probed offset when
    /// nothing matched, so repeated `probe`/`end` never moves backwards.
    pub fn end(&self) -> usize {
        self.last.end()
    }

    /// The last probed result as a value.
    pub fn last(&self) -> Match {
        self.last
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher").field("last", &self.last).finish()
    }
}
