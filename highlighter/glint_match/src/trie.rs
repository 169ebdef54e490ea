//! Compact trie backend.
//!
//! Built in two phases, following the registration lifecycle:
//! a mutable [`TrieBuilder`] with hash-map children accumulates rules, then
//! freezes into immutable [`Node`]s whose children live in a dense array
//! spanning only the observed character range `[min, max]` -- one subtraction
//! and one bounds check per lookup step instead of a hash, without paying
//! for a full alphabet-sized table at every node.

use rustc_hash::FxHashMap;

use crate::matcher::{Match, PatternIndex};
use crate::rules::RuleSet;
use crate::tag::Tag;

/// Mutable accumulation node. Cheap to insert into, inefficient to query;
/// only ever used while a [`RuleSet`] is being compiled.
#[derive(Debug, Default)]
struct TrieBuilder {
    children: FxHashMap<char, TrieBuilder>,
    tags: Tag,
}

impl TrieBuilder {
    fn insert(&mut self, pattern: &str, tags: Tag) {
        let mut node = self;
        for ch in pattern.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.tags |= tags;
    }

    /// Freeze this node and its subtree into the dense representation.
    fn freeze(&self) -> Node {
        if self.children.is_empty() {
            return Node {
                first: 0,
                children: Vec::new(),
                tags: self.tags,
            };
        }
        // Child slots cover exactly the observed code point range.
        let first = self.children.keys().map(|&c| c as u32).min().unwrap_or(0);
        let last = self.children.keys().map(|&c| c as u32).max().unwrap_or(0);
        let mut children: Vec<Option<Node>> = Vec::new();
        children.resize_with((last - first + 1) as usize, || None);
        for (&ch, child) in &self.children {
            children[(ch as u32 - first) as usize] = Some(child.freeze());
        }
        Node {
            first,
            children,
            tags: self.tags,
        }
    }
}

/// Immutable trie node: dense child slots indexed by `ch - first`.
#[derive(Debug)]
struct Node {
    /// Code point of the first child slot.
    first: u32,
    /// Slots for `[first, first + children.len())`; `None` marks a gap in
    /// the range. Empty for leaf nodes.
    children: Vec<Option<Node>>,
    /// Tags of rules terminating exactly at this node.
    tags: Tag,
}

impl Node {
    fn child(&self, ch: char) -> Option<&Node> {
        let index = (ch as u32).checked_sub(self.first)?;
        self.children.get(index as usize)?.as_ref()
    }
}

/// The built, immutable trie index.
#[derive(Debug)]
pub struct Trie {
    root: Node,
}

impl Trie {
    /// Compile a rule set. Called once; the result never changes.
    pub fn build(rules: &RuleSet) -> Self {
        let mut builder = TrieBuilder::default();
        for (pattern, tags) in rules.iter() {
            builder.insert(pattern, tags);
        }
        Self {
            root: builder.freeze(),
        }
    }
}

impl PatternIndex for Trie {
    fn lookup(&self, source: &str, start: usize) -> Match {
        if start >= source.len() {
            return Match::none(start);
        }
        // Walk one character per level, remembering the deepest node that
        // carries tags: untagged interior nodes (a partial keyword, say)
        // must not count as a match.
        let mut node = &self.root;
        let mut best = Match::none(start);
        for (offset, ch) in source[start..].char_indices() {
            match node.child(ch) {
                Some(next) => {
                    node = next;
                    if !node.tags.is_empty() {
                        let end = start + offset + ch.len_utf8();
                        best = Match::found(start, end, node.tags);
                    }
                }
                None => break,
            }
        }
        best
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::matcher::Backend;
    use pretty_assertions::assert_eq;

    fn build(rules: &[(&str, Tag)]) -> Trie {
        let mut set = RuleSet::new();
        for (pattern, tags) in rules {
            set.register(pattern, *tags).unwrap();
        }
        Trie::build(&set)
    }

    #[test]
    fn single_pattern_matches_at_start() {
        let trie = build(&[("//", Tag::LINE_COMMENT)]);
        let m = trie.lookup("// hi", 0);
        assert_eq!(m.len(), 2);
        assert_eq!(m.end(), 2);
        assert_eq!(m.tags(), Tag::LINE_COMMENT);
    }

    #[test]
    fn longest_match_wins() {
        let trie = build(&[("/", Tag::TERMINAL), ("/*", Tag::BLOCK_COMMENT_OPEN)]);
        let m = trie.lookup("/* c */", 0);
        assert_eq!(m.len(), 2);
        assert_eq!(m.tags(), Tag::BLOCK_COMMENT_OPEN);
    }

    #[test]
    fn falls_back_to_shorter_tagged_prefix() {
        // "forces" walks f-o-r-c-e before dying; the deepest *tagged* node
        // is "for", not the untagged "force" prefix path.
        let trie = build(&[("for", Tag::KEYWORD), ("forcex", Tag::KEYWORD)]);
        let m = trie.lookup("forces", 0);
        assert_eq!(m.len(), 3);
        assert_eq!(m.tags(), Tag::KEYWORD);
    }

    #[test]
    fn partial_untagged_path_is_no_match() {
        let trie = build(&[("abstract", Tag::KEYWORD)]);
        let m = trie.lookup("abst", 0);
        assert!(m.is_none());
        assert_eq!(m.end(), 0);
    }

    #[test]
    fn mid_string_lookup_uses_offset() {
        let trie = build(&[("int", Tag::KEYWORD)]);
        let m = trie.lookup("an int", 3);
        assert_eq!(m.end(), 6);
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn lookup_at_or_past_end_is_no_match() {
        let trie = build(&[("x", Tag::KEYWORD)]);
        assert!(trie.lookup("x", 1).is_none());
        assert!(trie.lookup("x", 9).is_none());
        assert_eq!(trie.lookup("x", 9).end(), 9);
    }

    #[test]
    fn input_exhaustion_reports_final_tagged_node() {
        let trie = build(&[("0", Tag::DIGIT), ("0x", Tag::HEX_PREFIX)]);
        let m = trie.lookup("0", 0);
        assert_eq!(m.len(), 1);
        assert_eq!(m.tags(), Tag::DIGIT);
    }

    #[test]
    fn sparse_child_range_has_gaps() {
        // Children 'a' and 'z' force a 26-slot range with 24 gaps.
        let trie = build(&[("a", Tag::DIGIT), ("z", Tag::DIGIT)]);
        assert_eq!(trie.lookup("a", 0).len(), 1);
        assert_eq!(trie.lookup("z", 0).len(), 1);
        assert!(trie.lookup("m", 0).is_none());
    }

    #[test]
    fn multibyte_characters_walk_correctly() {
        let trie = build(&[("λx", Tag::KEYWORD)]);
        let m = trie.lookup("λx rest", 0);
        assert_eq!(m.len(), "λx".len());
        assert_eq!(m.tags(), Tag::KEYWORD);
    }

    #[test]
    fn equal_patterns_share_terminal_node_tags() {
        let mut set = RuleSet::new();
        set.register(".", Tag::DECIMAL_POINT).unwrap();
        set.register(".", Tag::TERMINAL).unwrap();
        let mut m = set.build(Backend::Trie);
        assert_eq!(m.probe(".5", 0), Tag::DECIMAL_POINT | Tag::TERMINAL);
    }
}
