//! Naive substring-scan backend.
//!
//! Stores full patterns in a hash map and probes every prefix length up to
//! the longest registered pattern. Asymptotically worse than the trie but
//! trivially correct -- it exists so the trie has something to be checked
//! against, and tests assert the two produce identical results.

use rustc_hash::FxHashMap;

use crate::matcher::{Match, PatternIndex};
use crate::rules::RuleSet;
use crate::tag::Tag;

/// Hash-map pattern index.
#[derive(Debug)]
pub struct NaiveIndex {
    patterns: FxHashMap<String, Tag>,
    /// Longest registered pattern in bytes; bounds the prefix scan.
    max_len: usize,
}

impl NaiveIndex {
    /// Compile a rule set. Duplicate patterns OR-combine their tags.
    pub fn build(rules: &RuleSet) -> Self {
        let mut patterns: FxHashMap<String, Tag> = FxHashMap::default();
        let mut max_len = 0;
        for (pattern, tags) in rules.iter() {
            max_len = max_len.max(pattern.len());
            *patterns.entry(pattern.to_owned()).or_insert(Tag::empty()) |= tags;
        }
        Self { patterns, max_len }
    }
}

impl PatternIndex for NaiveIndex {
    fn lookup(&self, source: &str, start: usize) -> Match {
        if start >= source.len() {
            return Match::none(start);
        }
        let mut best = Match::none(start);
        for (offset, ch) in source[start..].char_indices() {
            let end = start + offset + ch.len_utf8();
            if end - start > self.max_len {
                break;
            }
            match self.patterns.get(&source[start..end]) {
                // Patterns whose tags OR-combined to nothing are treated
                // like absent ones, matching the trie's tagged-node rule.
                Some(&tags) if !tags.is_empty() => best = Match::found(start, end, tags),
                _ => {}
            }
        }
        best
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::matcher::{Backend, PatternIndex};
    use crate::trie::Trie;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn build(rules: &[(&str, Tag)]) -> NaiveIndex {
        let mut set = RuleSet::new();
        for (pattern, tags) in rules {
            set.register(pattern, *tags).unwrap();
        }
        NaiveIndex::build(&set)
    }

    #[test]
    fn longest_registered_prefix_wins() {
        let index = build(&[("/", Tag::TERMINAL), ("//", Tag::LINE_COMMENT)]);
        let m = index.lookup("//x", 0);
        assert_eq!(m.len(), 2);
        assert_eq!(m.tags(), Tag::LINE_COMMENT);
    }

    #[test]
    fn scan_is_bounded_by_max_pattern_length() {
        let index = build(&[("ab", Tag::KEYWORD)]);
        assert_eq!(index.max_len, 2);
        let m = index.lookup("abc", 0);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn no_registered_prefix_is_no_match() {
        let index = build(&[("int", Tag::KEYWORD)]);
        assert!(index.lookup("x", 0).is_none());
        assert!(index.lookup("in", 0).is_none());
    }

    // Both backends must answer every query identically; the dir renderer
    // asserts the same equivalence over whole files.
    proptest! {
        #[test]
        fn agrees_with_trie_on_random_input(
            patterns in proptest::collection::vec("[a-f/*.0-9]{1,4}", 1..12),
            input in "[a-f/*.0-9 ]{0,40}",
            start in 0usize..48,
        ) {
            let mut set = RuleSet::new();
            for (i, p) in patterns.iter().enumerate() {
                let tags = Tag::from_bits_truncate(1u16 << (i % 14));
                set.register(p, tags).unwrap();
            }
            let trie = Trie::build(&set);
            let naive = NaiveIndex::build(&set);
            prop_assert_eq!(trie.lookup(&input, start), naive.lookup(&input, start));
        }

        #[test]
        fn backend_choice_is_invisible_through_the_facade(
            input in "[int ]{0,20}",
        ) {
            let mut set = RuleSet::new();
            set.register("int", Tag::KEYWORD).unwrap();
            set.register(" ", Tag::TERMINAL).unwrap();
            let mut trie = set.build(Backend::Trie);
            let mut naive = set.build(Backend::Naive);
            for at in 0..=input.len() {
                prop_assert_eq!(trie.probe(&input, at), naive.probe(&input, at));
                prop_assert_eq!(trie.end(), naive.end());
            }
        }
    }
}
