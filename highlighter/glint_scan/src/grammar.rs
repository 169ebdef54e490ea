//! Built-in grammar rule sets.
//!
//! A grammar is nothing more than a batch of `(pattern, tags)` registrations;
//! callers with other languages can build their own [`RuleSet`] directly.

use glint_match::{RuleSet, Tag};

/// Java reserved words.
const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "continue", "for", "new", "switch", "assert", "default", "goto", "package",
    "synchronized", "boolean", "do", "if", "private", "this", "break", "double", "implements",
    "protected", "throw", "byte", "else", "import", "public", "throws", "case", "enum",
    "instanceof", "return", "transient", "catch", "extends", "int", "short", "try", "char",
    "final", "interface", "static", "void", "class", "finally", "long", "strictfp", "volatile",
    "const", "float", "native", "super", "while",
];

/// Decimal digits.
const DIGITS: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Hex digits beyond the decimal set, both cases.
const HEX_DIGITS: &[&str] = &["A", "B", "C", "D", "E", "F", "a", "b", "c", "d", "e", "f"];

/// Characters presumed never to be part of an identifier.
const TERMINALS: &[&str] = &[
    " ", "\t", "\n", ".", ",", ";", "(", ")", "{", "}", "[", "]", "+", "-", "*", "/", "%", "&",
    "|", "=", ":", "?",
];

fn add(rules: &mut RuleSet, patterns: &[&str], tags: Tag) {
    if let Err(err) = rules.register_all(patterns, tags) {
        unreachable!("static grammar patterns are non-empty: {err}");
    }
}

/// The Java highlighting rule set.
///
/// Note the deliberate overlaps: `\n` is both end-of-line and a terminal,
/// `.` is both the decimal point and a terminal. The scanner relies on the
/// OR-combined tags.
pub fn java_rules() -> RuleSet {
    let mut rules = RuleSet::new();

    add(&mut rules, JAVA_KEYWORDS, Tag::KEYWORD);

    add(&mut rules, &["//"], Tag::LINE_COMMENT);
    add(&mut rules, &["/*"], Tag::BLOCK_COMMENT_OPEN);
    add(&mut rules, &["*/"], Tag::BLOCK_COMMENT_CLOSE);

    add(&mut rules, &["\n"], Tag::EOL);
    add(&mut rules, &["'"], Tag::SINGLE_QUOTE);
    add(&mut rules, &["\""], Tag::DOUBLE_QUOTE);
    add(&mut rules, &["\\'"], Tag::ESCAPED_SINGLE_QUOTE);
    add(&mut rules, &["\\\""], Tag::ESCAPED_DOUBLE_QUOTE);

    add(&mut rules, DIGITS, Tag::DIGIT);
    add(&mut rules, HEX_DIGITS, Tag::HEX_DIGIT);
    add(&mut rules, &["."], Tag::DECIMAL_POINT);
    add(&mut rules, &["0x"], Tag::HEX_PREFIX);

    add(&mut rules, TERMINALS, Tag::TERMINAL);

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_match::Backend;
    use pretty_assertions::assert_eq;

    #[test]
    fn overlapping_registrations_combine() {
        let mut m = java_rules().build(Backend::Trie);
        assert_eq!(m.probe("\n", 0), Tag::EOL | Tag::TERMINAL);
        assert_eq!(m.probe(".", 0), Tag::DECIMAL_POINT | Tag::TERMINAL);
    }

    #[test]
    fn hex_prefix_outmatches_zero_digit() {
        let mut m = java_rules().build(Backend::Trie);
        assert_eq!(m.probe("0x1F", 0), Tag::HEX_PREFIX);
        assert_eq!(m.matched(), 2);
        assert_eq!(m.probe("0 ", 0), Tag::DIGIT);
        assert_eq!(m.matched(), 1);
    }

    #[test]
    fn keywords_are_registered() {
        let mut m = java_rules().build(Backend::Naive);
        assert!(m.probe("synchronized(", 0).contains(Tag::KEYWORD));
        assert_eq!(m.matched(), "synchronized".len());
    }
}
