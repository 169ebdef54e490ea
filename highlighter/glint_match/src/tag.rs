//! Category tags attached to registered patterns.
//!
//! A pattern carries a *set* of tags, not a single kind: `.` is both a
//! decimal-point marker and a terminal character, `\n` is both end-of-line
//! and a terminal. The scanner dispatches on individual bits, so overlap is
//! expected and cheap to test.

use bitflags::bitflags;

bitflags! {
    /// Tag bitmask for a registered pattern.
    ///
    /// OR-combined when the same pattern is registered more than once.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Tag: u16 {
        /// Reserved word of the highlighted language.
        const KEYWORD = 1 << 0;
        /// Start of a single-line comment (`//`).
        const LINE_COMMENT = 1 << 1;
        /// Start of a multiline comment (`/*`).
        const BLOCK_COMMENT_OPEN = 1 << 2;
        /// End of a multiline comment (`*/`).
        const BLOCK_COMMENT_CLOSE = 1 << 3;
        /// End of line.
        const EOL = 1 << 4;
        /// Unescaped double quote.
        const DOUBLE_QUOTE = 1 << 5;
        /// Unescaped single quote.
        const SINGLE_QUOTE = 1 << 6;
        /// Escaped double quote (`\"`), consumed as one unit.
        const ESCAPED_DOUBLE_QUOTE = 1 << 7;
        /// Escaped single quote (`\'`), consumed as one unit.
        const ESCAPED_SINGLE_QUOTE = 1 << 8;
        /// Decimal digit.
        const DIGIT = 1 << 9;
        /// Additional hexadecimal digit (`a`-`f`, `A`-`F`).
        const HEX_DIGIT = 1 << 10;
        /// Decimal point inside a numeric literal.
        const DECIMAL_POINT = 1 << 11;
        /// Hexadecimal literal prefix (`0x`).
        const HEX_PREFIX = 1 << 12;
        /// Terminal character: whitespace or punctuation presumed never to
        /// be part of an identifier, used to bound keyword/literal matches.
        const TERMINAL = 1 << 13;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tags_combine_and_test_independently() {
        let dot = Tag::DECIMAL_POINT | Tag::TERMINAL;
        assert!(dot.contains(Tag::DECIMAL_POINT));
        assert!(dot.contains(Tag::TERMINAL));
        assert!(!dot.contains(Tag::DIGIT));
    }

    #[test]
    fn empty_contains_nothing() {
        let empty = Tag::empty();
        assert!(!empty.contains(Tag::KEYWORD));
        assert_eq!(empty, Tag::default());
    }

    #[test]
    fn intersects_matches_any_bit() {
        let hex = Tag::DIGIT | Tag::HEX_DIGIT;
        assert!(Tag::HEX_DIGIT.intersects(hex));
        assert!(!Tag::TERMINAL.intersects(hex));
    }
}
