//! Hand-rolled scanner driving the matcher through token-boundary rules.
//!
//! The main loop probes the tag bitmask at the current offset and dispatches
//! to a focused consuming method per token class; every method advances the
//! offset and emits at most one token. Input between recognized tokens
//! accumulates implicitly: [`Emit::begin_token`] flushes the gap since the
//! previous boundary as a Text token, so the emitted spans always partition
//! the source exactly.

use glint_match::{Matcher, Tag};

use crate::token::{Span, Token, TokenKind};

/// Offset one past the character starting at `at`.
fn next_char(source: &str, at: usize) -> usize {
    at + source[at..].chars().next().map_or(1, char::len_utf8)
}

/// Start offset of the character ending at `at`. Callers guarantee `at > 0`.
fn prev_char_start(source: &str, at: usize) -> usize {
    source[..at].char_indices().next_back().map_or(0, |(i, _)| i)
}

/// Token accumulation state for one tokenize call.
struct Emit<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    /// Start of the token currently being recognized.
    start: usize,
    /// End of the last emitted token; everything in `prev..start` is
    /// pending Text.
    prev: usize,
}

impl<'a> Emit<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            start: 0,
            prev: 0,
        }
    }

    /// Mark the start of a recognized token, flushing any pending gap as
    /// Text first.
    fn begin_token(&mut self, at: usize) {
        self.start = at;
        if self.start != self.prev {
            debug_assert!(self.start > self.prev, "token boundaries must advance");
            self.tokens
                .push(Token::new(Span::from_range(self.prev..self.start), TokenKind::Text));
            self.prev = self.start;
        }
    }

    /// Emit the token started by the last `begin_token` as `kind`.
    fn end_token(&mut self, end: usize, kind: TokenKind) {
        if self.start != end {
            debug_assert!(self.start < end, "tokens cannot be empty");
            self.tokens
                .push(Token::new(Span::from_range(self.start..end), kind));
            self.prev = end;
        }
    }

    /// Flush the trailing Text segment and hand back the tokens.
    fn finish(mut self) -> Vec<Token> {
        self.begin_token(self.source.len());
        self.tokens
    }
}

/// The tokenizer: a [`Matcher`] plus the scanning rules that drive it.
///
/// `tokenize` is total and deterministic; it never fails for any character
/// content, and unterminated comments or literals are closed best-effort at
/// end of input. Cloning shares the underlying immutable pattern index, so
/// each worker thread can hold its own instance lock-free.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    matcher: Matcher,
}

impl Tokenizer {
    pub fn new(matcher: Matcher) -> Self {
        Self { matcher }
    }

    /// Segment `source` into a gapless, contiguous token sequence.
    pub fn tokenize(&mut self, source: &str) -> Vec<Token> {
        let mut emit = Emit::new(source);
        let n = source.len();
        let mut i = 0;
        while i < n {
            let tags = self.matcher.probe(source, i);
            i = if tags.contains(Tag::LINE_COMMENT) {
                self.line_comment(&mut emit, i)
            } else if tags.contains(Tag::BLOCK_COMMENT_OPEN) {
                self.block_comment(&mut emit, i)
            } else if tags.contains(Tag::KEYWORD) {
                self.keyword(&mut emit, i)
                    .unwrap_or_else(|| next_char(source, i))
            } else if tags.contains(Tag::SINGLE_QUOTE) {
                self.quoted(&mut emit, i, Tag::SINGLE_QUOTE, Tag::ESCAPED_SINGLE_QUOTE)
            } else if tags.contains(Tag::DOUBLE_QUOTE) {
                self.quoted(&mut emit, i, Tag::DOUBLE_QUOTE, Tag::ESCAPED_DOUBLE_QUOTE)
            } else if tags.contains(Tag::DIGIT) {
                self.number(&mut emit, i)
                    .unwrap_or_else(|| next_char(source, i))
            } else if tags.contains(Tag::HEX_PREFIX) {
                self.hex_number(&mut emit, i)
                    .unwrap_or_else(|| next_char(source, i))
            } else {
                next_char(source, i)
            };
        }
        let tokens = emit.finish();
        tracing::trace!(bytes = n, tokens = tokens.len(), "tokenized buffer");
        tokens
    }

    /// Advance past the last probe: its full extent when it matched,
    /// otherwise one character.
    fn step(&self, source: &str, at: usize) -> usize {
        if self.matcher.matched() > 0 {
            self.matcher.end()
        } else {
            next_char(source, at)
        }
    }

    fn is_terminal_at(&mut self, source: &str, at: usize) -> bool {
        self.matcher.probe(source, at).contains(Tag::TERMINAL)
    }

    /// `// …` up to and including the end of line, or to end of input.
    fn line_comment(&mut self, emit: &mut Emit<'_>, start: usize) -> usize {
        emit.begin_token(start);
        let source = emit.source;
        let n = source.len();
        let mut i = self.matcher.end();
        while i < n {
            if self.matcher.probe(source, i).contains(Tag::EOL) {
                i = self.matcher.end();
                break;
            }
            i = self.step(source, i);
        }
        emit.end_token(i, TokenKind::Comment);
        i
    }

    /// `/* … */`, closed at end of input when unterminated.
    fn block_comment(&mut self, emit: &mut Emit<'_>, start: usize) -> usize {
        emit.begin_token(start);
        let source = emit.source;
        let n = source.len();
        let mut i = self.matcher.end();
        while i < n {
            if self
                .matcher
                .probe(source, i)
                .contains(Tag::BLOCK_COMMENT_CLOSE)
            {
                i = self.matcher.end();
                break;
            }
            i = self.step(source, i);
        }
        emit.end_token(i, TokenKind::Comment);
        i
    }

    /// A keyword match, accepted only when bounded by terminal characters.
    ///
    /// The check is vacuous at the input edges. On rejection returns `None`
    /// and the caller advances one character, so keyword-shaped substrings
    /// inside identifiers fall through to Text.
    fn keyword(&mut self, emit: &mut Emit<'_>, start: usize) -> Option<usize> {
        let source = emit.source;
        let end = self.matcher.end();
        let bounded_before =
            start == 0 || self.is_terminal_at(source, prev_char_start(source, start));
        let bounded_after = end >= source.len() || self.is_terminal_at(source, end);
        if !bounded_before || !bounded_after {
            return None;
        }
        emit.begin_token(start);
        emit.end_token(end, TokenKind::Keyword);
        Some(end)
    }

    /// A quoted literal. Escaped-quote matches are consumed as one unit and
    /// never terminate the literal; end of input closes it best-effort.
    fn quoted(&mut self, emit: &mut Emit<'_>, start: usize, quote: Tag, escape: Tag) -> usize {
        emit.begin_token(start);
        let source = emit.source;
        let n = source.len();
        let mut i = self.matcher.end();
        while i < n {
            let tags = self.matcher.probe(source, i);
            if tags.contains(escape) {
                i = self.matcher.end();
            } else if tags.contains(quote) {
                i = self.matcher.end();
                break;
            } else {
                // Advance a single character rather than the full match so
                // overlapping sequences are never skipped over.
                i = next_char(source, i);
            }
        }
        emit.end_token(i, TokenKind::Literal);
        i
    }

    /// Integer/float literal: maximal digit run, optional fraction after a
    /// decimal point, optional `e[-]` exponent, optional `f`/`F` suffix.
    ///
    /// Only recognized after a terminal character (or at input start), and
    /// only kept as a Literal when a terminal follows; anything else
    /// downgrades the whole run to Text.
    fn number(&mut self, emit: &mut Emit<'_>, start: usize) -> Option<usize> {
        let source = emit.source;
        let n = source.len();
        let mut i = self.matcher.end();
        if start > 0 && !self.is_terminal_at(source, prev_char_start(source, start)) {
            return None;
        }
        emit.begin_token(start);
        while i < n && self.matcher.probe(source, i).contains(Tag::DIGIT) {
            i = self.matcher.end();
        }
        if i < n && self.matcher.probe(source, i).contains(Tag::DECIMAL_POINT) {
            i = self.matcher.end();
            while i < n && self.matcher.probe(source, i).contains(Tag::DIGIT) {
                i = self.matcher.end();
            }
        }
        if source[i..].starts_with('e') {
            i += 1;
            if source[i..].starts_with('-') {
                i += 1;
            }
            while i < n && self.matcher.probe(source, i).contains(Tag::DIGIT) {
                i = self.matcher.end();
            }
        }
        if source[i..].starts_with(['f', 'F']) {
            i += 1;
        }
        Some(self.finish_number(emit, i))
    }

    /// Hex literal: `0x` followed by digits from the union of the decimal
    /// and hex alphabets, with the same terminal gating as `number`.
    fn hex_number(&mut self, emit: &mut Emit<'_>, start: usize) -> Option<usize> {
        let source = emit.source;
        let n = source.len();
        let mut i = self.matcher.end();
        if start > 0 && !self.is_terminal_at(source, prev_char_start(source, start)) {
            return None;
        }
        emit.begin_token(start);
        while i < n
            && self
                .matcher
                .probe(source, i)
                .intersects(Tag::DIGIT | Tag::HEX_DIGIT)
        {
            i = self.matcher.end();
        }
        Some(self.finish_number(emit, i))
    }

    fn finish_number(&mut self, emit: &mut Emit<'_>, end: usize) -> usize {
        let source = emit.source;
        let kind = if end < source.len() && self.is_terminal_at(source, end) {
            TokenKind::Literal
        } else {
            // No bounding terminal (including a run that hits end of
            // input): not tagged as a literal.
            TokenKind::Text
        };
        emit.end_token(end, kind);
        end
    }
}
