//! HTML rendering of a token stream.
//!
//! A pure, stateless formatting step: tokens in, one page out. Token text is
//! escaped character by character; the page either links an external
//! stylesheet or embeds the default one.

use std::fmt::Write as _;

use glint_scan::{Token, TokenKind};

/// Stylesheet embedded when no `--css` link is given.
const DEFAULT_CSS: &str = "\
pre.prettyprint { display: block }
pre .nocode { background-color: none; color: #000 }
pre .kwd { color: navy; font-weight: bold }
pre .com { color: green; font-weight: bold } /* comment  */
pre .lit { color: blue; font-weight: bold; } /* literal  */
@media print {
  pre.prettyprint { background-color: none }
  pre .kwd, code .kwd { color: navy; font-weight: bold }
  pre .com, code .com { color: green; font-style: bold }
  pre .lit, code .lit { color: blue; font-weight: bold; }
}";

fn css_class(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Keyword => "kwd",
        TokenKind::Literal => "lit",
        TokenKind::Comment => "com",
        TokenKind::Text => "pln",
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
}

/// Render a full page for `source` with its token classification.
pub fn render_page(source: &str, tokens: &[Token], css_link: Option<&str>) -> String {
    let mut out = String::with_capacity(source.len() * 2 + DEFAULT_CSS.len());
    match css_link {
        Some(link) => {
            let _ = write!(
                out,
                "<head><link href=\"{link}\" type=\"text/css\" rel=\"stylesheet\" /></head>"
            );
        }
        None => {
            out.push_str("<head><style>");
            out.push_str(DEFAULT_CSS);
            out.push_str("</style></head>");
        }
    }
    out.push_str("<body><pre class=\"prettyprint\"><code>");
    for token in tokens {
        out.push_str("<span class=\"");
        out.push_str(css_class(token.kind));
        out.push_str("\">");
        push_escaped(&mut out, token.text(source));
        out.push_str("</span>");
    }
    out.push_str("</code></pre></body>");
    out
}
