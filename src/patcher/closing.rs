//! Closing repair after a body wrap
//!
//! The wrap opens one extra parenthesis. Two ways of closing it:
//!
//! - balanced: scan from the wrapped constructor's `(` to its matching `)`,
//!   skipping string literals and comments, and close the wrapper there.
//! - two-line: find the first `),` line directly followed by another `),`
//!   line and add one more `),` line after them.
//!
//! Neither is a parser. Source with unusual closing shapes can still come
//! out unbalanced, which is reported as [`ClosingRepair::Unbalanced`].

use regex::Regex;
use serde::Serialize;

use crate::config::ClosingStrategy;
use crate::error::PatchError;

use super::rewrite::BodyWrap;

/// How the wrapper's closing parenthesis ended up being added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClosingRepair {
    /// Closed after the wrapped constructor's matching parenthesis
    Balanced,
    /// Closed by extending a two-line `),` sequence
    TwoLine,
    /// No closing place found; the wrapper is left open
    Unbalanced,
}

impl std::fmt::Display for ClosingRepair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Balanced => write!(f, "balanced"),
            Self::TwoLine => write!(f, "two-line"),
            Self::Unbalanced => write!(f, "unbalanced"),
        }
    }
}

/// Closes the wrapper opened by a [`BodyWrap`]
#[derive(Debug, Clone)]
pub struct ClosingRepairer {
    strategy: ClosingStrategy,
    two_line_re: Regex,
}

impl ClosingRepairer {
    /// Build a repairer using `strategy` first
    pub fn new(strategy: ClosingStrategy) -> Result<Self, PatchError> {
        Ok(Self {
            strategy,
            two_line_re: Regex::new(r"(?m)^([ \t]*)\),[ \t]*\r?\n([ \t]*)\),[ \t]*(\r?)$")?,
        })
    }

    /// Add the closing parenthesis to a wrapped text.
    ///
    /// With the balanced strategy an unterminated scan falls back to the
    /// two-line heuristic. Returns the text unchanged when nothing fits.
    #[must_use]
    pub fn repair(&self, wrap: &BodyWrap) -> (String, ClosingRepair) {
        if self.strategy == ClosingStrategy::Balanced {
            if let Some(text) = close_balanced(wrap) {
                return (text, ClosingRepair::Balanced);
            }
            log::debug!("no matching parenthesis for {}, trying two-line closing", wrap.container);
        }

        match self.close_two_line(wrap) {
            Some(text) => (text, ClosingRepair::TwoLine),
            None => (wrap.text.clone(), ClosingRepair::Unbalanced),
        }
    }

    fn close_two_line(&self, wrap: &BodyWrap) -> Option<String> {
        let caps = self.two_line_re.captures_at(&wrap.text, wrap.open_paren)?;
        let whole = caps.get(0)?;
        let inner = caps.get(1)?.as_str();
        let outer = caps.get(2)?.as_str();
        let cr = caps.get(3).map_or("", |m| m.as_str());
        let newline = if whole.as_str().contains("\r\n") { "\r\n" } else { "\n" };

        let mut out = String::with_capacity(wrap.text.len() + outer.len() + 4);
        out.push_str(&wrap.text[..whole.start()]);
        out.push_str(&format!("{inner}),{newline}{outer}),{newline}{outer}),{cr}"));
        out.push_str(&wrap.text[whole.end()..]);
        Some(out)
    }
}

fn close_balanced(wrap: &BodyWrap) -> Option<String> {
    let close = matching_paren(&wrap.text, wrap.open_paren)?;
    let text = &wrap.text;

    let (at, insert) = if text[close + 1..].starts_with(',') {
        (close + 2, format!("{}{}),", wrap.newline, wrap.indent))
    } else {
        (close + 1, format!(",{}{})", wrap.newline, wrap.indent))
    };

    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(&text[..at]);
    out.push_str(&insert);
    out.push_str(&text[at..]);
    Some(out)
}

/// Byte offset of the `)` matching the `(` at `open`.
///
/// Skips `'`/`"` strings (including triple-quoted ones), `//` line comments
/// and `/* */` block comments.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            },
            quote @ (b'\'' | b'"') => {
                i = skip_string(bytes, i, quote)?;
                continue;
            },
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = bytes[i..].iter().position(|&b| b == b'\n').map_or(bytes.len(), |p| i + p);
                continue;
            },
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = find(bytes, i + 2, b"*/")? + 2;
                continue;
            },
            _ => {},
        }
        i += 1;
    }
    None
}

/// Index just past the string literal starting at `start`
fn skip_string(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let triple = [quote; 3];
    if bytes[start..].starts_with(&triple) {
        return find(bytes, start + 3, &triple).map(|end| end + 3);
    }

    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i + 1),
            b'\n' => return None,
            _ => i += 1,
        }
    }
    None
}

fn find(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| from + p)
}
