//! Embedded markup validation.
//!
//! Raw HTML passes through the renderer unchanged, so a document with an
//! unclosed `<div>` would break the page shell around it. [`MarkupValidator`]
//! tracks element nesting across all HTML fragments of a document and rejects
//! tags that are unbalanced.

use std::sync::LazyLock;

use regex::Regex;

use crate::CompileError;

/// Matches an opening, closing, or self-closing tag.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9:._-]*)([^<>]*?)(/?)>").expect("valid tag regex")
});

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// An element that was opened and not yet closed.
#[derive(Debug)]
struct OpenElement {
    name: String,
    line: usize,
}

/// Tracks element nesting across the HTML fragments of one document.
#[derive(Debug, Default)]
pub(crate) struct MarkupValidator {
    stack: Vec<OpenElement>,
    in_comment: bool,
}

impl MarkupValidator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Check one HTML fragment starting at `line`.
    pub(crate) fn feed(&mut self, html: &str, line: usize) -> Result<(), CompileError> {
        let mut rest = html;
        let mut consumed = 0;

        loop {
            if self.in_comment {
                let Some(end) = rest.find("-->") else {
                    return Ok(());
                };
                consumed += end + 3;
                rest = &html[consumed..];
                self.in_comment = false;
            }

            let comment_start = rest.find("<!--");
            let scan_end = comment_start.unwrap_or(rest.len());
            let at = |idx: usize| line + count_newlines(&html[..consumed + idx]);

            for caps in TAG_RE.captures_iter(&rest[..scan_end]) {
                let whole = caps.get(0).map_or(0, |m| m.start());
                let closing = !caps[1].is_empty();
                let self_closing = !caps[4].is_empty() && ends_attributes(&caps[3]);
                let name = caps[2].to_ascii_lowercase();

                if closing {
                    self.close(&name, at(whole))?;
                } else if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
                    self.stack.push(OpenElement {
                        name,
                        line: at(whole),
                    });
                }
            }

            match comment_start {
                Some(start) => {
                    consumed += start + 4;
                    rest = &html[consumed..];
                    self.in_comment = true;
                }
                None => return Ok(()),
            }
        }
    }

    fn close(&mut self, name: &str, line: usize) -> Result<(), CompileError> {
        if VOID_ELEMENTS.contains(&name) {
            return Ok(());
        }
        match self.stack.pop() {
            Some(open) if open.name == name => Ok(()),
            Some(open) => Err(CompileError::Markup {
                message: format!(
                    "expected </{}> (opened at line {}) but found </{name}>",
                    open.name, open.line
                ),
                line,
            }),
            None => Err(CompileError::Markup {
                message: format!("unexpected closing tag </{name}>"),
                line,
            }),
        }
    }

    /// Report the first element left open at the end of the document.
    pub(crate) fn finish(self) -> Result<(), CompileError> {
        match self.stack.into_iter().next() {
            Some(open) => Err(CompileError::Markup {
                message: format!("unclosed tag <{}>", open.name),
                line: open.line,
            }),
            None => Ok(()),
        }
    }
}

/// Whether a trailing `/` after these attributes is a self-closing marker.
///
/// In `<a href=/docs/>` the slash belongs to the unquoted attribute value.
fn ends_attributes(attrs: &str) -> bool {
    attrs.is_empty() || attrs.ends_with(|c: char| c.is_whitespace() || c == '"' || c == '\'')
}

fn count_newlines(s: &str) -> usize {
    s.bytes().filter(|&b| b == b'\n').count()
}
