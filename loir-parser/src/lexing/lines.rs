//! Logical line assembly
//!
//! Folds the raw token stream into indentation-measured logical lines. This
//! is where physical layout stops mattering: bracket nesting and backslash
//! continuations join physical lines, blank and comment-only lines disappear,
//! and each surviving line knows its indent width and the 1-based physical
//! line it starts on.

use crate::error::{ParseError, ParseResult};
use crate::lexing::tokens::{tokenize, Token};

/// One token of a logical line, with its source slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tok {
    pub kind: Token,
    pub text: String,
}

impl Tok {
    pub fn new(kind: Token, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// A logical line: indent width, starting physical line, content tokens.
/// Content never includes whitespace, comments, or newlines, and is never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub indent: usize,
    pub line: usize,
    pub toks: Vec<Tok>,
}

/// Indent width of a run of leading whitespace. Spaces count one column,
/// a tab advances to the next multiple of eight, a form feed is ignored.
fn indent_width(ws: &str) -> usize {
    let mut width = 0;
    for ch in ws.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width = width / 8 * 8 + 8,
            _ => {}
        }
    }
    width
}

/// Assemble the source into logical lines.
///
/// Fails on unlexable characters; indentation *consistency* is checked later
/// by the parser, which knows which indents open blocks.
pub fn logical_lines(source: &str) -> ParseResult<Vec<LogicalLine>> {
    let mut lines = Vec::new();

    let mut cur: Vec<Tok> = Vec::new();
    let mut cur_indent = 0;
    let mut cur_start = 1;

    let mut phys_line = 1;
    let mut depth: usize = 0;
    let mut at_line_start = true;
    let mut pending_indent = 0;

    for (res, span) in tokenize(source) {
        let slice = &source[span.clone()];
        let kind = res.map_err(|()| {
            ParseError::new(phys_line, format!("unrecognized character {:?}", slice))
        })?;

        match kind {
            Token::Ws => {
                if at_line_start {
                    pending_indent = indent_width(slice);
                }
            }
            Token::Comment => {}
            Token::LineCont => {
                phys_line += 1;
                // An explicit continuation glues the next physical line onto
                // the current logical one, even before any content token.
                at_line_start = false;
            }
            Token::Newline => {
                phys_line += 1;
                if depth == 0 {
                    if !cur.is_empty() {
                        lines.push(LogicalLine {
                            indent: cur_indent,
                            line: cur_start,
                            toks: std::mem::take(&mut cur),
                        });
                    }
                    at_line_start = true;
                    pending_indent = 0;
                }
            }
            _ => {
                if at_line_start {
                    cur_indent = pending_indent;
                    cur_start = phys_line;
                    at_line_start = false;
                }
                if kind.is_open() {
                    depth += 1;
                } else if kind.is_close() {
                    depth = depth.saturating_sub(1);
                }
                cur.push(Tok::new(kind, slice));
                // Triple-quoted strings can span physical lines.
                phys_line += slice.matches('\n').count();
            }
        }
    }

    if !cur.is_empty() {
        lines.push(LogicalLine {
            indent: cur_indent,
            line: cur_start,
            toks: cur,
        });
    }

    Ok(lines)
}
