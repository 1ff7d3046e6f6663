//! Line-based recursive descent parser
//!
//!     The parser walks the logical lines produced by [`crate::lexing`] with
//!     an indentation discipline: a block is the run of lines sharing the
//!     indent of its first line, a suite is either the remainder of a header
//!     line (after the suite colon) or the following deeper block, and a
//!     dedent that matches no enclosing block is an error.
//!
//!     `elif` chains desugar to nested `If` statements in the `orelse` slot,
//!     the shape the reference interpreter's tree has. Compound statements
//!     the grammar does not model (`try`, `with`, `match`, decorated or
//!     `async` definitions) are captured verbatim, suites included, as
//!     [`Stmt::Other`].

use std::cmp::Ordering;

use crate::ast::{Alias, ClassDef, Expr, FunctionDef, Module, Stmt};
use crate::error::{ParseError, ParseResult};
use crate::lexing::{logical_lines, LogicalLine, Tok, Token};

/// Augmented assignment operators; statements containing one at depth zero
/// are not plain assignments.
const AUG_OPS: &[&str] = &[
    "+=", "-=", "*=", "/=", "//=", "%=", "**=", "&=", "|=", "^=", ">>=", "<<=", "@=",
];

/// Words that start a simple statement with no expression form.
const KEYWORD_STMTS: &[&str] = &[
    "pass", "break", "continue", "raise", "del", "global", "nonlocal", "assert",
];

/// Parse a source text into a [`Module`] named `name` (the file's base name
/// without extension).
pub fn parse_module(source: &str, name: &str) -> ParseResult<Module> {
    let lines = logical_lines(source)?;
    let mut parser = Parser { lines, pos: 0 };
    let body = parser.parse_block(0)?;
    debug_assert!(parser.peek().is_none());
    Ok(Module::new(name, body))
}

struct Parser {
    lines: Vec<LogicalLine>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&LogicalLine> {
        self.lines.get(self.pos)
    }

    fn advance(&mut self) -> LogicalLine {
        let line = self.lines[self.pos].clone();
        self.pos += 1;
        line
    }

    /// Parse the run of statements at exactly `indent`.
    fn parse_block(&mut self, indent: usize) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while let Some(line) = self.peek() {
            match line.indent.cmp(&indent) {
                Ordering::Less => break,
                Ordering::Greater => {
                    return Err(ParseError::new(line.line, "unexpected indent"));
                }
                Ordering::Equal => stmts.push(self.parse_stmt()?),
            }
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance();
        match line.toks[0].kind {
            Token::Def => self.parse_funcdef(&line).map(Stmt::FunctionDef),
            Token::Class => self.parse_classdef(&line).map(Stmt::ClassDef),
            Token::If => self.parse_if_from(&line),
            Token::For => self.parse_for(&line),
            Token::While => self.parse_while(&line),
            Token::Elif => Err(ParseError::new(line.line, "'elif' without matching 'if'")),
            Token::Else => Err(ParseError::new(line.line, "'else' without matching statement")),
            // A decorator line stands alone; the decorated definition parses
            // as its own statement.
            Token::At => Ok(Stmt::Other(text_of(&line.toks))),
            _ if ends_with_suite_colon(&line.toks) => self.parse_other_compound(&line),
            _ => parse_simple(&line.toks, line.line),
        }
    }

    /// A suite: either the inline remainder of the header line, or the
    /// following deeper block.
    fn parse_suite(&mut self, header: &LogicalLine, inline: &[Tok]) -> ParseResult<Vec<Stmt>> {
        if !inline.is_empty() {
            let mut stmts = Vec::new();
            for part in split_depth0(inline, Token::Semi) {
                if !part.is_empty() {
                    stmts.push(parse_simple(part, header.line)?);
                }
            }
            if stmts.is_empty() {
                return Err(ParseError::new(header.line, "expected statement after ':'"));
            }
            return Ok(stmts);
        }
        let indent = match self.peek() {
            Some(next) if next.indent > header.indent => next.indent,
            _ => return Err(ParseError::new(header.line, "expected an indented block")),
        };
        self.parse_block(indent)
    }

    fn parse_funcdef(&mut self, line: &LogicalLine) -> ParseResult<FunctionDef> {
        let toks = &line.toks;
        let name = match toks.get(1) {
            Some(t) if t.kind == Token::Name => t.text.clone(),
            _ => return Err(ParseError::new(line.line, "expected function name after 'def'")),
        };
        if toks.get(2).map(|t| t.kind) != Some(Token::LParen) {
            return Err(ParseError::new(line.line, "expected '(' after function name"));
        }
        let close = matching_close(toks, 2)
            .ok_or_else(|| ParseError::new(line.line, "unmatched '(' in parameter list"))?;
        let params = parse_params(&toks[3..close]);
        // Skip over any return annotation: the suite starts at the first
        // depth-zero ':' after the parameter list.
        let colon = find_depth0(&toks[close + 1..], Token::Colon)
            .map(|i| close + 1 + i)
            .ok_or_else(|| ParseError::new(line.line, "expected ':' after function header"))?;
        let body = self.parse_suite(line, &toks[colon + 1..])?;
        Ok(FunctionDef { name, params, body })
    }

    fn parse_classdef(&mut self, line: &LogicalLine) -> ParseResult<ClassDef> {
        let toks = &line.toks;
        let name = match toks.get(1) {
            Some(t) if t.kind == Token::Name => t.text.clone(),
            _ => return Err(ParseError::new(line.line, "expected class name after 'class'")),
        };
        let mut bases = Vec::new();
        let after_head = if toks.get(2).map(|t| t.kind) == Some(Token::LParen) {
            let close = matching_close(toks, 2)
                .ok_or_else(|| ParseError::new(line.line, "unmatched '(' in base list"))?;
            for seg in split_depth0(&toks[3..close], Token::Comma) {
                if seg.is_empty() {
                    continue;
                }
                // Keyword arguments (metaclass=...) are not bases.
                if find_depth0(seg, Token::Eq).is_some() {
                    continue;
                }
                bases.push(Expr::new(text_of(seg)));
            }
            close + 1
        } else {
            2
        };
        let colon = find_depth0(&toks[after_head..], Token::Colon)
            .map(|i| after_head + i)
            .ok_or_else(|| ParseError::new(line.line, "expected ':' after class header"))?;
        let body = self.parse_suite(line, &toks[colon + 1..])?;
        Ok(ClassDef { name, bases, body })
    }

    /// Parse an `if`/`elif` header line and everything that hangs off it.
    fn parse_if_from(&mut self, line: &LogicalLine) -> ParseResult<Stmt> {
        let toks = &line.toks;
        let colon = find_depth0(&toks[1..], Token::Colon)
            .map(|i| 1 + i)
            .ok_or_else(|| ParseError::new(line.line, "expected ':' in 'if' statement"))?;
        if colon == 1 {
            return Err(ParseError::new(line.line, "expected condition after 'if'"));
        }
        let test = Expr::new(text_of(&toks[1..colon]));
        let body = self.parse_suite(line, &toks[colon + 1..])?;
        let orelse = self.parse_else_of_if(line.indent)?;
        Ok(Stmt::If { test, body, orelse })
    }

    /// The `elif`/`else` continuation of an `if` at `indent`, desugaring
    /// `elif` into a single nested `If`.
    fn parse_else_of_if(&mut self, indent: usize) -> ParseResult<Vec<Stmt>> {
        match self.peek() {
            Some(next) if next.indent == indent && next.toks[0].kind == Token::Elif => {
                let line = self.advance();
                let nested = self.parse_if_from(&line)?;
                Ok(vec![nested])
            }
            Some(next) if next.indent == indent && next.toks[0].kind == Token::Else => {
                let line = self.advance();
                self.parse_else_suite(&line)
            }
            _ => Ok(Vec::new()),
        }
    }

    /// An `else:` line with its suite.
    fn parse_else_suite(&mut self, line: &LogicalLine) -> ParseResult<Vec<Stmt>> {
        if line.toks.get(1).map(|t| t.kind) != Some(Token::Colon) {
            return Err(ParseError::new(line.line, "expected ':' after 'else'"));
        }
        self.parse_suite(line, &line.toks[2..])
    }

    fn parse_for(&mut self, line: &LogicalLine) -> ParseResult<Stmt> {
        let toks = &line.toks;
        let colon = find_depth0(&toks[1..], Token::Colon)
            .map(|i| 1 + i)
            .ok_or_else(|| ParseError::new(line.line, "expected ':' in 'for' statement"))?;
        let in_pos = find_depth0(&toks[1..colon], Token::In)
            .map(|i| 1 + i)
            .ok_or_else(|| ParseError::new(line.line, "expected 'in' in 'for' statement"))?;
        if in_pos == 1 || in_pos + 1 == colon {
            return Err(ParseError::new(line.line, "malformed 'for' header"));
        }
        let target = Expr::new(text_of(&toks[1..in_pos]));
        let iter = Expr::new(text_of(&toks[in_pos + 1..colon]));
        let body = self.parse_suite(line, &toks[colon + 1..])?;
        let orelse = self.parse_loop_else(line.indent)?;
        Ok(Stmt::For {
            target,
            iter,
            body,
            orelse,
        })
    }

    fn parse_while(&mut self, line: &LogicalLine) -> ParseResult<Stmt> {
        let toks = &line.toks;
        let colon = find_depth0(&toks[1..], Token::Colon)
            .map(|i| 1 + i)
            .ok_or_else(|| ParseError::new(line.line, "expected ':' in 'while' statement"))?;
        if colon == 1 {
            return Err(ParseError::new(line.line, "expected condition after 'while'"));
        }
        let test = Expr::new(text_of(&toks[1..colon]));
        let body = self.parse_suite(line, &toks[colon + 1..])?;
        let orelse = self.parse_loop_else(line.indent)?;
        Ok(Stmt::While { test, body, orelse })
    }

    /// The optional `else:` suite of a loop at `indent`.
    fn parse_loop_else(&mut self, indent: usize) -> ParseResult<Vec<Stmt>> {
        match self.peek() {
            Some(next) if next.indent == indent && next.toks[0].kind == Token::Else => {
                let line = self.advance();
                self.parse_else_suite(&line)
            }
            _ => Ok(Vec::new()),
        }
    }

    /// An unrecognized compound statement: capture the header and its whole
    /// suite (plus `except`/`else`/`finally` continuations of a `try`) as raw
    /// text.
    fn parse_other_compound(&mut self, line: &LogicalLine) -> ParseResult<Stmt> {
        let mut text = text_of(&line.toks);
        self.swallow_deeper(line.indent, &mut text);
        if line.toks[0].text == "try" {
            while let Some(next) = self.peek() {
                let continues = next.indent == line.indent
                    && (next.toks[0].kind == Token::Else
                        || matches!(next.toks[0].text.as_str(), "except" | "finally"));
                if !continues {
                    break;
                }
                let cont = self.advance();
                text.push(' ');
                text.push_str(&text_of(&cont.toks));
                self.swallow_deeper(cont.indent, &mut text);
            }
        }
        Ok(Stmt::Other(text))
    }

    /// Append every following line deeper than `indent` to `text`.
    fn swallow_deeper(&mut self, indent: usize, text: &mut String) {
        while let Some(next) = self.peek() {
            if next.indent <= indent {
                break;
            }
            let line = self.advance();
            text.push(' ');
            text.push_str(&text_of(&line.toks));
        }
    }
}

/// Render a token run as text: slices joined by single spaces. The only
/// consumers collapse whitespace afterwards, so the joining character never
/// shows through.
pub fn text_of(toks: &[Tok]) -> String {
    let mut out = String::new();
    for (i, t) in toks.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&t.text);
    }
    out
}

/// Index of the first depth-zero occurrence of `kind`.
fn find_depth0(toks: &[Tok], kind: Token) -> Option<usize> {
    let mut depth = 0usize;
    for (i, t) in toks.iter().enumerate() {
        if t.kind.is_open() {
            depth += 1;
        } else if t.kind.is_close() {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && t.kind == kind {
            return Some(i);
        }
    }
    None
}

/// Split on depth-zero occurrences of `kind`. Segments may be empty.
fn split_depth0(toks: &[Tok], kind: Token) -> Vec<&[Tok]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, t) in toks.iter().enumerate() {
        if t.kind.is_open() {
            depth += 1;
        } else if t.kind.is_close() {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && t.kind == kind {
            parts.push(&toks[start..i]);
            start = i + 1;
        }
    }
    parts.push(&toks[start..]);
    parts
}

/// Index of the bracket closing the one at `open`.
fn matching_close(toks: &[Tok], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, t) in toks.iter().enumerate().skip(open) {
        if t.kind.is_open() {
            depth += 1;
        } else if t.kind.is_close() {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Does the line end a compound-statement header the grammar does not model?
fn ends_with_suite_colon(toks: &[Tok]) -> bool {
    let mut depth = 0usize;
    let mut last_is_colon = false;
    for t in toks {
        if t.kind.is_open() {
            depth += 1;
        } else if t.kind.is_close() {
            depth = depth.saturating_sub(1);
        }
        last_is_colon = depth == 0 && t.kind == Token::Colon;
    }
    last_is_colon
}

/// Positional(-or-keyword) parameter names, per the lossy capture rules:
/// names before a `/` are positional-only and dropped, a `*` of any kind ends
/// the capture, annotations and defaults are stripped.
fn parse_params(toks: &[Tok]) -> Vec<String> {
    let mut params = Vec::new();
    for seg in split_depth0(toks, Token::Comma) {
        let Some(first) = seg.first() else { continue };
        match (first.kind, first.text.as_str()) {
            (Token::Op, "*" | "**") => break,
            (Token::Op, "/") => params.clear(),
            _ => {
                if let Some(name) = seg.iter().find(|t| t.kind == Token::Name) {
                    params.push(name.text.clone());
                }
            }
        }
    }
    params
}

/// Classify and parse one simple (non-compound) statement.
fn parse_simple(toks: &[Tok], line: usize) -> ParseResult<Stmt> {
    match toks[0].kind {
        Token::Return => {
            let rest = &toks[1..];
            if rest.is_empty() {
                Ok(Stmt::Return(None))
            } else {
                Ok(Stmt::Return(Some(Expr::new(text_of(rest)))))
            }
        }
        Token::Import => Ok(Stmt::Import(parse_alias_list(&toks[1..], line, true)?)),
        Token::From => parse_import_from(toks, line),
        Token::Name if KEYWORD_STMTS.contains(&toks[0].text.as_str()) => {
            Ok(Stmt::Other(text_of(toks)))
        }
        _ => classify_expr_or_assign(toks),
    }
}

/// Distinguish plain assignment from annotated assignment, augmented
/// assignment, and bare expressions.
fn classify_expr_or_assign(toks: &[Tok]) -> ParseResult<Stmt> {
    let has_aug = {
        let mut depth = 0usize;
        toks.iter().any(|t| {
            if t.kind.is_open() {
                depth += 1;
            } else if t.kind.is_close() {
                depth = depth.saturating_sub(1);
            }
            depth == 0 && t.kind == Token::Op && AUG_OPS.contains(&t.text.as_str())
        })
    };
    if has_aug {
        return Ok(Stmt::Other(text_of(toks)));
    }

    let first_colon = find_depth0(toks, Token::Colon);
    let first_eq = find_depth0(toks, Token::Eq);
    match (first_colon, first_eq) {
        // `x: T = v` or `x: T`: annotated assignment, not modeled.
        (Some(c), Some(e)) if c < e => Ok(Stmt::Other(text_of(toks))),
        (Some(_), None) => Ok(Stmt::Other(text_of(toks))),
        (_, Some(_)) => Ok(parse_assign(toks)),
        (None, None) => Ok(Stmt::Expr(Expr::new(text_of(toks)))),
    }
}

/// Split `a = b = value` into targets and value. Splitting stops at the
/// first segment containing `lambda`, so a default inside a lambda is not
/// mistaken for a chained target.
fn parse_assign(toks: &[Tok]) -> Stmt {
    let mut targets = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    for (i, t) in toks.iter().enumerate() {
        if t.kind.is_open() {
            depth += 1;
        } else if t.kind.is_close() {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && t.kind == Token::Eq {
            let seg = &toks[start..i];
            if seg
                .iter()
                .any(|t| t.kind == Token::Name && t.text == "lambda")
            {
                break;
            }
            targets.push(Expr::new(text_of(seg)));
            start = i + 1;
        }
    }
    if targets.is_empty() {
        // Defensive: callers only reach here with a depth-zero `=` present.
        return Stmt::Expr(Expr::new(text_of(toks)));
    }
    Stmt::Assign {
        targets,
        value: Expr::new(text_of(&toks[start..])),
    }
}

/// `import a.b as c, d` / the name list of a from-import.
/// `dotted` allows dotted module paths; from-import names are plain.
fn parse_alias_list(toks: &[Tok], line: usize, dotted: bool) -> ParseResult<Vec<Alias>> {
    let mut names = Vec::new();
    for seg in split_depth0(toks, Token::Comma) {
        if seg.is_empty() {
            continue;
        }
        let (path_toks, asname) = match find_depth0(seg, Token::As) {
            Some(a) => {
                let after = &seg[a + 1..];
                let asname = match after.first() {
                    Some(t) if t.kind == Token::Name && after.len() == 1 => t.text.clone(),
                    _ => return Err(ParseError::new(line, "expected name after 'as'")),
                };
                (&seg[..a], Some(asname))
            }
            None => (seg, None),
        };
        let name = dotted_name(path_toks);
        if name.is_empty() || (!dotted && name.contains('.')) {
            return Err(ParseError::new(line, "malformed import name"));
        }
        names.push(Alias {
            name,
            asname,
        });
    }
    if names.is_empty() {
        return Err(ParseError::new(line, "expected name after 'import'"));
    }
    Ok(names)
}

/// Concatenate `Name`/`Dot`/`Op("*")` slices with nothing between them.
/// Anything else makes the path invalid (signalled by an empty return).
fn dotted_name(toks: &[Tok]) -> String {
    let mut out = String::new();
    for t in toks {
        match (t.kind, t.text.as_str()) {
            (Token::Name, _) | (Token::Dot, _) | (Token::Op, "*") => out.push_str(&t.text),
            _ => return String::new(),
        }
    }
    out
}

/// `from .pkg.mod import a as b, (c, d)`: relative dots dropped, parens
/// around the name list stripped.
fn parse_import_from(toks: &[Tok], line: usize) -> ParseResult<Stmt> {
    let import_pos = find_depth0(&toks[1..], Token::Import)
        .map(|i| 1 + i)
        .ok_or_else(|| ParseError::new(line, "expected 'import' in from-import"))?;

    let module: String = toks[1..import_pos]
        .iter()
        .filter(|t| t.kind == Token::Name || t.kind == Token::Dot)
        .map(|t| t.text.as_str())
        .collect::<String>()
        .trim_start_matches('.')
        .to_string();

    let mut rest = &toks[import_pos + 1..];
    if rest.first().map(|t| t.kind) == Some(Token::LParen)
        && rest.last().map(|t| t.kind) == Some(Token::RParen)
    {
        rest = &rest[1..rest.len() - 1];
    }
    let names = parse_alias_list(rest, line, false)?;
    Ok(Stmt::ImportFrom { module, names })
}
