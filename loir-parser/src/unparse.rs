//! Canonical rendering of nodes back to source-like text
//!
//! The unparser's contract is whitespace-insensitive-safe: its output may
//! contain arbitrary whitespace, and every consumer collapses it with
//! [`collapse_ws`] before use. Spacing choices here are therefore cosmetic.
//! What matters is the character sequence that survives collapsing.

use crate::ast::{Alias, Expr, Stmt};
use crate::error::UnparseError;

/// Remove every whitespace character. This is the collapse the encoder and
/// the dump both apply, including inside string literals.
pub fn collapse_ws(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Render an expression. Fails only on a degenerate empty span.
pub fn unparse_expr(expr: &Expr) -> Result<String, UnparseError> {
    if expr.text.trim().is_empty() {
        return Err(UnparseError::EmptyNode);
    }
    Ok(expr.text.clone())
}

/// Render a statement, suites included, one suite statement per line.
pub fn unparse_stmt(stmt: &Stmt) -> Result<String, UnparseError> {
    match stmt {
        Stmt::Import(names) => Ok(format!("import {}", alias_list(names))),
        Stmt::ImportFrom { module, names } => {
            Ok(format!("from {} import {}", module, alias_list(names)))
        }
        Stmt::FunctionDef(f) => Ok(format!(
            "def {}({}):\n{}",
            f.name,
            f.params.join(", "),
            unparse_body(&f.body)?
        )),
        Stmt::ClassDef(c) => {
            let bases = c
                .bases
                .iter()
                .map(|b| unparse_expr(b))
                .collect::<Result<Vec<_>, _>>()?
                .join(", ");
            Ok(format!(
                "class {}({}):\n{}",
                c.name,
                bases,
                unparse_body(&c.body)?
            ))
        }
        Stmt::Assign { targets, value } => {
            let mut out = String::new();
            for t in targets {
                out.push_str(&unparse_expr(t)?);
                out.push_str(" = ");
            }
            out.push_str(&unparse_expr(value)?);
            Ok(out)
        }
        Stmt::Return(value) => match value {
            Some(v) => Ok(format!("return {}", unparse_expr(v)?)),
            None => Ok("return".to_string()),
        },
        Stmt::If { test, body, orelse } => {
            let mut out = format!("if {}:\n{}", unparse_expr(test)?, unparse_body(body)?);
            if !orelse.is_empty() {
                out.push_str(&format!("\nelse:\n{}", unparse_body(orelse)?));
            }
            Ok(out)
        }
        Stmt::For {
            target,
            iter,
            body,
            orelse,
        } => {
            let mut out = format!(
                "for {} in {}:\n{}",
                unparse_expr(target)?,
                unparse_expr(iter)?,
                unparse_body(body)?
            );
            if !orelse.is_empty() {
                out.push_str(&format!("\nelse:\n{}", unparse_body(orelse)?));
            }
            Ok(out)
        }
        Stmt::While { test, body, orelse } => {
            let mut out = format!("while {}:\n{}", unparse_expr(test)?, unparse_body(body)?);
            if !orelse.is_empty() {
                out.push_str(&format!("\nelse:\n{}", unparse_body(orelse)?));
            }
            Ok(out)
        }
        Stmt::Expr(e) => unparse_expr(e),
        Stmt::Other(text) => {
            if text.trim().is_empty() {
                Err(UnparseError::EmptyNode)
            } else {
                Ok(text.clone())
            }
        }
    }
}

fn unparse_body(body: &[Stmt]) -> Result<String, UnparseError> {
    let rendered = body
        .iter()
        .map(unparse_stmt)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join("\n"))
}

fn alias_list(names: &[Alias]) -> String {
    names
        .iter()
        .map(|a| match &a.asname {
            Some(asname) => format!("{} as {}", a.name, asname),
            None => a.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
