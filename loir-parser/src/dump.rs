//! Canonical AST dump
//!
//! A normalized serialization of a module's shape, used only to compare two
//! programs structurally. The dump is attribute-free and field-name-free:
//! no source positions, no field labels, and expression text is whitespace-
//! collapsed so formatting differences between two sources can never alter
//! it. The module name is likewise excluded, since two files with different
//! names can carry the same program.

use crate::ast::{Alias, Expr, Module, Stmt};
use crate::unparse::collapse_ws;

/// Serialize a module into its canonical shape string.
pub fn dump(module: &Module) -> String {
    let mut out = String::from("Module(");
    push_body(&mut out, &module.body);
    out.push(')');
    out
}

fn push_body(out: &mut String, body: &[Stmt]) {
    out.push('[');
    for (i, stmt) in body.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_stmt(out, stmt);
    }
    out.push(']');
}

fn push_stmt(out: &mut String, stmt: &Stmt) {
    match stmt {
        Stmt::Import(names) => {
            out.push_str("Import(");
            push_aliases(out, names);
            out.push(')');
        }
        Stmt::ImportFrom { module, names } => {
            out.push_str("ImportFrom(");
            out.push_str(module);
            out.push(',');
            push_aliases(out, names);
            out.push(')');
        }
        Stmt::FunctionDef(f) => {
            out.push_str("FunctionDef(");
            out.push_str(&f.name);
            out.push_str(",[");
            out.push_str(&f.params.join(","));
            out.push_str("],");
            push_body(out, &f.body);
            out.push(')');
        }
        Stmt::ClassDef(c) => {
            out.push_str("ClassDef(");
            out.push_str(&c.name);
            out.push_str(",[");
            for (i, base) in c.bases.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                push_expr(out, base);
            }
            out.push_str("],");
            push_body(out, &c.body);
            out.push(')');
        }
        Stmt::Assign { targets, value } => {
            out.push_str("Assign([");
            for (i, t) in targets.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                push_expr(out, t);
            }
            out.push_str("],");
            push_expr(out, value);
            out.push(')');
        }
        Stmt::Return(value) => {
            out.push_str("Return(");
            if let Some(v) = value {
                push_expr(out, v);
            }
            out.push(')');
        }
        Stmt::If { test, body, orelse } => {
            out.push_str("If(");
            push_expr(out, test);
            out.push(',');
            push_body(out, body);
            out.push(',');
            push_body(out, orelse);
            out.push(')');
        }
        Stmt::For {
            target,
            iter,
            body,
            orelse,
        } => {
            out.push_str("For(");
            push_expr(out, target);
            out.push(',');
            push_expr(out, iter);
            out.push(',');
            push_body(out, body);
            out.push(',');
            push_body(out, orelse);
            out.push(')');
        }
        Stmt::While { test, body, orelse } => {
            out.push_str("While(");
            push_expr(out, test);
            out.push(',');
            push_body(out, body);
            out.push(',');
            push_body(out, orelse);
            out.push(')');
        }
        Stmt::Expr(e) => {
            out.push_str("Expr(");
            push_expr(out, e);
            out.push(')');
        }
        Stmt::Other(text) => {
            out.push_str("Stmt(");
            out.push_str(&collapse_ws(text));
            out.push(')');
        }
    }
}

fn push_expr(out: &mut String, expr: &Expr) {
    out.push_str(&collapse_ws(&expr.text));
}

fn push_aliases(out: &mut String, names: &[Alias]) {
    out.push('[');
    for (i, a) in names.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&a.name);
        if let Some(asname) = &a.asname {
            out.push(':');
            out.push_str(asname);
        }
    }
    out.push(']');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_module;

    #[test]
    fn test_dump_ignores_formatting() {
        let a = parse_module("x = f( 1,2 )\n", "a").expect("parse failed");
        let b = parse_module("x = f(1, 2)\n", "b").expect("parse failed");
        assert_eq!(dump(&a), dump(&b));
    }

    #[test]
    fn test_dump_ignores_module_name() {
        let a = parse_module("x = 1\n", "first").expect("parse failed");
        let b = parse_module("x = 1\n", "second").expect("parse failed");
        assert_eq!(dump(&a), dump(&b));
    }

    #[test]
    fn test_dump_distinguishes_shapes() {
        let a = parse_module("if x:\n    return 1\n", "m").expect("parse failed");
        let b = parse_module("while x:\n    return 1\n", "m").expect("parse failed");
        assert_ne!(dump(&a), dump(&b));
    }

    #[test]
    fn test_dump_shape() {
        let module = parse_module("def f(x):\n    return x\n", "m").expect("parse failed");
        assert_eq!(dump(&module), "Module([FunctionDef(f,[x],[Return(x)])])");
    }
}
