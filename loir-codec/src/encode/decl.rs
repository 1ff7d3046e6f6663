//! Declaration encoding
//!
//! Functions: `name(params){body}` with positional parameter names only.
//! Classes: `name(bases){methods}` where only direct function-definition
//! members count as methods. Imports: `imp:<module>` / `frm:<module>imp:<name>`
//! entries, optionally suffixed `as<alias>`, top-level statements only.

use loir_parser::{ClassDef, FunctionDef, Module, Stmt};

use super::expr::render_expr;
use super::stmt::encode_body;

/// Encode a function declaration.
pub fn encode_function(f: &FunctionDef) -> String {
    format!("{}({}){{{}}}", f.name, f.params.join(","), encode_body(&f.body))
}

/// Encode a class declaration. Nested classes, class-level assignments, and
/// properties are silently omitted.
pub fn encode_class(c: &ClassDef) -> String {
    let bases = c.bases.iter().map(render_expr).collect::<Vec<_>>().join(",");
    let methods = c
        .methods()
        .map(encode_function)
        .collect::<Vec<_>>()
        .join("|");
    format!("{}({}){{{}}}", c.name, bases, methods)
}

/// Encode the module's top-level imports, one entry per imported name, in
/// source order.
pub fn encode_imports(module: &Module) -> Vec<String> {
    let mut entries = Vec::new();
    for stmt in &module.body {
        match stmt {
            Stmt::Import(names) => {
                for a in names {
                    entries.push(format!("imp:{}{}", a.name, as_suffix(&a.asname)));
                }
            }
            Stmt::ImportFrom { module, names } => {
                for a in names {
                    entries.push(format!("frm:{}imp:{}{}", module, a.name, as_suffix(&a.asname)));
                }
            }
            _ => {}
        }
    }
    entries
}

fn as_suffix(asname: &Option<String>) -> String {
    match asname {
        Some(alias) => format!("as{alias}"),
        None => String::new(),
    }
}
