//! Statement encoding
//!
//! Each statement becomes a single-line fragment:
//!
//!     Assign    A<targets,>=<value>
//!     Return    R<value?>
//!     If        I<test>{<then>}:E<else>
//!     For       F<target>in<iter>{<body>}
//!     While     W<test>{<body>}
//!
//! Nested bodies join with `|` and sit inside one `{`/`}` pair per compound
//! statement, so brace nesting mirrors source nesting exactly. The else
//! branch of a conditional is always prefixed `:E`, present or not, and
//! carries no braces of its own. Anything else (expression statements,
//! imports in a body, nested definitions, captured blocks) falls back to its
//! collapsed unparse, or to [`STMT_PLACEHOLDER`] when even that fails.
//! A statement either encodes fully or degrades whole; no partial fragments.

use loir_parser::{collapse_ws, unparse_stmt, Stmt};

use super::expr::render_expr;

/// Emitted for a statement that cannot be rendered at all.
pub const STMT_PLACEHOLDER: &str = "s";

/// Encode one statement into its LOIR fragment.
pub fn encode_stmt(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Assign { targets, value } => {
            let targets = targets
                .iter()
                .map(render_expr)
                .collect::<Vec<_>>()
                .join(",");
            format!("A{targets}={}", render_expr(value))
        }
        Stmt::Return(value) => {
            format!("R{}", value.as_ref().map(render_expr).unwrap_or_default())
        }
        Stmt::If { test, body, orelse } => {
            format!(
                "I{}{{{}}}:E{}",
                render_expr(test),
                encode_body(body),
                encode_body(orelse)
            )
        }
        Stmt::For {
            target, iter, body, ..
        } => {
            format!(
                "F{}in{}{{{}}}",
                render_expr(target),
                render_expr(iter),
                encode_body(body)
            )
        }
        Stmt::While { test, body, .. } => {
            format!("W{}{{{}}}", render_expr(test), encode_body(body))
        }
        fallback => match unparse_stmt(fallback) {
            Ok(text) => collapse_ws(&text),
            Err(_) => STMT_PLACEHOLDER.to_string(),
        },
    }
}

/// Encode a statement run, `|`-joined.
pub fn encode_body(body: &[Stmt]) -> String {
    body.iter().map(encode_stmt).collect::<Vec<_>>().join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use loir_parser::Expr;

    #[test]
    fn test_assignment() {
        let stmt = Stmt::Assign {
            targets: vec![Expr::new("x")],
            value: Expr::new("y + 1"),
        };
        assert_eq!(encode_stmt(&stmt), "Ax=y+1");
    }

    #[test]
    fn test_multi_target_assignment() {
        let stmt = Stmt::Assign {
            targets: vec![Expr::new("a"), Expr::new("b")],
            value: Expr::new("0"),
        };
        assert_eq!(encode_stmt(&stmt), "Aa,b=0");
    }

    #[test]
    fn test_bare_return() {
        assert_eq!(encode_stmt(&Stmt::Return(None)), "R");
    }

    #[test]
    fn test_conditional_keeps_else_marker_when_empty() {
        let stmt = Stmt::If {
            test: Expr::new("x"),
            body: vec![Stmt::Return(Some(Expr::new("1")))],
            orelse: vec![],
        };
        assert_eq!(encode_stmt(&stmt), "Ix{R1}:E");
    }

    #[test]
    fn test_conditional_with_else() {
        let stmt = Stmt::If {
            test: Expr::new("x"),
            body: vec![Stmt::Return(Some(Expr::new("1")))],
            orelse: vec![Stmt::Return(Some(Expr::new("2")))],
        };
        assert_eq!(encode_stmt(&stmt), "Ix{R1}:ER2");
    }

    #[test]
    fn test_while_loop() {
        let stmt = Stmt::While {
            test: Expr::new("x > 0"),
            body: vec![Stmt::Other("pass".to_string())],
            orelse: vec![],
        };
        assert_eq!(encode_stmt(&stmt), "Wx>0{pass}");
    }

    #[test]
    fn test_for_loop_ignores_loop_else() {
        let stmt = Stmt::For {
            target: Expr::new("i"),
            iter: Expr::new("range(3)"),
            body: vec![Stmt::Other("pass".to_string())],
            orelse: vec![Stmt::Other("pass".to_string())],
        };
        assert_eq!(encode_stmt(&stmt), "Fiinrange(3){pass}");
    }

    #[test]
    fn test_fallback_statement_collapses() {
        assert_eq!(encode_stmt(&Stmt::Other("raise ValueError ( 'x y' )".to_string())), "raiseValueError('xy')");
    }

    #[test]
    fn test_unrenderable_statement_degrades_whole() {
        assert_eq!(encode_stmt(&Stmt::Other("   ".to_string())), STMT_PLACEHOLDER);
    }

    #[test]
    fn test_brace_nesting_mirrors_source_nesting() {
        let stmt = Stmt::While {
            test: Expr::new("a"),
            body: vec![Stmt::If {
                test: Expr::new("b"),
                body: vec![Stmt::Return(None)],
                orelse: vec![],
            }],
            orelse: vec![],
        };
        assert_eq!(encode_stmt(&stmt), "Wa{Ib{R}:E}");
    }
}
