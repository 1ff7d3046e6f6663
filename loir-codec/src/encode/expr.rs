//! Expression rendering
//!
//! An expression renders to its unparsed text with every whitespace
//! character removed, including whitespace inside string literals. A node
//! that cannot be rendered degrades to [`EXPR_PLACEHOLDER`]: the outline
//! loses the expression but the pipeline keeps going.

use loir_parser::{collapse_ws, unparse_expr, Expr};

/// Emitted for an expression that cannot be rendered.
pub const EXPR_PLACEHOLDER: &str = "E";

/// Canonical whitespace-free rendering of an expression.
pub fn render_expr(expr: &Expr) -> String {
    match unparse_expr(expr) {
        Ok(text) => collapse_ws(&text),
        Err(_) => EXPR_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_collapses_all_whitespace() {
        assert_eq!(render_expr(&Expr::new("a + b * ( c , d )")), "a+b*(c,d)");
    }

    #[test]
    fn test_render_collapses_inside_string_literals() {
        assert_eq!(render_expr(&Expr::new("'hi there' + x")), "'hithere'+x");
    }

    #[test]
    fn test_degenerate_expression_degrades_to_placeholder() {
        assert_eq!(render_expr(&Expr::new("")), EXPR_PLACEHOLDER);
    }
}
