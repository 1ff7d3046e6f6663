//! Bottom-up LOIR renderers
//!
//! One module per layer, leaves first: expressions, statements,
//! declarations, and the module assembler. Each layer only ever calls
//! downward, and every renderer is a pure function from node to string.

mod decl;
mod expr;
mod module;
mod stmt;

pub use decl::{encode_class, encode_function, encode_imports};
pub use expr::{render_expr, EXPR_PLACEHOLDER};
pub use module::assemble;
pub use stmt::{encode_body, encode_stmt, STMT_PLACEHOLDER};
