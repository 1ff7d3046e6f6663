//! # loir-parser
//!
//! A parser for the Python subset that the LOIR encoder understands.
//!
//! The crate turns source text into a small, closed AST and back:
//!
//! - [`lexing`] tokenizes the whole source with logos and folds the token
//!   stream into logical lines (bracket and backslash continuations joined,
//!   blank and comment-only lines dropped, indentation measured).
//! - [`parser`] runs recursive descent over the logical lines, driven by the
//!   indentation discipline, and produces a [`Module`](ast::Module).
//! - [`unparse`] renders nodes back to canonical source-like text. The output
//!   is only ever consumed after whitespace collapsing, so the unparser is
//!   free to pick any spacing it likes.
//! - [`dump`] serializes a module into an attribute-free shape string used to
//!   compare two programs structurally.
//!
//! Statements the grammar does not model (try, with, decorators, augmented
//! assignment, ...) are captured verbatim as [`Stmt::Other`](ast::Stmt) so a
//! later encoding pass can degrade gracefully instead of failing the parse.

pub mod ast;
pub mod dump;
pub mod error;
pub mod lexing;
pub mod parser;
pub mod unparse;

pub use ast::{Alias, ClassDef, Expr, FunctionDef, Module, Stmt};
pub use dump::dump;
pub use error::{ParseError, UnparseError};
pub use parser::parse_module;
pub use unparse::{collapse_ws, unparse_expr, unparse_stmt};
