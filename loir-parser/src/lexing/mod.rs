//! Lexing pipeline for the Python subset
//!
//!     Two stages. [`tokens`] holds the logos token definitions and the raw
//!     `tokenize` pass over the whole source; string literals (including
//!     triple-quoted ones) and comments come out as single tokens, so the
//!     later stages never see their contents as structure.
//!
//!     [`lines`] folds the raw token stream into logical lines: newlines
//!     inside open brackets or after a backslash continuation do not end a
//!     line, blank and comment-only lines are dropped, and the leading
//!     whitespace of each logical line is measured into an indent width
//!     (a tab advances to the next multiple of eight, as the reference
//!     interpreter does).

pub mod lines;
pub mod tokens;

pub use lines::{logical_lines, LogicalLine, Tok};
pub use tokens::{tokenize, Token};
