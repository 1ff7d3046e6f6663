//! LOIR encoding and fidelity scoring
//!
//!     This crate turns a parsed module into its Lossy Outline Intermediate
//!     Representation: a compact, deterministic, deliberately lossy textual
//!     fingerprint of the program's declaration and control-flow skeleton.
//!
//! Architecture
//!
//!     - encode: the bottom-up renderers. Expressions render to collapsed
//!       text, statements to single-line fragments per the LOIR statement
//!       grammar, declarations to tagged fragments, and the assembler joins
//!       everything into the four-section raw document.
//!     - compress: the symbol compression pass over the raw document. Two
//!       modes: the legacy ordered substitution list (bit-compatible with the
//!       historical behavior, cascades included) and a single-pass tokenizing
//!       rewrite that cannot cascade.
//!     - score: the structural similarity scorer for reconstructions, built
//!       on canonical AST dumps and a character-level diff ratio.
//!     - prompt: the fixed reconstruction prompt with the tag legend.
//!
//!     Encoding never fails: node shapes the renderers do not recognize
//!     degrade to placeholders (`E` for expressions, `s` for statements)
//!     instead of propagating errors, so one odd statement cannot take down
//!     a whole file's fingerprint.
//!
//! The raw document grammar
//!
//!     M=<module>;I=<imports>;C=<classes>;F=<functions>
//!
//!     The four tagged sections always appear, in this order, even when
//!     empty. Imports and classes join with `,`, functions with `;`,
//!     statements inside a body with `|`, and every compound statement
//!     contributes exactly one balanced `{`/`}` pair. The assembled document
//!     contains no whitespace.

pub mod compress;
pub mod encode;
pub mod prompt;
pub mod score;

pub use compress::{compress, CompressMode};
pub use encode::{assemble, encode_body, encode_class, encode_function, encode_stmt, render_expr};
pub use prompt::recreate_prompt;
pub use score::{score, FidelityReport};

use loir_parser::error::ParseResult;

/// Parse a source text and produce its compact LOIR fingerprint.
pub fn fingerprint(source: &str, name: &str, mode: CompressMode) -> ParseResult<String> {
    let module = loir_parser::parse_module(source, name)?;
    Ok(compress(&assemble(&module), mode))
}
