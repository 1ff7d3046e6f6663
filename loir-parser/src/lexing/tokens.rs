//! Token definitions for the Python subset
//!
//! The tokens are defined using the logos derive macro. Keyword tokens exist
//! only for the words the parser dispatches on; every other word is a `Name`
//! and is carried through opaque expression spans untouched.

use logos::Logos;

/// All tokens the lexer can produce.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // String literals, with optional prefix letters (r, b, u, f and pairs).
    // Triple-quoted strings may span physical lines; they stay one token so
    // bracket depth and line assembly never look inside them.
    #[regex(r#"[rRbBuUfF]{0,2}"""([^"]|"[^"]|""[^"])*""""#)]
    #[regex(r"[rRbBuUfF]{0,2}'''([^']|'[^']|''[^'])*'''")]
    #[regex(r#"[rRbBuUfF]{0,2}"([^"\\\n]|\\[\s\S])*""#)]
    #[regex(r"[rRbBuUfF]{0,2}'([^'\\\n]|\\[\s\S])*'")]
    Str,

    #[regex(r"#[^\n]*")]
    Comment,

    // Keywords the parser dispatches on
    #[token("def")]
    Def,
    #[token("class")]
    Class,
    #[token("import")]
    Import,
    #[token("from")]
    From,
    #[token("as")]
    As,
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("return")]
    Return,
    #[token("in")]
    In,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,

    #[regex(r"0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+")]
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9]+)?[jJ]?")]
    Number,

    // Brackets drive implicit line continuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("=")]
    Eq,
    #[token(".")]
    Dot,
    #[token("@")]
    At,

    // Multi-character operators first so `==` never splits into `=` `=`,
    // then the single-character operator class.
    #[regex(r"\*\*=|//=|>>=|<<=|==|!=|<=|>=|:=|->|\+=|-=|\*=|/=|%=|&=|\|=|\^=|@=|\*\*|//|<<|>>|[+\-*/%&|^~<>!]")]
    Op,

    #[regex(r"\\\r?\n")]
    LineCont,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"[ \t\x0c]+")]
    Ws,
}

impl Token {
    /// Opening bracket: increases continuation depth.
    pub fn is_open(&self) -> bool {
        matches!(self, Token::LParen | Token::LBracket | Token::LBrace)
    }

    /// Closing bracket: decreases continuation depth.
    pub fn is_close(&self) -> bool {
        matches!(self, Token::RParen | Token::RBracket | Token::RBrace)
    }
}

/// Tokenize the whole source, spans included. Unlexable characters come out
/// as `Err(())` entries; [`super::lines::logical_lines`] turns those into
/// parse errors with line information.
pub fn tokenize(source: &str) -> Vec<(Result<Token, ()>, std::ops::Range<usize>)> {
    let mut lexer = Token::lexer(source);
    let mut out = Vec::new();
    while let Some(res) = lexer.next() {
        out.push((res, lexer.span()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .into_iter()
            .map(|(t, _)| t.expect("unexpected lex error"))
            .collect()
    }

    #[test]
    fn test_keywords_beat_names() {
        assert_eq!(kinds("def"), vec![Token::Def]);
        assert_eq!(kinds("define"), vec![Token::Name]);
        assert_eq!(kinds("in"), vec![Token::In]);
        assert_eq!(kinds("int"), vec![Token::Name]);
    }

    #[test]
    fn test_operators_longest_match() {
        assert_eq!(kinds("=="), vec![Token::Op]);
        assert_eq!(kinds("="), vec![Token::Eq]);
        assert_eq!(kinds("+="), vec![Token::Op]);
        assert_eq!(kinds(":="), vec![Token::Op]);
        assert_eq!(kinds(":"), vec![Token::Colon]);
        assert_eq!(kinds("**"), vec![Token::Op]);
    }

    #[test]
    fn test_strings_are_single_tokens() {
        assert_eq!(kinds("'a b c'"), vec![Token::Str]);
        assert_eq!(kinds(r#"f"x {y}""#), vec![Token::Str]);
        assert_eq!(kinds("'''a\nb'''"), vec![Token::Str]);
    }

    #[test]
    fn test_comment_swallows_rest_of_line() {
        assert_eq!(
            kinds("x # y = 1\n"),
            vec![Token::Name, Token::Ws, Token::Comment, Token::Newline]
        );
    }

    #[test]
    fn test_backslash_continuation_token() {
        assert_eq!(
            kinds("x \\\ny"),
            vec![Token::Name, Token::Ws, Token::LineCont, Token::Name]
        );
    }

    #[test]
    fn test_unlexable_character_is_error() {
        let toks = tokenize("x = $");
        assert!(toks.iter().any(|(t, _)| t.is_err()));
    }
}
