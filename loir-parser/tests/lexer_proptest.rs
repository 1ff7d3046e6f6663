//! Property-based tests for the lexing pipeline
//!
//! The lexer and line assembler must be total over arbitrary input: any
//! string either lexes into logical lines or reports a clean error, and the
//! parser on top of them must never panic either.

use proptest::prelude::*;

use loir_parser::lexing::{logical_lines, tokenize};
use loir_parser::parse_module;

proptest! {
    #[test]
    fn tokenize_never_panics(source in "\\PC{0,200}") {
        let _ = tokenize(&source);
    }

    #[test]
    fn tokenize_spans_cover_source_in_order(source in "[a-z0-9 =:,().\\n]{0,200}") {
        let toks = tokenize(&source);
        let mut expected_start = 0;
        for (_, span) in toks {
            prop_assert_eq!(span.start, expected_start);
            expected_start = span.end;
        }
        prop_assert_eq!(expected_start, source.len());
    }

    #[test]
    fn logical_lines_never_panic(source in "\\PC{0,200}") {
        let _ = logical_lines(&source);
    }

    #[test]
    fn logical_lines_are_nonempty_and_ordered(source in "[a-z0-9 =:,().\\n]{0,200}") {
        if let Ok(lines) = logical_lines(&source) {
            let mut last_line = 0;
            for line in lines {
                prop_assert!(!line.toks.is_empty());
                prop_assert!(line.line > last_line);
                last_line = line.line;
            }
        }
    }

    #[test]
    fn parse_never_panics(source in "\\PC{0,200}") {
        let _ = parse_module(&source, "fuzz");
    }

    #[test]
    fn parse_of_simple_assignments_succeeds(
        names in proptest::collection::vec("[a-z][a-z0-9_]{0,8}", 1..8),
    ) {
        // The `v_` prefix keeps generated names clear of keywords.
        let source: String = names
            .iter()
            .enumerate()
            .map(|(i, n)| format!("v_{n} = {i}\n"))
            .collect();
        let module = parse_module(&source, "gen").expect("generated source must parse");
        prop_assert_eq!(module.body.len(), names.len());
    }
}
