//! Integration tests for the full encode → compress pipeline
//!
//! The kitchen-sink fixture exercises every section of the document and
//! every statement kind the grammar models; the snapshot assertions pin the
//! exact byte output of both compression modes.

use loir_codec::{assemble, compress, fingerprint, CompressMode};
use loir_parser::parse_module;

const KITCHEN_SINK: &str = r#"import os
from sys import argv as args

class Greeter(Base):
    def greet(self, name):
        if name:
            return 'hi ' + name
        else:
            return 'hi'

def run(xs):
    total = 0
    for x in xs:
        while x > 0:
            x = x - 1
            total = total + 1
    return total
"#;

fn raw_document() -> String {
    let module = parse_module(KITCHEN_SINK, "demo").expect("parse failed");
    assemble(&module)
}

#[test]
fn test_raw_document_snapshot() {
    insta::assert_snapshot!(
        raw_document(),
        @"M=demo;I=imp:os,frm:sysimp:argvasargs;C=Greeter(Base){greet(self,name){Iname{R'hi'+name}:ER'hi'}};F=run(xs){Atotal=0|Fxinxs{Wx>0{Ax=x-1|Atotal=total+1}}|Rtotal}"
    );
}

#[test]
fn test_legacy_compact_snapshot() {
    insta::assert_snapshot!(
        compress(&raw_document(), CompressMode::Legacy),
        @"M:demo|i:i:osf:sysi:argvasargs|C:GreeterBasegreetselfnameinameR'hi'+name:ER'hi'|f:runxsAtotal=0|fxinxswx>0Ax=x-1|Atotal=total+1|Rtotal"
    );
}

#[test]
fn test_tokenizing_compact_snapshot() {
    insta::assert_snapshot!(
        compress(&raw_document(), CompressMode::Tokenizing),
        @"M:demo|I:i:osf:sysi:argvasargs|C:GreeterBasegreetselfnameinameR'hi'+name:ER'hi'|F:runxsAtotal=0|fxinxswx>0Ax=x-1|Atotal=total+1|Rtotal"
    );
}

#[test]
fn test_encoding_is_deterministic() {
    let first = fingerprint(KITCHEN_SINK, "demo", CompressMode::Legacy).expect("encode failed");
    let second = fingerprint(KITCHEN_SINK, "demo", CompressMode::Legacy).expect("encode failed");
    assert_eq!(first, second);
}

#[test]
fn test_raw_document_splits_into_four_tagged_sections() {
    let doc = raw_document();
    let mut fields = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in doc.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth -= 1,
            ';' if depth == 0 => {
                fields.push(&doc[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&doc[start..]);

    assert_eq!(fields.len(), 4);
    assert!(fields[0].starts_with("M="));
    assert!(fields[1].starts_with("I="));
    assert!(fields[2].starts_with("C="));
    assert!(fields[3].starts_with("F="));
}

#[test]
fn test_braces_stay_balanced_and_never_dip_negative() {
    let doc = raw_document();
    let mut depth = 0i64;
    for ch in doc.chars() {
        match ch {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
        assert!(depth >= 0);
    }
    assert_eq!(depth, 0);
}

#[test]
fn test_compact_output_contains_no_whitespace() {
    for mode in [CompressMode::Legacy, CompressMode::Tokenizing] {
        let compact = fingerprint(KITCHEN_SINK, "demo", mode).expect("encode failed");
        assert!(!compact.contains(char::is_whitespace));
    }
}

#[test]
fn test_compact_output_shrinks_nontrivial_input() {
    let compact = fingerprint(KITCHEN_SINK, "demo", CompressMode::Legacy).expect("encode failed");
    assert!(compact.len() < KITCHEN_SINK.len());
}

#[test]
fn test_empty_module_fingerprints() {
    assert_eq!(
        fingerprint("pass\n", "empty", CompressMode::Legacy).expect("encode failed"),
        "M:empty|i:|C:|f:"
    );
    assert_eq!(
        fingerprint("pass\n", "empty", CompressMode::Tokenizing).expect("encode failed"),
        "M:empty|I:|C:|F:"
    );
}

#[test]
fn test_simple_function_lands_in_function_section() {
    let module = parse_module("def f(x):\n    return x\n", "m").expect("parse failed");
    assert_eq!(assemble(&module), "M=m;I=;C=;F=f(x){Rx}");
}

#[test]
fn test_parse_failure_propagates() {
    assert!(fingerprint("def broken(:\n", "bad", CompressMode::Legacy).is_err());
}

#[test]
fn test_unmodeled_statements_degrade_not_fail() {
    let source = "def f():\n    try:\n        g()\n    except Exception:\n        pass\n    return 1\n";
    let compact = fingerprint(source, "m", CompressMode::Legacy).expect("encode failed");
    assert!(compact.contains("try:"));
    assert!(compact.ends_with("R1"));
}
