//! Symbol compression
//!
//!     The raw document is already whitespace-free; this pass shortens the
//!     section tags, the import markers, and the statement markers, and
//!     strips the structural characters outright.
//!
//! Legacy mode
//!
//!     The historical behavior: an ordered list of literal substring
//!     replacements, each applied to the entire current string, every
//!     occurrence. Order is load-bearing and later rules do re-match text
//!     produced by earlier rules: `I=` becomes `I:` and is then re-hit by
//!     `I` → `i`, so the import and function section tags come out `i:` and
//!     `f:`, and capital `I`/`F`/`W` inside identifiers are rewritten too.
//!     Reproducing this cascade exactly is the point of the mode; callers
//!     that need bit-identical output with the historical encoder use it.
//!
//! Tokenizing mode
//!
//!     The same rule list applied in a single left-to-right pass with
//!     longest-match-first boundaries. Replacement text is emitted, never
//!     rescanned, so no rule can see another rule's output and section tags
//!     survive intact. Identity rules are dead weight in this mode and are
//!     skipped.

use serde::Deserialize;

/// The ordered replacement list. Order matters in legacy mode; pairs that
/// map to themselves are no-ops kept for completeness of the table.
const RULES: &[(&str, &str)] = &[
    ("M=", "M:"),
    ("I=", "I:"),
    ("C=", "C:"),
    ("F=", "F:"),
    ("imp:", "i:"),
    ("frm:", "f:"),
    ("assign", "A"),
    ("return", "R"),
    ("A", "A"),
    ("R", "R"),
    ("I", "i"),
    ("F", "f"),
    ("W", "w"),
    ("(", ""),
    (")", ""),
    ("{", ""),
    ("}", ""),
    (",", ""),
    (";", "|"),
    (":", ":"),
];

/// Which rewrite semantics to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompressMode {
    /// Sequential whole-string replacement, cascades included.
    #[default]
    Legacy,
    /// Single pass, longest match first, output never rescanned.
    Tokenizing,
}

impl CompressMode {
    /// Parse a mode name as it appears in config files and CLI flags.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "legacy" => Some(CompressMode::Legacy),
            "tokenizing" => Some(CompressMode::Tokenizing),
            _ => None,
        }
    }
}

/// Compress a raw LOIR document into the compact form.
pub fn compress(loir: &str, mode: CompressMode) -> String {
    match mode {
        CompressMode::Legacy => compress_legacy(loir),
        CompressMode::Tokenizing => compress_tokenizing(loir),
    }
}

fn compress_legacy(loir: &str) -> String {
    RULES
        .iter()
        .fold(loir.to_string(), |acc, &(pat, rep)| acc.replace(pat, rep))
}

fn compress_tokenizing(loir: &str) -> String {
    // Longest pattern first; ties keep table order.
    let mut rules: Vec<(&str, &str)> = RULES.iter().copied().filter(|(p, r)| p != r).collect();
    rules.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = String::with_capacity(loir.len());
    let mut rest = loir;
    'scan: while !rest.is_empty() {
        for &(pat, rep) in &rules {
            if let Some(tail) = rest.strip_prefix(pat) {
                out.push_str(rep);
                rest = tail;
                continue 'scan;
            }
        }
        let ch = rest.chars().next().expect("rest is non-empty");
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}
