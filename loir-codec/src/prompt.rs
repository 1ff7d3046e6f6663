//! Reconstruction prompt
//!
//! The fixed prompt handed to the reconstruction service: the compact LOIR
//! plus a human-readable legend of the tag grammar. Keeping the template
//! here, next to the grammar it describes, means the client crate stays
//! transport-only.

/// Human-readable legend of the compact tag grammar.
pub const LEGEND: &str = "M:module; I:imports(i: for imp:, f: for frm:); C:classes; \
F:functions; A:assignment; R:return; i:if; e:else; f:for; w:while; \
'|' separates statements; All parentheses, braces, commas are removed.";

/// Build the reconstruction prompt for a compact LOIR document.
pub fn recreate_prompt(loir: &str) -> String {
    format!(
        "Recreate the original Python code from the following ultra-aggressively \
compressed LOIR:\n\n{loir}\n\nLegend: {LEGEND}\n\nReconstruct full Python code \
with proper formatting."
    )
}
