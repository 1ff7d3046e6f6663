//! Token counting for the report
//!
//! Counts are reporting-only: they feed the compression percentage and the
//! reconstruction size lines, and never affect the encoding itself.

use tiktoken_rs::{cl100k_base, get_bpe_from_model, CoreBPE};

/// Token counter for a named model, falling back to the cl100k_base
/// encoding for models tiktoken does not know.
pub struct TokenCounter {
    bpe: CoreBPE,
}

impl TokenCounter {
    pub fn for_model(model: &str) -> Result<Self, String> {
        let bpe = get_bpe_from_model(model)
            .or_else(|_| cl100k_base())
            .map_err(|e| e.to_string())?;
        Ok(Self { bpe })
    }

    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}
