//! Adapter over the HuggingFace `tokenizers` crate.

use crate::traits::Tokenizer;
use anyhow::{anyhow, Result};

/// Wraps a [`tokenizers::Tokenizer`], resolving the end-of-sequence id once
/// at construction so a missing EOS token fails immediately rather than
/// mid-generation.
pub struct HfTokenizer {
    inner: tokenizers::Tokenizer,
    eos_id: u32,
}

impl HfTokenizer {
    /// `eos_token` must exist in the wrapped vocabulary.
    pub fn new(inner: tokenizers::Tokenizer, eos_token: &str) -> Result<Self> {
        let eos_id = inner
            .token_to_id(eos_token)
            .ok_or_else(|| anyhow!("tokenizer has no token '{}'", eos_token))?;
        Ok(Self { inner, eos_id })
    }
}

impl Tokenizer for HfTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        Ok(self
            .inner
            .encode(text, false)
            .map_err(|e| anyhow!(e))?
            .get_ids()
            .to_vec())
    }

    fn decode(&self, tokens: &[u32]) -> Result<String> {
        self.inner.decode(tokens, false).map_err(|e| anyhow!(e))
    }

    fn eos_token_id(&self) -> u32 {
        self.eos_id
    }
}
