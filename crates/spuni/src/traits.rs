//! Collaborator seams: the model and tokenizer the generation loop drives.
//!
//! The loop is agnostic to how logits are produced or how text maps to ids;
//! it only needs these two contracts. Collaborator failures propagate to the
//! caller unmodified, with no retry and no partial-result recovery.

use anyhow::Result;
use ndarray::Array2;

/// Next-token predictor for decoder-only generation.
pub trait DecoderModel: Send + Sync {
    /// Logits for each position of `tokens`, shape `(tokens.len(), vocab)`.
    /// The generation loop consumes only the last row, the prediction for
    /// the token immediately following the input.
    fn forward(&self, tokens: &[u32]) -> Result<Array2<f32>>;

    /// Maximum number of trailing tokens a single forward call accepts.
    fn context_size(&self) -> usize;

    /// Vocabulary size, the width of every logits row.
    fn vocab_size(&self) -> usize;
}

/// Text to token-id codec with a designated end-of-sequence id.
pub trait Tokenizer: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    fn decode(&self, tokens: &[u32]) -> Result<String>;

    /// The id whose generation signals the loop to stop.
    fn eos_token_id(&self) -> u32;
}
