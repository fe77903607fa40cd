pub mod sampling;

pub use sampling::*;

use thiserror::Error;

/// Errors produced by eager configuration validation.
///
/// These surface synchronously, before any model or tokenizer call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("top-k requires k >= 1, got {0}")]
    InvalidTopK(usize),

    #[error("top-p requires p in (0, 1], got {0}")]
    InvalidTopP(f32),

    #[error("temperature must be > 0, got {0}")]
    InvalidTemperature(f32),

    #[error("repetition penalty must be >= 1.0, got {0}")]
    InvalidRepetitionPenalty(f32),
}

/// The user-facing decoding algorithm and its specific parameters.
///
/// Each variant owns only its configuration and holds no cross-call state;
/// a single `sample` call is independent given the distribution passed in.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodingStrategy {
    /// Select the most likely token (argmax, first index wins on ties).
    Greedy,
    /// Draw from the full distribution, proportional to probability mass.
    Random,
    /// Restrict to the `k` most likely tokens, renormalize, then draw.
    TopK { k: usize },
    /// Restrict to the smallest high-probability prefix whose cumulative
    /// mass exceeds `p`, renormalize, then draw.
    TopP { p: f32 },
    /// Top-k truncation followed by nucleus truncation of the survivors.
    /// Order matters: the nucleus is computed over the renormalized top-k
    /// distribution, not the original one.
    TopKTopP { k: usize, p: f32 },
}

impl DecodingStrategy {
    /// Check the strategy's parameters.
    ///
    /// `k = 0` would suppress every token and divide by zero on
    /// renormalization, and `p` outside `(0, 1]` makes the nucleus either
    /// empty or meaningless, so both are rejected up front.
    ///
    /// ```
    /// use spuni::DecodingStrategy;
    ///
    /// assert!(DecodingStrategy::TopK { k: 0 }.validate().is_err());
    /// assert!(DecodingStrategy::TopP { p: 0.9 }.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            DecodingStrategy::Greedy | DecodingStrategy::Random => Ok(()),
            DecodingStrategy::TopK { k } => check_k(k),
            DecodingStrategy::TopP { p } => check_p(p),
            DecodingStrategy::TopKTopP { k, p } => {
                check_k(k)?;
                check_p(p)
            }
        }
    }
}

fn check_k(k: usize) -> Result<(), ConfigError> {
    if k < 1 {
        return Err(ConfigError::InvalidTopK(k));
    }
    Ok(())
}

fn check_p(p: f32) -> Result<(), ConfigError> {
    if p > 0.0 && p <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTopP(p))
    }
}

/// The main configuration struct for text generation.
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    /// Maximum number of generation steps. `0` returns the decoded prompt.
    pub max_new_tokens: usize,
    /// Logit divisor applied before softmax. Must be > 0; lower values
    /// sharpen the distribution, higher values flatten it.
    pub temperature: f32,
    /// Token selection policy.
    pub strategy: DecodingStrategy,
    /// Penalty applied to logits of already-generated tokens. 1.0 disables.
    pub repetition_penalty: f32,
    /// Ban tokens that would complete an n-gram already present in the
    /// record. 0 disables.
    pub no_repeat_ngram: usize,
    /// Seed for the per-call RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: 100,
            temperature: 1.0,
            strategy: DecodingStrategy::Greedy,
            repetition_penalty: 1.0,
            no_repeat_ngram: 0,
            seed: None,
        }
    }
}

impl GenerationConfig {
    /// Validate every parameter before any collaborator is invoked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.temperature > 0.0) {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }
        if self.repetition_penalty < 1.0 {
            return Err(ConfigError::InvalidRepetitionPenalty(
                self.repetition_penalty,
            ));
        }
        self.strategy.validate()
    }
}
