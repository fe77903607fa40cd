//! Autoregressive generation loop for decoder-only models.

use crate::activations::softmax_1d_inplace;
use crate::common::{block_repeated_ngrams, penalize_repeats, sample_token, GenerationConfig};
use crate::traits::{DecoderModel, Tokenizer};
use anyhow::{anyhow, Result};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Outcome of a single [`Generator::generate_full`] call.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Decoded prompt plus continuation.
    pub text: String,
    /// Full token record: prompt plus every generated token, EOS excluded.
    pub tokens: Vec<u32>,
    /// Number of model invocations performed.
    pub steps: usize,
    /// Whether the context clamp fired at least once during this call.
    pub context_clamped: bool,
}

/// Orchestrates token-by-token generation.
///
/// Owns the model and tokenizer collaborators. All per-call state (token
/// record, step counter, clamp-warning flag, RNG) lives inside a single
/// `generate_full` invocation and is discarded at return, so concurrent
/// calls on one `Generator` share nothing mutable.
pub struct Generator {
    model: Box<dyn DecoderModel>,
    tokenizer: Box<dyn Tokenizer>,
}

impl Generator {
    pub fn new(model: Box<dyn DecoderModel>, tokenizer: Box<dyn Tokenizer>) -> Self {
        Self { model, tokenizer }
    }

    /// Generate a continuation of `prompt` and return the decoded text.
    pub fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        Ok(self.generate_full(prompt, config)?.text)
    }

    /// Generate a continuation of `prompt`, reporting the token record and
    /// loop statistics alongside the decoded text.
    ///
    /// Terminates on the end-of-sequence token (not appended to the record)
    /// or after `max_new_tokens` steps; both are normal returns. The full
    /// record is never truncated: once it outgrows the model's context, the
    /// model is shown a suffix window and a warning is logged once per call.
    pub fn generate_full(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationOutput> {
        config.validate()?;
        debug!("starting generation for prompt: '{}'", prompt);

        let mut tokens = self.tokenizer.encode(prompt)?;
        let eos = self.tokenizer.eos_token_id();
        let context_limit = self.model.context_size();

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut steps = 0;
        let mut clamp_warned = false;

        for _ in 0..config.max_new_tokens {
            let view = if tokens.len() > context_limit {
                if !clamp_warned {
                    warn!(
                        "sequence length {} exceeds model context {}, clamping the model's view to the most recent tokens",
                        tokens.len(),
                        context_limit
                    );
                    clamp_warned = true;
                }
                &tokens[tokens.len() - context_limit..]
            } else {
                &tokens[..]
            };

            let logits = self.model.forward(view)?;
            steps += 1;
            let rows = logits.nrows();
            if rows == 0 {
                return Err(anyhow!("model returned no logit rows"));
            }
            let mut next_logits = logits.row(rows - 1).to_owned();

            if config.repetition_penalty != 1.0 {
                penalize_repeats(&mut next_logits, &tokens, config.repetition_penalty);
            }
            if config.no_repeat_ngram > 0 {
                block_repeated_ngrams(&mut next_logits, &tokens, config.no_repeat_ngram);
            }

            next_logits /= config.temperature;
            softmax_1d_inplace(&mut next_logits);

            let next = sample_token(next_logits, &config.strategy, &mut rng)?;
            if next == eos {
                debug!("eos token after {} steps", steps);
                break;
            }
            tokens.push(next);
        }

        let text = self.tokenizer.decode(&tokens)?;
        Ok(GenerationOutput {
            text,
            tokens,
            steps,
            context_clamped: clamp_warned,
        })
    }
}
