//! Token sampling over normalized probability vectors.
//!
//! Every strategy consumes a probability vector that is index-aligned with
//! the vocabulary and sums to 1, and returns exactly one vocabulary index.
//! Truncating strategies zero the suppressed entries and renormalize the
//! survivors before the final draw, so the vector handed to the categorical
//! draw always sums to 1 again.

use crate::common::DecodingStrategy;
use anyhow::Result;
use ndarray::Array1;
use rand::Rng;

/// Select the next token according to `strategy`.
///
/// `probs` must be non-negative and sum to 1 (the generation loop produces
/// it via softmax). The buffer is consumed; truncation stages scratch-mutate
/// it, so the transient un-normalized state never escapes to the caller.
pub fn sample_token<R: Rng>(
    mut probs: Array1<f32>,
    strategy: &DecodingStrategy,
    rng: &mut R,
) -> Result<u32> {
    strategy.validate()?;
    match *strategy {
        DecodingStrategy::Greedy => Ok(argmax(&probs)),
        DecodingStrategy::Random => Ok(sample_from_probs(&probs, rng)),
        DecodingStrategy::TopK { k } => {
            top_k_truncate(&mut probs, k);
            Ok(sample_from_probs(&probs, rng))
        }
        DecodingStrategy::TopP { p } => {
            top_p_truncate(&mut probs, p);
            Ok(sample_from_probs(&probs, rng))
        }
        DecodingStrategy::TopKTopP { k, p } => {
            top_k_truncate(&mut probs, k);
            top_p_truncate(&mut probs, p);
            Ok(sample_from_probs(&probs, rng))
        }
    }
}

/// First index attaining the maximum probability.
pub fn argmax(probs: &Array1<f32>) -> u32 {
    let mut best = 0usize;
    let mut best_prob = f32::NEG_INFINITY;
    for (idx, &prob) in probs.iter().enumerate() {
        if prob > best_prob {
            best = idx;
            best_prob = prob;
        }
    }
    best as u32
}

/// Weighted draw from a normalized distribution.
pub fn sample_from_probs<R: Rng>(probs: &Array1<f32>, rng: &mut R) -> u32 {
    let uniform: f32 = rng.gen();
    let mut cumulative = 0.0;
    for (idx, &prob) in probs.iter().enumerate() {
        cumulative += prob;
        if cumulative >= uniform {
            return idx as u32;
        }
    }
    // Rounding can leave the cumulative sum just short of the draw; fall
    // back to the last entry still carrying mass.
    let mut last = probs.len() - 1;
    for (idx, &prob) in probs.iter().enumerate() {
        if prob > 0.0 {
            last = idx;
        }
    }
    last as u32
}

/// Keep the `k` most probable entries, zero the rest, renormalize.
///
/// A `k` covering the whole vocabulary leaves the distribution untouched,
/// so sampling afterwards behaves like plain random sampling.
pub fn top_k_truncate(probs: &mut Array1<f32>, k: usize) {
    if k >= probs.len() {
        return;
    }
    let indices = sorted_indices_desc(probs);
    for &idx in &indices[k..] {
        probs[idx] = 0.0;
    }
    renormalize(probs);
}

/// Keep the smallest high-probability prefix whose cumulative mass exceeds
/// `p`, zero the rest, renormalize.
///
/// The most probable entry is always kept, even when its mass alone exceeds
/// `p`, so at least one candidate survives.
pub fn top_p_truncate(probs: &mut Array1<f32>, p: f32) {
    let indices = sorted_indices_desc(probs);
    let mut cumulative = 0.0;
    let mut kept = indices.len();
    for (i, &idx) in indices.iter().enumerate() {
        cumulative += probs[idx];
        if cumulative > p {
            kept = i + 1;
            break;
        }
    }
    for &idx in &indices[kept..] {
        probs[idx] = 0.0;
    }
    renormalize(probs);
}

/// Penalize logits of tokens already present in `tokens`: positive logits
/// are divided by `penalty`, negative ones multiplied, making either less
/// likely to be picked again.
pub fn penalize_repeats(logits: &mut Array1<f32>, tokens: &[u32], penalty: f32) {
    if penalty == 1.0 {
        return;
    }
    for &token in tokens {
        let idx = token as usize;
        if idx < logits.len() {
            let score = logits[idx];
            if score < 0.0 {
                logits[idx] = score * penalty;
            } else {
                logits[idx] = score / penalty;
            }
        }
    }
}

/// Ban any token that would complete an n-gram already present in `tokens`.
pub fn block_repeated_ngrams(logits: &mut Array1<f32>, tokens: &[u32], ngram_size: usize) {
    let n = ngram_size;
    if n < 2 || tokens.len() < n - 1 {
        return;
    }

    // The last n-1 tokens form the prefix the next token would extend.
    let current_prefix = &tokens[tokens.len() - (n - 1)..];

    for window in tokens.windows(n) {
        if &window[..n - 1] == current_prefix {
            let banned = window[n - 1] as usize;
            if banned < logits.len() {
                logits[banned] = f32::NEG_INFINITY;
            }
        }
    }
}

/// Indices sorted by probability descending. `sort_by` is stable, so ties
/// keep ascending index order.
fn sorted_indices_desc(probs: &Array1<f32>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..probs.len()).collect();
    indices.sort_by(|&a, &b| probs[b].partial_cmp(&probs[a]).unwrap());
    indices
}

fn renormalize(probs: &mut Array1<f32>) {
    let total = probs.sum();
    *probs /= total;
}
