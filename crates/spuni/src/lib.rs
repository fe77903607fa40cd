//! Token-by-token autoregressive text generation.
//!
//! This crate owns the decoding-strategy family (greedy, random, top-k,
//! nucleus, and top-k followed by nucleus) and the generation loop that
//! drives a next-token predictor one step at a time. The model forward pass
//! and the tokenizer are collaborator seams ([`traits::DecoderModel`],
//! [`traits::Tokenizer`]); bring your own implementations, or wrap a
//! HuggingFace tokenizer with [`tokenizer::HfTokenizer`].

pub mod activations;
pub mod common;
pub mod generator;
pub mod tokenizer;
pub mod traits;

pub use common::{ConfigError, DecodingStrategy, GenerationConfig};
pub use generator::{GenerationOutput, Generator};
pub use tokenizer::HfTokenizer;
pub use traits::{DecoderModel, Tokenizer};

// Prelude for easy imports
pub mod prelude {
    pub use crate::common::{ConfigError, DecodingStrategy, GenerationConfig};
    pub use crate::generator::{GenerationOutput, Generator};
    pub use crate::traits::{DecoderModel, Tokenizer};
}
