//! Generative service trait and per-call generation parameters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How the generative service picks tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Sampling {
    /// Deterministic decoding (no sampling).
    Greedy,
    /// Temperature / top-k sampling. Output is not reproducible.
    Stochastic { temperature: f32, top_k: u32 },
}

/// Parameters for a single generation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Upper bound on generated tokens.
    pub max_new_tokens: u32,
    /// Lower bound on generated tokens, for backends that support it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_new_tokens: Option<u32>,
    pub sampling: Sampling,
}

impl GenerationParams {
    /// Deterministic generation bounded to `max_new_tokens`.
    pub fn greedy(max_new_tokens: u32) -> Self {
        Self { max_new_tokens, min_new_tokens: None, sampling: Sampling::Greedy }
    }

    /// Sampled generation bounded to `max_new_tokens`.
    pub fn sampled(max_new_tokens: u32, temperature: f32, top_k: u32) -> Self {
        Self {
            max_new_tokens,
            min_new_tokens: None,
            sampling: Sampling::Stochastic { temperature, top_k },
        }
    }

    /// Set a lower bound on generated tokens.
    pub fn with_min_new_tokens(mut self, min_new_tokens: u32) -> Self {
        self.min_new_tokens = Some(min_new_tokens);
        self
    }
}

/// A text-to-text generative model.
///
/// Each call is independent and stateless. Implementations report failures
/// (timeouts, model errors) as [`DocQaError::GenerationError`](crate::DocQaError::GenerationError);
/// callers in this crate substitute a fallback instead of propagating them.
///
/// # Example
///
/// ```rust,ignore
/// use adk_docqa::{GenerationParams, GenerativeService};
///
/// let text = service.generate("Summarize: ...", &GenerationParams::greedy(150)).await?;
/// ```
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;

    /// A short identifier for logs.
    fn name(&self) -> &str;
}
