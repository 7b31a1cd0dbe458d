//! Diversity-filtered question generation.
//!
//! Each attempt samples a random window of the document, asks the generative
//! service for one open-ended question, and keeps it only if it is well formed
//! and not too similar to questions already accepted in the same batch.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::chunking::char_window;
use crate::config::DocQaConfig;
use crate::document::Question;
use crate::embedding::EmbeddingProvider;
use crate::generation::{GenerationParams, GenerativeService};
use crate::prompt::{FALLBACK_QUESTION, FOCUS_HINTS, QUALITY_DIRECTIVES, question_prompt};

/// Why a candidate question was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Empty,
    TooShort,
    EchoedPrefix,
}

/// Generates a batch of mutually distinct open-ended questions about a document.
///
/// Guarantees for a call requesting `n` questions:
/// - at most `n × attempts_per_question` generation attempts are made
/// - no two returned questions have similarity above `duplicate_threshold`
/// - the result is never empty; if nothing was accepted it holds exactly
///   [`FALLBACK_QUESTION`]
pub struct QuestionGenerator {
    generator: Arc<dyn GenerativeService>,
    embedder: Arc<dyn EmbeddingProvider>,
    config: DocQaConfig,
}

impl QuestionGenerator {
    pub fn new(
        generator: Arc<dyn GenerativeService>,
        embedder: Arc<dyn EmbeddingProvider>,
        config: DocQaConfig,
    ) -> Self {
        Self { generator, embedder, config }
    }

    /// Generate up to `count` questions about `text`.
    ///
    /// `rng` drives the window offsets and hint/directive choice; seed it for
    /// reproducible prompts. Model output is still nondeterministic.
    pub async fn generate(
        &self,
        text: &str,
        count: usize,
        rng: &mut fastrand::Rng,
    ) -> Vec<Question> {
        let budget = self.config.attempt_budget(count);
        let params = GenerationParams::sampled(
            self.config.question_max_new_tokens,
            self.config.question_temperature,
            self.config.question_top_k,
        );
        let window = self.config.sample_window_chars;
        let max_start = text.chars().count().saturating_sub(window);

        let mut accepted: Vec<Question> = Vec::with_capacity(count);
        let mut attempts = 0;

        while accepted.len() < count && attempts < budget {
            attempts += 1;

            let start = rng.usize(0..=max_start);
            let context = char_window(text, start, window);
            let hint = FOCUS_HINTS[rng.usize(..FOCUS_HINTS.len())];
            let directive = QUALITY_DIRECTIVES[rng.usize(..QUALITY_DIRECTIVES.len())];
            let prompt = question_prompt(context, hint, directive);

            let candidate = match self.generator.generate(&prompt, &params).await {
                Ok(response) => response.trim().to_string(),
                Err(e) => {
                    warn!(
                        attempt = attempts,
                        provider = self.generator.name(),
                        error = %e,
                        "question generation failed"
                    );
                    continue;
                }
            };

            if let Some(reason) = self.reject(&candidate) {
                debug!(attempt = attempts, ?reason, "rejected candidate question");
                continue;
            }

            let embedding = match self.embedder.embed(&candidate).await {
                Ok(embedding) => embedding,
                Err(e) => {
                    warn!(attempt = attempts, error = %e, "embedding candidate question failed");
                    continue;
                }
            };
            if embedding.iter().any(|x| !x.is_finite()) {
                warn!(attempt = attempts, "candidate embedding is not finite");
                continue;
            }

            if self.is_duplicate(&embedding, &accepted) {
                debug!(attempt = attempts, "rejected near-duplicate question");
                continue;
            }

            accepted.push(Question { text: candidate, embedding: Some(embedding) });
        }

        if accepted.is_empty() {
            warn!(attempts, "no question accepted; using fallback");
            return vec![Question::plain(FALLBACK_QUESTION)];
        }

        info!(requested = count, accepted = accepted.len(), attempts, "generated questions");
        accepted
    }

    fn reject(&self, candidate: &str) -> Option<Rejection> {
        if candidate.is_empty() {
            return Some(Rejection::Empty);
        }
        if candidate.split_whitespace().count() < self.config.min_question_words {
            return Some(Rejection::TooShort);
        }
        if candidate.to_lowercase().starts_with("question:") {
            return Some(Rejection::EchoedPrefix);
        }
        None
    }

    fn is_duplicate(&self, embedding: &[f32], accepted: &[Question]) -> bool {
        accepted.iter().filter_map(|q| q.embedding.as_deref()).any(|seen| {
            let similarity = self.embedder.similarity(embedding, seen);
            similarity.is_nan() || similarity > self.config.duplicate_threshold
        })
    }
}
