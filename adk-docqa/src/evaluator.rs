//! Answer scoring against machine-generated reference answers.
//!
//! The score is the cosine similarity between the user's answer and a
//! reference answer produced from the leading part of the document. It
//! measures semantic proximity, not correctness: a wrong answer phrased like
//! the reference scores well, and the reference itself may be wrong.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::chunking::char_prefix;
use crate::config::DocQaConfig;
use crate::document::{AnswerRecord, UserAnswer};
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::generation::{GenerationParams, GenerativeService};
use crate::prompt::{REFERENCE_ERROR, reference_answer_prompt};

/// Round to three decimals and clamp to `[0, 1]`. NaN scores as 0.0.
pub fn round_score(score: f32) -> f32 {
    if score.is_nan() {
        return 0.0;
    }
    let rounded = ((score as f64) * 1000.0).round() / 1000.0;
    rounded.clamp(0.0, 1.0) as f32
}

pub struct AnswerEvaluator {
    generator: Arc<dyn GenerativeService>,
    embedder: Arc<dyn EmbeddingProvider>,
    context_chars: usize,
    params: GenerationParams,
}

impl AnswerEvaluator {
    pub fn new(
        generator: Arc<dyn GenerativeService>,
        embedder: Arc<dyn EmbeddingProvider>,
        config: &DocQaConfig,
    ) -> Self {
        Self {
            generator,
            embedder,
            context_chars: config.evaluation_context_chars,
            params: GenerationParams::greedy(config.reference_max_new_tokens),
        }
    }

    /// Score every answer, returning one record per input in the same order.
    ///
    /// Only the first `evaluation_context_chars` characters of `text` ground
    /// the reference answers. A generation failure yields [`REFERENCE_ERROR`]
    /// as the reference; an embedding failure yields a score of `0.0`.
    pub async fn evaluate(&self, answers: &[UserAnswer], text: &str) -> Vec<AnswerRecord> {
        let context = char_prefix(text, self.context_chars);
        let mut records = Vec::with_capacity(answers.len());

        for (index, answer) in answers.iter().enumerate() {
            let prompt = reference_answer_prompt(context, &answer.question);
            let reference = match self.generator.generate(&prompt, &self.params).await {
                Ok(reference) => reference.trim().to_string(),
                Err(e) => {
                    warn!(
                        index,
                        provider = self.generator.name(),
                        error = %e,
                        "reference answer generation failed"
                    );
                    REFERENCE_ERROR.to_string()
                }
            };

            let score = match self.similarity(&answer.answer, &reference).await {
                Ok(score) => round_score(score),
                Err(e) => {
                    warn!(index, error = %e, "embedding answers failed; scoring 0.0");
                    0.0
                }
            };
            debug!(index, score, "evaluated answer");

            records.push(AnswerRecord {
                question: answer.question.clone(),
                user_answer: answer.answer.clone(),
                reference_answer: reference,
                score,
            });
        }

        records
    }

    async fn similarity(&self, user_answer: &str, reference: &str) -> Result<f32> {
        let user = self.embedder.embed(user_answer).await?;
        let reference = self.embedder.embed(reference).await?;
        Ok(self.embedder.similarity(&user, &reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_round_to_three_decimals() {
        assert_eq!(round_score(0.123_456), 0.123);
        assert_eq!(round_score(0.999_6), 1.0);
        assert_eq!(round_score(0.000_4), 0.0);
    }

    #[test]
    fn negative_scores_clamp_to_zero() {
        assert_eq!(round_score(-0.42), 0.0);
        assert_eq!(round_score(1.0000001), 1.0);
    }

    #[test]
    fn nan_scores_zero() {
        assert_eq!(round_score(f32::NAN), 0.0);
        assert_eq!(round_score(f32::INFINITY), 1.0);
        assert_eq!(round_score(f32::NEG_INFINITY), 0.0);
    }
}
