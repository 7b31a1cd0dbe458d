//! Question answering with a single-sentence justification.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::chunking::split_sentences;
use crate::config::DocQaConfig;
use crate::document::{Justification, QaResponse};
use crate::embedding::EmbeddingProvider;
use crate::generation::{GenerationParams, GenerativeService};
use crate::prompt::{ANSWER_APOLOGY, grounded_answer_prompt};

/// A document sentence with its similarity to the question.
#[derive(Debug, Clone)]
struct ScoredSentence<'a> {
    index: usize,
    text: &'a str,
    score: f32,
}

/// Answers free-text questions from the sentences most similar to them.
///
/// Sentences come from splitting the document on `". "`. The top
/// `context_sentences` by similarity (not document order) form the context,
/// and the single best one is reported as the justification.
pub struct JustifiedResponder {
    generator: Arc<dyn GenerativeService>,
    embedder: Arc<dyn EmbeddingProvider>,
    min_sentence_chars: usize,
    context_sentences: usize,
    params: GenerationParams,
}

impl JustifiedResponder {
    pub fn new(
        generator: Arc<dyn GenerativeService>,
        embedder: Arc<dyn EmbeddingProvider>,
        config: &DocQaConfig,
    ) -> Self {
        Self {
            generator,
            embedder,
            min_sentence_chars: config.min_sentence_chars,
            context_sentences: config.context_sentences,
            params: GenerationParams::greedy(config.answer_max_new_tokens),
        }
    }

    /// Answer `question` using only sentences from `text`.
    ///
    /// A generation failure yields [`ANSWER_APOLOGY`]. Sentences whose
    /// embedding fails rank last. If no sentence is long enough, the response
    /// has no source and its justification is the (empty) context.
    pub async fn ask(&self, question: &str, text: &str) -> QaResponse {
        let ranked = self.rank(question, text).await;

        let context = ranked
            .iter()
            .take(self.context_sentences)
            .map(|s| s.text)
            .collect::<Vec<_>>()
            .join(". ");
        let source = ranked
            .first()
            .map(|s| Justification { line: s.index + 1, sentence: s.text.to_string() });

        let prompt = grounded_answer_prompt(question, &context);
        let answer = match self.generator.generate(&prompt, &self.params).await {
            Ok(answer) => answer.trim().to_string(),
            Err(e) => {
                warn!(provider = self.generator.name(), error = %e, "answer generation failed");
                ANSWER_APOLOGY.to_string()
            }
        };

        debug!(
            candidates = ranked.len(),
            line = source.as_ref().map(|s| s.line),
            "answered question"
        );
        QaResponse { answer, source, context }
    }

    /// Score every qualifying sentence and sort by descending similarity.
    ///
    /// The sort is stable, so ties keep document order. NaN similarities
    /// rank last, alongside sentences that failed to embed.
    async fn rank<'a>(&self, question: &str, text: &'a str) -> Vec<ScoredSentence<'a>> {
        let sentences = split_sentences(text, self.min_sentence_chars);
        if sentences.is_empty() {
            return Vec::new();
        }

        let query = match self.embedder.embed(question).await {
            Ok(embedding) => Some(embedding),
            Err(e) => {
                warn!(error = %e, "embedding question failed; keeping document order");
                None
            }
        };

        let mut scored = Vec::with_capacity(sentences.len());
        for sentence in sentences {
            let score = match &query {
                Some(query) => match self.embedder.embed(sentence.text).await {
                    Ok(embedding) => {
                        let score = self.embedder.similarity(query, &embedding);
                        if score.is_nan() {
                            f32::NEG_INFINITY
                        } else {
                            score
                        }
                    }
                    Err(e) => {
                        warn!(line = sentence.index + 1, error = %e, "embedding sentence failed");
                        f32::NEG_INFINITY
                    }
                },
                None => f32::NEG_INFINITY,
            };
            scored.push(ScoredSentence { index: sentence.index, text: sentence.text, score });
        }

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }
}
