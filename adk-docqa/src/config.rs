//! Configuration for the document QA components.

use serde::{Deserialize, Serialize};

use crate::error::{DocQaError, Result};

/// Tunable parameters for summarization, question generation, answer
/// evaluation, and justified answering.
///
/// Defaults reproduce the documented behavior; deserializing a partial JSON
/// object fills the rest from [`Default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DocQaConfig {
    /// Words per chunk when splitting for length-limited models.
    pub chunk_max_words: usize,

    /// Leading chunks summarized independently before the reduce pass.
    pub summary_max_chunks: usize,
    /// Minimum tokens per summarization call.
    pub summary_min_tokens: u32,
    /// Maximum tokens per summarization call.
    pub summary_max_tokens: u32,

    /// Questions requested per generation batch.
    pub question_count: usize,
    /// Attempt budget per requested question.
    pub attempts_per_question: usize,
    /// Characters of source text sampled as context for each attempt.
    pub sample_window_chars: usize,
    pub question_max_new_tokens: u32,
    pub question_temperature: f32,
    pub question_top_k: u32,
    /// Candidates with fewer words are rejected.
    pub min_question_words: usize,
    /// Candidates whose similarity to an accepted question exceeds this are rejected.
    pub duplicate_threshold: f32,

    /// Leading characters of the document used to ground reference answers.
    pub evaluation_context_chars: usize,
    pub reference_max_new_tokens: u32,

    /// Sentences shorter than this (after trimming) are ignored.
    pub min_sentence_chars: usize,
    /// Top-ranked sentences joined into the answering context.
    pub context_sentences: usize,
    pub answer_max_new_tokens: u32,
}

impl Default for DocQaConfig {
    fn default() -> Self {
        Self {
            chunk_max_words: 500,
            summary_max_chunks: 3,
            summary_min_tokens: 60,
            summary_max_tokens: 150,
            question_count: 3,
            attempts_per_question: 15,
            sample_window_chars: 1500,
            question_max_new_tokens: 80,
            question_temperature: 0.85,
            question_top_k: 40,
            min_question_words: 6,
            duplicate_threshold: 0.75,
            evaluation_context_chars: 4000,
            reference_max_new_tokens: 150,
            min_sentence_chars: 11,
            context_sentences: 3,
            answer_max_new_tokens: 128,
        }
    }
}

impl DocQaConfig {
    /// Create a new builder for constructing a [`DocQaConfig`].
    pub fn builder() -> DocQaConfigBuilder {
        DocQaConfigBuilder::default()
    }

    /// Total generation attempts allowed for a batch of `count` questions.
    pub fn attempt_budget(&self, count: usize) -> usize {
        count.saturating_mul(self.attempts_per_question)
    }

    /// Check that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`DocQaError::ConfigError`] describing the first violated rule.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(DocQaError::ConfigError(msg));
        if self.chunk_max_words == 0 {
            return fail("chunk_max_words must be greater than zero".to_string());
        }
        if self.summary_max_chunks == 0 {
            return fail("summary_max_chunks must be greater than zero".to_string());
        }
        if self.summary_min_tokens > self.summary_max_tokens {
            return fail(format!(
                "summary_min_tokens ({}) must not exceed summary_max_tokens ({})",
                self.summary_min_tokens, self.summary_max_tokens
            ));
        }
        if self.question_count == 0 {
            return fail("question_count must be greater than zero".to_string());
        }
        if self.attempts_per_question == 0 {
            return fail("attempts_per_question must be greater than zero".to_string());
        }
        if self.sample_window_chars == 0 {
            return fail("sample_window_chars must be greater than zero".to_string());
        }
        if !(-1.0..=1.0).contains(&self.duplicate_threshold) {
            return fail(format!(
                "duplicate_threshold ({}) must be within [-1, 1]",
                self.duplicate_threshold
            ));
        }
        if self.context_sentences == 0 {
            return fail("context_sentences must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Builder for constructing a validated [`DocQaConfig`].
#[derive(Debug, Clone, Default)]
pub struct DocQaConfigBuilder {
    config: DocQaConfig,
}

impl DocQaConfigBuilder {
    /// Set the number of words per chunk.
    pub fn chunk_max_words(mut self, words: usize) -> Self {
        self.config.chunk_max_words = words;
        self
    }

    /// Set how many leading chunks are summarized.
    pub fn summary_max_chunks(mut self, chunks: usize) -> Self {
        self.config.summary_max_chunks = chunks;
        self
    }

    /// Set the token bounds for each summarization call.
    pub fn summary_tokens(mut self, min: u32, max: u32) -> Self {
        self.config.summary_min_tokens = min;
        self.config.summary_max_tokens = max;
        self
    }

    /// Set the default number of questions per batch.
    pub fn question_count(mut self, count: usize) -> Self {
        self.config.question_count = count;
        self
    }

    /// Set the attempt budget per requested question.
    pub fn attempts_per_question(mut self, attempts: usize) -> Self {
        self.config.attempts_per_question = attempts;
        self
    }

    /// Set the sampled context window in characters.
    pub fn sample_window_chars(mut self, chars: usize) -> Self {
        self.config.sample_window_chars = chars;
        self
    }

    /// Set the sampling parameters used for question generation.
    pub fn question_sampling(mut self, temperature: f32, top_k: u32) -> Self {
        self.config.question_temperature = temperature;
        self.config.question_top_k = top_k;
        self
    }

    /// Set the minimum word count for a candidate question.
    pub fn min_question_words(mut self, words: usize) -> Self {
        self.config.min_question_words = words;
        self
    }

    /// Set the similarity above which a candidate counts as a duplicate.
    pub fn duplicate_threshold(mut self, threshold: f32) -> Self {
        self.config.duplicate_threshold = threshold;
        self
    }

    /// Set the grounding context length for reference answers.
    pub fn evaluation_context_chars(mut self, chars: usize) -> Self {
        self.config.evaluation_context_chars = chars;
        self
    }

    /// Set the minimum sentence length considered for justification.
    pub fn min_sentence_chars(mut self, chars: usize) -> Self {
        self.config.min_sentence_chars = chars;
        self
    }

    /// Set how many top sentences form the answering context.
    pub fn context_sentences(mut self, sentences: usize) -> Self {
        self.config.context_sentences = sentences;
        self
    }

    /// Build the [`DocQaConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`DocQaError::ConfigError`] if validation fails; see
    /// [`DocQaConfig::validate`].
    pub fn build(self) -> Result<DocQaConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
