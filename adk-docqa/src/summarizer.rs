//! Chunk-then-reduce summarization.
//!
//! Only the first `summary_max_chunks` word chunks are summarized, which bounds
//! model input regardless of document size. Text past those chunks never
//! reaches the model; this is a known coverage limit.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::chunking::WordChunker;
use crate::config::DocQaConfig;
use crate::generation::{GenerationParams, GenerativeService};
use crate::prompt::summary_prompt;

/// Summarizes a document in two passes: leading chunks independently, then the
/// concatenation of those partial summaries.
pub struct Summarizer {
    generator: Arc<dyn GenerativeService>,
    chunker: WordChunker,
    max_chunks: usize,
    params: GenerationParams,
}

impl Summarizer {
    /// Create a summarizer from the shared configuration.
    pub fn new(generator: Arc<dyn GenerativeService>, config: &DocQaConfig) -> Self {
        Self {
            generator,
            chunker: WordChunker::new(config.chunk_max_words),
            max_chunks: config.summary_max_chunks,
            params: GenerationParams::greedy(config.summary_max_tokens)
                .with_min_new_tokens(config.summary_min_tokens),
        }
    }

    /// Produce a single summary of `text`.
    ///
    /// Failed partial summaries are skipped. If the reduce pass fails, the
    /// joined partial summaries are returned instead. Blank text yields an
    /// empty summary without calling the model.
    pub async fn summarize(&self, text: &str) -> String {
        let chunks = self.chunker.chunk(text);
        if chunks.is_empty() {
            debug!("nothing to summarize");
            return String::new();
        }

        let mut partials = Vec::with_capacity(self.max_chunks.min(chunks.len()));
        for (index, chunk) in chunks.iter().take(self.max_chunks).enumerate() {
            match self.generator.generate(&summary_prompt(chunk), &self.params).await {
                Ok(summary) => partials.push(summary.trim().to_string()),
                Err(e) => {
                    warn!(
                        chunk = index,
                        provider = self.generator.name(),
                        error = %e,
                        "partial summary failed"
                    );
                }
            }
        }

        let combined = partials.join(" ");
        if combined.trim().is_empty() {
            warn!(chunk_count = chunks.len(), "no partial summaries produced");
            return String::new();
        }

        match self.generator.generate(&summary_prompt(&combined), &self.params).await {
            Ok(summary) => {
                info!(
                    chunk_count = chunks.len(),
                    summarized_chunks = partials.len(),
                    "summarized document"
                );
                summary.trim().to_string()
            }
            Err(e) => {
                warn!(
                    provider = self.generator.name(),
                    error = %e,
                    "final summary pass failed; returning partial summaries"
                );
                combined
            }
        }
    }
}
