//! Document assistant façade.
//!
//! The [`DocumentAssistant`] wires one [`GenerativeService`] and one
//! [`EmbeddingProvider`] into the summarizer, question generator, answer
//! evaluator, and justified responder so callers hold a single handle.
//!
//! # Example
//!
//! ```rust,ignore
//! use adk_docqa::{DocQaConfig, DocumentAssistant};
//!
//! let assistant = DocumentAssistant::builder()
//!     .config(DocQaConfig::default())
//!     .generator(Arc::new(my_generator))
//!     .embedder(Arc::new(my_embedder))
//!     .build()?;
//!
//! let summary = assistant.summarize(&document.text).await;
//! let response = assistant.ask("What is the main finding?", &document.text).await;
//! println!("{}\n{}", response.answer, response.justification());
//! ```

use std::sync::Arc;

use tracing::info;

use crate::config::DocQaConfig;
use crate::document::{AnswerRecord, QaResponse, Question, UserAnswer};
use crate::embedding::EmbeddingProvider;
use crate::error::{DocQaError, Result};
use crate::evaluator::AnswerEvaluator;
use crate::generation::GenerativeService;
use crate::questions::QuestionGenerator;
use crate::responder::JustifiedResponder;
use crate::summarizer::Summarizer;

/// Summarization, quizzing, and question answering over one model pair.
///
/// Construct one via [`DocumentAssistant::builder()`]. All operations are
/// sequential: each model call completes before the next one starts.
pub struct DocumentAssistant {
    config: DocQaConfig,
    summarizer: Summarizer,
    questions: QuestionGenerator,
    evaluator: AnswerEvaluator,
    responder: JustifiedResponder,
}

impl DocumentAssistant {
    /// Create a new [`DocumentAssistantBuilder`].
    pub fn builder() -> DocumentAssistantBuilder {
        DocumentAssistantBuilder::default()
    }

    /// Return a reference to the configuration.
    pub fn config(&self) -> &DocQaConfig {
        &self.config
    }

    /// Summarize `text`; see [`Summarizer::summarize`].
    pub async fn summarize(&self, text: &str) -> String {
        self.summarizer.summarize(text).await
    }

    /// Generate the configured number of questions with a fresh random source.
    pub async fn generate_questions(&self, text: &str) -> Vec<Question> {
        let mut rng = fastrand::Rng::new();
        self.generate_questions_with(text, self.config.question_count, &mut rng).await
    }

    /// Generate up to `count` questions using the given random source.
    pub async fn generate_questions_with(
        &self,
        text: &str,
        count: usize,
        rng: &mut fastrand::Rng,
    ) -> Vec<Question> {
        self.questions.generate(text, count, rng).await
    }

    /// Score user answers; see [`AnswerEvaluator::evaluate`].
    pub async fn evaluate_answers(&self, answers: &[UserAnswer], text: &str) -> Vec<AnswerRecord> {
        self.evaluator.evaluate(answers, text).await
    }

    /// Answer a question with a justification; see [`JustifiedResponder::ask`].
    pub async fn ask(&self, question: &str, text: &str) -> QaResponse {
        self.responder.ask(question, text).await
    }
}

/// Builder for constructing a [`DocumentAssistant`].
///
/// `generator` and `embedder` are required. `summary_generator` optionally
/// routes summarization to a dedicated model; it defaults to `generator`.
/// `config` defaults to [`DocQaConfig::default()`].
#[derive(Default)]
pub struct DocumentAssistantBuilder {
    config: Option<DocQaConfig>,
    generator: Option<Arc<dyn GenerativeService>>,
    summary_generator: Option<Arc<dyn GenerativeService>>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
}

impl DocumentAssistantBuilder {
    /// Set the configuration.
    pub fn config(mut self, config: DocQaConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the generative service used for questions, references, and answers.
    pub fn generator(mut self, generator: Arc<dyn GenerativeService>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Set a dedicated generative service for summarization.
    pub fn summary_generator(mut self, generator: Arc<dyn GenerativeService>) -> Self {
        self.summary_generator = Some(generator);
        self
    }

    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Build the [`DocumentAssistant`].
    ///
    /// # Errors
    ///
    /// Returns [`DocQaError::ConfigError`] if a required service is missing or
    /// the configuration is invalid.
    pub fn build(self) -> Result<DocumentAssistant> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let generator = self
            .generator
            .ok_or_else(|| DocQaError::ConfigError("generator is required".to_string()))?;
        let embedder = self
            .embedder
            .ok_or_else(|| DocQaError::ConfigError("embedder is required".to_string()))?;
        let summary_generator = self.summary_generator.unwrap_or_else(|| generator.clone());

        info!(
            generator = generator.name(),
            summary_generator = summary_generator.name(),
            dimensions = embedder.dimensions(),
            "built document assistant"
        );

        Ok(DocumentAssistant {
            summarizer: Summarizer::new(summary_generator, &config),
            questions: QuestionGenerator::new(generator.clone(), embedder.clone(), config.clone()),
            evaluator: AnswerEvaluator::new(generator.clone(), embedder.clone(), &config),
            responder: JustifiedResponder::new(generator, embedder, &config),
            config,
        })
    }
}
