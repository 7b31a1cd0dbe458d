//! # adk-docqa
//!
//! Document comprehension tools for ADK-Rust: summarize an uploaded document,
//! quiz the reader with generated open-ended questions and score their answers,
//! or answer direct questions with a justifying sentence.
//!
//! Model access goes through two injected services:
//!
//! - [`GenerativeService`] — prompt in, text out
//! - [`EmbeddingProvider`] — text in, vector out, plus cosine similarity
//!
//! Every model failure is absorbed by the component that made the call and
//! replaced with a documented fallback. Only structurally invalid input (an
//! unsupported file type, an unreadable file, a bad configuration) surfaces as
//! a [`DocQaError`].
//!
//! ## Scores are not grades
//!
//! [`AnswerRecord::score`] is the similarity between the user's answer and a
//! reference answer the model wrote from the first few thousand characters of
//! the document. It rewards answers that *sound like* the reference; it cannot
//! tell whether either is factually right.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use adk_docqa::{DocumentAssistant, Session, ollama::OllamaClient};
//!
//! let client = Arc::new(OllamaClient::from_env());
//! let assistant = DocumentAssistant::builder()
//!     .generator(client.clone())
//!     .embedder(client)
//!     .build()?;
//!
//! let mut session = Session::open("paper.pdf")?;
//! println!("{}", session.summary(&assistant).await);
//! let response = session.ask(&assistant, "What dataset was used?").await;
//! println!("{}\n{}", response.answer, response.justification());
//! ```
//!
//! ## Features
//!
//! - `openai` — [`openai::OpenAIClient`] for OpenAI-compatible servers
//! - `ollama` — [`ollama::OllamaClient`] for a local Ollama server
//! - `cli` — the `adk-docqa` command-line front end

pub mod assistant;
pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod evaluator;
pub mod extract;
pub mod generation;
pub mod prompt;
pub mod questions;
pub mod responder;
pub mod session;
pub mod summarizer;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "ollama")]
pub mod ollama;

pub use assistant::{DocumentAssistant, DocumentAssistantBuilder};
pub use chunking::{WordChunker, char_prefix, char_window, split_sentences};
pub use config::{DocQaConfig, DocQaConfigBuilder};
pub use document::{AnswerRecord, Document, Justification, QaResponse, Question, UserAnswer};
pub use embedding::{EmbeddingProvider, cosine_similarity};
pub use error::{DocQaError, Result};
pub use evaluator::AnswerEvaluator;
pub use extract::{SourceFormat, extract_text};
pub use generation::{GenerationParams, GenerativeService, Sampling};
pub use prompt::{ANSWER_APOLOGY, FALLBACK_QUESTION, REFERENCE_ERROR};
pub use questions::QuestionGenerator;
pub use responder::JustifiedResponder;
pub use session::{Mode, Session};
pub use summarizer::Summarizer;
