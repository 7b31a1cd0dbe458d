//! Data types for documents, generated questions, and answers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An immutable, normalized document loaded for a session.
///
/// The `name` is the source filename and identifies the document for the
/// lifetime of the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Source filename (or any caller-chosen label).
    pub name: String,
    /// Extracted text content.
    pub text: String,
}

impl Document {
    /// Create a document from a name and already-extracted text.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into() }
    }

    /// Returns `true` if the document has no non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// A generated question and the embedding it was deduplicated with.
///
/// The fallback question returned when no candidate survives filtering has no
/// embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    /// The question text.
    pub text: String,
    /// Embedding of `text`, if one was computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Question {
    /// A question without an embedding.
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), embedding: None }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A question paired with the user's free-text answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAnswer {
    pub question: String,
    pub answer: String,
}

impl UserAnswer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { question: question.into(), answer: answer.into() }
    }
}

/// The outcome of evaluating one [`UserAnswer`].
///
/// `score` is the cosine similarity between the user's answer and a
/// machine-generated reference answer, rounded to three decimals. It measures
/// semantic proximity to that reference, which may itself be wrong or
/// incomplete; it is not a correctness grade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerRecord {
    pub question: String,
    pub user_answer: String,
    pub reference_answer: String,
    pub score: f32,
}

/// The document sentence that best supports an answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Justification {
    /// 1-based position of the sentence among the document's `". "`-split pieces.
    pub line: usize,
    /// The trimmed sentence text, verbatim from the document.
    pub sentence: String,
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Supported by Line {}: \"{}\"", self.line, self.sentence)
    }
}

/// An answer to a free-text question plus its justification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QaResponse {
    /// The generated (or fallback) answer.
    pub answer: String,
    /// The top supporting sentence, if any sentence qualified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Justification>,
    /// The context handed to the generative service.
    pub context: String,
}

impl QaResponse {
    /// The justification string shown to the user.
    ///
    /// Renders `Supported by Line {n}: "{sentence}"` when a sentence qualified,
    /// otherwise the raw context string.
    pub fn justification(&self) -> String {
        match &self.source {
            Some(source) => source.to_string(),
            None => self.context.clone(),
        }
    }
}
