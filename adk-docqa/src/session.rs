//! In-memory, single-user document session.
//!
//! A [`Session`] holds one uploaded document for its lifetime, memoizes the
//! summary, and keeps the state of the "challenge" (quiz) and "ask" modes.
//! Nothing is persisted; dropping the session discards everything.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::info;

use crate::assistant::DocumentAssistant;
use crate::document::{AnswerRecord, Document, QaResponse, Question, UserAnswer};
use crate::error::Result;

/// The interaction mode currently selected by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Document loaded, no mode chosen yet.
    #[default]
    Initial,
    /// Answer generated questions and get scored.
    Challenge,
    /// Ask free-text questions with justification.
    Ask,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Initial => "Initial",
            Self::Challenge => "Challenge Me",
            Self::Ask => "Ask a Question",
        };
        f.write_str(label)
    }
}

/// State for one document over one user session.
#[derive(Debug)]
pub struct Session {
    document: Document,
    summary: OnceCell<String>,
    mode: Mode,
    questions: Vec<Question>,
    results: Vec<AnswerRecord>,
}

impl Session {
    /// Start a session for an already-loaded document.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            summary: OnceCell::new(),
            mode: Mode::default(),
            questions: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Extract `path` once and start a session for it.
    ///
    /// # Errors
    ///
    /// Propagates extraction errors, including
    /// [`DocQaError::UnsupportedFormat`](crate::DocQaError::UnsupportedFormat).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let document = Document::from_path(path)?;
        info!(document = %document.name, words = document.word_count(), "opened session");
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// The current question batch (empty until questions are generated).
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Results of the most recent evaluation.
    pub fn results(&self) -> &[AnswerRecord] {
        &self.results
    }

    /// The document summary, computed on first use and reused afterwards.
    pub async fn summary(&self, assistant: &DocumentAssistant) -> &str {
        self.summary.get_or_init(|| assistant.summarize(&self.document.text)).await
    }

    /// Draw a new question batch, replacing the previous one.
    ///
    /// Switches to [`Mode::Challenge`] and clears earlier results.
    pub async fn generate_questions(
        &mut self,
        assistant: &DocumentAssistant,
        rng: &mut fastrand::Rng,
    ) -> &[Question] {
        let count = assistant.config().question_count;
        self.questions =
            assistant.generate_questions_with(&self.document.text, count, rng).await;
        self.results.clear();
        self.mode = Mode::Challenge;
        &self.questions
    }

    /// Evaluate answers to the current questions, in question order.
    ///
    /// `answers[i]` answers question `i`; missing answers are scored as empty
    /// strings and extra answers are ignored.
    pub async fn submit_answers(
        &mut self,
        assistant: &DocumentAssistant,
        answers: &[String],
    ) -> &[AnswerRecord] {
        let pairs: Vec<UserAnswer> = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                UserAnswer::new(q.text.clone(), answers.get(i).cloned().unwrap_or_default())
            })
            .collect();
        self.results = assistant.evaluate_answers(&pairs, &self.document.text).await;
        &self.results
    }

    /// Answer a free-text question. Switches to [`Mode::Ask`].
    pub async fn ask(&mut self, assistant: &DocumentAssistant, question: &str) -> QaResponse {
        self.mode = Mode::Ask;
        assistant.ask(question, &self.document.text).await
    }
}
