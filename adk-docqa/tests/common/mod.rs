//! Deterministic stand-ins for the model services.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use adk_docqa::{DocQaError, EmbeddingProvider, GenerationParams, GenerativeService, Result};
use async_trait::async_trait;

pub const DIM: usize = 256;

/// Bag-of-words embedder: each distinct lowercase token owns one dimension.
///
/// Texts sharing more words score higher; texts with disjoint vocabularies
/// score exactly 0. Embedding fails for any text containing `fail_on`.
#[derive(Default)]
pub struct VocabEmbedder {
    vocab: Mutex<HashMap<String, usize>>,
    fail_on: Option<String>,
    nan_on: Option<String>,
    calls: Mutex<usize>,
}

impl VocabEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(needle: &str) -> Self {
        Self { fail_on: Some(needle.to_string()), ..Self::default() }
    }

    /// Returns a vector with a NaN component for any text containing `needle`.
    pub fn nan_on(needle: &str) -> Self {
        Self { nan_on: Some(needle.to_string()), ..Self::default() }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

pub fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

#[async_trait]
impl EmbeddingProvider for VocabEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        *self.calls.lock().unwrap() += 1;
        if let Some(needle) = &self.fail_on {
            if text.contains(needle.as_str()) {
                return Err(DocQaError::EmbeddingError {
                    provider: "vocab".into(),
                    message: format!("refusing to embed text containing '{needle}'"),
                });
            }
        }
        let mut vocab = self.vocab.lock().unwrap();
        let mut vector = vec![0.0f32; DIM];
        for token in tokens(text) {
            let next = vocab.len();
            let slot = *vocab.entry(token).or_insert(next);
            vector[slot % DIM] += 1.0;
        }
        if self.nan_on.as_deref().is_some_and(|needle| text.contains(needle)) {
            vector[DIM - 1] = f32::NAN;
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// Wraps [`VocabEmbedder`] with an unguarded cosine that lets NaN through,
/// like a provider overriding `similarity` with its own metric.
pub struct UncheckedCosine(pub VocabEmbedder);

#[async_trait]
impl EmbeddingProvider for UncheckedCosine {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.0.embed(text).await
    }

    fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        let norm = |v: &[f32]| v.iter().map(|x| x * x).sum::<f32>().sqrt();
        dot / (norm(a) * norm(b))
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// Replays a fixed script of responses in a loop; `None` entries fail.
/// Records every prompt and parameter set it receives.
pub struct ScriptedGenerator {
    script: Vec<Option<String>>,
    prompts: Mutex<Vec<String>>,
    params: Mutex<Vec<GenerationParams>>,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Option<&str>>) -> Self {
        Self {
            script: script.into_iter().map(|s| s.map(str::to_string)).collect(),
            prompts: Mutex::new(Vec::new()),
            params: Mutex::new(Vec::new()),
        }
    }

    pub fn always(response: &str) -> Self {
        Self::new(vec![Some(response)])
    }

    pub fn failing() -> Self {
        Self::new(vec![None])
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn params(&self) -> Vec<GenerationParams> {
        self.params.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeService for ScriptedGenerator {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len() - 1
        };
        self.params.lock().unwrap().push(*params);
        match &self.script[call % self.script.len()] {
            Some(response) => Ok(response.clone()),
            None => Err(DocQaError::GenerationError {
                provider: "scripted".into(),
                message: format!("scripted failure on call {call}"),
            }),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// The text between the first pair of `"""` fences in a prompt.
pub fn fenced(prompt: &str) -> &str {
    let start = prompt.find("\"\"\"").map(|i| i + 3).unwrap_or(0);
    let end = prompt[start..].find("\"\"\"").map(|i| start + i).unwrap_or(prompt.len());
    &prompt[start..end]
}
