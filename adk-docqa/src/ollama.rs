//! Ollama backend for local generation and embeddings.
//!
//! This module is only available when the `ollama` feature is enabled. Unlike
//! the OpenAI chat API, Ollama honours `top_k`, so sampled question generation
//! runs with the configured temperature and top-k.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{DocQaError, Result};
use crate::generation::{GenerationParams, GenerativeService, Sampling};

const DEFAULT_HOST: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.2";
const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";

/// Output size of `all-minilm`.
const DEFAULT_DIMENSIONS: usize = 384;

const PROVIDER: &str = "Ollama";

/// A client for a local Ollama server implementing both
/// [`GenerativeService`] and [`EmbeddingProvider`].
pub struct OllamaClient {
    client: reqwest::Client,
    host: String,
    model: String,
    embedding_model: String,
    dimensions: usize,
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl OllamaClient {
    /// Create a client for the server at `host` with default models.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: host.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.into(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    /// Create a client from `OLLAMA_HOST`, falling back to `http://localhost:11434`.
    pub fn from_env() -> Self {
        let host = std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        Self::new(host)
    }

    /// Set the generation model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the embedding model and its output dimensionality.
    pub fn with_embedding_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.embedding_model = model.into();
        self.dimensions = dimensions;
        self
    }

    async fn post<B, R>(&self, path: &str, body: &B, wrap: fn(String) -> DocQaError) -> Result<R>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{path}", self.host);
        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            error!(provider = PROVIDER, %url, error = %e, "request failed");
            wrap(format!("request failed: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail =
                serde_json::from_str::<ErrorResponse>(&body).map(|e| e.error).unwrap_or(body);
            error!(provider = PROVIDER, %status, "API error");
            return Err(wrap(format!("API returned {status}: {detail}")));
        }

        response.json().await.map_err(|e| {
            error!(provider = PROVIDER, error = %e, "failed to parse response");
            wrap(format!("failed to parse response: {e}"))
        })
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

fn generate_request<'a>(
    model: &'a str,
    prompt: &'a str,
    params: &GenerationParams,
) -> GenerateRequest<'a> {
    let (temperature, top_k) = match params.sampling {
        Sampling::Greedy => (0.0, None),
        Sampling::Stochastic { temperature, top_k } => (temperature, Some(top_k)),
    };
    GenerateRequest {
        model,
        prompt,
        stream: false,
        options: GenerateOptions { num_predict: params.max_new_tokens, temperature, top_k },
    }
}

#[async_trait]
impl GenerativeService for OllamaClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        debug!(provider = PROVIDER, model = %self.model, prompt_len = prompt.len(), "generating");
        let request = generate_request(&self.model, prompt, params);
        let response: GenerateResponse = self
            .post("/api/generate", &request, |message| DocQaError::GenerationError {
                provider: PROVIDER.into(),
                message,
            })
            .await?;
        Ok(response.response)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text]).await?.into_iter().next().ok_or_else(|| {
            DocQaError::EmbeddingError {
                provider: PROVIDER.into(),
                message: "API returned empty response".into(),
            }
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!(
            provider = PROVIDER,
            batch_size = texts.len(),
            model = %self.embedding_model,
            "embedding batch"
        );
        let request = EmbedRequest { model: &self.embedding_model, input: texts.to_vec() };
        let response: EmbedResponse = self
            .post("/api/embed", &request, |message| DocQaError::EmbeddingError {
                provider: PROVIDER.into(),
                message,
            })
            .await?;
        Ok(response.embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
