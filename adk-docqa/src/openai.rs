//! OpenAI-compatible backend for generation and embeddings.
//!
//! This module is only available when the `openai` feature is enabled.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{DocQaError, Result};
use crate::generation::{GenerationParams, GenerativeService, Sampling};

/// The default OpenAI API base URL.
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// The default dimensionality for `text-embedding-3-small`.
const DEFAULT_DIMENSIONS: usize = 1536;

const PROVIDER: &str = "OpenAI";

/// A client for the OpenAI API (or any server speaking its protocol) that
/// implements both [`GenerativeService`] and [`EmbeddingProvider`].
///
/// Generation goes through `/chat/completions` with the prompt as a single
/// user message. The API has no top-k parameter, so the `top_k` of
/// [`Sampling::Stochastic`] is not sent. Embeddings go through `/embeddings`.
///
/// # Example
///
/// ```rust,ignore
/// use adk_docqa::openai::OpenAIClient;
///
/// let client = OpenAIClient::from_env()?.with_chat_model("gpt-4o");
/// let client = Arc::new(client);
/// let assistant = DocumentAssistant::builder()
///     .generator(client.clone())
///     .embedder(client)
///     .build()?;
/// ```
pub struct OpenAIClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    embedding_model: String,
    dimensions: usize,
}

impl OpenAIClient {
    /// Create a new client with the given API key and default models.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(DocQaError::ConfigError("OpenAI API key must not be empty".into()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: OPENAI_BASE_URL.into(),
            chat_model: DEFAULT_CHAT_MODEL.into(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Create a new client using the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            DocQaError::ConfigError("OPENAI_API_KEY environment variable not set".into())
        })?;
        Self::new(api_key)
    }

    /// Point the client at an OpenAI-compatible server (e.g. `http://localhost:8000/v1`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the chat model used for generation.
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Set the embedding model and its output dimensionality.
    pub fn with_embedding_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.embedding_model = model.into();
        self.dimensions = dimensions;
        self
    }

    fn generation_error(message: String) -> DocQaError {
        DocQaError::GenerationError { provider: PROVIDER.into(), message }
    }

    fn embedding_error(message: String) -> DocQaError {
        DocQaError::EmbeddingError { provider: PROVIDER.into(), message }
    }

    /// POST `body` to `path` and decode a JSON response, mapping failures with `wrap`.
    async fn post<B, R>(&self, path: &str, body: &B, wrap: fn(String) -> DocQaError) -> Result<R>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let response =
            self.client.post(&url).bearer_auth(&self.api_key).json(body).send().await.map_err(
                |e| {
                    error!(provider = PROVIDER, %url, error = %e, "request failed");
                    wrap(format!("request failed: {e}"))
                },
            )?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(provider = PROVIDER, %status, "API error");
            return Err(wrap(format!("API returned {status}: {detail}")));
        }

        response.json().await.map_err(|e| {
            error!(provider = PROVIDER, error = %e, "failed to parse response");
            wrap(format!("failed to parse response: {e}"))
        })
    }
}

// ── OpenAI API request/response types ──────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatContent,
}

#[derive(Deserialize)]
struct ChatContent {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

fn chat_request<'a>(model: &'a str, prompt: &'a str, params: &GenerationParams) -> ChatRequest<'a> {
    let temperature = match params.sampling {
        Sampling::Greedy => Some(0.0),
        Sampling::Stochastic { temperature, top_k } => {
            debug!(provider = PROVIDER, top_k, "top_k is not supported by the chat API; ignoring");
            Some(temperature)
        }
    };
    ChatRequest {
        model,
        messages: vec![ChatMessage { role: "user", content: prompt }],
        max_tokens: params.max_new_tokens,
        temperature,
    }
}

// ── Trait implementations ──────────────────────────────────────────

#[async_trait]
impl GenerativeService for OpenAIClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        debug!(
            provider = PROVIDER,
            model = %self.chat_model,
            prompt_len = prompt.len(),
            max_new_tokens = params.max_new_tokens,
            "generating"
        );

        let request = chat_request(&self.chat_model, prompt, params);
        let response: ChatResponse =
            self.post("/chat/completions", &request, Self::generation_error).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Self::generation_error("API returned no choices".into()))
    }

    fn name(&self) -> &str {
        &self.chat_model
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| Self::embedding_error("API returned empty response".into()))
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

        let request = EmbeddingRequest { model: &self.embedding_model, input: texts.to_vec() };
        let response: EmbeddingResponse =
            self.post("/embeddings", &request, Self::embedding_error).await?;

        Ok(response.data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
