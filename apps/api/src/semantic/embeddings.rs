/// Embedding Client — the single point of entry for embedding-provider calls.
///
/// The scoring engine only sees the `EmbeddingProvider` trait. `OpenAiEmbeddings`
/// is the production backend; tests use the deterministic mock in `semantic::mock`.
///
/// Retry on 429/5xx lives here, in the provider client. The semantic scorer itself
/// never retries: one failed call aborts the whole analysis.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Output dimensionality of the default embedding model.
pub const EMBEDDING_DIMENSIONS: usize = 1536;
/// Inputs longer than this are truncated before being sent.
pub const MAX_EMBEDDING_INPUT_CHARS: usize = 32_764;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("cannot embed empty or whitespace-only text")]
    EmptyInput,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("expected {expected}-dimensional embedding, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("provider returned {actual} embeddings for {expected} inputs")]
    MissingEmbeddings { expected: usize, actual: usize },
}

/// Text → vector provider. Implementations must be `Send + Sync` so they can live
/// in `AppState` behind an `Arc`.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embeds several texts, preserving input order. The default calls `embed`
    /// sequentially and stops at the first failure.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    fn dimensions(&self) -> usize;
}

/// Validates and truncates text before it is sent to a provider.
///
/// Empty or whitespace-only input is an error, never silently sent.
/// Truncation happens at a char boundary.
pub fn prepare_input(text: &str) -> Result<&str, EmbeddingError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EmbeddingError::EmptyInput);
    }
    match trimmed.char_indices().nth(MAX_EMBEDDING_INPUT_CHARS) {
        Some((cut, _)) => Ok(&trimmed[..cut]),
        None => Ok(trimmed),
    }
}

/// Checks that every vector has the provider's advertised dimensionality.
pub fn check_dimensions(vectors: &[Vec<f32>], expected: usize) -> Result<(), EmbeddingError> {
    match vectors.iter().find(|v| v.len() != expected) {
        Some(v) => Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: v.len(),
        }),
        None => Ok(()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI-compatible HTTP backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
    #[serde(default)]
    usage: Option<EmbeddingUsage>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingUsage {
    prompt_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl EmbeddingResponse {
    /// Vectors re-ordered by `index`; the API does not promise response order.
    fn into_ordered_vectors(mut self, expected: usize) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if self.data.len() != expected {
            return Err(EmbeddingError::MissingEmbeddings {
                expected,
                actual: self.data.len(),
            });
        }
        self.data.sort_by_key(|d| d.index);
        Ok(self.data.into_iter().map(|d| d.embedding).collect())
    }
}

/// Embedding client for the OpenAI `/v1/embeddings` endpoint (or a compatible proxy).
#[derive(Clone)]
pub struct OpenAiEmbeddings {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiEmbeddings {
    pub fn new(api_url: String, api_key: String, model: String) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one request for all inputs. Retries 429 and 5xx with exponential backoff.
    async fn request(&self, inputs: Vec<&str>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let expected = inputs.len();
        let request_body = EmbeddingRequest {
            model: &self.model,
            input: inputs,
        };

        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbeddingError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, body);
                last_error = Some(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(EmbeddingError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: EmbeddingResponse = response.json().await?;
            if let Some(usage) = &parsed.usage {
                debug!(
                    "Embedding call succeeded: inputs={}, prompt_tokens={}, total_tokens={}",
                    expected, usage.prompt_tokens, usage.total_tokens
                );
            }
            return parsed.into_ordered_vectors(expected);
        }

        Err(last_error.unwrap_or(EmbeddingError::Api {
            status: 429,
            message: format!("rate limited after {MAX_RETRIES} retries"),
        }))
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let input = prepare_input(text)?;
        let mut vectors = self.request(vec![input]).await?;
        check_dimensions(&vectors, self.dimensions())?;
        vectors.pop().ok_or(EmbeddingError::MissingEmbeddings {
            expected: 1,
            actual: 0,
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let inputs = texts
            .iter()
            .map(|t| prepare_input(t))
            .collect::<Result<Vec<_>, _>>()?;
        let vectors = self.request(inputs).await?;
        check_dimensions(&vectors, self.dimensions())?;
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIMENSIONS
    }
}
