use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

const PROBE_TEXT: &str = "月子中心";


#[derive(Error, Debug)]
pub enum EncoderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty text")]
    EmptyText,

    #[error("Encoder did not respond within {0:?}")]
    Timeout(Duration),
}


/// A transformer encoder that returns one hidden-state row per input token.
#[async_trait]
pub trait SentenceEncoder: Send + Sync {
    async fn encode_tokens(&self, text: &str) -> Result<Vec<Vec<f32>>, EncoderError>;

    fn model_name(&self) -> &str;
}


#[derive(Serialize)]
struct EmbedAllRequest<'a> {
    inputs: &'a str,
    truncate: bool,
}


/// Client for a text-embeddings-inference server's `/embed_all` endpoint.
pub struct TeiEncoder {
    base_url: String,
    model: String,
    request_timeout: Duration,
    client: Client,
}

impl TeiEncoder {

    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, EncoderError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = Client::builder().build()?;

        info!(
            "TeiEncoder configured: url={}, model={}, request_timeout={:?}",
            base_url, model, request_timeout
        );

        Ok(Self {
            base_url,
            model,
            request_timeout,
            client,
        })
    }

    /// One round trip with a fixed text, bounded by `timeout` rather than the
    /// per-request timeout so a cold server can warm up.
    pub async fn probe(&self, timeout: Duration) -> Result<usize, EncoderError> {
        let rows = tokio::time::timeout(timeout, self.embed_all(PROBE_TEXT, timeout))
            .await
            .map_err(|_| EncoderError::Timeout(timeout))??;
        let dims = rows.first().map(Vec::len).unwrap_or(0);
        if dims == 0 {
            return Err(EncoderError::InvalidResponse("probe returned no hidden states".to_string()));
        }
        Ok(dims)
    }

    async fn embed_all(&self, text: &str, timeout: Duration) -> Result<Vec<Vec<f32>>, EncoderError> {
        if text.trim().is_empty() {
            return Err(EncoderError::EmptyText);
        }

        let request = EmbedAllRequest {
            inputs: text,
            truncate: true,
        };

        let mut batch = self
            .client
            .post(format!("{}/embed_all", self.base_url))
            .json(&request)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Vec<Vec<f32>>>>()
            .await?;

        debug!("embed_all returned batch of {}", batch.len());

        if batch.is_empty() {
            return Err(EncoderError::InvalidResponse("empty batch".to_string()));
        }
        Ok(batch.swap_remove(0))
    }
}

#[async_trait]
impl SentenceEncoder for TeiEncoder {
    async fn encode_tokens(&self, text: &str) -> Result<Vec<Vec<f32>>, EncoderError> {
        self.embed_all(text, self.request_timeout).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
