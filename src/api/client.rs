//! Sentiment API REST Client
//!
//! HTTP client for the sentiment-analysis backend.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::dto::{
    BatchPredictRequest, BatchPredictResponse, HealthResponse, ModelsResponse, PredictRequest,
    PredictResponse,
};
use super::error::{ApiError, ApiResult};

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Operations the dashboard needs from the sentiment backend
#[async_trait]
pub trait SentimentApi: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> ApiResult<HealthResponse>;

    /// `GET /models`
    async fn models(&self) -> ApiResult<ModelsResponse>;

    /// `POST /predict`
    async fn predict(&self, request: &PredictRequest) -> ApiResult<PredictResponse>;

    /// `POST /predict/batch`
    async fn predict_batch(&self, request: &BatchPredictRequest)
        -> ApiResult<BatchPredictResponse>;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Request timeout in milliseconds. `None` waits indefinitely.
    pub request_timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: None,
        }
    }
}

/// reqwest-backed [`SentimentApi`]
pub struct HttpSentimentClient {
    client: Client,
    config: ClientConfig,
}

impl HttpSentimentClient {
    /// Create a new client with the given configuration
    pub fn new(mut config: ClientConfig) -> ApiResult<Self> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        let mut builder = Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(std::time::Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::from_send(e, &self.config.base_url))?;

        self.read_json(path, response).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::from_send(e, &self.config.base_url))?;

        self.read_json(path, response).await
    }

    /// Decode the body whatever the status code: the backend reports
    /// `success: false` with 4xx/5xx statuses and those bodies are meaningful.
    async fn read_json<T: DeserializeOwned>(&self, path: &str, response: Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(path, status = status.as_u16(), "Sentiment API returned non-success status");
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_send(e, &self.config.base_url))?;

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            status: status.as_u16(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl SentimentApi for HttpSentimentClient {
    async fn health(&self) -> ApiResult<HealthResponse> {
        self.get_json("/health").await
    }

    async fn models(&self) -> ApiResult<ModelsResponse> {
        self.get_json("/models").await
    }

    async fn predict(&self, request: &PredictRequest) -> ApiResult<PredictResponse> {
        self.post_json("/predict", request).await
    }

    async fn predict_batch(
        &self,
        request: &BatchPredictRequest,
    ) -> ApiResult<BatchPredictResponse> {
        self.post_json("/predict/batch", request).await
    }
}
