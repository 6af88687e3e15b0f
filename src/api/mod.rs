//! Sentiment API
//!
//! Client side of the sentiment-analysis backend.
//!
//! # Endpoints
//!
//! - `GET /health` - Backend status (`{"status": "ok"}` when up)
//! - `GET /models` - Models the backend can serve
//! - `POST /predict` - Analyze one text
//! - `POST /predict/batch` - Analyze several texts
//!
//! The [`SentimentApi`] trait is the seam the dashboard talks through;
//! [`HttpSentimentClient`] is the reqwest implementation.

pub mod client;
pub mod dto;
pub mod error;

pub use client::{ClientConfig, HttpSentimentClient, SentimentApi, DEFAULT_BASE_URL};
pub use dto::{
    AnalysisResult, BatchItem, BatchPredictRequest, BatchPredictResponse, BatchResult,
    BatchSummary, HealthResponse, ModelInfo, ModelsLoaded, ModelsResponse, PredictRequest,
    PredictResponse, Probabilities,
};
pub use error::{ApiError, ApiResult};
