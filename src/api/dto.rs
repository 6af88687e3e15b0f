//! Request/Response DTOs
//!
//! Wire types for the sentiment API. Response fields are lenient: anything
//! the dashboard can live without has a default.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::sentiment::Sentiment;

// ============================================
// Requests
// ============================================

/// Body of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub text: String,
    pub model: String,
}

/// Body of `POST /predict/batch`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPredictRequest {
    pub texts: Vec<String>,
    pub model: String,
}

// ============================================
// Responses
// ============================================

/// `GET /health`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub models: Option<ModelsLoaded>,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Which models the backend reports as loaded
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelsLoaded {
    #[serde(default)]
    pub bert_loaded: bool,
    #[serde(default)]
    pub sklearn_loaded: bool,
}

/// Per-class probabilities, in percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Probabilities {
    #[serde(default)]
    pub positive: f64,
    #[serde(default)]
    pub neutral: f64,
    #[serde(default)]
    pub negative: f64,
}

/// `POST /predict`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub probabilities: Probabilities,
    #[serde(default)]
    pub model_used: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A successful single-text analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub text: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub probabilities: Probabilities,
    pub model_used: String,
}

impl PredictResponse {
    /// Split into the analysis or the application error message
    pub fn into_outcome(self) -> Result<AnalysisResult, String> {
        if !self.success {
            return Err(self.error.unwrap_or_else(|| "Unknown error".to_string()));
        }

        Ok(AnalysisResult {
            text: self.text,
            sentiment: self.sentiment.unwrap_or(Sentiment::Neutral),
            confidence: self.confidence,
            probabilities: self.probabilities,
            model_used: self.model_used.unwrap_or_default(),
        })
    }
}

/// Per-sentiment counts of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct BatchSummary {
    #[serde(default)]
    pub positive: u32,
    #[serde(default)]
    pub neutral: u32,
    #[serde(default)]
    pub negative: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
}

/// One row of a batch result. The emoji is chosen by the server.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BatchItem {
    #[serde(default)]
    pub text: String,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub confidence: f64,
}

/// `POST /predict/batch`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BatchPredictResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub results: Vec<BatchItem>,
    #[serde(default)]
    pub summary: BatchSummary,
    #[serde(default)]
    pub model_used: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A successful batch analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub results: Vec<BatchItem>,
    pub summary: BatchSummary,
    pub model_used: Option<String>,
}

impl BatchPredictResponse {
    pub fn into_outcome(self) -> Result<BatchResult, String> {
        if !self.success {
            return Err(self.error.unwrap_or_else(|| "Unknown error".to_string()));
        }

        Ok(BatchResult {
            results: self.results,
            summary: self.summary,
            model_used: self.model_used,
        })
    }
}

/// `GET /models`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelsResponse {
    #[serde(default)]
    pub available_models: Vec<String>,
    #[serde(default)]
    pub default: Option<String>,
    /// Per-model details, keyed by model identifier
    #[serde(flatten)]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl ModelsResponse {
    /// Details for one model, if the backend described it
    pub fn info(&self, model: &str) -> Option<ModelInfo> {
        self.details
            .get(model)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

/// Details of one backend model
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub loaded: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}
