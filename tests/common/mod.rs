//! Test doubles shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use socialpulse::api::{
    ApiError, ApiResult, BatchPredictRequest, BatchPredictResponse, HealthResponse,
    ModelsResponse, PredictRequest, PredictResponse, SentimentApi,
};
use socialpulse::history::HistoryEntry;
use socialpulse::view::{BatchDisplay, HealthStatus, ResultDisplay, View};

/// How the fake answers analysis requests
#[derive(Clone)]
pub enum Reply {
    /// Positive result echoing the request
    Echo,
    /// Fixed JSON body
    Body(Value),
    /// Connection failure
    Down,
}

pub struct FakeApi {
    reply: Mutex<Reply>,
    health: Mutex<Option<Value>>,
    gate: Option<Arc<Semaphore>>,
    pub predict_calls: Mutex<Vec<PredictRequest>>,
    pub batch_calls: Mutex<Vec<BatchPredictRequest>>,
    pub health_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Mutex::new(reply),
            health: Mutex::new(Some(json!({"status": "ok"}))),
            gate: None,
            predict_calls: Mutex::new(Vec::new()),
            batch_calls: Mutex::new(Vec::new()),
            health_calls: AtomicUsize::new(0),
        }
    }

    /// Hold every analysis request until a permit is added to `gate`
    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// `None` makes the health endpoint unreachable
    pub fn set_health(&self, body: Option<Value>) {
        *self.health.lock().unwrap() = body;
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn predict_requests(&self) -> Vec<PredictRequest> {
        self.predict_calls.lock().unwrap().clone()
    }

    pub fn batch_requests(&self) -> Vec<BatchPredictRequest> {
        self.batch_calls.lock().unwrap().clone()
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
    }

    fn down() -> ApiError {
        ApiError::Unavailable("http://localhost:5000".to_string())
    }
}

#[async_trait]
impl SentimentApi for FakeApi {
    async fn health(&self) -> ApiResult<HealthResponse> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        let body = self.health.lock().unwrap().clone();
        match body {
            Some(body) => Ok(serde_json::from_value(body).unwrap()),
            None => Err(Self::down()),
        }
    }

    async fn models(&self) -> ApiResult<ModelsResponse> {
        Ok(serde_json::from_value(json!({
            "available_models": ["bert", "sklearn"],
            "default": "bert",
            "bert": {"loaded": true, "name": "CAMeLBERT", "description": "BERT"}
        }))
        .unwrap())
    }

    async fn predict(&self, request: &PredictRequest) -> ApiResult<PredictResponse> {
        self.predict_calls.lock().unwrap().push(request.clone());
        self.wait_for_gate().await;

        let reply = self.reply.lock().unwrap().clone();
        match reply {
            Reply::Echo => Ok(serde_json::from_value(json!({
                "success": true,
                "text": request.text,
                "sentiment": "positive",
                "confidence": 80,
                "probabilities": {"positive": 80, "neutral": 15, "negative": 5},
                "model_used": request.model,
            }))
            .unwrap()),
            Reply::Body(body) => Ok(serde_json::from_value(body).unwrap()),
            Reply::Down => Err(Self::down()),
        }
    }

    async fn predict_batch(
        &self,
        request: &BatchPredictRequest,
    ) -> ApiResult<BatchPredictResponse> {
        self.batch_calls.lock().unwrap().push(request.clone());
        self.wait_for_gate().await;

        let reply = self.reply.lock().unwrap().clone();
        match reply {
            Reply::Echo => {
                let results: Vec<Value> = request
                    .texts
                    .iter()
                    .map(|text| {
                        json!({"text": text, "sentiment": "positive", "emoji": "😊", "confidence": 75})
                    })
                    .collect();
                Ok(serde_json::from_value(json!({
                    "success": true,
                    "results": results,
                    "summary": {
                        "total": request.texts.len(),
                        "positive": request.texts.len(),
                        "neutral": 0,
                        "negative": 0
                    },
                    "model_used": request.model,
                }))
                .unwrap())
            }
            Reply::Body(body) => Ok(serde_json::from_value(body).unwrap()),
            Reply::Down => Err(Self::down()),
        }
    }
}

/// [`View`] that records what it was asked to show
#[derive(Default)]
pub struct RecordingView {
    inner: Mutex<Recorded>,
    confirm_answer: Mutex<bool>,
}

#[derive(Default, Clone)]
pub struct Recorded {
    pub events: Vec<String>,
    pub loading: bool,
    pub health: HealthStatus,
    pub alerts: Vec<String>,
    pub result: Option<ResultDisplay>,
    pub batch: Option<BatchDisplay>,
    pub history: Vec<HistoryEntry>,
    pub confirm_prompts: Vec<String>,
    /// Thread each confirmation ran on
    pub confirm_threads: Vec<std::thread::ThreadId>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_confirm(&self, answer: bool) {
        *self.confirm_answer.lock().unwrap() = answer;
    }

    pub fn recorded(&self) -> Recorded {
        self.inner.lock().unwrap().clone()
    }

    fn record(&self, f: impl FnOnce(&mut Recorded)) {
        f(&mut self.inner.lock().unwrap());
    }
}

impl View for RecordingView {
    fn show_health(&self, status: HealthStatus) {
        self.record(|r| {
            r.events.push(format!("health:{:?}", status));
            r.health = status;
        });
    }

    fn set_loading(&self, visible: bool) {
        self.record(|r| {
            r.events.push(format!("loading:{}", visible));
            r.loading = visible;
        });
    }

    fn alert(&self, message: &str) {
        self.record(|r| {
            r.events.push("alert".to_string());
            r.alerts.push(message.to_string());
        });
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.record(|r| {
            r.confirm_prompts.push(prompt.to_string());
            r.confirm_threads.push(std::thread::current().id());
        });
        *self.confirm_answer.lock().unwrap()
    }

    fn show_result(&self, result: &ResultDisplay) {
        self.record(|r| {
            r.events.push("result".to_string());
            r.result = Some(result.clone());
        });
    }

    fn hide_result(&self) {
        self.record(|r| {
            r.events.push("hide_result".to_string());
            r.result = None;
        });
    }

    fn show_batch(&self, batch: &BatchDisplay) {
        self.record(|r| {
            r.events.push("batch".to_string());
            r.batch = Some(batch.clone());
        });
    }

    fn render_history(&self, entries: &[HistoryEntry]) {
        self.record(|r| {
            r.events.push(format!("history:{}", entries.len()));
            r.history = entries.to_vec();
        });
    }
}
