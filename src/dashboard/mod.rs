//! Dashboard controller
//!
//! Owns the view state of the last single and batch analyses plus the
//! persisted history, and drives a [`View`] from API responses.
//!
//! ## Flow
//!
//! 1. Input is validated; blank input alerts and stops here
//! 2. The loading indicator is raised for the duration of the call
//! 3. The response is rendered, or its error is alerted
//! 4. Successful single analyses are prepended to the history
//!
//! Batch analyses never touch the history.

mod error;
mod input;
mod loading;

pub use error::{DashboardError, DashboardResult, CONNECTION_FAILED};
pub use input::{split_batch, validate_text, EMPTY_BATCH, EMPTY_TEXT};
pub use loading::{LoadingGuard, LoadingIndicator};

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::{
    AnalysisResult, BatchPredictRequest, BatchResult, HealthResponse, ModelsResponse,
    PredictRequest, SentimentApi,
};
use crate::history::{History, HistoryEntry};
use crate::store::KeyValueStore;
use crate::view::{BatchDisplay, HealthStatus, ResultDisplay, View};

/// Prompt shown before the history is cleared
pub const CLEAR_HISTORY_PROMPT: &str = "Clear the analysis history?";

/// Ephemeral view state
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub health: HealthStatus,
    /// Body of the last health check that got an answer
    pub last_health: Option<HealthResponse>,
    pub last_result: Option<AnalysisResult>,
    pub last_batch: Option<BatchResult>,
    /// Model identifier sent with every analysis
    pub selected_model: String,
}

/// The history-and-result view controller
pub struct Dashboard {
    api: Arc<dyn SentimentApi>,
    view: Arc<dyn View>,
    state: RwLock<DashboardState>,
    history: RwLock<History>,
    loading: LoadingIndicator,
}

impl Dashboard {
    /// Create a dashboard; the history is loaded from `store` right away
    pub fn new(
        api: Arc<dyn SentimentApi>,
        view: Arc<dyn View>,
        store: Arc<dyn KeyValueStore>,
        model: impl Into<String>,
    ) -> Self {
        let state = DashboardState {
            selected_model: model.into(),
            ..DashboardState::default()
        };

        Self {
            api,
            loading: LoadingIndicator::new(Arc::clone(&view)),
            view,
            state: RwLock::new(state),
            history: RwLock::new(History::load(store)),
        }
    }

    /// Startup: render the persisted history and run the first health check
    pub async fn initialize(&self) -> HealthStatus {
        self.render_history().await;
        self.check_health().await
    }

    /// Snapshot of the current view state
    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// History entries, newest first
    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.history.read().await.entries().to_vec()
    }

    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    pub async fn selected_model(&self) -> String {
        self.state.read().await.selected_model.clone()
    }

    /// Change the model sent with subsequent analyses
    pub async fn select_model(&self, model: impl Into<String>) {
        self.state.write().await.selected_model = model.into();
    }

    /// Query the health endpoint and update the status indicator.
    ///
    /// Never fails: anything other than `{"status": "ok"}` is offline.
    pub async fn check_health(&self) -> HealthStatus {
        let (status, body) = match self.api.health().await {
            Ok(health) if health.is_ok() => (HealthStatus::Online, Some(health)),
            Ok(health) => {
                tracing::debug!(status = %health.status, "Sentiment API reports not ok");
                (HealthStatus::Offline, Some(health))
            }
            Err(e) => {
                tracing::debug!(error = %e, "Health check failed");
                (HealthStatus::Offline, None)
            }
        };

        {
            let mut state = self.state.write().await;
            if state.health != status {
                tracing::info!(?status, "Sentiment API status changed");
            }
            state.health = status;
            state.last_health = body;
        }

        self.view.show_health(status);
        status
    }

    /// Models the backend offers
    pub async fn models(&self) -> DashboardResult<ModelsResponse> {
        let outcome = self.api.models().await.map_err(DashboardError::Transport);
        self.report(outcome)
    }

    /// Analyze one text with the selected model
    pub async fn analyze(&self, text: &str) -> DashboardResult<AnalysisResult> {
        let model = self.selected_model().await;
        self.analyze_with(text, &model).await
    }

    /// Analyze one text with an explicit model
    pub async fn analyze_with(&self, text: &str, model: &str) -> DashboardResult<AnalysisResult> {
        let text = self.report(validate_text(text))?;
        let request = PredictRequest {
            text,
            model: model.to_string(),
        };

        let _loading = self.loading.begin();
        tracing::debug!(model = %request.model, "Requesting single analysis");

        let outcome = match self.api.predict(&request).await {
            Ok(response) => response
                .into_outcome()
                .map_err(DashboardError::Application),
            Err(e) => Err(DashboardError::Transport(e)),
        };
        let mut result = self.report(outcome)?;
        if result.text.is_empty() {
            result.text = request.text;
        }

        self.view.show_result(&ResultDisplay::from(&result));
        self.state.write().await.last_result = Some(result.clone());
        self.record_history(&result).await;

        tracing::info!(
            sentiment = %result.sentiment,
            confidence = result.confidence,
            "Analysis complete"
        );
        Ok(result)
    }

    /// Analyze every non-blank line of `input` with the selected model
    pub async fn analyze_batch(&self, input: &str) -> DashboardResult<BatchResult> {
        let model = self.selected_model().await;
        self.analyze_batch_with(input, &model).await
    }

    /// Analyze every non-blank line of `input` with an explicit model
    pub async fn analyze_batch_with(
        &self,
        input: &str,
        model: &str,
    ) -> DashboardResult<BatchResult> {
        let texts = self.report(split_batch(input))?;
        let request = BatchPredictRequest {
            texts,
            model: model.to_string(),
        };

        let _loading = self.loading.begin();
        tracing::debug!(model = %request.model, count = request.texts.len(), "Requesting batch analysis");

        let outcome = match self.api.predict_batch(&request).await {
            Ok(response) => response
                .into_outcome()
                .map_err(DashboardError::Application),
            Err(e) => Err(DashboardError::Transport(e)),
        };
        let batch = self.report(outcome)?;

        self.view.show_batch(&BatchDisplay::from(&batch));
        self.state.write().await.last_batch = Some(batch.clone());

        tracing::info!(count = batch.results.len(), "Batch analysis complete");
        Ok(batch)
    }

    /// Hide the single-text result panel
    pub async fn dismiss_result(&self) {
        self.state.write().await.last_result = None;
        self.view.hide_result();
    }

    /// Render the history list
    pub async fn render_history(&self) {
        let history = self.history.read().await;
        self.view.render_history(history.entries());
    }

    /// Clear the history after the user confirms.
    ///
    /// The prompt may block on terminal input, so it runs on the blocking
    /// pool. Returns whether the history was cleared.
    pub async fn clear_history(&self) -> bool {
        let view = Arc::clone(&self.view);
        let prompt = tokio::task::spawn_blocking(move || view.confirm(CLEAR_HISTORY_PROMPT));
        let confirmed = match prompt.await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "Confirmation prompt failed");
                false
            }
        };

        if !confirmed {
            tracing::debug!("History clear declined");
            return false;
        }

        let mut history = self.history.write().await;
        if let Err(e) = history.clear() {
            tracing::warn!(error = %e, "Failed to remove persisted history");
        }
        self.view.render_history(history.entries());

        tracing::info!("History cleared");
        true
    }

    async fn record_history(&self, result: &AnalysisResult) {
        let mut history = self.history.write().await;
        if let Err(e) = history.record(result.text.clone(), result.sentiment.clone()) {
            tracing::warn!(error = %e, "Failed to persist history");
        }
        self.view.render_history(history.entries());
    }

    /// Surface an error through the view before handing it back
    fn report<T>(&self, outcome: DashboardResult<T>) -> DashboardResult<T> {
        if let Err(e) = &outcome {
            match e {
                DashboardError::Validation(_) => {}
                DashboardError::Application(message) => {
                    tracing::warn!(%message, "Sentiment API rejected the request");
                }
                DashboardError::Transport(source) => {
                    tracing::error!(error = %source, "Sentiment API request failed");
                }
            }
            self.view.alert(&e.to_string());
        }
        outcome
    }
}
