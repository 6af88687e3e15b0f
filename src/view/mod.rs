//! Rendering surfaces
//!
//! The dashboard never touches a concrete output. It computes display
//! models ([`ResultDisplay`], [`BatchDisplay`]) and hands them to a [`View`].
//!
//! - [`ConsoleView`]: terminal output with a spinner and interactive confirm
//! - [`HtmlView`]: markup fragments that can be assembled into a page

mod console;
mod html;

pub use console::ConsoleView;
pub use html::HtmlView;

use serde::Serialize;

use crate::api::{AnalysisResult, BatchResult, BatchSummary};
use crate::history::HistoryEntry;
use crate::sentiment::{format_percent, model_display_name, Sentiment};

/// Reachability of the sentiment API as last observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// No check has completed yet
    #[default]
    Unknown,
    Online,
    Offline,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Unknown => "⚪ Checking...",
            HealthStatus::Online => "🟢 Online",
            HealthStatus::Offline => "🔴 Offline",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            HealthStatus::Unknown => "status-indicator",
            HealthStatus::Online => "status-indicator online",
            HealthStatus::Offline => "status-indicator offline",
        }
    }
}

/// A surface the dashboard renders into
pub trait View: Send + Sync {
    /// Update the API status indicator
    fn show_health(&self, status: HealthStatus);

    /// Show or hide the loading indicator
    fn set_loading(&self, visible: bool);

    /// Surface a message the user must see (validation, API or connection errors)
    fn alert(&self, message: &str);

    /// Ask the user to confirm a destructive action.
    ///
    /// May block; the dashboard calls it from the blocking pool.
    fn confirm(&self, prompt: &str) -> bool;

    /// Render a single-text analysis
    fn show_result(&self, result: &ResultDisplay);

    /// Hide the single-text result panel
    fn hide_result(&self);

    /// Render a batch analysis
    fn show_batch(&self, batch: &BatchDisplay);

    /// Render the history list, newest first. Empty means the placeholder.
    fn render_history(&self, entries: &[HistoryEntry]);
}

/// One probability bar in the result panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityBar {
    pub sentiment: Sentiment,
    /// Bar width in percent, clamped to 0..=100
    pub width: f64,
    /// Numeric label, e.g. "92%"
    pub label: String,
}

/// Everything the result panel shows for one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultDisplay {
    pub text: String,
    pub sentiment: Sentiment,
    pub emoji: &'static str,
    /// Uppercase sentiment label
    pub label: String,
    /// Confidence, e.g. "92%"
    pub confidence: String,
    pub confidence_width: f64,
    /// Positive, neutral, negative, in that order
    pub bars: [ProbabilityBar; 3],
    pub model_name: &'static str,
}

impl From<&AnalysisResult> for ResultDisplay {
    fn from(result: &AnalysisResult) -> Self {
        let bar = |sentiment: Sentiment, value: f64| ProbabilityBar {
            sentiment,
            width: value.clamp(0.0, 100.0),
            label: format_percent(value),
        };

        Self {
            text: result.text.clone(),
            emoji: result.sentiment.emoji(),
            label: result.sentiment.display_label(),
            sentiment: result.sentiment.clone(),
            confidence: format_percent(result.confidence),
            confidence_width: result.confidence.clamp(0.0, 100.0),
            bars: [
                bar(Sentiment::Positive, result.probabilities.positive),
                bar(Sentiment::Neutral, result.probabilities.neutral),
                bar(Sentiment::Negative, result.probabilities.negative),
            ],
            model_name: model_display_name(&result.model_used),
        }
    }
}

/// One row of the batch results table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    /// 1-based position in the batch
    pub index: usize,
    pub text: String,
    pub sentiment: Sentiment,
    /// Emoji chosen by the server
    pub emoji: String,
    pub confidence: String,
}

/// Summary counts plus rows of a batch analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchDisplay {
    pub summary: BatchSummary,
    pub rows: Vec<BatchRow>,
}

impl From<&BatchResult> for BatchDisplay {
    fn from(batch: &BatchResult) -> Self {
        let rows = batch
            .results
            .iter()
            .enumerate()
            .map(|(i, item)| BatchRow {
                index: i + 1,
                text: item.text.clone(),
                sentiment: item.sentiment.clone(),
                emoji: item.emoji.clone(),
                confidence: format_percent(item.confidence),
            })
            .collect();

        Self {
            summary: batch.summary,
            rows,
        }
    }
}
