//! HTML rendering surface
//!
//! Keeps the current markup of each dashboard section and assembles them
//! into a standalone page. Free text is always escaped on the way in.

use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard};

use super::{BatchDisplay, HealthStatus, ResultDisplay, View};
use crate::escape::escape_html;
use crate::history::HistoryEntry;

const EMPTY_HISTORY: &str = r#"<p class="empty-history">No analyses yet</p>"#;

#[derive(Debug, Default)]
struct Sections {
    status: HealthStatus,
    loading: bool,
    result: Option<String>,
    batch: Option<String>,
    history: String,
    alerts: Vec<String>,
}

/// Markup-producing [`View`]
#[derive(Debug)]
pub struct HtmlView {
    sections: Mutex<Sections>,
    confirm_answer: bool,
}

impl Default for HtmlView {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlView {
    /// A view that declines every confirmation
    pub fn new() -> Self {
        Self {
            sections: Mutex::new(Sections {
                history: EMPTY_HISTORY.to_string(),
                ..Sections::default()
            }),
            confirm_answer: false,
        }
    }

    /// Answer every confirmation with `answer`
    pub fn with_confirm(mut self, answer: bool) -> Self {
        self.confirm_answer = answer;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Sections> {
        self.sections.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn status(&self) -> HealthStatus {
        self.lock().status
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn result_html(&self) -> Option<String> {
        self.lock().result.clone()
    }

    pub fn batch_html(&self) -> Option<String> {
        self.lock().batch.clone()
    }

    pub fn history_html(&self) -> String {
        self.lock().history.clone()
    }

    /// Alerts raised so far, oldest first
    pub fn alerts(&self) -> Vec<String> {
        self.lock().alerts.clone()
    }

    /// Assemble the full dashboard page
    pub fn render_page(&self) -> String {
        let sections = self.lock();
        let mut page = String::new();

        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        page.push_str("<meta charset=\"utf-8\">\n<title>SocialPulse Dashboard</title>\n");
        page.push_str("</head>\n<body>\n");
        let _ = writeln!(
            page,
            r#"<span id="apiStatus" class="{}">{}</span>"#,
            sections.status.css_class(),
            sections.status.label()
        );
        if sections.loading {
            page.push_str("<div id=\"loadingOverlay\" class=\"loading\"></div>\n");
        }
        if let Some(result) = &sections.result {
            page.push_str(result);
        }
        if let Some(batch) = &sections.batch {
            page.push_str(batch);
        }
        let _ = writeln!(
            page,
            "<section id=\"historyList\" class=\"history\">\n{}\n</section>",
            sections.history
        );
        page.push_str("</body>\n</html>\n");

        page
    }
}

fn render_result(result: &ResultDisplay) -> String {
    let mut html = String::new();

    html.push_str("<section id=\"resultSection\" class=\"result\">\n");
    let _ = writeln!(
        html,
        r#"<div class="sentiment-emoji">{}</div>"#,
        result.emoji
    );
    let _ = writeln!(
        html,
        r#"<div class="sentiment-label {}">{}</div>"#,
        result.sentiment.css_class(),
        escape_html(&result.label)
    );
    let _ = writeln!(
        html,
        r#"<div class="confidence"><span class="confidence-value">{}</span><div class="progress"><div class="progress-fill" style="width: {}%"></div></div></div>"#,
        result.confidence, result.confidence_width
    );
    html.push_str("<div class=\"probabilities\">\n");
    for bar in &result.bars {
        let _ = writeln!(
            html,
            r#"<div class="prob-row"><span class="prob-name">{name}</span><div class="prob-bar {name}" style="width: {width}%"></div><span class="prob-value">{label}</span></div>"#,
            name = bar.sentiment.css_class(),
            width = bar.width,
            label = bar.label
        );
    }
    html.push_str("</div>\n");
    let _ = writeln!(
        html,
        r#"<div class="model-used">{}</div>"#,
        escape_html(result.model_name)
    );
    html.push_str("</section>\n");

    html
}

fn render_batch(batch: &BatchDisplay) -> String {
    let mut html = String::new();

    html.push_str("<section id=\"batchResultSection\" class=\"batch-result\">\n");
    let _ = writeln!(
        html,
        r#"<div class="summary"><span class="summary-positive">{}</span><span class="summary-neutral">{}</span><span class="summary-negative">{}</span></div>"#,
        batch.summary.positive, batch.summary.neutral, batch.summary.negative
    );
    html.push_str("<table>\n<tbody id=\"batchResultsBody\">\n");
    for row in &batch.rows {
        let _ = writeln!(
            html,
            r#"<tr><td>{}</td><td>{}</td><td><span class="history-sentiment {}">{} {}</span></td><td>{}</td></tr>"#,
            row.index,
            escape_html(&row.text),
            row.sentiment.css_class(),
            escape_html(&row.emoji),
            escape_html(row.sentiment.as_str()),
            row.confidence
        );
    }
    html.push_str("</tbody>\n</table>\n</section>\n");

    html
}

fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return EMPTY_HISTORY.to_string();
    }

    entries
        .iter()
        .map(|entry| {
            format!(
                r#"<div class="history-item"><span class="history-text">{}</span><span class="history-sentiment {}">{}</span></div>"#,
                escape_html(&entry.text),
                entry.sentiment.css_class(),
                escape_html(entry.sentiment.as_str())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl View for HtmlView {
    fn show_health(&self, status: HealthStatus) {
        self.lock().status = status;
    }

    fn set_loading(&self, visible: bool) {
        self.lock().loading = visible;
    }

    fn alert(&self, message: &str) {
        self.lock().alerts.push(message.to_string());
    }

    fn confirm(&self, _prompt: &str) -> bool {
        self.confirm_answer
    }

    fn show_result(&self, result: &ResultDisplay) {
        self.lock().result = Some(render_result(result));
    }

    fn hide_result(&self) {
        self.lock().result = None;
    }

    fn show_batch(&self, batch: &BatchDisplay) {
        self.lock().batch = Some(render_batch(batch));
    }

    fn render_history(&self, entries: &[HistoryEntry]) {
        self.lock().history = render_history(entries);
    }
}
