//! Terminal rendering surface

use chrono::{Local, TimeZone};
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

use super::{BatchDisplay, HealthStatus, ResultDisplay, View};
use crate::history::HistoryEntry;

const BAR_CELLS: usize = 20;

/// [`View`] that prints to the terminal.
///
/// The loading indicator is a spinner on stderr; alerts go to stderr, panels
/// to stdout.
pub struct ConsoleView {
    spinner: Mutex<Option<ProgressBar>>,
    assume_yes: bool,
    quiet: bool,
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleView {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            assume_yes: false,
            quiet: false,
        }
    }

    /// Skip interactive confirmation and accept
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Suppress panels (status, result, batch, history) for machine-readable output.
    /// Alerts and the spinner still show.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

fn bar(width: f64) -> String {
    let filled = ((width / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}

fn format_timestamp(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Collapse newlines so one entry stays on one line
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl View for ConsoleView {
    fn show_health(&self, status: HealthStatus) {
        if self.quiet {
            return;
        }
        println!("API Status: {}", status.label());
    }

    fn set_loading(&self, visible: bool) {
        let mut spinner = self.spinner.lock().unwrap_or_else(|p| p.into_inner());
        if visible {
            let progress = ProgressBar::new_spinner();
            progress.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
            progress.set_message("Analyzing...");
            progress.enable_steady_tick(Duration::from_millis(120));
            *spinner = Some(progress);
        } else if let Some(progress) = spinner.take() {
            progress.finish_and_clear();
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        match Confirm::new().with_prompt(prompt).default(false).interact() {
            Ok(answer) => answer,
            Err(e) => {
                tracing::debug!(error = %e, "Confirmation prompt unavailable, declining");
                false
            }
        }
    }

    fn show_result(&self, result: &ResultDisplay) {
        if self.quiet {
            return;
        }

        println!();
        println!("{} {}", result.emoji, result.label);
        println!("Confidence: {:>6}  {}", result.confidence, bar(result.confidence_width));
        println!();
        for probability in &result.bars {
            println!(
                "  {:<9} {}  {}",
                probability.sentiment.as_str(),
                bar(probability.width),
                probability.label
            );
        }
        println!();
        println!("Model: {}", result.model_name);
    }

    fn hide_result(&self) {}

    fn show_batch(&self, batch: &BatchDisplay) {
        if self.quiet {
            return;
        }

        println!(
            "Positive: {}  Neutral: {}  Negative: {}",
            batch.summary.positive, batch.summary.neutral, batch.summary.negative
        );
        println!();
        println!("{:<4} {:<50} {:<14} {}", "#", "Text", "Sentiment", "Confidence");
        println!("{}", "-".repeat(80));
        for row in &batch.rows {
            println!(
                "{:<4} {:<50} {:<14} {}",
                row.index,
                one_line(&row.text),
                format!("{} {}", row.emoji, row.sentiment),
                row.confidence
            );
        }
    }

    fn render_history(&self, entries: &[HistoryEntry]) {
        if self.quiet {
            return;
        }

        if entries.is_empty() {
            println!("No analyses yet");
            return;
        }

        println!("{:<17} {:<10} {}", "When", "Sentiment", "Text");
        println!("{}", "-".repeat(60));
        for entry in entries {
            println!(
                "{:<17} {:<10} {}",
                format_timestamp(entry.timestamp),
                entry.sentiment.as_str(),
                one_line(&entry.text)
            );
        }
    }
}
