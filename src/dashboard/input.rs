//! Input validation for the analyzers

use super::error::{DashboardError, DashboardResult};

pub const EMPTY_TEXT: &str = "Please enter a text to analyze";
pub const EMPTY_BATCH: &str = "Please enter at least one text to analyze";

/// Trim single-analysis input; blank input is a validation error
pub fn validate_text(input: &str) -> DashboardResult<String> {
    let text = input.trim();
    if text.is_empty() {
        return Err(DashboardError::Validation(EMPTY_TEXT.to_string()));
    }
    Ok(text.to_string())
}

/// Split batch input into one item per non-blank line.
///
/// The input as a whole is trimmed; individual lines are kept as typed.
pub fn split_batch(input: &str) -> DashboardResult<Vec<String>> {
    let texts: Vec<String> = input
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    if texts.is_empty() {
        return Err(DashboardError::Validation(EMPTY_BATCH.to_string()));
    }
    Ok(texts)
}
