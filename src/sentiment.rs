//! Sentiment labels
//!
//! The labels the sentiment API returns, plus a catch-all for anything it
//! might return that we don't recognize.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment label attached to an analysis
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    /// A label the API returned that is not one of the three known ones.
    /// Displayed like neutral.
    Other(String),
}

impl Sentiment {
    /// Lowercase label as sent by the API
    pub fn as_str(&self) -> &str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::Other(label) => label,
        }
    }

    /// Emoji shown next to a single-text result
    pub fn emoji(&self) -> &'static str {
        match self {
            Sentiment::Positive => "😊",
            Sentiment::Negative => "😞",
            Sentiment::Neutral | Sentiment::Other(_) => "😐",
        }
    }

    /// Uppercase label for the result panel
    pub fn display_label(&self) -> String {
        self.as_str().to_uppercase()
    }

    /// Style class for markup. Unknown labels never reach an attribute verbatim.
    pub fn css_class(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::Other(_) => "unknown",
        }
    }
}

impl From<String> for Sentiment {
    fn from(label: String) -> Self {
        match label.as_str() {
            "positive" => Sentiment::Positive,
            "neutral" => Sentiment::Neutral,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Other(label),
        }
    }
}

impl From<&str> for Sentiment {
    fn from(label: &str) -> Self {
        Sentiment::from(label.to_string())
    }
}

impl From<Sentiment> for String {
    fn from(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable name for the model identifier the API reports
pub fn model_display_name(model_used: &str) -> &'static str {
    if model_used == "bert" {
        "BERT (CAMeLBERT)"
    } else {
        "Naive Bayes"
    }
}

/// Format a percentage the way the dashboard shows it ("92%", "87.5%")
pub fn format_percent(value: f64) -> String {
    format!("{}%", value)
}
