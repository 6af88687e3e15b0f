//! # SocialPulse
//!
//! Dashboard client for a sentiment-analysis API: single and batch analysis,
//! an API status indicator, and a bounded history of past analyses kept in
//! local storage.
//!
//! ## Modules
//!
//! - [`api`]: REST client for the sentiment backend
//! - [`dashboard`]: View controller tying API, view and history together
//! - [`history`]: Bounded newest-first history list
//! - [`store`]: Key/value persistence (file-backed or in-memory)
//! - [`view`]: Rendering surfaces (terminal, HTML)
//! - [`health`]: Periodic API health checks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use socialpulse::api::{ClientConfig, HttpSentimentClient};
//! use socialpulse::dashboard::Dashboard;
//! use socialpulse::store::FileStore;
//! use socialpulse::view::ConsoleView;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpSentimentClient::new(ClientConfig::default())?;
//!     let store = FileStore::open("./socialpulse_data")?;
//!
//!     let dashboard = Dashboard::new(
//!         Arc::new(api),
//!         Arc::new(ConsoleView::new()),
//!         Arc::new(store),
//!         "bert",
//!     );
//!
//!     dashboard.initialize().await;
//!     let result = dashboard.analyze("great service").await?;
//!     println!("{} ({}%)", result.sentiment, result.confidence);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod escape;
pub mod health;
pub mod history;
pub mod sentiment;
pub mod store;
pub mod view;

// Re-export top-level types for convenience
pub use api::{
    AnalysisResult, ApiError, BatchResult, ClientConfig, HttpSentimentClient, SentimentApi,
};

pub use dashboard::{Dashboard, DashboardError, DashboardResult, DashboardState};

pub use history::{History, HistoryEntry, HISTORY_CAPACITY, HISTORY_KEY};

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

pub use view::{ConsoleView, HealthStatus, HtmlView, View};

pub use config::{Config, ConfigError, LoggingConfig};

pub use escape::escape_html;
pub use health::HealthMonitor;
pub use sentiment::Sentiment;
