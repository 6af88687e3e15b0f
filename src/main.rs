//! SocialPulse CLI
//!
//! Command-line dashboard for the sentiment API:
//! - Check API status
//! - Analyze one text or a batch
//! - Browse and clear the local history
//! - Render an HTML snapshot of the dashboard

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use socialpulse::api::{BatchResult, HttpSentimentClient};
use socialpulse::config::{generate_default_config, Config, LoggingConfig};
use socialpulse::dashboard::Dashboard;
use socialpulse::health::HealthMonitor;
use socialpulse::store::FileStore;
use socialpulse::view::{ConsoleView, HealthStatus, HtmlView, View};

#[derive(Parser)]
#[command(name = "socialpulse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sentiment analysis dashboard")]
#[command(long_about = "SocialPulse sends text to a sentiment-analysis API and shows the result.\nSingle analyses are kept in a local history of the last 20 entries.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sentiment API URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to a config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (csv is only available for batch)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether the sentiment API is up
    Status,

    /// List the models the API offers
    Models,

    /// Analyze a single text
    Analyze {
        /// Text to analyze
        text: String,
        /// Model identifier (default from config)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Analyze several texts, one per line
    Batch {
        /// Texts to analyze (each argument is one line)
        texts: Vec<String>,
        /// Read lines from a file instead
        #[arg(long)]
        file: Option<PathBuf>,
        /// Model identifier (default from config)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Show or clear the analysis history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Keep checking API status until interrupted
    Watch {
        /// Seconds between checks (default from config)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
    },

    /// Render an HTML snapshot of the dashboard
    Report {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List past analyses, newest first
    List,
    /// Delete the whole history
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);
    tracing::debug!(api = %config.api.base_url, "SocialPulse v{}", env!("CARGO_PKG_VERSION"));

    check_format(&cli.command, cli.format)?;

    let machine_readable = cli.format != OutputFormat::Table;

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }

        Commands::Status => {
            let view = Arc::new(ConsoleView::new().quiet(machine_readable));
            let dashboard = build_dashboard(&config, view)?;

            let status = dashboard.check_health().await;
            let state = dashboard.state().await;

            if machine_readable {
                let body = serde_json::json!({
                    "status": status,
                    "api_url": config.api.base_url,
                    "models": state.last_health.and_then(|h| h.models),
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else if let Some(models) = state.last_health.and_then(|h| h.models) {
                println!();
                println!("Models:");
                println!("  bert:    {}", if models.bert_loaded { "loaded" } else { "not loaded" });
                println!("  sklearn: {}", if models.sklearn_loaded { "loaded" } else { "not loaded" });
            }

            if status != HealthStatus::Online {
                if !machine_readable {
                    eprintln!();
                    eprintln!("Cannot reach the sentiment API at {}", config.api.base_url);
                }
                std::process::exit(1);
            }
        }

        Commands::Models => {
            let view = Arc::new(ConsoleView::new());
            let dashboard = build_dashboard(&config, view)?;

            let Ok(models) = dashboard.models().await else {
                std::process::exit(1);
            };

            if machine_readable {
                println!("{}", serde_json::to_string_pretty(&models)?);
            } else if models.available_models.is_empty() {
                println!("The API did not report any models.");
            } else {
                println!("{:<10} {:<36} {:<8} {}", "Model", "Name", "Loaded", "Description");
                println!("{}", "-".repeat(80));
                for id in &models.available_models {
                    let info = models.info(id).unwrap_or_default();
                    let marker = if models.default.as_deref() == Some(id.as_str()) {
                        "*"
                    } else {
                        ""
                    };
                    println!(
                        "{:<10} {:<36} {:<8} {}",
                        format!("{}{}", id, marker),
                        info.name,
                        if info.loaded { "yes" } else { "no" },
                        info.description
                    );
                }
            }
        }

        Commands::Analyze { text, model } => {
            let view = Arc::new(ConsoleView::new().quiet(machine_readable));
            let dashboard = build_dashboard(&config, view)?;
            let model = model.unwrap_or_else(|| config.api.model.clone());

            let Ok(result) = dashboard.analyze_with(&text, &model).await else {
                std::process::exit(1);
            };

            if machine_readable {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }

        Commands::Batch { texts, file, model } => {
            let input = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => texts.join("\n"),
            };

            let view = Arc::new(ConsoleView::new().quiet(machine_readable));
            let dashboard = build_dashboard(&config, view)?;
            let model = model.unwrap_or_else(|| config.api.model.clone());

            let Ok(batch) = dashboard.analyze_batch_with(&input, &model).await else {
                std::process::exit(1);
            };

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&batch)?),
                OutputFormat::Csv => print_batch_csv(&batch)?,
                OutputFormat::Table => {}
            }
        }

        Commands::History { action } => match action.unwrap_or(HistoryAction::List) {
            HistoryAction::List => {
                let view = Arc::new(ConsoleView::new().quiet(machine_readable));
                let dashboard = build_dashboard(&config, view)?;

                if machine_readable {
                    let entries = dashboard.history().await;
                    println!("{}", serde_json::to_string_pretty(&entries)?);
                } else {
                    dashboard.render_history().await;
                }
            }
            HistoryAction::Clear { yes } => {
                let view = Arc::new(ConsoleView::new().assume_yes(yes).quiet(true));
                let dashboard = build_dashboard(&config, view)?;

                if dashboard.clear_history().await {
                    println!("History cleared");
                } else {
                    println!("History unchanged");
                }
            }
        },

        Commands::Watch { interval } => {
            let view = Arc::new(ConsoleView::new());
            let dashboard = Arc::new(build_dashboard(&config, view)?);
            let interval = interval
                .map(std::time::Duration::from_secs)
                .unwrap_or_else(|| config.api.health_interval());

            let monitor = Arc::new(HealthMonitor::new(dashboard, interval));
            let handle = monitor.clone().start();
            println!(
                "Checking {} every {}s, Ctrl+C to stop",
                config.api.base_url,
                monitor.interval().as_secs_f64()
            );

            tokio::signal::ctrl_c()
                .await
                .context("installing Ctrl+C handler")?;

            monitor.stop();
            handle.abort();
        }

        Commands::Report { output } => {
            let view = Arc::new(HtmlView::new());
            let dashboard = build_dashboard(&config, view.clone())?;

            dashboard.initialize().await;
            let page = view.render_page();

            match output {
                Some(path) => {
                    std::fs::write(&path, page)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Report written to {}", path.display());
                }
                None => print!("{}", page),
            }
        }
    }

    Ok(())
}

fn build_dashboard(config: &Config, view: Arc<dyn View>) -> anyhow::Result<Dashboard> {
    let api = HttpSentimentClient::new(config.api.client_config())?;
    let data_dir = config.history.data_path();
    let store = FileStore::open(&data_dir)
        .with_context(|| format!("opening history store at {}", data_dir.display()))?;

    tracing::debug!(
        api = %api.config().base_url,
        timeout_ms = ?api.config().request_timeout_ms,
        path = %store.data_dir().display(),
        "Using sentiment API and history store"
    );

    Ok(Dashboard::new(
        Arc::new(api),
        view,
        Arc::new(store),
        config.api.model.clone(),
    ))
}

/// CSV output only exists for batch results
fn check_format(command: &Commands, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Csv && !matches!(command, Commands::Batch { .. }) {
        anyhow::bail!("--format csv is only supported by the batch command");
    }
    Ok(())
}

fn print_batch_csv(batch: &BatchResult) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(["index", "text", "sentiment", "emoji", "confidence"])?;

    for (i, item) in batch.results.iter().enumerate() {
        writer.write_record([
            (i + 1).to_string(),
            item.text.clone(),
            item.sentiment.to_string(),
            item.emoji.clone(),
            item.confidence.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("socialpulse={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}
