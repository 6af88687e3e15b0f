//! Health Monitor
//!
//! Runs the dashboard's health check at startup and then on a fixed interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::dashboard::Dashboard;

/// Default interval between health checks
pub const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(30);

/// Shortest interval the monitor accepts; shorter ones are raised to it
pub const MIN_HEALTH_INTERVAL: Duration = Duration::from_millis(10);

/// Periodically refreshes the API status indicator
pub struct HealthMonitor {
    dashboard: Arc<Dashboard>,
    interval: Duration,
    running: Arc<AtomicBool>,
}

impl HealthMonitor {
    pub fn new(dashboard: Arc<Dashboard>, interval: Duration) -> Self {
        if interval < MIN_HEALTH_INTERVAL {
            tracing::warn!(
                requested_ms = interval.as_millis() as u64,
                "Health interval too short, using minimum"
            );
        }

        Self {
            dashboard,
            interval: interval.max(MIN_HEALTH_INTERVAL),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start the background task. The first check runs immediately.
    ///
    /// The monitor counts as running as soon as this returns, so a `stop()`
    /// issued before the task is first polled still ends it.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        self.running.store(true, Ordering::SeqCst);
        let monitor = self.clone();

        tokio::spawn(async move {
            tracing::info!(
                interval_secs = monitor.interval.as_secs_f64(),
                "Starting health monitor"
            );

            let mut interval = tokio::time::interval(monitor.interval);

            loop {
                interval.tick().await;

                if !monitor.is_running() {
                    break;
                }

                monitor.dashboard.check_health().await;
            }

            tracing::info!("Health monitor stopped");
        })
    }

    /// Stop the monitor after its current tick
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
