mod common;

use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use common::{FakeApi, RecordingView, Reply};
use socialpulse::dashboard::{
    Dashboard, DashboardError, CLEAR_HISTORY_PROMPT, CONNECTION_FAILED, EMPTY_BATCH, EMPTY_TEXT,
};
use socialpulse::health::MIN_HEALTH_INTERVAL;
use socialpulse::history::{HISTORY_CAPACITY, HISTORY_KEY};
use socialpulse::store::{KeyValueStore, MemoryStore};
use socialpulse::view::{HealthStatus, HtmlView};
use socialpulse::{HealthMonitor, Sentiment};

struct Harness {
    dashboard: Arc<Dashboard>,
    api: Arc<FakeApi>,
    view: Arc<RecordingView>,
    store: Arc<MemoryStore>,
}

fn harness(api: FakeApi) -> Harness {
    harness_with_store(api, Arc::new(MemoryStore::new()))
}

fn harness_with_store(api: FakeApi, store: Arc<MemoryStore>) -> Harness {
    let api = Arc::new(api);
    let view = Arc::new(RecordingView::new());
    let dashboard = Arc::new(Dashboard::new(
        api.clone(),
        view.clone(),
        store.clone(),
        "bert",
    ));

    Harness {
        dashboard,
        api,
        view,
        store,
    }
}

#[tokio::test]
async fn test_end_to_end_single_analysis() {
    let h = harness(FakeApi::new(Reply::Body(json!({
        "success": true,
        "sentiment": "positive",
        "confidence": 92,
        "probabilities": {"positive": 92, "neutral": 5, "negative": 3},
        "model_used": "naive_bayes",
        "text": "great service"
    }))));

    let result = h
        .dashboard
        .analyze_with("great service", "naive_bayes")
        .await
        .unwrap();
    assert_eq!(result.sentiment, Sentiment::Positive);

    let requests = h.api.predict_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].text, "great service");
    assert_eq!(requests[0].model, "naive_bayes");

    let recorded = h.view.recorded();
    let display = recorded.result.unwrap();
    assert_eq!(display.emoji, "😊");
    assert_eq!(display.label, "POSITIVE");
    assert_eq!(display.confidence, "92%");
    let widths: Vec<f64> = display.bars.iter().map(|b| b.width).collect();
    assert_eq!(widths, vec![92.0, 5.0, 3.0]);
    assert_eq!(display.model_name, "Naive Bayes");

    assert_eq!(recorded.history.len(), 1);
    assert_eq!(recorded.history[0].text, "great service");
    assert_eq!(recorded.history[0].sentiment, Sentiment::Positive);
    assert!(recorded.alerts.is_empty());
}

#[tokio::test]
async fn test_loading_brackets_render_and_history() {
    let h = harness(FakeApi::new(Reply::Echo));

    h.dashboard.analyze("hello").await.unwrap();

    assert_eq!(
        h.view.recorded().events,
        vec!["loading:true", "result", "history:1", "loading:false"]
    );
}

#[tokio::test]
async fn test_text_is_trimmed_and_selected_model_sent() {
    let h = harness(FakeApi::new(Reply::Echo));
    h.dashboard.select_model("sklearn").await;

    h.dashboard.analyze("   c'est top  \n").await.unwrap();

    let requests = h.api.predict_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].text, "c'est top");
    assert_eq!(requests[0].model, "sklearn");
}

#[tokio::test]
async fn test_blank_input_makes_no_request() {
    let h = harness(FakeApi::new(Reply::Echo));

    for input in ["", "   ", "\n\t"] {
        let err = h.dashboard.analyze(input).await.unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
    }

    assert!(h.api.predict_requests().is_empty());
    let recorded = h.view.recorded();
    assert_eq!(recorded.alerts, vec![EMPTY_TEXT; 3]);
    assert!(!recorded.events.iter().any(|e| e.starts_with("loading")));
}

#[tokio::test]
async fn test_application_error_leaves_history_alone() {
    let h = harness(FakeApi::new(Reply::Echo));
    h.dashboard.analyze("first").await.unwrap();

    h.api.set_reply(Reply::Body(json!({
        "success": false,
        "error": "Aucun modèle disponible"
    })));
    let err = h.dashboard.analyze("second").await.unwrap_err();

    assert!(matches!(err, DashboardError::Application(ref m) if m == "Aucun modèle disponible"));
    let recorded = h.view.recorded();
    assert_eq!(recorded.alerts, vec!["Error: Aucun modèle disponible"]);
    assert_eq!(recorded.history.len(), 1);
    assert_eq!(h.dashboard.history().await.len(), 1);
    assert!(!recorded.loading);
    assert_eq!(recorded.events.last().unwrap(), "loading:false");
}

#[tokio::test]
async fn test_transport_error_shows_generic_message() {
    let h = harness(FakeApi::new(Reply::Down));

    let err = h.dashboard.analyze("hello").await.unwrap_err();

    assert!(matches!(err, DashboardError::Transport(_)));
    let recorded = h.view.recorded();
    assert_eq!(recorded.alerts, vec![CONNECTION_FAILED]);
    assert!(recorded.result.is_none());
    assert!(recorded.history.is_empty());
    assert!(!recorded.loading);
    assert!(!h.store.contains(HISTORY_KEY));
}

#[tokio::test]
async fn test_history_keeps_newest_twenty() {
    let h = harness(FakeApi::new(Reply::Echo));

    for i in 0..5 {
        h.dashboard.analyze(&format!("text {}", i)).await.unwrap();
    }
    let history = h.dashboard.history().await;
    assert_eq!(history.len(), 5);
    assert_eq!(history[0].text, "text 4");
    assert_eq!(history[4].text, "text 0");

    for i in 5..25 {
        h.dashboard.analyze(&format!("text {}", i)).await.unwrap();
    }
    let history = h.dashboard.history().await;
    assert_eq!(history.len(), HISTORY_CAPACITY);
    assert_eq!(history[0].text, "text 24");
    assert_eq!(history[HISTORY_CAPACITY - 1].text, "text 5");
    assert!(history.iter().all(|e| e.text != "text 0" && e.text != "text 4"));
    assert!(history.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[tokio::test]
async fn test_history_survives_restart() {
    let store = Arc::new(MemoryStore::new());
    let first = harness_with_store(FakeApi::new(Reply::Echo), store.clone());
    first.dashboard.analyze("remember me").await.unwrap();

    let second = harness_with_store(FakeApi::new(Reply::Echo), store);
    second.dashboard.initialize().await;

    let recorded = second.view.recorded();
    assert_eq!(recorded.history.len(), 1);
    assert_eq!(recorded.history[0].text, "remember me");
    assert_eq!(recorded.health, HealthStatus::Online);
}

#[tokio::test]
async fn test_clear_history_requires_confirmation() {
    let h = harness(FakeApi::new(Reply::Echo));
    h.dashboard.analyze("one").await.unwrap();
    h.dashboard.analyze("two").await.unwrap();

    h.view.answer_confirm(false);
    assert!(!h.dashboard.clear_history().await);
    assert_eq!(h.dashboard.history().await.len(), 2);
    assert!(h.store.contains(HISTORY_KEY));

    h.view.answer_confirm(true);
    assert!(h.dashboard.clear_history().await);
    assert!(h.dashboard.history().await.is_empty());
    assert!(!h.store.contains(HISTORY_KEY));
    assert_eq!(h.store.get(HISTORY_KEY).unwrap(), None);

    let recorded = h.view.recorded();
    assert_eq!(recorded.confirm_prompts, vec![CLEAR_HISTORY_PROMPT; 2]);
    assert!(recorded.history.is_empty());
    assert_eq!(recorded.events.last().unwrap(), "history:0");
}

#[tokio::test]
async fn test_clear_history_prompt_runs_off_the_runtime_thread() {
    let h = harness(FakeApi::new(Reply::Echo));
    h.dashboard.analyze("one").await.unwrap();
    h.view.answer_confirm(true);

    assert!(h.dashboard.clear_history().await);

    let recorded = h.view.recorded();
    assert_eq!(recorded.confirm_threads.len(), 1);
    assert_ne!(recorded.confirm_threads[0], std::thread::current().id());
    assert!(h.dashboard.history().await.is_empty());
}

#[tokio::test]
async fn test_batch_splits_lines_and_skips_history() {
    let h = harness(FakeApi::new(Reply::Echo));

    let batch = h.dashboard.analyze_batch("a\n\nb\n  \nc").await.unwrap();

    let requests = h.api.batch_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].texts, vec!["a", "b", "c"]);
    assert_eq!(requests[0].model, "bert");
    assert_eq!(batch.results.len(), 3);

    let recorded = h.view.recorded();
    let display = recorded.batch.unwrap();
    assert_eq!(display.summary.positive, 3);
    let indexes: Vec<usize> = display.rows.iter().map(|r| r.index).collect();
    assert_eq!(indexes, vec![1, 2, 3]);
    assert_eq!(display.rows[0].emoji, "😊");
    assert_eq!(display.rows[0].confidence, "75%");

    assert!(h.dashboard.history().await.is_empty());
    assert!(!recorded.events.iter().any(|e| e.starts_with("history")));
    assert_eq!(
        recorded.events,
        vec!["loading:true", "batch", "loading:false"]
    );
}

#[tokio::test]
async fn test_blank_batch_makes_no_request() {
    let h = harness(FakeApi::new(Reply::Echo));

    let err = h.dashboard.analyze_batch(" \n  \n").await.unwrap_err();

    assert!(matches!(err, DashboardError::Validation(_)));
    assert!(h.api.batch_requests().is_empty());
    assert_eq!(h.view.recorded().alerts, vec![EMPTY_BATCH]);
}

#[tokio::test]
async fn test_batch_failures_clear_loading() {
    let h = harness(FakeApi::new(Reply::Body(json!({
        "success": false,
        "error": "Maximum 100 textes par requête"
    }))));

    let err = h.dashboard.analyze_batch("a\nb").await.unwrap_err();
    assert!(matches!(err, DashboardError::Application(_)));

    h.api.set_reply(Reply::Down);
    let err = h.dashboard.analyze_batch("a\nb").await.unwrap_err();
    assert!(matches!(err, DashboardError::Transport(_)));

    let recorded = h.view.recorded();
    assert_eq!(
        recorded.alerts,
        vec!["Error: Maximum 100 textes par requête", CONNECTION_FAILED]
    );
    assert!(recorded.batch.is_none());
    assert!(!recorded.loading);
}

#[tokio::test]
async fn test_dismiss_result() {
    let h = harness(FakeApi::new(Reply::Echo));
    h.dashboard.analyze("hello").await.unwrap();
    assert!(h.dashboard.state().await.last_result.is_some());

    h.dashboard.dismiss_result().await;

    assert!(h.dashboard.state().await.last_result.is_none());
    assert!(h.view.recorded().result.is_none());
    assert_eq!(h.dashboard.history().await.len(), 1);
}

#[tokio::test]
async fn test_health_states() {
    let h = harness(FakeApi::new(Reply::Echo));

    assert_eq!(h.dashboard.check_health().await, HealthStatus::Online);

    h.api.set_health(Some(json!({"status": "down"})));
    assert_eq!(h.dashboard.check_health().await, HealthStatus::Offline);
    assert_eq!(h.view.recorded().health, HealthStatus::Offline);

    h.api.set_health(Some(json!({"status": "ok"})));
    assert_eq!(h.dashboard.check_health().await, HealthStatus::Online);

    h.api.set_health(None);
    assert_eq!(h.dashboard.check_health().await, HealthStatus::Offline);
    assert!(h.view.recorded().alerts.is_empty());
}

#[tokio::test]
async fn test_overlapping_requests_keep_loading_visible() {
    let gate = Arc::new(Semaphore::new(0));
    let h = harness(FakeApi::new(Reply::Echo).gated(gate.clone()));

    let driver = async {
        while h.dashboard.loading().in_flight() < 2 {
            tokio::task::yield_now().await;
        }
        assert!(h.view.recorded().loading);

        gate.add_permits(1);
        while h.dashboard.loading().in_flight() > 1 {
            tokio::task::yield_now().await;
        }
        assert!(h.view.recorded().loading);

        gate.add_permits(1);
    };

    let (single, batch, ()) = tokio::join!(
        h.dashboard.analyze("one"),
        h.dashboard.analyze_batch("two\nthree"),
        driver
    );

    assert!(single.is_ok());
    assert!(batch.is_ok());
    let recorded = h.view.recorded();
    assert!(!recorded.loading);
    let toggles: Vec<&String> = recorded
        .events
        .iter()
        .filter(|e| e.starts_with("loading"))
        .collect();
    assert_eq!(toggles, vec!["loading:true", "loading:false"]);
}

#[tokio::test]
async fn test_health_monitor_polls_until_stopped() {
    let h = harness(FakeApi::new(Reply::Echo));
    let monitor = Arc::new(HealthMonitor::new(
        h.dashboard.clone(),
        Duration::from_millis(10),
    ));

    let handle = monitor.clone().start();
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(monitor.is_running());
    assert!(h.api.health_calls.load(Ordering::SeqCst) >= 2);
    assert_eq!(h.view.recorded().health, HealthStatus::Online);

    monitor.stop();
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("monitor did not stop")
        .unwrap();
    assert!(!monitor.is_running());
}

#[tokio::test]
async fn test_health_monitor_stopped_before_first_tick() {
    let h = harness(FakeApi::new(Reply::Echo));
    let monitor = Arc::new(HealthMonitor::new(
        h.dashboard.clone(),
        Duration::from_millis(10),
    ));

    let handle = monitor.clone().start();
    assert!(monitor.is_running());
    monitor.stop();

    tokio::time::timeout(Duration::from_millis(300), handle)
        .await
        .expect("monitor kept polling after stop")
        .unwrap();
    assert!(!monitor.is_running());
    assert_eq!(h.api.health_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_health_monitor_zero_interval_is_raised() {
    let h = harness(FakeApi::new(Reply::Echo));
    let monitor = Arc::new(HealthMonitor::new(h.dashboard.clone(), Duration::ZERO));
    assert_eq!(monitor.interval(), MIN_HEALTH_INTERVAL);

    let handle = monitor.clone().start();
    tokio::time::sleep(Duration::from_millis(30)).await;
    monitor.stop();

    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("monitor did not stop")
        .expect("monitor task panicked");
    assert!(h.api.health_calls.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn test_markup_escapes_analyzed_text() {
    let api = Arc::new(FakeApi::new(Reply::Echo));
    let view = Arc::new(HtmlView::new());
    let dashboard = Dashboard::new(api, view.clone(), Arc::new(MemoryStore::new()), "bert");

    dashboard.analyze("<script>alert(1)</script>").await.unwrap();
    dashboard
        .analyze_batch("<script>alert(2)</script>\nfine")
        .await
        .unwrap();

    let history = view.history_html();
    assert!(history.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!history.contains("<script>"));

    let batch = view.batch_html().unwrap();
    assert!(batch.contains("&lt;script&gt;alert(2)&lt;/script&gt;"));
    assert!(!batch.contains("<script>"));

    assert!(!view.render_page().contains("<script>"));
}
