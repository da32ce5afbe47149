// Prometheus metrics for the Arbiter API

use arbiter_engine::QueueStatus;
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, HistogramOpts, HistogramVec, IntGauge, Opts, Registry, TextEncoder,
};

lazy_static! {
    // Global registry
    pub static ref REGISTRY: Registry = Registry::new();

    // Submissions received (counter with language label)
    pub static ref SUBMISSIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("arbiter_submissions_total", "Total number of submissions received"),
        &["language"]
    )
    .expect("metric can be created");

    // Submissions completed (counter with language and status labels)
    pub static ref SUBMISSIONS_COMPLETED: CounterVec = CounterVec::new(
        Opts::new("arbiter_submissions_completed_total", "Total number of submissions evaluated"),
        &["language", "status"]
    )
    .expect("metric can be created");

    // Requests rejected before evaluation (counter with reason label)
    pub static ref REQUESTS_REJECTED: CounterVec = CounterVec::new(
        Opts::new("arbiter_requests_rejected_total", "Total requests rejected by validation"),
        &["reason"]
    )
    .expect("metric can be created");

    // Whole-submission evaluation time histogram (in milliseconds)
    pub static ref EVALUATION_TIME: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "arbiter_evaluation_time_ms",
            "Submission evaluation time in milliseconds"
        )
        .buckets(vec![100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0, 30000.0]),
        &["language"]
    )
    .expect("metric can be created");

    // Execution queue gauges, refreshed at scrape time
    pub static ref QUEUE_RUNNING: IntGauge = IntGauge::new(
        "arbiter_queue_running",
        "Tasks currently executing against the judge backend"
    )
    .expect("metric can be created");

    pub static ref QUEUE_QUEUED: IntGauge = IntGauge::new(
        "arbiter_queue_queued",
        "Tasks waiting for an execution slot"
    )
    .expect("metric can be created");
}

/// Initialize metrics registry
pub fn init_metrics() {
    REGISTRY
        .register(Box::new(SUBMISSIONS_TOTAL.clone()))
        .expect("collector can be registered");

    REGISTRY
        .register(Box::new(SUBMISSIONS_COMPLETED.clone()))
        .expect("collector can be registered");

    REGISTRY
        .register(Box::new(REQUESTS_REJECTED.clone()))
        .expect("collector can be registered");

    REGISTRY
        .register(Box::new(EVALUATION_TIME.clone()))
        .expect("collector can be registered");

    REGISTRY
        .register(Box::new(QUEUE_RUNNING.clone()))
        .expect("collector can be registered");

    REGISTRY
        .register(Box::new(QUEUE_QUEUED.clone()))
        .expect("collector can be registered");
}

/// Render metrics in Prometheus text format
pub fn render_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Record a received submission
pub fn record_submitted(language: &str) {
    SUBMISSIONS_TOTAL.with_label_values(&[language]).inc();
}

/// Record a validation rejection
pub fn record_rejected(reason: &str) {
    REQUESTS_REJECTED.with_label_values(&[reason]).inc();
}

/// Record a completed evaluation
pub fn record_completed(language: &str, status: &str, evaluation_time_ms: f64) {
    SUBMISSIONS_COMPLETED
        .with_label_values(&[language, status])
        .inc();
    EVALUATION_TIME
        .with_label_values(&[language])
        .observe(evaluation_time_ms);
}

/// Refresh queue gauges from the admission gate
pub fn update_queue_gauges(status: QueueStatus) {
    QUEUE_RUNNING.set(status.running as i64);
    QUEUE_QUEUED.set(status.queued as i64);
}
