mod handlers;
mod metrics;
mod routes;

use arbiter_common::config::Settings;
use arbiter_engine::{Evaluator, ExecutionQueue, HttpJudgeClient, RetryPolicy};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

pub struct AppState {
    pub evaluator: Evaluator,
    pub queue: Arc<ExecutionQueue>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Arbiter API booting...");

    let settings = Settings::from_env();
    info!(
        judge_url = %settings.judge_url,
        max_concurrent = settings.max_concurrent_executions,
        max_retries = settings.max_retries,
        "Loaded settings"
    );

    metrics::init_metrics();

    // The queue is process-wide by design: it protects the judge backend,
    // a global resource. It is owned here and injected, never a global.
    let queue = Arc::new(ExecutionQueue::new(settings.max_concurrent_executions));
    let client = Arc::new(HttpJudgeClient::new(
        &settings.judge_url,
        settings.judge_api_key.clone(),
    ));
    let retry = RetryPolicy::new(settings.max_retries, settings.retry_initial_delay_ms);
    let evaluator = Evaluator::new(client, Arc::clone(&queue), retry);

    let state = Arc::new(AppState { evaluator, queue });

    let app = Router::new().merge(routes::routes()).with_state(state);

    let listener = TcpListener::bind(&settings.bind_addr)
        .await
        .expect("Failed to bind to address");

    info!("HTTP server listening on {}", settings.bind_addr);
    info!("Ready to accept submissions");

    axum::serve(listener, app).await.expect("Server error");
}
