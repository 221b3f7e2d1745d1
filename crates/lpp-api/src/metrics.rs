//! Prometheus metrics for request traffic and scoring outcomes.

use std::sync::LazyLock;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use regex::Regex;

static UUID_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("uuid pattern is valid")
});
static NUMERIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+").expect("numeric pattern is valid"));

/// Initialize Prometheus metrics exporter
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0],
        )?
        // Totals of every module fit under 20 on their raw scale
        .set_buckets_for_metric(
            Matcher::Full("scoring_total_score".to_string()),
            &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0, 12.0, 15.0, 18.0],
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Middleware to record HTTP request metrics
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let in_flight = gauge!("http_requests_in_flight", "method" => method.clone(), "path" => path.clone());
    in_flight.increment(1.0);
    let response = next.run(req).await;
    in_flight.decrement(1.0);

    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// Replace UUIDs and numeric IDs with placeholders to bound label cardinality
fn normalize_path(path: &str) -> String {
    let without_uuids = UUID_SEGMENT.replace_all(path, ":id");
    NUMERIC_SEGMENT
        .replace_all(&without_uuids, "/:id")
        .into_owned()
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

/// Record a scored attempt
pub fn record_evaluation(module: &str, total: f64) {
    counter!(
        "scoring_evaluations_total",
        "module" => module.to_string(),
        "status" => "success"
    )
    .increment(1);

    histogram!("scoring_total_score", "module" => module.to_string()).record(total);
}

/// Record an attempt the engine refused to score
pub fn record_scoring_failure(module: &str) {
    counter!(
        "scoring_evaluations_total",
        "module" => module.to_string(),
        "status" => "failure"
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path("/v1/attempts/550e8400-e29b-41d4-a716-446655440000"),
            "/v1/attempts/:id"
        );
        assert_eq!(normalize_path("/v1/questions/123"), "/v1/questions/:id");
        assert_eq!(
            normalize_path("/v1/scoring/read-aloud/evaluate"),
            "/v1/scoring/read-aloud/evaluate"
        );
        assert_eq!(normalize_path("/health"), "/health");
    }

    #[test]
    fn test_recorders_without_exporter() {
        // No recorder installed: the macros are no-ops and must not panic
        record_evaluation("read-aloud", 12.5);
        record_scoring_failure("read-aloud");
    }
}
