//! Prometheus metrics
//!
//! Request/error counters and dispatch latency, exported at `/metrics`.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::time::Duration;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder. Safe to call once per process;
/// later calls return the existing handle.
pub fn init_metrics() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder");

            metrics::describe_counter!(
                "gateway_requests_total",
                "Tool invocations received, labeled by tool"
            );
            metrics::describe_counter!(
                "gateway_failures_total",
                "Dispatches that ended in the failure envelope, labeled by tool"
            );
            metrics::describe_histogram!(
                "gateway_dispatch_seconds",
                "Wall-clock dispatch duration, labeled by tool"
            );

            handle
        })
        .clone()
}

/// Count one received invocation
pub fn record_request(tool: &str) {
    metrics::counter!("gateway_requests_total", "tool" => tool.to_string()).increment(1);
}

/// Count one normalized failure
pub fn record_dispatch_failure(tool: &str) {
    metrics::counter!("gateway_failures_total", "tool" => tool.to_string()).increment(1);
}

/// Record dispatch duration
pub fn record_dispatch(tool: &str, elapsed: Duration) {
    metrics::histogram!("gateway_dispatch_seconds", "tool" => tool.to_string())
        .record(elapsed.as_secs_f64());
}

/// Render the current metrics snapshot
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_is_idempotent_and_renders() {
        let _ = init_metrics();
        let _ = init_metrics();

        record_request("routing");
        record_dispatch("routing", Duration::from_millis(5));
        record_dispatch_failure("routing");

        let rendered = metrics_handler().await;
        assert!(rendered.contains("gateway_requests_total"));
    }
}
