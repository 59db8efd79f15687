// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics, MCP_MESSAGES, REQUESTS_TOTAL, TRANSLATIONS, UPSTREAM_CALLS,
    UPSTREAM_DURATION,
};

/// Helper to record inbound request metrics
pub fn record_request(endpoint: &str, status_code: u16) {
    REQUESTS_TOTAL
        .with_label_values(&[endpoint, &status_code.to_string()])
        .inc();
}

/// Helper to record an outbound call to AMap or the translation API
pub fn record_upstream_call(service: &str, success: bool, duration_secs: f64) {
    let outcome = if success { "ok" } else { "error" };
    UPSTREAM_CALLS.with_label_values(&[service, outcome]).inc();
    UPSTREAM_DURATION
        .with_label_values(&[service])
        .observe(duration_secs);
}

pub fn record_translation(outcome: &str) {
    TRANSLATIONS.with_label_values(&[outcome]).inc();
}

pub fn record_mcp_message(method: &str) {
    MCP_MESSAGES.with_label_values(&[method]).inc();
}
