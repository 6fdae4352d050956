//! Prometheus metrics for legalease-service.
//!
//! Provides HTTP, session and AI provider metrics for observability.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

// HTTP metrics
pub static HTTP_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static HTTP_REQUEST_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

// Session metrics
pub static CHAT_SESSIONS_ACTIVE: OnceLock<IntGauge> = OnceLock::new();

// AI-specific metrics
pub static GENAI_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static GENAI_TOKENS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static GENAI_PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static GENAI_PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Must be called once at startup; later calls are no-ops.
pub fn init_metrics() {
    if REGISTRY.get().is_some() {
        return;
    }

    match register_metrics() {
        Ok(()) => tracing::info!("Prometheus metrics initialized"),
        Err(e) => tracing::error!(error = %e, "Failed to initialize Prometheus metrics"),
    }
}

fn register_metrics() -> prometheus::Result<()> {
    let registry = Registry::new();

    let http_requests_total = IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests"),
        &["method", "path", "status"],
    )?;

    let http_request_duration = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["method", "path"],
    )?;

    let sessions_active = IntGauge::new(
        "chat_sessions_active",
        "Number of conversation sessions held in memory",
    )?;

    // outcome: success, validation_error, unavailable, failure, timeout
    let genai_requests = IntCounterVec::new(
        Opts::new("genai_requests_total", "Total GenAI requests"),
        &["operation", "outcome"],
    )?;

    let genai_tokens = IntCounterVec::new(
        Opts::new("genai_tokens_total", "Total tokens processed"),
        &["model", "type"], // type: input, output
    )?;

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "genai_provider_latency_seconds",
            "AI provider API latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["provider", "model"],
    )?;

    let provider_errors = IntCounterVec::new(
        Opts::new("genai_provider_errors_total", "Total AI provider errors"),
        &["provider", "error_type"],
    )?;

    registry.register(Box::new(http_requests_total.clone()))?;
    registry.register(Box::new(http_request_duration.clone()))?;
    registry.register(Box::new(sessions_active.clone()))?;
    registry.register(Box::new(genai_requests.clone()))?;
    registry.register(Box::new(genai_tokens.clone()))?;
    registry.register(Box::new(provider_latency.clone()))?;
    registry.register(Box::new(provider_errors.clone()))?;

    // Initialize globals
    if REGISTRY.set(registry).is_err() {
        // Lost a race with a concurrent initializer; its metrics win.
        return Ok(());
    }
    let _ = HTTP_REQUESTS_TOTAL.set(http_requests_total);
    let _ = HTTP_REQUEST_DURATION_SECONDS.set(http_request_duration);
    let _ = CHAT_SESSIONS_ACTIVE.set(sessions_active);
    let _ = GENAI_REQUESTS_TOTAL.set(genai_requests);
    let _ = GENAI_TOKENS_TOTAL.set(genai_tokens);
    let _ = GENAI_PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = GENAI_PROVIDER_ERRORS_TOTAL.set(provider_errors);

    Ok(())
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

// Helper functions for recording metrics

/// Record a completed HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    if let Some(counter) = HTTP_REQUESTS_TOTAL.get() {
        counter
            .with_label_values(&[method, path, &status.to_string()])
            .inc();
    }
    if let Some(histogram) = HTTP_REQUEST_DURATION_SECONDS.get() {
        histogram
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }
}

pub fn set_active_sessions(count: usize) {
    if let Some(gauge) = CHAT_SESSIONS_ACTIVE.get() {
        gauge.set(count as i64);
    }
}

/// Record the outcome of an assistant operation (chat, cite, categorize).
pub fn record_genai_request(operation: &str, outcome: &str) {
    if let Some(counter) = GENAI_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[operation, outcome]).inc();
    }
}

pub fn record_tokens(model: &str, input_tokens: i32, output_tokens: i32) {
    if let Some(counter) = GENAI_TOKENS_TOTAL.get() {
        counter
            .with_label_values(&[model, "input"])
            .inc_by(input_tokens.max(0) as u64);
        counter
            .with_label_values(&[model, "output"])
            .inc_by(output_tokens.max(0) as u64);
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(histogram) = GENAI_PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(counter) = GENAI_PROVIDER_ERRORS_TOTAL.get() {
        counter.with_label_values(&[provider, error_type]).inc();
    }
}
