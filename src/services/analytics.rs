//! Product analytics events.

use serde_json::Value;

/// Event recorded when a guess wins the round.
pub const GUESS_SUCCESS_EVENT: &str = "guess_success";

/// Fire-and-forget analytics sink.
pub trait Analytics: Send + Sync {
    /// Record `event` with a JSON payload.
    fn track(&self, event: &str, payload: Value);
}

/// Analytics sink that emits events on the `analytics` tracing target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn track(&self, event: &str, payload: Value) {
        tracing::info!(target: "analytics", event = event, payload = %payload, "Analytics event");
    }
}
