//! Per-call performance tracking.
//!
//! Every request sent through [`ApiHttpClient`](crate::ApiHttpClient) produces
//! exactly one [`PerfRecord`], whether it succeeded, returned an error body or
//! failed in transport.

use chrono::{DateTime, Utc};

/// Latency and outcome of one API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerfRecord {
    /// Identifier of the thread that issued the call.
    pub thread_id: String,
    /// Request URL.
    pub url: String,
    /// Wall-clock time spent waiting for the response.
    pub elapsed_ms: u64,
    /// Status code, or `Exception: <message>` for transport failures.
    pub outcome: String,
    /// When the call started.
    pub started_at: DateTime<Utc>,
}

impl PerfRecord {
    pub(crate) fn outcome_for_status(status: u16) -> String {
        status.to_string()
    }

    pub(crate) fn outcome_for_error(err: &crate::Error) -> String {
        format!("Exception: {}", err)
    }

    /// Returns true if the call failed before a response arrived.
    pub fn is_exception(&self) -> bool {
        self.outcome.starts_with("Exception")
    }
}

/// Sink for perf records.
pub trait PerfTracker: Send + Sync {
    /// Record one completed call.
    fn record(&self, record: &PerfRecord);
}

/// Emits perf records as `tracing` events on the `checkout_api::perf` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPerfTracker;

impl PerfTracker for TracingPerfTracker {
    fn record(&self, record: &PerfRecord) {
        tracing::info!(
            target: "checkout_api::perf",
            thread_id = %record.thread_id,
            url = %record.url,
            elapsed_ms = record.elapsed_ms,
            outcome = %record.outcome,
            started_at = %record.started_at.to_rfc3339(),
            "API call completed"
        );
    }
}

/// Discards perf records.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPerfTracker;

impl PerfTracker for NoopPerfTracker {
    fn record(&self, _record: &PerfRecord) {}
}

impl<T: PerfTracker + ?Sized> PerfTracker for std::sync::Arc<T> {
    fn record(&self, record: &PerfRecord) {
        (**self).record(record)
    }
}
