//! Translation and lead-capture metrics.
//!
//! Counters are plain atomics so render passes and request handlers can record
//! without coordination. The process-wide instance backs the
//! `/internal/i18n-metrics` endpoint; tests build their own with `new()`.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Site metrics counters.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Keys that resolved to a dictionary string
    resolution_hits: AtomicUsize,

    /// Keys that fell back to the raw key
    resolution_misses: AtomicUsize,

    /// Explicit language selections
    language_changes: AtomicUsize,

    /// Lead submissions confirmed by the relay
    lead_deliveries: AtomicUsize,

    /// Lead submissions that failed or were short-circuited
    lead_failures: AtomicUsize,

    /// Strategy completions requested
    strategy_requests: AtomicUsize,

    /// Strategy completions that ended in an apology text
    strategy_failures: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<TranslationMetrics> = OnceLock::new();

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global metrics instance.
    pub fn global() -> &'static TranslationMetrics {
        METRICS.get_or_init(TranslationMetrics::new)
    }

    pub fn record_resolution_hit(&self) {
        self.resolution_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_resolution_miss(&self) {
        self.resolution_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_language_change(&self) {
        self.language_changes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lead_delivery(&self) {
        self.lead_deliveries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lead_failure(&self) {
        self.lead_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_strategy_request(&self) {
        self.strategy_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_strategy_failure(&self) {
        self.strategy_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn resolution_hits(&self) -> usize {
        self.resolution_hits.load(Ordering::Relaxed)
    }

    pub fn resolution_misses(&self) -> usize {
        self.resolution_misses.load(Ordering::Relaxed)
    }

    pub fn language_changes(&self) -> usize {
        self.language_changes.load(Ordering::Relaxed)
    }

    pub fn lead_deliveries(&self) -> usize {
        self.lead_deliveries.load(Ordering::Relaxed)
    }

    pub fn lead_failures(&self) -> usize {
        self.lead_failures.load(Ordering::Relaxed)
    }

    pub fn strategy_requests(&self) -> usize {
        self.strategy_requests.load(Ordering::Relaxed)
    }

    pub fn strategy_failures(&self) -> usize {
        self.strategy_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.resolution_hits();
        let misses = self.resolution_misses();
        let deliveries = self.lead_deliveries();
        let failures = self.lead_failures();

        MetricsReport {
            resolution_hits: hits,
            resolution_misses: misses,
            resolution_hit_rate: percentage(hits, hits + misses),
            language_changes: self.language_changes(),
            lead_deliveries: deliveries,
            lead_failures: failures,
            lead_success_rate: percentage(deliveries, deliveries + failures),
            strategy_requests: self.strategy_requests(),
            strategy_failures: self.strategy_failures(),
        }
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// Snapshot of the metrics counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub resolution_hits: usize,
    pub resolution_misses: usize,

    /// Hit rate as a percentage (0-100)
    pub resolution_hit_rate: f64,

    pub language_changes: usize,
    pub lead_deliveries: usize,
    pub lead_failures: usize,

    /// Delivery success rate as a percentage (0-100)
    pub lead_success_rate: f64,

    pub strategy_requests: usize,
    pub strategy_failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_resolution_counters() {
        let metrics = TranslationMetrics::new();

        assert_eq!(metrics.resolution_hits(), 0);
        metrics.record_resolution_hit();
        metrics.record_resolution_hit();
        metrics.record_resolution_miss();
        assert_eq!(metrics.resolution_hits(), 2);
        assert_eq!(metrics.resolution_misses(), 1);
    }

    #[test]
    fn test_record_lead_counters() {
        let metrics = TranslationMetrics::new();

        metrics.record_lead_delivery();
        metrics.record_lead_failure();
        metrics.record_lead_failure();
        assert_eq!(metrics.lead_deliveries(), 1);
        assert_eq!(metrics.lead_failures(), 2);
    }

    #[test]
    fn test_record_language_and_strategy_counters() {
        let metrics = TranslationMetrics::new();

        metrics.record_language_change();
        metrics.record_strategy_request();
        metrics.record_strategy_failure();
        assert_eq!(metrics.language_changes(), 1);
        assert_eq!(metrics.strategy_requests(), 1);
        assert_eq!(metrics.strategy_failures(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = TranslationMetrics::new().report();

        assert_eq!(report.resolution_hits, 0);
        assert_eq!(report.resolution_hit_rate, 0.0);
        assert_eq!(report.lead_success_rate, 0.0);
    }

    #[test]
    fn test_report_rates() {
        let metrics = TranslationMetrics::new();

        // 3 hits, 1 miss = 75% hit rate
        metrics.record_resolution_hit();
        metrics.record_resolution_hit();
        metrics.record_resolution_hit();
        metrics.record_resolution_miss();

        // 1 delivery, 1 failure = 50% success rate
        metrics.record_lead_delivery();
        metrics.record_lead_failure();

        let report = metrics.report();
        assert_eq!(report.resolution_hit_rate, 75.0);
        assert_eq!(report.lead_success_rate, 50.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = TranslationMetrics::new();
        metrics.record_resolution_miss();

        let json = serde_json::to_value(metrics.report()).expect("Should serialize");
        assert_eq!(json["resolution_misses"], 1);
        assert!(json.get("lead_success_rate").is_some());
    }

    // ==================== Singleton Tests ====================

    #[test]
    fn test_global_returns_same_instance() {
        let metrics1 = TranslationMetrics::global();
        let metrics2 = TranslationMetrics::global();

        assert!(std::ptr::eq(metrics1, metrics2));
    }
}
