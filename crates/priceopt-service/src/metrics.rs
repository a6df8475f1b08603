//! Prometheus metrics for pricing and cache behaviour.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Metric names for the pricing service.
pub mod names {
    /// Total quote requests, labelled by outcome.
    pub const QUOTES_TOTAL: &str = "priceopt_quotes_total";
    /// Quote latency in seconds.
    pub const QUOTE_DURATION_SECONDS: &str = "priceopt_quote_duration_seconds";

    /// Cache hits, labelled by kind (price, baseline).
    pub const CACHE_HITS_TOTAL: &str = "priceopt_cache_hits_total";
    /// Cache misses, labelled by kind.
    pub const CACHE_MISSES_TOTAL: &str = "priceopt_cache_misses_total";
    /// Cache operations that failed and were degraded.
    pub const CACHE_ERRORS_TOTAL: &str = "priceopt_cache_errors_total";

    /// Baseline upserts.
    pub const BASELINE_UPSERTS_TOTAL: &str = "priceopt_baseline_upserts_total";
    /// Baseline deletes.
    pub const BASELINE_DELETES_TOTAL: &str = "priceopt_baseline_deletes_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::QUOTES_TOTAL, "Total number of price quote requests");
    describe_histogram!(
        names::QUOTE_DURATION_SECONDS,
        "Price quote latency in seconds"
    );

    describe_counter!(names::CACHE_HITS_TOTAL, "Total number of cache hits");
    describe_counter!(names::CACHE_MISSES_TOTAL, "Total number of cache misses");
    describe_counter!(
        names::CACHE_ERRORS_TOTAL,
        "Total number of failed cache operations"
    );

    describe_counter!(
        names::BASELINE_UPSERTS_TOTAL,
        "Total number of baseline upserts"
    );
    describe_counter!(
        names::BASELINE_DELETES_TOTAL,
        "Total number of baseline deletes"
    );
}

/// Outcome label for a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteOutcome {
    /// Served from the quote cache.
    Cached,
    /// Computed from the baseline.
    Computed,
    /// Unknown SKU.
    NotFound,
    /// Any other failure.
    Error,
}

impl QuoteOutcome {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cached => "cached",
            Self::Computed => "computed",
            Self::NotFound => "not_found",
            Self::Error => "error",
        }
    }
}

/// Pricing metrics recorder.
#[derive(Clone)]
pub struct PricingMetrics;

impl PricingMetrics {
    /// Record a finished quote.
    pub fn quote(outcome: QuoteOutcome, duration: Duration) {
        counter!(names::QUOTES_TOTAL, "outcome" => outcome.as_str()).increment(1);
        histogram!(names::QUOTE_DURATION_SECONDS, "outcome" => outcome.as_str())
            .record(duration.as_secs_f64());
    }

    /// Record a cache hit.
    pub fn cache_hit(kind: &'static str) {
        counter!(names::CACHE_HITS_TOTAL, "kind" => kind).increment(1);
    }

    /// Record a cache miss.
    pub fn cache_miss(kind: &'static str) {
        counter!(names::CACHE_MISSES_TOTAL, "kind" => kind).increment(1);
    }

    /// Record a failed cache operation.
    pub fn cache_error(operation: &'static str) {
        counter!(names::CACHE_ERRORS_TOTAL, "operation" => operation).increment(1);
    }

    /// Record a baseline upsert.
    pub fn baseline_upserted() {
        counter!(names::BASELINE_UPSERTS_TOTAL).increment(1);
    }

    /// Record a baseline delete.
    pub fn baseline_deleted() {
        counter!(names::BASELINE_DELETES_TOTAL).increment(1);
    }
}
