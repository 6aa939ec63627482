//! Bounded-concurrency batch dispatch
//!
//! Fans one lookup per barcode out over a `buffer_unordered` stream with
//! a fixed concurrency ceiling. Every submitted barcode resolves to
//! exactly one terminal [`Outcome`]; one barcode's failure never aborts
//! or delays the rest. Aggregation happens in a single join step after
//! the stream is drained, so there is no shared mutable state while
//! lookups are in flight.

use crate::config::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT};
use crate::core::client::{MarksClient, Outcome};
use crate::core::records::MarksRow;
use crate::error::LookupError;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for batch dispatch
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum concurrent lookups (default: 5)
    pub concurrency: usize,
    /// Timeout per individual lookup (default: 10s)
    pub timeout: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BatchConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency ceiling
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the per-lookup timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Terminal outcome of one submitted barcode
#[derive(Debug, Clone)]
pub struct BarCodeOutcome {
    /// The barcode as submitted
    pub bar_code: String,
    /// Its resolved outcome
    pub outcome: Outcome,
}

/// Aggregated result of one batch invocation
///
/// The two collections `rows` and `errors` are the dispatcher's output
/// contract; `no_data` carries the valid-negative barcodes separately
/// so the caller can report them as warnings rather than failures.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Successful rows, flattened across barcodes; per-barcode row
    /// order follows the endpoint's response
    pub rows: Vec<MarksRow>,
    /// Barcodes the endpoint had no records for
    pub no_data: Vec<String>,
    /// One human-readable entry per failed barcode
    pub errors: Vec<String>,
    /// Number of barcodes submitted
    pub total: usize,
}

impl BatchReport {
    /// Fold resolved outcomes into a report.
    ///
    /// Called once, after every submitted barcode has reached a
    /// terminal state.
    pub fn aggregate(outcomes: Vec<BarCodeOutcome>) -> Self {
        let total = outcomes.len();
        let mut report = BatchReport {
            total,
            ..Default::default()
        };

        for BarCodeOutcome { bar_code, outcome } in outcomes {
            match outcome {
                Outcome::Success(mut rows) => report.rows.append(&mut rows),
                Outcome::NoData => report.no_data.push(bar_code),
                Outcome::Error(e) => report.errors.push(format!("{}: {}", bar_code, e)),
            }
        }

        report
    }

    /// Whether the batch produced nothing at all
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Run `op` for every barcode with at most `config.concurrency` in
/// flight, forcing a timeout outcome on any lookup that outlives
/// `config.timeout`.
///
/// Outcomes arrive in completion order, which is fine: each one carries
/// its barcode.
async fn run_batch<F, Fut>(bar_codes: Vec<String>, config: &BatchConfig, op: F) -> Vec<BarCodeOutcome>
where
    F: Fn(String) -> Fut + Clone,
    Fut: Future<Output = Outcome>,
{
    let timeout = config.timeout;

    stream::iter(bar_codes)
        .map(|bar_code| {
            let op = op.clone();
            async move {
                let outcome = match tokio::time::timeout(timeout, op(bar_code.clone())).await {
                    Ok(outcome) => outcome,
                    Err(_) => Outcome::Error(LookupError::Timeout(timeout)),
                };
                BarCodeOutcome { bar_code, outcome }
            }
        })
        .buffer_unordered(config.concurrency.max(1))
        .collect()
        .await
}

/// Dispatches barcode lookups with bounded concurrency
#[derive(Debug, Clone)]
pub struct BatchDispatcher {
    client: MarksClient,
    config: BatchConfig,
}

impl BatchDispatcher {
    /// Create a dispatcher, taking concurrency and timeout from the
    /// client's configuration
    pub fn new(client: MarksClient) -> Self {
        let config = BatchConfig::new()
            .with_concurrency(client.config().concurrency)
            .with_timeout(client.config().timeout);
        Self { client, config }
    }

    /// Create a dispatcher with an explicit batch configuration
    pub fn with_config(client: MarksClient, config: BatchConfig) -> Self {
        Self { client, config }
    }

    /// Current batch configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Resolve every barcode to exactly one terminal outcome.
    ///
    /// Returns one [`BarCodeOutcome`] per submitted barcode, in
    /// completion order. An empty input dispatches no requests.
    pub async fn dispatch(&self, bar_codes: Vec<String>) -> Vec<BarCodeOutcome> {
        if bar_codes.is_empty() {
            debug!("empty barcode list, nothing to dispatch");
            return Vec::new();
        }

        info!(
            count = bar_codes.len(),
            concurrency = self.config.concurrency,
            "dispatching batch"
        );

        let client = self.client.clone();
        run_batch(bar_codes, &self.config, move |bar_code| {
            let client = client.clone();
            async move { client.lookup(&bar_code).await }
        })
        .await
    }

    /// Dispatch and aggregate into a [`BatchReport`]
    pub async fn dispatch_report(&self, bar_codes: Vec<String>) -> BatchReport {
        let outcomes = self.dispatch(bar_codes).await;
        let report = BatchReport::aggregate(outcomes);

        info!(
            total = report.total,
            rows = report.rows.len(),
            no_data = report.no_data.len(),
            errors = report.errors.len(),
            "batch complete"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn codes(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("410201{:04}", i)).collect()
    }

    #[tokio::test]
    async fn test_exactly_one_outcome_per_barcode() {
        let config = BatchConfig::new().with_concurrency(3);

        let results = run_batch(codes(7), &config, |_| async { Outcome::NoData }).await;

        assert_eq!(results.len(), 7);
        let mut seen: Vec<_> = results.iter().map(|r| r.bar_code.clone()).collect();
        seen.sort();
        let mut expected = codes(7);
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn test_failures_do_not_contaminate_other_barcodes() {
        let config = BatchConfig::new().with_concurrency(2);

        let results = run_batch(codes(5), &config, |bar_code| async move {
            if bar_code.ends_with('2') {
                Outcome::Error(LookupError::Network("connection reset".to_string()))
            } else {
                Outcome::NoData
            }
        })
        .await;

        assert_eq!(results.len(), 5);
        let failed: Vec<_> = results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Error(_)))
            .collect();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].bar_code.ends_with('2'));
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r.outcome, Outcome::NoData))
                .count(),
            4
        );
    }

    #[tokio::test]
    async fn test_concurrency_never_exceeds_ceiling() {
        let config = BatchConfig::new().with_concurrency(5);
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let in_flight_op = in_flight.clone();
        let max_seen_op = max_seen.clone();
        let results = run_batch(codes(20), &config, move |_| {
            let in_flight = in_flight_op.clone();
            let max_seen = max_seen_op.clone();
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Outcome::NoData
            }
        })
        .await;

        assert_eq!(results.len(), 20);
        assert!(max_seen.load(Ordering::SeqCst) <= 5);
        // With 20 items the window should actually fill up
        assert!(max_seen.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_slow_lookup_becomes_timeout_outcome() {
        let config = BatchConfig::new()
            .with_concurrency(2)
            .with_timeout(Duration::from_millis(30));

        let results = run_batch(codes(1), &config, |_| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Outcome::NoData
        })
        .await;

        assert_eq!(results.len(), 1);
        match &results[0].outcome {
            Outcome::Error(e) => assert!(e.is_timeout()),
            other => panic!("expected timeout error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_one_slow_barcode_does_not_block_the_rest() {
        let config = BatchConfig::new()
            .with_concurrency(5)
            .with_timeout(Duration::from_millis(50));

        let results = run_batch(codes(4), &config, |bar_code| async move {
            if bar_code.ends_with('0') {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Outcome::NoData
        })
        .await;

        assert_eq!(results.len(), 4);
        let timeouts = results
            .iter()
            .filter(|r| matches!(&r.outcome, Outcome::Error(e) if e.is_timeout()))
            .count();
        assert_eq!(timeouts, 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r.outcome, Outcome::NoData))
                .count(),
            3
        );
    }

    #[test]
    fn test_config_min_concurrency() {
        let config = BatchConfig::new().with_concurrency(0);
        assert_eq!(config.concurrency, 1); // Should be at least 1
    }

    #[test]
    fn test_aggregate_partitions_outcomes() {
        use crate::core::records::RawMarksRecord;
        use serde_json::json;

        let raw: RawMarksRecord =
            serde_json::from_value(json!({ "Bar_Code": "1", "Obt_Marks": 60 })).unwrap();
        let outcomes = vec![
            BarCodeOutcome {
                bar_code: "1".to_string(),
                outcome: Outcome::Success(vec![raw.clone().into(), raw.into()]),
            },
            BarCodeOutcome {
                bar_code: "2".to_string(),
                outcome: Outcome::NoData,
            },
            BarCodeOutcome {
                bar_code: "3".to_string(),
                outcome: Outcome::Error(LookupError::Timeout(Duration::from_secs(10))),
            },
        ];

        let report = BatchReport::aggregate(outcomes);
        assert_eq!(report.total, 3);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.no_data, vec!["2"]);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("3: "));
        assert!(report.errors[0].contains("timed out"));
        assert!(!report.is_empty());
    }

    #[test]
    fn test_aggregate_empty_is_empty() {
        let report = BatchReport::aggregate(Vec::new());
        assert!(report.is_empty());
        assert_eq!(report.total, 0);
        assert!(report.rows.is_empty());
        assert!(report.errors.is_empty());
    }
}
