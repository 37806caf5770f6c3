//! Nationwide warning aggregation.
//!
//! One fetch per prefecture (47 total), at most `concurrency` in flight at
//! once. A failed area is recorded in the result's error map and never
//! aborts its siblings; an aggregation with zero successes is still a
//! successful return. No retries happen here; worst-case latency stays
//! bounded at roughly (47 / concurrency) x the per-request timeout.

use std::collections::HashMap;

use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};

use crate::areas::AREA_CODES;
use crate::language::Language;
use crate::warnings::{FetchError, Severity, WarningRecord, WarningService};

/// The per-area fetch primitive. A trait seam so tests can substitute a
/// counting or failing double for the real JMA client.
pub trait AreaFetcher: Send + Sync {
    fn fetch_area<'a>(
        &'a self,
        area_code: &'a str,
        language: Language,
    ) -> BoxFuture<'a, Result<Vec<WarningRecord>, FetchError>>;
}

impl AreaFetcher for WarningService {
    fn fetch_area<'a>(
        &'a self,
        area_code: &'a str,
        language: Language,
    ) -> BoxFuture<'a, Result<Vec<WarningRecord>, FetchError>> {
        Box::pin(self.get_warnings(area_code, language))
    }
}

/// Merged outcome of one aggregation pass. Created fresh per call and
/// discarded after the response; nothing here is persisted.
#[derive(Debug, Default, Serialize)]
pub struct AggregationResult {
    pub records: Vec<WarningRecord>,
    /// area_code → failure reason for every area that could not be fetched
    pub errors: HashMap<String, String>,
}

impl AggregationResult {
    /// Only the records at or above `minimum` severity.
    pub fn at_least(&self, minimum: Severity) -> Vec<&WarningRecord> {
        self.records
            .iter()
            .filter(|record| record.severity >= minimum)
            .collect()
    }
}

#[derive(Clone)]
pub struct Aggregator<F: AreaFetcher> {
    fetcher: F,
    concurrency: usize,
}

impl<F: AreaFetcher> Aggregator<F> {
    /// # Panics
    /// Panics if `concurrency` is 0; the admission gate needs at least one
    /// slot.
    pub fn new(fetcher: F, concurrency: usize) -> Self {
        assert!(concurrency >= 1, "aggregator concurrency must be >= 1");
        Self { fetcher, concurrency }
    }

    /// Fetch all 47 prefectures and merge.
    ///
    /// Records are appended in completion order; ordering within one area's
    /// result is the upstream's. Always returns, even when every area
    /// failed.
    pub async fn aggregate(&self, language: Language) -> AggregationResult {
        let fetcher = &self.fetcher;

        let tasks: Vec<_> = AREA_CODES
            .iter()
            .copied()
            .map(|(prefecture, area_code)| async move {
                let outcome = fetcher.fetch_area(area_code, language).await;
                (prefecture, area_code, outcome)
            })
            .collect();

        let outcomes = stream::iter(tasks)
            .buffer_unordered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        let mut result = AggregationResult::default();
        for (prefecture, area_code, outcome) in outcomes {
            match outcome {
                Ok(records) => result.records.extend(records),
                Err(e) => {
                    warn!("Warning fetch for {} ({}) failed: {}", prefecture, area_code, e);
                    result.errors.insert(area_code.to_owned(), e.to_string());
                }
            }
        }

        info!(
            "Aggregated {} warnings across {} areas ({} failed)",
            result.records.len(),
            AREA_CODES.len(),
            result.errors.len()
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warnings::AlertKind;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn record(area_code: &str, severity: Severity) -> WarningRecord {
        WarningRecord {
            id: format!("{}_03_202401151030", area_code),
            kind: AlertKind::from(severity),
            area_code: area_code.to_owned(),
            area: "テスト地方".to_owned(),
            title: "大雨警報".to_owned(),
            title_translated: None,
            description: "テスト地方に大雨警報が発表されています。".to_owned(),
            description_translated: None,
            severity,
            issued_at: "2024-01-15T10:30:00+09:00".to_owned(),
            action: None,
        }
    }

    /// Double that tracks the number of simultaneously outstanding fetches
    /// and can fail a chosen set of areas.
    struct CountingFetcher {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
        failing: HashSet<&'static str>,
        seen: Mutex<Vec<String>>,
    }

    impl CountingFetcher {
        fn new(failing: HashSet<&'static str>) -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
                calls: AtomicUsize::new(0),
                failing,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn peak(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AreaFetcher for CountingFetcher {
        fn fetch_area<'a>(
            &'a self,
            area_code: &'a str,
            _language: Language,
        ) -> BoxFuture<'a, Result<Vec<WarningRecord>, FetchError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.peak.fetch_max(current, Ordering::SeqCst);
                self.seen.lock().unwrap().push(area_code.to_owned());

                // Let siblings pile up against the gate
                tokio::time::sleep(Duration::from_millis(5)).await;

                self.in_flight.fetch_sub(1, Ordering::SeqCst);

                if self.failing.contains(area_code) {
                    Err(FetchError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
                } else {
                    Ok(vec![record(area_code, Severity::High)])
                }
            })
        }
    }

    #[tokio::test]
    async fn test_aggregate_fetches_all_47_areas_once() {
        let fetcher = CountingFetcher::new(HashSet::new());
        let aggregator = Aggregator::new(fetcher, 10);

        let result = aggregator.aggregate(Language::JAPANESE).await;

        assert_eq!(aggregator.fetcher.calls(), 47);
        assert_eq!(result.records.len(), 47);
        assert!(result.errors.is_empty());

        let mut seen = aggregator.fetcher.seen.lock().unwrap().clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 47);
    }

    #[tokio::test]
    async fn test_concurrency_never_exceeds_the_gate() {
        let fetcher = CountingFetcher::new(HashSet::new());
        let aggregator = Aggregator::new(fetcher, 10);

        aggregator.aggregate(Language::JAPANESE).await;

        let peak = aggregator.fetcher.peak();
        assert!(peak <= 10, "peak in-flight was {}", peak);
        // Sanity: the gate was actually exercised by more than one task
        assert!(peak > 1, "fetches ran sequentially (peak {})", peak);
    }

    #[tokio::test]
    async fn test_concurrency_gate_of_one_serializes() {
        let fetcher = CountingFetcher::new(HashSet::new());
        let aggregator = Aggregator::new(fetcher, 1);

        aggregator.aggregate(Language::JAPANESE).await;
        assert_eq!(aggregator.fetcher.peak(), 1);
    }

    #[tokio::test]
    async fn test_partial_failures_are_recorded_not_fatal() {
        let failing: HashSet<&'static str> =
            ["016000", "130000", "270000", "400000", "471000"].into();
        let fetcher = CountingFetcher::new(failing.clone());
        let aggregator = Aggregator::new(fetcher, 10);

        let result = aggregator.aggregate(Language::JAPANESE).await;

        assert_eq!(result.records.len(), 42);
        assert_eq!(result.errors.len(), 5);
        for code in failing {
            assert!(result.errors.contains_key(code), "missing error for {}", code);
        }
    }

    #[tokio::test]
    async fn test_all_areas_failing_still_returns() {
        let failing: HashSet<&'static str> =
            AREA_CODES.iter().map(|(_, code)| *code).collect();
        let fetcher = CountingFetcher::new(failing);
        let aggregator = Aggregator::new(fetcher, 10);

        let result = aggregator.aggregate(Language::JAPANESE).await;

        assert!(result.records.is_empty());
        assert_eq!(result.errors.len(), 47);
    }

    #[tokio::test]
    async fn test_no_retries_within_one_aggregation() {
        let failing: HashSet<&'static str> =
            AREA_CODES.iter().map(|(_, code)| *code).collect();
        let fetcher = CountingFetcher::new(failing);
        let aggregator = Aggregator::new(fetcher, 10);

        aggregator.aggregate(Language::JAPANESE).await;
        assert_eq!(aggregator.fetcher.calls(), 47);
    }

    #[test]
    fn test_at_least_filters_by_severity() {
        let mut result = AggregationResult::default();
        result.records.push(record("130000", Severity::Low));
        result.records.push(record("130000", Severity::High));
        result.records.push(record("130000", Severity::Extreme));

        assert_eq!(result.at_least(Severity::High).len(), 2);
        assert_eq!(result.at_least(Severity::Extreme).len(), 1);
        assert_eq!(result.at_least(Severity::Low).len(), 3);
    }

    #[test]
    #[should_panic(expected = "concurrency must be >= 1")]
    fn test_zero_concurrency_panics() {
        let fetcher = CountingFetcher::new(HashSet::new());
        let _ = Aggregator::new(fetcher, 0);
    }
}
