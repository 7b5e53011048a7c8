//! Summary statistics
//!
//! Pure functions over metric values. Percentiles use the nearest-rank
//! method: for `n` sorted values the `p`-th percentile is the value at
//! index `ceil(n * p / 100) - 1`, clamped to `[0, n - 1]`. Empty input
//! yields zeros.

use flowcache_domain::value_objects::{
    CacheReport, EndpointSummary, MemoryReport, MetricEvent, SeriesSummary,
};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Nearest-rank percentile of values already sorted ascending
pub fn percentile(sorted: &[f64], percent: u32) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (sorted.len() * percent as usize).div_ceil(100);
    let index = rank.saturating_sub(1).min(sorted.len() - 1);
    sorted[index]
}

/// Arithmetic mean, `0` when empty
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Count, mean, p50, p95 and p99 of a set of values
pub fn summarize(values: &[f64]) -> SeriesSummary {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    SeriesSummary {
        count: sorted.len(),
        average: average(&sorted),
        p50: percentile(&sorted, 50),
        p95: percentile(&sorted, 95),
        p99: percentile(&sorted, 99),
    }
}

/// Summary of the values carried by a set of events
pub fn summarize_events(events: &[MetricEvent]) -> SeriesSummary {
    let values: Vec<f64> = events.iter().map(|e| e.value).collect();
    summarize(&values)
}

/// The `n` events with the highest value, descending; ties by name
pub fn slowest(events: &[MetricEvent], n: usize) -> Vec<MetricEvent> {
    let mut ranked = events.to_vec();
    ranked.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(n);
    ranked
}

/// The `n` endpoints with the highest mean value, descending; ties by name
pub fn top_endpoints(events: &[MetricEvent], n: usize) -> Vec<EndpointSummary> {
    let mut by_name: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for event in events {
        by_name.entry(event.name.as_str()).or_default().push(event.value);
    }

    let mut endpoints: Vec<EndpointSummary> = by_name
        .into_iter()
        .map(|(name, values)| EndpointSummary {
            endpoint: name.to_string(),
            count: values.len(),
            average: average(&values),
        })
        .collect();
    endpoints.sort_by(|a, b| match b.average.total_cmp(&a.average) {
        Ordering::Equal => a.endpoint.cmp(&b.endpoint),
        other => other,
    });
    endpoints.truncate(n);
    endpoints
}

/// Memory summary with extremes
pub fn memory_report(events: &[MetricEvent]) -> MemoryReport {
    let summary = summarize_events(events);
    let (min, max) = events
        .iter()
        .map(|e| e.value)
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 0.0));
    MemoryReport { summary, min, max }
}

fn is_access(name: &str, outcome: &str) -> bool {
    name == outcome
        || name
            .strip_suffix(outcome)
            .is_some_and(|rest| rest.ends_with(':'))
}

/// Cache hit ratio over `hit` / `*:hit` and `miss` / `*:miss` events
pub fn cache_report(events: &[MetricEvent]) -> CacheReport {
    let mut hits = 0.0;
    let mut misses = 0.0;
    for event in events {
        if is_access(&event.name, "hit") {
            hits += event.value;
        } else if is_access(&event.name, "miss") {
            misses += event.value;
        }
    }
    let total = hits + misses;
    CacheReport {
        summary: summarize_events(events),
        hits,
        misses,
        hit_rate: if total > 0.0 { hits / total } else { 0.0 },
    }
}
