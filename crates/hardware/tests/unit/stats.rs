//! Counter accumulation and serialization.

use csim_core::cache::Outcome;
use csim_core::stats::Statistics;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_record_accumulates_each_outcome() {
    let mut stats = Statistics::default();
    stats.record(Outcome::Hit);
    stats.record(Outcome::Hit);
    stats.record(Outcome::Miss);
    stats.record(Outcome::Eviction);

    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.evictions, 1);
    assert_eq!(stats.accesses(), 4);
}

#[test]
fn test_eviction_counts_as_miss() {
    let mut stats = Statistics::default();
    stats.record(Outcome::Eviction);

    assert_eq!(stats.misses, 1);
    assert_eq!(stats.evictions, 1);
    assert_eq!(stats.hits, 0);
}

#[test]
fn test_serializes_to_flat_counters() {
    let mut stats = Statistics::default();
    stats.record(Outcome::Hit);
    stats.record(Outcome::Miss);
    stats.record(Outcome::Eviction);

    assert_eq!(
        serde_json::to_value(stats).unwrap(),
        json!({ "hits": 1, "misses": 2, "evictions": 1 })
    );
}
