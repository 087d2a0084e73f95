//! Unit tests for statistics stores

use pv_core::services::verification::{stats_key, STATS_KEY_PREFIX};
use pv_core::services::StatsStoreTrait;

use crate::stats::{MemoryStatsStore, StatsStore};

#[tokio::test]
async fn test_memory_counters_accumulate() {
    let store = MemoryStatsStore::new();

    assert_eq!(store.increment(&stats_key("total"), 1).await.unwrap(), 1);
    assert_eq!(store.increment(&stats_key("total"), 4).await.unwrap(), 5);
    assert_eq!(store.get(&stats_key("total")), 5);
    assert_eq!(store.get(&stats_key("failed")), 0);
}

#[tokio::test]
async fn test_snapshot_filters_by_prefix() {
    let store = MemoryStatsStore::new();
    store.increment(&stats_key("successful"), 2).await.unwrap();
    store.increment(&stats_key("api_calls"), 1).await.unwrap();
    store.increment("unrelated", 9).await.unwrap();

    let snapshot = store.snapshot(STATS_KEY_PREFIX);
    assert_eq!(
        snapshot,
        vec![
            (stats_key("api_calls"), 1),
            (stats_key("successful"), 2),
        ]
    );
}

#[tokio::test]
async fn test_store_enum_delegates() {
    let store = StatsStore::Memory(MemoryStatsStore::new());

    store.increment(&stats_key("batch_total"), 1).await.unwrap();
    assert_eq!(store.increment(&stats_key("batch_total"), 1).await.unwrap(), 2);
}
