// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn set_then_get_roundtrips() {
    let cache = InMemoryCache::new();
    cache.set("cleaner:status:wrk-1", "available".into(), None).await.unwrap();
    assert_eq!(cache.get("cleaner:status:wrk-1").await.unwrap(), Some("available".into()));
}

#[tokio::test]
async fn expired_entry_reads_as_absent() {
    let cache = InMemoryCache::new();
    cache.set("otp:123", "0000".into(), Some(Duration::from_millis(1))).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(cache.get("otp:123").await.unwrap(), None);
}

#[tokio::test]
async fn delete_clears_all_tables_for_key() {
    let cache = InMemoryCache::new();
    cache.set("k", "v".into(), None).await.unwrap();
    cache.hset("k", "f", "v".into()).await.unwrap();
    cache.delete("k").await.unwrap();
    assert_eq!(cache.get("k").await.unwrap(), None);
    assert_eq!(cache.hget("k", "f").await.unwrap(), None);
}

#[tokio::test]
async fn hincrby_creates_and_increments() {
    let cache = InMemoryCache::new();
    assert_eq!(cache.hincrby("allocation:metrics:dxb:2026-01-01", "total_allocations", 1).await.unwrap(), 1);
    assert_eq!(cache.hincrby("allocation:metrics:dxb:2026-01-01", "total_allocations", 1).await.unwrap(), 2);
}

#[tokio::test]
async fn expired_hash_reads_as_absent() {
    let cache = InMemoryCache::new();
    cache.hset("allocation:metrics:dxb:2026-01-01", "total_allocations", "1".into()).await.unwrap();
    cache.expire("allocation:metrics:dxb:2026-01-01", Duration::from_millis(1)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(cache.hget("allocation:metrics:dxb:2026-01-01", "total_allocations").await.unwrap(), None);
}

#[tokio::test]
async fn zrange_returns_members_ordered_by_score() {
    let cache = InMemoryCache::new();
    cache.zadd("cleaner:queue:dxb", "wrk-2".into(), 2.0).await.unwrap();
    cache.zadd("cleaner:queue:dxb", "wrk-1".into(), 1.0).await.unwrap();
    assert_eq!(cache.zrange("cleaner:queue:dxb").await.unwrap(), vec!["wrk-1".to_string(), "wrk-2".to_string()]);
}

#[tokio::test]
async fn null_cache_is_always_empty() {
    let cache = fake::NullCache;
    cache.set("k", "v".into(), None).await.unwrap();
    assert_eq!(cache.get("k").await.unwrap(), None);
}
