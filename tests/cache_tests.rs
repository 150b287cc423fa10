//! Integration Tests for the Cache Store
//!
//! Exercises the public store API end to end with simulated time.

use serde_json::json;
use swr_cache::cache::{CacheConfig, CacheStore, Lookup, ManualClock};

fn cfg() -> CacheConfig {
    CacheConfig::new(60, 30)
}

fn store_with_clock() -> (CacheStore<serde_json::Value, ManualClock>, ManualClock) {
    let clock = ManualClock::new(1_700_000_000_000);
    (CacheStore::with_clock(clock.clone()), clock)
}

#[test]
fn test_set_makes_key_present() {
    let (mut store, _clock) = store_with_clock();
    store.set("user", json!({ "id": 1 }), &cfg());

    assert!(store.has_cache("user"));
}

#[test]
fn test_get_returns_stored_value() {
    let (mut store, _clock) = store_with_clock();
    store.set("user", json!({ "id": 1 }), &cfg());

    assert_eq!(store.get("user"), Some(json!({ "id": 1 })));
}

#[test]
fn test_stale_after_thirty_one_seconds() {
    let (mut store, clock) = store_with_clock();
    store.set("k", json!("v"), &cfg());

    clock.advance_secs(31);

    assert_eq!(
        store.get_with_stale("k"),
        Lookup {
            data: Some(json!("v")),
            is_stale: true
        }
    );
}

#[test]
fn test_fresh_after_ten_seconds() {
    let (mut store, clock) = store_with_clock();
    store.set("k", json!("v"), &cfg());

    clock.advance_secs(10);

    assert_eq!(
        store.get_with_stale("k"),
        Lookup {
            data: Some(json!("v")),
            is_stale: false
        }
    );
}

#[test]
fn test_clear_one_key_keeps_other() {
    let (mut store, _clock) = store_with_clock();
    store.set("k1", json!("v1"), &cfg());
    store.set("k2", json!("v2"), &cfg());

    store.clear_cache("k1");

    assert!(!store.has_cache("k1"));
    assert!(store.has_cache("k2"));
}

#[test]
fn test_clear_all_removes_every_key() {
    let (mut store, _clock) = store_with_clock();
    store.set("k1", json!("v1"), &cfg());
    store.set("k2", json!("v2"), &cfg());
    store.set("k3", json!("v3"), &cfg());

    store.clear_all_cache();

    assert!(!store.has_cache("k1"));
    assert!(!store.has_cache("k2"));
    assert!(!store.has_cache("k3"));
}

#[test]
fn test_one_second_ttl_expires() {
    let (mut store, clock) = store_with_clock();
    store.set("k", json!("v"), &CacheConfig::new(1, 0));

    clock.advance_secs(1);
    assert!(store.has_cache("k"), "Age equal to TTL is still live");

    clock.advance_secs(1);
    assert_eq!(store.get("k"), None);
    assert!(!store.has_cache("k"));
}

#[test]
fn test_negative_durations_rejected() {
    assert!(CacheConfig::from_secs(-60, 30).is_err());
    assert!(CacheConfig::from_secs(60, -30).is_err());
}

#[test]
fn test_isolated_stores_do_not_share_state() {
    let (mut a, _) = store_with_clock();
    let (mut b, _) = store_with_clock();

    a.set("k", json!(1), &cfg());

    assert!(a.has_cache("k"));
    assert!(!b.has_cache("k"));
}
